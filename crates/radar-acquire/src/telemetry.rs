//! UDP telemetry channel
//!
//! Fire-and-forget datagrams to a fixed destination. Nothing is
//! acknowledged. Sends happen inside synchronous SDK callbacks, so the
//! socket is bound through tokio and then used in blocking mode.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket as StdUdpSocket};

use tokio::net::UdpSocket;
use tracing::info;

use crate::error::AcquireError;

/// Outbound datagram socket with a fixed destination
#[derive(Debug)]
pub struct TelemetryChannel {
    socket: StdUdpSocket,
    destination: SocketAddr,
}

impl TelemetryChannel {
    /// Open an ephemeral socket for sending to `destination`
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(destination: SocketAddr) -> Result<Self, AcquireError> {
        let local: SocketAddr = if destination.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local)
            .await
            .and_then(UdpSocket::into_std)
            .map_err(AcquireError::TelemetryOpen)?;
        // into_std leaves the socket non-blocking
        socket
            .set_nonblocking(false)
            .map_err(AcquireError::TelemetryOpen)?;

        info!("UDP socket initialized for {}", destination);
        Ok(Self {
            socket,
            destination,
        })
    }

    /// Where datagrams go
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Send one datagram
    pub fn send(&self, payload: &[u8]) -> Result<(), AcquireError> {
        self.socket
            .send_to(payload, self.destination)
            .map(|_| ())
            .map_err(AcquireError::TelemetrySendFailed)
    }
}
