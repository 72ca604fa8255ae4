//! Acquisition configuration

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// UDP port target telemetry is forwarded to
pub const DEFAULT_TELEMETRY_PORT: u16 = 5000;

/// Automatic trigger interval for raw frame endpoints (1 s)
pub const RAW_TRIGGER_INTERVAL: Duration = Duration::from_secs(1);

/// Automatic trigger interval for target endpoints (100 s)
pub const TARGET_TRIGGER_INTERVAL: Duration = Duration::from_secs(100);

/// Delay between polling iterations
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for an acquisition run
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// Automatic trigger interval for the raw frame endpoint
    pub raw_trigger_interval: Duration,
    /// Automatic trigger interval for the target endpoint
    pub target_trigger_interval: Duration,
    /// Delay between polling iterations
    pub poll_interval: Duration,
    /// Where target telemetry is sent
    pub telemetry_destination: SocketAddr,
    /// Forward one target record out of this many (0 disables forwarding)
    pub forward_every: u64,
    /// Byte capacity of one formatted target record
    pub record_capacity: usize,
    /// Samples printed individually per raw frame
    pub max_reported_samples: usize,
    /// Warn after this many consecutive fetch failures on one endpoint (0 never warns)
    pub failure_warn_every: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            raw_trigger_interval: RAW_TRIGGER_INTERVAL,
            target_trigger_interval: TARGET_TRIGGER_INTERVAL,
            poll_interval: POLL_INTERVAL,
            telemetry_destination: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_TELEMETRY_PORT)),
            forward_every: 20,
            record_capacity: 512,
            max_reported_samples: 10,
            failure_warn_every: 100,
        }
    }
}
