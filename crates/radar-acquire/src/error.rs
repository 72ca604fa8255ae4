//! Error types for acquisition

use std::io;

use radar_sdk::SdkError;
use thiserror::Error;

use crate::mode::DataKind;

/// Errors that can occur during acquisition
///
/// Only `TelemetryOpen` stops a run; the others are logged and the run
/// carries on.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The mode asks for a data kind the device has no endpoint for
    #[error("no {0} endpoint located")]
    EndpointNotLocated(DataKind),

    /// A fetch call returned an error status
    #[error("{kind} fetch failed: {source}")]
    FetchFailed {
        /// Data kind that was being fetched
        kind: DataKind,
        /// SDK error
        source: SdkError,
    },

    /// The telemetry socket could not be opened
    #[error("failed to open telemetry socket: {0}")]
    TelemetryOpen(#[source] io::Error),

    /// A telemetry datagram could not be sent
    #[error("telemetry send failed: {0}")]
    TelemetrySendFailed(#[source] io::Error),
}
