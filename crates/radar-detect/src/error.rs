//! Error types for radar detection

use radar_sdk::SdkError;
use thiserror::Error;

/// Errors that can occur while looking for a radar
#[derive(Debug, Error)]
pub enum DetectError {
    /// The transport reported no candidate ports
    #[error("no serial ports found")]
    NoPortsFound,

    /// Every candidate port was tried and none answered
    #[error("no radar responded on {} port(s): {}", tried.len(), tried.join(", "))]
    NoDeviceResponded { tried: Vec<String> },

    /// Failed to enumerate candidate ports
    #[error("failed to enumerate ports: {0}")]
    Enumeration(#[from] SdkError),
}
