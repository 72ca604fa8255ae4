//! Error types for SDK calls

use thiserror::Error;

use crate::types::{EndpointId, ProtocolHandle};

/// Errors reported by the device SDK
#[derive(Debug, Error)]
pub enum SdkError {
    /// Nothing answered on the port
    #[error("no radar responded on {port}")]
    NoResponse { port: String },

    /// Handle does not refer to an open session
    #[error("invalid protocol handle {0}")]
    InvalidHandle(ProtocolHandle),

    /// Endpoint does not support the requested operation
    #[error("endpoint {0} does not support this operation")]
    IncompatibleEndpoint(EndpointId),

    /// Device returned a non-zero status code
    #[error("device returned status {0:#06x}")]
    Status(i32),

    /// Serial port enumeration or I/O failed
    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),
}
