//! The device SDK trait

use std::time::Duration;

use crate::error::SdkError;
use crate::handler::{FrameHandler, TargetHandler};
use crate::types::{EndpointId, ProtocolHandle};

/// Operations a radar acquisition client needs from the device SDK
///
/// All calls are blocking. Fetch calls dispatch to the installed handlers
/// synchronously before returning; a fetch with no handler installed for its
/// data kind still talks to the device but delivers nothing.
pub trait RadarSdk {
    /// Candidate serial ports, in the order they should be tried
    fn list_ports(&mut self) -> Result<Vec<String>, SdkError>;

    /// Open a session with a radar on `port`
    fn connect(&mut self, port: &str) -> Result<ProtocolHandle, SdkError>;

    /// Close a session; unknown handles are ignored
    fn disconnect(&mut self, handle: ProtocolHandle);

    /// Number of endpoints the device declares
    fn endpoint_count(&mut self, handle: ProtocolHandle) -> Result<u8, SdkError>;

    /// Whether `endpoint` delivers raw ADC frames
    fn is_raw_frame_endpoint(&mut self, handle: ProtocolHandle, endpoint: EndpointId) -> bool;

    /// Whether `endpoint` delivers target detection lists
    fn is_target_endpoint(&mut self, handle: ProtocolHandle, endpoint: EndpointId) -> bool;

    /// Install the raw frame callback, replacing any previous one
    fn set_frame_handler(&mut self, handler: Box<dyn FrameHandler>);

    /// Install the target list callback, replacing any previous one
    fn set_target_handler(&mut self, handler: Box<dyn TargetHandler>);

    /// Arm the endpoint's automatic frame trigger
    ///
    /// The device works in microseconds; sub-microsecond parts of
    /// `interval` are dropped.
    fn set_automatic_frame_trigger(
        &mut self,
        handle: ProtocolHandle,
        endpoint: EndpointId,
        interval: Duration,
    ) -> Result<(), SdkError>;

    /// Request the current frame from a raw frame endpoint
    fn fetch_frame(&mut self, handle: ProtocolHandle, endpoint: EndpointId)
        -> Result<(), SdkError>;

    /// Request the current target list from a target detection endpoint
    fn fetch_targets(
        &mut self,
        handle: ProtocolHandle,
        endpoint: EndpointId,
    ) -> Result<(), SdkError>;
}

/// Convert a trigger interval to the device's microsecond resolution
pub fn interval_micros(interval: Duration) -> u32 {
    u32::try_from(interval.as_micros()).unwrap_or(u32::MAX)
}
