//! Data callbacks
//!
//! Handlers are installed once and invoked synchronously by the SDK from
//! inside a fetch call, on the thread that issued the fetch.

use crate::types::{EndpointId, FrameInfo, TargetInfo};

/// Receives raw ADC frames
pub trait FrameHandler {
    /// Called once per frame delivered by `fetch_frame`
    fn on_frame(&mut self, endpoint: EndpointId, frame: &FrameInfo);
}

/// Receives target lists
pub trait TargetHandler {
    /// Called once per target list delivered by `fetch_targets`
    ///
    /// The slice may be empty; an empty list is still one invocation.
    fn on_targets(&mut self, endpoint: EndpointId, targets: &[TargetInfo]);
}

impl<F> FrameHandler for F
where
    F: FnMut(EndpointId, &FrameInfo),
{
    fn on_frame(&mut self, endpoint: EndpointId, frame: &FrameInfo) {
        self(endpoint, frame)
    }
}

impl<F> TargetHandler for F
where
    F: FnMut(EndpointId, &[TargetInfo]),
{
    fn on_targets(&mut self, endpoint: EndpointId, targets: &[TargetInfo]) {
        self(endpoint, targets)
    }
}
