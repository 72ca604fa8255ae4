//! Endpoint capability discovery
//!
//! Every declared endpoint index is probed for both capabilities. When a
//! device reports a capability on more than one index the highest index is
//! kept.

use radar_sdk::{EndpointId, RadarSdk};
use tracing::{info, warn};

use crate::scanner::Connection;

/// What an endpoint delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Raw ADC frames
    RawFrameSource,
    /// Processed target lists
    TargetDetectionSource,
    /// Neither, or not retained
    Unclassified,
}

/// Endpoints retained for each capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocatedEndpoints {
    /// Raw frame source, if any
    pub raw: Option<EndpointId>,
    /// Target detection source, if any
    pub target: Option<EndpointId>,
}

impl LocatedEndpoints {
    /// Classification of `endpoint` after location
    ///
    /// Should a single index carry both capabilities, it reports as a raw
    /// frame source.
    pub fn classify(&self, endpoint: EndpointId) -> Capability {
        if self.raw == Some(endpoint) {
            Capability::RawFrameSource
        } else if self.target == Some(endpoint) {
            Capability::TargetDetectionSource
        } else {
            Capability::Unclassified
        }
    }
}

/// Scans a connection's endpoints
#[derive(Debug, Default)]
pub struct EndpointLocator;

impl EndpointLocator {
    /// Create a new locator
    pub fn new() -> Self {
        Self
    }

    /// Probe indices `1..=endpoint_count` and keep the last match per capability
    pub fn locate<S: RadarSdk + ?Sized>(
        &self,
        sdk: &mut S,
        connection: &Connection,
    ) -> LocatedEndpoints {
        info!("Scanning for endpoints...");

        let count = match sdk.endpoint_count(connection.handle) {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to query endpoint count: {}", e);
                0
            }
        };

        let mut located = LocatedEndpoints::default();
        for index in 1..=count {
            let endpoint = EndpointId::new(index);

            if sdk.is_raw_frame_endpoint(connection.handle, endpoint) {
                info!("Found radar base endpoint: {}", endpoint);
                located.raw = Some(endpoint);
            }
            if sdk.is_target_endpoint(connection.handle, endpoint) {
                info!("Found target detection endpoint: {}", endpoint);
                located.target = Some(endpoint);
            }
        }

        located
    }
}
