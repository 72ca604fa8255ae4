//! Acquisition setup
//!
//! Installs the data handlers and arms the automatic trigger for every data
//! kind the mode asks for and the device has an endpoint for.

use std::time::Duration;

use radar_detect::{Connection, LocatedEndpoints};
use radar_sdk::{EndpointId, RadarSdk};
use tracing::{info, warn};

use crate::config::AcquisitionConfig;
use crate::error::AcquireError;
use crate::frame::FrameReporter;
use crate::mode::{AcquisitionMode, DataKind};
use crate::target::TargetForwarder;

/// Handlers to install, one per data kind
#[derive(Default)]
pub struct Handlers {
    /// Raw frame handler
    pub frames: Option<FrameReporter>,
    /// Target list handler
    pub targets: Option<TargetForwarder>,
}

/// Endpoints the run loop polls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveChannels {
    /// Raw frame endpoint, if raw acquisition is active
    pub raw: Option<EndpointId>,
    /// Target endpoint, if target acquisition is active
    pub target: Option<EndpointId>,
}

impl ActiveChannels {
    /// Endpoint polled for `kind`
    pub fn endpoint(&self, kind: DataKind) -> Option<EndpointId> {
        match kind {
            DataKind::RawFrames => self.raw,
            DataKind::Targets => self.target,
        }
    }

    /// Whether nothing will be polled
    pub fn is_idle(&self) -> bool {
        self.raw.is_none() && self.target.is_none()
    }
}

/// Sets up triggers and handlers on a connected device
pub struct AcquisitionConfigurator {
    raw_trigger_interval: Duration,
    target_trigger_interval: Duration,
}

impl AcquisitionConfigurator {
    /// Create a configurator using the trigger intervals from `config`
    pub fn new(config: &AcquisitionConfig) -> Self {
        Self {
            raw_trigger_interval: config.raw_trigger_interval,
            target_trigger_interval: config.target_trigger_interval,
        }
    }

    /// Configure every data kind in `mode`
    ///
    /// Kinds without a located endpoint (or without a handler) are skipped
    /// for the rest of the run. A failed trigger call leaves the kind
    /// active.
    pub fn configure<S: RadarSdk + ?Sized>(
        &self,
        sdk: &mut S,
        connection: &Connection,
        endpoints: &LocatedEndpoints,
        mode: AcquisitionMode,
        handlers: Handlers,
    ) -> ActiveChannels {
        let mut channels = ActiveChannels::default();

        if mode.includes(DataKind::RawFrames) {
            match (endpoints.raw, handlers.frames) {
                (Some(endpoint), Some(reporter)) => {
                    info!("Setting up raw data extraction...");
                    sdk.set_frame_handler(Box::new(reporter));
                    self.arm(sdk, connection, endpoint, self.raw_trigger_interval, "Raw");
                    channels.raw = Some(endpoint);
                }
                (None, _) => warn!("{}", AcquireError::EndpointNotLocated(DataKind::RawFrames)),
                (Some(_), None) => warn!("No raw frame handler supplied, skipping raw data"),
            }
        }

        if mode.includes(DataKind::Targets) {
            match (endpoints.target, handlers.targets) {
                (Some(endpoint), Some(forwarder)) => {
                    info!("Setting up target data extraction...");
                    sdk.set_target_handler(Box::new(forwarder));
                    self.arm(sdk, connection, endpoint, self.target_trigger_interval, "Target");
                    channels.target = Some(endpoint);
                }
                (None, _) => warn!("{}", AcquireError::EndpointNotLocated(DataKind::Targets)),
                (Some(_), None) => warn!("No target handler supplied, skipping target data"),
            }
        }

        channels
    }

    fn arm<S: RadarSdk + ?Sized>(
        &self,
        sdk: &mut S,
        connection: &Connection,
        endpoint: EndpointId,
        interval: Duration,
        label: &str,
    ) {
        match sdk.set_automatic_frame_trigger(connection.handle, endpoint, interval) {
            Ok(()) => info!(
                "{} data automatic trigger set to {} us",
                label,
                interval.as_micros()
            ),
            Err(e) => warn!(
                "Failed to set {} trigger on endpoint {}: {}",
                label.to_lowercase(),
                endpoint,
                e
            ),
        }
    }
}
