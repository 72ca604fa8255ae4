//! Steady-state polling loop
//!
//! Each iteration fetches from every active endpoint, which dispatches to
//! the installed handlers on this thread, then waits the poll interval.
//! Fetch errors are counted and logged but never retried or escalated.

use radar_detect::{Connection, LocatedEndpoints};
use radar_sdk::{RadarSdk, SdkError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::AcquisitionConfig;
use crate::configurator::{AcquisitionConfigurator, ActiveChannels, Handlers};
use crate::error::AcquireError;
use crate::mode::{AcquisitionMode, DataKind};
use crate::target::TelemetryCounter;

/// Lifecycle of a run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Connected, nothing configured yet
    Idle,
    /// Handlers and triggers installed
    Configured,
    /// At least one iteration has run
    Polling,
    /// Stopped and disconnected
    Terminated,
}

/// Fetch outcomes for one endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Fetches that succeeded
    pub ok: u64,
    /// Fetches that returned an error
    pub failed: u64,
    /// Failures since the last success
    pub consecutive_failures: u64,
}

impl FetchStats {
    fn record_ok(&mut self) {
        self.ok += 1;
        self.consecutive_failures = 0;
    }

    fn record_failure(&mut self) {
        self.failed += 1;
        self.consecutive_failures += 1;
    }
}

/// What a run did, returned when it stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Iterations completed
    pub iterations: u64,
    /// Raw frame fetch outcomes
    pub frames: FetchStats,
    /// Target fetch outcomes
    pub targets: FetchStats,
    /// Target lists received, if target acquisition was configured
    pub telemetry_count: Option<u64>,
}

/// Owns the device session and drives all acquisition I/O
pub struct RunLoop<S: RadarSdk> {
    sdk: S,
    connection: Connection,
    config: AcquisitionConfig,
    channels: ActiveChannels,
    telemetry: Option<TelemetryCounter>,
    state: RunState,
    iterations: u64,
    frame_stats: FetchStats,
    target_stats: FetchStats,
}

impl<S: RadarSdk> RunLoop<S> {
    /// Create an idle loop over an established connection
    pub fn new(sdk: S, connection: Connection, config: AcquisitionConfig) -> Self {
        Self {
            sdk,
            connection,
            config,
            channels: ActiveChannels::default(),
            telemetry: None,
            state: RunState::Idle,
            iterations: 0,
            frame_stats: FetchStats::default(),
            target_stats: FetchStats::default(),
        }
    }

    /// Install handlers and triggers for `mode`
    pub fn configure(
        &mut self,
        endpoints: &LocatedEndpoints,
        mode: AcquisitionMode,
        handlers: Handlers,
    ) -> ActiveChannels {
        if let Some(forwarder) = &handlers.targets {
            self.telemetry = Some(forwarder.counter());
        }

        let configurator = AcquisitionConfigurator::new(&self.config);
        self.channels =
            configurator.configure(&mut self.sdk, &self.connection, endpoints, mode, handlers);
        if self.channels.target.is_none() {
            self.telemetry = None;
        }

        if self.channels.is_idle() {
            warn!("No endpoint configured for {}; the loop will only idle", mode);
        }
        self.state = RunState::Configured;
        self.channels
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Endpoints being polled
    pub fn channels(&self) -> ActiveChannels {
        self.channels
    }

    /// The connection this loop owns
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The SDK this loop drives
    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    /// Mutable access to the SDK
    pub fn sdk_mut(&mut self) -> &mut S {
        &mut self.sdk
    }

    /// Iterations completed so far
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Fetch outcomes for `kind`
    pub fn stats(&self, kind: DataKind) -> FetchStats {
        match kind {
            DataKind::RawFrames => self.frame_stats,
            DataKind::Targets => self.target_stats,
        }
    }

    /// Run one iteration without waiting
    ///
    /// Does nothing once the loop has stopped.
    pub fn poll_once(&mut self) {
        if self.state == RunState::Terminated {
            return;
        }
        self.state = RunState::Polling;
        let handle = self.connection.handle;

        if let Some(endpoint) = self.channels.raw {
            let result = self.sdk.fetch_frame(handle, endpoint);
            self.record(DataKind::RawFrames, result);
        }

        if let Some(endpoint) = self.channels.target {
            let result = self.sdk.fetch_targets(handle, endpoint);
            self.record(DataKind::Targets, result);
        }

        self.iterations += 1;
    }

    /// Poll until `shutdown` fires (or its sender is dropped)
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> RunSummary {
        info!("Starting data extraction loop...");

        loop {
            self.poll_once();

            tokio::select! {
                _ = &mut shutdown => {
                    break;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        self.stop()
    }

    /// Disconnect and summarize
    pub fn stop(&mut self) -> RunSummary {
        self.sdk.disconnect(self.connection.handle);
        self.state = RunState::Terminated;

        let summary = RunSummary {
            iterations: self.iterations,
            frames: self.frame_stats,
            targets: self.target_stats,
            telemetry_count: self.telemetry.as_ref().map(TelemetryCounter::get),
        };
        info!(
            "Data extraction stopped after {} iteration(s) on {}",
            summary.iterations, self.connection.port
        );
        summary
    }

    fn record(&mut self, kind: DataKind, result: Result<(), SdkError>) {
        let warn_every = self.config.failure_warn_every;
        let stats = match kind {
            DataKind::RawFrames => &mut self.frame_stats,
            DataKind::Targets => &mut self.target_stats,
        };

        match result {
            Ok(()) => stats.record_ok(),
            Err(source) => {
                stats.record_failure();
                let consecutive = stats.consecutive_failures;
                let err = AcquireError::FetchFailed { kind, source };
                debug!("{}", err);
                if warn_every != 0 && consecutive % warn_every == 0 {
                    warn!("{} consecutive failures, last: {}", consecutive, err);
                }
            }
        }
    }
}
