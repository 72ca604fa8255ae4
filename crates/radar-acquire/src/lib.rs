//! Radar Acquisition Engine
//!
//! This crate turns a connected radar into a stream of console reports and
//! UDP telemetry.
//!
//! # Architecture
//!
//! After a [`radar_detect::PortScanner`] has opened a session and a
//! [`radar_detect::EndpointLocator`] has found the endpoints, a [`RunLoop`]
//! takes ownership of the SDK and the connection:
//!
//! 1. [`RunLoop::configure`] installs a [`FrameReporter`] and/or a
//!    [`TargetForwarder`] as SDK callbacks and arms the automatic triggers
//!    (1 s for raw frames, 100 s for targets).
//! 2. [`RunLoop::run`] fetches from every active endpoint, waits 10 ms and
//!    repeats until its shutdown signal fires. Callbacks run synchronously
//!    inside the fetch calls, on the loop's thread.
//!
//! The [`TargetForwarder`] prints every target list and forwards every 20th
//! over a [`TelemetryChannel`].
//!
//! # Example
//!
//! ```rust,no_run
//! use radar_acquire::{AcquisitionConfig, AcquisitionMode, FrameReporter, Handlers, RunLoop};
//! use radar_detect::{EndpointLocator, PortScanner};
//! use radar_sim::{SimConfig, SimulatedRadar};
//!
//! # async fn demo() {
//! let mut radar = SimulatedRadar::new(SimConfig::default());
//! let connection = PortScanner::new().connect(&mut radar).unwrap();
//! let endpoints = EndpointLocator::new().locate(&mut radar, &connection);
//!
//! let config = AcquisitionConfig::default();
//! let handlers = Handlers {
//!     frames: Some(FrameReporter::new(Box::new(std::io::stdout()), config.max_reported_samples)),
//!     targets: None,
//! };
//!
//! let mut run = RunLoop::new(radar, connection, config);
//! run.configure(&endpoints, AcquisitionMode::RawOnly, handlers);
//!
//! let (_stop, shutdown) = tokio::sync::oneshot::channel();
//! run.run(shutdown).await;
//! # }
//! ```

pub mod config;
pub mod configurator;
pub mod error;
pub mod frame;
pub mod mode;
pub mod record;
pub mod run_loop;
pub mod target;
pub mod telemetry;

pub use config::AcquisitionConfig;
pub use configurator::{AcquisitionConfigurator, ActiveChannels, Handlers};
pub use error::AcquireError;
pub use frame::{FrameReporter, FrameSummary};
pub use mode::{AcquisitionMode, DataKind};
pub use record::BoundedRecord;
pub use run_loop::{FetchStats, RunLoop, RunState, RunSummary};
pub use target::{format_targets, TargetForwarder, TargetList, TelemetryCounter};
pub use telemetry::TelemetryChannel;
