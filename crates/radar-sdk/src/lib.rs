//! Radar Sensor SDK Contract
//!
//! This crate describes the device SDK a radar acquisition client talks to:
//! serial port discovery, session handles, endpoint capability probing,
//! automatic trigger configuration and synchronous data fetches.
//!
//! # Architecture
//!
//! A device session is identified by a [`ProtocolHandle`]. Each session
//! exposes a number of endpoints, addressed by 1-based [`EndpointId`]s. An
//! endpoint may deliver raw ADC frames ([`FrameInfo`]) or processed target
//! lists ([`TargetInfo`]).
//!
//! Data is delivered through callbacks. A client installs a
//! [`FrameHandler`] and/or a [`TargetHandler`]; the SDK invokes them
//! synchronously from inside [`RadarSdk::fetch_frame`] and
//! [`RadarSdk::fetch_targets`], on the caller's thread, before the fetch
//! returns.
//!
//! # Example
//!
//! ```rust,no_run
//! use radar_sdk::RadarSdk;
//!
//! fn first_port<S: RadarSdk>(sdk: &mut S) -> Option<String> {
//!     sdk.list_ports().ok()?.into_iter().next()
//! }
//! ```

pub mod device;
pub mod error;
pub mod handler;
pub mod ports;
pub mod types;

pub use device::RadarSdk;
pub use error::SdkError;
pub use handler::{FrameHandler, TargetHandler};
pub use ports::{host_port_names, ScanFilter};
pub use types::{EndpointId, FrameInfo, ProtocolHandle, TargetInfo};
