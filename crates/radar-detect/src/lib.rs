//! Radar Sensor Detection Library
//!
//! This crate finds a radar sensor among the candidate serial ports and
//! classifies the endpoints it exposes.
//!
//! # Example
//!
//! ```rust
//! use radar_detect::{EndpointLocator, PortScanner};
//! use radar_sim::{SimConfig, SimulatedRadar};
//!
//! let mut radar = SimulatedRadar::new(SimConfig::default());
//!
//! let connection = PortScanner::new().connect(&mut radar).unwrap();
//! let endpoints = EndpointLocator::new().locate(&mut radar, &connection);
//!
//! println!("raw frames on {:?}, targets on {:?}", endpoints.raw, endpoints.target);
//! ```

pub mod error;
pub mod locator;
pub mod scanner;

pub use error::DetectError;
pub use locator::{Capability, EndpointLocator, LocatedEndpoints};
pub use scanner::{Connection, PortScanner, ScannerConfig};
