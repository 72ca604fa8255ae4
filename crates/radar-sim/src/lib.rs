//! Radar Sensor Simulation Library
//!
//! This crate provides a simulated radar sensor that implements the
//! [`radar_sdk::RadarSdk`] contract, so acquisition code can be exercised
//! without hardware. The simulated sensor:
//!
//! - answers on a virtual port (`VSIM:<name>`), optionally listed after a
//!   number of silent ports
//! - declares a configurable set of endpoints (radar base, target detection)
//! - delivers synthetic ADC frames and target lists from fetch calls
//! - records every connect, probe and trigger call for inspection
//!
//! # Example
//!
//! ```rust
//! use radar_sdk::RadarSdk;
//! use radar_sim::{SimConfig, SimulatedRadar};
//!
//! let mut radar = SimulatedRadar::new(SimConfig::default());
//! let ports = radar.list_ports().unwrap();
//! let handle = radar.connect(&ports[0]).unwrap();
//! assert_eq!(radar.endpoint_count(handle).unwrap(), 2);
//! ```

pub mod radar;

pub use radar::{
    is_virtual_port, virtual_port_name, SimConfig, SimEndpoint, SimPort, SimulatedRadar,
    VIRTUAL_PORT_PREFIX,
};
