//! Simulated radar sensor
//!
//! Generates deterministic ADC frames and target lists so tests can assert
//! on exact output.

use std::collections::HashSet;
use std::time::Duration;

use radar_sdk::device::interval_micros;
use radar_sdk::{
    EndpointId, FrameHandler, FrameInfo, ProtocolHandle, RadarSdk, SdkError, TargetHandler,
    TargetInfo,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Prefix that marks a port name as virtual
pub const VIRTUAL_PORT_PREFIX: &str = "VSIM:";

/// Port name for a simulated sensor called `name`
pub fn virtual_port_name(name: &str) -> String {
    format!("{}{}", VIRTUAL_PORT_PREFIX, name)
}

/// Check if a port name refers to a simulated sensor
pub fn is_virtual_port(port: &str) -> bool {
    port.starts_with(VIRTUAL_PORT_PREFIX)
}

/// Capability of a simulated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEndpoint {
    /// Delivers raw ADC frames
    RadarBase,
    /// Delivers target lists
    TargetDetection,
    /// Neither (e.g. a firmware or calibration endpoint)
    Other,
}

/// A port offered by the simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimPort {
    /// Port name as returned by `list_ports`
    pub name: String,
    /// Whether a sensor answers on this port
    pub has_sensor: bool,
}

impl SimPort {
    /// A port with a sensor behind it
    pub fn sensor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_sensor: true,
        }
    }

    /// A port nothing answers on
    pub fn silent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_sensor: false,
        }
    }
}

/// Configuration for a simulated sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Ports in listing order
    pub ports: Vec<SimPort>,
    /// Endpoint capabilities, index 1 first
    pub endpoints: Vec<SimEndpoint>,
    /// Declared samples per chirp in each frame
    pub samples_per_chirp: u32,
    /// Frames delivered per `fetch_frame` call
    pub frames_per_fetch: u32,
    /// Targets delivered per `fetch_targets` call
    pub targets_per_fetch: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ports: vec![SimPort::sensor(virtual_port_name("radar"))],
            endpoints: vec![SimEndpoint::RadarBase, SimEndpoint::TargetDetection],
            samples_per_chirp: 128,
            frames_per_fetch: 1,
            targets_per_fetch: 2,
        }
    }
}

impl SimConfig {
    /// List `names` as silent ports ahead of the configured ones
    pub fn with_host_ports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ports: Vec<SimPort> = names.into_iter().map(SimPort::silent).collect();
        ports.append(&mut self.ports);
        self.ports = ports;
        self
    }
}

/// A simulated radar sensor
pub struct SimulatedRadar {
    config: SimConfig,
    sessions: HashSet<ProtocolHandle>,
    next_handle: u32,
    frame_handler: Option<Box<dyn FrameHandler>>,
    target_handler: Option<Box<dyn TargetHandler>>,
    frame_number: u32,
    target_frame: u32,
    fetch_failure: Option<i32>,
    connect_attempts: Vec<String>,
    raw_probes: Vec<EndpointId>,
    target_probes: Vec<EndpointId>,
    triggers: Vec<(EndpointId, u32)>,
}

impl SimulatedRadar {
    /// Create a simulated sensor from configuration
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            sessions: HashSet::new(),
            next_handle: 0,
            frame_handler: None,
            target_handler: None,
            frame_number: 0,
            target_frame: 0,
            fetch_failure: None,
            connect_attempts: Vec::new(),
            raw_probes: Vec::new(),
            target_probes: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Get the sensor configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Make every following fetch fail with `status`, or succeed again with `None`
    pub fn set_fetch_failure(&mut self, status: Option<i32>) {
        self.fetch_failure = status;
    }

    /// Ports `connect` was called with, in call order
    pub fn connect_attempts(&self) -> &[String] {
        &self.connect_attempts
    }

    /// Endpoints probed for raw frame capability, in call order
    pub fn raw_probes(&self) -> &[EndpointId] {
        &self.raw_probes
    }

    /// Endpoints probed for target capability, in call order
    pub fn target_probes(&self) -> &[EndpointId] {
        &self.target_probes
    }

    /// Trigger intervals set so far, in microseconds
    pub fn triggers(&self) -> &[(EndpointId, u32)] {
        &self.triggers
    }

    /// Whether a session is open on `handle`
    pub fn is_connected(&self, handle: ProtocolHandle) -> bool {
        self.sessions.contains(&handle)
    }

    fn endpoint_kind(&self, endpoint: EndpointId) -> Option<SimEndpoint> {
        let index = usize::from(endpoint.index()).checked_sub(1)?;
        self.config.endpoints.get(index).copied()
    }

    fn check_session(&self, handle: ProtocolHandle) -> Result<(), SdkError> {
        if self.sessions.contains(&handle) {
            Ok(())
        } else {
            Err(SdkError::InvalidHandle(handle))
        }
    }

    fn check_endpoint(&self, endpoint: EndpointId, kind: SimEndpoint) -> Result<(), SdkError> {
        match self.endpoint_kind(endpoint) {
            Some(k) if k == kind => Ok(()),
            _ => Err(SdkError::IncompatibleEndpoint(endpoint)),
        }
    }

    fn check_fetch(&self) -> Result<(), SdkError> {
        match self.fetch_failure {
            Some(status) => Err(SdkError::Status(status)),
            None => Ok(()),
        }
    }

    fn next_frame(&mut self) -> FrameInfo {
        let frame_number = self.frame_number;
        self.frame_number = self.frame_number.wrapping_add(1);

        let phase = frame_number as f32 * 0.1;
        let sample_data = (0..self.config.samples_per_chirp)
            .map(|i| (i as f32 * 0.25 + phase).sin() * 0.5 + 0.5)
            .collect();

        FrameInfo {
            frame_number,
            num_chirps: 1,
            num_rx_antennas: 1,
            num_samples_per_chirp: self.config.samples_per_chirp,
            sample_data,
        }
    }

    fn next_targets(&mut self) -> Vec<TargetInfo> {
        let t = self.target_frame as f32;
        self.target_frame = self.target_frame.wrapping_add(1);

        (0..self.config.targets_per_fetch)
            .map(|i| {
                let i = f32::from(i);
                TargetInfo {
                    target_id: self.target_frame.wrapping_mul(16).wrapping_add(i as u32),
                    level: 60.0 - i * 4.0,
                    radius: 1.5 + i * 0.75 + t * 0.01,
                    azimuth: -20.0 + i * 10.0,
                    elevation: 2.0,
                    radial_speed: 0.4,
                    azimuth_speed: 0.1,
                    elevation_speed: 0.0,
                }
            })
            .collect()
    }
}

impl RadarSdk for SimulatedRadar {
    fn list_ports(&mut self) -> Result<Vec<String>, SdkError> {
        Ok(self.config.ports.iter().map(|p| p.name.clone()).collect())
    }

    fn connect(&mut self, port: &str) -> Result<ProtocolHandle, SdkError> {
        self.connect_attempts.push(port.to_string());

        let has_sensor = self
            .config
            .ports
            .iter()
            .any(|p| p.name == port && p.has_sensor);
        if !has_sensor {
            debug!("Simulated connect to {} refused", port);
            return Err(SdkError::NoResponse {
                port: port.to_string(),
            });
        }

        let handle = ProtocolHandle::new(self.next_handle);
        self.next_handle += 1;
        self.sessions.insert(handle);
        info!("Simulated radar session {} opened on {}", handle, port);
        Ok(handle)
    }

    fn disconnect(&mut self, handle: ProtocolHandle) {
        if self.sessions.remove(&handle) {
            info!("Simulated radar session {} closed", handle);
        }
    }

    fn endpoint_count(&mut self, handle: ProtocolHandle) -> Result<u8, SdkError> {
        self.check_session(handle)?;
        Ok(u8::try_from(self.config.endpoints.len()).unwrap_or(u8::MAX))
    }

    fn is_raw_frame_endpoint(&mut self, handle: ProtocolHandle, endpoint: EndpointId) -> bool {
        self.raw_probes.push(endpoint);
        self.sessions.contains(&handle)
            && self.endpoint_kind(endpoint) == Some(SimEndpoint::RadarBase)
    }

    fn is_target_endpoint(&mut self, handle: ProtocolHandle, endpoint: EndpointId) -> bool {
        self.target_probes.push(endpoint);
        self.sessions.contains(&handle)
            && self.endpoint_kind(endpoint) == Some(SimEndpoint::TargetDetection)
    }

    fn set_frame_handler(&mut self, handler: Box<dyn FrameHandler>) {
        self.frame_handler = Some(handler);
    }

    fn set_target_handler(&mut self, handler: Box<dyn TargetHandler>) {
        self.target_handler = Some(handler);
    }

    fn set_automatic_frame_trigger(
        &mut self,
        handle: ProtocolHandle,
        endpoint: EndpointId,
        interval: Duration,
    ) -> Result<(), SdkError> {
        self.check_session(handle)?;
        match self.endpoint_kind(endpoint) {
            Some(SimEndpoint::RadarBase) | Some(SimEndpoint::TargetDetection) => {
                let micros = interval_micros(interval);
                debug!("Endpoint {} trigger set to {} us", endpoint, micros);
                self.triggers.push((endpoint, micros));
                Ok(())
            }
            _ => Err(SdkError::IncompatibleEndpoint(endpoint)),
        }
    }

    fn fetch_frame(
        &mut self,
        handle: ProtocolHandle,
        endpoint: EndpointId,
    ) -> Result<(), SdkError> {
        self.check_session(handle)?;
        self.check_endpoint(endpoint, SimEndpoint::RadarBase)?;
        self.check_fetch()?;

        for _ in 0..self.config.frames_per_fetch {
            let frame = self.next_frame();
            trace!("Delivering frame {} on endpoint {}", frame.frame_number, endpoint);
            if let Some(handler) = self.frame_handler.as_mut() {
                handler.on_frame(endpoint, &frame);
            }
        }
        Ok(())
    }

    fn fetch_targets(
        &mut self,
        handle: ProtocolHandle,
        endpoint: EndpointId,
    ) -> Result<(), SdkError> {
        self.check_session(handle)?;
        self.check_endpoint(endpoint, SimEndpoint::TargetDetection)?;
        self.check_fetch()?;

        let targets = self.next_targets();
        trace!("Delivering {} target(s) on endpoint {}", targets.len(), endpoint);
        if let Some(handler) = self.target_handler.as_mut() {
            handler.on_targets(endpoint, &targets);
        }
        Ok(())
    }
}
