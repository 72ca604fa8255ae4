//! Session handles, endpoint ids and the data records delivered by fetches

use std::fmt;

/// Handle to an open device session
///
/// Handles are only ever produced by a successful
/// [`RadarSdk::connect`](crate::RadarSdk::connect), so they are non-negative
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolHandle(u32);

impl ProtocolHandle {
    /// Wrap a raw session number
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw session number
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProtocolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an endpoint within a session (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndpointId(u8);

impl EndpointId {
    /// Wrap a raw endpoint index
    pub fn new(index: u8) -> Self {
        Self(index)
    }

    /// Raw endpoint index
    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw ADC frame as delivered by a radar base endpoint
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameInfo {
    /// Running frame number
    pub frame_number: u32,
    /// Chirps contained in this frame
    pub num_chirps: u32,
    /// Receive antennas sampled
    pub num_rx_antennas: u8,
    /// Declared number of samples per chirp
    pub num_samples_per_chirp: u32,
    /// Sample values, normalized to the ADC range
    ///
    /// May be shorter than `num_samples_per_chirp` if the device truncated
    /// the transfer; consumers must bound reads by both.
    pub sample_data: Vec<f32>,
}

impl FrameInfo {
    /// Samples that are both declared and present
    pub fn samples(&self) -> &[f32] {
        let declared = self.num_samples_per_chirp as usize;
        &self.sample_data[..declared.min(self.sample_data.len())]
    }
}

/// One detected target as delivered by a target detection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    /// Tracker-assigned target id
    pub target_id: u32,
    /// Signal level
    pub level: f32,
    /// Radial range in meters
    pub radius: f32,
    /// Azimuth angle in degrees
    pub azimuth: f32,
    /// Elevation angle in degrees
    pub elevation: f32,
    /// Radial speed in m/s
    pub radial_speed: f32,
    /// Azimuth speed in deg/s
    pub azimuth_speed: f32,
    /// Elevation speed in deg/s
    pub elevation_speed: f32,
}
