//! Acquisition mode
//!
//! The mode is a set over the two data kinds. `Both` is the union of
//! `RawOnly` and `TargetOnly`.

use std::fmt;

/// A kind of data the radar delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Raw ADC frames
    RawFrames,
    /// Target detection lists
    Targets,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::RawFrames => write!(f, "raw frame"),
            DataKind::Targets => write!(f, "target"),
        }
    }
}

/// Which data kinds are acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    /// Raw ADC frames only
    RawOnly,
    /// Target lists only
    TargetOnly,
    /// Raw frames and target lists
    #[default]
    Both,
}

impl AcquisitionMode {
    /// Build a mode from the kinds it contains, `None` for the empty set
    pub fn from_kinds(raw: bool, targets: bool) -> Option<Self> {
        match (raw, targets) {
            (true, true) => Some(AcquisitionMode::Both),
            (true, false) => Some(AcquisitionMode::RawOnly),
            (false, true) => Some(AcquisitionMode::TargetOnly),
            (false, false) => None,
        }
    }

    /// Check whether the mode contains `kind`
    pub fn includes(self, kind: DataKind) -> bool {
        match (self, kind) {
            (AcquisitionMode::Both, _) => true,
            (AcquisitionMode::RawOnly, DataKind::RawFrames) => true,
            (AcquisitionMode::TargetOnly, DataKind::Targets) => true,
            _ => false,
        }
    }

    /// Set union of two modes
    pub fn union(self, other: Self) -> Self {
        let raw = self.includes(DataKind::RawFrames) || other.includes(DataKind::RawFrames);
        let targets = self.includes(DataKind::Targets) || other.includes(DataKind::Targets);
        // Both operands are non-empty, so the union is too
        Self::from_kinds(raw, targets).unwrap_or(self)
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionMode::RawOnly => write!(f, "Raw data only"),
            AcquisitionMode::TargetOnly => write!(f, "Target data only"),
            AcquisitionMode::Both => write!(f, "Both raw and target data"),
        }
    }
}
