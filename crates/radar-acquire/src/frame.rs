//! Raw frame reporting

use std::fmt;
use std::io::Write;

use radar_sdk::{EndpointId, FrameHandler, FrameInfo};
use tracing::{trace, warn};

/// Bounded text summary of one raw frame
///
/// Shows the declared sample count, at most `max_samples` individual
/// samples and, if more were declared, how many were left out.
pub struct FrameSummary<'a> {
    frame: &'a FrameInfo,
    max_samples: usize,
}

impl<'a> FrameSummary<'a> {
    /// Summarize `frame`, printing at most `max_samples` samples
    pub fn new(frame: &'a FrameInfo, max_samples: usize) -> Self {
        Self { frame, max_samples }
    }

    /// Samples that will be printed individually
    pub fn shown(&self) -> &'a [f32] {
        let samples = self.frame.samples();
        &samples[..samples.len().min(self.max_samples)]
    }

    /// Declared samples that will not be printed
    pub fn remaining(&self) -> usize {
        (self.frame.num_samples_per_chirp as usize).saturating_sub(self.shown().len())
    }
}

impl fmt::Display for FrameSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RAW DATA FRAME ===")?;
        writeln!(f, "Samples per chirp: {}", self.frame.num_samples_per_chirp)?;
        for (i, sample) in self.shown().iter().enumerate() {
            writeln!(f, "ADC sample {}: {:.6}", i, sample)?;
        }
        if self.remaining() > 0 {
            writeln!(f, "... ({} more samples)", self.remaining())?;
        }
        writeln!(f, "=====================")
    }
}

/// Prints a summary of every raw frame it receives
pub struct FrameReporter {
    out: Box<dyn Write>,
    max_samples: usize,
}

impl FrameReporter {
    /// Create a reporter writing to `out`
    pub fn new(out: Box<dyn Write>, max_samples: usize) -> Self {
        Self { out, max_samples }
    }
}

impl FrameHandler for FrameReporter {
    fn on_frame(&mut self, endpoint: EndpointId, frame: &FrameInfo) {
        trace!(
            "Frame {} on endpoint {} ({} samples)",
            frame.frame_number,
            endpoint,
            frame.num_samples_per_chirp
        );

        let summary = FrameSummary::new(frame, self.max_samples);
        if let Err(e) = writeln!(self.out, "{}", summary) {
            warn!("Failed to write frame report: {}", e);
        }
    }
}
