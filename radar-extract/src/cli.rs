use clap::Parser;
use radar_acquire::AcquisitionMode;

const USAGE_EXAMPLES: &str = "\
Examples:
  radar-extract -r    # Extract raw data only
  radar-extract -t    # Extract target data only
  radar-extract -b    # Extract both (default)

Target records are forwarded over UDP to 127.0.0.1:5000.
Set RUST_LOG to change log verbosity (e.g. RUST_LOG=radar_detect=debug).";

/// Connects to a radar sensor and streams raw frames and/or detected targets.
#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None, after_help = USAGE_EXAMPLES)]
pub struct Args {
    /// Extract raw ADC frames only
    #[arg(short, long, overrides_with_all = ["target_only", "both"])]
    pub raw_only: bool,

    /// Extract target detections only
    #[arg(short, long, overrides_with_all = ["raw_only", "both"])]
    pub target_only: bool,

    /// Extract both raw frames and targets (default)
    #[arg(short, long, overrides_with_all = ["raw_only", "target_only"])]
    pub both: bool,
}

impl Args {
    /// Acquisition mode selected by the last mode flag, `Both` when none
    pub fn mode(&self) -> AcquisitionMode {
        if self.raw_only {
            AcquisitionMode::RawOnly
        } else if self.target_only {
            AcquisitionMode::TargetOnly
        } else {
            AcquisitionMode::Both
        }
    }
}
