//! Host serial port enumeration
//!
//! SDK backends use this to build their candidate port list from the ports
//! the operating system reports.

use serialport::{available_ports, SerialPortType};
use tracing::{debug, info};

use crate::error::SdkError;

/// Which host ports are worth offering as candidates
#[derive(Debug, Clone)]
pub struct ScanFilter {
    /// Skip ports whose name contains any of these patterns
    pub skip_patterns: Vec<String>,
    /// Only keep USB ports
    pub usb_only: bool,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            skip_patterns: vec![
                // Bluetooth ports on macOS
                "Bluetooth".to_string(),
                // Debug/logging ports
                "debug".to_string(),
            ],
            usb_only: false,
        }
    }
}

impl ScanFilter {
    /// Check if a port should be skipped
    fn should_skip(&self, name: &str, port_type: &SerialPortType) -> bool {
        if self.usb_only && !matches!(port_type, SerialPortType::UsbPort(_)) {
            return true;
        }
        self.skip_patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
    }
}

/// Enumerate host serial ports, in the order the OS reports them
pub fn host_port_names(filter: &ScanFilter) -> Result<Vec<String>, SdkError> {
    let ports = available_ports()?;

    let names: Vec<String> = ports
        .into_iter()
        .filter(|p| {
            let skip = filter.should_skip(&p.port_name, &p.port_type);
            if skip {
                debug!("Skipping port {}", p.port_name);
            }
            !skip
        })
        .map(|p| p.port_name)
        .collect();

    info!("Found {} host serial port(s)", names.len());
    Ok(names)
}
