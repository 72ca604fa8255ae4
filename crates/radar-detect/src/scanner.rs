//! Serial port auto-connect
//!
//! Walks the candidate port list once, in order, and keeps the first port a
//! radar answers on. There is no retry and no re-scan.

use radar_sdk::{ProtocolHandle, RadarSdk};
use tracing::{debug, info};

use crate::error::DetectError;

/// An established radar session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// SDK session handle
    pub handle: ProtocolHandle,
    /// Port the session was opened on
    pub port: String,
}

/// Port scanner configuration
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Skip ports matching these patterns
    pub skip_patterns: Vec<String>,
}

/// Finds the first port a radar answers on
pub struct PortScanner {
    config: ScannerConfig,
}

impl PortScanner {
    /// Create a new scanner with default configuration
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Connect to the first candidate port that yields a session
    pub fn connect<S: RadarSdk + ?Sized>(&self, sdk: &mut S) -> Result<Connection, DetectError> {
        let ports: Vec<String> = sdk
            .list_ports()?
            .into_iter()
            .filter(|p| !self.should_skip_port(p))
            .collect();

        if ports.is_empty() {
            info!("No serial ports found");
            return Err(DetectError::NoPortsFound);
        }

        let mut tried = Vec::with_capacity(ports.len());
        for port in ports {
            info!("Trying to connect to: {}", port);
            match sdk.connect(&port) {
                Ok(handle) => {
                    info!("Successfully connected to radar on port: {}", port);
                    return Ok(Connection { handle, port });
                }
                Err(e) => {
                    debug!("Connect on {} failed: {}", port, e);
                    tried.push(port);
                }
            }
        }

        Err(DetectError::NoDeviceResponded { tried })
    }

    /// Check if a port should be skipped
    fn should_skip_port(&self, port: &str) -> bool {
        self.config
            .skip_patterns
            .iter()
            .any(|pattern| port.contains(pattern.as_str()))
    }
}

impl Default for PortScanner {
    fn default() -> Self {
        Self::new()
    }
}
