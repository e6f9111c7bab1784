//! Validated scan configuration.
//!
//! A `ScanConfig` is built once from command-line input and is immutable
//! afterwards. Construction is where every input check happens, so an
//! invalid range or timeout is rejected before a single socket is opened.

use crate::error::{ConfigError, ConfigResult};
use crate::services::COMMON_PORTS;
use crate::types::{Port, PortRange};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// First port scanned when `--start-port` is absent.
pub const DEFAULT_START_PORT: u16 = 1;
/// Last port scanned when `--end-port` is absent.
pub const DEFAULT_END_PORT: u16 = 65535;
/// Per-port connect timeout when `--timeout` is absent.
pub const DEFAULT_TIMEOUT_SECS: f64 = 1.0;
/// Probes in flight at once when neither the flag nor the settings file say otherwise.
pub const DEFAULT_CONCURRENCY: usize = 100;
/// Host scanned when no target is given.
pub const DEFAULT_TARGET: &str = "127.0.0.1";

/// Which ports a scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
    /// Every port in an inclusive range.
    Range(PortRange),
    /// Only the well-known common ports.
    Common,
}

impl PortSelection {
    /// All selected ports, ascending and without duplicates.
    pub fn ports(&self) -> Vec<Port> {
        match self {
            Self::Range(range) => range.iter().collect(),
            Self::Common => COMMON_PORTS.iter().filter_map(|&p| Port::new(p)).collect(),
        }
    }

    /// Lowest and highest selected port.
    pub fn bounds(&self) -> (Port, Port) {
        match self {
            Self::Range(range) => (range.start(), range.end()),
            Self::Common => {
                let ports = self.ports();
                // COMMON_PORTS is a non-empty constant of valid ports
                (ports[0], ports[ports.len() - 1])
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Range(range) => range.len(),
            Self::Common => COMMON_PORTS.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for PortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(range) => write!(f, "{}", range),
            Self::Common => write!(f, "common ports"),
        }
    }
}

/// Validate a timeout given in seconds.
pub fn parse_timeout(secs: f64) -> ConfigResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidTimeout(secs));
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(ConfigError::InvalidTimeout(secs)),
    }
}

/// Configuration for a single scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    target: String,
    ports: PortSelection,
    timeout: Duration,
    output: Option<PathBuf>,
    concurrency: NonZeroUsize,
}

impl ScanConfig {
    /// Create a configuration for an inclusive port range.
    pub fn new(start_port: u16, end_port: u16, timeout_secs: f64) -> ConfigResult<Self> {
        let range = PortRange::from_bounds(start_port, end_port)?;
        Self::with_selection(PortSelection::Range(range), timeout_secs)
    }

    /// Create a configuration covering only the common ports.
    pub fn common(timeout_secs: f64) -> ConfigResult<Self> {
        Self::with_selection(PortSelection::Common, timeout_secs)
    }

    fn with_selection(ports: PortSelection, timeout_secs: f64) -> ConfigResult<Self> {
        Ok(Self {
            target: DEFAULT_TARGET.to_string(),
            ports,
            timeout: parse_timeout(timeout_secs)?,
            output: None,
            concurrency: NonZeroUsize::new(DEFAULT_CONCURRENCY)
                .ok_or(ConfigError::InvalidConcurrency)?,
        })
    }

    /// Set the target host.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Also write the open-port list to this file.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the worker-pool size. Zero is rejected.
    pub fn with_concurrency(mut self, concurrency: usize) -> ConfigResult<Self> {
        self.concurrency = NonZeroUsize::new(concurrency).ok_or(ConfigError::InvalidConcurrency)?;
        Ok(self)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn ports(&self) -> &PortSelection {
        &self.ports
    }

    pub fn start_port(&self) -> Port {
        self.ports.bounds().0
    }

    pub fn end_port(&self) -> Port {
        self.ports.bounds().1
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.get()
    }
}
