//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port connection
//! failures are not errors here: the prober folds them into a closed state.

use crate::types::{PortError, TargetError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid user input, detected before any probing starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("failed to read settings from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },
}

/// Unexpected failures while probing. These abort the scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("system resources exhausted while probing port {port}: {source}")]
    ResourceExhausted {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failures while emitting results.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] io::Error),

    #[error("failed to write results to {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Top-level error for the command-line pipeline.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl CliError {
    /// Process exit status for this error. Usage errors share clap's code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Scan(_) | Self::Report(_) => 1,
        }
    }
}

impl From<PortError> for CliError {
    fn from(e: PortError) -> Self {
        Self::Config(e.into())
    }
}

impl From<TargetError> for CliError {
    fn from(e: TargetError) -> Self {
        Self::Config(e.into())
    }
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for reporting.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config: CliError = ConfigError::InvalidTimeout(0.0).into();
        assert_eq!(config.exit_code(), 2);

        let scan: CliError = ScanError::Io(io::Error::other("boom")).into();
        assert_eq!(scan.exit_code(), 1);

        let report: CliError = ReportError::File {
            path: PathBuf::from("/nope/out.txt"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
        .into();
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_port_error_is_config_error() {
        let err: CliError = PortError::InvalidRange(30, 20).into();
        assert!(matches!(err, CliError::Config(ConfigError::Port(_))));
        assert_eq!(
            err.to_string(),
            "invalid port range: start port (30) is greater than end port (20)"
        );
    }
}
