//! # portsweep - A TCP Connect Port Scanner
//!
//! portsweep probes one host across a range of TCP ports, classifies each
//! port as open or not within a bounded timeout, and reports the open ones.
//!
//! ## Features
//!
//! - **Connect scan**: full handshake through the OS socket API, no privileges needed
//! - **Bounded worker pool**: configurable number of probes in flight, output always ascending
//! - **Plain output**: one open port per line on stdout, optionally mirrored to a file
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanJob, TcpConnectProber};
//! use portsweep::types::PortRange;
//! use std::net::{IpAddr, Ipv4Addr};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let prober = TcpConnectProber::new(IpAddr::V4(Ipv4Addr::LOCALHOST), Duration::from_secs(1));
//!     let ports = PortRange::from_bounds(20, 25).unwrap().iter().collect();
//!
//!     let report = run_scan(&prober, ScanJob::new(ports)).await.unwrap();
//!     for port in report.open_ports() {
//!         println!("{}", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges and targets
//! - [`config`] - Scan configuration, defaults and the settings file
//! - [`scanner`] - The `Prober` trait, the TCP prober and the scan engine
//! - [`output`] - Port list and human-readable summaries
//! - [`error`] - Error types and exit codes

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{CliError, ConfigError, ReportError, ScanError};
pub use scanner::{PortResult, PortState, Prober, ScanReport};
pub use types::{Port, PortRange, ScanTarget};
