//! Configuration management for portsweep.
//!
//! `scan` holds the validated per-invocation configuration and the fixed
//! defaults; `settings` holds the optional user settings file.

mod scan;
mod settings;

pub use scan::{
    parse_timeout, PortSelection, ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_END_PORT,
    DEFAULT_START_PORT, DEFAULT_TARGET, DEFAULT_TIMEOUT_SECS,
};
pub use settings::{AppSettings, Paths};
