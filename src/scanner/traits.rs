//! Prober trait abstraction.
//!
//! Defines the interface between the scan engine and the code that
//! actually touches the network, so the engine can be driven by a fake
//! prober in tests.

use crate::error::ScanResult;
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// State of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    /// A connection was accepted within the timeout.
    Open,
    /// Refused, timed out, or unreachable. These are not told apart.
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortResult {
    /// The port number that was probed.
    pub port: Port,
    /// State determined by the probe.
    pub state: PortState,
}

impl PortResult {
    pub fn new(port: Port, state: PortState) -> Self {
        Self { port, state }
    }

    pub fn open(port: Port) -> Self {
        Self::new(port, PortState::Open)
    }

    pub fn closed(port: Port) -> Self {
        Self::new(port, PortState::Closed)
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// Something that can decide whether a port on one host accepts connections.
///
/// Implementations must fold ordinary connection failures into
/// [`PortState::Closed`] and return `Err` only for conditions that make
/// continuing the scan pointless, such as file-descriptor exhaustion.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single port.
    async fn probe(&self, port: Port) -> ScanResult<PortResult>;

    /// Get the target IP address.
    fn target(&self) -> IpAddr;

    /// Get the configured per-port timeout.
    fn timeout(&self) -> Duration;
}
