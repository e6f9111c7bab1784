//! Core type definitions using newtype patterns for type safety.
//!
//! Invalid ports and reversed ranges cannot be constructed, so every
//! downstream component can rely on them.

mod port;
mod target;

pub use port::{Port, PortError, PortRange};
pub use target::{ScanTarget, TargetError};
