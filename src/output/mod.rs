//! Output module.
//!
//! `report` emits the plain open-port list to stdout and the results file;
//! `terminal` writes everything meant for a human reader to stderr.

mod report;
mod terminal;

pub use self::report::{print_open_ports, save_open_ports, write_open_ports};
pub use self::terminal::{print_error, print_scan_header, print_summary, write_summary};
