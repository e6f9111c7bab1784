//! Command-line interface for portsweep.
//!
//! A single command: probe one host across a port range and list the open
//! ports. Global flags (verbosity, settings file) sit on [`Cli`]; the scan
//! flags live on [`ScanCommand`].

mod scan;

pub use scan::ScanCommand;

use crate::config::AppSettings;
use crate::error::CliResult;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// portsweep - a TCP connect port scanner.
///
/// Open ports are printed to standard output one per line, in ascending
/// order. Nothing is printed when no port is open.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a host for open TCP ports", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Increase diagnostic output (-v summary and progress, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a settings file (default: XDG config dir/portsweep/settings.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings and run the scan.
    pub async fn execute(&self) -> CliResult<()> {
        let settings = AppSettings::load(self.config.as_deref())?;
        self.scan.execute(self.verbose, &settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_help_exits_cleanly() {
        let err = Cli::try_parse_from(["portsweep", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["portsweep", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
