//! Scan command implementation.
//!
//! Resolves flags into a [`ScanConfig`], probes the target and reports the
//! open ports. All validation happens before the first probe.

use crate::config::{
    AppSettings, ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_END_PORT, DEFAULT_START_PORT,
    DEFAULT_TARGET, DEFAULT_TIMEOUT_SECS,
};
use crate::error::{CliResult, ConfigResult};
use crate::output;
use crate::scanner::{progress_bar, run_scan, ScanJob, ScanReport, TcpConnectProber};
use crate::types::ScanTarget;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

/// Scan flags.
#[derive(Args, Debug, Clone)]
pub struct ScanCommand {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// First port to scan
    #[arg(short = 's', long = "start-port", default_value_t = DEFAULT_START_PORT)]
    pub start_port: u16,

    /// Last port to scan (inclusive)
    #[arg(short = 'e', long = "end-port", default_value_t = DEFAULT_END_PORT)]
    pub end_port: u16,

    /// Also write the open-port list to this file (overwritten)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Per-port connection timeout in seconds
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    pub timeout: f64,

    /// Scan only common service ports (20, 21, 22, 23, 25, 53, 80, 443, 3306, 5432, 27017)
    #[arg(long, conflicts_with_all = ["start_port", "end_port"])]
    pub common: bool,

    /// Maximum number of probes in flight (1 = strictly sequential)
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,
}

impl ScanCommand {
    /// Build the validated configuration. Flags override settings.
    pub fn to_config(&self, settings: &AppSettings) -> ConfigResult<ScanConfig> {
        let config = if self.common {
            ScanConfig::common(self.timeout)?
        } else {
            ScanConfig::new(self.start_port, self.end_port, self.timeout)?
        };

        let concurrency = self
            .concurrency
            .or(settings.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);

        let config = config
            .with_target(self.target.trim())
            .with_concurrency(concurrency)?;

        Ok(match &self.output {
            Some(path) => config.with_output(path),
            None => config,
        })
    }

    /// Execute the scan command.
    pub async fn execute(&self, verbosity: u8, settings: &AppSettings) -> CliResult<()> {
        let config = self.to_config(settings)?;
        let target = ScanTarget::resolve(config.target()).await?;
        let verbose = verbosity > 0;

        if verbose {
            output::print_scan_header(&target, config.ports(), config.timeout());
        }

        let show_progress = verbose && (settings.progress || console::Term::stderr().is_term());
        let report = scan(&config, &target, show_progress).await?;

        let printed = output::print_open_ports(&report);

        if verbose {
            output::print_summary(&target, &report);
        }

        if let Some(path) = config.output() {
            output::save_open_ports(&report, path)?;
            info!(path = %path.display(), "results written");
        }

        printed?;
        Ok(())
    }
}

/// Probe every configured port on an already resolved target.
pub(crate) async fn scan(
    config: &ScanConfig,
    target: &ScanTarget,
    show_progress: bool,
) -> CliResult<ScanReport> {
    let prober = TcpConnectProber::new(target.ip, config.timeout());

    let job = ScanJob::new(config.ports().ports()).with_concurrency(config.concurrency());
    let job = if show_progress {
        job.with_progress(progress_bar(config.ports().len()))
    } else {
        job
    };

    debug!(%target, ports = %config.ports(), "dispatching scan");
    Ok(run_scan(&prober, job).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::error::ConfigError;
    use crate::types::PortError;
    use clap::Parser;
    use std::time::Duration;

    fn parse(args: &[&str]) -> ScanCommand {
        let mut argv = vec!["portsweep"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().scan
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).to_config(&AppSettings::default()).unwrap();
        assert_eq!(config.target(), "127.0.0.1");
        assert_eq!(config.start_port().as_u16(), DEFAULT_START_PORT);
        assert_eq!(config.end_port().as_u16(), DEFAULT_END_PORT);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.concurrency(), DEFAULT_CONCURRENCY);
        assert!(config.output().is_none());
    }

    #[test]
    fn test_all_flags() {
        let cmd = parse(&[
            "192.168.1.10",
            "-s",
            "20",
            "--end-port",
            "25",
            "-t",
            "0.5",
            "-o",
            "results.txt",
            "-c",
            "1",
        ]);
        let config = cmd.to_config(&AppSettings::default()).unwrap();
        assert_eq!(config.target(), "192.168.1.10");
        assert_eq!(config.start_port().as_u16(), 20);
        assert_eq!(config.end_port().as_u16(), 25);
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.output(), Some(std::path::Path::new("results.txt")));
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn test_settings_concurrency_used_when_flag_absent() {
        let settings = AppSettings {
            concurrency: Some(7),
            progress: false,
        };
        assert_eq!(parse(&[]).to_config(&settings).unwrap().concurrency(), 7);
        assert_eq!(parse(&["-c", "3"]).to_config(&settings).unwrap().concurrency(), 3);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = parse(&["-s", "30", "-e", "20"])
            .to_config(&AppSettings::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Port(PortError::InvalidRange(30, 20))));
    }

    #[test]
    fn test_negative_timeout_reaches_validation() {
        let err = parse(&["-t", "-1"])
            .to_config(&AppSettings::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(t) if t == -1.0));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse(&["-t", "0"])
            .to_config(&AppSettings::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn test_non_numeric_port_is_usage_error() {
        let err = Cli::try_parse_from(["portsweep", "-s", "abc"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_port_above_max_is_usage_error() {
        assert!(Cli::try_parse_from(["portsweep", "-e", "70000"]).is_err());
    }

    #[test]
    fn test_common_conflicts_with_range() {
        assert!(Cli::try_parse_from(["portsweep", "--common", "-s", "10"]).is_err());
        let config = parse(&["--common"]).to_config(&AppSettings::default()).unwrap();
        assert_eq!(config.ports().len(), 11);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_resolution() {
        // An unresolvable target would fail differently if probing had started
        let cmd = parse(&["no.such.host.invalid", "-t", "0"]);
        let err = cmd.execute(0, &AppSettings::default()).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("timeout"));
    }
}
