//! Human-facing messages on standard error.
//!
//! Standard output is reserved for the bare port list, so headers,
//! summaries, warnings and errors all go to stderr.

use crate::config::PortSelection;
use crate::scanner::ScanReport;
use crate::services::get_service_description;
use crate::types::ScanTarget;
use console::style;
use std::io::{self, Write};
use std::time::Duration;

const RULE: &str = "────────────────────────────────────────";

/// Print the banner shown before a verbose scan.
pub fn print_scan_header(target: &ScanTarget, ports: &PortSelection, timeout: Duration) {
    eprintln!();
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan().for_stderr(),
        style("portsweep").cyan().bold().for_stderr(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        "{} Target: {}",
        style("•").dim().for_stderr(),
        style(target).white().bold().for_stderr()
    );
    eprintln!(
        "{} Scanning {} ({} ports), timeout {:.2}s",
        style("•").dim().for_stderr(),
        ports,
        style(ports.len()).white().bold().for_stderr(),
        timeout.as_secs_f64()
    );
    eprintln!();
}

/// Write the post-scan summary table.
pub fn write_summary<W: Write>(
    mut out: W,
    target: &ScanTarget,
    report: &ScanReport,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", style("Scan results for").bold().for_stderr(), target)?;

    if report.open_count() > 0 {
        writeln!(out, "{}", style(RULE).dim().for_stderr())?;
        writeln!(
            out,
            "{:<8}  {:<8}  {}",
            style("PORT").bold().for_stderr(),
            style("STATE").bold().for_stderr(),
            style("SERVICE").bold().for_stderr()
        )?;
        writeln!(out, "{}", style(RULE).dim().for_stderr())?;
        for port in report.open_ports() {
            writeln!(
                out,
                "{:<8}  {:<8}  {}",
                port,
                style("open").green().bold().for_stderr(),
                get_service_description(port.as_u16())
            )?;
        }
        writeln!(out, "{}", style(RULE).dim().for_stderr())?;
    } else {
        writeln!(out, "  {}", style("No open ports found.").dim().for_stderr())?;
    }

    writeln!(out)?;
    writeln!(out, "Total ports scanned: {}", report.ports_scanned())?;
    writeln!(
        out,
        "Open ports found: {}",
        style(report.open_count()).green().bold().for_stderr()
    )?;
    writeln!(
        out,
        "Scan completed in {:.2} seconds.",
        report.duration.as_secs_f64()
    )?;
    out.flush()
}

/// Print the post-scan summary to standard error.
pub fn print_summary(target: &ScanTarget, report: &ScanReport) {
    let stderr = io::stderr();
    // Nothing sensible to do if stderr itself is gone
    let _ = write_summary(stderr.lock(), target, report);
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold().for_stderr(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PortResult;
    use crate::types::Port;
    use std::net::{IpAddr, Ipv4Addr};

    fn sample_report(open: &[u16]) -> ScanReport {
        ScanReport {
            target: IpAddr::V4(Ipv4Addr::LOCALHOST),
            results: (20..=25)
                .filter_map(Port::new)
                .map(|p| {
                    if open.contains(&p.as_u16()) {
                        PortResult::open(p)
                    } else {
                        PortResult::closed(p)
                    }
                })
                .collect(),
            duration: Duration::from_millis(1250),
        }
    }

    fn summary(open: &[u16]) -> String {
        console::set_colors_enabled_stderr(false);
        let target = ScanTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        let mut buf = Vec::new();
        write_summary(&mut buf, &target, &sample_report(open)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_lists_services() {
        let text = summary(&[22]);
        assert!(text.contains("22"));
        assert!(text.contains("ssh"));
        assert!(text.contains("Total ports scanned: 6"));
        assert!(text.contains("Open ports found: 1"));
        assert!(text.contains("Scan completed in 1.25 seconds."));
    }

    #[test]
    fn test_summary_without_open_ports() {
        let text = summary(&[]);
        assert!(text.contains("No open ports found."));
        assert!(text.contains("Open ports found: 0"));
    }
}
