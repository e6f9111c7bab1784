//! Open-port list output.
//!
//! The list is one port number per line, ascending, no header. Standard
//! output and the optional results file receive exactly the same bytes. An
//! empty scan writes nothing to standard output and leaves an empty file.

use crate::error::{ReportError, ReportResult};
use crate::scanner::ScanReport;
use crate::types::Port;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write ports to `out`, one per line.
pub fn write_open_ports<W, I>(mut out: W, ports: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Port>,
{
    for port in ports {
        writeln!(out, "{}", port)?;
    }
    out.flush()
}

/// Print the open ports of a report to standard output.
pub fn print_open_ports(report: &ScanReport) -> ReportResult<()> {
    let stdout = io::stdout();
    write_open_ports(stdout.lock(), report.open_ports()).map_err(ReportError::Stdout)
}

/// Write the open ports of a report to `path`, replacing any existing content.
pub fn save_open_ports(report: &ScanReport, path: &Path) -> ReportResult<()> {
    let to_report_error = |source: io::Error| ReportError::File {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_report_error)?;
    write_open_ports(BufWriter::new(file), report.open_ports()).map_err(to_report_error)?;

    debug!(path = %path.display(), open = report.open_count(), "saved results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PortResult;
    use std::fs;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    fn report(open: &[u16], closed: &[u16]) -> ScanReport {
        let mut results: Vec<PortResult> = open
            .iter()
            .map(|&p| PortResult::open(Port::new(p).unwrap()))
            .chain(closed.iter().map(|&p| PortResult::closed(Port::new(p).unwrap())))
            .collect();
        results.sort_by_key(|r| r.port);
        ScanReport {
            target: IpAddr::V4(Ipv4Addr::LOCALHOST),
            results,
            duration: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_only_open_ports_written() {
        let mut buf = Vec::new();
        let report = report(&[22, 80], &[20, 21, 23]);
        write_open_ports(&mut buf, report.open_ports()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "22\n80\n");
    }

    #[test]
    fn test_nothing_written_when_none_open() {
        let mut buf = Vec::new();
        write_open_ports(&mut buf, report(&[], &[1, 2, 3]).open_ports()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        fs::write(&path, "stale\ncontent\nfrom\nbefore\n").unwrap();

        save_open_ports(&report(&[22], &[20, 21, 23, 24, 25]), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "22\n");
    }

    #[test]
    fn test_save_empty_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        save_open_ports(&report(&[], &[1]), &path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.txt");

        let err = save_open_ports(&report(&[22], &[]), &path).unwrap_err();
        assert!(matches!(err, ReportError::File { .. }));
    }
}
