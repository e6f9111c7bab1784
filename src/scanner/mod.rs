//! Scanner module - drives a prober across a set of ports.
//!
//! Probes run on the tokio runtime with at most `concurrency` in flight.
//! With a concurrency of one the ports are probed strictly one after another
//! in ascending order. Whatever the concurrency, results are sorted by port
//! after collection, so completion order never leaks into the report.

pub mod tcp;
pub mod traits;

use crate::error::ScanResult;
use crate::types::Port;
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use tcp::TcpConnectProber;
pub use traits::{PortResult, PortState, Prober};

/// Ports to probe and how to probe them.
#[derive(Debug, Clone)]
pub struct ScanJob {
    ports: Vec<Port>,
    concurrency: usize,
    progress: Option<ProgressBar>,
}

impl ScanJob {
    /// Create a sequential job over the given ports.
    pub fn new(ports: Vec<Port>) -> Self {
        Self {
            ports,
            concurrency: 1,
            progress: None,
        }
    }

    /// Set the maximum number of probes in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Report progress on this bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Address that was scanned.
    pub target: IpAddr,
    /// One result per probed port, ascending by port, no duplicates.
    pub results: Vec<PortResult>,
    /// Wall-clock duration of the probing phase.
    pub duration: Duration,
}

impl ScanReport {
    /// Open ports in ascending order.
    pub fn open_ports(&self) -> impl Iterator<Item = Port> + '_ {
        self.results.iter().filter(|r| r.is_open()).map(|r| r.port)
    }

    pub fn open_count(&self) -> usize {
        self.open_ports().count()
    }

    pub fn ports_scanned(&self) -> usize {
        self.results.len()
    }
}

/// Build the progress bar shown during verbose scans.
pub fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Execute a scan job against a prober.
///
/// Stops at the first fatal probe error; in-flight probes are dropped.
pub async fn run_scan<P>(prober: &P, job: ScanJob) -> ScanResult<ScanReport>
where
    P: Prober + ?Sized,
{
    let start_time = Instant::now();
    let ScanJob {
        ports,
        concurrency,
        progress,
    } = job;

    debug!(
        target = %prober.target(),
        ports = ports.len(),
        concurrency,
        timeout_ms = prober.timeout().as_millis() as u64,
        "starting scan"
    );

    let collected: ScanResult<Vec<PortResult>> = stream::iter(ports)
        .map(|port| {
            let progress = progress.as_ref();
            async move {
                let result = prober.probe(port).await;
                if let Some(pb) = progress {
                    pb.inc(1);
                    if matches!(&result, Ok(r) if r.is_open()) {
                        pb.set_message(format!("Found open port: {}", port));
                    }
                }
                result
            }
        })
        .buffer_unordered(concurrency)
        .try_collect()
        .await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut results = collected?;
    results.sort_unstable_by_key(|r| r.port);
    results.dedup_by_key(|r| r.port);

    let report = ScanReport {
        target: prober.target(),
        results,
        duration: start_time.elapsed(),
    };

    info!(
        target = %report.target,
        scanned = report.ports_scanned(),
        open = report.open_count(),
        elapsed_ms = report.duration.as_millis() as u64,
        "scan complete"
    );

    Ok(report)
}
