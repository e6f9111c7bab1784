use anyhow::Context;
use clap::Parser;
use portsweep::cli::Cli;
use portsweep::{logging, output};
use std::process::ExitCode;
use tracing::debug;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    match runtime.block_on(cli.execute()) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!(error = ?e, "scan failed");
            output::print_error(&e.to_string());
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
