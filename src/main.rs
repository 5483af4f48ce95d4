//! gimer - merge branches of hosted git repositories safely

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::Cli;
use cli::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the log subscriber; logs go to stderr
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gimer=debug")
    } else {
        EnvFilter::try_from_env("GIMER_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".error());
            ExitCode::FAILURE
        }
    }
}
