//! Courier API client - command-line entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use courier::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courier=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(backend = %cli.backend_url, "starting");

    let mut stdout = io::stdout().lock();
    match courier::run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("courier: {error}");
            ExitCode::FAILURE
        }
    }
}
