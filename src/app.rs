//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments and layers them over the environment config
//! - runs the ingestion pipeline
//! - prints the confirmation line

use chrono::Utc;
use clap::Parser;

use crate::cli::Cli;
use crate::domain::IngestConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gridmind-ingest` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = Cli::parse();

    let config = config_from_args(IngestConfig::from_env(), &cli);
    let output = match &cli.input {
        Some(input) => pipeline::run_from_file(&config, input, Utc::now())?,
        None => pipeline::run_ingestion(&config, Utc::now())?,
    };

    println!(
        "ENTSO-E load data saved to {} ({} records, {} to {})",
        output.output_path.display(),
        output.records.len(),
        output.start.format("%Y-%m-%d %H:%M UTC"),
        output.end.format("%Y-%m-%d %H:%M UTC"),
    );
    Ok(())
}

/// Apply CLI overrides on top of an environment-derived config.
pub fn config_from_args(mut config: IngestConfig, cli: &Cli) -> IngestConfig {
    if let Some(zone) = &cli.zone {
        config.zone = zone.clone();
    }
    if let Some(hours) = cli.window_hours {
        config.window_hours = hours;
    }
    if let Some(path) = &cli.output {
        config.output_path = path.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = std::time::Duration::from_secs(secs);
    }
    config
}

/// Logs go to stderr so stdout only carries the confirmation line.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
