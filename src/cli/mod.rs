//! Command-line parsing for the ENTSO-E load ingester.
//!
//! Every flag is optional: a bare `gridmind-ingest` runs the default
//! trailing-24h ingestion.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gridmind-ingest",
    version,
    about = "Fetch ENTSO-E actual total load and store it as CSV"
)]
pub struct Cli {
    /// Bidding zone code (defaults to ENTSOE_ZONE or NL).
    #[arg(short = 'z', long)]
    pub zone: Option<String>,

    /// Length of the trailing window ending now, in hours.
    #[arg(long, value_name = "HOURS")]
    pub window_hours: Option<i64>,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Normalize a saved ENTSO-E XML response instead of calling the API.
    #[arg(long, value_name = "XML")]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_a_valid_invocation() {
        let cli = Cli::try_parse_from(["gridmind-ingest"]).unwrap();
        assert!(cli.zone.is_none());
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let cli = Cli::try_parse_from([
            "gridmind-ingest",
            "-z",
            "10YNL----------L",
            "--window-hours",
            "6",
            "-o",
            "out.csv",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.zone.as_deref(), Some("10YNL----------L"));
        assert_eq!(cli.window_hours, Some(6));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.timeout, Some(5));
    }
}
