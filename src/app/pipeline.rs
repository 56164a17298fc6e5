//! The ingestion run shared by every entry point.
//!
//! fetch (or read a saved response) -> normalize -> CSV export
//!
//! Nothing is written unless every earlier step succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::data::EntsoeClient;
use crate::domain::{IngestConfig, LoadRecord};
use crate::error::AppError;
use crate::io::{normalize, write_load_csv};

/// Outputs of a single ingestion run.
#[derive(Debug, Clone)]
pub struct IngestionOutput {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub records: Vec<LoadRecord>,
    pub output_path: PathBuf,
}

/// Trailing window `[now - window_hours, now]`.
pub fn trailing_window(now: DateTime<Utc>, window_hours: i64) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let start = Duration::try_hours(window_hours)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            AppError::Config(format!(
                "window of {window_hours} hours reaches outside the supported date range"
            ))
        })?;
    Ok((start, now))
}

/// Fetch the trailing window ending at `now`, normalize it and write the CSV.
pub fn run_ingestion(config: &IngestConfig, now: DateTime<Utc>) -> Result<IngestionOutput, AppError> {
    let client = EntsoeClient::new(config)?;
    run_ingestion_with(&client, config, now)
}

/// [`run_ingestion`] with a caller-supplied client.
pub fn run_ingestion_with(
    client: &EntsoeClient,
    config: &IngestConfig,
    now: DateTime<Utc>,
) -> Result<IngestionOutput, AppError> {
    config.validate()?;
    let (start, end) = trailing_window(now, config.window_hours)?;

    let body = client.fetch_load(start, end, &config.zone)?;
    let records = normalize(&body)?;

    write_load_csv(&config.output_path, &records)?;
    Ok(IngestionOutput {
        start,
        end,
        records,
        output_path: config.output_path.clone(),
    })
}

/// Normalize a previously saved response body instead of calling the API.
///
/// `start`/`end` span the records read (both equal to `now` when empty).
pub fn run_from_file(config: &IngestConfig, input: &Path, now: DateTime<Utc>) -> Result<IngestionOutput, AppError> {
    config.validate()?;
    let body = fs::read_to_string(input)
        .map_err(|e| AppError::io(format!("Failed to read ENTSO-E response '{}'", input.display()), e))?;
    let records = normalize(&body)?;
    tracing::info!(input = %input.display(), records = records.len(), "normalized saved response");

    write_load_csv(&config.output_path, &records)?;
    let start = records.first().map_or(now, |r| r.timestamp);
    let end = records.last().map_or(now, |r| r.timestamp);
    Ok(IngestionOutput {
        start,
        end,
        records,
        output_path: config.output_path.clone(),
    })
}
