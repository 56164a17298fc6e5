//! Export normalized load records to CSV.
//!
//! Columns are `timestamp,load_mw`; timestamps are RFC 3339 in UTC.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::domain::LoadRecord;
use crate::error::AppError;

pub const CSV_HEADER: [&str; 2] = ["timestamp", "load_mw"];

/// Write records to `path`, creating parent directories as needed.
///
/// Rows go to a sibling `.tmp` file that is renamed into place once complete,
/// so `path` never holds a partially written export.
pub fn write_load_csv(path: &Path, records: &[LoadRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io(format!("Failed to create output directory '{}'", parent.display()), e))?;
    }

    let tmp = staging_path(path);
    if let Err(err) = write_rows(&tmp, records) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::io(
            format!("Failed to move export CSV into '{}'", path.display()),
            e,
        ));
    }

    tracing::info!(path = %path.display(), rows = records.len(), "wrote load CSV");
    Ok(())
}

fn write_rows(path: &Path, records: &[LoadRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}'", path.display()), e))?;

    // Header is written by hand so an empty run still produces the two columns.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for record in records {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io("Failed to flush export CSV", e))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::io("Failed to write export CSV row", std::io::Error::other(err))
}
