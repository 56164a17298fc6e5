//! Domain types used throughout the ingestion run.
//!
//! This module defines:
//!
//! - the normalized output row (`LoadRecord`)
//! - the parse-time view of an ENTSO-E document (`TimeSeriesDocument`, `Period`, `Point`)
//! - the run configuration (`IngestConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
