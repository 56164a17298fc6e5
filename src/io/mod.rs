//! Input/output helpers.
//!
//! - ENTSO-E XML ingest + normalization (`ingest`)
//! - CSV export of normalized records (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
