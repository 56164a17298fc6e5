//! Remote data sources.

pub mod entsoe;

pub use entsoe::*;
