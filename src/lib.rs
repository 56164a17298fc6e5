//! `gridmind-ingest` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - the fetch/normalize/export steps are testable without spawning processes
//! - the normalizer can be reused on saved responses

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
