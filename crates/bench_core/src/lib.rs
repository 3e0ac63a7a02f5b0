//! bench_core - Encode script generation for Blu-ray titles.
//!
//! Takes title metadata from a disc reader, cleans up and names its
//! chapters, and writes the batch script that drives the external
//! audio, video and mux tools.

pub mod chapters;
pub mod commands;
pub mod config;
pub mod disc;
pub mod files;
pub mod job;
pub mod logging;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
