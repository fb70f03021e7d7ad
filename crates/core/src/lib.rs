//! dgslice-core
//!
//! Relevance-weighted dependency slicing with automatic threshold calibration.
//!
//! This crate defines the graph model and weight table, the slice engine,
//! the threshold sweep and knee-point detection, plus the graph sources and
//! the entry points used by frontends.
//!
//! All substantive logic lives here so it is fully testable without any
//! rendering dependency.

pub mod analysis;
pub mod config;
pub mod model;
pub mod services;
pub mod source;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
