//! Error types for the CAM pipeline
//!
//! Provides the crate-wide error taxonomy with automatic conversions from common
//! error sources using the thiserror crate.
//!
//! Most geometric failures are recovered locally (a bad path is skipped, a
//! degenerate offset falls back to the original shape) and never reach this
//! type; only format dispatch and writer rejection are surfaced to callers.

use std::io;
use thiserror::Error;

/// Main error type for Embrocam operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Path cannot be turned into usable geometry (too few vertices,
    /// empty after repair)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid color format
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Unsupported output file format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Unexpected numerical failure inside a stitch generator
    #[error("Stitch generation failed: {0}")]
    Generation(String),

    /// Format writer rejected the command stream
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Embrocam operations
pub type Result<T> = std::result::Result<T, Error>;
