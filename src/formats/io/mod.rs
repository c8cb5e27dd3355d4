//! File format I/O
//!
//! Binary writers for the supported stitch file formats and their shared
//! output helpers.

/// Common output utilities
pub mod utils;

/// Format writers
pub mod writers;
