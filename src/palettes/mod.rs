//! Machine thread color charts
//!
//! Fixed-index color charts used by format writers that store chart indices
//! instead of RGB values. Design colors are mapped to the nearest chart
//! entry at write time.

/// Janome JEF chart (79 colors)
pub mod thread_jef;

/// Brother PEC chart (64 colors), also used by PES
pub mod thread_pec;
