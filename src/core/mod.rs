//! Core embroidery pattern structures
//!
//! This module contains the fundamental types for working with embroidery
//! patterns: the command stream, thread colors, and the pattern accumulator.

/// Command definitions
pub mod command;

/// Pattern structure and statistics
pub mod pattern;

/// Thread color management
pub mod thread;
