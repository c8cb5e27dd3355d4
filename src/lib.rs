//! # Embrocam
//!
//! A CAM engine for machine embroidery. Takes colored polygon and polyline
//! layers and produces binary stitch files for industrial embroidery
//! machines.
//!
//! ## Pipeline
//!
//! For every object: pull compensation, underlay, then tatami / satin /
//! bean / running stitch generation and tie-off locking. Objects are then
//! sequenced per color with automatic trim and connector decisions, and the
//! resulting command stream is encoded as DST, PES, JEF, or EXP.
//!
//! ## Quick Start
//!
//! ```
//! use embrocam::engine::settings::Layer;
//! use embrocam::export::{create_embroidery_file, ExportRequest};
//!
//! let request = ExportRequest {
//!     layers: vec![Layer::new(
//!         "#cc2244",
//!         vec![vec![[0.0, 0.0], [200.0, 0.0], [200.0, 200.0], [0.0, 200.0]]],
//!     )],
//!     format: "dst".to_string(),
//! };
//!
//! let output = create_embroidery_file(&request)?;
//! assert!(!output.data.is_empty());
//! # Ok::<(), embrocam::Error>(())
//! ```
//!
//! Coordinates are 0.1mm design units; all density, length, and width
//! settings are millimeters and converted at the boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod core;
pub mod engine;
pub mod export;
pub mod formats;
pub mod palettes;
pub mod utils;

// Re-export commonly used types at the crate root
pub use crate::core::command::Command;
pub use crate::core::pattern::{EmbPattern, Stitch, ThreadStats};
pub use crate::core::thread::EmbThread;
pub use crate::formats::PatternFormat;
pub use crate::utils::error::Error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::command::Command;
    pub use crate::core::pattern::{EmbPattern, Stitch, ThreadStats};
    pub use crate::core::thread::EmbThread;
    pub use crate::engine::settings::{Layer, StitchSettings, StitchStyle};
    pub use crate::export::{create_embroidery_file, ExportOutput, ExportRequest};
    pub use crate::formats::PatternFormat;
    pub use crate::utils::error::{Error, Result};
}
