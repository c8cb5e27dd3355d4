//! Export boundary
//!
//! The JSON-shaped request/response types the transport layer hands to the
//! engine, and the one-call pipeline from layers to stitch file bytes.
//! Transport concerns (HTTP, MIME checks) stay outside the crate.

use crate::core::pattern::ThreadStats;
use crate::engine;
use crate::engine::settings::Layer;
use crate::formats::{self, PatternFormat};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// A full export request: layers plus the target format tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Colored layers in design order
    pub layers: Vec<Layer>,
    /// Output format tag: "dst", "pes", "jef", or "exp"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "dst".to_string()
}

/// The finished stitch file plus production estimates
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Encoded stitch file
    pub data: Vec<u8>,
    /// Suggested download name, `export.<fmt>`
    pub file_name: String,
    /// Thread consumption and command counts
    pub stats: ThreadStats,
}

/// Run the full pipeline: layers -> stitches -> sequenced pattern -> bytes
///
/// Only an unknown format tag or a writer failure surface as errors;
/// malformed layer colors and unusable paths are skipped with a warning.
pub fn create_embroidery_file(request: &ExportRequest) -> Result<ExportOutput> {
    let format = PatternFormat::parse(&request.format)?;
    let pattern = engine::generate_pattern(&request.layers)?;
    let stats = pattern.thread_estimate();
    let data = formats::write_to_bytes(&pattern, format)?;
    Ok(ExportOutput {
        data,
        file_name: format!("export.{}", format.extension()),
        stats,
    })
}
