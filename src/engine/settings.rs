//! Layer inputs and stitch settings
//!
//! These types mirror the JSON wire structure produced by the segmentation
//! front end. Wire coordinates are 0.1mm units; every mm-denominated setting
//! is converted through [`UNITS_PER_MM`](crate::engine::UNITS_PER_MM) before
//! the generators see it. Unknown JSON keys are ignored and every setting has
//! a default, so sparse settings objects are fine.

use crate::engine::UNITS_PER_MM;
use serde::{Deserialize, Serialize};

/// Stitch style selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchStyle {
    /// Parallel-row fill with per-row phase offsets
    Tatami,
    /// Dense zig-zag column
    Satin,
    /// Triple-pass running stitch
    Bean,
    /// Plain running stitch
    Run,
}

impl Default for StitchStyle {
    fn default() -> Self {
        StitchStyle::Tatami
    }
}

/// Per-layer stitch parameters, mm-denominated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StitchSettings {
    /// Stitch style
    pub style: StitchStyle,
    /// Row spacing for tatami, zig-zag pitch for satin (mm)
    pub density: f64,
    /// Fill direction (degrees)
    pub angle: f64,
    /// Maximum point-to-point distance (mm)
    pub stitch_length: f64,
    /// Outward buffer applied before stitching (mm); negative shrinks
    pub pull_compensation: f64,
    /// Generate underlay before fills
    pub underlay: bool,
    /// Per-row phase shift as a fraction of stitch length (0..1)
    pub offset: f64,
    /// Column width when satin runs over a polyline (mm)
    pub satin_width: f64,
    /// Shorten alternate stitches on sharp satin curves
    pub short_stitches: bool,
}

impl Default for StitchSettings {
    fn default() -> Self {
        Self {
            style: StitchStyle::Tatami,
            density: 0.4,
            angle: 45.0,
            stitch_length: 3.5,
            pull_compensation: 0.0,
            underlay: true,
            offset: 0.5,
            satin_width: 4.0,
            short_stitches: true,
        }
    }
}

impl StitchSettings {
    /// Row spacing / zig-zag pitch in design units
    pub fn density_units(&self) -> f64 {
        self.density * UNITS_PER_MM
    }

    /// Maximum stitch length in design units
    pub fn stitch_length_units(&self) -> f64 {
        self.stitch_length * UNITS_PER_MM
    }

    /// Pull compensation in design units
    pub fn pull_compensation_units(&self) -> f64 {
        self.pull_compensation * UNITS_PER_MM
    }

    /// Satin column width in design units
    pub fn satin_width_units(&self) -> f64 {
        self.satin_width * UNITS_PER_MM
    }
}

/// One colored layer of the design
///
/// All paths in a layer share the same thread color and settings. A stroke
/// layer treats its paths as open polylines; otherwise paths are closed
/// regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Thread color as `#rrggbb`
    pub color: String,
    /// Point paths in 0.1mm units
    pub paths: Vec<Vec<[f64; 2]>>,
    /// Stitch parameters (defaults apply when omitted)
    #[serde(default)]
    pub settings: StitchSettings,
    /// Treat paths as open polylines instead of closed regions
    #[serde(default)]
    pub is_stroke: bool,
}

impl Layer {
    /// Convenience constructor with default settings
    pub fn new(color: impl Into<String>, paths: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            color: color.into(),
            paths,
            settings: StitchSettings::default(),
            is_stroke: false,
        }
    }

    /// Builder method: replace the settings
    pub fn with_settings(mut self, settings: StitchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder method: mark the layer as a stroke layer
    pub fn as_stroke(mut self) -> Self {
        self.is_stroke = true;
        self
    }
}
