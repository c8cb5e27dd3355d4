//! Stitch generation engine
//!
//! The CAM core of the crate: turns colored polygon/polyline layers into an
//! ordered, machine-ready command stream. The pipeline per object is
//! compensate -> underlay -> fill/satin/run generation -> tie wrap, followed
//! by cross-object sequencing and command-stream assembly.
//!
//! The engine is pure and synchronous: one call, one request-owned pattern,
//! no shared state. Bad paths are skipped with a warning instead of failing
//! the whole design.

use crate::core::pattern::EmbPattern;
use crate::core::thread::EmbThread;
use crate::utils::error::{Error, Result};
use geo::Polygon;
use log::warn;

pub mod applique;
pub mod assembler;
pub mod compensation;
pub mod fill;
pub mod geometry;
pub mod running;
pub mod satin;
pub mod sequence;
pub mod settings;
pub mod ties;
pub mod underlay;

use self::sequence::StitchObject;
use self::settings::{Layer, StitchSettings, StitchStyle};
use self::ties::TieMode;

/// Design units per millimeter (embroidery native unit is 0.1mm)
pub const UNITS_PER_MM: f64 = 10.0;

/// Gaps below this are sewn over with a connector instead of trimmed (mm)
pub const SHORT_JUMP_THRESHOLD_MM: f64 = 2.0;

/// Spacing of injected connector stitches (mm)
pub const CONNECTOR_STITCH_LEN_MM: f64 = 3.0;

/// Length of tie-in/tie-out lock stitches (mm)
pub const TIE_LENGTH_MM: f64 = 0.5;

/// Inward offset of the edge-walk underlay (mm)
const UNDERLAY_INSET_MM: f64 = 0.5;

/// Stitch length used for underlay passes (mm)
const UNDERLAY_STITCH_LEN_MM: f64 = 2.0;

/// Smallest bounding-box extent that also gets a center-walk pass (mm)
const CENTER_WALK_MIN_EXTENT_MM: f64 = 10.0;

/// Generate the full command stream for a set of layers
///
/// Each layer path becomes one stitch object; objects are sequenced per
/// color and assembled into the single request-owned pattern.
pub fn generate_pattern(layers: &[Layer]) -> Result<EmbPattern> {
    let mut objects = Vec::new();

    for layer in layers {
        let thread = match EmbThread::from_hex(&layer.color) {
            Ok(thread) => thread,
            Err(err) => {
                warn!("skipping layer {}: {}", layer.color, err);
                continue;
            }
        };
        for path in &layer.paths {
            match build_object(path, layer, &thread) {
                Ok(Some(object)) => objects.push(object),
                Ok(None) => {}
                Err(err) => warn!("skipping path in layer {}: {}", layer.color, err),
            }
        }
    }

    let runs = sequence::plan(
        objects,
        SHORT_JUMP_THRESHOLD_MM * UNITS_PER_MM,
        CONNECTOR_STITCH_LEN_MM * UNITS_PER_MM,
    );
    Ok(assembler::assemble(
        runs,
        SHORT_JUMP_THRESHOLD_MM * UNITS_PER_MM,
    ))
}

fn build_object(
    path: &[[f64; 2]],
    layer: &Layer,
    thread: &EmbThread,
) -> Result<Option<StitchObject>> {
    let s = &layer.settings;

    if layer.is_stroke {
        return Ok(stroke_object(path, s, thread));
    }

    let polygon = geometry::polygon_from_path(path)?;
    let polygon = compensation::compensate(&polygon, s.pull_compensation_units());

    let mut sub_paths: Vec<Vec<(f64, f64)>> = Vec::new();
    if s.underlay && matches!(s.style, StitchStyle::Tatami | StitchStyle::Satin) {
        sub_paths.extend(underlay_paths(&polygon));
    }

    let tie_len = TIE_LENGTH_MM * UNITS_PER_MM;
    for stitches in region_stitches(&polygon, s) {
        if stitches.iter().any(|p| !p.0.is_finite() || !p.1.is_finite()) {
            return Err(Error::Generation(
                "generator produced non-finite coordinates".to_string(),
            ));
        }
        let tied = ties::tie_wrap(stitches, TieMode::Both, tie_len);
        if tied.len() >= 2 {
            sub_paths.push(tied);
        }
    }

    let object = StitchObject::new(thread.clone(), sub_paths);
    Ok((!object.is_empty()).then_some(object))
}

/// Main stitch lists for a closed region, one per traversed path
fn region_stitches(polygon: &Polygon<f64>, s: &StitchSettings) -> Vec<Vec<(f64, f64)>> {
    match s.style {
        StitchStyle::Tatami => vec![fill::tatami_fill(
            polygon,
            s.density_units(),
            s.angle,
            s.stitch_length_units(),
            s.offset,
        )],
        StitchStyle::Satin => vec![satin::satin_polygon(polygon, s.density_units())],
        StitchStyle::Bean => boundary_rings(polygon)
            .iter()
            .map(|ring| running::bean(ring, s.stitch_length_units()))
            .collect(),
        StitchStyle::Run => boundary_rings(polygon)
            .iter()
            .map(|ring| running::running(ring, s.stitch_length_units()))
            .collect(),
    }
}

fn stroke_object(
    path: &[[f64; 2]],
    s: &StitchSettings,
    thread: &EmbThread,
) -> Option<StitchObject> {
    let polyline: Vec<(f64, f64)> = path
        .iter()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .map(|p| (p[0], p[1]))
        .collect();

    let stitches = match s.style {
        StitchStyle::Satin => satin::satin_ribbon(
            &polyline,
            s.satin_width_units(),
            s.density_units(),
            s.short_stitches,
        ),
        StitchStyle::Bean => running::bean(&polyline, s.stitch_length_units()),
        // a stroke has no area to fill; tatami degrades to a plain run
        StitchStyle::Run | StitchStyle::Tatami => {
            running::running(&polyline, s.stitch_length_units())
        }
    };

    let tied = ties::tie_wrap(stitches, TieMode::Both, TIE_LENGTH_MM * UNITS_PER_MM);
    if tied.len() < 2 {
        return None;
    }
    Some(StitchObject::new(thread.clone(), vec![tied]))
}

/// Underlay passes for a region: edge walk, plus a center walk on shapes
/// large enough to need stabilizing through the middle
fn underlay_paths(polygon: &Polygon<f64>) -> Vec<Vec<(f64, f64)>> {
    let inset = UNDERLAY_INSET_MM * UNITS_PER_MM;
    let step = UNDERLAY_STITCH_LEN_MM * UNITS_PER_MM;

    let mut paths = Vec::new();
    if let Some(walk) = underlay::edge_walk(polygon, inset, step) {
        paths.push(walk);
    }
    if let Some(rect) = geometry::bounds(polygon) {
        let min_extent = (rect.max().x - rect.min().x).min(rect.max().y - rect.min().y);
        if min_extent >= CENTER_WALK_MIN_EXTENT_MM * UNITS_PER_MM {
            if let Some(walk) = underlay::center_walk(polygon, step) {
                paths.push(walk);
            }
        }
    }
    paths
}

/// Exterior and interior rings of a polygon as point lists
fn boundary_rings(polygon: &Polygon<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(polygon.exterior().coords().map(|c| (c.x, c.y)).collect());
    for interior in polygon.interiors() {
        rings.push(interior.coords().map(|c| (c.x, c.y)).collect());
    }
    rings
}
