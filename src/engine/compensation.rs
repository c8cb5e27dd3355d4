//! Pull compensation
//!
//! Sewn shapes shrink along the stitch direction as thread tension pulls the
//! fabric together. Compensation counteracts this by buffering the outline
//! before any stitches are generated.

use crate::engine::geometry;
use geo::Polygon;
use log::warn;

/// Buffer a polygon by the given amount (0.1mm units) with round joins
///
/// Zero is the identity. Positive deltas grow the shape, negative deltas
/// shrink it. If the offset erases the shape, the original polygon is kept
/// so a bad setting cannot drop an object from the design.
pub fn compensate(polygon: &Polygon<f64>, delta_units: f64) -> Polygon<f64> {
    if delta_units == 0.0 {
        return polygon.clone();
    }
    match geometry::offset_polygon(polygon, delta_units) {
        Some(result) => result,
        None => {
            warn!(
                "pull compensation of {:.1} units erased the shape, keeping original outline",
                delta_units
            );
            polygon.clone()
        }
    }
}
