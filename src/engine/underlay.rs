//! Underlay generators
//!
//! Underlay is sewn before the visible fill to stabilize the fabric and lift
//! the top stitches. Edge walk runs just inside the outline; center walk adds
//! an axial pass through the middle of larger shapes.

use crate::engine::geometry::{self, ArcPath};
use geo::Polygon;

/// Running-stitch pass along the inside of the outline
///
/// The polygon is shrunk inward by `inset` units; when the inset splits the
/// shape, the largest piece is walked. Returns `None` when the inset erases
/// the shape or leaves nothing to stitch.
pub fn edge_walk(
    polygon: &Polygon<f64>,
    inset: f64,
    stitch_length: f64,
) -> Option<Vec<(f64, f64)>> {
    let inner = geometry::offset_polygon(polygon, -inset)?;
    let points = geometry::resample_ring(inner.exterior(), stitch_length);
    (points.len() >= 2).then_some(points)
}

/// Short axial pass through the centroid, clipped to the shape
///
/// The chord spans half the bounding-box width, centered on the centroid.
/// Returns `None` when the chord misses the polygon entirely.
pub fn center_walk(polygon: &Polygon<f64>, stitch_length: f64) -> Option<Vec<(f64, f64)>> {
    let (cx, cy) = geometry::centroid(polygon)?;
    let rect = geometry::bounds(polygon)?;
    let quarter = (rect.max().x - rect.min().x) / 4.0;
    if quarter <= 0.0 {
        return None;
    }

    let spans = geometry::clip_scanline(polygon, cy, cx - quarter, cx + quarter);
    let &(x0, x1) = spans.iter().max_by(|a, b| {
        (a.1 - a.0)
            .partial_cmp(&(b.1 - b.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;

    let arc = ArcPath::new(&[(x0, cy), (x1, cy)])?;
    Some(arc.sample_even(stitch_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::polygon_from_path;

    fn square(size: f64) -> Polygon<f64> {
        polygon_from_path(&[[0.0, 0.0], [size, 0.0], [size, size], [0.0, size]]).unwrap()
    }

    #[test]
    fn test_edge_walk_stays_inside() {
        let walk = edge_walk(&square(100.0), 5.0, 20.0).unwrap();
        assert!(walk.len() >= 4);
        for p in &walk {
            assert!(p.0 >= 5.0 - 1e-6 && p.0 <= 95.0 + 1e-6, "x = {}", p.0);
            assert!(p.1 >= 5.0 - 1e-6 && p.1 <= 95.0 + 1e-6, "y = {}", p.1);
        }
    }

    #[test]
    fn test_edge_walk_spacing() {
        let walk = edge_walk(&square(100.0), 5.0, 20.0).unwrap();
        for pair in walk.windows(2) {
            let dx = pair[1].0 - pair[0].0;
            let dy = pair[1].1 - pair[0].1;
            // corners of the ring can bend, but arclength steps stay bounded
            assert!((dx * dx + dy * dy).sqrt() <= 20.0 + 1e-6);
        }
    }

    #[test]
    fn test_edge_walk_erased() {
        assert!(edge_walk(&square(10.0), 20.0, 20.0).is_none());
    }

    #[test]
    fn test_center_walk_crosses_centroid() {
        let walk = center_walk(&square(100.0), 20.0).unwrap();
        assert!(walk.len() >= 2);
        for p in &walk {
            assert!((p.1 - 50.0).abs() < 1e-6);
            assert!(p.0 >= 25.0 - 1e-6 && p.0 <= 75.0 + 1e-6);
        }
    }
}
