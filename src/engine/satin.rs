//! Satin column generators
//!
//! Two input modes. A closed columnar polygon is cut into rungs perpendicular
//! to its oriented-bounding-box spine. An open polyline becomes a ribbon of
//! alternating left/right penetrations around the centerline, with
//! short-stitch relief on sharp curves.

use crate::engine::geometry::{self, ArcPath};
use geo::Polygon;

/// Margin beyond the bounding box when cutting rungs, in 0.1mm
const RUNG_MARGIN: f64 = 10.0;

/// Half-step used for the central-difference tangent, in 0.1mm (0.1mm = 1 unit)
const TANGENT_STEP: f64 = 1.0;

/// Normal divergence above which a sample counts as a sharp turn, degrees
const SHARP_TURN_DEG: f64 = 45.0;

/// Width retained on the congested side of a sharp turn
const SHORT_STITCH_FACTOR: f64 = 0.70;

/// Satin fill for a columnar polygon
///
/// The polygon is rotated so the long axis of its minimum rotated rectangle
/// lies on X, then cut into vertical rungs every `density` units. Where a
/// rung crosses the shape more than once, the longest crossing wins. Rungs
/// alternate bottom-to-top / top-to-bottom so the thread zig-zags.
pub fn satin_polygon(polygon: &Polygon<f64>, density: f64) -> Vec<(f64, f64)> {
    if density <= 0.0 {
        return Vec::new();
    }
    let angle = geometry::spine_angle(polygon).unwrap_or(0.0);
    let rotated = geometry::rotate_about_origin(polygon, -angle);
    let Some(rect) = geometry::bounds(&rotated) else {
        return Vec::new();
    };
    let (min, max) = (rect.min(), rect.max());

    let mut stitches = Vec::new();
    let mut upward = true;
    let mut rung = 0usize;
    loop {
        let x = min.x + rung as f64 * density;
        if x > max.x + 1e-9 {
            break;
        }
        rung += 1;

        // rungs on the exact left/right edge are nudged inward so the
        // clipper's boundary handling cannot drop them
        let scan_x = x.max(min.x + 1e-6).min(max.x - 1e-6);
        let spans = geometry::clip_rung(&rotated, scan_x, min.y - RUNG_MARGIN, max.y + RUNG_MARGIN);
        let Some(&(y0, y1)) = spans.iter().max_by(|a, b| {
            (a.1 - a.0)
                .partial_cmp(&(b.1 - b.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            continue;
        };

        if upward {
            stitches.push((x, y0));
            stitches.push((x, y1));
        } else {
            stitches.push((x, y1));
            stitches.push((x, y0));
        }
        upward = !upward;
    }

    stitches
        .into_iter()
        .map(|p| geometry::rotate_point(p, angle))
        .collect()
}

/// Satin ribbon along an open polyline
///
/// Samples the centerline every `density` units of arclength and places the
/// needle alternately at `+width/2` and `-width/2` along the local normal
/// (central-difference tangent over +-0.1mm). When `short_stitches` is on and
/// the normal swings more than 45 degrees between samples, odd samples keep
/// only 70% of the half-width, relieving thread congestion on the inside of
/// the curve.
pub fn satin_ribbon(
    path: &[(f64, f64)],
    width: f64,
    density: f64,
    short_stitches: bool,
) -> Vec<(f64, f64)> {
    if density <= 0.0 || width <= 0.0 {
        return Vec::new();
    }
    let Some(arc) = ArcPath::new(path) else {
        return Vec::new();
    };
    let length = arc.length();
    if length <= 0.0 {
        return Vec::new();
    }

    let steps = (length / density).floor() as usize;
    let mut stitches = Vec::with_capacity(steps + 1);
    let mut prev_normal: Option<(f64, f64)> = None;

    for i in 0..=steps {
        let distance = (i as f64 * density).min(length);
        let (px, py) = arc.point_at(distance);

        let (ax, ay) = arc.point_at((distance - TANGENT_STEP).max(0.0));
        let (bx, by) = arc.point_at((distance + TANGENT_STEP).min(length));
        let (dx, dy) = (bx - ax, by - ay);
        let norm = (dx * dx + dy * dy).sqrt();
        let normal = if norm == 0.0 {
            (0.0, 0.0)
        } else {
            (-dy / norm, dx / norm)
        };

        let mut sharp = false;
        if short_stitches {
            if let Some((pnx, pny)) = prev_normal {
                let dot = (pnx * normal.0 + pny * normal.1).clamp(-1.0, 1.0);
                sharp = dot.acos().to_degrees() > SHARP_TURN_DEG;
            }
        }
        prev_normal = Some(normal);

        let factor = if sharp && i % 2 == 1 {
            SHORT_STITCH_FACTOR
        } else {
            1.0
        };
        let half = width * factor / 2.0;

        if i % 2 == 0 {
            stitches.push((px + normal.0 * half, py + normal.1 * half));
        } else {
            stitches.push((px - normal.0 * half, py - normal.1 * half));
        }
    }

    stitches
}
