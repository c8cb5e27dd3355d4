//! Geometry primitives for the stitch generators
//!
//! Thin wrappers over the `geo`/`geo-buf` backends: ring repair, signed
//! offsets, scanline clipping, oriented bounding boxes, and arclength
//! parameterization. All coordinates are in 0.1mm design units.

use crate::utils::error::{Error, Result};
use geo::{
    Area, BooleanOps, BoundingRect, Centroid, LineString, MinimumRotatedRect, MultiLineString,
    MultiPolygon, Point, Polygon, Rect, Rotate,
};
use geo_buf::buffer_polygon_rounded;

/// Tolerance below which a scanline span is considered degenerate
const SPAN_EPS: f64 = 1e-6;

/// Build a valid polygon from a raw point path
///
/// The ring is closed if needed and normalized through a boolean self-union,
/// which resolves self-intersections the same way a zero-distance buffer
/// would. When normalization splits the input, the largest piece wins.
pub fn polygon_from_path(path: &[[f64; 2]]) -> Result<Polygon<f64>> {
    let mut ring: Vec<(f64, f64)> = path
        .iter()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .map(|p| (p[0], p[1]))
        .collect();

    ring.dedup();
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return Err(Error::InvalidGeometry(format!(
            "path needs at least 3 distinct vertices, got {}",
            ring.len()
        )));
    }
    ring.push(ring[0]);

    let raw = Polygon::new(LineString::from(ring), vec![]);
    let repaired = raw.union(&raw);
    largest_component(repaired)
        .ok_or_else(|| Error::InvalidGeometry("path collapsed during repair".to_string()))
}

/// Largest polygon of a multi-polygon by area, `None` when empty
pub fn largest_component(mp: MultiPolygon<f64>) -> Option<Polygon<f64>> {
    mp.0.into_iter()
        .filter(|p| p.unsigned_area() > SPAN_EPS)
        .max_by(|a, b| {
            a.unsigned_area()
                .partial_cmp(&b.unsigned_area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Signed round-join offset: positive grows, negative shrinks
///
/// Returns the largest resulting piece, or `None` when the offset erased
/// the shape entirely.
pub fn offset_polygon(polygon: &Polygon<f64>, delta: f64) -> Option<Polygon<f64>> {
    largest_component(buffer_polygon_rounded(polygon, delta))
}

/// Rotate a polygon around the origin, angle in degrees (counterclockwise)
pub fn rotate_about_origin(polygon: &Polygon<f64>, degrees: f64) -> Polygon<f64> {
    polygon.rotate_around_point(degrees, Point::new(0.0, 0.0))
}

/// Rotate a point around the origin, angle in degrees (counterclockwise)
pub fn rotate_point(point: (f64, f64), degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    (
        point.0 * cos - point.1 * sin,
        point.0 * sin + point.1 * cos,
    )
}

/// Axis-aligned bounding rect, `None` for degenerate geometry
pub fn bounds(polygon: &Polygon<f64>) -> Option<Rect<f64>> {
    polygon.bounding_rect()
}

/// Intersect the horizontal line at `y` with a polygon
///
/// Returns `(x_start, x_end)` spans sorted left to right. Touching spans
/// (split at a polygon vertex by the clipper) are merged back together.
pub fn clip_scanline(polygon: &Polygon<f64>, y: f64, x_min: f64, x_max: f64) -> Vec<(f64, f64)> {
    let line = LineString::from(vec![(x_min, y), (x_max, y)]);
    let clipped = polygon.clip(&MultiLineString::new(vec![line]), false);
    merge_spans(extract_spans(&clipped, |c| c.x))
}

/// Intersect the vertical line at `x` with a polygon
///
/// Returns `(y_start, y_end)` spans sorted bottom to top.
pub fn clip_rung(polygon: &Polygon<f64>, x: f64, y_min: f64, y_max: f64) -> Vec<(f64, f64)> {
    let line = LineString::from(vec![(x, y_min), (x, y_max)]);
    let clipped = polygon.clip(&MultiLineString::new(vec![line]), false);
    merge_spans(extract_spans(&clipped, |c| c.y))
}

fn extract_spans<F>(clipped: &MultiLineString<f64>, axis: F) -> Vec<(f64, f64)>
where
    F: Fn(&geo::Coord<f64>) -> f64,
{
    clipped
        .0
        .iter()
        .filter_map(|ls| {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for c in ls.coords() {
                let v = axis(c);
                lo = lo.min(v);
                hi = hi.max(v);
            }
            (hi - lo > SPAN_EPS).then_some((lo, hi))
        })
        .collect()
}

fn merge_spans(mut spans: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.0 - last.1 <= SPAN_EPS => last.1 = last.1.max(span.1),
            _ => merged.push(span),
        }
    }
    merged
}

/// Angle (degrees) of the long axis of the minimum rotated rectangle
///
/// The satin polygon generator aligns this axis with X before cutting rungs.
pub fn spine_angle(polygon: &Polygon<f64>) -> Option<f64> {
    let obb = polygon.minimum_rotated_rect()?;
    let corners: Vec<_> = obb.exterior().coords().copied().collect();
    if corners.len() < 4 {
        return None;
    }
    let edge = |a: usize, b: usize| {
        let dx = corners[b].x - corners[a].x;
        let dy = corners[b].y - corners[a].y;
        (dx, dy, (dx * dx + dy * dy).sqrt())
    };
    let (dx0, dy0, len0) = edge(0, 1);
    let (dx1, dy1, len1) = edge(1, 2);
    let (dx, dy) = if len0 >= len1 { (dx0, dy0) } else { (dx1, dy1) };
    Some(dy.atan2(dx).to_degrees())
}

/// Centroid of a polygon
pub fn centroid(polygon: &Polygon<f64>) -> Option<(f64, f64)> {
    polygon.centroid().map(|p| (p.x(), p.y()))
}

/// A polyline parameterized by cumulative arclength
#[derive(Debug, Clone)]
pub struct ArcPath {
    points: Vec<(f64, f64)>,
    cumulative: Vec<f64>,
}

impl ArcPath {
    /// Build from raw points; `None` when fewer than 2 finite points remain
    pub fn new(points: &[(f64, f64)]) -> Option<Self> {
        let pts: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.0.is_finite() && p.1.is_finite())
            .copied()
            .collect();
        if pts.len() < 2 {
            return None;
        }
        let mut cumulative = Vec::with_capacity(pts.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in pts.windows(2) {
            let dx = pair[1].0 - pair[0].0;
            let dy = pair[1].1 - pair[0].1;
            total += (dx * dx + dy * dy).sqrt();
            cumulative.push(total);
        }
        Some(Self {
            points: pts,
            cumulative,
        })
    }

    /// Build from a geo line string
    pub fn from_line_string(ls: &LineString<f64>) -> Option<Self> {
        let pts: Vec<(f64, f64)> = ls.coords().map(|c| (c.x, c.y)).collect();
        Self::new(&pts)
    }

    /// Total arclength
    pub fn length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Point at the given arclength distance (clamped to the path)
    pub fn point_at(&self, distance: f64) -> (f64, f64) {
        let total = self.length();
        let d = distance.clamp(0.0, total);
        // index of first cumulative value >= d
        let idx = self.cumulative.partition_point(|&c| c < d);
        if idx == 0 {
            return self.points[0];
        }
        let (prev_d, next_d) = (self.cumulative[idx - 1], self.cumulative[idx]);
        let seg = next_d - prev_d;
        if seg <= 0.0 {
            return self.points[idx];
        }
        let t = (d - prev_d) / seg;
        let (ax, ay) = self.points[idx - 1];
        let (bx, by) = self.points[idx];
        (ax + (bx - ax) * t, ay + (by - ay) * t)
    }

    /// Evenly spaced samples with spacing at most `max_step`
    ///
    /// Both endpoints are always included.
    pub fn sample_even(&self, max_step: f64) -> Vec<(f64, f64)> {
        let total = self.length();
        if max_step <= 0.0 {
            return vec![self.points[0], *self.points.last().unwrap()];
        }
        let segments = ((total / max_step).ceil() as usize).max(1);
        (0..=segments)
            .map(|i| self.point_at(total * i as f64 / segments as f64))
            .collect()
    }
}

/// Resample a closed ring at roughly equal arclength steps
///
/// When the ring is too short for 3 samples at the requested step, its raw
/// vertices are returned instead.
pub fn resample_ring(ring: &LineString<f64>, step: f64) -> Vec<(f64, f64)> {
    let raw: Vec<(f64, f64)> = ring.coords().map(|c| (c.x, c.y)).collect();
    let Some(arc) = ArcPath::new(&raw) else {
        return raw;
    };
    if step <= 0.0 || ((arc.length() / step) as usize) < 3 {
        return raw;
    }
    arc.sample_even(step)
}
