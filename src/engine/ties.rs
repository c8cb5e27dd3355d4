//! Tie-in and tie-out lock stitches
//!
//! Micro back-and-forth stitches at the start and end of a thread run keep it
//! from unraveling after trims. The lock is a triple over a 0.5mm step along
//! the path direction, so a tied list grows by exactly 3 points per end.

/// Which ends of a stitch run receive lock stitches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieMode {
    /// Lock the start only
    In,
    /// Lock the end only
    Out,
    /// Lock both ends
    Both,
}

/// Wrap a stitch list with lock stitches
///
/// Tie-in inserts `(A0 + d*len, A0, A0 + d*len)` right after the first point
/// (the first needle-down stays at A0); tie-out appends the mirrored triple
/// after the last point, stepping back along the final direction. Lists with
/// fewer than 2 points are returned unchanged, as are ends with zero-length
/// leading/trailing segments.
pub fn tie_wrap(points: Vec<(f64, f64)>, mode: TieMode, length: f64) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return points;
    }
    let mut result = points;

    if matches!(mode, TieMode::In | TieMode::Both) {
        let start = result[0];
        if let Some(dir) = unit_direction(start, result[1]) {
            let lock = (start.0 + dir.0 * length, start.1 + dir.1 * length);
            result.splice(1..1, [lock, start, lock]);
        }
    }

    if matches!(mode, TieMode::Out | TieMode::Both) {
        let end = result[result.len() - 1];
        let prev = result[result.len() - 2];
        if let Some(dir) = unit_direction(prev, end) {
            let lock = (end.0 - dir.0 * length, end.1 - dir.1 * length);
            result.extend([lock, end, lock]);
        }
    }

    result
}

fn unit_direction(from: (f64, f64), to: (f64, f64)) -> Option<(f64, f64)> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let norm = (dx * dx + dy * dy).sqrt();
    (norm > 0.0).then(|| (dx / norm, dy / norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_both_adds_six() {
        let points = vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)];
        let tied = tie_wrap(points.clone(), TieMode::Both, 5.0);
        assert_eq!(tied.len(), points.len() + 6);
    }

    #[test]
    fn test_tie_in_keeps_first_point() {
        let tied = tie_wrap(vec![(0.0, 0.0), (100.0, 0.0)], TieMode::In, 5.0);
        assert_eq!(tied[0], (0.0, 0.0));
        assert_eq!(tied[1], (5.0, 0.0));
        assert_eq!(tied[2], (0.0, 0.0));
        assert_eq!(tied[3], (5.0, 0.0));
        assert_eq!(tied[4], (100.0, 0.0));
    }

    #[test]
    fn test_tie_out_steps_back() {
        let tied = tie_wrap(vec![(0.0, 0.0), (100.0, 0.0)], TieMode::Out, 5.0);
        assert_eq!(tied.len(), 5);
        assert_eq!(tied[2], (95.0, 0.0));
        assert_eq!(tied[3], (100.0, 0.0));
        assert_eq!(tied[4], (95.0, 0.0));
    }

    #[test]
    fn test_tie_short_list_unchanged() {
        assert_eq!(tie_wrap(vec![(1.0, 2.0)], TieMode::Both, 5.0).len(), 1);
        assert!(tie_wrap(Vec::new(), TieMode::Both, 5.0).is_empty());
    }

    #[test]
    fn test_tie_zero_length_segment_skipped() {
        // duplicated start point: no usable direction for the tie-in
        let tied = tie_wrap(
            vec![(0.0, 0.0), (0.0, 0.0), (10.0, 0.0)],
            TieMode::In,
            5.0,
        );
        assert_eq!(tied.len(), 3);
    }
}
