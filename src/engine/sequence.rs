//! Object sequencing
//!
//! Orders generated stitch objects to minimize travel: objects are grouped by
//! thread color (first-appearance order) and each group is toured greedily by
//! nearest neighbor. Short hops between objects are bridged with hidden
//! running-stitch connectors; longer hops get a trim annotation that the
//! assembler turns into Trim + Jump.

use crate::core::thread::EmbThread;

/// One generated object: a thread color plus ordered stitch sub-paths
///
/// Sub-paths (underlay pass, fill, boundary rings) always stay together and
/// in order; only whole objects are reordered.
#[derive(Debug, Clone)]
pub struct StitchObject {
    /// Thread for this object
    pub thread: EmbThread,
    /// Ordered stitch point lists, in 0.1mm units
    pub sub_paths: Vec<Vec<(f64, f64)>>,
    /// Set by the sequencer: cut the thread before jumping here
    pub trim_before: bool,
}

impl StitchObject {
    /// Create a new object; empty sub-paths are dropped
    pub fn new(thread: EmbThread, sub_paths: Vec<Vec<(f64, f64)>>) -> Self {
        Self {
            thread,
            sub_paths: sub_paths.into_iter().filter(|p| !p.is_empty()).collect(),
            trim_before: false,
        }
    }

    /// First needle point of the object
    pub fn first_point(&self) -> Option<(f64, f64)> {
        self.sub_paths.first().and_then(|p| p.first()).copied()
    }

    /// Last needle point of the object
    pub fn last_point(&self) -> Option<(f64, f64)> {
        self.sub_paths.last().and_then(|p| p.last()).copied()
    }

    /// True when the object has nothing to stitch
    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }
}

/// A same-color block of sequenced objects
#[derive(Debug, Clone)]
pub struct ColorRun {
    /// Thread for the whole block
    pub thread: EmbThread,
    /// Objects in sew order
    pub objects: Vec<StitchObject>,
}

/// Group by color and tour each group by nearest neighbor
///
/// * `short_jump` - gaps below this (0.1mm units) are bridged with a
///   connector instead of a trim
/// * `connector_step` - spacing of the injected connector stitches
///
/// Connector points are prepended to the following object as a new leading
/// sub-path, so they sew in that object's color. Ties are broken toward the
/// lowest input index, which keeps the ordering deterministic.
pub fn plan(
    objects: Vec<StitchObject>,
    short_jump: f64,
    connector_step: f64,
) -> Vec<ColorRun> {
    let mut groups: Vec<(u32, Vec<StitchObject>)> = Vec::new();
    for object in objects {
        if object.is_empty() {
            continue;
        }
        let color = object.thread.color;
        match groups.iter_mut().find(|(c, _)| *c == color) {
            Some((_, members)) => members.push(object),
            None => groups.push((color, vec![object])),
        }
    }

    groups
        .into_iter()
        .map(|(_, members)| {
            let thread = members[0].thread.clone();
            let objects = tour_group(members, short_jump, connector_step);
            ColorRun { thread, objects }
        })
        .collect()
}

fn tour_group(
    mut remaining: Vec<StitchObject>,
    short_jump: f64,
    connector_step: f64,
) -> Vec<StitchObject> {
    let mut ordered = vec![remaining.remove(0)];

    while !remaining.is_empty() {
        let cursor = ordered
            .last()
            .and_then(|o| o.last_point())
            .unwrap_or((0.0, 0.0));

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let start = candidate.first_point().unwrap_or((0.0, 0.0));
            let d = distance(cursor, start);
            if d < best_distance {
                best_distance = d;
                best = i;
            }
        }

        let mut next = remaining.remove(best);
        let start = next.first_point().unwrap_or((0.0, 0.0));
        if best_distance < short_jump {
            let connector = connector_points(cursor, start, connector_step);
            if !connector.is_empty() {
                next.sub_paths.insert(0, connector);
            }
        } else {
            next.trim_before = true;
        }
        ordered.push(next);
    }

    ordered
}

/// Straight running-stitch points strictly between two positions
///
/// Always yields at least one point for a nonzero gap; spacing stays below
/// `step`.
pub fn connector_points(from: (f64, f64), to: (f64, f64), step: f64) -> Vec<(f64, f64)> {
    let gap = distance(from, to);
    if gap <= 0.0 || step <= 0.0 {
        return Vec::new();
    }
    let count = (gap / step).floor() as usize + 1;
    let (vx, vy) = (to.0 - from.0, to.1 - from.1);
    (1..=count)
        .map(|s| {
            let t = s as f64 / (count + 1) as f64;
            (from.0 + vx * t, from.1 + vy * t)
        })
        .collect()
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(color: u32, points: Vec<(f64, f64)>) -> StitchObject {
        StitchObject::new(EmbThread::new(color), vec![points])
    }

    #[test]
    fn test_groups_preserve_first_appearance() {
        let objects = vec![
            object(0xFF0000, vec![(0.0, 0.0), (10.0, 0.0)]),
            object(0x00FF00, vec![(500.0, 0.0), (510.0, 0.0)]),
            object(0xFF0000, vec![(1000.0, 0.0), (1010.0, 0.0)]),
        ];
        let runs = plan(objects, 20.0, 30.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].thread.color, 0xFF0000);
        assert_eq!(runs[0].objects.len(), 2);
        assert_eq!(runs[1].thread.color, 0x00FF00);
    }

    #[test]
    fn test_nearest_neighbor_order() {
        let objects = vec![
            object(0xFF0000, vec![(0.0, 0.0), (10.0, 0.0)]),
            object(0xFF0000, vec![(900.0, 0.0), (910.0, 0.0)]),
            object(0xFF0000, vec![(100.0, 0.0), (110.0, 0.0)]),
        ];
        let runs = plan(objects, 20.0, 30.0);
        let starts: Vec<f64> = runs[0]
            .objects
            .iter()
            .map(|o| o.first_point().unwrap().0)
            .collect();
        // nearest-first tour: 0 -> 100 -> 900 (connector may prepend a point)
        assert!(starts[1] < 200.0);
        assert!(runs[0].objects[2].last_point().unwrap().0 >= 900.0);
    }

    #[test]
    fn test_close_objects_get_connector() {
        let objects = vec![
            object(0xFF0000, vec![(0.0, 0.0), (10.0, 0.0)]),
            object(0xFF0000, vec![(25.0, 0.0), (40.0, 0.0)]), // 15 units away
        ];
        let runs = plan(objects, 20.0, 30.0);
        let second = &runs[0].objects[1];
        assert!(!second.trim_before);
        assert_eq!(second.sub_paths.len(), 2);
        // injected connector lies strictly between the two objects
        for p in &second.sub_paths[0] {
            assert!(p.0 > 10.0 && p.0 < 25.0);
        }
    }

    #[test]
    fn test_distant_objects_get_trim() {
        let objects = vec![
            object(0xFF0000, vec![(0.0, 0.0), (10.0, 0.0)]),
            object(0xFF0000, vec![(510.0, 0.0), (520.0, 0.0)]), // 50mm away
        ];
        let runs = plan(objects, 20.0, 30.0);
        assert!(runs[0].objects[1].trim_before);
        assert_eq!(runs[0].objects[1].sub_paths.len(), 1);
    }

    #[test]
    fn test_connector_point_counts() {
        // 10-unit gap at 30-unit spacing: one midpoint
        let points = connector_points((0.0, 0.0), (10.0, 0.0), 30.0);
        assert_eq!(points, vec![(5.0, 0.0)]);

        // 100-unit gap: 4 points at 20-unit spacing
        let points = connector_points((0.0, 0.0), (100.0, 0.0), 30.0);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], (20.0, 0.0));
        assert_eq!(points[3], (80.0, 0.0));
    }

    #[test]
    fn test_empty_objects_dropped() {
        let objects = vec![
            StitchObject::new(EmbThread::new(0xFF0000), vec![Vec::new()]),
            object(0xFF0000, vec![(0.0, 0.0), (10.0, 0.0)]),
        ];
        let runs = plan(objects, 20.0, 30.0);
        assert_eq!(runs[0].objects.len(), 1);
    }
}
