//! Embroidery pattern structure
//!
//! `EmbPattern` is the single mutable accumulator of the pipeline: the
//! assembler owns one per request, fills it with commands, and hands it to a
//! format writer for serialization. It stores stitches, threads, and metadata.

use crate::core::command::Command;
use crate::core::thread::EmbThread;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single pattern entry: position plus machine command
///
/// Coordinates are absolute, in 0.1mm units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stitch {
    /// X coordinate (0.1mm units)
    pub x: f64,
    /// Y coordinate (0.1mm units)
    pub y: f64,
    /// Machine command
    pub command: Command,
}

impl Stitch {
    /// Create a new stitch
    pub const fn new(x: f64, y: f64, command: Command) -> Self {
        Self { x, y, command }
    }

    /// Euclidean distance to another stitch
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// False if either coordinate is NaN or infinite
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Stitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stitch({:.2}, {:.2}, {})", self.x, self.y, self.command)
    }
}

/// Thread consumption estimate for a finished pattern
///
/// Top thread gets 5% slack for take-up and tie-offs; bobbin consumption is
/// assumed to be 70% of the top thread path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreadStats {
    /// Summed distance between consecutive needle-down points, in mm
    pub total_stitch_mm: f64,
    /// Estimated top thread consumption in meters
    pub top_thread_m: f64,
    /// Estimated bobbin thread consumption in meters
    pub bobbin_thread_m: f64,
    /// Number of needle penetrations
    pub stitch_count: usize,
    /// Number of thread trims
    pub trim_count: usize,
    /// Number of color changes
    pub color_change_count: usize,
}

/// Main embroidery pattern structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbPattern {
    /// Ordered command stream
    stitches: Vec<Stitch>,

    /// Threads, one per color block, in sew order
    thread_list: Vec<EmbThread>,

    /// Additional metadata (name, date, author)
    extras: HashMap<String, String>,
}

impl EmbPattern {
    /// Create a new empty pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to stitches
    pub fn stitches(&self) -> &[Stitch] {
        &self.stitches
    }

    /// Get reference to thread list
    pub fn threads(&self) -> &[EmbThread] {
        &self.thread_list
    }

    /// Position of the most recent command, or the origin for an empty pattern
    pub fn position(&self) -> (f64, f64) {
        self.stitches.last().map_or((0.0, 0.0), |s| (s.x, s.y))
    }

    /// Append a command at an absolute position
    pub fn add(&mut self, command: Command, x: f64, y: f64) {
        self.stitches.push(Stitch::new(x, y, command));
    }

    /// Append a needle-down stitch
    pub fn stitch_abs(&mut self, x: f64, y: f64) {
        self.add(Command::Stitch, x, y);
    }

    /// Append a jump
    pub fn jump_abs(&mut self, x: f64, y: f64) {
        self.add(Command::Jump, x, y);
    }

    /// Append a trim at the current position
    pub fn trim(&mut self) {
        let (x, y) = self.position();
        self.add(Command::Trim, x, y);
    }

    /// Append a color change at the current position
    pub fn color_change(&mut self) {
        let (x, y) = self.position();
        self.add(Command::ColorChange, x, y);
    }

    /// Append the end-of-pattern marker
    pub fn end(&mut self) {
        let (x, y) = self.position();
        self.add(Command::End, x, y);
    }

    /// Add a thread to the pattern
    pub fn add_thread(&mut self, thread: EmbThread) {
        self.thread_list.push(thread);
    }

    /// Set metadata value
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.insert(key.into(), value.into());
    }

    /// Get metadata value
    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.extras.get(key)
    }

    /// Iterate over all metadata entries
    pub fn metadata(&self) -> impl Iterator<Item = (&String, &String)> {
        self.extras.iter()
    }

    /// Calculate pattern bounds
    ///
    /// Returns (min_x, min_y, max_x, max_y), or all zeros for an empty or
    /// entirely non-finite pattern.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for stitch in &self.stitches {
            if !stitch.is_valid() {
                continue;
            }
            min_x = min_x.min(stitch.x);
            max_x = max_x.max(stitch.x);
            min_y = min_y.min(stitch.y);
            max_y = max_y.max(stitch.y);
        }

        if !min_x.is_finite() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        (min_x, min_y, max_x, max_y)
    }

    /// Pattern width in 0.1mm units
    #[inline]
    pub fn width(&self) -> f64 {
        let (min_x, _, max_x, _) = self.bounds();
        max_x - min_x
    }

    /// Pattern height in 0.1mm units
    #[inline]
    pub fn height(&self) -> f64 {
        let (_, min_y, _, max_y) = self.bounds();
        max_y - min_y
    }

    /// Translate every command by the given offset
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        for stitch in &mut self.stitches {
            stitch.x += dx;
            stitch.y += dy;
        }
    }

    /// Move the pattern center to the origin
    pub fn move_center_to_origin(&mut self) {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        let cx = ((max_x + min_x) / 2.0).round();
        let cy = ((max_y + min_y) / 2.0).round();
        self.translate(-cx, -cy);
    }

    /// Count the number of needle-down stitches
    pub fn count_stitches(&self) -> usize {
        self.count_command(Command::Stitch)
    }

    /// Count the number of jumps
    pub fn count_jumps(&self) -> usize {
        self.count_command(Command::Jump)
    }

    /// Count the number of trims
    pub fn count_trims(&self) -> usize {
        self.count_command(Command::Trim)
    }

    /// Count the number of color changes
    pub fn count_color_changes(&self) -> usize {
        self.count_command(Command::ColorChange)
    }

    fn count_command(&self, command: Command) -> usize {
        self.stitches
            .iter()
            .filter(|s| s.command == command)
            .count()
    }

    /// Total sewn thread path in 0.1mm units
    ///
    /// Sums the distance between consecutive `Stitch` commands. Jumps and
    /// trims between two stitches do not reset the chain: the thread still
    /// spans from the last needle-down point to the next one.
    pub fn total_stitch_length(&self) -> f64 {
        let mut total = 0.0;
        let mut prev: Option<&Stitch> = None;
        for stitch in &self.stitches {
            if stitch.command.is_stitch() {
                if let Some(p) = prev {
                    total += stitch.distance_to(p);
                }
                prev = Some(stitch);
            }
        }
        total
    }

    /// Estimate thread consumption for the pattern
    pub fn thread_estimate(&self) -> ThreadStats {
        let total_stitch_mm = self.total_stitch_length() / 10.0;
        ThreadStats {
            total_stitch_mm,
            top_thread_m: total_stitch_mm * 1.05 / 1000.0,
            bobbin_thread_m: total_stitch_mm * 0.70 / 1000.0,
            stitch_count: self.count_stitches(),
            trim_count: self.count_trims(),
            color_change_count: self.count_color_changes(),
        }
    }
}
