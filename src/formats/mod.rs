//! Stitch file output
//!
//! Format selection and dispatch for the supported machine formats. Before a
//! writer runs, the pattern is passed through a limits pass that splits any
//! movement exceeding the format's per-record range into a chain of shorter
//! moves.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::utils::error::{Error, Result};
use std::io::{Cursor, Seek, Write};
use std::str::FromStr;

/// File format I/O
pub mod io;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFormat {
    /// Tajima DST
    Dst,
    /// Brother PES (version 1, embedded PEC)
    Pes,
    /// Janome JEF
    Jef,
    /// Melco EXP
    Exp,
}

impl PatternFormat {
    /// Parse a wire format tag, case-insensitively
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "dst" => Ok(PatternFormat::Dst),
            "pes" => Ok(PatternFormat::Pes),
            "jef" => Ok(PatternFormat::Jef),
            "exp" => Ok(PatternFormat::Exp),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            PatternFormat::Dst => "dst",
            PatternFormat::Pes => "pes",
            PatternFormat::Jef => "jef",
            PatternFormat::Exp => "exp",
        }
    }

    /// Largest per-record movement the format can encode, in 0.1mm units
    pub fn max_delta(&self) -> f64 {
        match self {
            PatternFormat::Dst => 121.0,
            PatternFormat::Pes | PatternFormat::Jef | PatternFormat::Exp => 127.0,
        }
    }

    /// All supported formats
    pub fn all() -> &'static [PatternFormat] {
        &[
            PatternFormat::Dst,
            PatternFormat::Pes,
            PatternFormat::Jef,
            PatternFormat::Exp,
        ]
    }
}

impl FromStr for PatternFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PatternFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Split stitches and jumps longer than `max_delta` into equal sub-moves
///
/// Every format encodes movements as small signed deltas; a long jump between
/// distant objects must become a chain of records. Other commands pass
/// through untouched.
fn split_long_deltas(pattern: &EmbPattern, max_delta: f64) -> EmbPattern {
    let mut constrained = EmbPattern::new();
    for thread in pattern.threads() {
        constrained.add_thread(thread.clone());
    }
    for (key, value) in pattern.metadata() {
        constrained.set_metadata(key.as_str(), value.as_str());
    }

    let mut prev = (0.0, 0.0);
    for stitch in pattern.stitches() {
        let splittable = matches!(stitch.command, Command::Stitch | Command::Jump);
        let dx = stitch.x - prev.0;
        let dy = stitch.y - prev.1;
        let length = (dx * dx + dy * dy).sqrt();

        if splittable && length > max_delta && length.is_finite() {
            let steps = (length / max_delta).ceil() as usize;
            for i in 1..=steps {
                let t = i as f64 / steps as f64;
                constrained.add(stitch.command, prev.0 + dx * t, prev.1 + dy * t);
            }
        } else {
            constrained.add(stitch.command, stitch.x, stitch.y);
        }
        prev = (stitch.x, stitch.y);
    }

    constrained
}

/// Encode a pattern into the given format
///
/// The writer needs `Seek` because PES back-patches section offsets.
pub fn write_pattern<W: Write + Seek>(
    pattern: &EmbPattern,
    format: PatternFormat,
    writer: &mut W,
) -> Result<()> {
    // one unit of headroom: integer rounding in the writers can lengthen a
    // maximal segment by a unit
    let constrained = split_long_deltas(pattern, format.max_delta() - 1.0);
    match format {
        PatternFormat::Dst => io::writers::dst::write(writer, &constrained),
        PatternFormat::Pes => io::writers::pes::write(writer, &constrained),
        PatternFormat::Jef => {
            // a caller-provided date keeps output deterministic; the CLI
            // stamps the real time into the metadata
            let date = constrained
                .get_metadata("date")
                .cloned()
                .unwrap_or_else(|| "20250101000000".to_string());
            io::writers::jef::write(writer, &constrained, &date)
        }
        PatternFormat::Exp => io::writers::exp::write(writer, &constrained),
    }
}

/// Encode a pattern into an in-memory byte buffer
pub fn write_to_bytes(pattern: &EmbPattern, format: PatternFormat) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_pattern(pattern, format, &mut cursor)?;
    Ok(cursor.into_inner())
}
