//! Brother PES format writer
//!
//! Writes PES version 1: the `#PES0001` signature, a pointer to the PEC
//! section, the CEmbOne/CSewSeg geometry blocks used by editing software,
//! and the embedded PEC section the machines sew from.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::formats::io::utils::WriteHelper;
use crate::formats::io::writers::pec;
use crate::utils::error::Result;
use std::io::{Seek, Write};

/// PES version 1 file signature
pub const PES_VERSION_1_SIGNATURE: &str = "#PES0001";

const EMB_ONE: &str = "CEmbOne";
const EMB_SEG: &str = "CSewSeg";

/// Stitch segment flag
const SEG_STITCH: i16 = 0;
/// Jump segment flag
const SEG_JUMP: i16 = 1;
/// Section continuation marker
const SEG_MORE: i16 = -32765; // 0x8003

/// Write a PES v1 embroidery file
pub fn write<W: Write + Seek>(writer: &mut W, pattern: &EmbPattern) -> Result<()> {
    let mut w = WriteHelper::new(writer);

    w.write_string(PES_VERSION_1_SIGNATURE)?;

    let (min_x, min_y, max_x, max_y) = pattern.bounds();
    let cx = (max_x + min_x) / 2.0;
    let cy = (max_y + min_y) / 2.0;

    let pec_pointer_at = w.bytes_written();
    w.write_i32_le(0)?; // patched once the geometry blocks are written

    let has_stitches = !pattern.stitches().is_empty();
    // scale-to-fit, hoop selector, block count
    w.write_i16_le(0x01)?;
    w.write_i16_le(0x01)?;
    w.write_i16_le(if has_stitches { 1 } else { 0 })?;

    if has_stitches {
        w.write_i16_le(-1)?;
        w.write_i16_le(0x0000)?;
        write_geometry_blocks(&mut w, pattern, (min_x, min_y, max_x, max_y), cx, cy)?;
    } else {
        w.write_i16_le(0x0000)?;
        w.write_i16_le(0x0000)?;
    }

    let pec_start = w.bytes_written();
    w.patch_i32_le(pec_pointer_at as u64, pec_start as i32)?;

    pec::write_pec_section(w.inner_mut(), pattern)?;
    Ok(())
}

fn write_pes_string_16<W: Write>(w: &mut WriteHelper<W>, s: &str) -> Result<()> {
    w.write_i16_le(s.len() as i16)?;
    w.write_string(s)?;
    Ok(())
}

fn write_geometry_blocks<W: Write + Seek>(
    w: &mut WriteHelper<W>,
    pattern: &EmbPattern,
    bounds: (f64, f64, f64, f64),
    cx: f64,
    cy: f64,
) -> Result<()> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let left = min_x - cx;
    let top = min_y - cy;
    let right = max_x - cx;
    let bottom = max_y - cy;

    write_pes_string_16(w, EMB_ONE)?;
    let sections_at = write_emb_one_header(w, right - left, bottom - top)?;
    w.write_i16_le(-1)?;
    w.write_i16_le(0x0000)?;

    write_pes_string_16(w, EMB_SEG)?;
    let sections = write_sew_segments(w, pattern, left + cx, bottom + cy)?;
    w.patch_i16_le(sections_at as u64, sections as i16)?;

    w.write_i16_le(0x0000)?;
    w.write_i16_le(0x0000)?;
    Ok(())
}

/// CEmbOne header: bounds, affine placement transform, extents. Returns the
/// position of the section-count placeholder.
fn write_emb_one_header<W: Write>(
    w: &mut WriteHelper<W>,
    width: f64,
    height: f64,
) -> Result<usize> {
    const HOOP_WIDTH: f64 = 1300.0;
    const HOOP_HEIGHT: f64 = 1800.0;

    for _ in 0..8 {
        w.write_i16_le(0)?;
    }

    let trans_x = 350.0 + HOOP_WIDTH / 2.0 - width / 2.0;
    let trans_y = 100.0 + height + HOOP_HEIGHT / 2.0 - height / 2.0;

    w.write_f32_le(1.0)?;
    w.write_f32_le(0.0)?;
    w.write_f32_le(0.0)?;
    w.write_f32_le(1.0)?;
    w.write_f32_le(trans_x as f32)?;
    w.write_f32_le(trans_y as f32)?;

    w.write_i16_le(1)?;
    w.write_i16_le(0)?;
    w.write_i16_le(0)?;
    w.write_i16_le(width as i16)?;
    w.write_i16_le(height as i16)?;
    w.write_bytes(&[0x00; 8])?;

    let placeholder = w.bytes_written();
    w.write_i16_le(0)?;
    Ok(placeholder)
}

/// Consecutive same-kind pattern commands, grouped for segment emission
enum SegKind {
    Stitch(Vec<(f64, f64)>),
    Jump(Vec<(f64, f64)>),
    ColorChange,
}

fn command_blocks(pattern: &EmbPattern) -> Vec<SegKind> {
    let mut blocks: Vec<SegKind> = Vec::new();
    for stitch in pattern.stitches() {
        let point = (stitch.x, stitch.y);
        match stitch.command {
            Command::Stitch => match blocks.last_mut() {
                Some(SegKind::Stitch(points)) => points.push(point),
                _ => blocks.push(SegKind::Stitch(vec![point])),
            },
            Command::Jump => match blocks.last_mut() {
                Some(SegKind::Jump(points)) => points.push(point),
                _ => blocks.push(SegKind::Jump(vec![point])),
            },
            Command::ColorChange => blocks.push(SegKind::ColorChange),
            Command::Trim | Command::End => {}
        }
    }
    blocks
}

/// CSewSeg stitch/jump segment list. Returns the number of sections written.
fn write_sew_segments<W: Write>(
    w: &mut WriteHelper<W>,
    pattern: &EmbPattern,
    adjust_x: f64,
    adjust_y: f64,
) -> Result<usize> {
    let palette = pec::build_palette(pattern);
    let mut color_index: usize = 0;
    let mut color_code = palette.first().copied().unwrap_or(0) as i16;

    let mut section = 0usize;
    let mut colorlog: Vec<(i16, i16)> = Vec::new();
    let mut previous_code = -1i16;
    let mut open = false;
    let mut last_point = (0.0, 0.0);

    for block in command_blocks(pattern) {
        let (flag, points) = match block {
            SegKind::ColorChange => {
                color_index += 1;
                color_code = palette.get(color_index).copied().unwrap_or(0) as i16;
                continue;
            }
            SegKind::Stitch(points) => {
                last_point = *points.last().unwrap_or(&last_point);
                (SEG_STITCH, points)
            }
            SegKind::Jump(points) => {
                // jumps become a two-point segment from the previous position
                let target = *points.last().unwrap_or(&last_point);
                let segment = vec![last_point, target];
                last_point = target;
                (SEG_JUMP, segment)
            }
        };

        if open {
            w.write_i16_le(SEG_MORE)?;
        }
        open = true;

        if previous_code != color_code {
            colorlog.push((section as i16, color_code));
            previous_code = color_code;
        }

        w.write_i16_le(flag)?;
        w.write_i16_le(color_code)?;
        w.write_i16_le(points.len() as i16)?;
        for (x, y) in points {
            w.write_i16_le((x - adjust_x) as i16)?;
            w.write_i16_le((y - adjust_y) as i16)?;
        }
        section += 1;
    }

    w.write_i16_le(colorlog.len() as i16)?;
    for (at, code) in &colorlog {
        w.write_i16_le(*at)?;
        w.write_i16_le(*code)?;
    }

    Ok(section)
}
