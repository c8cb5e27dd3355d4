//! Brother PEC section writer
//!
//! PEC is the machine-facing half of Brother's formats: a label header,
//! chart color indices, a delta-coded stitch block, and 48x38 monochrome
//! thumbnails (one overview plus one per color). PES embeds this section
//! verbatim, which is what the machines actually read.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::formats::io::utils::WriteHelper;
use crate::palettes::thread_pec::PEC_THREADS;
use crate::utils::error::Result;
use std::io::{Seek, Write};

const MASK_07_BIT: i32 = 0b0111_1111;
const JUMP_CODE: u8 = 0b0001_0000;
const TRIM_CODE: u8 = 0b0010_0000;

const ICON_WIDTH: usize = 48;
const ICON_HEIGHT: usize = 38;
const ICON_STRIDE: usize = ICON_WIDTH / 8;

/// Map pattern threads onto the PEC chart, one unique index per thread
pub fn build_palette(pattern: &EmbPattern) -> Vec<u8> {
    let mut used = vec![false; PEC_THREADS.len()];
    let mut palette = Vec::with_capacity(pattern.threads().len());

    for thread in pattern.threads() {
        let index = thread
            .nearest_in_chart(&PEC_THREADS, &used)
            .or_else(|| thread.nearest_in_chart(&PEC_THREADS, &vec![false; PEC_THREADS.len()]))
            .unwrap_or(0);
        if index < used.len() {
            used[index] = true;
        }
        palette.push(index as u8);
    }
    palette
}

fn write_header<W: Write>(helper: &mut WriteHelper<W>, pattern: &EmbPattern) -> Result<()> {
    let name = pattern
        .get_metadata("name")
        .map(|s| s.as_str())
        .unwrap_or("Untitled");
    let truncated = if name.len() > 8 { &name[..8] } else { name };

    helper.write_string(&format!("LA:{:<16}\r", truncated))?;
    helper.write_bytes(&[0x20; 12])?;
    helper.write_u8(0xFF)?;
    helper.write_u8(0x00)?;
    helper.write_u8(ICON_STRIDE as u8)?;
    helper.write_u8(ICON_HEIGHT as u8)?;

    let palette = build_palette(pattern);
    if palette.is_empty() {
        helper.write_bytes(&[0x20, 0x20, 0x20, 0x20, 0x64, 0x20, 0x00, 0x20])?;
        helper.write_bytes(&[0x00, 0x20, 0x20, 0x20, 0xFF])?;
        for _ in 13..463 {
            helper.write_u8(0x20)?;
        }
    } else {
        helper.write_bytes(&[0x20; 12])?;
        helper.write_u8((palette.len() - 1) as u8)?;
        helper.write_bytes(&palette)?;
        for _ in (palette.len() + 1)..463 {
            helper.write_u8(0x20)?;
        }
    }
    Ok(())
}

/// Write one coordinate: short form for small stitches, 2-byte long form
/// (with control flag) otherwise
fn write_value<W: Write>(helper: &mut WriteHelper<W>, value: i32, long: bool, flag: u8) -> Result<()> {
    if !long && (-64..64).contains(&value) {
        helper.write_u8((value & MASK_07_BIT) as u8)?;
    } else {
        let mut encoded = (value & 0b0000_1111_1111_1111) as u16;
        encoded |= 0b1000_0000_0000_0000;
        encoded |= (flag as u16) << 8;
        helper.write_u8((encoded >> 8) as u8)?;
        helper.write_u8((encoded & 0xFF) as u8)?;
    }
    Ok(())
}

fn encode_stitches<W: Write>(helper: &mut WriteHelper<W>, pattern: &EmbPattern) -> Result<()> {
    let mut color_two = true;
    let mut jumping = true;
    let mut first = true;
    let mut xx = 0.0;
    let mut yy = 0.0;

    for stitch in pattern.stitches() {
        let dx = (stitch.x - xx).round() as i32;
        let dy = (stitch.y - yy).round() as i32;
        xx += dx as f64;
        yy += dy as f64;

        match stitch.command {
            Command::Stitch => {
                if jumping {
                    if dx != 0 || dy != 0 {
                        write_value(helper, 0, false, 0)?;
                        write_value(helper, 0, false, 0)?;
                    }
                    jumping = false;
                }
                write_value(helper, dx, false, 0)?;
                write_value(helper, dy, false, 0)?;
            }
            Command::Jump => {
                jumping = true;
                let flag = if first { JUMP_CODE } else { TRIM_CODE };
                write_value(helper, dx, true, flag)?;
                write_value(helper, dy, true, flag)?;
            }
            Command::ColorChange => {
                if jumping {
                    write_value(helper, 0, false, 0)?;
                    write_value(helper, 0, false, 0)?;
                    jumping = false;
                }
                helper.write_bytes(&[0xFE, 0xB0])?;
                helper.write_u8(if color_two { 0x02 } else { 0x01 })?;
                color_two = !color_two;
            }
            Command::End => {
                helper.write_u8(0xFF)?;
                break;
            }
            // trims ride on the next jump's flag
            Command::Trim => {}
        }
        first = false;
    }

    Ok(())
}

fn mark_bit(graphic: &mut [u8], x: i32, y: i32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= ICON_WIDTH {
        return;
    }
    let index = y * ICON_STRIDE + x / 8;
    if index < graphic.len() {
        graphic[index] |= 1 << (x % 8);
    }
}

/// Fresh thumbnail bitmap with a one-pixel frame
fn blank_frame() -> Vec<u8> {
    let mut graphic = vec![0u8; ICON_STRIDE * ICON_HEIGHT];
    for x in 1..(ICON_WIDTH as i32 - 1) {
        mark_bit(&mut graphic, x, 0);
        mark_bit(&mut graphic, x, ICON_HEIGHT as i32 - 1);
    }
    for y in 1..(ICON_HEIGHT as i32 - 1) {
        mark_bit(&mut graphic, 0, y);
        mark_bit(&mut graphic, ICON_WIDTH as i32 - 1, y);
    }
    graphic
}

/// Plot stitch points scaled into the thumbnail, leaving `margin` pixels
fn draw_scaled(
    bounds: (f64, f64, f64, f64),
    stitches: &[(f64, f64)],
    graphic: &mut [u8],
    margin: i32,
) {
    let (left, top, right, bottom) = bounds;
    let width = (right - left).max(1.0);
    let height = (bottom - top).max(1.0);

    let scale_x = (ICON_WIDTH as f64 - margin as f64) / width;
    let scale_y = (ICON_HEIGHT as f64 - margin as f64) / height;
    let scale = scale_x.min(scale_y);

    let cx = (right + left) / 2.0;
    let cy = (bottom + top) / 2.0;
    let translate_x = -cx * scale + ICON_WIDTH as f64 / 2.0;
    let translate_y = -cy * scale + ICON_HEIGHT as f64 / 2.0;

    for &(x, y) in stitches {
        let px = (x * scale + translate_x).floor() as i32;
        let py = (y * scale + translate_y).floor() as i32;
        mark_bit(graphic, px, py);
    }
}

fn write_graphics<W: Write>(
    helper: &mut WriteHelper<W>,
    pattern: &EmbPattern,
    bounds: (f64, f64, f64, f64),
) -> Result<()> {
    // overview thumbnail with every stitch
    let mut overview = blank_frame();
    let all: Vec<(f64, f64)> = pattern
        .stitches()
        .iter()
        .filter(|s| s.command.is_stitch())
        .map(|s| (s.x, s.y))
        .collect();
    draw_scaled(bounds, &all, &mut overview, 4);
    helper.write_bytes(&overview)?;

    // one thumbnail per color block
    let mut block: Vec<(f64, f64)> = Vec::new();
    let mut flush = |helper: &mut WriteHelper<W>, block: &mut Vec<(f64, f64)>| -> Result<()> {
        if !block.is_empty() {
            let mut icon = blank_frame();
            draw_scaled(bounds, block, &mut icon, 5);
            helper.write_bytes(&icon)?;
            block.clear();
        }
        Ok(())
    };

    for stitch in pattern.stitches() {
        match stitch.command {
            Command::Stitch => block.push((stitch.x, stitch.y)),
            Command::ColorChange => flush(helper, &mut block)?,
            Command::End => break,
            _ => {}
        }
    }
    flush(helper, &mut block)?;

    Ok(())
}

/// Write the PEC section (shared between standalone PEC and embedded PES)
pub fn write_pec_section<W: Write + Seek>(writer: &mut W, pattern: &EmbPattern) -> Result<()> {
    // the section may start at a nonzero offset inside a PES container, so
    // back-patched positions are anchored to the current stream position
    let base = writer.stream_position()?;
    let mut helper = WriteHelper::new(writer);

    write_header(&mut helper, pattern)?;

    let bounds = pattern.bounds();
    let width = (bounds.2 - bounds.0).round() as i16;
    let height = (bounds.3 - bounds.1).round() as i16;

    let block_start = helper.bytes_written();
    helper.write_u16_le(0)?;
    helper.write_u8(0)?;
    helper.write_u8(0)?;
    helper.write_u8(0)?;

    helper.write_bytes(&[0x31, 0xFF, 0xF0])?;
    helper.write_i16_le(width)?;
    helper.write_i16_le(height)?;
    helper.write_i16_le(0x1E0)?;
    helper.write_i16_le(0x1B0)?;

    encode_stitches(&mut helper, pattern)?;

    // back-patch the 24-bit stitch block length
    let block_length = helper.bytes_written() - block_start;
    helper.patch_bytes(
        base + (block_start + 2) as u64,
        &[
            (block_length & 0xFF) as u8,
            ((block_length >> 8) & 0xFF) as u8,
            ((block_length >> 16) & 0xFF) as u8,
        ],
    )?;

    write_graphics(&mut helper, pattern, bounds)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::thread::EmbThread;
    use std::io::Cursor;

    #[test]
    fn test_blank_frame_size() {
        let frame = blank_frame();
        assert_eq!(frame.len(), 228);
        // corners stay clear, edges marked
        assert_eq!(frame[0] & 0x01, 0);
        assert_ne!(frame[0] & 0x02, 0);
    }

    #[test]
    fn test_write_value_short_and_long() {
        let mut buffer = Vec::new();
        let mut helper = WriteHelper::new(&mut buffer);
        write_value(&mut helper, 5, false, 0).unwrap();
        write_value(&mut helper, -3, false, 0).unwrap();
        write_value(&mut helper, 200, false, 0).unwrap();
        // two short bytes, then a long pair with the high bit set
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer[0], 5);
        assert_eq!(buffer[1], (-3i32 & 0x7F) as u8);
        assert_ne!(buffer[2] & 0x80, 0);
    }

    #[test]
    fn test_section_structure() {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::new(0xFF0000));
        pattern.jump_abs(0.0, 0.0);
        pattern.stitch_abs(10.0, 10.0);
        pattern.stitch_abs(20.0, 0.0);
        pattern.end();

        let mut buffer = Cursor::new(Vec::new());
        write_pec_section(&mut buffer, &pattern).unwrap();
        let data = buffer.into_inner();
        assert_eq!(&data[0..3], b"LA:");
        // header (512) + block header + stitches + 2 thumbnails
        assert!(data.len() > 512 + 2 * 228);
    }

    #[test]
    fn test_palette_unique_indices() {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::new(0xFF0000));
        pattern.add_thread(EmbThread::new(0xFE0001));
        let palette = build_palette(&pattern);
        assert_eq!(palette.len(), 2);
        assert_ne!(palette[0], palette[1]);
    }
}
