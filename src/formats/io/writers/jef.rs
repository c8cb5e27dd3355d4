//! Janome JEF format writer
//!
//! JEF carries a little-endian binary header with the stitch offset, a
//! timestamp, hoop selection, centered design bounds, and the thread chart
//! indices, followed by 2-byte movement records with 0x80-escaped controls.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::formats::io::utils::WriteHelper;
use crate::palettes::thread_jef::JEF_THREADS;
use crate::utils::error::Result;
use std::io::Write;

// Hoop selection codes (dimensions in 0.1mm)
const HOOP_110X110: i32 = 0;
const HOOP_50X50: i32 = 1;
const HOOP_140X200: i32 = 2;
const HOOP_126X110: i32 = 3;
const HOOP_200X200: i32 = 4;

/// Number of escape records written per trim
const TRIM_REPEATS: usize = 3;

/// Smallest hoop that fits the design
fn hoop_for(width: i32, height: i32) -> i32 {
    if width < 500 && height < 500 {
        return HOOP_50X50;
    }
    if width < 1260 && height < 1100 {
        return HOOP_126X110;
    }
    if width < 1400 && height < 2000 {
        return HOOP_140X200;
    }
    if width < 2000 && height < 2000 {
        return HOOP_200X200;
    }
    HOOP_110X110
}

/// Map pattern threads to chart indices, avoiding duplicate assignments
/// while the chart has unused entries left
fn build_palette(pattern: &EmbPattern) -> Vec<i32> {
    let mut used = vec![false; JEF_THREADS.len()];
    let mut palette = Vec::with_capacity(pattern.threads().len());

    for thread in pattern.threads() {
        let index = thread
            .nearest_in_chart(&JEF_THREADS, &used)
            .or_else(|| thread.nearest_in_chart(&JEF_THREADS, &vec![false; JEF_THREADS.len()]))
            .unwrap_or(0);
        if index < used.len() {
            used[index] = true;
        }
        palette.push(index as i32);
    }
    palette
}

/// Records the stitch section will contain, END marker included
fn count_points(pattern: &EmbPattern) -> i32 {
    let mut count = 1;
    for stitch in pattern.stitches() {
        match stitch.command {
            Command::Stitch => count += 1,
            Command::Jump | Command::ColorChange => count += 2,
            Command::Trim => count += 2 * TRIM_REPEATS as i32,
            Command::End => break,
        }
    }
    count
}

fn write_hoop_edges<W: Write>(helper: &mut WriteHelper<W>, x_edge: i32, y_edge: i32) -> Result<()> {
    if x_edge.min(y_edge) >= 0 {
        helper.write_i32_le(x_edge)?;
        helper.write_i32_le(y_edge)?;
        helper.write_i32_le(x_edge)?;
        helper.write_i32_le(y_edge)?;
    } else {
        for _ in 0..4 {
            helper.write_i32_le(-1)?;
        }
    }
    Ok(())
}

/// Write a JEF file
///
/// `date_string` is the `YYYYMMDDHHmmss` header timestamp.
pub fn write<W: Write>(writer: &mut W, pattern: &EmbPattern, date_string: &str) -> Result<()> {
    let mut helper = WriteHelper::new(writer);

    let palette = build_palette(pattern);
    let color_count = palette.len() as i32;

    // stitch data offset: fixed header + 8 bytes per color
    helper.write_i32_le(0x74 + color_count * 8)?;
    helper.write_i32_le(0x14)?;

    let date_bytes = date_string.as_bytes();
    let len = date_bytes.len().min(14);
    helper.write_bytes(&date_bytes[..len])?;
    for _ in len..14 {
        helper.write_u8(0)?;
    }
    helper.write_u8(0)?;
    helper.write_u8(0)?;

    helper.write_i32_le(color_count)?;
    helper.write_i32_le(count_points(pattern))?;

    let (min_x, min_y, max_x, max_y) = pattern.bounds();
    let width = (max_x - min_x).round() as i32;
    let height = (max_y - min_y).round() as i32;
    helper.write_i32_le(hoop_for(width, height))?;

    let half_width = width / 2;
    let half_height = height / 2;

    // distance from the hoop center
    helper.write_i32_le(half_width)?;
    helper.write_i32_le(half_height)?;
    helper.write_i32_le(half_width)?;
    helper.write_i32_le(half_height)?;

    // margins against the 110x110, 50x50, 140x200, and custom hoops
    write_hoop_edges(&mut helper, 550 - half_width, 550 - half_height)?;
    write_hoop_edges(&mut helper, 250 - half_width, 250 - half_height)?;
    write_hoop_edges(&mut helper, 700 - half_width, 1000 - half_height)?;
    write_hoop_edges(&mut helper, 700 - half_width, 1000 - half_height)?;

    for &index in &palette {
        helper.write_i32_le(index)?;
    }
    for _ in 0..color_count {
        helper.write_i32_le(0x0D)?;
    }

    let mut xx = 0.0;
    let mut yy = 0.0;
    for stitch in pattern.stitches() {
        let dx = (stitch.x - xx).round() as i32;
        let dy = (stitch.y - yy).round() as i32;
        xx += dx as f64;
        yy += dy as f64;

        match stitch.command {
            Command::Stitch => {
                helper.write_i8(dx as i8)?;
                helper.write_i8((-dy) as i8)?;
            }
            Command::ColorChange => {
                helper.write_bytes(&[0x80, 0x01])?;
                helper.write_i8(dx as i8)?;
                helper.write_i8((-dy) as i8)?;
            }
            Command::Jump => {
                helper.write_bytes(&[0x80, 0x02])?;
                helper.write_i8(dx as i8)?;
                helper.write_i8((-dy) as i8)?;
            }
            Command::Trim => {
                for _ in 0..TRIM_REPEATS {
                    helper.write_bytes(&[0x80, 0x02, 0x00, 0x00])?;
                }
            }
            Command::End => break,
        }
    }

    helper.write_bytes(&[0x80, 0x10])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::thread::EmbThread;

    #[test]
    fn test_hoop_selection() {
        assert_eq!(hoop_for(400, 400), HOOP_50X50);
        assert_eq!(hoop_for(1000, 1000), HOOP_126X110);
        assert_eq!(hoop_for(1300, 1900), HOOP_140X200);
        assert_eq!(hoop_for(1900, 1900), HOOP_200X200);
        assert_eq!(hoop_for(2500, 2500), HOOP_110X110);
    }

    #[test]
    fn test_write_basic() {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::new(0xFF0000));
        pattern.stitch_abs(10.0, 20.0);
        pattern.stitch_abs(15.0, 30.0);
        pattern.end();

        let mut buffer = Vec::new();
        write(&mut buffer, &pattern, "20250101000000").unwrap();
        assert!(buffer.len() > 0x74);
        // stitch offset field accounts for one color
        let offset = i32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
        assert_eq!(offset, 0x74 + 8);
    }

    #[test]
    fn test_palette_avoids_duplicates() {
        let mut pattern = EmbPattern::new();
        pattern.add_thread(EmbThread::new(0xFF0000));
        pattern.add_thread(EmbThread::new(0xFE0000)); // nearly identical red
        pattern.stitch_abs(0.0, 0.0);
        pattern.color_change();
        pattern.stitch_abs(10.0, 0.0);
        pattern.end();

        let palette = build_palette(&pattern);
        assert_eq!(palette.len(), 2);
        assert_ne!(palette[0], palette[1]);
    }

    #[test]
    fn test_point_count() {
        let mut pattern = EmbPattern::new();
        pattern.stitch_abs(0.0, 0.0);
        pattern.stitch_abs(10.0, 0.0);
        pattern.trim();
        pattern.jump_abs(50.0, 0.0);
        pattern.end();
        // 2 stitches + trim (6) + jump (2) + end marker
        assert_eq!(count_points(&pattern), 2 + 6 + 2 + 1);
    }
}
