//! Tajima DST format writer
//!
//! DST files carry a 512-byte text header followed by 3-byte records. Each
//! record encodes the X/Y movement as a sum of signed ternary digits
//! (81, 27, 9, 3, 1) spread over fixed bit positions, which caps a single
//! record at +-121 units per axis.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::formats::io::utils::WriteHelper;
use crate::utils::error::{Error, Result};
use std::io::Write;

const DST_HEADER_SIZE: usize = 512;

/// Ternary digit table: (digit, greedy threshold, byte index, +bit, -bit)
type AxisSteps = [(i32, i32, usize, u8, u8); 5];

const X_STEPS: AxisSteps = [
    (81, 40, 2, 2, 3),
    (27, 13, 1, 2, 3),
    (9, 4, 0, 2, 3),
    (3, 1, 1, 0, 1),
    (1, 0, 0, 0, 1),
];

const Y_STEPS: AxisSteps = [
    (81, 40, 2, 5, 4),
    (27, 13, 1, 5, 4),
    (9, 4, 0, 5, 4),
    (3, 1, 1, 7, 6),
    (1, 0, 0, 7, 6),
];

fn encode_axis(record: &mut [u8; 3], mut value: i32, steps: &AxisSteps) -> Result<()> {
    for &(digit, threshold, byte, plus, minus) in steps {
        if value > threshold {
            record[byte] |= 1 << plus;
            value -= digit;
        } else if value < -threshold {
            record[byte] |= 1 << minus;
            value += digit;
        }
    }
    if value != 0 {
        return Err(Error::Encoding(
            "movement exceeds DST record range of +-121 units".to_string(),
        ));
    }
    Ok(())
}

/// Encode one 3-byte DST record
fn encode_record(dx: i32, dy: i32, command: Command) -> Result<[u8; 3]> {
    let mut record = [0u8; 3];
    match command {
        Command::Stitch | Command::Jump => {
            if command == Command::Jump {
                record[2] |= 0b1000_0000;
            }
            record[2] |= 0b0000_0011;
            encode_axis(&mut record, dx, &X_STEPS)?;
            // DST's Y axis points the other way
            encode_axis(&mut record, -dy, &Y_STEPS)?;
        }
        Command::ColorChange => record[2] = 0b1100_0011,
        Command::End => record[2] = 0b1111_0011,
        Command::Trim => {
            return Err(Error::Encoding(
                "trim must be expanded before record encoding".to_string(),
            ))
        }
    }
    Ok(record)
}

fn write_header<W: Write>(helper: &mut WriteHelper<W>, pattern: &EmbPattern) -> Result<()> {
    let name = pattern
        .get_metadata("name")
        .map(|s| s.as_str())
        .unwrap_or("Untitled");

    helper.write_string(&format!("LA:{:<16}\r", name))?;
    helper.write_string(&format!("ST:{:>7}\r", pattern.count_stitches()))?;
    helper.write_string(&format!("CO:{:>3}\r", pattern.count_color_changes()))?;

    let (min_x, min_y, max_x, max_y) = pattern.bounds();
    helper.write_string(&format!("+X:{:>5}\r", max_x.abs() as i32))?;
    helper.write_string(&format!("-X:{:>5}\r", min_x.abs() as i32))?;
    helper.write_string(&format!("+Y:{:>5}\r", max_y.abs() as i32))?;
    helper.write_string(&format!("-Y:{:>5}\r", min_y.abs() as i32))?;

    let (last_x, last_y) = pattern.position();
    let (ax, ay) = (last_x as i32, -(last_y as i32));
    helper.write_string(&format!("AX:{}{:>5}\r", if ax < 0 { "-" } else { "+" }, ax.abs()))?;
    helper.write_string(&format!("AY:{}{:>5}\r", if ay < 0 { "-" } else { "+" }, ay.abs()))?;
    helper.write_string(&format!("MX:+{:>5}\r", 0))?;
    helper.write_string(&format!("MY:+{:>5}\r", 0))?;
    helper.write_string(&format!("PD:{:>6}\r", "******"))?;

    for thread in pattern.threads() {
        let desc = thread.description.as_deref().unwrap_or("");
        let cat = thread.catalog_number.as_deref().unwrap_or("");
        helper.write_string(&format!("TC:{},{},{}\r", thread.hex_color(), desc, cat))?;
    }

    // end-of-text marker, then pad with spaces to the fixed header size
    helper.write_u8(0x1A)?;
    for _ in helper.bytes_written()..DST_HEADER_SIZE {
        helper.write_u8(0x20)?;
    }
    Ok(())
}

/// Write a DST file
pub fn write<W: Write>(writer: &mut W, pattern: &EmbPattern) -> Result<()> {
    let mut helper = WriteHelper::new(writer);
    write_header(&mut helper, pattern)?;

    let mut xx = 0.0;
    let mut yy = 0.0;

    for stitch in pattern.stitches() {
        let dx = (stitch.x - xx).round() as i32;
        let dy = (stitch.y - yy).round() as i32;
        xx += dx as f64;
        yy += dy as f64;

        if stitch.command == Command::Trim {
            // a trim is signalled by a small zig-zag of jumps
            helper.write_bytes(&encode_record(2, 2, Command::Jump)?)?;
            helper.write_bytes(&encode_record(-4, -4, Command::Jump)?)?;
            helper.write_bytes(&encode_record(2, 2, Command::Jump)?)?;
        } else {
            helper.write_bytes(&encode_record(dx, dy, stitch.command)?)?;
        }
    }

    Ok(())
}
