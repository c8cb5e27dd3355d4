//! Melco EXP format writer
//!
//! EXP is a headerless stream of 2-byte movement records. Control operations
//! are escaped with 0x80: jump, trim, and color change each have a fixed
//! marker sequence.

use crate::core::command::Command;
use crate::core::pattern::EmbPattern;
use crate::formats::io::utils::WriteHelper;
use crate::utils::error::Result;
use std::io::Write;

/// Write an EXP file
pub fn write<W: Write>(writer: &mut W, pattern: &EmbPattern) -> Result<()> {
    let mut helper = WriteHelper::new(writer);

    let mut xx = 0.0;
    let mut yy = 0.0;

    for stitch in pattern.stitches() {
        let dx = (stitch.x - xx).round() as i32;
        let dy = (stitch.y - yy).round() as i32;
        xx += dx as f64;
        yy += dy as f64;

        match stitch.command {
            Command::Stitch => {
                helper.write_u8((dx & 0xFF) as u8)?;
                helper.write_u8(((-dy) & 0xFF) as u8)?;
            }
            Command::Jump => {
                helper.write_bytes(&[0x80, 0x04])?;
                helper.write_u8((dx & 0xFF) as u8)?;
                helper.write_u8(((-dy) & 0xFF) as u8)?;
            }
            Command::Trim => {
                helper.write_bytes(&[0x80, 0x80, 0x07, 0x00])?;
            }
            Command::ColorChange => {
                helper.write_bytes(&[0x80, 0x01, 0x00, 0x00])?;
            }
            Command::End => {}
        }
    }

    Ok(())
}
