//! Binary output helpers for the format writers
//!
//! `WriteHelper` wraps any `Write` sink, tracks the byte position for
//! back-patched length fields, and exposes the little-endian primitives the
//! embroidery formats use.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Seek, SeekFrom, Write};

/// Helper for writing binary streams
pub struct WriteHelper<W: Write> {
    writer: W,
    bytes_written: usize,
}

impl<W: Write> WriteHelper<W> {
    /// Create a new WriteHelper
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Number of bytes written so far
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.bytes_written = self.bytes_written.saturating_add(data.len());
        Ok(())
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.writer.write_u8(value)?;
        self.bytes_written = self.bytes_written.saturating_add(1);
        Ok(())
    }

    /// Write i8
    pub fn write_i8(&mut self, value: i8) -> io::Result<()> {
        self.writer.write_i8(value)?;
        self.bytes_written = self.bytes_written.saturating_add(1);
        Ok(())
    }

    /// Write u16 little endian
    pub fn write_u16_le(&mut self, value: u16) -> io::Result<()> {
        self.writer.write_u16::<LittleEndian>(value)?;
        self.bytes_written = self.bytes_written.saturating_add(2);
        Ok(())
    }

    /// Write i16 little endian
    pub fn write_i16_le(&mut self, value: i16) -> io::Result<()> {
        self.writer.write_i16::<LittleEndian>(value)?;
        self.bytes_written = self.bytes_written.saturating_add(2);
        Ok(())
    }

    /// Write i32 little endian
    pub fn write_i32_le(&mut self, value: i32) -> io::Result<()> {
        self.writer.write_i32::<LittleEndian>(value)?;
        self.bytes_written = self.bytes_written.saturating_add(4);
        Ok(())
    }

    /// Write f32 little endian
    pub fn write_f32_le(&mut self, value: f32) -> io::Result<()> {
        self.writer.write_f32::<LittleEndian>(value)?;
        self.bytes_written = self.bytes_written.saturating_add(4);
        Ok(())
    }

    /// Write a string's bytes without terminator
    pub fn write_string(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Get mutable reference to the underlying writer
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: Write + Seek> WriteHelper<W> {
    /// Overwrite bytes at an absolute stream position
    ///
    /// Restores the current write position afterwards and does not count
    /// toward `bytes_written`, so placeholder fields can be patched once
    /// their final value is known.
    pub fn patch_bytes(&mut self, position: u64, data: &[u8]) -> io::Result<()> {
        let end = self.writer.stream_position()?;
        self.writer.seek(SeekFrom::Start(position))?;
        self.writer.write_all(data)?;
        self.writer.seek(SeekFrom::Start(end))?;
        Ok(())
    }

    /// Back-patch a little-endian i16 at an absolute stream position
    pub fn patch_i16_le(&mut self, position: u64, value: i16) -> io::Result<()> {
        self.patch_bytes(position, &value.to_le_bytes())
    }

    /// Back-patch a little-endian i32 at an absolute stream position
    pub fn patch_i32_le(&mut self, position: u64, value: i32) -> io::Result<()> {
        self.patch_bytes(position, &value.to_le_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_patch_preserves_position_and_count() {
        let mut buffer = Cursor::new(Vec::new());
        let mut helper = WriteHelper::new(&mut buffer);
        helper.write_i16_le(0).unwrap(); // placeholder
        helper.write_string("abcd").unwrap();
        helper.patch_i16_le(0, 0x0304).unwrap();
        assert_eq!(helper.bytes_written(), 6);
        helper.write_u8(0xFF).unwrap();
        let data = buffer.into_inner();
        assert_eq!(data, vec![0x04, 0x03, b'a', b'b', b'c', b'd', 0xFF]);
    }

    #[test]
    fn test_position_tracking() {
        let mut buffer = Vec::new();
        let mut helper = WriteHelper::new(&mut buffer);
        helper.write_u8(1).unwrap();
        helper.write_i16_le(-2).unwrap();
        helper.write_i32_le(3).unwrap();
        helper.write_string("abc").unwrap();
        assert_eq!(helper.bytes_written(), 10);
        assert_eq!(buffer.len(), 10);
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buffer = Cursor::new(Vec::new());
        let mut helper = WriteHelper::new(&mut buffer);
        helper.write_u16_le(0x0102).unwrap();
        assert_eq!(buffer.into_inner(), vec![0x02, 0x01]);
    }
}
