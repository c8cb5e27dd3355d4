//! Thread color management
//!
//! Provides the `EmbThread` type for representing thread colors with RGB values,
//! catalog numbers, and descriptions, plus color distance calculations used to
//! map design colors onto machine thread charts.

use crate::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Embroidery thread with color and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbThread {
    /// Thread color in RGB format (0xRRGGBB)
    pub color: u32,

    /// Thread description/name
    pub description: Option<String>,

    /// Catalog/ID number
    pub catalog_number: Option<String>,

    /// Brand/manufacturer
    pub brand: Option<String>,

    /// Chart reference
    pub chart: Option<String>,
}

impl EmbThread {
    /// Create a new thread with a given color
    pub fn new(color: u32) -> Self {
        Self {
            color: color & 0xFFFFFF,
            description: None,
            catalog_number: None,
            brand: None,
            chart: None,
        }
    }

    /// Create a thread from a `#rrggbb` hex string (the `#` is optional)
    pub fn from_hex(hex_string: &str) -> Result<Self> {
        Ok(Self::new(parse_color_hex(hex_string)?))
    }

    /// Create a thread from RGB components
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Get color as hex string
    pub fn hex_color(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// Get red component (0-255)
    pub fn red(&self) -> u8 {
        ((self.color >> 16) & 0xFF) as u8
    }

    /// Get green component (0-255)
    pub fn green(&self) -> u8 {
        ((self.color >> 8) & 0xFF) as u8
    }

    /// Get blue component (0-255)
    pub fn blue(&self) -> u8 {
        (self.color & 0xFF) as u8
    }

    /// Squared-component distance to another RGB color
    ///
    /// Used for nearest-color mapping onto machine thread charts; relative
    /// ordering is all that matters, so no perceptual weighting is applied.
    pub fn color_distance(&self, other_color: u32) -> f64 {
        let dr = self.red() as f64 - ((other_color >> 16) & 0xFF) as f64;
        let dg = self.green() as f64 - ((other_color >> 8) & 0xFF) as f64;
        let db = self.blue() as f64 - (other_color & 0xFF) as f64;
        dr * dr + dg * dg + db * db
    }

    /// Index of the closest color in a chart, skipping entries marked used
    ///
    /// Returns `None` when every entry is masked out.
    pub fn nearest_in_chart(&self, chart: &[EmbThread], used: &[bool]) -> Option<usize> {
        let mut best = None;
        let mut best_distance = f64::MAX;
        for (i, entry) in chart.iter().enumerate() {
            if used.get(i).copied().unwrap_or(false) {
                continue;
            }
            let distance = self.color_distance(entry.color);
            if distance < best_distance {
                best_distance = distance;
                best = Some(i);
            }
        }
        best
    }

    /// Builder method: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder method: set catalog number
    pub fn with_catalog_number(mut self, catalog: impl Into<String>) -> Self {
        self.catalog_number = Some(catalog.into());
        self
    }

    /// Builder method: set brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

impl Default for EmbThread {
    fn default() -> Self {
        Self::new(0x000000)
    }
}

impl PartialEq for EmbThread {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for EmbThread {}

impl std::fmt::Display for EmbThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref desc) = self.description {
            write!(f, "EmbThread {} {}", desc, self.hex_color())
        } else {
            write!(f, "EmbThread {}", self.hex_color())
        }
    }
}

/// Parse hex color string (with or without leading `#`)
pub fn parse_color_hex(hex_string: &str) -> Result<u32> {
    let h = hex_string.trim_start_matches('#');

    match h.len() {
        6 => u32::from_str_radix(h, 16)
            .map_err(|_| Error::InvalidColor(format!("Invalid hex color: {}", hex_string))),
        3 => {
            let chars: Vec<char> = h.chars().collect();
            let expanded = format!(
                "{}{}{}{}{}{}",
                chars[0], chars[0], chars[1], chars[1], chars[2], chars[2]
            );
            u32::from_str_radix(&expanded, 16)
                .map_err(|_| Error::InvalidColor(format!("Invalid hex color: {}", hex_string)))
        }
        _ => Err(Error::InvalidColor(format!(
            "Invalid hex color length: {}",
            hex_string
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_roundtrip() {
        let thread = EmbThread::from_hex("#ff8000").unwrap();
        assert_eq!(thread.red(), 255);
        assert_eq!(thread.green(), 128);
        assert_eq!(thread.blue(), 0);
        assert_eq!(thread.hex_color(), "#ff8000");
    }

    #[test]
    fn test_hex_parse_short_form() {
        let thread = EmbThread::from_hex("f00").unwrap();
        assert_eq!(thread.color, 0xFF0000);
    }

    #[test]
    fn test_hex_parse_invalid() {
        assert!(EmbThread::from_hex("#12345").is_err());
        assert!(EmbThread::from_hex("zzzzzz").is_err());
    }

    #[test]
    fn test_color_distance() {
        let red = EmbThread::new(0xFF0000);
        assert_eq!(red.color_distance(0xFF0000), 0.0);
        assert!(red.color_distance(0x00FF00) > red.color_distance(0xFF0100));
    }

    #[test]
    fn test_nearest_in_chart() {
        let chart = vec![
            EmbThread::new(0x000000),
            EmbThread::new(0xFF0000),
            EmbThread::new(0x0000FF),
        ];
        let used = vec![false; chart.len()];
        let almost_red = EmbThread::new(0xEE0011);
        assert_eq!(almost_red.nearest_in_chart(&chart, &used), Some(1));

        let masked = vec![false, true, false];
        assert_eq!(almost_red.nearest_in_chart(&chart, &masked), Some(0));
    }
}
