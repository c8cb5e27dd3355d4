//! Janome JEF thread chart
//!
//! The 79-entry Janome chart referenced by index from JEF headers. Entry 0
//! is the chart's placeholder slot and maps to black.

use crate::core::thread::EmbThread;
use lazy_static::lazy_static;

const JEF_COLORS: &[(u32, &str)] = &[
    (0x000000, "Placeholder"),
    (0x000000, "Black"),
    (0xffffff, "White"),
    (0xffff17, "Yellow"),
    (0xfa7820, "Orange"),
    (0x3c8742, "Olive Green"),
    (0x0a7632, "Green"),
    (0x7598d9, "Sky"),
    (0x8834b5, "Purple"),
    (0xdb8fcf, "Pink"),
    (0xe61515, "Red"),
    (0x8d3b00, "Brown"),
    (0x0727ab, "Blue"),
    (0xcfaf22, "Gold"),
    (0x48201a, "Dark Brown"),
    (0xb391d9, "Pale Violet"),
    (0xf4f08c, "Pale Yellow"),
    (0xffb0c3, "Pale Pink"),
    (0xffa06b, "Peach"),
    (0xd1a990, "Beige"),
    (0x9b0d39, "Wine Red"),
    (0xaebed9, "Pale Sky"),
    (0x7bc225, "Yellow Green"),
    (0xbfc2c2, "Silver Gray"),
    (0x8a8a8a, "Gray"),
    (0xaedbc7, "Pale Aqua"),
    (0x93cfe8, "Baby Blue"),
    (0x3d7ba6, "Powder Blue"),
    (0x2163a6, "Bright Blue"),
    (0x2b4c7a, "Slate Blue"),
    (0x091f52, "Navy Blue"),
    (0xf78d8d, "Salmon Pink"),
    (0xf25252, "Coral"),
    (0xc92f1a, "Burnt Orange"),
    (0xc9762f, "Cinnamon"),
    (0xa8773d, "Umber"),
    (0xdbc37a, "Blond"),
    (0xffd31c, "Sunflower"),
    (0xdfa3ce, "Orchid Pink"),
    (0xc24cb0, "Peony Purple"),
    (0x782049, "Burgundy"),
    (0x542a7a, "Royal Purple"),
    (0xb00d31, "Cardinal Red"),
    (0x85c79a, "Opal Green"),
    (0x6a8a3c, "Moss Green"),
    (0x4c8a23, "Meadow Green"),
    (0x0d5e2f, "Dark Green"),
    (0x4fa87c, "Aquamarine"),
    (0x17a85e, "Emerald Green"),
    (0x0d7a60, "Peacock Green"),
    (0x5e5e5e, "Dark Gray"),
    (0xf7f7ef, "Ivory White"),
    (0xb58a52, "Hazel"),
    (0x9e6a2f, "Toast"),
    (0xefae84, "Salmon"),
    (0x9e4c17, "Cocoa Brown"),
    (0x843f0b, "Sienna"),
    (0x592f0d, "Sepia"),
    (0x3d1f07, "Dark Sepia"),
    (0x5c5cc2, "Violet Blue"),
    (0x1717a8, "Blue Ink"),
    (0x3d6ed9, "Sola Blue"),
    (0xa8d917, "Green Dust"),
    (0xff9ec7, "Crimson"),
    (0xe83293, "Floral Pink"),
    (0xb55e72, "Wine"),
    (0x9e9e5e, "Olive Drab"),
    (0x604f9e, "Meadow Violet"),
    (0x0d8ca8, "Turquoise Blue"),
    (0x36bca8, "Seagreen"),
    (0x17a8bc, "Blue Green"),
    (0x84cfb5, "Gust Green"),
    (0x173693, "Marine Blue"),
    (0xc2a517, "Yellow Ochre"),
    (0xa8a884, "Beige Gray"),
    (0x84845c, "Bamboo"),
    (0xe8e8d0, "Pearl White"),
    (0xd9d9ff, "Frost Blue"),
    (0x3c3c3c, "Anthracite"),
];

lazy_static! {
    /// The JEF chart as ready-made threads, in index order
    pub static ref JEF_THREADS: Vec<EmbThread> = JEF_COLORS
        .iter()
        .map(|&(color, name)| {
            EmbThread::new(color)
                .with_description(name)
                .with_brand("Janome")
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_size() {
        assert_eq!(JEF_THREADS.len(), 79);
    }

    #[test]
    fn test_primaries_present() {
        assert!(JEF_THREADS.iter().any(|t| t.color == 0xffffff));
        assert!(JEF_THREADS.iter().any(|t| t.color == 0xe61515));
    }
}
