//! Brother PEC thread chart
//!
//! The 64 fixed colors that PEC (and the PEC section embedded in PES) can
//! reference by index. Order matters: the writer stores positions into this
//! table.

use crate::core::thread::EmbThread;
use lazy_static::lazy_static;

const PEC_COLORS: &[(u32, &str, &str)] = &[
    (0x1a0a94, "Prussian Blue", "007"),
    (0x0f75ff, "Blue", "405"),
    (0x00934c, "Teal Green", "534"),
    (0xbabdfe, "Corn Flower Blue", "070"),
    (0xec0000, "Red", "800"),
    (0xe4995a, "Reddish Brown", "337"),
    (0xcc48ab, "Magenta", "620"),
    (0xfdc4fa, "Light Lilac", "810"),
    (0xdd84cd, "Lilac", "612"),
    (0x6bd38a, "Mint Green", "507"),
    (0xe4a945, "Deep Gold", "208"),
    (0xffbd42, "Orange", "209"),
    (0xffe600, "Yellow", "205"),
    (0x6cd900, "Lime Green", "513"),
    (0xc1a941, "Brass", "328"),
    (0xb5ad97, "Silver", "005"),
    (0xba9c5f, "Russet Brown", "843"),
    (0xfaf59e, "Cream Brown", "330"),
    (0x808080, "Pewter", "704"),
    (0x000000, "Black", "900"),
    (0x001cdf, "Ultramarine", "406"),
    (0xdf00b8, "Royal Purple", "869"),
    (0x626262, "Dark Gray", "817"),
    (0x69260d, "Dark Brown", "898"),
    (0xff0060, "Deep Rose", "086"),
    (0xbf8200, "Light Brown", "323"),
    (0xf39178, "Salmon Pink", "079"),
    (0xff6805, "Vermilion", "030"),
    (0xf0f0f0, "White", "001"),
    (0x5011b5, "Violet", "613"),
    (0xfafaca, "Seacrest", "542"),
    (0x2cd67c, "Sky Blue", "019"),
    (0xb63d8e, "Clay Brown", "855"),
    (0xba2727, "Burnt Orange", "333"),
    (0xfebfa8, "Blossom Pink", "085"),
    (0xffd9d9, "Light Pink", "124"),
    (0x00a861, "Emerald Green", "509"),
    (0x7b8880, "Stone Gray", "707"),
    (0x2a7a7a, "Peacock Blue", "415"),
    (0xb0b0b0, "Light Gray", "009"),
    (0xe3be81, "Beige", "841"),
    (0x8b4513, "Walnut", "058"),
    (0xf8d077, "Straw Yellow", "214"),
    (0x6a1c8e, "Amethyst", "614"),
    (0x9bdfff, "Powder Blue", "017"),
    (0x1f4db5, "Sapphire", "420"),
    (0xd0ff7d, "Spring Green", "027"),
    (0xffdd00, "Lemon", "202"),
    (0x2d9655, "Forest Green", "536"),
    (0x713a1c, "Cocoa Brown", "339"),
    (0xe2c2a0, "Sand", "307"),
    (0x4d4dff, "Cobalt", "019"),
    (0xffa3c8, "Rose Pink", "813"),
    (0x007c52, "Hunter Green", "515"),
    (0xa0522d, "Sienna", "058"),
    (0xc0dcc0, "Pale Green", "502"),
    (0xffb000, "Amber", "210"),
    (0x7d26cd, "Purple", "869"),
    (0x00cccc, "Turquoise", "534"),
    (0x909090, "Ash Gray", "707"),
    (0x562e18, "Sepia", "058"),
    (0x92b9ff, "Baby Blue", "017"),
    (0x4a6741, "Olive Drab", "568"),
    (0xffe1cf, "Flesh Pink", "083"),
];

lazy_static! {
    /// The PEC chart as ready-made threads, in index order
    pub static ref PEC_THREADS: Vec<EmbThread> = PEC_COLORS
        .iter()
        .map(|&(color, name, catalog)| {
            EmbThread::new(color)
                .with_description(name)
                .with_catalog_number(catalog)
                .with_brand("Brother")
        })
        .collect();
}
