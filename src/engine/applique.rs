//! Appliqué step expansion
//!
//! Appliqué sews a fabric patch in three machine stops: a position run that
//! marks the patch outline on the base fabric, a tackdown run that fixes the
//! patch, and a satin column that covers the raw edge. Each step is its own
//! layer so the machine stops for a color change between them.

use crate::engine::settings::{Layer, StitchSettings, StitchStyle};

/// Thread color of the position marking run
const POSITION_COLOR: &str = "#e0e0e0";

/// Thread color of the tackdown run
const TACKDOWN_COLOR: &str = "#cccccc";

/// Thread color of the covering satin
const FINISH_COLOR: &str = "#000000";

/// Satin width used for the edge cover (mm)
const FINISH_WIDTH_MM: f64 = 3.5;

/// Expand a closed outline into the three appliqué step layers
///
/// The outline is closed if needed. Position and tackdown both follow the
/// raw outline as running stitches; the finish pass runs the closed outline
/// through the satin ribbon generator.
pub fn applique_layers(outline: &[[f64; 2]]) -> Vec<Layer> {
    let mut closed = outline.to_vec();
    if closed.len() > 1 && closed.first() != closed.last() {
        closed.push(closed[0]);
    }

    let run_settings = StitchSettings {
        style: StitchStyle::Run,
        underlay: false,
        ..StitchSettings::default()
    };
    let finish_settings = StitchSettings {
        style: StitchStyle::Satin,
        satin_width: FINISH_WIDTH_MM,
        underlay: false,
        ..StitchSettings::default()
    };

    vec![
        Layer::new(POSITION_COLOR, vec![closed.clone()])
            .with_settings(run_settings)
            .as_stroke(),
        Layer::new(TACKDOWN_COLOR, vec![closed.clone()])
            .with_settings(run_settings)
            .as_stroke(),
        Layer::new(FINISH_COLOR, vec![closed])
            .with_settings(finish_settings)
            .as_stroke(),
    ]
}
