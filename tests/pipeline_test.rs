//! End-to-end pipeline tests
//!
//! Drives the full layers -> pattern -> bytes pipeline and checks the
//! command-stream guarantees: row structure, connector/trim decisions,
//! color grouping, and deterministic output.

use embrocam::engine::generate_pattern;
use embrocam::prelude::*;

fn square_path(x: f64, y: f64, size: f64) -> Vec<[f64; 2]> {
    vec![
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
    ]
}

fn flat_fill_settings() -> StitchSettings {
    StitchSettings {
        style: StitchStyle::Tatami,
        density: 0.4,
        angle: 0.0,
        stitch_length: 3.5,
        offset: 0.0,
        underlay: false,
        ..StitchSettings::default()
    }
}

fn stroke_settings(style: StitchStyle) -> StitchSettings {
    StitchSettings {
        style,
        underlay: false,
        ..StitchSettings::default()
    }
}

/// Needle-down positions in stream order
fn stitch_points(pattern: &EmbPattern) -> Vec<(f64, f64)> {
    pattern
        .stitches()
        .iter()
        .filter(|s| s.command == Command::Stitch)
        .map(|s| (s.x, s.y))
        .collect()
}

#[test]
fn square_fill_has_inclusive_alternating_rows() {
    // 10mm square, 0.4mm rows, horizontal fill
    let layer = Layer::new("#ff0000", vec![square_path(0.0, 0.0, 100.0)])
        .with_settings(flat_fill_settings());
    let pattern = generate_pattern(&[layer]).unwrap();

    // stream opens with ColorChange then a Jump to the first point (0,0)
    assert_eq!(pattern.stitches()[0].command, Command::ColorChange);
    assert_eq!(pattern.stitches()[1].command, Command::Jump);
    assert!(pattern.stitches()[1].x.abs() < 1e-6);
    assert!(pattern.stitches()[1].y.abs() < 1e-6);

    // rows at y = 0, 4, ..., 100: top edge included
    let mut rows: Vec<i64> = stitch_points(&pattern)
        .iter()
        .map(|p| p.1.round() as i64)
        .collect();
    rows.sort_unstable();
    rows.dedup();
    assert_eq!(rows.len(), 26);
    assert_eq!(rows[0], 0);
    assert_eq!(*rows.last().unwrap(), 100);

    // all penetrations stay on the shape
    for (x, y) in stitch_points(&pattern) {
        assert!((-1e-6..=100.0 + 1e-6).contains(&x));
        assert!((-1e-6..=100.0 + 1e-6).contains(&y));
    }
}

#[test]
fn square_fill_rows_are_boustrophedon() {
    let layer = Layer::new("#ff0000", vec![square_path(0.0, 0.0, 100.0)])
        .with_settings(flat_fill_settings());
    let pattern = generate_pattern(&[layer]).unwrap();
    let points = stitch_points(&pattern);

    // where the stream crosses from row 0 to row 1, the x positions meet;
    // same again from row 1 to row 2 at the opposite side
    let row_edge = |from: f64, to: f64| -> (f64, f64) {
        let idx = points
            .windows(2)
            .position(|w| (w[0].1 - from).abs() < 0.5 && (w[1].1 - to).abs() < 0.5)
            .expect("row transition not found");
        (points[idx].0, points[idx + 1].0)
    };

    let (end0, start1) = row_edge(0.0, 4.0);
    assert!((end0 - start1).abs() < 1e-6);
    assert!((end0 - 100.0).abs() < 1e-6);

    let (end1, start2) = row_edge(4.0, 8.0);
    assert!((end1 - start2).abs() < 1e-6);
    assert!(end1.abs() < 1e-6);
}

#[test]
fn two_colors_give_two_blocks_with_trim_between() {
    let red = Layer::new("#ff0000", vec![square_path(0.0, 0.0, 100.0)])
        .with_settings(flat_fill_settings());
    let green = Layer::new("#00ff00", vec![square_path(200.0, 0.0, 100.0)])
        .with_settings(flat_fill_settings());
    let pattern = generate_pattern(&[red, green]).unwrap();

    assert_eq!(pattern.count_color_changes(), 2);
    assert!(pattern.count_trims() >= 1);
    assert_eq!(pattern.threads().len(), 2);
    assert_eq!(pattern.threads()[0].color, 0xFF0000);
    assert_eq!(pattern.threads()[1].color, 0x00FF00);

    // the first block is closed with a trim before the second opens
    let commands: Vec<Command> = pattern.stitches().iter().map(|s| s.command).collect();
    let second_color = commands
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Command::ColorChange)
        .nth(1)
        .unwrap()
        .0;
    assert!(commands[..second_color].contains(&Command::Trim));
}

#[test]
fn satin_strip_alternates_across_centerline() {
    // 100mm strip, 4mm wide, 0.4mm pitch: 251 zig-zag points
    let settings = StitchSettings {
        satin_width: 4.0,
        ..stroke_settings(StitchStyle::Satin)
    };
    let layer = Layer::new("#0000ff", vec![vec![[0.0, 0.0], [1000.0, 0.0]]])
        .with_settings(settings)
        .as_stroke();
    let pattern = generate_pattern(&[layer]).unwrap();

    // 251 ribbon points + 6 tie points, minus the leading jump
    assert_eq!(pattern.count_stitches(), 256);
    for (_, y) in stitch_points(&pattern) {
        assert!(y.abs() <= 20.0 + 1e-6);
    }
}

#[test]
fn bean_line_triples_every_segment() {
    let settings = StitchSettings {
        stitch_length: 2.5,
        ..stroke_settings(StitchStyle::Bean)
    };
    let layer = Layer::new("#0000ff", vec![vec![[0.0, 0.0], [100.0, 0.0]]])
        .with_settings(settings)
        .as_stroke();
    let pattern = generate_pattern(&[layer]).unwrap();

    // samples at 0, 25, 50, 75, 100 -> 16 bean points + 6 ties - leading jump
    assert_eq!(pattern.count_stitches(), 21);

    // an interior sample is visited on both passes of both segments
    let visits = stitch_points(&pattern)
        .iter()
        .filter(|p| (p.0 - 25.0).abs() < 1e-6 && p.1.abs() < 1e-6)
        .count();
    assert!(visits >= 4);
}

#[test]
fn close_objects_connect_without_trim() {
    // two stroke lines whose gap is 1.5mm: hidden connector, no trim
    let red = stroke_settings(StitchStyle::Run);
    let a = Layer::new("#ff0000", vec![vec![[0.0, 0.0], [100.0, 0.0]]])
        .with_settings(red)
        .as_stroke();
    let b = Layer::new("#ff0000", vec![vec![[110.0, 0.0], [210.0, 0.0]]])
        .with_settings(red)
        .as_stroke();
    let pattern = generate_pattern(&[a, b]).unwrap();

    // only the end-of-run trim remains
    assert_eq!(pattern.count_trims(), 1);
    assert_eq!(pattern.count_jumps(), 1);

    // connector stitches land strictly between the two lines
    let bridge = stitch_points(&pattern)
        .iter()
        .filter(|p| p.0 > 100.5 && p.0 < 109.5)
        .count();
    assert!(bridge >= 1);
}

#[test]
fn distant_objects_trim_and_jump() {
    // 50mm apart: trim then jump
    let red = stroke_settings(StitchStyle::Run);
    let a = Layer::new("#ff0000", vec![vec![[0.0, 0.0], [100.0, 0.0]]])
        .with_settings(red)
        .as_stroke();
    let b = Layer::new("#ff0000", vec![vec![[600.0, 0.0], [700.0, 0.0]]])
        .with_settings(red)
        .as_stroke();
    let pattern = generate_pattern(&[a, b]).unwrap();

    assert_eq!(pattern.count_trims(), 2);
    let stitches = pattern.stitches();
    let trim_idx = stitches
        .iter()
        .position(|s| s.command == Command::Trim)
        .unwrap();
    assert_eq!(stitches[trim_idx + 1].command, Command::Jump);
    assert_eq!(stitches[trim_idx + 1].x, 600.0);
}

#[test]
fn every_stitch_is_anchored() {
    let design = vec![
        Layer::new("#ff0000", vec![square_path(0.0, 0.0, 150.0)]),
        Layer::new("#00ff00", vec![square_path(400.0, 0.0, 80.0)])
            .with_settings(stroke_settings(StitchStyle::Satin)),
        Layer::new("#ff0000", vec![square_path(0.0, 400.0, 60.0)]),
    ];
    let pattern = generate_pattern(&design).unwrap();

    let mut anchored = false;
    for stitch in pattern.stitches() {
        match stitch.command {
            Command::Jump => anchored = true,
            Command::Trim | Command::ColorChange => anchored = false,
            Command::Stitch => assert!(anchored, "unanchored stitch at {:?}", stitch),
            _ => {}
        }
    }
    assert_eq!(pattern.stitches().last().unwrap().command, Command::End);
    // same-color layers regroup into one block
    assert_eq!(pattern.count_color_changes(), 2);
}

#[test]
fn destructive_pull_compensation_recovers() {
    let settings = StitchSettings {
        pull_compensation: -10.0, // would erase a 5mm square
        angle: 0.0,
        underlay: false,
        ..StitchSettings::default()
    };
    let layer =
        Layer::new("#ff0000", vec![square_path(0.0, 0.0, 50.0)]).with_settings(settings);
    let pattern = generate_pattern(&[layer]).unwrap();
    assert!(pattern.count_stitches() > 0);
}

#[test]
fn engine_output_is_deterministic() {
    let request = ExportRequest {
        layers: vec![
            Layer::new("#ff0000", vec![square_path(0.0, 0.0, 150.0)]),
            Layer::new("#00cc88", vec![square_path(300.0, 100.0, 120.0)]),
        ],
        format: "dst".to_string(),
    };
    let first = create_embroidery_file(&request).unwrap();
    let second = create_embroidery_file(&request).unwrap();
    assert_eq!(first.data, second.data);
}

#[test]
fn export_every_supported_format() {
    let layers = vec![Layer::new("#ff0000", vec![square_path(0.0, 0.0, 150.0)])];
    for tag in ["dst", "pes", "jef", "exp"] {
        let request = ExportRequest {
            layers: layers.clone(),
            format: tag.to_string(),
        };
        let output = create_embroidery_file(&request).unwrap();
        assert!(!output.data.is_empty(), "{} produced no bytes", tag);
        assert_eq!(output.file_name, format!("export.{}", tag));
    }
}

#[test]
fn exported_pes_carries_signature() {
    let request = ExportRequest {
        layers: vec![Layer::new("#ff0000", vec![square_path(0.0, 0.0, 150.0)])],
        format: "pes".to_string(),
    };
    let output = create_embroidery_file(&request).unwrap();
    assert_eq!(&output.data[0..8], b"#PES0001");
}

#[test]
fn unknown_format_is_rejected() {
    let request = ExportRequest {
        layers: vec![Layer::new("#ff0000", vec![square_path(0.0, 0.0, 150.0)])],
        format: "xyz".to_string(),
    };
    match create_embroidery_file(&request) {
        Err(Error::UnsupportedFormat(tag)) => assert_eq!(tag, "xyz"),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|o| o.file_name)),
    }
}

#[test]
fn thread_stats_scale_with_design() {
    let small = ExportRequest {
        layers: vec![Layer::new("#ff0000", vec![square_path(0.0, 0.0, 50.0)])],
        format: "dst".to_string(),
    };
    let large = ExportRequest {
        layers: vec![Layer::new("#ff0000", vec![square_path(0.0, 0.0, 200.0)])],
        format: "dst".to_string(),
    };
    let small_out = create_embroidery_file(&small).unwrap();
    let large_out = create_embroidery_file(&large).unwrap();
    assert!(large_out.stats.top_thread_m > small_out.stats.top_thread_m);
    assert!(
        (small_out.stats.bobbin_thread_m - small_out.stats.total_stitch_mm * 0.7 / 1000.0).abs()
            < 1e-9
    );
}
