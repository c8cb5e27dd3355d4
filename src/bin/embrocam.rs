/// Embrocam CLI - generate machine stitch files from design JSON
///
/// Usage:
///   embrocam export <design.json> <output.{dst,pes,jef,exp}>
///   embrocam info <design.json>
///   embrocam list-formats
use embrocam::engine;
use embrocam::prelude::*;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "export" => {
            if args.len() < 4 {
                eprintln!("Error: export requires <design.json> and <output> arguments");
                print_usage();
                process::exit(1);
            }
            export_design(&args[2], &args[3])
        }
        "info" => {
            if args.len() < 3 {
                eprintln!("Error: info requires <design.json> argument");
                print_usage();
                process::exit(1);
            }
            show_info(&args[2])
        }
        "list-formats" => {
            for format in PatternFormat::all() {
                println!("{}", format.extension());
            }
            Ok(())
        }
        "version" => {
            println!("Embrocam v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Error: Unknown command '{}'", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    println!("Embrocam - Embroidery CAM engine v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    embrocam <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    export <design.json> <output>   Generate a stitch file from design layers");
    println!("    info <design.json>              Show stitch counts and thread estimates");
    println!("    list-formats                    List supported output formats");
    println!("    version                         Show version information");
    println!("    help                            Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    embrocam export design.json out.dst");
    println!("    embrocam info design.json");
}

fn load_request(path: &str) -> Result<ExportRequest> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn export_design(input: &str, output: &str) -> Result<()> {
    let mut request = load_request(input)?;

    // the output extension wins over the format field in the JSON
    if let Some(ext) = Path::new(output).extension().and_then(|e| e.to_str()) {
        request.format = ext.to_string();
    }

    let format = PatternFormat::parse(&request.format)?;
    let mut pattern = engine::generate_pattern(&request.layers)?;

    // unlike the library (which stays deterministic), the CLI stamps the
    // real creation time into formats that carry one
    let name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");
    pattern.set_metadata("name", name);
    pattern.set_metadata(
        "date",
        chrono::Local::now().format("%Y%m%d%H%M%S").to_string(),
    );

    let stats = pattern.thread_estimate();
    let data = embrocam::formats::write_to_bytes(&pattern, format)?;
    fs::write(output, &data)?;

    println!("Wrote {} ({} bytes)", output, data.len());
    println!(
        "Stitches: {}  Trims: {}  Colors: {}",
        stats.stitch_count, stats.trim_count, stats.color_change_count
    );
    println!(
        "Thread: top {:.2} m, bobbin {:.2} m",
        stats.top_thread_m, stats.bobbin_thread_m
    );
    Ok(())
}

fn show_info(input: &str) -> Result<()> {
    let request = load_request(input)?;
    let pattern = engine::generate_pattern(&request.layers)?;
    let stats = pattern.thread_estimate();

    println!("Layers:        {}", request.layers.len());
    println!("Stitches:      {}", stats.stitch_count);
    println!("Trims:         {}", stats.trim_count);
    println!("Color changes: {}", stats.color_change_count);
    println!(
        "Size:          {:.1} x {:.1} mm",
        pattern.width() / 10.0,
        pattern.height() / 10.0
    );
    println!("Stitch length: {:.1} mm total", stats.total_stitch_mm);
    println!(
        "Thread:        top {:.2} m, bobbin {:.2} m",
        stats.top_thread_m, stats.bobbin_thread_m
    );
    Ok(())
}
