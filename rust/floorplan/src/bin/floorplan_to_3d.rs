// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a 2D floor plan into a 3D scene (OBJ + MTL output)
//!
//! Usage:
//!   floorplan-to-3d <image_path> [options]
//!   floorplan-to-3d --plan <plan.json> [options]

use floorplan3d::{
    build_scene, sample_floor_plan, spawn_detection, validate_catalog, write_obj,
    DetectionConfig, FloorPlanError, FloorPlanInput, HoughWallDetector, SceneConfig,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

enum Source {
    Image(PathBuf),
    Plan(PathBuf),
}

struct Options {
    source: Source,
    output: PathBuf,
    config_path: Option<PathBuf>,
    wall_height: Option<f64>,
    wall_thickness: Option<f64>,
    max_snap_distance: Option<f64>,
    merge_collinear: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "floorplan-to-3d failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut source = None;
    let mut output = PathBuf::from("floorplan.obj");
    let mut config_path = None;
    let mut wall_height = None;
    let mut wall_thickness = None;
    let mut max_snap_distance = None;
    let mut merge_collinear = false;
    let mut sample_out: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--output" | "-o" => output = PathBuf::from(value("--output")?),
            "--config" => config_path = Some(PathBuf::from(value("--config")?)),
            "--plan" => source = Some(Source::Plan(PathBuf::from(value("--plan")?))),
            "--sample" => sample_out = Some(PathBuf::from(value("--sample")?)),
            "--wall-height" => wall_height = Some(parse_number(&value("--wall-height")?)?),
            "--wall-thickness" => {
                wall_thickness = Some(parse_number(&value("--wall-thickness")?)?)
            }
            "--max-snap" => max_snap_distance = Some(parse_number(&value("--max-snap")?)?),
            "--merge" => merge_collinear = true,
            other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
            path => source = Some(Source::Image(PathBuf::from(path))),
        }
    }

    if let Some(path) = sample_out {
        source = Some(Source::Image(path.clone()));
        sample_floor_plan()
            .save(&path)
            .map_err(|e| format!("cannot write sample image '{}': {e}", path.display()))?;
        println!("Sample floor plan written to {}", path.display());
    }

    Ok(Options {
        source: source.ok_or("no input image or --plan given")?,
        output,
        config_path,
        wall_height,
        wall_thickness,
        max_snap_distance,
        merge_collinear,
    })
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse()
        .map_err(|_| format!("'{text}' is not a number"))
}

fn run(options: Options) -> Result<(), FloorPlanError> {
    validate_catalog()?;

    let mut config = match &options.config_path {
        Some(path) => SceneConfig::from_json_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(h) = options.wall_height {
        config.wall_height = h;
    }
    if let Some(t) = options.wall_thickness {
        config.wall_thickness = t;
    }
    if options.max_snap_distance.is_some() {
        config.openings.max_snap_distance = options.max_snap_distance;
    }
    config.validate()?;

    println!("=== Floor Plan to 3D ===");
    println!();

    let input = match &options.source {
        Source::Image(path) => {
            println!("[1/3] Detecting walls in {}", path.display());
            let detector = HoughWallDetector::new(DetectionConfig {
                merge_collinear: options.merge_collinear,
                ..Default::default()
            });
            let job = spawn_detection(path, Arc::new(detector), config.nominal_footprint_width)?;
            let snapshot = job.wait()?;
            println!(
                "  {}x{} px, {} wall segments, {:.4} m/px",
                snapshot.image_width,
                snapshot.image_height,
                snapshot.walls.len(),
                snapshot.scale
            );
            snapshot.to_plan_input()
        }
        Source::Plan(path) => {
            println!("[1/3] Reading plan {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|source| FloorPlanError::Io {
                path: path.clone(),
                source,
            })?;
            let input: FloorPlanInput = serde_json::from_str(&text)?;
            println!(
                "  {} walls, {} doors, {} windows, {} staircases, {} furniture",
                input.walls.len(),
                input.doors.len(),
                input.windows.len(),
                input.staircases.len(),
                input.furniture.len()
            );
            input
        }
    };

    println!("[2/3] Building scene...");
    let scene = build_scene(&input, &config)?;
    let stats = scene.stats();
    println!(
        "  {} walls, {} doors, {} windows, {} steps, {} furniture, {} faces",
        stats.walls, stats.doors, stats.windows, stats.steps, stats.furniture, stats.faces
    );
    if stats.skipped_walls > 0 || stats.dropped_openings > 0 {
        println!(
            "  skipped {} zero-length walls, dropped {} openings",
            stats.skipped_walls, stats.dropped_openings
        );
    }
    if let Some((min, max)) = scene.bounds() {
        println!(
            "  bounds: {:.2} x {:.2} x {:.2} m",
            max.x - min.x,
            max.y - min.y,
            max.z - min.z
        );
    }

    println!("[3/3] Writing {}", options.output.display());
    write_obj(&scene, &options.output)?;
    println!();
    println!("Done.");
    Ok(())
}

fn print_usage() {
    println!(
        r#"Floor Plan to 3D
================

Converts a 2D floor plan into a 3D scene (OBJ + MTL).

USAGE:
  floorplan-to-3d <image_path> [OPTIONS]
  floorplan-to-3d --plan <plan.json> [OPTIONS]
  floorplan-to-3d --sample <out.png> [OPTIONS]

OPTIONS:
  --output, -o <path>        Output OBJ path (default: floorplan.obj)
  --plan <path>              Read an authored plan (JSON) instead of an image
  --sample <path>            Write the built-in sample plan image and use it
  --config <path>            Scene configuration (JSON)
  --wall-height <meters>     Wall height, 2.0 - 5.0 (default: 3.0)
  --wall-thickness <meters>  Wall thickness, 0.1 - 0.5 (default: 0.2)
  --max-snap <meters>        Reject openings farther than this from every wall
  --merge                    Merge collinear duplicate detections
  -h, --help                 Show this help message

Set RUST_LOG=debug for pipeline details.
"#
    );
}
