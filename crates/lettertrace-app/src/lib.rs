//! LetterTrace command-line host.
//!
//! Builds a tracing controller for one glyph, optionally replays a gesture
//! along the glyph's first contour, writes the masked rendering as SVG and
//! prints the drawing snapshot as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::{PathEl, Point};
use lettertrace_core::{DrawingSnapshot, TracingCallbacks, TracingConfig, TracingController};
use lettertrace_render::{Renderer, SvgRenderer, TraceFrame};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

/// Flattening tolerance for replayed gestures.
const TRACE_TOLERANCE: f64 = 0.5;

#[derive(Parser, Debug, Clone)]
#[command(name = "lettertrace")]
#[command(version, about = "Guided letter tracing canvas")]
pub struct Args {
    /// Glyph id from the builtin table
    #[arg(long, short = 'g', default_value = "A")]
    pub glyph: String,

    /// JSON file with canvas configuration
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Replay a gesture along the glyph's first contour
    #[arg(long, short = 't')]
    pub trace: bool,

    /// Write the rendered frame as SVG
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the drawing snapshot as JSON
    #[arg(long, short = 's')]
    pub snapshot: bool,
}

/// What a run produced.
#[derive(Debug)]
pub struct Report {
    /// Glyph actually shown (after any fallback).
    pub glyph_id: String,
    pub snapshot: DrawingSnapshot,
    pub svg: String,
}

/// Load configuration from `path`, or defaults.
pub fn load_config(path: Option<&PathBuf>) -> Result<TracingConfig> {
    let Some(path) = path else {
        return Ok(TracingConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    TracingConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

/// Points of the first contour of the controller's glyph, flattened.
pub fn trace_points(controller: &TracingController) -> Vec<Point> {
    let mut points = Vec::new();
    let mut started = false;
    let mut done = false;

    kurbo::flatten(controller.glyph_path().path.iter(), TRACE_TOLERANCE, |el| {
        if done {
            return;
        }
        match el {
            PathEl::MoveTo(_) if started => done = true,
            PathEl::MoveTo(p) | PathEl::LineTo(p) => {
                started = true;
                points.push(p);
            }
            PathEl::ClosePath => {
                if let Some(&first) = points.first() {
                    points.push(first);
                }
                done = true;
            }
            _ => {}
        }
    });

    points
}

/// Replay `points` as one gesture.
pub fn replay(controller: &mut TracingController, points: &[Point]) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    controller.begin(first);
    for &point in rest {
        controller.move_to(point);
    }
    controller.end();
}

pub fn run(args: &Args) -> Result<Report> {
    let config = load_config(args.config.as_ref())?;

    let callbacks = TracingCallbacks::new()
        .on_drawing_start(|| log::debug!("Drawing started"))
        .on_drawing_end(|| log::debug!("Drawing ended"))
        .on_verify(|snapshot| log::info!("Verified drawing with {} samples", snapshot.len()));
    let mut controller =
        TracingController::new(args.glyph.as_str(), config).with_callbacks(callbacks);

    // User-facing: shown even when RUST_LOG filters out the controller's warnings.
    for diagnostic in controller.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }

    if args.trace {
        let points = trace_points(&controller);
        log::debug!("Replaying {} points along {}", points.len(), controller.glyph_id());
        replay(&mut controller, &points);
    }

    let snapshot = controller.verify();

    let mut renderer = SvgRenderer::new();
    renderer.build_scene(&TraceFrame::from_controller(&controller));

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        renderer.write_to(BufWriter::new(file))?;
        log::info!("Wrote {}", path.display());
    }

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(Report {
        glyph_id: controller.glyph_id().to_string(),
        snapshot,
        svg: renderer.take_document(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(glyph: &str) -> Args {
        Args {
            glyph: glyph.to_string(),
            config: None,
            trace: false,
            output: None,
            snapshot: false,
        }
    }

    #[test]
    fn test_trace_points_follow_first_contour() {
        let controller = TracingController::new("O", TracingConfig::default());
        let points = trace_points(&controller);

        assert!(points.len() > 8);
        // A closed circle returns to its start.
        assert_eq!(points.first(), points.last());
        let center = Point::new(180.0, 180.0);
        for p in &points {
            assert!(((*p - center).hypot() - 80.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_replay_records_every_point() {
        let mut controller = TracingController::new("l", TracingConfig::default());
        let points = trace_points(&controller);
        replay(&mut controller, &points);

        let snapshot = controller.get_drawing_path();
        assert_eq!(snapshot.len(), points.len());
        assert_eq!(snapshot.path[0].point(), points[0]);
    }

    #[test]
    fn test_run_without_trace() {
        let report = run(&args("B")).unwrap();
        assert_eq!(report.glyph_id, "B");
        assert!(report.snapshot.is_empty());
        assert!(report.svg.contains("<svg"));
    }

    #[test]
    fn test_run_unknown_glyph_falls_back() {
        let report = run(&Args {
            trace: true,
            ..args("Ж")
        })
        .unwrap();
        assert_eq!(report.glyph_id, "A");
        assert!(!report.snapshot.is_empty());
        assert!(report.svg.contains("clip-path"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let missing = PathBuf::from("/nonexistent/lettertrace.json");
        assert!(load_config(Some(&missing)).is_err());
        assert_eq!(load_config(None).unwrap(), TracingConfig::default());
    }
}
