//! Freehand strokes and drawing snapshots.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// A single captured point in canvas-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeSample {
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the owning capture controller was created.
    pub timestamp: f64,
}

impl StrokeSample {
    pub fn new(x: f64, y: f64, timestamp: f64) -> Self {
        Self { x, y, timestamp }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One continuous gesture: an ordered, growing run of samples.
///
/// Samples are only appended while the stroke is open. Once sealed the
/// stroke is read-only; reset/clear replace it with a fresh one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreehandStroke {
    samples: Vec<StrokeSample>,
    sealed: bool,
}

impl FreehandStroke {
    /// Create a new empty, open stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample. Returns false when the stroke is sealed.
    ///
    /// Timestamps are clamped so they never go backwards.
    pub fn push(&mut self, mut sample: StrokeSample) -> bool {
        if self.sealed {
            return false;
        }
        if let Some(last) = self.samples.last() {
            sample.timestamp = sample.timestamp.max(last.timestamp);
        }
        self.samples.push(sample);
        true
    }

    /// Make the stroke read-only.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().map(StrokeSample::point)
    }

    /// Bounding box of the raw samples.
    pub fn bounds(&self) -> Rect {
        if self.samples.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for sample in &self.samples {
            min_x = min_x.min(sample.x);
            min_y = min_y.min(sample.y);
            max_x = max_x.max(sample.x);
            max_y = max_y.max(sample.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Polyline through every sample, for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points();

        let Some(first) = points.next() else {
            return path;
        };
        path.move_to(first);
        for point in points {
            path.line_to(point);
        }

        path
    }
}

/// Immutable, timestamped copy of the current freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSnapshot {
    /// Captured samples in gesture order.
    pub path: Vec<StrokeSample>,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl DrawingSnapshot {
    /// Copy a stroke, stamping it with the current wall-clock time.
    pub fn capture(stroke: &FreehandStroke) -> Self {
        Self {
            path: stroke.samples().to_vec(),
            timestamp: now_millis(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
