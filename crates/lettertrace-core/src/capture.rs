//! Stroke capture state machine.

use crate::input::GestureEvent;
use crate::stroke::{DrawingSnapshot, FreehandStroke, StrokeSample};
use kurbo::Point;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// State of the capture machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Waiting for a gesture to begin.
    #[default]
    Idle,
    /// A gesture is in progress and samples are being appended.
    Drawing,
}

/// Notification produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// `Idle -> Drawing`; the stroke holds its first sample.
    DrawingStarted,
    /// A sample was appended to the active stroke.
    PathChanged,
    /// `Drawing -> Idle`; the stroke is sealed.
    DrawingEnded {
        /// True when the gesture was finalized abnormally.
        cancelled: bool,
    },
    /// The stroke was discarded by an explicit reset.
    Reset,
}

/// Turns serial gesture events into one freehand stroke.
///
/// Only one stroke is ever active. A begin while already drawing is
/// ignored, as are move/end/cancel while idle.
#[derive(Debug, Clone)]
pub struct StrokeCapture {
    state: CaptureState,
    stroke: FreehandStroke,
    /// Origin for sample timestamps.
    epoch: Instant,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self {
            state: CaptureState::default(),
            stroke: FreehandStroke::new(),
            epoch: Instant::now(),
        }
    }
}

impl StrokeCapture {
    /// Create an idle capture machine with an empty stroke.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == CaptureState::Drawing
    }

    /// The current stroke (in progress, sealed, or empty).
    pub fn stroke(&self) -> &FreehandStroke {
        &self.stroke
    }

    /// Immutable copy of the current stroke.
    pub fn snapshot(&self) -> DrawingSnapshot {
        DrawingSnapshot::capture(&self.stroke)
    }

    /// Feed one gesture event through the machine.
    pub fn handle(&mut self, event: GestureEvent) -> Option<CaptureEvent> {
        match event {
            GestureEvent::Begin { position } => self.begin(position),
            GestureEvent::Move { position } => self.update(position),
            GestureEvent::End => self.finish(false),
            GestureEvent::Cancel => self.finish(true),
        }
    }

    /// Begin a gesture at `point`.
    pub fn begin(&mut self, point: Point) -> Option<CaptureEvent> {
        if self.is_drawing() {
            log::debug!("Ignoring gesture begin at {:?}: stroke already active", point);
            return None;
        }

        let mut stroke = FreehandStroke::new();
        stroke.push(self.sample(point));
        self.stroke = stroke;
        self.state = CaptureState::Drawing;
        Some(CaptureEvent::DrawingStarted)
    }

    /// Extend the active stroke to `point`.
    pub fn update(&mut self, point: Point) -> Option<CaptureEvent> {
        if !self.is_drawing() {
            log::debug!("Ignoring gesture move to {:?}: no active stroke", point);
            return None;
        }

        let sample = self.sample(point);
        self.stroke.push(sample).then_some(CaptureEvent::PathChanged)
    }

    /// End the gesture normally.
    pub fn end(&mut self) -> Option<CaptureEvent> {
        self.finish(false)
    }

    /// Finalize the gesture abnormally. The partial stroke is kept.
    pub fn cancel(&mut self) -> Option<CaptureEvent> {
        self.finish(true)
    }

    fn finish(&mut self, cancelled: bool) -> Option<CaptureEvent> {
        if !self.is_drawing() {
            log::debug!("Ignoring gesture end (cancelled: {}): no active stroke", cancelled);
            return None;
        }

        self.stroke.seal();
        self.state = CaptureState::Idle;
        Some(CaptureEvent::DrawingEnded { cancelled })
    }

    /// Discard the stroke and return to idle, signalling the reset.
    pub fn reset(&mut self) -> CaptureEvent {
        self.clear();
        CaptureEvent::Reset
    }

    /// Discard the stroke and return to idle without a notification.
    pub fn clear(&mut self) {
        self.stroke = FreehandStroke::new();
        self.state = CaptureState::Idle;
    }

    fn sample(&self, point: Point) -> StrokeSample {
        let timestamp = self.epoch.elapsed().as_secs_f64() * 1000.0;
        StrokeSample::new(point.x, point.y, timestamp)
    }
}
