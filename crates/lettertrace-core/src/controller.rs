//! Tracing controller: the facade a hosting screen holds.

use crate::capture::{CaptureEvent, CaptureState, StrokeCapture};
use crate::config::TracingConfig;
use crate::glyph::{GlyphDefinition, GlyphRepository, GlyphSource, SourceKind};
use crate::input::GestureEvent;
use crate::normalize::{NormalizedPath, normalize};
use crate::stroke::{DrawingSnapshot, FreehandStroke};
use kurbo::{BezPath, Point};
use std::fmt;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Unique identifier of a controller instance, used in log output.
pub type ControllerId = Uuid;

/// Controller shared between a gesture context and a render context.
pub type SharedTracingController = Arc<Mutex<TracingController>>;

type Callback = Box<dyn FnMut() + Send>;
type SnapshotCallback = Box<dyn FnMut(&DrawingSnapshot) + Send>;

/// Host callbacks. All optional.
///
/// Callbacks run synchronously inside the controller call that triggered
/// them. When the controller is shared through [`SharedTracingController`],
/// that call holds the mutex, so a callback must not lock the same
/// controller again or it will deadlock. Send work elsewhere (a channel, a
/// flag) instead.
#[derive(Default)]
pub struct TracingCallbacks {
    on_reset: Option<Callback>,
    on_verify: Option<SnapshotCallback>,
    on_drawing_start: Option<Callback>,
    on_drawing_end: Option<Callback>,
    on_path_change: Option<SnapshotCallback>,
}

impl TracingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_reset(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_reset = Some(Box::new(f));
        self
    }

    pub fn on_verify(mut self, f: impl FnMut(&DrawingSnapshot) + Send + 'static) -> Self {
        self.on_verify = Some(Box::new(f));
        self
    }

    pub fn on_drawing_start(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_drawing_start = Some(Box::new(f));
        self
    }

    pub fn on_drawing_end(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_drawing_end = Some(Box::new(f));
        self
    }

    pub fn on_path_change(mut self, f: impl FnMut(&DrawingSnapshot) + Send + 'static) -> Self {
        self.on_path_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TracingCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingCallbacks")
            .field("on_reset", &self.on_reset.is_some())
            .field("on_verify", &self.on_verify.is_some())
            .field("on_drawing_start", &self.on_drawing_start.is_some())
            .field("on_drawing_end", &self.on_drawing_end.is_some())
            .field("on_path_change", &self.on_path_change.is_some())
            .finish()
    }
}

/// What glyph to trace.
#[derive(Debug, Clone)]
pub enum LetterSource {
    /// An id looked up in the controller's repository.
    Id(String),
    /// A definition supplied directly by the host.
    Definition(GlyphDefinition),
}

impl LetterSource {
    /// Ad-hoc glyph from SVG markup.
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Definition(GlyphDefinition::from_source("<markup>", GlyphSource::Markup(markup.into())))
    }

    /// Ad-hoc glyph from a raw path-command string.
    pub fn path_data(data: impl Into<String>) -> Self {
        Self::Definition(GlyphDefinition::from_source("<path>", GlyphSource::PathData(data.into())))
    }
}

impl From<&str> for LetterSource {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for LetterSource {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<char> for LetterSource {
    fn from(id: char) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<GlyphDefinition> for LetterSource {
    fn from(glyph: GlyphDefinition) -> Self {
        Self::Definition(glyph)
    }
}

/// Non-blocking problems met while resolving a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The requested id is unknown; `fallback` was used instead.
    UnknownGlyph { requested: String, fallback: String },
    /// No representation of the glyph produced a path; the outline is empty.
    Unresolvable { id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownGlyph { requested, fallback } => {
                write!(f, "unknown glyph {:?}, using {:?}", requested, fallback)
            }
            Diagnostic::Unresolvable { id } => write!(f, "glyph {:?} has no usable path", id),
        }
    }
}

/// Owns the active glyph outline and freehand stroke of one canvas.
///
/// Every mutation and the callback it triggers run inside the same
/// `&mut self` call; wrap the controller with [`into_shared`] when gestures
/// and rendering live on different threads.
///
/// [`into_shared`]: TracingController::into_shared
pub struct TracingController {
    id: ControllerId,
    config: TracingConfig,
    repository: GlyphRepository,
    /// Authored path of the active glyph, kept for re-normalization.
    glyph_source: BezPath,
    glyph_id: String,
    resolved_from: Option<SourceKind>,
    glyph: NormalizedPath,
    capture: StrokeCapture,
    callbacks: TracingCallbacks,
    diagnostics: Vec<Diagnostic>,
}

impl fmt::Debug for TracingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingController")
            .field("id", &self.id)
            .field("glyph_id", &self.glyph_id)
            .field("state", &self.capture.state())
            .field("samples", &self.capture.stroke().len())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl TracingController {
    /// Create a controller over the built-in glyph table.
    pub fn new(source: impl Into<LetterSource>, config: TracingConfig) -> Self {
        Self::with_repository(source, config, GlyphRepository::builtin().clone())
    }

    /// Create a controller over a custom glyph table.
    pub fn with_repository(
        source: impl Into<LetterSource>,
        config: TracingConfig,
        repository: GlyphRepository,
    ) -> Self {
        let mut controller = Self {
            id: Uuid::new_v4(),
            glyph: NormalizedPath::empty(config.canvas_size),
            config,
            repository,
            glyph_source: BezPath::new(),
            glyph_id: String::new(),
            resolved_from: None,
            capture: StrokeCapture::new(),
            callbacks: TracingCallbacks::default(),
            diagnostics: Vec::new(),
        };
        controller.set_letter_path(source);
        controller
    }

    /// Attach host callbacks, replacing any previous set.
    pub fn with_callbacks(mut self, callbacks: TracingCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn set_callbacks(&mut self, callbacks: TracingCallbacks) {
        self.callbacks = callbacks;
    }

    /// Wrap for use from several threads.
    ///
    /// Callbacks fire while the caller holds the lock; they must not lock
    /// this controller themselves.
    pub fn into_shared(self) -> SharedTracingController {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn config(&self) -> &TracingConfig {
        &self.config
    }

    pub fn repository(&self) -> &GlyphRepository {
        &self.repository
    }

    /// Id of the active glyph (after any fallback).
    pub fn glyph_id(&self) -> &str {
        &self.glyph_id
    }

    /// Representation the active glyph was resolved from.
    pub fn resolved_from(&self) -> Option<SourceKind> {
        self.resolved_from
    }

    /// The active glyph outline in canvas space.
    pub fn glyph_path(&self) -> &NormalizedPath {
        &self.glyph
    }

    /// The live freehand stroke.
    pub fn stroke(&self) -> &FreehandStroke {
        self.capture.stroke()
    }

    pub fn state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Diagnostics from the most recent glyph resolution.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Discard the stroke and notify the host via `on_reset`.
    pub fn reset_drawing(&mut self) {
        let event = self.capture.reset();
        self.dispatch(event);
    }

    /// Discard the stroke silently.
    pub fn clear_drawing(&mut self) {
        self.capture.clear();
    }

    /// Copy of the current stroke, including a gesture still in progress.
    pub fn get_drawing_path(&self) -> DrawingSnapshot {
        self.capture.snapshot()
    }

    /// Hand the current stroke to the host's `on_verify` hook.
    ///
    /// No judgement is made here; the snapshot is also returned.
    pub fn verify(&mut self) -> DrawingSnapshot {
        let snapshot = self.capture.snapshot();
        if let Some(on_verify) = self.callbacks.on_verify.as_mut() {
            on_verify(&snapshot);
        }
        snapshot
    }

    /// Switch to another glyph. The freehand stroke is left untouched.
    pub fn set_letter_path(&mut self, source: impl Into<LetterSource>) {
        self.diagnostics.clear();

        let resolved = match source.into() {
            LetterSource::Id(id) => self.resolve_id(&id),
            LetterSource::Definition(glyph) => Self::resolve_definition(&glyph, &mut self.diagnostics),
        };

        let (glyph_id, path, kind) = resolved;
        log::info!(
            "Controller {}: tracing glyph {:?} ({:?})",
            self.id,
            glyph_id,
            kind
        );
        self.glyph_id = glyph_id;
        self.glyph_source = path;
        self.resolved_from = kind;
        self.renormalize();
    }

    /// Change the canvas size and refit the active glyph.
    pub fn set_canvas_size(&mut self, canvas_size: f64) {
        self.config.canvas_size = canvas_size;
        self.renormalize();
    }

    /// Feed one gesture event, dispatching the resulting callback.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<CaptureEvent> {
        let produced = self.capture.handle(event);
        if let Some(event) = produced {
            self.dispatch(event);
        }
        produced
    }

    pub fn begin(&mut self, point: Point) -> Option<CaptureEvent> {
        self.handle_gesture(GestureEvent::Begin { position: point })
    }

    pub fn move_to(&mut self, point: Point) -> Option<CaptureEvent> {
        self.handle_gesture(GestureEvent::Move { position: point })
    }

    pub fn end(&mut self) -> Option<CaptureEvent> {
        self.handle_gesture(GestureEvent::End)
    }

    pub fn cancel(&mut self) -> Option<CaptureEvent> {
        self.handle_gesture(GestureEvent::Cancel)
    }

    fn dispatch(&mut self, event: CaptureEvent) {
        let callbacks = &mut self.callbacks;
        match event {
            CaptureEvent::DrawingStarted => {
                if let Some(f) = callbacks.on_drawing_start.as_mut() {
                    f();
                }
            }
            CaptureEvent::PathChanged => {
                if let Some(f) = callbacks.on_path_change.as_mut() {
                    f(&self.capture.snapshot());
                }
            }
            CaptureEvent::DrawingEnded { cancelled } => {
                if cancelled {
                    log::debug!("Controller {}: gesture cancelled, keeping partial stroke", self.id);
                }
                if let Some(f) = callbacks.on_drawing_end.as_mut() {
                    f();
                }
            }
            CaptureEvent::Reset => {
                if let Some(f) = callbacks.on_reset.as_mut() {
                    f();
                }
            }
        }
    }

    /// Look up `id`, falling back to the configured default glyph.
    fn resolve_id(&mut self, id: &str) -> (String, BezPath, Option<SourceKind>) {
        let glyph = match self.repository.lookup(id) {
            Ok(glyph) => Some(glyph),
            Err(err) => {
                let fallback = self.config.fallback_glyph.clone();
                log::warn!("Controller {}: {}, falling back to {:?}", self.id, err, fallback);
                self.diagnostics.push(Diagnostic::UnknownGlyph {
                    requested: id.to_string(),
                    fallback: fallback.clone(),
                });
                self.repository.lookup(&fallback).ok()
            }
        };

        match glyph {
            Some(glyph) => Self::resolve_definition(glyph, &mut self.diagnostics),
            None => {
                self.diagnostics.push(Diagnostic::Unresolvable { id: id.to_string() });
                log::warn!("Controller {}: no glyph available for {:?}", self.id, id);
                (id.to_string(), BezPath::new(), None)
            }
        }
    }

    fn resolve_definition(
        glyph: &GlyphDefinition,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (String, BezPath, Option<SourceKind>) {
        match glyph.resolve() {
            Some((path, kind)) => (glyph.id().to_string(), path, Some(kind)),
            None => {
                log::warn!("Glyph {:?} has no usable representation", glyph.id());
                diagnostics.push(Diagnostic::Unresolvable {
                    id: glyph.id().to_string(),
                });
                (glyph.id().to_string(), BezPath::new(), None)
            }
        }
    }

    fn renormalize(&mut self) {
        self.glyph = normalize(&self.glyph_source, self.config.canvas_size, self.config.padding_ratio);
    }
}
