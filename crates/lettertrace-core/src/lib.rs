//! LetterTrace Core Library
//!
//! Platform-agnostic core of the guided letter-tracing canvas: glyph
//! acquisition, path normalization, freehand stroke capture and the
//! controller facade a hosting screen drives.

pub mod capture;
pub mod config;
pub mod controller;
pub mod extract;
pub mod glyph;
pub mod input;
pub mod normalize;
pub mod stroke;

pub use capture::{CaptureEvent, CaptureState, StrokeCapture};
pub use config::{ConfigError, SerializableColor, TracingConfig};
pub use controller::{
    ControllerId, Diagnostic, LetterSource, SharedTracingController, TracingCallbacks,
    TracingController,
};
pub use extract::{extract, extract_path_data};
pub use glyph::{GeneratorFn, GlyphDefinition, GlyphError, GlyphRepository, GlyphSource, SourceKind};
pub use input::GestureEvent;
pub use normalize::{NormalizedPath, normalize};
pub use stroke::{DrawingSnapshot, FreehandStroke, StrokeSample};
