//! Renderer trait abstraction.

use crate::stencil::StencilRegion;
use kurbo::{Affine, BezPath, Point, Rect};
use lettertrace_core::{FreehandStroke, NormalizedPath, TracingConfig, TracingController};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to draw one frame of a tracing canvas.
///
/// The glyph is drawn at its normalized position, scaled about the canvas
/// center by `letter_size`. The stencil is derived from that scaled outline,
/// so ink is clipped to what the user actually sees.
pub struct TraceFrame<'a> {
    /// Normalized glyph outline.
    pub glyph: &'a NormalizedPath,
    /// Freehand ink, in canvas coordinates.
    pub stroke: &'a FreehandStroke,
    /// Colors, widths and canvas size.
    pub config: &'a TracingConfig,
    /// Visible region for the ink.
    pub stencil: StencilRegion,
}

impl<'a> TraceFrame<'a> {
    /// Create a frame and compute its stencil.
    pub fn new(glyph: &'a NormalizedPath, stroke: &'a FreehandStroke, config: &'a TracingConfig) -> Self {
        let stencil = StencilRegion::from_glyph(
            &(Self::letter_transform(glyph, config) * glyph.path.clone()),
            config.stroke_width,
            config.effective_stencil_radius(),
        );
        log::trace!(
            "Stencil for {} glyph elements covers {:?}",
            glyph.path.elements().len(),
            stencil.bounds()
        );

        Self {
            glyph,
            stroke,
            config,
            stencil,
        }
    }

    /// Frame for the controller's current glyph and ink.
    pub fn from_controller(controller: &'a TracingController) -> Self {
        Self::new(controller.glyph_path(), controller.stroke(), controller.config())
    }

    fn letter_transform(glyph: &NormalizedPath, config: &TracingConfig) -> Affine {
        let half = glyph.canvas_size / 2.0;
        Affine::scale_about(config.letter_size, Point::new(half, half))
    }

    /// Transform applied to the normalized glyph when drawing it.
    pub fn glyph_transform(&self) -> Affine {
        Self::letter_transform(self.glyph, self.config)
    }

    /// Glyph outline in canvas space, `letter_size` applied.
    ///
    /// Backends stroke this with an identity transform so the line width
    /// stays `stroke_width` at every letter size, matching the stencil.
    pub fn glyph_outline(&self) -> BezPath {
        self.glyph_transform() * self.glyph.path.clone()
    }

    /// Canvas bounds.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.glyph.canvas_size, self.glyph.canvas_size)
    }

    /// Ink as a polyline.
    pub fn ink_path(&self) -> BezPath {
        self.stroke.to_path()
    }

    /// A lone sample renders as a dot of the ink width.
    pub fn ink_dot(&self) -> Option<kurbo::Circle> {
        match self.stroke.samples() {
            [sample] => Some(kurbo::Circle::new(
                sample.point(),
                self.config.drawing_stroke_width / 2.0,
            )),
            _ => None,
        }
    }
}

/// Trait for rendering backends.
///
/// Implementations can produce an SVG document, a Vello scene, or other
/// targets.
pub trait Renderer: Send + Sync {
    /// Build the drawing commands for a frame, replacing any previous ones.
    fn build_scene(&mut self, frame: &TraceFrame);

    /// Background fill, if the frame shows one.
    fn background_color(&self, frame: &TraceFrame) -> Option<Color> {
        frame
            .config
            .show_background
            .then(|| frame.config.background_color())
    }
}
