//! Fitting authored glyph paths into the canvas.

use kurbo::{Affine, BezPath, Rect, Shape as KurboShape, Vec2};

/// A glyph path transformed into canvas-pixel space.
///
/// Built once per glyph selection (and per canvas size) and never mutated;
/// a new selection replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPath {
    /// The transformed commands.
    pub path: BezPath,
    /// Bounding box of the authored input.
    pub source_bounds: Rect,
    /// Bounding box of `path`, centered in the canvas.
    pub bounds: Rect,
    /// Uniform scale that was applied (never above 1).
    pub scale: f64,
    /// The full scale-then-translate transform that was applied.
    pub transform: Affine,
    /// Side length of the square canvas this path was fitted to.
    pub canvas_size: f64,
}

impl NormalizedPath {
    /// An empty result for degenerate input.
    pub fn empty(canvas_size: f64) -> Self {
        Self {
            path: BezPath::new(),
            source_bounds: Rect::ZERO,
            bounds: Rect::ZERO,
            scale: 1.0,
            transform: Affine::IDENTITY,
            canvas_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }
}

/// Scale and center `commands` inside a square canvas of `canvas_size`.
///
/// The usable area is `canvas_size * (1 - 2 * padding_ratio)`. The glyph is
/// only ever shrunk to fit, never enlarged. Control points transform with the
/// same affine as end points, so command kinds and topology are preserved.
///
/// Empty paths, single points, non-finite geometry, non-positive canvas
/// sizes and padding outside `[0, 0.5)` all yield [`NormalizedPath::empty`].
pub fn normalize(commands: &BezPath, canvas_size: f64, padding_ratio: f64) -> NormalizedPath {
    if !(canvas_size.is_finite() && canvas_size > 0.0) || !(0.0..0.5).contains(&padding_ratio) {
        log::debug!(
            "Skipping normalization: canvas size {} / padding {}",
            canvas_size,
            padding_ratio
        );
        return NormalizedPath::empty(canvas_size);
    }
    if commands.elements().is_empty() {
        return NormalizedPath::empty(canvas_size);
    }

    let source_bounds = commands.bounding_box();
    let (width, height) = (source_bounds.width(), source_bounds.height());
    if !(width.is_finite() && height.is_finite()) || (width <= 0.0 && height <= 0.0) {
        log::debug!("Skipping normalization of degenerate bounds {:?}", source_bounds);
        return NormalizedPath::empty(canvas_size);
    }

    let available = canvas_size * (1.0 - 2.0 * padding_ratio);
    // A straight stroke has no extent on one axis; that axis cannot limit the scale.
    let fit = |extent: f64| if extent > 0.0 { available / extent } else { f64::INFINITY };
    let scale = fit(width).min(fit(height)).min(1.0);

    let canvas_center = Vec2::new(canvas_size / 2.0, canvas_size / 2.0);
    let offset = canvas_center - source_bounds.center().to_vec2() * scale;
    let transform = Affine::translate(offset) * Affine::scale(scale);

    let path = transform * commands.clone();
    let bounds = transform.transform_rect_bbox(source_bounds);

    NormalizedPath {
        path,
        source_bounds,
        bounds,
        scale,
        transform,
        canvas_size,
    }
}
