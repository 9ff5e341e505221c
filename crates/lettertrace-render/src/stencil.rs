//! Tracing stencil: the glyph outline dilated into a tolerance band.

use kurbo::{BezPath, Cap, Join, Point, Rect, Shape as KurboShape, Stroke, StrokeOpts};

/// Flattening tolerance for the dilated outline, in canvas pixels.
const STENCIL_TOLERANCE: f64 = 0.1;

/// Region in which freehand ink is visible.
///
/// Built by stroking the glyph path with its own width plus twice the
/// dilation radius (round caps and joins), which is the glyph's stroked
/// outline grown outward by `radius`. The result is a fillable path using
/// the non-zero rule.
#[derive(Debug, Clone, PartialEq)]
pub struct StencilRegion {
    outline: BezPath,
    radius: f64,
}

impl StencilRegion {
    /// Dilate a glyph stroked at `stroke_width` by `radius`.
    pub fn from_glyph(glyph: &BezPath, stroke_width: f64, radius: f64) -> Self {
        let width = stroke_width.max(0.0) + 2.0 * radius.max(0.0);
        if glyph.elements().is_empty() || width <= 0.0 {
            return Self::empty();
        }

        let style = Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round);
        let outline = kurbo::stroke(glyph.iter(), &style, &StrokeOpts::default(), STENCIL_TOLERANCE);
        Self { outline, radius }
    }

    /// A stencil that hides everything.
    pub fn empty() -> Self {
        Self {
            outline: BezPath::new(),
            radius: 0.0,
        }
    }

    /// The fillable outline.
    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_empty(&self) -> bool {
        self.outline.elements().is_empty()
    }

    pub fn bounds(&self) -> Rect {
        if self.is_empty() {
            Rect::ZERO
        } else {
            self.outline.bounding_box()
        }
    }

    /// Whether ink at `point` would be visible.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty() && self.outline.winding(point) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> BezPath {
        BezPath::from_svg("M 100 100 L 300 100").unwrap()
    }

    #[test]
    fn test_band_width() {
        // Stroke 20 dilated by 10: visible within 20 px of the centre line.
        let stencil = StencilRegion::from_glyph(&bar(), 20.0, 10.0);

        assert!(stencil.contains(Point::new(200.0, 100.0)));
        assert!(stencil.contains(Point::new(200.0, 119.0)));
        assert!(stencil.contains(Point::new(200.0, 81.0)));
        assert!(!stencil.contains(Point::new(200.0, 121.0)));
        assert!(!stencil.contains(Point::new(200.0, 79.0)));
    }

    #[test]
    fn test_round_caps_extend_past_ends() {
        let stencil = StencilRegion::from_glyph(&bar(), 20.0, 10.0);
        assert!(stencil.contains(Point::new(85.0, 100.0)));
        assert!(!stencil.contains(Point::new(75.0, 100.0)));

        let bounds = stencil.bounds();
        assert!((bounds.x0 - 80.0).abs() < 0.5);
        assert!((bounds.x1 - 320.0).abs() < 0.5);
    }

    #[test]
    fn test_zero_radius_matches_stroke() {
        let stencil = StencilRegion::from_glyph(&bar(), 20.0, 0.0);
        assert!(stencil.contains(Point::new(200.0, 109.0)));
        assert!(!stencil.contains(Point::new(200.0, 111.0)));
    }

    #[test]
    fn test_empty_glyph_hides_everything() {
        let stencil = StencilRegion::from_glyph(&BezPath::new(), 20.0, 10.0);
        assert!(stencil.is_empty());
        assert!(!stencil.contains(Point::new(0.0, 0.0)));
        assert_eq!(stencil.bounds(), Rect::ZERO);
    }
}
