//! Vello-based renderer implementation.

use crate::renderer::{Renderer, TraceFrame};
use kurbo::{Affine, Cap, Join, Stroke};
use peniko::{Fill, Mix};
use vello::Scene;

/// Vello-based renderer.
///
/// Ink is drawn inside a clip layer whose shape is the stencil outline, so
/// anything outside the tolerance band around the glyph is not composited.
pub struct VelloRenderer {
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (for rendering).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn round_stroke(width: f64) -> Stroke {
        Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, frame: &TraceFrame) {
        self.scene.reset();
        let config = frame.config;

        if let Some(background) = self.background_color(frame) {
            self.scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                background,
                None,
                &frame.canvas_rect(),
            );
        }

        if !frame.glyph.is_empty() {
            self.scene.stroke(
                &Self::round_stroke(config.stroke_width),
                Affine::IDENTITY,
                config.letter_color(),
                None,
                &frame.glyph_outline(),
            );
        }

        if frame.stroke.is_empty() {
            return;
        }

        self.scene
            .push_layer(Mix::Normal, 1.0, Affine::IDENTITY, frame.stencil.outline());
        if let Some(dot) = frame.ink_dot() {
            self.scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                config.drawing_color(),
                None,
                &dot,
            );
        } else {
            self.scene.stroke(
                &Self::round_stroke(config.drawing_stroke_width),
                Affine::IDENTITY,
                config.drawing_color(),
                None,
                &frame.ink_path(),
            );
        }
        self.scene.pop_layer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use lettertrace_core::{TracingConfig, TracingController};

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_ink() {
        let mut controller = TracingController::new("A", TracingConfig::default());
        controller.begin(Point::new(100.0, 100.0));
        controller.move_to(Point::new(140.0, 120.0));

        let mut renderer = VelloRenderer::new();
        renderer.build_scene(&TraceFrame::from_controller(&controller));
        assert!(!renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_letter_size_does_not_scale_line_width() {
        let config = TracingConfig {
            letter_size: 1.2,
            ..TracingConfig::default()
        };
        let mut controller = TracingController::new("O", config);
        controller.begin(Point::new(84.0, 180.0));
        controller.move_to(Point::new(84.0, 170.0));

        let mut renderer = VelloRenderer::new();
        renderer.build_scene(&TraceFrame::from_controller(&controller));

        // Geometry is pre-transformed; every encoded transform is the identity.
        let encoding = renderer.scene().encoding();
        assert!(!encoding.transforms.is_empty());
        for transform in &encoding.transforms {
            assert_eq!(transform.matrix, [1.0, 0.0, 0.0, 1.0]);
            assert_eq!(transform.translation, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_take_scene_leaves_empty() {
        let controller = TracingController::new("O", TracingConfig::default());
        let mut renderer = VelloRenderer::new();
        renderer.build_scene(&TraceFrame::from_controller(&controller));

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
