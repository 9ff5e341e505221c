//! SVG document renderer.

use crate::renderer::{RenderResult, Renderer, TraceFrame};
use kurbo::Shape as KurboShape;
use lettertrace_core::SerializableColor;
use peniko::Color;
use std::fmt;
use std::io::Write;

/// Id of the stencil `<clipPath>` element.
const STENCIL_ID: &str = "trace-stencil";

/// Renders a frame as a standalone SVG document.
///
/// The glyph outline is a stroked path; the ink is grouped under a
/// `<clipPath>` holding the dilated stencil outline.
#[derive(Debug, Default, Clone)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last built document. Empty before the first frame.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Take the last built document, leaving the renderer empty.
    pub fn take_document(&mut self) -> String {
        std::mem::take(&mut self.document)
    }

    /// Write the last built document.
    pub fn write_to(&self, mut writer: impl Write) -> RenderResult<()> {
        writer.write_all(self.document.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Build a frame and return its document.
    pub fn render(frame: &TraceFrame) -> String {
        let mut renderer = Self::new();
        renderer.build_scene(frame);
        renderer.take_document()
    }
}

/// `attr="#RRGGBB"` plus a matching opacity attribute when translucent.
fn paint(attr: &str, color: Color) -> String {
    let rgba = SerializableColor::from(color);
    let mut out = format!(r##"{attr}="#{:02X}{:02X}{:02X}""##, rgba.r, rgba.g, rgba.b);
    if rgba.a != 255 {
        out.push_str(&format!(r#" {attr}-opacity="{:.3}""#, rgba.a as f64 / 255.0));
    }
    out
}

/// Write the document for `frame` into `doc`.
fn write_document(doc: &mut impl fmt::Write, frame: &TraceFrame, background: Option<Color>) -> fmt::Result {
    let config = frame.config;
    let size = frame.glyph.canvas_size;

    writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;

    if let Some(background) = background {
        writeln!(
            doc,
            r#"  <rect x="0" y="0" width="{size}" height="{size}" {}/>"#,
            paint("fill", background)
        )?;
    }

    writeln!(
        doc,
        r#"  <defs><clipPath id="{STENCIL_ID}"><path d="{}" clip-rule="nonzero"/></clipPath></defs>"#,
        frame.stencil.outline().to_svg()
    )?;

    if !frame.glyph.is_empty() {
        writeln!(
            doc,
            r#"  <path d="{}" fill="none" {} stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            frame.glyph_outline().to_svg(),
            paint("stroke", config.letter_color()),
            config.stroke_width
        )?;
    }

    if !frame.stroke.is_empty() {
        writeln!(doc, r#"  <g clip-path="url(#{STENCIL_ID})">"#)?;
        if let Some(dot) = frame.ink_dot() {
            writeln!(
                doc,
                r#"    <path d="{}" {}/>"#,
                dot.to_path(0.1).to_svg(),
                paint("fill", config.drawing_color())
            )?;
        } else {
            writeln!(
                doc,
                r#"    <path d="{}" fill="none" {} stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                frame.ink_path().to_svg(),
                paint("stroke", config.drawing_color()),
                config.drawing_stroke_width
            )?;
        }
        writeln!(doc, "  </g>")?;
    }

    writeln!(doc, "</svg>")
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, frame: &TraceFrame) {
        let mut doc = String::new();
        if let Err(err) = write_document(&mut doc, frame, self.background_color(frame)) {
            log::error!("Failed to build SVG frame: {}", err);
            doc.clear();
        }
        log::debug!("Built SVG frame ({} bytes)", doc.len());
        self.document = doc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use lettertrace_core::{TracingConfig, TracingController};

    #[test]
    fn test_renderer_creation() {
        let renderer = SvgRenderer::new();
        assert!(renderer.document().is_empty());
    }

    #[test]
    fn test_document_structure() {
        let mut controller = TracingController::new("A", TracingConfig::default());
        controller.begin(Point::new(100.0, 100.0));
        controller.move_to(Point::new(120.0, 110.0));

        let frame = TraceFrame::from_controller(&controller);
        let doc = SvgRenderer::render(&frame);

        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(doc.contains(r##"fill="#49EDFF""##));
        assert!(doc.contains(r##"stroke="#000000" stroke-width="20""##));
        assert!(doc.contains(r##"stroke="#FA00FF" stroke-width="6""##));
        assert!(doc.contains(r#"<clipPath id="trace-stencil">"#));
        assert!(doc.contains(r#"<g clip-path="url(#trace-stencil)">"#));
    }

    #[test]
    fn test_hidden_background_and_no_ink() {
        let config = TracingConfig {
            show_background: false,
            ..TracingConfig::default()
        };
        let controller = TracingController::new("A", config);
        let doc = SvgRenderer::render(&TraceFrame::from_controller(&controller));

        assert!(!doc.contains("<rect"));
        assert!(!doc.contains("<g clip-path"));
    }

    #[test]
    fn test_letter_size_scales_outline_not_width() {
        let config = TracingConfig {
            letter_size: 1.2,
            ..TracingConfig::default()
        };
        let controller = TracingController::new("O", config);
        let frame = TraceFrame::from_controller(&controller);
        let doc = SvgRenderer::render(&frame);

        assert!(doc.contains(r##"stroke="#000000" stroke-width="20""##));
        assert!(doc.contains(&frame.glyph_outline().to_svg()));
    }

    #[test]
    fn test_translucent_paint() {
        let color = Color::from_rgba8(255, 0, 0, 51);
        assert_eq!(paint("fill", color), r##"fill="#FF0000" fill-opacity="0.200""##);
        assert_eq!(paint("stroke", Color::from_rgba8(0, 0, 0, 255)), r##"stroke="#000000""##);
    }

    #[test]
    fn test_write_to() {
        let controller = TracingController::new("O", TracingConfig::default());
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&TraceFrame::from_controller(&controller));

        let mut out = Vec::new();
        renderer.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), renderer.document());
    }
}
