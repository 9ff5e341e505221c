//! LetterTrace Render Library
//!
//! Masked rendering of a tracing frame: the glyph outline, the freehand ink,
//! and the stencil that confines visible ink to the vicinity of the outline.
//! An SVG backend is always available; the Vello backend is behind the
//! default `vello-renderer` feature.

mod renderer;
pub mod stencil;
mod svg;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderResult, Renderer, RendererError, TraceFrame};
pub use stencil::StencilRegion;
pub use svg::SvgRenderer;

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
