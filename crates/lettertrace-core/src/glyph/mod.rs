//! Glyph definitions and their representations.

mod generators;
mod repository;

pub use generators::{GENERATORS, generator};
pub use repository::GlyphRepository;

use crate::extract::extract;
use kurbo::BezPath;
use thiserror::Error;

/// Procedural path generator: a pure function producing a path.
pub type GeneratorFn = fn() -> BezPath;

/// Glyph errors.
#[derive(Debug, Error, PartialEq)]
pub enum GlyphError {
    #[error("Glyph not found: {0}")]
    NotFound(String),
    #[error("Glyph {0:?} has no representation")]
    NoRepresentation(String),
    #[error("Duplicate glyph: {0}")]
    Duplicate(String),
    #[error("Unknown generator {name:?} for glyph {id:?}")]
    UnknownGenerator { id: String, name: String },
    #[error("Glyph table error: {0}")]
    Table(String),
}

/// Which representation a glyph was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Markup,
    PathData,
    Generator,
}

/// One representation of a glyph's shape.
#[derive(Debug, Clone)]
pub enum GlyphSource {
    /// A vector image in SVG markup.
    Markup(String),
    /// A raw SVG path-command string.
    PathData(String),
    /// A procedural generator.
    Generator(GeneratorFn),
}

impl GlyphSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            GlyphSource::Markup(_) => SourceKind::Markup,
            GlyphSource::PathData(_) => SourceKind::PathData,
            GlyphSource::Generator(_) => SourceKind::Generator,
        }
    }

    /// Priority rank; lower resolves first.
    fn rank(&self) -> u8 {
        match self {
            GlyphSource::Markup(_) => 0,
            GlyphSource::PathData(_) => 1,
            GlyphSource::Generator(_) => 2,
        }
    }

    /// Try to produce a non-empty path from this representation.
    pub fn to_path(&self) -> Option<BezPath> {
        let path = match self {
            GlyphSource::Markup(markup) => extract(markup)?,
            GlyphSource::PathData(data) => match BezPath::from_svg(data) {
                Ok(path) => path,
                Err(err) => {
                    log::warn!("Unparsable glyph path data {:?}: {}", data, err);
                    return None;
                }
            },
            GlyphSource::Generator(generate) => generate(),
        };
        (!path.elements().is_empty()).then_some(path)
    }
}

/// A glyph: identifier plus one or more representations of its shape.
#[derive(Debug, Clone)]
pub struct GlyphDefinition {
    id: String,
    /// Sorted markup, then path data, then generator.
    sources: Vec<GlyphSource>,
}

impl GlyphDefinition {
    /// Create a definition. At least one representation is required.
    pub fn new(id: impl Into<String>, mut sources: Vec<GlyphSource>) -> Result<Self, GlyphError> {
        let id = id.into();
        if sources.is_empty() {
            return Err(GlyphError::NoRepresentation(id));
        }
        sources.sort_by_key(GlyphSource::rank);
        Ok(Self { id, sources })
    }

    /// Definition with a single representation.
    pub fn from_source(id: impl Into<String>, source: GlyphSource) -> Self {
        Self {
            id: id.into(),
            sources: vec![source],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sources(&self) -> &[GlyphSource] {
        &self.sources
    }

    /// Resolve to a path, trying markup, then path data, then generator.
    ///
    /// Returns `None` when every representation fails.
    pub fn resolve(&self) -> Option<(BezPath, SourceKind)> {
        self.sources.iter().find_map(|source| {
            let resolved = source.to_path().map(|path| (path, source.kind()));
            if resolved.is_none() {
                log::debug!("Glyph {:?}: {:?} representation failed, falling through", self.id, source.kind());
            }
            resolved
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BezPath {
        BezPath::from_svg("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap_or_default()
    }

    #[test]
    fn test_requires_representation() {
        assert_eq!(
            GlyphDefinition::new("x", Vec::new()).unwrap_err(),
            GlyphError::NoRepresentation("x".to_string())
        );
    }

    #[test]
    fn test_markup_preferred() {
        let glyph = GlyphDefinition::new(
            "A",
            vec![
                GlyphSource::Generator(square),
                GlyphSource::PathData("M 0 0 L 1 1".to_string()),
                GlyphSource::Markup(r#"<svg><path d="M 5 5 L 6 6"/></svg>"#.to_string()),
            ],
        )
        .unwrap();

        let (path, kind) = glyph.resolve().unwrap();
        assert_eq!(kind, SourceKind::Markup);
        assert_eq!(path, BezPath::from_svg("M 5 5 L 6 6").unwrap());
    }

    #[test]
    fn test_falls_through_failed_representations() {
        let glyph = GlyphDefinition::new(
            "B",
            vec![
                GlyphSource::Markup("<svg><g/></svg>".to_string()),
                GlyphSource::PathData("M 0 0 X".to_string()),
                GlyphSource::Generator(square),
            ],
        )
        .unwrap();

        let (path, kind) = glyph.resolve().unwrap();
        assert_eq!(kind, SourceKind::Generator);
        assert_eq!(path, square());
    }

    #[test]
    fn test_unresolvable() {
        let glyph = GlyphDefinition::from_source("?", GlyphSource::Markup("<svg/>".to_string()));
        assert!(glyph.resolve().is_none());
    }
}
