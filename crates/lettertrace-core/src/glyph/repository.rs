//! Static glyph table.

use super::{GlyphDefinition, GlyphError, GlyphSource, generator};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded table: Latin capitals and lowercase letters plus generated shapes.
const BUILTIN_GLYPHS: &str = include_str!("../../data/glyphs.json");

/// Serialized form of a glyph table.
#[derive(Debug, Deserialize)]
struct GlyphTable {
    glyphs: Vec<GlyphEntry>,
}

/// One table row; any subset of representations, at least one present.
#[derive(Debug, Deserialize)]
struct GlyphEntry {
    id: String,
    #[serde(default)]
    markup: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    generator: Option<String>,
}

impl GlyphEntry {
    fn into_definition(self) -> Result<GlyphDefinition, GlyphError> {
        let mut sources = Vec::new();
        if let Some(markup) = self.markup {
            sources.push(GlyphSource::Markup(markup));
        }
        if let Some(path) = self.path {
            sources.push(GlyphSource::PathData(path));
        }
        if let Some(name) = self.generator {
            let generate = generator(&name).ok_or_else(|| GlyphError::UnknownGenerator {
                id: self.id.clone(),
                name,
            })?;
            sources.push(GlyphSource::Generator(generate));
        }
        GlyphDefinition::new(self.id, sources)
    }
}

/// Read-only mapping from glyph id to definition, in table order.
///
/// Lookups never pick a default: an unknown id is [`GlyphError::NotFound`]
/// and the caller decides what to fall back to.
#[derive(Debug, Clone, Default)]
pub struct GlyphRepository {
    glyphs: Vec<GlyphDefinition>,
    index: HashMap<String, usize>,
}

impl GlyphRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded table, parsed once per process.
    pub fn builtin() -> &'static GlyphRepository {
        static BUILTIN: OnceLock<GlyphRepository> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_json(BUILTIN_GLYPHS).unwrap_or_else(|err| {
                log::error!("Embedded glyph table is invalid: {}", err);
                Self::new()
            })
        })
    }

    /// Build a repository from a JSON table (`{"glyphs": [{"id": .., ..}]}`).
    pub fn from_json(json: &str) -> Result<Self, GlyphError> {
        let table: GlyphTable =
            serde_json::from_str(json).map_err(|e| GlyphError::Table(e.to_string()))?;

        let mut repository = Self::new();
        for entry in table.glyphs {
            repository.insert(entry.into_definition()?)?;
        }
        Ok(repository)
    }

    /// Add a definition. Ids are unique.
    pub fn insert(&mut self, glyph: GlyphDefinition) -> Result<(), GlyphError> {
        if self.index.contains_key(glyph.id()) {
            return Err(GlyphError::Duplicate(glyph.id().to_string()));
        }
        self.index.insert(glyph.id().to_string(), self.glyphs.len());
        self.glyphs.push(glyph);
        Ok(())
    }

    /// Find a glyph by id.
    pub fn lookup(&self, id: &str) -> Result<&GlyphDefinition, GlyphError> {
        self.index
            .get(id)
            .map(|&i| &self.glyphs[i])
            .ok_or_else(|| GlyphError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Glyph ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.glyphs.iter().map(GlyphDefinition::id)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
