//! Construction-time configuration of a tracing canvas.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable color representation (RGBA8), written as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or one of `black`, `white`, `transparent`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(value.to_string());
        match value.trim().to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::black()),
            "white" => return Ok(Self::white()),
            "transparent" => return Ok(Self::transparent()),
            _ => {}
        }

        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_string()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Options recognized when constructing a tracing canvas.
///
/// Every field has a default, so a JSON document only needs to name what it
/// overrides. The colors, widths, `letter_size` and `show_background` are
/// consumed by renderers; `canvas_size` and `padding_ratio` drive
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Glyph outline stroke width in canvas pixels.
    pub stroke_width: f64,
    pub letter_color: SerializableColor,
    pub background_color: SerializableColor,
    /// Freehand ink color.
    pub drawing_color: SerializableColor,
    /// Freehand ink stroke width in canvas pixels.
    pub drawing_stroke_width: f64,
    /// Multiplier applied by renderers on top of the normalization scale.
    pub letter_size: f64,
    /// Side length of the square canvas in pixels.
    pub canvas_size: f64,
    pub show_background: bool,
    /// Fraction of the canvas kept free on each side.
    pub padding_ratio: f64,
    /// Tracing tolerance around the glyph outline. `None` uses half the
    /// glyph stroke width.
    pub stencil_radius: Option<f64>,
    /// Glyph used when a requested id is unknown.
    pub fallback_glyph: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            stroke_width: 20.0,
            letter_color: SerializableColor::black(),
            background_color: SerializableColor::rgb(0x49, 0xED, 0xFF),
            drawing_color: SerializableColor::rgb(0xFA, 0x00, 0xFF),
            drawing_stroke_width: 6.0,
            letter_size: 1.0,
            canvas_size: 360.0,
            show_background: true,
            padding_ratio: 0.1,
            stencil_radius: None,
            fallback_glyph: "A".to_string(),
        }
    }
}

impl TracingConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that the renderers and normalizer rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("stroke_width", self.stroke_width)?;
        positive("drawing_stroke_width", self.drawing_stroke_width)?;
        positive("letter_size", self.letter_size)?;
        positive("canvas_size", self.canvas_size)?;

        if !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "padding_ratio",
                reason: format!("{} is outside [0, 0.5)", self.padding_ratio),
            });
        }
        if let Some(radius) = self.stencil_radius {
            if !(radius.is_finite() && radius >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "stencil_radius",
                    reason: format!("{} is negative or not finite", radius),
                });
            }
        }
        if self.fallback_glyph.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "fallback_glyph",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Dilation radius of the tracing stencil.
    pub fn effective_stencil_radius(&self) -> f64 {
        self.stencil_radius.unwrap_or(self.stroke_width / 2.0)
    }

    pub fn letter_color(&self) -> Color {
        self.letter_color.into()
    }

    pub fn background_color(&self) -> Color {
        self.background_color.into()
    }

    pub fn drawing_color(&self) -> Color {
        self.drawing_color.into()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{} must be a positive number", value),
        })
    }
}
