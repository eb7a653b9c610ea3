//! Color types and color-like plot values.
//!
//! Provides RGBA and HSLA color representations, plus [`ColorLike`] and
//! [`ColorsLike`]: the user-facing color values accepted by aesthetics and
//! scales. The tokens `"None"` and `"none"` mean "draw no color". They are
//! kept as [`ColorLike::NoColor`] end to end and never replaced by a palette
//! entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grammar::{Column, DataValue};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green, as the named color `green`.
    pub const GREEN: Self = Self::new(0, 128, 0, 255);
    /// Opaque full-intensity green, as the named color `lime`.
    pub const LIME: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').ok_or_else(|| Error::InvalidColor(hex.to_string()))?;
        if !(digits.len() == 6 || digits.len() == 8)
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Look up a named color.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "lime" => Self::LIME,
            "blue" => Self::BLUE,
            "grey" | "gray" => Self::rgb(128, 128, 128),
            "darkgrey" | "darkgray" => Self::rgb(169, 169, 169),
            "lightgrey" | "lightgray" => Self::rgb(211, 211, 211),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "brown" => Self::rgb(165, 42, 42),
            "pink" => Self::rgb(255, 192, 203),
            "steelblue" => Self::rgb(70, 130, 180),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, (self.a * 255.0) as u8)
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Evenly spaced hues, starting at 15 degrees.
///
/// Used by discrete color scales that were given no explicit values.
#[must_use]
pub fn hue_palette(n: usize) -> Vec<Rgba> {
    (0..n).map(|i| Hsla::hsl(15.0 + 360.0 * i as f32 / n as f32, 0.65, 0.6).to_rgba()).collect()
}

/// A single color value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorLike {
    /// A color token: a name or hex string.
    Token(String),
    /// Explicitly no color (`"None"` / `"none"`).
    NoColor,
}

impl ColorLike {
    /// Whether this is the explicit "no color" value.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, ColorLike::NoColor)
    }

    /// Resolve to a concrete color. `Ok(None)` means draw nothing.
    pub fn to_rgba(&self) -> Result<Option<Rgba>> {
        match self {
            ColorLike::NoColor => Ok(None),
            ColorLike::Token(t) if t.starts_with('#') => Rgba::from_hex(t).map(Some),
            ColorLike::Token(t) => {
                Rgba::named(t).map(Some).ok_or_else(|| Error::InvalidColor(t.clone()))
            }
        }
    }
}

impl From<&str> for ColorLike {
    fn from(s: &str) -> Self {
        match s {
            "None" | "none" => ColorLike::NoColor,
            _ => ColorLike::Token(s.to_string()),
        }
    }
}

impl From<String> for ColorLike {
    fn from(s: String) -> Self {
        match s.as_str() {
            "None" | "none" => ColorLike::NoColor,
            _ => ColorLike::Token(s),
        }
    }
}

impl From<Rgba> for ColorLike {
    fn from(c: Rgba) -> Self {
        ColorLike::Token(c.to_hex())
    }
}

impl From<ColorLike> for String {
    fn from(c: ColorLike) -> Self {
        match c {
            ColorLike::Token(t) => t,
            ColorLike::NoColor => "none".to_string(),
        }
    }
}

impl fmt::Display for ColorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorLike::Token(t) => f.write_str(t),
            ColorLike::NoColor => f.write_str("none"),
        }
    }
}

/// One or many color values.
///
/// Serializes as a single token, a list of tokens, or for a column a
/// `{ column, values }` map, so every form but `Array` round trips. An array
/// reads back as a `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorsRepr", into = "ColorsRepr")]
pub enum ColorsLike {
    /// A single color.
    One(ColorLike),
    /// A list of colors.
    List(Vec<ColorLike>),
    /// A named column of colors.
    Column {
        /// Column name.
        name: String,
        /// Colors in row order.
        values: Vec<ColorLike>,
    },
    /// A fixed array of colors.
    Array(Box<[ColorLike]>),
}

impl ColorsLike {
    /// Build from a data column of color tokens.
    pub fn from_column(column: &Column) -> Result<Self> {
        let values = column
            .values()
            .iter()
            .map(|v| match v {
                DataValue::Text(s) => Ok(ColorLike::from(s.as_str())),
                other => Err(Error::InvalidColor(format!(
                    "column '{}' holds non-text value '{other}'",
                    column.name()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ColorsLike::Column { name: column.name().to_string(), values })
    }

    /// All colors in order.
    #[must_use]
    pub fn as_slice(&self) -> &[ColorLike] {
        match self {
            ColorsLike::One(c) => std::slice::from_ref(c),
            ColorsLike::List(v) | ColorsLike::Column { values: v, .. } => v,
            ColorsLike::Array(a) => a,
        }
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Resolve every color. `None` entries are explicit "no color".
    pub fn to_rgba(&self) -> Result<Vec<Option<Rgba>>> {
        self.as_slice().iter().map(ColorLike::to_rgba).collect()
    }
}

impl From<ColorLike> for ColorsLike {
    fn from(c: ColorLike) -> Self {
        ColorsLike::One(c)
    }
}

impl From<&str> for ColorsLike {
    fn from(s: &str) -> Self {
        ColorsLike::One(s.into())
    }
}

impl From<Vec<ColorLike>> for ColorsLike {
    fn from(v: Vec<ColorLike>) -> Self {
        ColorsLike::List(v)
    }
}

impl From<&[&str]> for ColorsLike {
    fn from(v: &[&str]) -> Self {
        ColorsLike::List(v.iter().map(|&s| s.into()).collect())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorsRepr {
    One(ColorLike),
    Many(Vec<ColorLike>),
    Column { column: String, values: Vec<ColorLike> },
}

impl From<ColorsRepr> for ColorsLike {
    fn from(r: ColorsRepr) -> Self {
        match r {
            ColorsRepr::One(c) => ColorsLike::One(c),
            ColorsRepr::Many(v) => ColorsLike::List(v),
            ColorsRepr::Column { column, values } => ColorsLike::Column { name: column, values },
        }
    }
}

impl From<ColorsLike> for ColorsRepr {
    fn from(c: ColorsLike) -> Self {
        match c {
            ColorsLike::One(c) => ColorsRepr::One(c),
            ColorsLike::List(v) => ColorsRepr::Many(v),
            ColorsLike::Column { name, values } => ColorsRepr::Column { column: name, values },
            ColorsLike::Array(a) => ColorsRepr::Many(a.into_vec()),
        }
    }
}
