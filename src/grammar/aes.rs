//! Aesthetic mappings for Grammar of Graphics.
//!
//! Maps data columns (or constants) to visual channels. The channel
//! vocabulary is closed: the scaled aesthetics below, plus extension keys
//! handed out by an [`AestheticRegistry`]. `colour` is accepted on input and
//! always stored as `color`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::color::ColorsLike;
use crate::error::{Error, Result};

use super::data::DataValue;

/// Every accepted spelling of a scaled aesthetic.
pub const SCALED_AESTHETIC_NAMES: [&str; 10] =
    ["x", "y", "alpha", "color", "colour", "fill", "linetype", "shape", "size", "stroke"];

/// Visual channels that a scale can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaledAesthetic {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Opacity.
    Alpha,
    /// Stroke/outline color (`color` or `colour`).
    Color,
    /// Fill color.
    Fill,
    /// Line dash pattern.
    Linetype,
    /// Point shape.
    Shape,
    /// Point/line size.
    Size,
    /// Stroke width.
    Stroke,
}

impl ScaledAesthetic {
    /// All scaled aesthetics, one per channel.
    pub const ALL: [ScaledAesthetic; 9] = [
        ScaledAesthetic::X,
        ScaledAesthetic::Y,
        ScaledAesthetic::Alpha,
        ScaledAesthetic::Color,
        ScaledAesthetic::Fill,
        ScaledAesthetic::Linetype,
        ScaledAesthetic::Shape,
        ScaledAesthetic::Size,
        ScaledAesthetic::Stroke,
    ];

    /// Canonical key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScaledAesthetic::X => "x",
            ScaledAesthetic::Y => "y",
            ScaledAesthetic::Alpha => "alpha",
            ScaledAesthetic::Color => "color",
            ScaledAesthetic::Fill => "fill",
            ScaledAesthetic::Linetype => "linetype",
            ScaledAesthetic::Shape => "shape",
            ScaledAesthetic::Size => "size",
            ScaledAesthetic::Stroke => "stroke",
        }
    }

    /// Parse any accepted spelling.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let aes = match name {
            "x" => ScaledAesthetic::X,
            "y" => ScaledAesthetic::Y,
            "alpha" => ScaledAesthetic::Alpha,
            "color" | "colour" => ScaledAesthetic::Color,
            "fill" => ScaledAesthetic::Fill,
            "linetype" => ScaledAesthetic::Linetype,
            "shape" => ScaledAesthetic::Shape,
            "size" => ScaledAesthetic::Size,
            "stroke" => ScaledAesthetic::Stroke,
            _ => return None,
        };
        Some(aes)
    }

    /// Whether this is `x` or `y`.
    #[must_use]
    pub const fn is_position(self) -> bool {
        matches!(self, ScaledAesthetic::X | ScaledAesthetic::Y)
    }

    /// Whether values of this channel are colors.
    #[must_use]
    pub const fn is_color(self) -> bool {
        matches!(self, ScaledAesthetic::Color | ScaledAesthetic::Fill)
    }
}

impl fmt::Display for ScaledAesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered non-scaled aesthetic key. Only an [`AestheticRegistry`] makes these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionKey(Arc<str>);

impl ExtensionKey {
    /// Key name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A key in an aesthetic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Aesthetic {
    /// One of the closed set of scaled aesthetics.
    Scaled(ScaledAesthetic),
    /// A registered extension key.
    Extension(ExtensionKey),
}

impl Aesthetic {
    /// Canonical key.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Aesthetic::Scaled(a) => a.name(),
            Aesthetic::Extension(k) => k.name(),
        }
    }

    /// The scaled aesthetic, if this is one.
    #[must_use]
    pub fn as_scaled(&self) -> Option<ScaledAesthetic> {
        match self {
            Aesthetic::Scaled(a) => Some(*a),
            Aesthetic::Extension(_) => None,
        }
    }

    /// Whether values of this channel are colors.
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.as_scaled().is_some_and(ScaledAesthetic::is_color)
    }
}

impl From<ScaledAesthetic> for Aesthetic {
    fn from(a: ScaledAesthetic) -> Self {
        Aesthetic::Scaled(a)
    }
}

/// Parses the baseline vocabulary only; use a registry for extension keys.
impl FromStr for Aesthetic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ScaledAesthetic::parse(s)
            .map(Aesthetic::Scaled)
            .ok_or_else(|| Error::UnknownAesthetic(s.to_string()))
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of extension keys accepted on top of the scaled aesthetics.
#[derive(Debug, Clone, Default)]
pub struct AestheticRegistry {
    extensions: BTreeSet<Arc<str>>,
}

impl AestheticRegistry {
    /// Registry with no extensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key. Built-in names resolve to their scaled aesthetic.
    pub fn register(&mut self, name: &str) -> Aesthetic {
        if let Some(a) = ScaledAesthetic::parse(name) {
            return Aesthetic::Scaled(a);
        }
        let key: Arc<str> = Arc::from(name);
        self.extensions.insert(Arc::clone(&key));
        Aesthetic::Extension(ExtensionKey(key))
    }

    /// Resolve a key name.
    pub fn resolve(&self, name: &str) -> Result<Aesthetic> {
        if let Some(a) = ScaledAesthetic::parse(name) {
            return Ok(Aesthetic::Scaled(a));
        }
        self.extensions
            .get(name)
            .map(|k| Aesthetic::Extension(ExtensionKey(Arc::clone(k))))
            .ok_or_else(|| Error::UnknownAesthetic(name.to_string()))
    }
}

/// What an aesthetic is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum AesValue {
    /// A data column by name.
    Column(String),
    /// A constant for every row.
    Constant(DataValue),
    /// Constant color(s), including explicit "no color".
    Color(ColorsLike),
}

/// Aesthetic mapping specification.
///
/// Keys are unique; binding a key twice (including `color` then `colour`)
/// replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AestheticMapping {
    entries: BTreeMap<Aesthetic, AesValue>,
}

impl AestheticMapping {
    /// Create a new empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, column)` pairs, resolving keys through `registry`.
    pub fn try_from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        registry: &AestheticRegistry,
    ) -> Result<Self> {
        pairs.into_iter().try_fold(Self::new(), |mapping, (key, column)| {
            Ok(mapping.set(registry.resolve(key)?, AesValue::Column(column.to_string())))
        })
    }

    /// Map a key (by name) to a column. Only the baseline vocabulary is accepted.
    pub fn map(self, key: &str, column: &str) -> Result<Self> {
        let aes: Aesthetic = key.parse()?;
        Ok(self.set(aes, AesValue::Column(column.to_string())))
    }

    /// Bind a key to a value.
    ///
    /// Text constants on color channels become [`AesValue::Color`].
    #[must_use]
    pub fn set(mut self, aes: impl Into<Aesthetic>, value: AesValue) -> Self {
        let aes = aes.into();
        let value = match value {
            AesValue::Constant(DataValue::Text(s)) if aes.is_color() => {
                AesValue::Color(ColorsLike::from(s.as_str()))
            }
            other => other,
        };
        self.entries.insert(aes, value);
        self
    }

    fn column(self, aes: ScaledAesthetic, column: &str) -> Self {
        self.set(aes, AesValue::Column(column.to_string()))
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(self, column: &str) -> Self {
        self.column(ScaledAesthetic::X, column)
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Y, column)
    }

    /// Map color to a column.
    #[must_use]
    pub fn color(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Color, column)
    }

    /// Map fill color to a column.
    #[must_use]
    pub fn fill(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Fill, column)
    }

    /// Map size to a column.
    #[must_use]
    pub fn size(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Size, column)
    }

    /// Map shape to a column.
    #[must_use]
    pub fn shape(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Shape, column)
    }

    /// Map alpha/opacity to a column.
    #[must_use]
    pub fn alpha(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Alpha, column)
    }

    /// Map linetype to a column.
    #[must_use]
    pub fn linetype(self, column: &str) -> Self {
        self.column(ScaledAesthetic::Linetype, column)
    }

    /// Set a fixed color.
    #[must_use]
    pub fn color_value(self, colors: impl Into<ColorsLike>) -> Self {
        self.set(ScaledAesthetic::Color, AesValue::Color(colors.into()))
    }

    /// Set a fixed fill.
    #[must_use]
    pub fn fill_value(self, colors: impl Into<ColorsLike>) -> Self {
        self.set(ScaledAesthetic::Fill, AesValue::Color(colors.into()))
    }

    /// Set a fixed size value.
    #[must_use]
    pub fn size_value(self, size: f32) -> Self {
        self.set(ScaledAesthetic::Size, AesValue::Constant(DataValue::Number(size)))
    }

    /// Set a fixed alpha value, clamped to `[0, 1]`.
    #[must_use]
    pub fn alpha_value(self, alpha: f32) -> Self {
        let alpha = DataValue::Number(alpha.clamp(0.0, 1.0));
        self.set(ScaledAesthetic::Alpha, AesValue::Constant(alpha))
    }

    /// Value bound to a key.
    #[must_use]
    pub fn get(&self, aes: impl Into<Aesthetic>) -> Option<&AesValue> {
        self.entries.get(&aes.into())
    }

    /// Value bound to a baseline key given by name.
    pub fn get_by_name(&self, key: &str) -> Result<Option<&AesValue>> {
        let aes: Aesthetic = key.parse()?;
        Ok(self.entries.get(&aes))
    }

    /// Column name bound to a key, if it is a column mapping.
    #[must_use]
    pub fn column_for(&self, aes: impl Into<Aesthetic>) -> Option<&str> {
        match self.get(aes) {
            Some(AesValue::Column(c)) => Some(c.as_str()),
            _ => None,
        }
    }

    /// Constant colors bound to a key.
    #[must_use]
    pub fn colors_for(&self, aes: impl Into<Aesthetic>) -> Option<&ColorsLike> {
        match self.get(aes) {
            Some(AesValue::Color(c)) => Some(c),
            _ => None,
        }
    }

    /// Whether the key is bound.
    #[must_use]
    pub fn contains(&self, aes: impl Into<Aesthetic>) -> bool {
        self.entries.contains_key(&aes.into())
    }

    /// Bound keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &Aesthetic> {
        self.entries.keys()
    }

    /// Bindings in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Aesthetic, &AesValue)> {
        self.entries.iter()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another mapping, with other taking precedence.
    #[must_use]
    pub fn merge(&self, other: &AestheticMapping) -> AestheticMapping {
        let mut entries = self.entries.clone();
        entries.extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        AestheticMapping { entries }
    }
}
