//! Geometry types for Grammar of Graphics.
//!
//! A geometry names how a layer is drawn and which aesthetics it needs. The
//! drawing itself happens behind the rendering boundary.

use super::aes::{AestheticMapping, ScaledAesthetic};
use super::role::{ComponentRole, HasRole};
use super::stat::Stat;

/// Geometry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeomKind {
    /// Points.
    Point,
    /// Lines connecting points in x order.
    Line,
    /// Lines connecting points in data order.
    Path,
    /// Area under a line.
    Area,
    /// Bars whose height is a count.
    Bar,
    /// Bars whose height is given by y.
    Col,
    /// Binned bars.
    Histogram,
    /// Box plot.
    Boxplot,
    /// Violin plot.
    Violin,
    /// Tile/rectangle (for heatmaps).
    Tile,
    /// Text labels.
    Text,
    /// Horizontal reference line.
    Hline,
    /// Vertical reference line.
    Vline,
    /// Smooth curve.
    Smooth,
}

impl GeomKind {
    /// Name as used in error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GeomKind::Point => "point",
            GeomKind::Line => "line",
            GeomKind::Path => "path",
            GeomKind::Area => "area",
            GeomKind::Bar => "bar",
            GeomKind::Col => "col",
            GeomKind::Histogram => "histogram",
            GeomKind::Boxplot => "boxplot",
            GeomKind::Violin => "violin",
            GeomKind::Tile => "tile",
            GeomKind::Text => "text",
            GeomKind::Hline => "hline",
            GeomKind::Vline => "vline",
            GeomKind::Smooth => "smooth",
        }
    }

    /// Statistic paired with this geometry when none is given.
    #[must_use]
    pub fn default_stat(self) -> Stat {
        match self {
            GeomKind::Bar => Stat::Count,
            GeomKind::Histogram => Stat::Bin { bins: 30 },
            GeomKind::Boxplot => Stat::Boxplot,
            GeomKind::Violin => Stat::Density,
            GeomKind::Smooth => Stat::Smooth,
            _ => Stat::Identity,
        }
    }

    /// Aesthetics a layer of this kind must have bound.
    #[must_use]
    pub fn required_aes(self) -> &'static [ScaledAesthetic] {
        match self {
            GeomKind::Bar | GeomKind::Histogram => &[ScaledAesthetic::X],
            GeomKind::Hline => &[ScaledAesthetic::Y],
            GeomKind::Vline => &[ScaledAesthetic::X],
            _ => &[ScaledAesthetic::X, ScaledAesthetic::Y],
        }
    }
}

/// A geometry with its parameters.
#[derive(Debug, Clone)]
pub struct Geom {
    /// The geometry kind.
    pub kind: GeomKind,
    /// Geometry-specific aesthetics.
    pub mapping: Option<AestheticMapping>,
    /// Statistical transformation; the kind's default when unset.
    pub stat: Option<Stat>,
}

impl Geom {
    /// Create a geometry of the given kind.
    #[must_use]
    pub fn new(kind: GeomKind) -> Self {
        Self { kind, mapping: None, stat: None }
    }

    /// Create a point geometry.
    #[must_use]
    pub fn point() -> Self {
        Self::new(GeomKind::Point)
    }

    /// Create a line geometry.
    #[must_use]
    pub fn line() -> Self {
        Self::new(GeomKind::Line)
    }

    /// Create a bar geometry.
    #[must_use]
    pub fn bar() -> Self {
        Self::new(GeomKind::Bar)
    }

    /// Create a histogram geometry.
    #[must_use]
    pub fn histogram() -> Self {
        Self::new(GeomKind::Histogram)
    }

    /// Create a box plot geometry.
    #[must_use]
    pub fn boxplot() -> Self {
        Self::new(GeomKind::Boxplot)
    }

    /// Create a tile geometry (for heatmaps).
    #[must_use]
    pub fn tile() -> Self {
        Self::new(GeomKind::Tile)
    }

    /// Create a smooth line.
    #[must_use]
    pub fn smooth() -> Self {
        Self::new(GeomKind::Smooth)
    }

    /// Add geometry-specific aesthetics.
    #[must_use]
    pub fn aes(mut self, mapping: AestheticMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Set statistical transformation.
    #[must_use]
    pub fn stat(mut self, stat: Stat) -> Self {
        self.stat = Some(stat);
        self
    }

    /// The statistic this geometry will use.
    #[must_use]
    pub fn effective_stat(&self) -> Stat {
        self.stat.clone().unwrap_or_else(|| self.kind.default_stat())
    }
}

impl HasRole for Geom {
    fn role(&self) -> ComponentRole {
        ComponentRole::Geom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stat() {
        assert_eq!(Geom::bar().effective_stat(), Stat::Count);
        assert_eq!(Geom::point().effective_stat(), Stat::Identity);
        assert_eq!(Geom::histogram().effective_stat(), Stat::Bin { bins: 30 });
    }

    #[test]
    fn test_explicit_stat_wins() {
        let g = Geom::bar().stat(Stat::Identity);
        assert_eq!(g.effective_stat(), Stat::Identity);
    }

    #[test]
    fn test_geom_with_aes() {
        let g = Geom::point().aes(AestheticMapping::new().color("category"));
        assert_eq!(g.mapping.unwrap().column_for(ScaledAesthetic::Color), Some("category"));
    }

    #[test]
    fn test_required_aes() {
        assert_eq!(GeomKind::Hline.required_aes(), &[ScaledAesthetic::Y]);
        assert_eq!(GeomKind::Point.required_aes().len(), 2);
    }

    #[test]
    fn test_geom_role() {
        assert_eq!(Geom::line().role(), ComponentRole::Geom);
        assert_eq!(Geom::tile().kind.name(), "tile");
    }
}
