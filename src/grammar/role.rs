//! Component roles.
//!
//! Every plot component carries exactly one nominal role. Combination and
//! lookup dispatch on the role tag, never on the concrete type.

use std::fmt;

/// The role a plot component plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentRole {
    /// Aesthetic mapping.
    Aes,
    /// Coordinate system.
    Coord,
    /// Faceting specification.
    Facet,
    /// Geometry.
    Geom,
    /// A whole plot.
    Plot,
    /// Legend or colorbar.
    Guide,
    /// A single layer.
    Layer,
    /// An ordered collection of layers.
    Layers,
    /// Position adjustment.
    Position,
    /// Scale of unspecified kind.
    Scale,
    /// Continuous scale.
    ScaleContinuous,
    /// Discrete scale.
    ScaleDiscrete,
    /// Statistical transformation.
    Stat,
    /// Theme.
    Theme,
    /// Watermark image.
    Watermark,
}

impl ComponentRole {
    /// Human readable role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentRole::Aes => "aesthetic mapping",
            ComponentRole::Coord => "coordinate system",
            ComponentRole::Facet => "facet",
            ComponentRole::Geom => "geometry",
            ComponentRole::Plot => "plot",
            ComponentRole::Guide => "guide",
            ComponentRole::Layer => "layer",
            ComponentRole::Layers => "layers",
            ComponentRole::Position => "position",
            ComponentRole::Scale => "scale",
            ComponentRole::ScaleContinuous => "continuous scale",
            ComponentRole::ScaleDiscrete => "discrete scale",
            ComponentRole::Stat => "statistic",
            ComponentRole::Theme => "theme",
            ComponentRole::Watermark => "watermark",
        }
    }

    /// Whether this role is a scale or one of its sub-roles.
    #[must_use]
    pub const fn is_scale(self) -> bool {
        matches!(
            self,
            ComponentRole::Scale | ComponentRole::ScaleContinuous | ComponentRole::ScaleDiscrete
        )
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by every concrete plot component.
pub trait HasRole {
    /// The role tag of this component.
    fn role(&self) -> ComponentRole;
}
