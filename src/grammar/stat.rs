//! Statistical transformations for Grammar of Graphics.
//!
//! Only the contract lives here: which transformation a layer asks for and
//! which geometry draws its output. The computation is external.

use super::geom::GeomKind;
use super::role::{ComponentRole, HasRole};

/// Statistical transformation type.
#[derive(Debug, Clone, PartialEq)]
pub enum Stat {
    /// No transformation (identity).
    Identity,
    /// Count occurrences.
    Count,
    /// Bin continuous data.
    Bin {
        /// Number of bins.
        bins: usize,
    },
    /// Compute density estimation.
    Density,
    /// Compute summary statistics (for boxplot).
    Boxplot,
    /// Fit a smooth curve.
    Smooth,
    /// Compute 2D binning (for tile/heatmap).
    Bin2d {
        /// Number of x bins.
        bins_x: usize,
        /// Number of y bins.
        bins_y: usize,
    },
}

impl Stat {
    /// Create a binning stat.
    #[must_use]
    pub fn bin(bins: usize) -> Self {
        Stat::Bin { bins }
    }

    /// Create a 2D binning stat.
    #[must_use]
    pub fn bin2d(bins_x: usize, bins_y: usize) -> Self {
        Stat::Bin2d { bins_x, bins_y }
    }

    /// Geometry used when this statistic is added on its own.
    #[must_use]
    pub fn default_geom(&self) -> GeomKind {
        match self {
            Stat::Identity => GeomKind::Point,
            Stat::Count | Stat::Bin { .. } => GeomKind::Bar,
            Stat::Density | Stat::Smooth => GeomKind::Line,
            Stat::Boxplot => GeomKind::Boxplot,
            Stat::Bin2d { .. } => GeomKind::Tile,
        }
    }
}

impl HasRole for Stat {
    fn role(&self) -> ComponentRole {
        ComponentRole::Stat
    }
}
