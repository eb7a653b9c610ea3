//! # ggrammar
//!
//! Typed contracts for a layered grammar of graphics.
//!
//! ggrammar defines what a plot is made of and how the pieces combine: data
//! sources that normalize to one table shape, a closed aesthetic vocabulary,
//! components that know their role, and facet strip labelling. Drawing is left
//! to a renderer that consumes a [`grammar::BuiltPlot`].
//!
//! ## Features
//!
//! - **Data normalization**: tables, producers and convertible objects resolve once per build
//! - **Composable plots**: every component combines purely into a new [`grammar::Plot`]
//! - **Checked bindings**: one scale and one guide per aesthetic, `colour` is `color`
//! - **Strip labelling**: `label_value`, `label_both`, `label_context`, functions and dictionaries
//!
//! ## Quick Start
//!
//! ```rust
//! use ggrammar::prelude::*;
//!
//! let mut df = TabularData::new();
//! df.add_column_f32("bill", &[39.1, 46.5, 49.3])?;
//! df.add_column_str("species", &["Adelie", "Chinstrap", "Gentoo"])?;
//!
//! let plot = Plot::new()
//!     .data(df)
//!     .aes(AestheticMapping::new().x("bill").y("bill").color("species"))
//!     .try_extend([
//!         Component::from(Geom::point()),
//!         Scale::discrete(ScaledAesthetic::Color).into(),
//!         Facet::wrap("species", 3).labeller("label_both").into(),
//!     ])?;
//!
//! let built = plot.build()?;
//! assert_eq!(built.strips()[0].text(), "species: Adelie");
//! # Ok::<(), ggrammar::Error>(())
//! ```
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

/// Color types, color tokens and palettes.
pub mod color;

/// Plot defaults loaded from YAML.
pub mod config;

/// Error types.
pub mod error;

/// Grammar of Graphics contracts.
pub mod grammar;

pub use error::{Error, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::color::{ColorLike, ColorsLike, Rgba};
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        AestheticMapping, Component, ComponentRole, Coord, DataSource, Facet, Geom, Guide, HasRole,
        Layer, LayerDataSource, Plot, PlotAddable, Position, Scale, ScaledAesthetic, Stat,
        TabularData, Theme, Watermark,
    };
}
