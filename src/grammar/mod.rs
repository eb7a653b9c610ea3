//! Grammar of Graphics contracts.
//!
//! The typed vocabulary a layered grammar of graphics is assembled from,
//! after Wilkinson's Grammar of Graphics [Wilkinson 2005] and Wickham's
//! layered variant [Wickham 2010].
//!
//! # Components
//!
//! - **Data**: tables, producers and convertible objects, normalized to [`TabularData`]
//! - **Aesthetics**: mappings from columns or constants to visual channels
//! - **Layers**: a geometry, statistic and position with optional own data
//! - **Scales** and **Guides**: at most one of each per aesthetic
//! - **Coordinates**, **Facets**, **Themes** and **Watermarks**
//! - **Strip labelling**: named strategies, functions, formatters and dictionaries
//!
//! # Example
//!
//! ```rust
//! use ggrammar::grammar::*;
//!
//! let plot = Plot::new()
//!     .data_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
//!     .with(Geom::point())
//!     .and_then(|p| p.with(AestheticMapping::new().color_value("steelblue")))
//!     .unwrap();
//! let built = plot.build().unwrap();
//! assert_eq!(built.layers()[0].data.nrow(), 3);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod coord;
mod data;
mod facet;
mod geom;
mod guide;
mod labeller;
mod plot;
mod position;
mod role;
mod scale;
mod stat;
mod theme;
mod watermark;

pub use aes::{
    AesValue, Aesthetic, AestheticMapping, AestheticRegistry, ExtensionKey, ScaledAesthetic,
    SCALED_AESTHETIC_NAMES,
};
pub use coord::{Coord, Limits};
pub use data::{
    normalize, Column, DataShape, DataSource, DataValue, LayerDataSource, Normalize,
    TableConvertible, TabularData,
};
pub use facet::{Facet, FacetLayout, FacetSetup, Strip};
pub use geom::{Geom, GeomKind};
pub use guide::{Guide, GuideKind};
pub use labeller::{
    LabelError, LabelFn, LabelOptions, LabelRule, LabelStrategy, Labeller, LabellerSpec,
    StripDimension, StripLabelDetails, ValueFormatter,
};
pub use plot::{BuiltLayer, BuiltPlot, Component, Layer, Plot, PlotAddable};
pub use position::Position;
pub use role::{ComponentRole, HasRole};
pub use scale::{OverridePolicy, Scale, ScaleKind, Scales, Transform};
pub use stat::Stat;
pub use theme::{LegendPosition, Theme};
pub use watermark::Watermark;
