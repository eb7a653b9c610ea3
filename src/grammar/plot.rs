//! The plot value and the combine protocol.
//!
//! A [`Plot`] is built by folding components into it left to right. Every
//! combine returns a new plot and leaves its input untouched, so a failed
//! combine keeps the previous plot usable.

use tracing::debug;

use crate::config::PlotConfig;
use crate::error::{Error, Result};

use super::aes::{Aesthetic, AestheticMapping};
use super::coord::Coord;
use super::data::{DataSource, LayerDataSource, Normalize, TabularData};
use super::facet::{Facet, FacetSetup, Strip};
use super::geom::{Geom, GeomKind};
use super::guide::Guide;
use super::labeller::{LabelOptions, LabellerSpec};
use super::position::Position;
use super::role::{ComponentRole, HasRole};
use super::scale::{OverridePolicy, Scale, Scales};
use super::stat::Stat;
use super::theme::Theme;
use super::watermark::Watermark;

/// A layer in the plot.
#[derive(Debug, Clone)]
pub struct Layer {
    geom: Geom,
    stat: Option<Stat>,
    position: Position,
    mapping: AestheticMapping,
    data: LayerDataSource,
    inherit_aes: bool,
}

impl Layer {
    /// Create a new layer from a geometry.
    #[must_use]
    pub fn new(geom: Geom) -> Self {
        Self {
            stat: geom.stat.clone(),
            mapping: geom.mapping.clone().unwrap_or_default(),
            geom,
            position: Position::Identity,
            data: LayerDataSource::Inherit,
            inherit_aes: true,
        }
    }

    /// Layer drawn with the statistic's default geometry.
    #[must_use]
    pub fn from_stat(stat: Stat) -> Self {
        Self::new(Geom::new(stat.default_geom())).stat(stat)
    }

    /// Set the statistic.
    #[must_use]
    pub fn stat(mut self, stat: Stat) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Set the position adjustment.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Add aesthetics to this layer's own mapping; later keys win.
    ///
    /// The plot's mapping is merged underneath at build time unless
    /// [`Layer::inherit_aes`] is off.
    #[must_use]
    pub fn aes(mut self, mapping: AestheticMapping) -> Self {
        self.mapping = self.mapping.merge(&mapping);
        self
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn data(mut self, data: impl Into<LayerDataSource>) -> Self {
        self.data = data.into();
        self
    }

    /// Whether the plot's aesthetics apply to this layer (default `true`).
    #[must_use]
    pub fn inherit_aes(mut self, inherit: bool) -> Self {
        self.inherit_aes = inherit;
        self
    }

    /// Attach a layer-level component: a geometry, statistic, position or
    /// mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleComponent`] for any other role.
    pub fn with(self, component: impl Into<Component>) -> Result<Self> {
        match component.into() {
            Component::Geom(geom) => {
                let mut layer = Layer::new(geom);
                layer.stat = layer.stat.or(self.stat);
                layer.position = self.position;
                layer.mapping = self.mapping.merge(&layer.mapping);
                layer.data = self.data;
                layer.inherit_aes = self.inherit_aes;
                Ok(layer)
            }
            Component::Stat(stat) => Ok(self.stat(stat)),
            Component::Position(position) => Ok(self.position(position)),
            Component::Mapping(mapping) => Ok(self.aes(mapping)),
            other => Err(Error::IncompatibleComponent {
                expected: ComponentRole::Layer,
                received: other.role(),
            }),
        }
    }

    /// Geometry.
    #[must_use]
    pub fn geom(&self) -> &Geom {
        &self.geom
    }

    /// Statistic, falling back to the geometry's default.
    #[must_use]
    pub fn effective_stat(&self) -> Stat {
        self.stat.clone().unwrap_or_else(|| self.geom.effective_stat())
    }

    /// Position adjustment.
    #[must_use]
    pub fn position_adjustment(&self) -> Position {
        self.position
    }

    /// Layer-level aesthetics.
    #[must_use]
    pub fn mapping(&self) -> &AestheticMapping {
        &self.mapping
    }

    fn resolve(
        &self,
        base: Option<&TabularData>,
        plot_mapping: &AestheticMapping,
    ) -> Result<BuiltLayer> {
        let data = self.data.normalize(base)?;
        let mapping =
            if self.inherit_aes { plot_mapping.merge(&self.mapping) } else { self.mapping.clone() };
        Ok(BuiltLayer {
            geom: self.geom.kind,
            stat: self.effective_stat(),
            position: self.position,
            mapping,
            data,
        })
    }
}

impl From<Geom> for Layer {
    fn from(geom: Geom) -> Self {
        Layer::new(geom)
    }
}

impl HasRole for Layer {
    fn role(&self) -> ComponentRole {
        ComponentRole::Layer
    }
}

impl HasRole for Vec<Layer> {
    fn role(&self) -> ComponentRole {
        ComponentRole::Layers
    }
}

/// Any plot component, for heterogeneous sequences.
#[derive(Debug, Clone)]
pub enum Component {
    /// A layer.
    Layer(Layer),
    /// Several layers, added in order.
    Layers(Vec<Layer>),
    /// A geometry (becomes a layer).
    Geom(Geom),
    /// A statistic (becomes a layer).
    Stat(Stat),
    /// A position adjustment (layer-level only).
    Position(Position),
    /// Aesthetic mapping.
    Mapping(AestheticMapping),
    /// A scale.
    Scale(Scale),
    /// A guide.
    Guide(Guide),
    /// A coordinate system.
    Coord(Coord),
    /// A facet specification.
    Facet(Facet),
    /// A theme.
    Theme(Theme),
    /// A watermark.
    Watermark(Watermark),
    /// A whole plot (never addable to another plot).
    Plot(Box<Plot>),
}

impl HasRole for Component {
    fn role(&self) -> ComponentRole {
        match self {
            Component::Layer(c) => c.role(),
            Component::Layers(c) => c.role(),
            Component::Geom(c) => c.role(),
            Component::Stat(c) => c.role(),
            Component::Position(c) => c.role(),
            Component::Mapping(_) => ComponentRole::Aes,
            Component::Scale(c) => c.role(),
            Component::Guide(c) => c.role(),
            Component::Coord(c) => c.role(),
            Component::Facet(c) => c.role(),
            Component::Theme(c) => c.role(),
            Component::Watermark(c) => c.role(),
            Component::Plot(c) => c.role(),
        }
    }
}

macro_rules! component_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(c: $ty) -> Self {
                    Component::$variant(c)
                }
            }
        )*
    };
}

component_from!(
    Layer(Layer),
    Layers(Vec<Layer>),
    Geom(Geom),
    Stat(Stat),
    Position(Position),
    Mapping(AestheticMapping),
    Scale(Scale),
    Guide(Guide),
    Coord(Coord),
    Facet(Facet),
    Theme(Theme),
    Watermark(Watermark),
);

impl From<Plot> for Component {
    fn from(plot: Plot) -> Self {
        Component::Plot(Box::new(plot))
    }
}

impl HasRole for AestheticMapping {
    fn role(&self) -> ComponentRole {
        ComponentRole::Aes
    }
}

/// Something that can be added to a plot.
pub trait PlotAddable: HasRole {
    /// Return a new plot with this component added. `plot` is not modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the component cannot be added; the input plot is
    /// still valid.
    fn combine(self, plot: &Plot) -> Result<Plot>;
}

fn added(plot: Plot, role: ComponentRole) -> Result<Plot> {
    debug!(role = %role, layers = plot.layers.len(), "component added");
    Ok(plot)
}

fn not_addable(role: ComponentRole) -> Result<Plot> {
    Err(Error::IncompatibleComponent { expected: ComponentRole::Layer, received: role })
}

impl PlotAddable for Layer {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.layers.push(self);
        added(next, ComponentRole::Layer)
    }
}

impl PlotAddable for Vec<Layer> {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.layers.extend(self);
        added(next, ComponentRole::Layers)
    }
}

impl PlotAddable for Geom {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        Layer::new(self).combine(plot)
    }
}

impl PlotAddable for Stat {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        Layer::from_stat(self).combine(plot)
    }
}

impl PlotAddable for Position {
    fn combine(self, _plot: &Plot) -> Result<Plot> {
        not_addable(self.role())
    }
}

impl PlotAddable for AestheticMapping {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.mapping = next.mapping.merge(&self);
        added(next, ComponentRole::Aes)
    }
}

impl PlotAddable for Scale {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let role = self.role();
        let mut next = plot.clone();
        next.scales.insert(self, plot.duplicate_policy)?;
        added(next, role)
    }
}

impl PlotAddable for Guide {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        if let Some(i) = next.guides.iter().position(|g| g.aesthetic() == self.aesthetic()) {
            match self.on_duplicate().unwrap_or(plot.duplicate_policy) {
                OverridePolicy::Error => {
                    return Err(Error::DuplicateBinding {
                        role: ComponentRole::Guide,
                        aesthetic: self.aesthetic().name().to_string(),
                    });
                }
                OverridePolicy::LastWins => {
                    next.guides.remove(i);
                }
            }
        }
        next.guides.push(self);
        added(next, ComponentRole::Guide)
    }
}

impl PlotAddable for Coord {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.coord = self;
        added(next, ComponentRole::Coord)
    }
}

impl PlotAddable for Facet {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.facet = self;
        added(next, ComponentRole::Facet)
    }
}

impl PlotAddable for Theme {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.theme = self;
        added(next, ComponentRole::Theme)
    }
}

impl PlotAddable for Watermark {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        let mut next = plot.clone();
        next.watermarks.push(self);
        added(next, ComponentRole::Watermark)
    }
}

impl PlotAddable for Plot {
    fn combine(self, _plot: &Plot) -> Result<Plot> {
        not_addable(self.role())
    }
}

impl PlotAddable for Component {
    fn combine(self, plot: &Plot) -> Result<Plot> {
        match self {
            Component::Layer(c) => c.combine(plot),
            Component::Layers(c) => c.combine(plot),
            Component::Geom(c) => c.combine(plot),
            Component::Stat(c) => c.combine(plot),
            Component::Position(c) => c.combine(plot),
            Component::Mapping(c) => c.combine(plot),
            Component::Scale(c) => c.combine(plot),
            Component::Guide(c) => c.combine(plot),
            Component::Coord(c) => c.combine(plot),
            Component::Facet(c) => c.combine(plot),
            Component::Theme(c) => c.combine(plot),
            Component::Watermark(c) => c.combine(plot),
            Component::Plot(c) => c.combine(plot),
        }
    }
}

/// Grammar of Graphics plot specification.
#[derive(Debug, Clone)]
pub struct Plot {
    data: Option<DataSource>,
    mapping: AestheticMapping,
    layers: Vec<Layer>,
    scales: Scales,
    guides: Vec<Guide>,
    coord: Coord,
    facet: Facet,
    theme: Theme,
    watermarks: Vec<Watermark>,
    labeller: LabellerSpec,
    duplicate_policy: OverridePolicy,
    width: u32,
    height: u32,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl HasRole for Plot {
    fn role(&self) -> ComponentRole {
        ComponentRole::Plot
    }
}

impl Plot {
    /// Create an empty plot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            mapping: AestheticMapping::new(),
            layers: Vec::new(),
            scales: Scales::new(),
            guides: Vec::new(),
            coord: Coord::cartesian(),
            facet: Facet::none(),
            theme: Theme::grey(),
            watermarks: Vec::new(),
            labeller: LabellerSpec::default(),
            duplicate_policy: OverridePolicy::Error,
            width: 800,
            height: 600,
            title: None,
            xlab: None,
            ylab: None,
        }
    }

    /// Create an empty plot with configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] or [`Error::UnknownLabeller`] for
    /// names with no built-in counterpart.
    pub fn from_config(config: &PlotConfig) -> Result<Self> {
        let labeller = LabellerSpec::from(config.labeller.as_str());
        labeller.resolve(&LabelOptions::default())?;
        Ok(Self {
            theme: Theme::by_name(&config.theme)?,
            labeller,
            duplicate_policy: config.duplicate_scales,
            width: config.width,
            height: config.height,
            ..Self::new()
        })
    }

    /// Set the data.
    #[must_use]
    pub fn data(mut self, data: impl Into<DataSource>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set x and y data directly and map them.
    #[must_use]
    pub fn data_xy(mut self, x: &[f32], y: &[f32]) -> Self {
        self.data = Some(TabularData::from_xy(x, y).into());
        self.mapping = self.mapping.x("x").y("y");
        self
    }

    /// Set global aesthetics, replacing any already set.
    #[must_use]
    pub fn aes(mut self, mapping: AestheticMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Set dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set x-axis label.
    #[must_use]
    pub fn xlab(mut self, label: impl Into<String>) -> Self {
        self.xlab = Some(label.into());
        self
    }

    /// Set y-axis label.
    #[must_use]
    pub fn ylab(mut self, label: impl Into<String>) -> Self {
        self.ylab = Some(label.into());
        self
    }

    /// Return a new plot with `component` added.
    ///
    /// # Errors
    ///
    /// Propagates the component's combine error; `self` is unchanged.
    pub fn with(&self, component: impl PlotAddable) -> Result<Self> {
        component.combine(self)
    }

    /// Add components left to right, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first combine error; `self` is unchanged.
    pub fn try_extend<I>(&self, components: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: PlotAddable,
    {
        components.into_iter().try_fold(self.clone(), |plot, c| c.combine(&plot))
    }

    /// Layers, in order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Plot-level aesthetics.
    #[must_use]
    pub fn mapping(&self) -> &AestheticMapping {
        &self.mapping
    }

    /// Scales.
    #[must_use]
    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    /// The scale that handles `aesthetic`.
    #[must_use]
    pub fn find_scale(&self, aesthetic: impl Into<Aesthetic>) -> Option<&Scale> {
        self.scales.find(&aesthetic.into())
    }

    /// The guide for `aesthetic`.
    #[must_use]
    pub fn find_guide(&self, aesthetic: impl Into<Aesthetic>) -> Option<&Guide> {
        let aesthetic = aesthetic.into();
        self.guides.iter().find(|g| g.aesthetic() == &aesthetic)
    }

    /// Coordinate system.
    #[must_use]
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// Facet specification.
    #[must_use]
    pub fn facet(&self) -> &Facet {
        &self.facet
    }

    /// Theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Watermarks, in order added.
    #[must_use]
    pub fn watermarks(&self) -> &[Watermark] {
        &self.watermarks
    }

    /// Policy for duplicate scales and guides that set none of their own.
    #[must_use]
    pub fn duplicate_policy(&self) -> OverridePolicy {
        self.duplicate_policy
    }

    /// Number of components held for `role`. Single-valued roles count 1.
    #[must_use]
    pub fn components_with_role(&self, role: ComponentRole) -> usize {
        match role {
            ComponentRole::Layer | ComponentRole::Geom => self.layers.len(),
            ComponentRole::Scale => self.scales.len(),
            ComponentRole::ScaleContinuous | ComponentRole::ScaleDiscrete => {
                self.scales.iter().filter(|s| s.role() == role).count()
            }
            ComponentRole::Guide => self.guides.len(),
            ComponentRole::Watermark => self.watermarks.len(),
            ComponentRole::Facet => usize::from(!self.facet.is_null()),
            ComponentRole::Coord | ComponentRole::Theme | ComponentRole::Plot => 1,
            ComponentRole::Aes => usize::from(!self.mapping.is_empty()),
            ComponentRole::Layers | ComponentRole::Position | ComponentRole::Stat => 0,
        }
    }

    /// Resolve data sources, merge mappings and set up the facet.
    ///
    /// Each data source is resolved exactly once and the facet labeller is
    /// resolved once for all panels.
    ///
    /// # Errors
    ///
    /// Returns data errors ([`Error::InvalidDataShape`],
    /// [`Error::MissingBaseData`]), [`Error::MissingFacetVariable`] when no
    /// table holds every facet variable, and labeller errors.
    pub fn build(&self) -> Result<BuiltPlot> {
        let base = self.data.as_ref().map(|d| d.normalize(None)).transpose()?;
        let layers = self
            .layers
            .iter()
            .map(|l| l.resolve(base.as_ref(), &self.mapping))
            .collect::<Result<Vec<_>>>()?;
        let facet = self.facet.setup_with(&self.labeller)?;
        let tables: Vec<&TabularData> = base.iter().chain(layers.iter().map(|l| &l.data)).collect();
        let strips = facet.strips_across(&tables)?;
        debug!(layers = layers.len(), strips = strips.len(), "plot built");

        Ok(BuiltPlot {
            data: base,
            layers,
            scales: self.scales.clone(),
            guides: self.guides.clone(),
            coord: self.coord.clone(),
            facet,
            strips,
            theme: self.theme.clone(),
            watermarks: self.watermarks.clone(),
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            xlab: self.xlab.clone(),
            ylab: self.ylab.clone(),
        })
    }
}

/// A layer with its data resolved and its mapping merged.
#[derive(Debug, Clone)]
pub struct BuiltLayer {
    /// Geometry kind.
    pub geom: GeomKind,
    /// Statistic in effect.
    pub stat: Stat,
    /// Position adjustment.
    pub position: Position,
    /// Plot aesthetics merged with the layer's.
    pub mapping: AestheticMapping,
    /// Resolved data.
    pub data: TabularData,
}

impl BuiltLayer {
    /// Required aesthetics of the geometry that are not mapped.
    #[must_use]
    pub fn missing_aes(&self) -> Vec<Aesthetic> {
        self.geom
            .required_aes()
            .iter()
            .filter(|a| !self.mapping.contains(**a))
            .map(|a| Aesthetic::from(*a))
            .collect()
    }

    /// Mapped column names that the data does not have.
    #[must_use]
    pub fn unknown_columns(&self) -> Vec<&str> {
        self.mapping
            .keys()
            .filter_map(|a| self.mapping.column_for(a.clone()))
            .filter(|c| !self.data.has_column(c))
            .collect()
    }
}

/// A plot ready to hand to a renderer.
#[derive(Debug, Clone)]
pub struct BuiltPlot {
    data: Option<TabularData>,
    layers: Vec<BuiltLayer>,
    scales: Scales,
    guides: Vec<Guide>,
    coord: Coord,
    facet: FacetSetup,
    strips: Vec<Strip>,
    theme: Theme,
    watermarks: Vec<Watermark>,
    width: u32,
    height: u32,
    title: Option<String>,
    xlab: Option<String>,
    ylab: Option<String>,
}

impl BuiltPlot {
    /// Resolved plot data, if any was set.
    #[must_use]
    pub fn data(&self) -> Option<&TabularData> {
        self.data.as_ref()
    }

    /// Resolved layers.
    #[must_use]
    pub fn layers(&self) -> &[BuiltLayer] {
        &self.layers
    }

    /// The scale that handles `aesthetic`.
    #[must_use]
    pub fn scale_for(&self, aesthetic: impl Into<Aesthetic>) -> Option<&Scale> {
        self.scales.find(&aesthetic.into())
    }

    /// Guides.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Coordinate system.
    #[must_use]
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// Facet with its labeller resolved.
    #[must_use]
    pub fn facet(&self) -> &FacetSetup {
        &self.facet
    }

    /// Labelled strips, one per panel dimension value.
    #[must_use]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Watermarks.
    #[must_use]
    pub fn watermarks(&self) -> &[Watermark] {
        &self.watermarks
    }

    /// Dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Axis labels.
    #[must_use]
    pub fn axis_labels(&self) -> (Option<&str>, Option<&str>) {
        (self.xlab.as_deref(), self.ylab.as_deref())
    }
}
