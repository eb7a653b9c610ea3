//! Faceting for Grammar of Graphics.
//!
//! Creates small multiples by splitting data on one or more variables, and
//! labels each panel's strip.

use crate::error::{Error, Result};

use super::data::{distinct_across, DataValue, TabularData};
use super::labeller::{LabelOptions, Labeller, LabellerSpec, StripDimension, StripLabelDetails};
use super::role::{ComponentRole, HasRole};

/// How panels are laid out.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FacetLayout {
    /// No faceting.
    #[default]
    Null,
    /// Facet into wrapped panels.
    Wrap {
        /// Variables to facet by.
        vars: Vec<String>,
        /// Number of columns, if fixed.
        ncol: Option<usize>,
    },
    /// Facet into a grid of panels.
    Grid {
        /// Row variables.
        rows: Vec<String>,
        /// Column variables.
        cols: Vec<String>,
    },
}

impl FacetLayout {
    /// All faceting variables, rows before columns.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        match self {
            FacetLayout::Null => Vec::new(),
            FacetLayout::Wrap { vars, .. } => vars.clone(),
            FacetLayout::Grid { rows, cols } => rows.iter().chain(cols).cloned().collect(),
        }
    }
}

/// Faceting specification.
#[derive(Debug, Clone, Default)]
pub struct Facet {
    layout: FacetLayout,
    labeller: Option<LabellerSpec>,
    options: LabelOptions,
}

impl Facet {
    /// No faceting.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Facet into rows.
    #[must_use]
    pub fn row(var: &str) -> Self {
        Self::grid_vars(&[var], &[])
    }

    /// Facet into columns.
    #[must_use]
    pub fn col(var: &str) -> Self {
        Self::grid_vars(&[], &[var])
    }

    /// Facet into a grid.
    #[must_use]
    pub fn grid(row: &str, col: &str) -> Self {
        Self::grid_vars(&[row], &[col])
    }

    /// Facet into a grid over several row and column variables.
    #[must_use]
    pub fn grid_vars(rows: &[&str], cols: &[&str]) -> Self {
        Self::from_layout(FacetLayout::Grid {
            rows: rows.iter().map(ToString::to_string).collect(),
            cols: cols.iter().map(ToString::to_string).collect(),
        })
    }

    /// Facet with wrapping.
    #[must_use]
    pub fn wrap(var: &str, ncol: usize) -> Self {
        Self::from_layout(FacetLayout::Wrap { vars: vec![var.to_string()], ncol: Some(ncol) })
    }

    /// Wrap over several variables.
    #[must_use]
    pub fn wrap_vars(vars: &[&str]) -> Self {
        Self::from_layout(FacetLayout::Wrap {
            vars: vars.iter().map(ToString::to_string).collect(),
            ncol: None,
        })
    }

    fn from_layout(layout: FacetLayout) -> Self {
        Self { layout, ..Self::default() }
    }

    /// Set the strip labeller.
    #[must_use]
    pub fn labeller(mut self, spec: impl Into<LabellerSpec>) -> Self {
        self.labeller = Some(spec.into());
        self
    }

    /// Keep one strip line per variable (default) or collapse into one.
    #[must_use]
    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.options.multi_line = multi_line;
        self
    }

    /// Separator for `label_both`.
    #[must_use]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.options.sep = sep.into();
        self
    }

    /// Layout.
    #[must_use]
    pub fn layout(&self) -> &FacetLayout {
        &self.layout
    }

    /// Whether this facet splits anything.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.layout == FacetLayout::Null
    }

    /// All faceting variables, rows before columns.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.layout.variables()
    }

    /// Resolve the labeller. Done once per plot build; panels share the result.
    pub fn setup(&self) -> Result<FacetSetup> {
        self.setup_with(&LabellerSpec::default())
    }

    /// Resolve the labeller, using `fallback` when none was set on the facet.
    pub fn setup_with(&self, fallback: &LabellerSpec) -> Result<FacetSetup> {
        let spec = self.labeller.as_ref().unwrap_or(fallback);
        Ok(FacetSetup { layout: self.layout.clone(), labeller: spec.resolve(&self.options)? })
    }
}

impl HasRole for Facet {
    fn role(&self) -> ComponentRole {
        ComponentRole::Facet
    }
}

/// One labelled facet strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    /// Variable values identifying the panel row, column or wrap cell.
    pub key: Vec<(String, DataValue)>,
    /// Labelled details.
    pub details: StripLabelDetails,
}

impl Strip {
    /// Displayed strip text.
    #[must_use]
    pub fn text(&self) -> String {
        self.details.text()
    }

    /// Strip dimension.
    #[must_use]
    pub fn dimension(&self) -> StripDimension {
        self.details.dimension()
    }
}

/// A facet with its labeller resolved.
#[derive(Debug, Clone, Default)]
pub struct FacetSetup {
    layout: FacetLayout,
    labeller: Labeller,
}

impl FacetSetup {
    /// Layout.
    #[must_use]
    pub fn layout(&self) -> &FacetLayout {
        &self.layout
    }

    /// Resolved labeller.
    #[must_use]
    pub fn labeller(&self) -> &Labeller {
        &self.labeller
    }

    /// Label one strip.
    pub fn label(&self, key: &[(String, DataValue)], dimension: StripDimension) -> Result<Strip> {
        let details = self.labeller.label(StripLabelDetails::from_key(key, dimension))?;
        Ok(Strip { key: key.to_vec(), details })
    }

    /// Strips for every distinct value combination in `data`, in order of
    /// first appearance. Grid facets yield row strips, then column strips.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFacetVariable`] when `data` lacks a facet
    /// variable, and labeller errors.
    pub fn strips(&self, data: &TabularData) -> Result<Vec<Strip>> {
        self.strips_across(&[data])
    }

    /// Strips over several tables. Only tables holding every facet variable
    /// contribute panels; the others are drawn in all of them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFacetVariable`] when no table holds every
    /// facet variable, and labeller errors.
    pub fn strips_across(&self, tables: &[&TabularData]) -> Result<Vec<Strip>> {
        let vars = self.layout.variables();
        if vars.is_empty() {
            return Ok(Vec::new());
        }
        let complete: Vec<&TabularData> =
            tables.iter().copied().filter(|t| vars.iter().all(|v| t.has_column(v))).collect();
        if complete.is_empty() {
            let missing = vars
                .iter()
                .find(|v| !tables.iter().any(|t| t.has_column(v)))
                .or_else(|| tables.first().and_then(|t| vars.iter().find(|v| !t.has_column(v))))
                .or(vars.first())
                .cloned()
                .unwrap_or_default();
            return Err(Error::MissingFacetVariable { variable: missing });
        }

        let groups: Vec<(&[String], StripDimension)> = match &self.layout {
            FacetLayout::Null => Vec::new(),
            FacetLayout::Wrap { vars, .. } => vec![(vars.as_slice(), StripDimension::Wrap)],
            FacetLayout::Grid { rows, cols } => vec![
                (rows.as_slice(), StripDimension::Rows),
                (cols.as_slice(), StripDimension::Cols),
            ],
        };
        let mut strips = Vec::new();
        for (group, dim) in groups {
            for key in distinct_across(&complete, group)? {
                strips.push(self.label(&key, dim)?);
            }
        }
        Ok(strips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::labeller::LabelStrategy;

    fn penguins() -> TabularData {
        let mut df = TabularData::new();
        df.add_column_str("species", &["Adelie", "Gentoo", "Adelie", "Chinstrap"]).unwrap();
        df.add_column_str("island", &["Dream", "Biscoe", "Biscoe", "Dream"]).unwrap();
        df
    }

    #[test]
    fn test_facet_grid() {
        let f = Facet::grid("category", "year");
        match f.layout() {
            FacetLayout::Grid { rows, cols } => {
                assert_eq!(rows, &vec!["category".to_string()]);
                assert_eq!(cols, &vec!["year".to_string()]);
            }
            _ => panic!("Expected Grid"),
        }
        assert_eq!(f.variables(), vec!["category", "year"]);
    }

    #[test]
    fn test_facet_wrap() {
        let f = Facet::wrap("category", 3);
        match f.layout() {
            FacetLayout::Wrap { vars, ncol } => {
                assert_eq!(vars, &vec!["category".to_string()]);
                assert_eq!(*ncol, Some(3));
            }
            _ => panic!("Expected Wrap"),
        }
    }

    #[test]
    fn test_facet_none() {
        let setup = Facet::none().setup().unwrap();
        assert!(Facet::none().is_null());
        assert!(setup.strips(&penguins()).unwrap().is_empty());
    }

    #[test]
    fn test_wrap_strips_first_appearance() {
        let setup = Facet::wrap("species", 2).setup().unwrap();
        let strips = setup.strips(&penguins()).unwrap();
        let texts: Vec<String> = strips.iter().map(Strip::text).collect();
        assert_eq!(texts, vec!["Adelie", "Gentoo", "Chinstrap"]);
    }

    #[test]
    fn test_grid_strips_by_dimension() {
        let setup = Facet::grid("species", "island").labeller("label_both").setup().unwrap();
        let strips = setup.strips(&penguins()).unwrap();
        let (rows, cols): (Vec<&Strip>, Vec<&Strip>) =
            strips.iter().partition(|s| s.dimension() == StripDimension::Rows);
        assert_eq!(rows.len(), 3);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].text(), "island: Dream");
    }

    #[test]
    fn test_wrap_two_vars_context() {
        let setup = Facet::wrap_vars(&["species", "island"])
            .labeller(LabelStrategy::Context)
            .multi_line(false)
            .setup()
            .unwrap();
        let strips = setup.strips(&penguins()).unwrap();
        assert_eq!(strips.len(), 4);
        assert_eq!(strips[0].text(), "species: Adelie, island: Dream");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let setup = Facet::wrap("year", 2).setup().unwrap();
        let err = setup.strips(&penguins()).unwrap_err();
        assert_eq!(err, Error::MissingFacetVariable { variable: "year".to_string() });

        let setup = Facet::wrap_vars(&["species", "year"]).labeller("label_both").setup().unwrap();
        let err = setup.strips(&penguins()).unwrap_err();
        assert_eq!(err, Error::MissingFacetVariable { variable: "year".to_string() });
    }

    #[test]
    fn test_strips_across_skip_incomplete_tables() {
        let mut years = TabularData::new();
        years.add_column_str("species", &["Gentoo", "Adelie"]).unwrap();
        years.add_column_f32("year", &[2008.0, 2009.0]).unwrap();

        let setup = Facet::wrap_vars(&["species", "year"]).multi_line(false).setup().unwrap();
        let strips = setup.strips_across(&[&penguins(), &years]).unwrap();
        let texts: Vec<String> = strips.iter().map(Strip::text).collect();
        assert_eq!(texts, vec!["Gentoo, 2008", "Adelie, 2009"]);
    }

    #[test]
    fn test_nan_rows_share_one_strip() {
        let mut df = TabularData::new();
        df.add_column_f32("year", &[f32::NAN, 2007.0, f32::NAN, f32::NAN]).unwrap();
        let strips = Facet::wrap("year", 2).setup().unwrap().strips(&df).unwrap();
        let texts: Vec<String> = strips.iter().map(Strip::text).collect();
        assert_eq!(texts, vec!["NaN", "2007"]);
    }

    #[test]
    fn test_setup_rejects_unknown_labeller() {
        let err = Facet::wrap("species", 2).labeller("label_nothing").setup().unwrap_err();
        assert!(matches!(err, Error::UnknownLabeller(_)));
    }

    #[test]
    fn test_label_single_panel() {
        let setup = Facet::wrap("year", 1).sep(" = ").labeller("label_both").setup().unwrap();
        let strip = setup
            .label(&[("year".to_string(), DataValue::Number(2008.0))], StripDimension::Wrap)
            .unwrap();
        assert_eq!(strip.text(), "year = 2008");
    }

    #[test]
    fn test_facet_role() {
        assert_eq!(Facet::none().role(), ComponentRole::Facet);
    }
}
