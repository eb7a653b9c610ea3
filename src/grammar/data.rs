//! Plot input data and its normalization.
//!
//! Every accepted input form (a table, a producer of a table, an object that
//! converts itself to a table) is resolved into a single canonical
//! [`TabularData`] at exactly one point: when the plot is built.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

/// A value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Null => f.write_str("NA"),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// A named column. Values are shared, so clones never copy them.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Arc<[DataValue]>,
}

impl Column {
    /// Create a column from any sequence of values.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = DataValue>) -> Self {
        Self { name: name.into(), values: values.into_iter().collect() }
    }

    /// Create a numeric column.
    #[must_use]
    pub fn from_f32(name: &str, data: &[f32]) -> Self {
        Self::new(name, data.iter().map(|&v| DataValue::Number(v)))
    }

    /// Create a text column.
    #[must_use]
    pub fn from_str_slice(name: &str, data: &[&str]) -> Self {
        Self::new(name, data.iter().map(|&s| DataValue::Text(s.to_string())))
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values.
    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The canonical rectangular table all plot input converges to.
///
/// Column names are unique and keep insertion order. Row order is never
/// changed by this crate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularData {
    columns: Vec<Column>,
    n_rows: usize,
}

impl TabularData {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking it is rectangular with unique names.
    pub fn try_from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Create from x and y arrays, truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f32], y: &[f32]) -> Self {
        let n = x.len().min(y.len());
        Self {
            columns: vec![Column::from_f32("x", &x[..n]), Column::from_f32("y", &y[..n])],
            n_rows: n,
        }
    }

    /// Add a column, consuming and returning the table.
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    /// Add a numeric column.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) -> Result<()> {
        self.push_column(Column::from_f32(name, data))
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.push_column(Column::from_str_slice(name, data))
    }

    fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::InvalidDataShape {
                found: format!("duplicate column '{}'", column.name()),
            });
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(Error::InvalidDataShape {
                found: format!(
                    "ragged columns: '{}' has {} rows, table has {}",
                    column.name(),
                    column.len(),
                    self.n_rows
                ),
            });
        }
        self.n_rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Get a column as f32 values, skipping non-numbers.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.column(name).map(|col| col.values().iter().filter_map(DataValue::as_f32).collect())
    }

    /// Get a column's values.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.column(name).map(Column::values)
    }

    /// Get a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Distinct combinations of the named columns, in order of first appearance.
    ///
    /// NaN values compare equal to each other, as do `0.0` and `-0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFacetVariable`] for a name with no column.
    pub fn distinct(&self, names: &[String]) -> Result<Vec<Vec<(String, DataValue)>>> {
        distinct_across(&[self], names)
    }
}

/// Hashable form of a [`DataValue`] used to group rows.
#[derive(Debug, PartialEq, Eq, Hash)]
enum GroupKey {
    Number(u32),
    Text(String),
    Null,
}

impl From<&DataValue> for GroupKey {
    fn from(value: &DataValue) -> Self {
        match value {
            DataValue::Number(n) if n.is_nan() => GroupKey::Number(f32::NAN.to_bits()),
            DataValue::Number(n) if n.to_bits() == (-0.0f32).to_bits() => {
                GroupKey::Number(0.0f32.to_bits())
            }
            DataValue::Number(n) => GroupKey::Number(n.to_bits()),
            DataValue::Text(s) => GroupKey::Text(s.clone()),
            DataValue::Null => GroupKey::Null,
        }
    }
}

/// Distinct combinations of `names` over several tables, in order of first
/// appearance. Every table must have every column.
pub(crate) fn distinct_across(
    tables: &[&TabularData],
    names: &[String],
) -> Result<Vec<Vec<(String, DataValue)>>> {
    let mut seen: HashSet<Vec<GroupKey>> = HashSet::new();
    let mut out = Vec::new();
    if names.is_empty() {
        return Ok(out);
    }
    for table in tables {
        let mut cols: Vec<&Column> = Vec::with_capacity(names.len());
        for name in names {
            let Some(column) = table.column(name) else {
                return Err(Error::MissingFacetVariable { variable: name.clone() });
            };
            cols.push(column);
        }
        for row in 0..table.nrow() {
            let group: Vec<GroupKey> =
                cols.iter().map(|c| GroupKey::from(&c.values()[row])).collect();
            if seen.insert(group) {
                out.push(
                    cols.iter().map(|c| (c.name().to_string(), c.values()[row].clone())).collect(),
                );
            }
        }
    }
    Ok(out)
}

/// What a producer or converter handed back, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DataShape {
    /// Already a table.
    Table(TabularData),
    /// Loose columns; tabular only if rectangular with unique names.
    Columns(Vec<Column>),
    /// A single column (a series); not tabular.
    Column(Column),
    /// A single value; not tabular.
    Value(DataValue),
}

impl DataShape {
    /// Validate into a table.
    pub fn into_table(self) -> Result<TabularData> {
        match self {
            DataShape::Table(t) => Ok(t),
            DataShape::Columns(cols) => TabularData::try_from_columns(cols),
            DataShape::Column(c) => Err(Error::InvalidDataShape {
                found: format!("a single column '{}'", c.name()),
            }),
            DataShape::Value(v) => {
                Err(Error::InvalidDataShape { found: format!("a scalar value '{v}'") })
            }
        }
    }
}

impl From<TabularData> for DataShape {
    fn from(t: TabularData) -> Self {
        DataShape::Table(t)
    }
}

impl From<Vec<Column>> for DataShape {
    fn from(cols: Vec<Column>) -> Self {
        DataShape::Columns(cols)
    }
}

/// An object that can convert itself into a table.
pub trait TableConvertible: Send + Sync {
    /// Convert to a table.
    fn to_table(&self) -> DataShape;
}

type Producer = Arc<dyn Fn() -> DataShape + Send + Sync>;
type LayerProducer = Arc<dyn Fn(&TabularData) -> DataShape + Send + Sync>;

/// Plot-level input data.
#[derive(Clone)]
pub enum DataSource {
    /// A literal table.
    Table(TabularData),
    /// A zero-argument producer.
    Producer(Producer),
    /// An object exposing a table conversion.
    Convertible(Arc<dyn TableConvertible>),
}

impl DataSource {
    /// Wrap a zero-argument producer.
    pub fn producer<F, S>(f: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Into<DataShape>,
    {
        DataSource::Producer(Arc::new(move || f().into()))
    }

    /// Wrap a convertible object.
    pub fn convertible(obj: impl TableConvertible + 'static) -> Self {
        DataSource::Convertible(Arc::new(obj))
    }

    fn kind(&self) -> &'static str {
        match self {
            DataSource::Table(_) => "table",
            DataSource::Producer(_) => "producer",
            DataSource::Convertible(_) => "convertible",
        }
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Table(t) => f.debug_tuple("Table").field(t).finish(),
            _ => write!(f, "DataSource::{}", self.kind()),
        }
    }
}

impl From<TabularData> for DataSource {
    fn from(t: TabularData) -> Self {
        DataSource::Table(t)
    }
}

/// Layer-level input data; producers derive from the plot's base table.
#[derive(Clone, Default)]
pub enum LayerDataSource {
    /// Use the plot's base table.
    #[default]
    Inherit,
    /// A literal table.
    Table(TabularData),
    /// A function of the plot's base table.
    Producer(LayerProducer),
    /// An object exposing a table conversion.
    Convertible(Arc<dyn TableConvertible>),
}

impl LayerDataSource {
    /// Wrap a function of the base table.
    pub fn producer<F, S>(f: F) -> Self
    where
        F: Fn(&TabularData) -> S + Send + Sync + 'static,
        S: Into<DataShape>,
    {
        LayerDataSource::Producer(Arc::new(move |base| f(base).into()))
    }

    /// Wrap a convertible object.
    pub fn convertible(obj: impl TableConvertible + 'static) -> Self {
        LayerDataSource::Convertible(Arc::new(obj))
    }

    fn kind(&self) -> &'static str {
        match self {
            LayerDataSource::Inherit => "inherit",
            LayerDataSource::Table(_) => "table",
            LayerDataSource::Producer(_) => "producer",
            LayerDataSource::Convertible(_) => "convertible",
        }
    }
}

impl fmt::Debug for LayerDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerDataSource::Table(t) => f.debug_tuple("Table").field(t).finish(),
            _ => write!(f, "LayerDataSource::{}", self.kind()),
        }
    }
}

impl From<TabularData> for LayerDataSource {
    fn from(t: TabularData) -> Self {
        LayerDataSource::Table(t)
    }
}

/// Anything that resolves to a [`TabularData`].
pub trait Normalize {
    /// Resolve into a table. `base` is the plot's resolved table, if any.
    ///
    /// Invokes the wrapped producer or converter exactly once.
    fn normalize(&self, base: Option<&TabularData>) -> Result<TabularData>;
}

impl Normalize for TabularData {
    fn normalize(&self, _base: Option<&TabularData>) -> Result<TabularData> {
        Ok(self.clone())
    }
}

impl Normalize for DataSource {
    fn normalize(&self, _base: Option<&TabularData>) -> Result<TabularData> {
        let table = match self {
            DataSource::Table(t) => t.clone(),
            DataSource::Producer(f) => f().into_table()?,
            DataSource::Convertible(obj) => obj.to_table().into_table()?,
        };
        debug!(
            source = self.kind(),
            rows = table.nrow(),
            cols = table.ncol(),
            "plot data resolved"
        );
        Ok(table)
    }
}

impl Normalize for LayerDataSource {
    fn normalize(&self, base: Option<&TabularData>) -> Result<TabularData> {
        let table = match self {
            LayerDataSource::Inherit => base
                .cloned()
                .ok_or_else(|| Error::MissingBaseData { context: "layer without data".into() })?,
            LayerDataSource::Table(t) => t.clone(),
            LayerDataSource::Producer(f) => {
                let base = base.ok_or_else(|| Error::MissingBaseData {
                    context: "layer data function".into(),
                })?;
                f(base).into_table()?
            }
            LayerDataSource::Convertible(obj) => obj.to_table().into_table()?,
        };
        debug!(
            source = self.kind(),
            rows = table.nrow(),
            cols = table.ncol(),
            "layer data resolved"
        );
        Ok(table)
    }
}

/// Resolve any data source into a table.
pub fn normalize<S>(source: &S, base: Option<&TabularData>) -> Result<TabularData>
where
    S: Normalize + ?Sized,
{
    source.normalize(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn penguins() -> TabularData {
        let mut df = TabularData::new();
        df.add_column_str("species", &["Adelie", "Gentoo", "Adelie"]).unwrap();
        df.add_column_f32("mass", &[3750.0, 5000.0, 3800.0]).unwrap();
        df
    }

    struct Frame(Vec<Column>);

    impl TableConvertible for Frame {
        fn to_table(&self) -> DataShape {
            DataShape::Columns(self.0.clone())
        }
    }

    #[test]
    fn test_tabular_from_xy() {
        let df = TabularData::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert_eq!(df.nrow(), 3);
        assert_eq!(df.ncol(), 2);
        assert_eq!(df.columns(), vec!["x", "y"]);
    }

    #[test]
    fn test_tabular_from_xy_unequal() {
        let df = TabularData::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(df.get_f32("x").unwrap().len(), 2);
        assert_eq!(df.get_f32("y").unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut df = TabularData::from_xy(&[1.0], &[2.0]);
        let err = df.add_column_f32("x", &[3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidDataShape { .. }));
        assert_eq!(df.ncol(), 2);
    }

    #[test]
    fn test_ragged_column_rejected() {
        let df = TabularData::from_xy(&[1.0, 2.0], &[3.0, 4.0]);
        let err = df.with_column(Column::from_f32("z", &[1.0])).unwrap_err();
        assert!(matches!(err, Error::InvalidDataShape { .. }));
    }

    #[test]
    fn test_columns_keep_order() {
        let df = penguins();
        assert_eq!(df.columns(), vec!["species", "mass"]);
    }

    #[test]
    fn test_distinct_first_appearance() {
        let df = penguins();
        let keys = df.distinct(&["species".to_string()]).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0][0].1, DataValue::from("Adelie"));
        assert_eq!(keys[1][0].1, DataValue::from("Gentoo"));
    }

    #[test]
    fn test_distinct_missing_column() {
        let err = penguins().distinct(&["year".to_string()]).unwrap_err();
        assert_eq!(err, Error::MissingFacetVariable { variable: "year".to_string() });
    }

    #[test]
    fn test_distinct_groups_nan_and_signed_zero() {
        let mut df = TabularData::new();
        df.add_column_f32("year", &[f32::NAN, 0.0, f32::NAN, -0.0, f32::NAN]).unwrap();
        let keys = df.distinct(&["year".to_string()]).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys[0][0].1.as_f32().is_some_and(f32::is_nan));
        assert_eq!(keys[1][0].1, DataValue::Number(0.0));
    }

    #[test]
    fn test_distinct_across_tables_keeps_first_appearance() {
        let mut other = TabularData::new();
        other.add_column_str("species", &["Chinstrap", "Adelie"]).unwrap();
        let df = penguins();
        let keys = distinct_across(&[&df, &other], &["species".to_string()]).unwrap();
        let names: Vec<String> = keys.iter().map(|k| k[0].1.to_string()).collect();
        assert_eq!(names, vec!["Adelie", "Gentoo", "Chinstrap"]);
    }

    #[test]
    fn test_normalize_table_is_identity() {
        let df = penguins();
        assert_eq!(normalize(&df, None).unwrap(), df);
        assert_eq!(normalize(&DataSource::from(df.clone()), None).unwrap(), df);
    }

    #[test]
    fn test_normalize_producer_called_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let src = DataSource::producer(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            penguins()
        });
        let df = normalize(&src, None).unwrap();
        assert_eq!(df.nrow(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_normalize_producer_non_tabular() {
        let src = DataSource::producer(|| DataShape::Value(DataValue::Number(1.0)));
        assert!(matches!(normalize(&src, None), Err(Error::InvalidDataShape { .. })));

        let src = DataSource::producer(|| DataShape::Column(Column::from_f32("x", &[1.0])));
        assert!(matches!(normalize(&src, None), Err(Error::InvalidDataShape { .. })));
    }

    #[test]
    fn test_normalize_convertible() {
        let frame =
            Frame(vec![Column::from_f32("a", &[1.0, 2.0]), Column::from_f32("b", &[3.0, 4.0])]);
        let df = normalize(&DataSource::convertible(frame), None).unwrap();
        assert_eq!(df.columns(), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_convertible_ragged() {
        let frame = Frame(vec![Column::from_f32("a", &[1.0, 2.0]), Column::from_f32("b", &[3.0])]);
        let err = normalize(&LayerDataSource::convertible(frame), None).unwrap_err();
        assert!(matches!(err, Error::InvalidDataShape { .. }));
    }

    #[test]
    fn test_layer_producer_uses_base() {
        let base = penguins();
        let src = LayerDataSource::producer(|df: &TabularData| {
            let species = df.column("species").cloned().into_iter().collect::<Vec<_>>();
            DataShape::Columns(species)
        });
        let df = normalize(&src, Some(&base)).unwrap();
        assert_eq!(df.columns(), vec!["species"]);
        assert_eq!(base.ncol(), 2);
    }

    #[test]
    fn test_layer_producer_without_base() {
        let src = LayerDataSource::producer(|df: &TabularData| df.clone());
        assert!(matches!(normalize(&src, None), Err(Error::MissingBaseData { .. })));
    }

    #[test]
    fn test_layer_inherit() {
        let base = penguins();
        assert_eq!(normalize(&LayerDataSource::Inherit, Some(&base)).unwrap(), base);
        assert!(matches!(
            normalize(&LayerDataSource::Inherit, None),
            Err(Error::MissingBaseData { .. })
        ));
    }

    #[test]
    fn test_data_value_display() {
        assert_eq!(DataValue::Number(1.0).to_string(), "1");
        assert_eq!(DataValue::Number(2.5).to_string(), "2.5");
        assert_eq!(DataValue::from("setosa").to_string(), "setosa");
        assert_eq!(DataValue::Null.to_string(), "NA");
    }

    #[test]
    fn test_data_value_conversions() {
        let num: DataValue = 42.0f32.into();
        assert_eq!(num.as_f32(), Some(42.0));
        assert_eq!(num.as_str(), None);

        let text: DataValue = "hello".into();
        assert_eq!(text.as_str(), Some("hello"));
        assert_eq!(text.as_f32(), None);
    }

    #[test]
    fn test_source_debug() {
        let src = DataSource::producer(TabularData::new);
        assert_eq!(format!("{src:?}"), "DataSource::producer");
    }
}
