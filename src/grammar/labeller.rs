//! Facet strip labelling.
//!
//! A [`LabellerSpec`] is whatever the user passed (a strategy name, a
//! function over [`StripLabelDetails`], a value formatter, or a per-variable
//! dictionary). It is resolved once per facet setup into a [`Labeller`],
//! which every panel of that facet then shares.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Error, Result};

use super::data::DataValue;

/// Which strip a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripDimension {
    /// Row strip of a grid facet.
    Rows,
    /// Column strip of a grid facet.
    Cols,
    /// Strip of a wrapped facet.
    #[default]
    Wrap,
}

/// Raw variable/value pairs of one facet strip, before and after labelling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StripLabelDetails {
    variables: Vec<(String, String)>,
    dimension: StripDimension,
}

impl StripLabelDetails {
    /// Empty details for a strip dimension.
    #[must_use]
    pub fn new(dimension: StripDimension) -> Self {
        Self { variables: Vec::new(), dimension }
    }

    /// Details for one panel key, values stringified.
    #[must_use]
    pub fn from_key(key: &[(String, DataValue)], dimension: StripDimension) -> Self {
        Self {
            variables: key.iter().map(|(var, value)| (var.clone(), value.to_string())).collect(),
            dimension,
        }
    }

    /// Append a variable.
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((variable.into(), value.into()));
        self
    }

    /// Variable/label pairs in facet order.
    #[must_use]
    pub fn variables(&self) -> &[(String, String)] {
        &self.variables
    }

    /// Label of one variable.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.variables.iter().find(|(v, _)| v == variable).map(|(_, l)| l.as_str())
    }

    /// Replace the label of a variable, returning whether it was present.
    pub fn set(&mut self, variable: &str, label: impl Into<String>) -> bool {
        match self.variables.iter_mut().find(|(v, _)| v == variable) {
            Some((_, l)) => {
                *l = label.into();
                true
            }
            None => false,
        }
    }

    /// Strip dimension.
    #[must_use]
    pub fn dimension(&self) -> StripDimension {
        self.dimension
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Join all labels into a single `value` entry.
    #[must_use]
    pub fn collapse(self, sep: &str) -> Self {
        let joined = self.variables.iter().map(|(_, l)| l.as_str()).collect::<Vec<_>>().join(sep);
        Self { variables: vec![("value".to_string(), joined)], dimension: self.dimension }
    }

    /// Strip text: one line per variable.
    #[must_use]
    pub fn text(&self) -> String {
        self.variables.iter().map(|(_, l)| l.as_str()).collect::<Vec<_>>().join("\n")
    }

    fn map_labels(mut self, mut f: impl FnMut(&str, &str) -> String) -> Self {
        for (var, label) in &mut self.variables {
            *label = f(var, label);
        }
        self
    }
}

/// Built-in labelling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStrategy {
    /// The value alone.
    #[default]
    Value,
    /// `"<variable><sep><value>"`.
    Both,
    /// The value for a single variable, otherwise like [`LabelStrategy::Both`].
    Context,
}

impl LabelStrategy {
    /// Registered name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LabelStrategy::Value => "label_value",
            LabelStrategy::Both => "label_both",
            LabelStrategy::Context => "label_context",
        }
    }

    /// Apply to a details record.
    #[must_use]
    pub fn apply(self, details: StripLabelDetails, sep: &str) -> StripLabelDetails {
        match self {
            LabelStrategy::Value => details,
            LabelStrategy::Both => details.map_labels(|var, value| format!("{var}{sep}{value}")),
            LabelStrategy::Context if details.len() <= 1 => details,
            LabelStrategy::Context => LabelStrategy::Both.apply(details, sep),
        }
    }
}

impl FromStr for LabelStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "label_value" => Ok(LabelStrategy::Value),
            "label_both" => Ok(LabelStrategy::Both),
            "label_context" => Ok(LabelStrategy::Context),
            other => Err(Error::UnknownLabeller(other.to_string())),
        }
    }
}

/// Failure reported by a user labelling function.
///
/// Names the variable that could not be labelled when the function knows it;
/// otherwise the first variable of the strip is blamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelError {
    variable: Option<String>,
    message: String,
}

impl LabelError {
    /// A failure not tied to one variable.
    pub fn new(message: impl Into<String>) -> Self {
        Self { variable: None, message: message.into() }
    }

    /// A failure labelling `variable`.
    pub fn for_variable(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self { variable: Some(variable.into()), message: message.into() }
    }

    /// Variable the failure was reported for.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    /// Failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for LabelError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for LabelError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// User labelling function. An `Err` aborts rendering with
/// [`Error::LabellingFunction`].
pub type LabelFn = Arc<
    dyn Fn(StripLabelDetails) -> std::result::Result<StripLabelDetails, LabelError> + Send + Sync,
>;

/// Formats a single value.
pub type ValueFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Per-variable entry of a dictionary labeller.
#[derive(Clone)]
pub enum LabelRule {
    /// Replace the label with this text.
    Literal(String),
    /// Format the value.
    Format(ValueFormatter),
}

impl LabelRule {
    /// Wrap a value formatter.
    pub fn format(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        LabelRule::Format(Arc::new(f))
    }
}

impl From<&str> for LabelRule {
    fn from(s: &str) -> Self {
        LabelRule::Literal(s.to_string())
    }
}

impl fmt::Debug for LabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRule::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            LabelRule::Format(_) => f.write_str("Format(..)"),
        }
    }
}

/// Anything that can become a strip labeller.
#[derive(Clone)]
pub enum LabellerSpec {
    /// A strategy by name (`label_value`, `label_both`, `label_context`).
    Name(String),
    /// A built-in strategy.
    Strategy(LabelStrategy),
    /// A function over the whole details record.
    Function(LabelFn),
    /// A formatter applied to every value.
    Formatter(ValueFormatter),
    /// Per-variable rules; unlisted variables keep their value.
    Dict(HashMap<String, LabelRule>),
}

impl Default for LabellerSpec {
    fn default() -> Self {
        LabellerSpec::Strategy(LabelStrategy::Value)
    }
}

impl LabellerSpec {
    /// Wrap a details function. Its error may be a plain message or a
    /// [`LabelError`] naming the variable that failed.
    pub fn function<F, E>(f: F) -> Self
    where
        F: Fn(StripLabelDetails) -> std::result::Result<StripLabelDetails, E>
            + Send
            + Sync
            + 'static,
        E: Into<LabelError>,
    {
        LabellerSpec::Function(Arc::new(move |d| f(d).map_err(Into::<LabelError>::into)))
    }

    /// Wrap a value formatter.
    pub fn formatter(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        LabellerSpec::Formatter(Arc::new(f))
    }

    /// Build a dictionary labeller.
    pub fn dict<K, R>(rules: impl IntoIterator<Item = (K, R)>) -> Self
    where
        K: Into<String>,
        R: Into<LabelRule>,
    {
        LabellerSpec::Dict(rules.into_iter().map(|(k, r)| (k.into(), r.into())).collect())
    }

    /// Resolve into the function form.
    pub fn resolve(&self, options: &LabelOptions) -> Result<Labeller> {
        let sep = options.sep.clone();
        let func: ResolvedFn = match self {
            LabellerSpec::Name(name) => {
                let strategy: LabelStrategy = name.parse()?;
                resolved(move |d| Ok(strategy.apply(d, &sep)))
            }
            LabellerSpec::Strategy(strategy) => {
                let strategy = *strategy;
                resolved(move |d| Ok(strategy.apply(d, &sep)))
            }
            LabellerSpec::Function(f) => {
                let f = Arc::clone(f);
                resolved(move |d| call_label_fn(&f, d))
            }
            LabellerSpec::Formatter(f) => {
                let f = Arc::clone(f);
                resolved(move |d| Ok(d.map_labels(|_, value| f(value))))
            }
            LabellerSpec::Dict(rules) => {
                let rules = Arc::new(rules.clone());
                resolved(move |d| Ok(apply_rules(&rules, d)))
            }
        };
        Ok(Labeller { func, options: options.clone(), kind: self.kind() })
    }

    fn kind(&self) -> &'static str {
        match self {
            LabellerSpec::Name(_) => "name",
            LabellerSpec::Strategy(s) => s.name(),
            LabellerSpec::Function(_) => "function",
            LabellerSpec::Formatter(_) => "formatter",
            LabellerSpec::Dict(_) => "dict",
        }
    }
}

impl From<&str> for LabellerSpec {
    fn from(name: &str) -> Self {
        LabellerSpec::Name(name.to_string())
    }
}

impl From<LabelStrategy> for LabellerSpec {
    fn from(s: LabelStrategy) -> Self {
        LabellerSpec::Strategy(s)
    }
}

impl fmt::Debug for LabellerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabellerSpec::Name(n) => f.debug_tuple("Name").field(n).finish(),
            LabellerSpec::Strategy(s) => f.debug_tuple("Strategy").field(s).finish(),
            LabellerSpec::Dict(d) => f.debug_tuple("Dict").field(d).finish(),
            _ => write!(f, "LabellerSpec::{}", self.kind()),
        }
    }
}

fn call_label_fn(f: &LabelFn, details: StripLabelDetails) -> Result<StripLabelDetails> {
    let first = details.variables().first().map(|(v, _)| v.clone()).unwrap_or_default();
    let had_variables = !details.is_empty();
    let out = f(details).map_err(|err| Error::LabellingFunction {
        variable: err.variable.unwrap_or_else(|| first.clone()),
        message: err.message,
    })?;
    if had_variables && out.is_empty() {
        return Err(Error::LabellingFunction {
            variable: first,
            message: "labelling function returned no labels".to_string(),
        });
    }
    Ok(out)
}

fn apply_rules(
    rules: &HashMap<String, LabelRule>,
    details: StripLabelDetails,
) -> StripLabelDetails {
    details.map_labels(|var, value| match rules.get(var) {
        Some(LabelRule::Literal(text)) => text.clone(),
        Some(LabelRule::Format(f)) => f(value),
        None => {
            trace!(variable = var, "no labelling rule, keeping value");
            value.to_string()
        }
    })
}

/// Options shared by every labelling form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOptions {
    /// Keep one line per variable; otherwise collapse with `", "`.
    pub multi_line: bool,
    /// Separator used by `label_both`.
    pub sep: String,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self { multi_line: true, sep: ": ".to_string() }
    }
}

type ResolvedFn = Arc<dyn Fn(StripLabelDetails) -> Result<StripLabelDetails> + Send + Sync>;

fn resolved(
    f: impl Fn(StripLabelDetails) -> Result<StripLabelDetails> + Send + Sync + 'static,
) -> ResolvedFn {
    Arc::new(f)
}

/// A resolved strip labeller.
#[derive(Clone)]
pub struct Labeller {
    func: ResolvedFn,
    options: LabelOptions,
    kind: &'static str,
}

impl Labeller {
    /// Label one strip.
    pub fn label(&self, details: StripLabelDetails) -> Result<StripLabelDetails> {
        let out = (self.func)(details)?;
        Ok(if self.options.multi_line { out } else { out.collapse(", ") })
    }

    /// Label one strip and return its text.
    pub fn text(&self, details: StripLabelDetails) -> Result<String> {
        self.label(details).map(|d| d.text())
    }
}

impl Default for Labeller {
    fn default() -> Self {
        Labeller {
            func: resolved(Ok),
            options: LabelOptions::default(),
            kind: LabelStrategy::Value.name(),
        }
    }
}

impl fmt::Debug for Labeller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labeller")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish()
    }
}
