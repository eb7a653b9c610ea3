//! Error types for ggrammar operations.

use thiserror::Error;

use crate::grammar::ComponentRole;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or resolving a plot.
///
/// Every variant is raised synchronously by the `combine`, `normalize` or
/// labelling call that detected it. After a failed combine the previous plot
/// value is still the valid one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A producer or converter returned something that is not a table.
    #[error("Invalid data shape: expected a table, got {found}")]
    InvalidDataShape {
        /// Description of what was produced instead.
        found: String,
    },

    /// A layer needs the plot's base data but none is available.
    #[error("Missing base data: {context} requires the plot data, which is not set")]
    MissingBaseData {
        /// What needed the base data.
        context: String,
    },

    /// A component was combined somewhere its role is not accepted.
    #[error("Incompatible component: expected {expected}, received {received}")]
    IncompatibleComponent {
        /// Role accepted at this point.
        expected: ComponentRole,
        /// Role that was supplied.
        received: ComponentRole,
    },

    /// A channel was bound twice and the policy forbids overriding it.
    #[error("Duplicate binding: {role} for aesthetic '{aesthetic}' is already defined")]
    DuplicateBinding {
        /// Role of the component that collided.
        role: ComponentRole,
        /// Canonical aesthetic key.
        aesthetic: String,
    },

    /// Aesthetic key outside the known vocabulary.
    #[error("Unknown aesthetic: '{0}'")]
    UnknownAesthetic(String),

    /// A strip labelling function failed for a facet variable.
    #[error("Labelling function failed for variable '{variable}': {message}")]
    LabellingFunction {
        /// Facet variable being labelled.
        variable: String,
        /// Failure description.
        message: String,
    },

    /// A continuous and a discrete scale were combined for the same key.
    #[error("Conflicting scale type for '{aesthetic}': {existing} already defined, got {received}")]
    ConflictingScaleType {
        /// Canonical aesthetic key.
        aesthetic: String,
        /// Role of the scale already bound.
        existing: ComponentRole,
        /// Role of the incoming scale.
        received: ComponentRole,
    },

    /// A facet variable is in neither the plot data nor any layer data.
    #[error("Missing facet variable: no layer data contains '{variable}'")]
    MissingFacetVariable {
        /// Facet variable that was not found.
        variable: String,
    },

    /// A manual scale has fewer values than the levels it must cover.
    #[error("Insufficient values in manual scale for '{aesthetic}': {needed} needed, got {given}")]
    InsufficientScaleValues {
        /// First aesthetic claimed by the scale.
        aesthetic: String,
        /// Number of levels.
        needed: usize,
        /// Number of values supplied.
        given: usize,
    },

    /// Labeller name outside `label_value`, `label_both`, `label_context`.
    #[error("Unknown labeller: '{0}'")]
    UnknownLabeller(String),

    /// Color token that cannot be resolved.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Theme name with no built-in preset.
    #[error("Unknown theme: '{0}'")]
    UnknownTheme(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
