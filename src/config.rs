//! Plot defaults loaded from YAML.
//!
//! Every field is optional in the file; missing ones take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grammar::OverridePolicy;

/// Defaults applied to every plot built with [`crate::grammar::Plot::from_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Figure width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Theme preset name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Strip labeller used by facets that do not set one.
    #[serde(default = "default_labeller")]
    pub labeller: String,

    /// What to do when a scale or guide binds an aesthetic twice.
    #[serde(default)]
    pub duplicate_scales: OverridePolicy,
}

fn default_version() -> u32 {
    1
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_theme() -> String {
    "grey".to_string()
}
fn default_labeller() -> String {
    "label_value".to_string()
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            width: default_width(),
            height: default_height(),
            theme: default_theme(),
            labeller: default_labeller(),
            duplicate_scales: OverridePolicy::default(),
        }
    }
}

impl PlotConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "using default plot configuration");
                Self::default()
            }
        }
    }
}
