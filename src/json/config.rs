//! JSON output configuration

use crate::core::{FeilongError, Result};
use serde::{Deserialize, Serialize};

/// Default number of spaces per indentation level
pub const DEFAULT_INDENT: usize = 4;

/// Controls which properties are written and how the output is laid out.
///
/// Property filters apply to the keys of a top-level object, or of each object
/// in a top-level array. Only one of include and exclude may be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatConfig {
    /// Only these properties are written, when not empty
    pub include_property_names: Vec<String>,
    /// These properties are left out
    pub exclude_property_names: Vec<String>,
    /// Multi-line output
    pub pretty: bool,
    /// Spaces per level when `pretty`
    pub indent: usize,
}

impl Default for JsonFormatConfig {
    fn default() -> Self {
        Self {
            include_property_names: Vec::new(),
            exclude_property_names: Vec::new(),
            pretty: true,
            indent: DEFAULT_INDENT,
        }
    }
}

impl JsonFormatConfig {
    /// Pretty output with the default indent and no filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Write only the given properties
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_include_property_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_property_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Leave out the given properties
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_exclude_property_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_property_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set multi-line output
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set spaces per indentation level
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.include_property_names.is_empty() && !self.exclude_property_names.is_empty() {
            return Err(FeilongError::invalid_config(
                "include_property_names",
                "include and exclude property names can't both be set",
            ));
        }
        if self
            .include_property_names
            .iter()
            .chain(&self.exclude_property_names)
            .any(|name| name.trim().is_empty())
        {
            return Err(FeilongError::invalid_config(
                "property_names",
                "property names can't be blank",
            ));
        }
        Ok(())
    }
}
