use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Indentation unit used when no configuration is supplied.
pub const DEFAULT_INDENTATION: &str = "    ";

/// Accessor names that never produce useful assertions.
const DEFAULT_IGNORED_METHODS: &[&str] = &["clone", "to_owned", "to_string"];

/// Generator settings. Built once, read-only afterwards.
///
/// Loadable from TOML:
///
/// ```toml
/// indentation = "  "
/// global_ignored_methods = ["clone", "version"]
/// scan_all_prefixes = ["my_app::model"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssertGeneratorConfig {
    indentation: String,
    global_ignored_methods: BTreeSet<String>,
    scan_all_prefixes: Vec<String>,
}

impl Default for AssertGeneratorConfig {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION.to_string(),
            global_ignored_methods: DEFAULT_IGNORED_METHODS.iter().map(|name| name.to_string()).collect(),
            scan_all_prefixes: Vec::new(),
        }
    }
}

impl AssertGeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Set the indentation unit repeated once per nesting level.
    ///
    /// Default: four spaces
    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    /// Skip accessors with this name in both bean and scan-all mode.
    pub fn ignore_method(mut self, name: impl Into<String>) -> Self {
        self.global_ignored_methods.insert(name.into());
        self
    }

    /// Walk every declared accessor of types whose path starts with `prefix`.
    pub fn scan_all_methods_in(mut self, prefix: impl Into<String>) -> Self {
        self.scan_all_prefixes.push(prefix.into());
        self
    }

    pub fn indentation(&self) -> &str {
        &self.indentation
    }

    pub fn global_ignored_methods(&self) -> &BTreeSet<String> {
        &self.global_ignored_methods
    }

    pub fn scan_all_prefixes(&self) -> &[String] {
        &self.scan_all_prefixes
    }

    pub fn is_ignored_method(&self, name: &str) -> bool {
        self.global_ignored_methods.contains(name)
    }

    pub fn is_scan_all(&self, type_name: &str) -> bool {
        self.scan_all_prefixes.iter().any(|prefix| type_name.starts_with(prefix.as_str()))
    }
}
