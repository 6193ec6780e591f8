//! Configuration providers.
//!
//! Implements the [`ConfigProvider`] trait from the command layer:
//! [`TomlConfig`] reads a TOML document once at construction and serves
//! typed lookups from it, [`MemoryConfig`] backs tests. Absent keys are
//! never an error; every getter falls back to its default. A key that is
//! present with the wrong type is logged and treated as absent.

use helm_command::ConfigProvider;
use helm_types::ErrorCode;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use toml::Value;
use tracing::warn;

/// Configuration layer error.
///
/// Only raised for unreadable or unparsable files. Key lookups never
/// produce errors.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | [`Read`](ConfigError::Read) | `CONFIG_READ_FAILED` | No |
/// | [`Parse`](ConfigError::Parse) | `CONFIG_PARSE_FAILED` | No |
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ_FAILED",
            Self::Parse(_) => "CONFIG_PARSE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// A TOML-backed configuration provider.
///
/// Keys are dotted paths resolved against the document's table tree, so
/// `"macros.allow-shell"` matches both
///
/// ```toml
/// [macros]
/// allow-shell = true
/// ```
///
/// and the inline form `macros = { allow-shell = true }`.
#[derive(Debug)]
pub struct TomlConfig {
    root: Value,
}

impl TomlConfig {
    /// Loads a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&text)
    }

    /// Parses a TOML document from a string.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is not valid TOML.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ConfigError> {
        let root = text.parse::<Value>()?;
        Ok(Self { root })
    }

    /// An empty document; every lookup yields its default.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Value::Table(toml::map::Map::new()),
        }
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}

impl ConfigProvider for TomlConfig {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.lookup(key) {
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                warn!(key, found = other.type_str(), "expected boolean, using default");
                default
            }
            None => default,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                warn!(key, found = other.type_str(), "expected string, treating as absent");
                None
            }
            None => None,
        }
    }

    fn get_integer(&self, key: &str, default: i64) -> i64 {
        match self.lookup(key) {
            Some(Value::Integer(i)) => *i,
            Some(other) => {
                warn!(key, found = other.type_str(), "expected integer, using default");
                default
            }
            None => default,
        }
    }

    fn get_int_list(&self, key: &str, default: &[i64]) -> Vec<i64> {
        match self.lookup(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Integer(i) => Some(*i),
                    other => {
                        warn!(key, found = other.type_str(), "skipping non-integer list item");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                warn!(key, found = other.type_str(), "expected array, using default");
                default.to_vec()
            }
            None => default.to_vec(),
        }
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        match self.lookup(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => {
                        warn!(key, found = other.type_str(), "skipping non-string list item");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                warn!(key, found = other.type_str(), "expected array, treating as absent");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

/// In-memory configuration provider for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryConfig {
    bools: HashMap<String, bool>,
    strings: HashMap<String, String>,
    integers: HashMap<String, i64>,
    string_lists: HashMap<String, Vec<String>>,
    int_lists: HashMap<String, Vec<i64>>,
}

impl MemoryConfig {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a boolean key.
    #[must_use]
    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.bools.insert(key.into(), value);
        self
    }

    /// Sets a string key.
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Sets an integer key.
    #[must_use]
    pub fn with_integer(mut self, key: impl Into<String>, value: i64) -> Self {
        self.integers.insert(key.into(), value);
        self
    }

    /// Sets a string-list key.
    #[must_use]
    pub fn with_string_list(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.string_lists
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets an integer-list key.
    #[must_use]
    pub fn with_int_list(mut self, key: impl Into<String>, values: Vec<i64>) -> Self {
        self.int_lists.insert(key.into(), values);
        self
    }
}

impl ConfigProvider for MemoryConfig {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.bools.get(key).copied().unwrap_or(default)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn get_integer(&self, key: &str, default: i64) -> i64 {
        self.integers.get(key).copied().unwrap_or(default)
    }

    fn get_int_list(&self, key: &str, default: &[i64]) -> Vec<i64> {
        self.int_lists
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_vec())
    }

    fn get_string_list(&self, key: &str) -> Vec<String> {
        self.string_lists.get(key).cloned().unwrap_or_default()
    }
}
