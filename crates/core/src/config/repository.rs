//! Dotted-key configuration repository
//!
//! Configuration is held as a single JSON tree and addressed with dotted keys
//! such as `http.routing.prefixMap.put`. Trees can be loaded from YAML or JSON
//! text, from a file, or assembled programmatically.

use crate::config::ConfigError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Hierarchical configuration store addressed by dotted keys
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRepository {
    root: Value,
}

impl ConfigRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Create a repository from an existing JSON value
    ///
    /// The value must be an object; `null` is accepted as an empty tree.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(_) => Ok(Self { root: value }),
            Value::Null => Ok(Self::new()),
            other => Err(ConfigError::invalid_value(
                "<root>",
                other.to_string(),
                "a mapping of configuration keys",
            )),
        }
    }

    /// Parse a repository from JSON text
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Parse a repository from YAML text
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(source)?;
        Self::from_value(value)
    }

    /// Load a repository from a `.yaml`, `.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let contents = fs::read_to_string(path)?;
        let repository = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        tracing::debug!(target: "waymark::config", "Loaded configuration from {}", path.display());
        Ok(repository)
    }

    /// Look up the raw value stored under a dotted key
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if key.is_empty() {
            return Some(&self.root);
        }

        key.split('.')
            .try_fold(&self.root, |node, part| node.as_object()?.get(part))
    }

    /// Check whether a key is present
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Read and deserialize a key, reporting type mismatches
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.lookup(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ConfigError::parsing(format!("key '{}': {}", key, e))),
        }
    }

    /// Read a key, treating absent and mistyped values alike
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.try_get(key).ok().flatten()
    }

    /// Read a key or fall back to the given default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Store a value under a dotted key, creating intermediate mappings
    ///
    /// Intermediate values that are not mappings are replaced.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if key.is_empty() {
            if value.is_object() {
                self.root = value;
            }
            return;
        }

        let mut parts = key.split('.').peekable();
        let mut node = &mut self.root;
        while let Some(part) = parts.next() {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else {
                return;
            };

            if parts.peek().is_none() {
                map.insert(part.to_string(), value);
                return;
            }

            node = map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    /// Scope the repository to everything stored below `prefix`
    pub fn section(&self, prefix: &str) -> ConfigRepository {
        match self.lookup(prefix) {
            Some(value @ Value::Object(_)) => Self {
                root: value.clone(),
            },
            _ => Self::new(),
        }
    }

    /// Borrow the underlying tree
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}
