//! Deep-merged configuration tree with dot-path lookup.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::ErrorCode;

/// Separator between path segments in lookup keys.
const KEY_SEPARATOR: char = '.';

/// Separator between nesting levels in OS environment variable names.
const ENV_NESTING_SEPARATOR: &str = "__";

/// Errors returned by typed configuration lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested key is absent from every layer.
    #[error("configuration key not found: {0}")]
    MissingKey(String),

    /// The key exists but holds a value of a different type.
    #[error("configuration key {key} holds a {actual} where a {expected} was expected")]
    WrongType {
        /// The requested key.
        key: String,
        /// The expected JSON type name.
        expected: &'static str,
        /// The JSON type name actually stored.
        actual: &'static str,
    },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingKey(_) => "CONFIG_ERR_01",
            Self::WrongType { .. } => "CONFIG_ERR_02",
        }
    }

    fn http_status(&self) -> u16 {
        500
    }
}

/// Immutable merged configuration tree.
///
/// Built once at startup via [`ConfigResolver::builder`]; later layers
/// win key-by-key (objects merge recursively, scalars replace).
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    tree: Value,
}

impl ConfigResolver {
    /// Starts building a resolver from ordered layers.
    #[must_use]
    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::default()
    }

    /// Returns the raw value at a dot-separated path, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current = &self.tree;
        for segment in key.split(KEY_SEPARATOR) {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns whether a value exists at the given path.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the string value at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when the path is absent or
    /// [`ConfigError::WrongType`] when the value is not a string.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| wrong_type(key, "string", value))
    }

    /// Returns the unsigned integer value at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when the path is absent or
    /// [`ConfigError::WrongType`] when the value is not an unsigned
    /// integer.
    pub fn get_u64(&self, key: &str) -> Result<u64, ConfigError> {
        let value = self.require(key)?;
        value
            .as_u64()
            .ok_or_else(|| wrong_type(key, "unsigned integer", value))
    }

    /// Returns the signed integer value at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when the path is absent or
    /// [`ConfigError::WrongType`] when the value is not an integer.
    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.require(key)?;
        value
            .as_i64()
            .ok_or_else(|| wrong_type(key, "integer", value))
    }

    /// Returns the boolean value at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when the path is absent or
    /// [`ConfigError::WrongType`] when the value is not a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.require(key)?;
        value
            .as_bool()
            .ok_or_else(|| wrong_type(key, "boolean", value))
    }

    fn require(&self, key: &str) -> Result<&Value, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_owned()))
    }
}

fn wrong_type(key: &str, expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::WrongType {
        key: key.to_owned(),
        expected,
        actual: json_type_name(value),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered-layer builder for [`ConfigResolver`].
#[derive(Debug, Default)]
pub struct ConfigResolverBuilder {
    layers: Vec<Value>,
}

impl ConfigResolverBuilder {
    /// Adds a configuration layer; later layers override earlier ones.
    #[must_use]
    pub fn layer(mut self, values: Value) -> Self {
        self.layers.push(values);
        self
    }

    /// Adds a layer built from OS environment variables.
    ///
    /// Variables named `{prefix}{SECTION}__{KEY}` become nested entries
    /// under lowercased path segments; `__` separates nesting levels.
    /// Values that parse as booleans or integers are stored typed,
    /// everything else is kept as a string.
    #[must_use]
    pub fn os_env_layer(mut self, prefix: &str) -> Self {
        let mut root = Map::new();
        for (name, raw) in std::env::vars() {
            let Some(stripped) = name.strip_prefix(prefix) else {
                continue;
            };
            let segments: Vec<String> = stripped
                .split(ENV_NESTING_SEPARATOR)
                .map(str::to_lowercase)
                .collect();
            insert_nested(&mut root, &segments, parse_env_value(&raw));
        }
        self.layers.push(Value::Object(root));
        self
    }

    /// Merges all layers and returns the finished resolver.
    #[must_use]
    pub fn build(self) -> ConfigResolver {
        let mut tree = Value::Object(Map::new());
        for layer in self.layers {
            deep_merge(&mut tree, layer);
        }
        ConfigResolver { tree }
    }
}

/// Merges `overlay` into `base`: objects merge recursively, everything
/// else replaces.
fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

fn insert_nested(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(head.clone(), value);
        return;
    }
    let entry = map
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = entry {
        insert_nested(child, rest, value);
    }
}

fn parse_env_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(number) = raw.parse::<i64>() {
        return Value::from(number);
    }
    Value::String(raw.to_owned())
}
