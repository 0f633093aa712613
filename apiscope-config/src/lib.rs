// Configuration management for apiscope
//
// Values are loaded from JSON, TOML and `.env` style files and from
// environment variables. Later loads override earlier ones key by key.

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{OUTPUT_FORMATS, Settings};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Main configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: None,
        }
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let vars = loader.load();
        debug!(count = vars.len(), prefix = ?self.env_prefix, "Loaded environment configuration");

        let mut config = self.config.write();
        for (key, value) in vars {
            config.insert(key, Value::String(value));
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::new(format).load_file(path)?;

        let Value::Object(map) = data else {
            return Err(ConfigError::ParseError(format!(
                "{} does not contain a table",
                path.display()
            )));
        };

        debug!(path = %path.display(), keys = map.len(), "Loaded configuration file");
        let mut config = self.config.write();
        for (key, value) in map {
            config.insert(key, value);
        }

        Ok(())
    }

    /// Load a file, detecting its format from the name
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.load_file(path, FileFormat::detect(path)?)
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Deserialize the value stored under `key`, see [`ConfigManager::lookup`]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .lookup(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Top-level keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.config.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Merge configuration from another manager; its values win
    pub fn merge(&self, other: &ConfigManager) {
        let other_config = other.config.read().clone();
        let mut config = self.config.write();
        config.extend(other_config);
    }

    /// Value for a dotted key.
    ///
    /// `http.timeOut` is found as a flat key, by walking nested tables
    /// (`{"http": {"timeOut": 5}}`), or as a flat key differing only in case
    /// (environment variables are lowercased).
    pub fn lookup(&self, key: &str) -> Option<Value> {
        let config = self.config.read();

        if let Some(value) = walk(&|k| config.get(k), key) {
            return Some(value.clone());
        }

        config
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.clone())
    }

    /// First value of `key` rendered as text. Arrays yield their first
    /// element.
    pub fn first(&self, key: &str) -> Option<String> {
        let value = match self.lookup(key)? {
            Value::Array(items) => items.into_iter().next()?,
            value => value,
        };
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    /// Deserialize the whole configuration and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let json_value = Value::Object(self.config.read().clone().into_iter().collect());

        let validated: T =
            serde_json::from_value(json_value).map_err(|e| ConfigError::DeserializationError {
                key: "<root>".to_string(),
                message: e.to_string(),
            })?;

        validated.validate()?;
        Ok(validated)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Follow a dotted key through nested objects, trying the longest head
/// first so keys that themselves contain dots still match.
fn walk<'a>(get: &dyn Fn(&str) -> Option<&'a Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = get(key) {
        return Some(value);
    }

    let mut split = key.len();
    while let Some(idx) = key[..split].rfind('.') {
        let found = match get(&key[..idx]) {
            Some(Value::Object(map)) => walk(&|k| map.get(k), &key[idx + 1..]),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
        split = idx;
    }
    None
}
