// User settings

use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Output formats the exporter can write.
pub const OUTPUT_FORMATS: [&str; 2] = ["json", "table"];

/// Settings saved by the user, stored as a JSON document.
///
/// ```json
/// { "httpTimeOut": 30, "format": "table", "rules": { "class.prefix.path": "/api" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// HTTP timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_time_out: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Rule expressions keyed by rule name.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub rules: Map<String, Value>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| {
            ConfigError::DeserializationError {
                key: "settings".to_string(),
                message: e.to_string(),
            }
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Rule table as a JSON object.
    pub fn rules_value(&self) -> Value {
        Value::Object(self.rules.clone())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.http_time_out {
            ConfigValidator::in_range(timeout, 1, 3600, "httpTimeOut")?;
        }
        if let Some(format) = &self.format {
            ConfigValidator::one_of(format, &OUTPUT_FORMATS, "format")?;
        }
        Ok(())
    }
}
