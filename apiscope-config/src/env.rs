// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Prefix of variables read by default.
pub const DEFAULT_PREFIX: &str = "APISCOPE";

/// Reads configuration keys from environment variables.
///
/// With a prefix, only matching variables are read and the prefix is
/// stripped. Keys are lowercased and `_` becomes `.`, so
/// `APISCOPE_HTTP_TIMEOUT` is read as `http.timeout`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Convert a variable name into a configuration key.
    pub fn key_for(&self, var: &str) -> Option<String> {
        let rest = match &self.prefix {
            Some(prefix) => var.strip_prefix(prefix.as_str())?.strip_prefix('_')?,
            None => var,
        };
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_lowercase().replace('_', "."))
    }

    pub fn load(&self) -> HashMap<String, String> {
        env::vars()
            .filter_map(|(var, value)| self.key_for(&var).map(|key| (key, value)))
            .collect()
    }

    /// Read a single variable, `key` given without prefix.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let var = key.to_uppercase().replace('.', "_");
        let full = match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, var),
            None => var,
        };

        env::var(&full).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PREFIX.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_with_prefix() {
        let loader = EnvLoader::default();
        assert_eq!(loader.key_for("APISCOPE_HTTP_TIMEOUT"), Some("http.timeout".to_string()));
        assert_eq!(loader.key_for("APISCOPEX_HTTP"), None);
        assert_eq!(loader.key_for("APISCOPE"), None);
        assert_eq!(loader.key_for("PATH"), None);
    }

    #[test]
    fn test_key_for_without_prefix() {
        let loader = EnvLoader::new(None);
        assert_eq!(loader.key_for("HOME"), Some("home".to_string()));
    }

    #[test]
    fn test_missing_var_uses_default() {
        let loader = EnvLoader::new(Some("APISCOPE_UNIT".to_string()));
        assert!(loader.load_var("missing.var.67890").is_err());
        assert_eq!(loader.load_var_or("missing.var.67890", "fallback"), "fallback");
    }
}
