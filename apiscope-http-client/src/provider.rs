//! Client provider configured from user settings and configuration.

use apiscope_config::{ConfigManager, Settings};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::client::build_client;
use crate::config::{DEFAULT_HTTP_TIMEOUT_SECS, HttpClientConfig};
use crate::Result;

/// Configuration key holding the timeout in seconds.
pub const HTTP_TIMEOUT_KEY: &str = "http.timeOut";

/// Source of HTTP clients.
pub trait HttpClientProvider {
    fn http_client(&self) -> Result<reqwest::Client>;
}

/// Builds one client from settings and configuration and hands out clones
/// of it.
///
/// The timeout starts at ten seconds, is replaced by the settings value and
/// then by `http.timeOut` from the configuration. The same value is used for
/// the request, connect and pool idle timeouts.
#[derive(Default)]
pub struct ConfigurableHttpClientProvider {
    settings: Option<Settings>,
    config: Option<ConfigManager>,
    client: OnceCell<reqwest::Client>,
}

impl ConfigurableHttpClientProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_config(mut self, config: ConfigManager) -> Self {
        self.config = Some(config);
        self
    }

    /// Effective client configuration.
    pub fn read_http_config(&self) -> HttpClientConfig {
        let mut secs = DEFAULT_HTTP_TIMEOUT_SECS;

        if let Some(timeout) = self.settings.as_ref().and_then(|s| s.http_time_out) {
            secs = timeout;
        }

        if let Some(raw) = self.config.as_ref().and_then(|c| c.first(HTTP_TIMEOUT_KEY)) {
            match raw.trim().parse::<u64>() {
                Ok(timeout) if timeout > 0 => secs = timeout,
                _ => debug!(key = HTTP_TIMEOUT_KEY, value = %raw, "Ignoring invalid timeout"),
            }
        }

        HttpClientConfig::uniform(secs)
    }
}

impl HttpClientProvider for ConfigurableHttpClientProvider {
    fn http_client(&self) -> Result<reqwest::Client> {
        self.client
            .get_or_try_init(|| build_client(&self.read_http_config()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config_with(value: &str) -> ConfigManager {
        let config = ConfigManager::new();
        config.set(HTTP_TIMEOUT_KEY, value).unwrap();
        config
    }

    fn settings_with(secs: u64) -> Settings {
        Settings {
            http_time_out: Some(secs),
            ..Settings::default()
        }
    }

    #[test]
    fn test_default_timeout() {
        let provider = ConfigurableHttpClientProvider::new();
        assert_eq!(provider.read_http_config().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_settings_override_default() {
        let provider = ConfigurableHttpClientProvider::new().with_settings(settings_with(30));
        let config = provider.read_http_config();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_overrides_settings() {
        let provider = ConfigurableHttpClientProvider::new()
            .with_settings(settings_with(30))
            .with_config(config_with("5"));
        assert_eq!(provider.read_http_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_unparseable_config_is_ignored() {
        let provider = ConfigurableHttpClientProvider::new()
            .with_settings(settings_with(30))
            .with_config(config_with("abc"));
        assert_eq!(provider.read_http_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_is_cached() {
        let provider = ConfigurableHttpClientProvider::new();
        assert!(provider.http_client().is_ok());
        assert!(provider.client.get().is_some());
        assert!(provider.http_client().is_ok());
    }
}
