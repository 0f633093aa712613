//! HTTP client configuration.

use std::time::Duration;

/// Timeout used when neither settings nor configuration provide one.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Default request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// How long idle pooled connections are kept.
    pub pool_idle_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Enable gzip compression.
    pub gzip: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::uniform(DEFAULT_HTTP_TIMEOUT_SECS)
    }
}

impl HttpClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Configuration with every timeout set to `secs` seconds.
    pub fn uniform(secs: u64) -> Self {
        let timeout = Duration::from_secs(secs);
        Self {
            timeout,
            connect_timeout: timeout,
            pool_idle_timeout: timeout,
            user_agent: format!("apiscope/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
        }
    }
}

/// Builder for HTTP client configuration.
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the connection pool idle timeout.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable gzip compression.
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.gzip = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_seconds_everywhere() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("apiscope/"));
    }

    #[test]
    fn test_builder() {
        let config = HttpClientConfig::builder()
            .timeout(Duration::from_secs(3))
            .user_agent("test-agent")
            .gzip(false)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "test-agent");
        assert!(!config.gzip);
    }
}
