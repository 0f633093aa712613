//! Building and using `reqwest` clients.

use std::time::Duration;
use tracing::debug;

use crate::{HttpClientConfig, HttpClientError, Result};

/// Build a client from the configuration.
pub fn build_client(config: &HttpClientConfig) -> Result<reqwest::Client> {
    if config.timeout == Duration::ZERO || config.connect_timeout == Duration::ZERO {
        return Err(HttpClientError::Config(
            "timeouts must be greater than zero".to_string(),
        ));
    }

    debug!(
        timeout = ?config.timeout,
        connect_timeout = ?config.connect_timeout,
        "Building HTTP client"
    );

    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .user_agent(&config.user_agent)
        .gzip(config.gzip)
        .build()
        .map_err(|e| HttpClientError::Build(e.to_string()))
}

/// GET `url` and return the body as text. Non-success statuses are errors.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url = %url, "Fetching");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(HttpClientError::Response {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}
