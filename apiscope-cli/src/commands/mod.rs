//! CLI command implementations.

pub mod classes;
pub mod export;

use crate::error::CliResult;
use apiscope_config::{ConfigManager, DEFAULT_PREFIX, Settings};
use apiscope_core::InMemoryModel;
use apiscope_http_client::{ConfigurableHttpClientProvider, HttpClientProvider, fetch_text};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a command reads: the model plus the user's settings and
/// configuration.
pub struct Sources {
    pub model: Arc<InMemoryModel>,
    pub settings: Settings,
    pub config: ConfigManager,
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load settings, configuration and the model, in that order. A model given
/// as a URL is fetched with a client configured from the first two.
pub async fn load_sources(
    model: &str,
    config_path: Option<&Path>,
    settings_path: Option<&Path>,
) -> CliResult<Sources> {
    let settings = match settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let config = ConfigManager::with_prefix(DEFAULT_PREFIX);
    if let Some(path) = config_path {
        config.load_path(path)?;
    }
    config.load_env()?;

    let parsed = if is_url(model) {
        let provider = ConfigurableHttpClientProvider::new()
            .with_settings(settings.clone())
            .with_config(config.clone());
        let client = provider.http_client()?;
        let body = fetch_text(&client, model).await?;
        InMemoryModel::from_json(&body)?
    } else {
        InMemoryModel::load(model)?
    };

    info!(location = %model, classes = parsed.classes.len(), "Loaded model");
    debug!(keys = ?config.keys(), "Configuration keys");

    Ok(Sources {
        model: Arc::new(parsed),
        settings,
        config,
    })
}
