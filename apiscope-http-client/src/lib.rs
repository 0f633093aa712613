//! # apiscope HTTP client
//!
//! Provides `reqwest` clients whose timeouts follow the user's settings and
//! configuration.
//!
//! ```rust,no_run
//! use apiscope_config::ConfigManager;
//! use apiscope_http_client::{ConfigurableHttpClientProvider, HttpClientProvider, fetch_text};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigManager::new();
//!     config.set("http.timeOut", 5)?;
//!
//!     let provider = ConfigurableHttpClientProvider::new().with_config(config);
//!     let client = provider.http_client()?;
//!     let body = fetch_text(&client, "https://example.com/model.json").await?;
//!     println!("{}", body);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod provider;

pub use client::{build_client, fetch_text};
pub use config::{DEFAULT_HTTP_TIMEOUT_SECS, HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};
pub use provider::{ConfigurableHttpClientProvider, HTTP_TIMEOUT_KEY, HttpClientProvider};
