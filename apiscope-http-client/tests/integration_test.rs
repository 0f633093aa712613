//! Integration tests for apiscope-http-client

use apiscope_config::{ConfigManager, Settings};
use apiscope_http_client::*;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/model.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"classes": []}"#))
        .mount(&server)
        .await;

    let client = ConfigurableHttpClientProvider::new().http_client().unwrap();
    let body = fetch_text(&client, &format!("{}/model.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, r#"{"classes": []}"#);
}

#[tokio::test]
async fn test_fetch_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ConfigurableHttpClientProvider::new().http_client().unwrap();
    let err = fetch_text(&client, &format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_timeout_from_config_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = ConfigManager::new();
    config.set("http", serde_json::json!({"timeOut": 1})).unwrap();
    let provider = ConfigurableHttpClientProvider::new()
        .with_settings(Settings {
            http_time_out: Some(60),
            ..Settings::default()
        })
        .with_config(config);

    assert_eq!(provider.read_http_config().timeout, Duration::from_secs(1));

    let client = provider.http_client().unwrap();
    let err = fetch_text(&client, &server.uri()).await.unwrap_err();
    assert!(err.is_timeout());
}
