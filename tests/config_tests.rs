use house_price_form::config::{self, Config};
use pretty_assertions::assert_eq;

mod common;
use common::test_utils::{INVALID_CONFIG_YAML, SAMPLE_CONFIG_YAML, create_test_config_file};

#[tokio::test]
async fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML).await.unwrap();

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.logs.level, "debug");
    assert_eq!(config.api.url, "http://prediction-api:8000/");
    assert_eq!(config.api.timeout_secs, Some(5));
    assert_eq!(config.api.predict_url(), "http://prediction-api:8000/predict");
}

#[tokio::test]
async fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.yaml");

    let config = config::load_from(&path).await.unwrap();

    assert_eq!(config.api.url, "http://localhost:8000");
    assert_eq!(config.api.predict_url(), "http://localhost:8000/predict");
}

#[tokio::test]
async fn test_invalid_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_test_config_file(&dir, INVALID_CONFIG_YAML).await.unwrap();

    let result = config::load_from(&path).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("YAML error"));
}

#[test]
fn test_api_url_override() {
    let config = config::apply_api_url_override(
        Config::default(),
        Some("https://prices.example.com/".to_string()),
    );
    assert_eq!(config.api.predict_url(), "https://prices.example.com/predict");
}

#[test]
fn test_api_url_override_ignores_unset_and_empty() {
    let unset = config::apply_api_url_override(Config::default(), None);
    assert_eq!(unset.api.url, "http://localhost:8000");

    let empty = config::apply_api_url_override(Config::default(), Some("".to_string()));
    assert_eq!(empty.api.url, "http://localhost:8000");
}

#[tokio::test]
async fn test_loaded_config_validation() {
    let dir = tempfile::tempdir().unwrap();

    let path = create_test_config_file(&dir, SAMPLE_CONFIG_YAML).await.unwrap();
    let config = config::load_from(&path).await.unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.sessions.max_sessions, 250);

    let path = create_test_config_file(&dir, "api:\n  url: \"ftp://prices\"\n")
        .await
        .unwrap();
    let config = config::load_from(&path).await.unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
