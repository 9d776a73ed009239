use axum::{Router, body::Body, http::Request, response::Response};
use house_price_form::{
    Result,
    prediction::{PredictionClient, PredictionResult},
    server::{self, handlers::AppState},
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Build the router around the given backend client
pub fn create_test_app(client: Arc<dyn PredictionClient>) -> (Router, AppState) {
    let state = AppState::new(client);
    (server::router(state.clone()), state)
}

/// The live response used across scenario tests
pub fn live_result() -> PredictionResult {
    PredictionResult {
        predicted_price: 500000.0,
        confidence_interval: (480000.0, 520000.0),
    }
}

/// Form body for the reference scenario (1500 sqft, 3 bed, 2 bath, Suburban, 2000)
pub fn scenario_form_body(session_id: &str) -> String {
    format!(
        "session_id={}&sqft=1500&bedrooms=3&bathrooms=2&location=Suburban&year_built=2000",
        session_id
    )
}

pub fn form_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

api:
  url: "http://prediction-api:8000/"
  timeout_secs: 5

sessions:
  idle_timeout_secs: 900
  max_sessions: 250
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
