use async_trait::async_trait;
use house_price_form::{
    Error, Result,
    prediction::{PredictionClient, PredictionRequest, PredictionResult},
};
use std::sync::{Arc, Mutex};

/// Mock prediction backend for testing
#[derive(Debug, Clone)]
pub struct MockPredictionClient {
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockPredictionClient {
    /// A backend that is always down.
    pub fn unreachable() -> Self {
        Self {
            result: None,
            error: Some("connection refused".to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_result(result: PredictionResult) -> Self {
        Self {
            result: Some(result),
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.error {
            return Err(Error::unreachable(error.clone()));
        }

        self.result
            .ok_or_else(|| Error::malformed("No mock result configured"))
    }
}
