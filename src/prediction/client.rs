use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult>;
}

/// Talks to the remote `/predict` endpoint over HTTP.
pub struct HttpPredictionClient {
    client: reqwest::Client,
    predict_url: String,
}

impl HttpPredictionClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let predict_url = config.predict_url();
        debug!("Prediction client targeting: {}", predict_url);

        Ok(Self {
            client,
            predict_url,
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        debug!(
            "Requesting prediction: sqft={} bedrooms={} bathrooms={} location={} year_built={}",
            request.sqft,
            request.bedrooms,
            request.bathrooms,
            request.location.as_str(),
            request.year_built
        );

        let response = self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::malformed(format!("Failed to read body: {}", e)))?;

        serde_json::from_slice(&body).map_err(|e| Error::malformed(e.to_string()))
    }
}

/// Runs one prediction. Never fails: any backend problem yields the fallback outcome.
pub async fn submit(client: &dyn PredictionClient, request: &PredictionRequest) -> PredictionOutcome {
    match client.predict(request).await {
        Ok(result) => {
            info!(
                "Received live prediction: {} [{}, {}]",
                result.predicted_price, result.confidence_interval.0, result.confidence_interval.1
            );
            PredictionOutcome::Live(result)
        }
        Err(e) => {
            let reason = FallbackReason::from(e);
            warn!("Prediction call failed, using fallback result: {}", reason);
            PredictionOutcome::fallback(reason)
        }
    }
}
