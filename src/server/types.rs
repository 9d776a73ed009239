use crate::{
    Error, Result,
    prediction::{FallbackReason, Location, PredictionForm, PredictionOutcome},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Body of `POST /`. Fields stay text until `parse` so bad values can be
/// reported on the page instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub sqft: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<String>,
    #[serde(default)]
    pub bathrooms: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub year_built: Option<String>,
}

impl FormSubmission {
    pub fn parse(&self) -> Result<PredictionForm> {
        Ok(PredictionForm {
            sqft: parse_field(self.sqft.as_deref(), "Square footage")?,
            bedrooms: parse_field(self.bedrooms.as_deref(), "Bedrooms")?,
            bathrooms: parse_field(self.bathrooms.as_deref(), "Bathrooms")?,
            location: parse_field::<Location>(self.location.as_deref(), "Location")?,
            year_built: parse_field(self.year_built.as_deref(), "Year built")?,
        })
    }
}

fn parse_field<T>(value: Option<&str>, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::invalid_input(format!("{} is required", label)))?;

    value
        .parse()
        .map_err(|e| Error::invalid_input(format!("{} has an invalid value '{}': {}", label, value, e)))
}

/// Body of `POST /api/predict`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub location: Location,
    pub year_built: u16,
}

impl SubmitRequest {
    pub fn into_parts(self) -> (Option<String>, PredictionForm) {
        (
            self.session_id,
            PredictionForm {
                sqft: self.sqft,
                bedrooms: self.bedrooms,
                bathrooms: self.bathrooms,
                location: self.location,
                year_built: self.year_built,
            },
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub session_id: String,
    pub predicted_price: f64,
    pub confidence_interval: (f64, f64),
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl PredictResponse {
    pub fn new(session_id: String, outcome: &PredictionOutcome) -> Self {
        let result = outcome.result();
        Self {
            session_id,
            predicted_price: result.predicted_price,
            confidence_interval: result.confidence_interval,
            source: outcome.source(),
            fallback_reason: outcome.fallback_reason().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
