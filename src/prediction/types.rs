use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

pub const SQFT_RANGE: (u32, u32) = (500, 5000);
pub const SQFT_STEP: u32 = 50;
pub const BEDROOM_CHOICES: [u8; 6] = [1, 2, 3, 4, 5, 6];
pub const BATHROOM_CHOICES: [f64; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
pub const YEAR_BUILT_RANGE: (u16, u16) = (1900, 2025);

/// Condition sent with every request; the form has no widget for it.
pub const CONDITION: &str = "Good";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Urban,
    Suburban,
    Rural,
    Waterfront,
    Mountain,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Urban,
        Location::Suburban,
        Location::Rural,
        Location::Waterfront,
        Location::Mountain,
    ];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Urban => "urban",
            Location::Suburban => "suburban",
            Location::Rural => "rural",
            Location::Waterfront => "waterfront",
            Location::Mountain => "mountain",
        }
    }

    /// Label shown in the select box.
    pub fn label(&self) -> &'static str {
        match self {
            Location::Urban => "Urban",
            Location::Suburban => "Suburban",
            Location::Rural => "Rural",
            Location::Waterfront => "Waterfront",
            Location::Mountain => "Mountain",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Location::ALL
            .into_iter()
            .find(|loc| loc.as_str() == wanted)
            .ok_or_else(|| Error::invalid_input(format!("Unknown location: '{}'", s)))
    }
}

// Accepts the display case ("Suburban") as well as the wire case.
impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Body of `POST {API_URL}/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub location: Location,
    pub year_built: u16,
    pub condition: String,
}

/// Raw form input, as posted by the page or the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub sqft: u32,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub location: Location,
    pub year_built: u16,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            sqft: 1500,
            bedrooms: 3,
            bathrooms: 2.0,
            location: Location::Suburban,
            year_built: 2000,
        }
    }
}

impl PredictionForm {
    /// Applies the widget restrictions and builds the outbound request.
    pub fn validate(&self) -> Result<PredictionRequest> {
        let (min_sqft, max_sqft) = SQFT_RANGE;
        if !(min_sqft..=max_sqft).contains(&self.sqft) {
            return Err(Error::invalid_input(format!(
                "Square footage must be between {} and {}",
                min_sqft, max_sqft
            )));
        }

        if !BEDROOM_CHOICES.contains(&self.bedrooms) {
            return Err(Error::invalid_input(format!(
                "Bedrooms must be one of 1-6, got {}",
                self.bedrooms
            )));
        }

        if !BATHROOM_CHOICES.contains(&self.bathrooms) {
            return Err(Error::invalid_input(format!(
                "Bathrooms must be one of 1, 1.5, 2, 2.5, 3, 3.5, 4, got {}",
                self.bathrooms
            )));
        }

        let (min_year, max_year) = YEAR_BUILT_RANGE;
        if !(min_year..=max_year).contains(&self.year_built) {
            return Err(Error::invalid_input(format!(
                "Year built must be between {} and {}",
                min_year, max_year
            )));
        }

        Ok(PredictionRequest {
            sqft: self.sqft,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            location: self.location,
            year_built: self.year_built,
            condition: CONDITION.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub confidence_interval: (f64, f64),
}

impl PredictionResult {
    /// Shown whenever the backend call does not succeed cleanly.
    pub const FALLBACK: PredictionResult = PredictionResult {
        predicted_price: 467145.0,
        confidence_interval: (420430.5, 513859.5),
    };
}

/// Why the fallback result was used instead of a live one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    Unreachable(String),
    Status(u16),
    MalformedBody(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Unreachable(detail) => write!(f, "service unreachable: {}", detail),
            FallbackReason::Status(code) => write!(f, "service returned status {}", code),
            FallbackReason::MalformedBody(detail) => write!(f, "malformed response: {}", detail),
        }
    }
}

impl From<Error> for FallbackReason {
    fn from(err: Error) -> Self {
        match err {
            Error::UpstreamStatus { status } => FallbackReason::Status(status),
            Error::MalformedResponse(detail) => FallbackReason::MalformedBody(detail),
            Error::Serialization(e) => FallbackReason::MalformedBody(e.to_string()),
            Error::Unreachable(detail) => FallbackReason::Unreachable(detail),
            Error::Network(e) if e.is_decode() => FallbackReason::MalformedBody(e.to_string()),
            Error::Network(e) => match e.status() {
                Some(status) => FallbackReason::Status(status.as_u16()),
                None => FallbackReason::Unreachable(e.to_string()),
            },
            other => FallbackReason::Unreachable(other.to_string()),
        }
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Live(PredictionResult),
    Fallback {
        result: PredictionResult,
        reason: FallbackReason,
    },
}

impl PredictionOutcome {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self::Fallback {
            result: PredictionResult::FALLBACK,
            reason,
        }
    }

    pub fn result(&self) -> &PredictionResult {
        match self {
            Self::Live(result) => result,
            Self::Fallback { result, .. } => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Fallback { .. } => "fallback",
        }
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Urban", Location::Urban)]
    #[case("suburban", Location::Suburban)]
    #[case("RURAL", Location::Rural)]
    #[case(" Waterfront ", Location::Waterfront)]
    #[case("mountain", Location::Mountain)]
    fn test_location_parses_any_case(#[case] raw: &str, #[case] expected: Location) {
        assert_eq!(raw.parse::<Location>().unwrap(), expected);
    }

    #[test]
    fn test_location_rejects_unknown() {
        let err = "Desert".parse::<Location>().unwrap_err();
        assert!(err.to_string().contains("Unknown location"));
    }

    #[test]
    fn test_request_serializes_lowercase_location_and_condition() {
        let form = PredictionForm {
            location: Location::Urban,
            ..PredictionForm::default()
        };
        let request = form.validate().unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "sqft": 1500,
                "bedrooms": 3,
                "bathrooms": 2.0,
                "location": "urban",
                "year_built": 2000,
                "condition": "Good"
            })
        );
    }

    #[test]
    fn test_form_deserializes_display_case_location() {
        let form: PredictionForm = serde_json::from_value(json!({
            "sqft": 2000,
            "bedrooms": 4,
            "bathrooms": 2.5,
            "location": "Waterfront",
            "year_built": 1985
        }))
        .unwrap();

        assert_eq!(form.location, Location::Waterfront);
        assert_eq!(form.bathrooms, 2.5);
    }

    #[rstest]
    #[case(PredictionForm { sqft: 499, ..PredictionForm::default() }, "Square footage")]
    #[case(PredictionForm { sqft: 5001, ..PredictionForm::default() }, "Square footage")]
    #[case(PredictionForm { bedrooms: 0, ..PredictionForm::default() }, "Bedrooms")]
    #[case(PredictionForm { bedrooms: 7, ..PredictionForm::default() }, "Bedrooms")]
    #[case(PredictionForm { bathrooms: 1.25, ..PredictionForm::default() }, "Bathrooms")]
    #[case(PredictionForm { bathrooms: 4.5, ..PredictionForm::default() }, "Bathrooms")]
    #[case(PredictionForm { year_built: 1899, ..PredictionForm::default() }, "Year built")]
    #[case(PredictionForm { year_built: 2026, ..PredictionForm::default() }, "Year built")]
    fn test_validate_rejects_out_of_range(#[case] form: PredictionForm, #[case] field: &str) {
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains(field), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let low = PredictionForm {
            sqft: 500,
            bedrooms: 1,
            bathrooms: 1.0,
            location: Location::Rural,
            year_built: 1900,
        };
        let high = PredictionForm {
            sqft: 5000,
            bedrooms: 6,
            bathrooms: 4.0,
            location: Location::Mountain,
            year_built: 2025,
        };

        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let result: PredictionResult = serde_json::from_value(json!({
            "predicted_price": 500000,
            "confidence_interval": [480000, 520000],
            "model_version": "v3"
        }))
        .unwrap();

        assert_eq!(
            result,
            PredictionResult {
                predicted_price: 500000.0,
                confidence_interval: (480000.0, 520000.0),
            }
        );
    }

    #[test]
    fn test_result_missing_price_fails() {
        let parsed = serde_json::from_value::<PredictionResult>(json!({
            "confidence_interval": [1, 2]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_fallback_outcome_carries_fixed_result() {
        let outcome = PredictionOutcome::fallback(FallbackReason::Status(500));

        assert!(outcome.is_fallback());
        assert_eq!(outcome.source(), "fallback");
        assert_eq!(outcome.result().predicted_price, 467145.0);
        assert_eq!(outcome.result().confidence_interval, (420430.5, 513859.5));
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Status(500)));
    }

    #[test]
    fn test_fallback_reason_from_error() {
        assert_eq!(
            FallbackReason::from(Error::UpstreamStatus { status: 503 }),
            FallbackReason::Status(503)
        );
        assert!(matches!(
            FallbackReason::from(Error::malformed("empty body")),
            FallbackReason::MalformedBody(_)
        ));
        assert!(matches!(
            FallbackReason::from(Error::unreachable("connection refused")),
            FallbackReason::Unreachable(_)
        ));
    }
}
