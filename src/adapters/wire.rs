//! Wire adapter: JSON request/response contract for scoring.
//!
//! Mirrors the `POST /score` exchange:
//! - request: an object of catalog feature names to numbers (missing
//!   features take their defaults)
//! - response: probability, tier, decision, message, up to three factors and
//!   the confidence score
//! - error: `{"error": "validation", "field": ..., "message": ...}`
//!   or `{"error": "malformed", "message": ...}` for an unreadable body

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::domain::{
    FeatureRecord, FeatureSpec, RawFeatures, ScoringResult, ValidationError, FEATURE_CATALOG,
};

/// Incoming scoring request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreRequest {
    pub features: RawFeatures,
}

impl ScoreRequest {
    /// Parse a request body.
    ///
    /// # Errors
    /// Returns `LendscoreError::Serialization` if the body is not a JSON
    /// object.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Read and parse a request body from `reader`.
    ///
    /// # Errors
    /// Returns `LendscoreError::Io` if reading fails, or
    /// `LendscoreError::Serialization` if the body is not a JSON object.
    pub fn from_reader<R: Read>(mut reader: R) -> crate::Result<Self> {
        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        Self::from_json(&body)
    }

    /// Validate into a feature record.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found.
    pub fn to_record(&self) -> Result<FeatureRecord, ValidationError> {
        FeatureRecord::from_raw(&self.features)
    }
}

/// Successful scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub default_probability: f64,
    pub risk_level: String,
    pub eligibility: String,
    pub eligibility_message: String,
    pub risk_factors: Vec<String>,
    pub model_confidence: u8,
}

impl From<&ScoringResult> for ScoreResponse {
    fn from(result: &ScoringResult) -> Self {
        Self {
            default_probability: result.default_probability,
            risk_level: result.risk_level.label().to_string(),
            eligibility: result.eligibility.label().to_string(),
            eligibility_message: result.eligibility.message().to_string(),
            risk_factors: result
                .risk_factors
                .iter()
                .map(|factor| factor.description().to_string())
                .collect(),
            model_confidence: result.model_confidence,
        }
    }
}

/// Error response for a rejected request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ErrorResponse {
    /// Response for an unreadable or malformed (non-object) body.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            error: "malformed".to_string(),
            field: None,
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error: "validation".to_string(),
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

/// The full feature catalog, in model order, for clients that build their
/// own input forms.
#[must_use]
pub fn catalog() -> &'static [FeatureSpec] {
    &FEATURE_CATALOG
}
