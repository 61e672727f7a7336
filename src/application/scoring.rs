//! Scoring service: Orchestrates validation and risk scoring.
//!
//! This service coordinates:
//! - Validation of raw feature input
//! - Scoring through the configured risk model
//! - Audit logging of the outcome (never of raw feature values)

use crate::domain::{FeatureRecord, RawFeatures, ScoringResult};
use crate::ports::RiskModel;
use crate::LendscoreError;

/// Service for scoring loan applications.
///
/// Stateless apart from the model: every call takes its own record and
/// returns an independent result, so a shared service can be used from
/// several threads.
pub struct ScoringService<M>
where
    M: RiskModel,
{
    model: M,
}

impl<M> ScoringService<M>
where
    M: RiskModel,
{
    /// Create a new scoring service.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Identifier of the underlying model.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Score a validated record.
    #[must_use]
    pub fn evaluate(&self, record: &FeatureRecord) -> ScoringResult {
        let result = self.model.score(record);

        tracing::info!(
            model = self.model.name(),
            probability = %format_args!("{:.4}", result.default_probability),
            risk_level = %result.risk_level,
            eligibility = %result.eligibility,
            matched_factors = result.matched_factors,
            confidence = result.model_confidence,
            "Scored application"
        );

        result
    }

    /// Validate raw input, then score it.
    ///
    /// Returns the normalized record together with its result so callers can
    /// show the values that were actually scored.
    ///
    /// # Errors
    /// Returns `LendscoreError::Validation` if any field is unknown or not
    /// numeric.
    pub fn evaluate_raw(
        &self,
        raw: &RawFeatures,
    ) -> Result<(FeatureRecord, ScoringResult), LendscoreError> {
        let record = FeatureRecord::from_raw(raw).map_err(|e| {
            tracing::warn!(field = e.field(), "Rejected application: {}", e);
            e
        })?;
        let result = self.evaluate(&record);
        Ok((record, result))
    }
}
