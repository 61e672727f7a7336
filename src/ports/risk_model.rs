//! Risk model port: Trait for scoring borrower records.
//!
//! This trait keeps the application and presentation layers independent of
//! the concrete rule set that produces a [`ScoringResult`].

use crate::domain::{FeatureRecord, ScoringResult};

/// Trait for risk models.
///
/// Implementations must be pure: the same record always yields the same
/// result, and scoring a validated record never fails.
pub trait RiskModel: Send + Sync {
    /// Short identifier used in logs and the dashboard.
    fn name(&self) -> &str;

    /// Score a validated feature record.
    fn score(&self, record: &FeatureRecord) -> ScoringResult;
}
