//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the feature catalog, the validated borrower
//! record and the scoring output.

mod assessment;
pub mod feature;
mod record;

pub use assessment::{
    model_confidence, Contribution, Eligibility, RiskFactor, RiskLevel, ScoreBreakdown,
    ScoringResult, MAX_DISPLAYED_FACTORS,
};
pub use feature::{FeatureCategory, FeatureKind, FeatureSpec, FEATURE_CATALOG, FEATURE_COUNT};
pub use record::{FeatureRecord, RawFeatures, ValidationError};
