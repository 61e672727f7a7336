//! Scoring output types.
//!
//! Represents the result of evaluating one borrower record: the default
//! probability, its risk tier, the lending decision and the factors that
//! explain it.

use serde::{Deserialize, Serialize};

/// Maximum number of risk factors surfaced to the user.
pub const MAX_DISPLAYED_FACTORS: usize = 3;

/// Risk tier derived from the default probability, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// All tiers, least to most severe.
    pub const ALL: [RiskLevel; 5] = [
        Self::Low,
        Self::Moderate,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Map a default probability to its tier.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.10 {
            Self::Low
        } else if probability < 0.20 {
            Self::Moderate
        } else if probability < 0.35 {
            Self::Medium
        } else if probability < 0.50 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::VeryHigh => "Very High Risk",
        }
    }

    /// Display color as RGB.
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (76, 175, 80),       // Green (#4CAF50)
            Self::Moderate => (255, 193, 7),  // Amber (#FFC107)
            Self::Medium => (255, 152, 0),    // Orange (#FF9800)
            Self::High => (244, 67, 54),      // Red (#F44336)
            Self::VeryHigh => (183, 28, 28),  // Deep red (#B71C1C)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lending decision, ordered from most to least lenient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    Approved,
    ConditionallyApproved,
    Declined,
}

impl Eligibility {
    /// Map a default probability to a decision.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.25 {
            Self::Approved
        } else if probability < 0.40 {
            Self::ConditionallyApproved
        } else {
            Self::Declined
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ConditionallyApproved => "Conditionally Approved",
            Self::Declined => "Declined",
        }
    }

    /// Explanation shown alongside the decision.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Approved => "This application meets our lending criteria and is approved.",
            Self::ConditionallyApproved => {
                "This application is approved subject to additional conditions (higher interest rate or lower loan amount)."
            }
            Self::Declined => "This application does not meet our lending criteria.",
        }
    }

    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Approved => (76, 175, 80),
            Self::ConditionallyApproved => (255, 193, 7),
            Self::Declined => (244, 67, 54),
        }
    }
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrower characteristic that contributed to the assessment.
///
/// Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    LowCreditScore,
    Delinquencies,
    HighDebtToIncome,
    HighLoanToValue,
    HighUtilization,
    LimitedPaymentHistory,
}

impl RiskFactor {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::LowCreditScore => "Low credit score",
            Self::Delinquencies => "Presence of delinquencies",
            Self::HighDebtToIncome => "High debt-to-income ratio",
            Self::HighLoanToValue => "High loan-to-value ratio",
            Self::HighUtilization => "High credit utilization",
            Self::LimitedPaymentHistory => "Limited payment history",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Confidence heuristic: 100 minus 5 per matched factor, floored at 70.
#[must_use]
pub fn model_confidence(matched_factors: usize) -> u8 {
    let penalty = matched_factors.saturating_mul(5).min(30);
    // penalty <= 30, so the subtraction stays in 70..=100
    100 - penalty as u8
}

/// One signed contribution to the default probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub step: &'static str,
    pub adjustment: f64,
}

/// Per-step contributions, in evaluation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub base_rate: f64,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    /// Base rate plus every contribution, before clamping.
    #[must_use]
    pub fn raw_probability(&self) -> f64 {
        self.contributions
            .iter()
            .fold(self.base_rate, |acc, c| acc + c.adjustment)
    }
}

/// Result of scoring one feature record. Derived fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Default probability, within [0.01, 0.99]
    pub default_probability: f64,

    pub risk_level: RiskLevel,

    pub eligibility: Eligibility,

    /// First matched risk factors, at most [`MAX_DISPLAYED_FACTORS`]
    pub risk_factors: Vec<RiskFactor>,

    /// Count of all matched factors, including those not displayed
    pub matched_factors: usize,

    /// Heuristic confidence in [70, 100]
    pub model_confidence: u8,

    pub breakdown: ScoreBreakdown,
}

impl ScoringResult {
    /// Assemble a result from a clamped probability and every matched factor.
    #[must_use]
    pub fn new(
        default_probability: f64,
        mut matched: Vec<RiskFactor>,
        breakdown: ScoreBreakdown,
    ) -> Self {
        let matched_factors = matched.len();
        matched.truncate(MAX_DISPLAYED_FACTORS);
        Self {
            default_probability,
            risk_level: RiskLevel::from_probability(default_probability),
            eligibility: Eligibility::from_probability(default_probability),
            risk_factors: matched,
            matched_factors,
            model_confidence: model_confidence(matched_factors),
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_from_probability() {
        assert_eq!(RiskLevel::from_probability(0.01), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.0999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.10), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.20), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.35), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.50), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_probability(0.99), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_eligibility_from_probability() {
        assert_eq!(Eligibility::from_probability(0.24), Eligibility::Approved);
        assert_eq!(
            Eligibility::from_probability(0.25),
            Eligibility::ConditionallyApproved
        );
        assert_eq!(
            Eligibility::from_probability(0.3999),
            Eligibility::ConditionallyApproved
        );
        assert_eq!(Eligibility::from_probability(0.40), Eligibility::Declined);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::VeryHigh.to_string(), "Very High Risk");
        assert_eq!(
            Eligibility::ConditionallyApproved.to_string(),
            "Conditionally Approved"
        );
        assert_eq!(RiskFactor::Delinquencies.to_string(), "Presence of delinquencies");
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskLevel::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(Eligibility::Approved < Eligibility::ConditionallyApproved);
        assert!(Eligibility::ConditionallyApproved < Eligibility::Declined);
    }

    #[test]
    fn test_model_confidence() {
        assert_eq!(model_confidence(0), 100);
        assert_eq!(model_confidence(1), 95);
        assert_eq!(model_confidence(4), 80);
        assert_eq!(model_confidence(6), 70);
        assert_eq!(model_confidence(usize::MAX), 70);
    }

    #[test]
    fn test_result_truncates_display_but_counts_all() {
        let matched = vec![
            RiskFactor::LowCreditScore,
            RiskFactor::Delinquencies,
            RiskFactor::HighDebtToIncome,
            RiskFactor::HighLoanToValue,
            RiskFactor::HighUtilization,
        ];
        let result = ScoringResult::new(0.6, matched, ScoreBreakdown::default());

        assert_eq!(result.risk_factors.len(), MAX_DISPLAYED_FACTORS);
        assert_eq!(result.risk_factors[2], RiskFactor::HighDebtToIncome);
        assert_eq!(result.matched_factors, 5);
        assert_eq!(result.model_confidence, 75);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);
        assert_eq!(result.eligibility, Eligibility::Declined);
    }
}
