//! Threshold adapter: Implementation of RiskModel using hand-tuned rule tables.
//!
//! The model is an additive point system over a base default rate. Each
//! scoring step is a row in [`SCORING_RULES`]:
//!
//! - ladders: ordered `(comparison, bound, adjustment)` bands evaluated
//!   top-down, first match wins, with a fallback when nothing matches;
//! - linear steps: `min(cap, value * per_unit)`.
//!
//! Risk factors are independent predicates in [`FACTOR_RULES`], evaluated in
//! declaration order.
//!
//! # Constants
//!
//! Band bounds and adjustments are a fixed contract shared with the existing
//! lending dashboard. They are heuristics with no documented derivation and
//! must be reproduced exactly.

use crate::domain::feature::{
    CREDIT_SCORE, DEBT_TO_INCOME, DELINQUENCY_COUNT, LOAN_TO_VALUE, PAYMENT_COUNT,
    REVOLVING_UTILIZATION, TOTAL_INCOME,
};
use crate::domain::{Contribution, FeatureRecord, RiskFactor, ScoreBreakdown, ScoringResult};
use crate::ports::RiskModel;

/// Default probability before any adjustment.
pub const BASE_RATE: f64 = 0.05;

/// Lowest reported default probability.
pub const PROBABILITY_FLOOR: f64 = 0.01;

/// Highest reported default probability.
pub const PROBABILITY_CEILING: f64 = 0.99;

/// Strict comparison used by bands and factor predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `value < bound`
    Below,
    /// `value > bound`
    Above,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, value: f64, bound: f64) -> bool {
        match self {
            Self::Below => value < bound,
            Self::Above => value > bound,
        }
    }
}

/// One row of a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub comparison: Comparison,
    pub bound: f64,
    pub adjustment: f64,
}

impl Band {
    const fn below(bound: f64, adjustment: f64) -> Self {
        Self {
            comparison: Comparison::Below,
            bound,
            adjustment,
        }
    }

    const fn above(bound: f64, adjustment: f64) -> Self {
        Self {
            comparison: Comparison::Above,
            bound,
            adjustment,
        }
    }

    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        self.comparison.holds(value, self.bound)
    }
}

/// A scoring step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Ordered bands, first match wins, `fallback` when none match.
    Ladder {
        step: &'static str,
        feature: &'static str,
        bands: &'static [Band],
        fallback: f64,
    },
    /// `min(cap, value * per_unit)`
    Linear {
        step: &'static str,
        feature: &'static str,
        per_unit: f64,
        cap: f64,
    },
}

impl Rule {
    #[must_use]
    pub fn step(&self) -> &'static str {
        match self {
            Self::Ladder { step, .. } | Self::Linear { step, .. } => *step,
        }
    }

    #[must_use]
    pub fn feature(&self) -> &'static str {
        match self {
            Self::Ladder { feature, .. } | Self::Linear { feature, .. } => *feature,
        }
    }

    /// Signed adjustment this step applies for `value`.
    #[must_use]
    pub fn adjustment(&self, value: f64) -> f64 {
        match self {
            Self::Ladder {
                bands, fallback, ..
            } => bands
                .iter()
                .find(|band| band.matches(value))
                .map_or(*fallback, |band| band.adjustment),
            Self::Linear { per_unit, cap, .. } => (value * per_unit).min(*cap),
        }
    }
}

/// Scoring steps in evaluation order.
pub static SCORING_RULES: [Rule; 7] = [
    Rule::Ladder {
        step: "Credit score",
        feature: CREDIT_SCORE,
        bands: &[
            Band::below(600.0, 0.25),
            Band::below(650.0, 0.15),
            Band::below(700.0, 0.05),
        ],
        fallback: -0.02,
    },
    Rule::Linear {
        step: "Delinquencies",
        feature: DELINQUENCY_COUNT,
        per_unit: 0.03,
        cap: 0.3,
    },
    Rule::Ladder {
        step: "Debt-to-income",
        feature: DEBT_TO_INCOME,
        bands: &[
            Band::above(0.45, 0.2),
            Band::above(0.36, 0.1),
            Band::above(0.28, 0.05),
        ],
        fallback: 0.0,
    },
    Rule::Ladder {
        step: "Loan-to-value",
        feature: LOAN_TO_VALUE,
        bands: &[
            Band::above(1.1, 0.15),
            Band::above(0.95, 0.08),
            Band::above(0.8, 0.03),
        ],
        fallback: 0.0,
    },
    Rule::Ladder {
        step: "Income",
        feature: TOTAL_INCOME,
        bands: &[
            Band::above(120_000.0, -0.05),
            Band::above(80_000.0, -0.03),
            Band::above(50_000.0, -0.01),
        ],
        fallback: 0.02,
    },
    Rule::Ladder {
        step: "Credit utilization",
        feature: REVOLVING_UTILIZATION,
        bands: &[
            Band::above(0.8, 0.12),
            Band::above(0.6, 0.08),
            Band::above(0.4, 0.04),
        ],
        fallback: 0.0,
    },
    Rule::Ladder {
        step: "Payment history",
        feature: PAYMENT_COUNT,
        bands: &[
            Band::above(48.0, -0.08),
            Band::above(24.0, -0.04),
            Band::above(12.0, -0.02),
        ],
        fallback: 0.0,
    },
];

/// Predicate that flags a risk factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorRule {
    pub factor: RiskFactor,
    pub feature: &'static str,
    pub comparison: Comparison,
    pub bound: f64,
}

/// Risk factor predicates in display order.
pub static FACTOR_RULES: [FactorRule; 6] = [
    FactorRule {
        factor: RiskFactor::LowCreditScore,
        feature: CREDIT_SCORE,
        comparison: Comparison::Below,
        bound: 650.0,
    },
    FactorRule {
        factor: RiskFactor::Delinquencies,
        feature: DELINQUENCY_COUNT,
        comparison: Comparison::Above,
        bound: 0.0,
    },
    FactorRule {
        factor: RiskFactor::HighDebtToIncome,
        feature: DEBT_TO_INCOME,
        comparison: Comparison::Above,
        bound: 0.40,
    },
    FactorRule {
        factor: RiskFactor::HighLoanToValue,
        feature: LOAN_TO_VALUE,
        comparison: Comparison::Above,
        bound: 1.0,
    },
    FactorRule {
        factor: RiskFactor::HighUtilization,
        feature: REVOLVING_UTILIZATION,
        comparison: Comparison::Above,
        bound: 0.6,
    },
    FactorRule {
        factor: RiskFactor::LimitedPaymentHistory,
        feature: PAYMENT_COUNT,
        comparison: Comparison::Below,
        bound: 12.0,
    },
];

/// Rule-table risk model.
#[derive(Debug, Clone)]
pub struct ThresholdModel {
    base_rate: f64,
    rules: &'static [Rule],
    factors: &'static [FactorRule],
}

impl ThresholdModel {
    /// Model backed by the standard lending rule tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_rate: BASE_RATE,
            rules: &SCORING_RULES,
            factors: &FACTOR_RULES,
        }
    }

    /// Per-step contributions for `record`.
    #[must_use]
    pub fn breakdown(&self, record: &FeatureRecord) -> ScoreBreakdown {
        let contributions = self
            .rules
            .iter()
            .map(|rule| Contribution {
                step: rule.step(),
                adjustment: rule.adjustment(feature_value(record, rule.feature())),
            })
            .collect();

        ScoreBreakdown {
            base_rate: self.base_rate,
            contributions,
        }
    }

    /// Every matched risk factor, in declaration order.
    #[must_use]
    pub fn matched_factors(&self, record: &FeatureRecord) -> Vec<RiskFactor> {
        self.factors
            .iter()
            .filter(|rule| {
                rule.comparison
                    .holds(feature_value(record, rule.feature), rule.bound)
            })
            .map(|rule| rule.factor)
            .collect()
    }
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskModel for ThresholdModel {
    fn name(&self) -> &str {
        "threshold-rules-v1"
    }

    fn score(&self, record: &FeatureRecord) -> ScoringResult {
        let breakdown = self.breakdown(record);
        let probability = breakdown
            .raw_probability()
            .clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING);

        ScoringResult::new(probability, self.matched_factors(record), breakdown)
    }
}

fn feature_value(record: &FeatureRecord, name: &str) -> f64 {
    // Rule tables only reference catalog names (see tests).
    record.get(name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{feature, Eligibility, RiskLevel};

    const TOLERANCE: f64 = 1e-9;

    fn record(values: &[(&str, f64)]) -> FeatureRecord {
        values
            .iter()
            .fold(FeatureRecord::defaults(), |acc, (name, value)| {
                acc.with_value(name, *value).expect("Should set feature")
            })
    }

    fn rule(step: &str) -> &'static Rule {
        SCORING_RULES
            .iter()
            .find(|r| r.step() == step)
            .expect("Should find rule")
    }

    #[test]
    fn test_rule_tables_reference_catalog_features() {
        for rule in SCORING_RULES.iter() {
            assert!(feature::lookup(rule.feature()).is_some(), "{}", rule.feature());
        }
        for factor in FACTOR_RULES.iter() {
            assert!(feature::lookup(factor.feature).is_some(), "{}", factor.feature);
        }
    }

    #[test]
    fn test_credit_score_bands() {
        let credit = rule("Credit score");
        assert!((credit.adjustment(599.0) - 0.25).abs() < TOLERANCE);
        assert!((credit.adjustment(600.0) - 0.15).abs() < TOLERANCE);
        assert!((credit.adjustment(649.0) - 0.15).abs() < TOLERANCE);
        assert!((credit.adjustment(650.0) - 0.05).abs() < TOLERANCE);
        assert!((credit.adjustment(699.0) - 0.05).abs() < TOLERANCE);
        assert!((credit.adjustment(700.0) + 0.02).abs() < TOLERANCE);
        assert!((credit.adjustment(850.0) + 0.02).abs() < TOLERANCE);
    }

    #[test]
    fn test_debt_to_income_bands() {
        let dti = rule("Debt-to-income");
        assert!((dti.adjustment(0.46) - 0.2).abs() < TOLERANCE);
        assert!((dti.adjustment(0.45) - 0.1).abs() < TOLERANCE);
        assert!((dti.adjustment(0.36) - 0.05).abs() < TOLERANCE);
        assert!(dti.adjustment(0.28).abs() < TOLERANCE);
        assert!(dti.adjustment(0.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_delinquency_is_linear_with_cap() {
        let delinquency = rule("Delinquencies");
        assert!(delinquency.adjustment(0.0).abs() < TOLERANCE);
        assert!((delinquency.adjustment(2.0) - 0.06).abs() < TOLERANCE);
        assert!((delinquency.adjustment(10.0) - 0.3).abs() < TOLERANCE);
        assert!((delinquency.adjustment(20.0) - 0.3).abs() < TOLERANCE);
    }

    #[test]
    fn test_income_fallback_adds_risk() {
        let income = rule("Income");
        assert!((income.adjustment(120_001.0) + 0.05).abs() < TOLERANCE);
        assert!((income.adjustment(120_000.0) + 0.03).abs() < TOLERANCE);
        assert!((income.adjustment(50_001.0) + 0.01).abs() < TOLERANCE);
        assert!((income.adjustment(50_000.0) - 0.02).abs() < TOLERANCE);
    }

    #[test]
    fn test_high_risk_applicant() {
        let applicant = record(&[
            ("CREDIT_SCORE_AVG_CALC", 550.0),
            ("DELINQ_CNT_30_DAY_TOTAL", 2.0),
            ("FE_DEBT_TO_INCOME", 0.5),
            ("LTV_FRONT", 1.2),
            ("FE_TOTAL_INCOME", 40_000.0),
            ("REVOLVING_UTILIZATION_TAGGED_TOTAL", 0.85),
            ("PAYMENT_MADE_CNT_TOTAL", 6.0),
        ]);

        let result = ThresholdModel::new().score(&applicant);

        assert!((result.default_probability - 0.85).abs() < TOLERANCE);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);
        assert_eq!(result.eligibility, Eligibility::Declined);
        assert_eq!(
            result.risk_factors,
            vec![
                RiskFactor::LowCreditScore,
                RiskFactor::Delinquencies,
                RiskFactor::HighDebtToIncome,
            ]
        );
        assert_eq!(result.matched_factors, 6);
        assert_eq!(result.model_confidence, 70);
    }

    #[test]
    fn test_low_risk_applicant_clamped_to_floor() {
        let applicant = record(&[
            ("CREDIT_SCORE_AVG_CALC", 750.0),
            ("DELINQ_CNT_30_DAY_TOTAL", 0.0),
            ("FE_DEBT_TO_INCOME", 0.2),
            ("LTV_FRONT", 0.85),
            ("FE_TOTAL_INCOME", 150_000.0),
            ("REVOLVING_UTILIZATION_TAGGED_TOTAL", 0.2),
            ("PAYMENT_MADE_CNT_TOTAL", 60.0),
        ]);

        let model = ThresholdModel::new();
        let result = model.score(&applicant);

        assert!((result.breakdown.raw_probability() + 0.07).abs() < TOLERANCE);
        assert!((result.default_probability - PROBABILITY_FLOOR).abs() < TOLERANCE);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.eligibility, Eligibility::Approved);
        assert!(result.risk_factors.is_empty());
        assert_eq!(result.model_confidence, 100);
    }

    #[test]
    fn test_default_record() {
        // 0.05 + 0.05 (680) + 0.05 (dti 0.32) + 0.03 (ltv 0.9) - 0.01 (75k) - 0.02 (24 payments)
        let result = ThresholdModel::new().score(&FeatureRecord::defaults());
        assert!((result.default_probability - 0.15).abs() < TOLERANCE);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.eligibility, Eligibility::Approved);
        assert!(result.risk_factors.is_empty());
    }

    #[test]
    fn test_ceiling_clamp() {
        let applicant = record(&[
            ("CREDIT_SCORE_AVG_CALC", 300.0),
            ("DELINQ_CNT_30_DAY_TOTAL", 20.0),
            ("FE_DEBT_TO_INCOME", 0.6),
            ("LTV_FRONT", 1.5),
            ("FE_TOTAL_INCOME", 20_000.0),
            ("REVOLVING_UTILIZATION_TAGGED_TOTAL", 1.0),
            ("PAYMENT_MADE_CNT_TOTAL", 0.0),
        ]);

        let result = ThresholdModel::new().score(&applicant);
        assert!(result.breakdown.raw_probability() > PROBABILITY_CEILING);
        assert!((result.default_probability - PROBABILITY_CEILING).abs() < TOLERANCE);
    }

    #[test]
    fn test_breakdown_lists_every_step() {
        let breakdown = ThresholdModel::new().breakdown(&FeatureRecord::defaults());
        let steps: Vec<&str> = breakdown.contributions.iter().map(|c| c.step).collect();
        assert_eq!(
            steps,
            vec![
                "Credit score",
                "Delinquencies",
                "Debt-to-income",
                "Loan-to-value",
                "Income",
                "Credit utilization",
                "Payment history",
            ]
        );
    }

    #[test]
    fn test_factor_boundaries() {
        let model = ThresholdModel::new();
        let at_bounds = record(&[
            ("CREDIT_SCORE_AVG_CALC", 650.0),
            ("FE_DEBT_TO_INCOME", 0.40),
            ("LTV_FRONT", 1.0),
            ("REVOLVING_UTILIZATION_TAGGED_TOTAL", 0.6),
            ("PAYMENT_MADE_CNT_TOTAL", 12.0),
        ]);
        assert!(model.matched_factors(&at_bounds).is_empty());

        let past_bounds = record(&[
            ("CREDIT_SCORE_AVG_CALC", 649.0),
            ("PAYMENT_MADE_CNT_TOTAL", 11.0),
        ]);
        assert_eq!(
            model.matched_factors(&past_bounds),
            vec![RiskFactor::LowCreditScore, RiskFactor::LimitedPaymentHistory]
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let model = ThresholdModel::new();
        let applicant = record(&[("CREDIT_SCORE_AVG_CALC", 610.0), ("LTV_FRONT", 1.02)]);
        assert_eq!(model.score(&applicant), model.score(&applicant));
    }
}
