//! Feature catalog for the lending risk model.
//!
//! The 30 borrower attributes, their bounds and defaults are a fixed external
//! contract: request payloads, the input form and the scorer all key off the
//! names below.

use serde::{Deserialize, Serialize};

/// Number of features in the catalog.
pub const FEATURE_COUNT: usize = 30;

/// How a feature value is interpreted and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Whole-number count (payments, months, inquiries, score points)
    Count,
    /// Ratio or percentage expressed as a fraction
    Ratio,
    /// Dollar amount
    Currency,
    /// Large whole-number quantity that is not money (vehicle mileage)
    Amount,
}

/// Input-form grouping, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureCategory {
    #[serde(rename = "Credit & Balance")]
    CreditBalance,
    #[serde(rename = "Payment History")]
    PaymentHistory,
    #[serde(rename = "Delinquency & Inquiries")]
    DelinquencyInquiries,
    #[serde(rename = "Loan Structure")]
    LoanStructure,
    #[serde(rename = "Risk & Eligibility")]
    RiskEligibility,
}

impl FeatureCategory {
    /// All categories in display order.
    pub const ALL: [FeatureCategory; 5] = [
        Self::CreditBalance,
        Self::PaymentHistory,
        Self::DelinquencyInquiries,
        Self::LoanStructure,
        Self::RiskEligibility,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditBalance => "Credit & Balance",
            Self::PaymentHistory => "Payment History",
            Self::DelinquencyInquiries => "Delinquency & Inquiries",
            Self::LoanStructure => "Loan Structure",
            Self::RiskEligibility => "Risk & Eligibility",
        }
    }

    /// Catalog entries belonging to this category, in catalog order.
    pub fn features(self) -> impl Iterator<Item = &'static FeatureSpec> {
        FEATURE_CATALOG.iter().filter(move |spec| spec.category == self)
    }
}

impl std::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Declaration of a single catalog feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Increment used by the form's slider-style adjustment
    pub step: f64,
    pub category: FeatureCategory,
    pub description: &'static str,
}

impl FeatureSpec {
    /// Clamp a raw value to `[min, max]`.
    ///
    /// Fractional input is kept as given for every kind; band comparisons
    /// see the exact value.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies inside `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Render a value the way the dashboard shows it.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match self.kind {
            FeatureKind::Ratio => format!("{value:.2}"),
            FeatureKind::Currency => format!("${}", group_thousands(value)),
            FeatureKind::Count | FeatureKind::Amount => group_thousands(value),
        }
    }
}

/// Format a whole number with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Look up a catalog entry by name.
#[must_use]
pub fn lookup(name: &str) -> Option<(usize, &'static FeatureSpec)> {
    FEATURE_CATALOG
        .iter()
        .enumerate()
        .find(|(_, spec)| spec.name == name)
}

// Names the scorer reads directly.
pub const CREDIT_SCORE: &str = "CREDIT_SCORE_AVG_CALC";
pub const DELINQUENCY_COUNT: &str = "DELINQ_CNT_30_DAY_TOTAL";
pub const DEBT_TO_INCOME: &str = "FE_DEBT_TO_INCOME";
pub const LOAN_TO_VALUE: &str = "LTV_FRONT";
pub const TOTAL_INCOME: &str = "FE_TOTAL_INCOME";
pub const REVOLVING_UTILIZATION: &str = "REVOLVING_UTILIZATION_TAGGED_TOTAL";
pub const PAYMENT_COUNT: &str = "PAYMENT_MADE_CNT_TOTAL";

const fn spec(
    name: &'static str,
    kind: FeatureKind,
    min: f64,
    max: f64,
    default: f64,
    step: f64,
    category: FeatureCategory,
    description: &'static str,
) -> FeatureSpec {
    FeatureSpec {
        name,
        kind,
        min,
        max,
        default,
        step,
        category,
        description,
    }
}

use FeatureCategory::{
    CreditBalance, DelinquencyInquiries, LoanStructure, PaymentHistory, RiskEligibility,
};
use FeatureKind::{Amount, Count, Currency, Ratio};

/// The fixed feature catalog, in model order.
pub static FEATURE_CATALOG: [FeatureSpec; FEATURE_COUNT] = [
    spec("CREDIT_CARD_AVAILABLE_TOTAL", Currency, 0.0, 100_000.0, 10_000.0, 1000.0, CreditBalance,
        "Total available credit across all credit cards"),
    spec("RECENT_OPEN_ACCT_CUR_BAL_OPEN_TOTAL", Currency, 0.0, 100_000.0, 5000.0, 1000.0, CreditBalance,
        "Total balance of recently opened accounts"),
    spec("PAYMENT_MADE_CNT_TOTAL", Count, 0.0, 100.0, 24.0, 1.0, PaymentHistory,
        "Total number of payments made across all accounts"),
    spec("PAYMENT_MADE_CNT_TAGGED_TOTAL", Count, 0.0, 100.0, 20.0, 1.0, PaymentHistory,
        "Total number of tagged payments made"),
    spec("ALL_CREDIT_HISTORY_MONTHS_TOTAL", Count, 0.0, 360.0, 60.0, 1.0, PaymentHistory,
        "Total months of credit history across all accounts"),
    spec("AUTO_PAYMENT_MADE_CNT_TOTAL", Count, 0.0, 100.0, 18.0, 1.0, PaymentHistory,
        "Total number of auto payments made"),
    spec("INQUIRY_CNT_TOTAL", Count, 0.0, 30.0, 3.0, 1.0, DelinquencyInquiries,
        "Total number of credit inquiries"),
    spec("DELINQ_CNT_30_DAY_TOTAL", Count, 0.0, 20.0, 0.0, 1.0, DelinquencyInquiries,
        "Total number of 30-day delinquencies"),
    spec("INQUIRY_RECENT_CNT_TOTAL", Count, 0.0, 10.0, 1.0, 1.0, DelinquencyInquiries,
        "Total number of recent credit inquiries"),
    spec("REVOLVING_UTILIZATION_TAGGED_TOTAL", Ratio, 0.0, 1.0, 0.3, 0.01, CreditBalance,
        "Total utilization of tagged revolving accounts"),
    spec("CREDIT_SCORE_AVG_CALC", Count, 300.0, 850.0, 680.0, 1.0, RiskEligibility,
        "Calculated average credit score"),
    spec("DEALER_ADDS_PERCENT", Ratio, 0.0, 0.3, 0.05, 0.01, LoanStructure,
        "Percentage of dealer additions to loan amount"),
    spec("TOTAL_DOWN_CONTRACT_PERCENT", Ratio, 0.0, 0.5, 0.15, 0.01, LoanStructure,
        "Total down payment percentage in contract"),
    spec("PAYMENT_AMOUNT", Currency, 100.0, 2000.0, 450.0, 50.0, PaymentHistory,
        "Monthly payment amount"),
    spec("AUTO_PTI_TOTAL", Ratio, 0.0, 0.5, 0.18, 0.01, RiskEligibility,
        "Auto payment-to-income ratio"),
    spec("LTV_FRONT", Ratio, 0.5, 1.5, 0.9, 0.01, LoanStructure,
        "Loan-to-value ratio (front-end)"),
    spec("FE_LTV_BACK", Ratio, 0.5, 1.5, 0.85, 0.01, LoanStructure,
        "Loan-to-value ratio (back-end)"),
    spec("VEHICLE_MILEAGE", Amount, 0.0, 150_000.0, 35_000.0, 1000.0, RiskEligibility,
        "Mileage of the vehicle being financed"),
    spec("CREDIT_CARD_CUR_BAL_TOTAL", Currency, 0.0, 100_000.0, 7500.0, 500.0, CreditBalance,
        "Total current balance on all credit cards"),
    spec("AUTO_CREDIT_HISTORY_MONTHS_MAX_TOTAL", Count, 0.0, 240.0, 48.0, 1.0, PaymentHistory,
        "Maximum months of auto credit history"),
    spec("REBATE_PERCENT", Ratio, 0.0, 0.2, 0.03, 0.01, LoanStructure,
        "Percentage of rebates applied to purchase"),
    spec("CASH_DOWN_CONTRACT_PERCENT", Ratio, 0.0, 0.5, 0.1, 0.01, LoanStructure,
        "Cash down payment percentage in contract"),
    spec("FE_DEBT_TO_INCOME", Ratio, 0.0, 0.6, 0.32, 0.01, RiskEligibility,
        "Front-end debt-to-income ratio"),
    spec("BANK_CARD_CREDIT_LIMIT_TOTAL", Currency, 0.0, 100_000.0, 15_000.0, 1000.0, CreditBalance,
        "Total credit limit across bank cards"),
    spec("RECENT_OPEN_ACCT_TRDLN_OPEN_TOTAL", Count, 0.0, 10.0, 2.0, 1.0, DelinquencyInquiries,
        "Total tradelines for recently opened accounts"),
    spec("DEALER_RESERVE", Currency, 0.0, 5000.0, 500.0, 100.0, LoanStructure,
        "Amount reserved by dealer in financing"),
    spec("DEROG_CUR_BAL_TOTAL", Currency, 0.0, 10_000.0, 0.0, 500.0, CreditBalance,
        "Total current balance on derogatory accounts"),
    spec("CREDIT_CARD_CREDIT_LIMIT_TOTAL", Currency, 0.0, 100_000.0, 18_000.0, 1000.0, CreditBalance,
        "Total credit limit across all credit cards"),
    spec("FE_TOTAL_INCOME", Currency, 20_000.0, 300_000.0, 75_000.0, 5000.0, RiskEligibility,
        "Total front-end income"),
    spec("FE_RESIDENCE_TOTAL_MONTHS", Count, 0.0, 240.0, 48.0, 1.0, RiskEligibility,
        "Total months at current residence"),
];
