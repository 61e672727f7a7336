//! # Lendscore
//!
//! Rule-based lending risk scoring.
//!
//! This crate provides:
//! - A fixed 30-feature borrower catalog with validation and defaults
//! - A deterministic threshold model producing default probability, risk
//!   tier, eligibility decision, risk factors and a confidence score
//! - A JSON request/response contract for scoring as a service
//! - A terminal dashboard for entering applications and reviewing results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (feature catalog, record, scoring result)
//! - `ports`: Trait definitions for the scoring seam
//! - `adapters`: Concrete implementations (threshold model, JSON wire, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Eligibility, FeatureRecord, RiskLevel, ScoringResult, ValidationError};

/// Result type for Lendscore operations
pub type Result<T> = std::result::Result<T, LendscoreError>;

/// Main error type for Lendscore
#[derive(Debug, thiserror::Error)]
pub enum LendscoreError {
    #[error("Invalid application data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
