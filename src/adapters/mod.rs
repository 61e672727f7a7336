//! Adapters layer: Concrete implementations of ports and boundaries.
//!
//! - `threshold`: rule-table risk model
//! - `wire`: JSON request/response contract
//! - `sanitize`: PII filtering for logs

pub mod sanitize;
pub mod threshold;
pub mod wire;
