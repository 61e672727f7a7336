//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use case of the application: scoring a loan application.

mod scoring;

pub use scoring::ScoringService;
