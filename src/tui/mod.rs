//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the lending dashboard:
//! - Model overview
//! - Loan application input, one tab per feature category
//! - Model output with decision, factors and score breakdown

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::LendingTheme;
