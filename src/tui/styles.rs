//! Lending-themed color palette and styles.
//!
//! Tier and decision colors come from the domain types so the dashboard and
//! any other front end agree on them.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{Eligibility, RiskLevel};

/// Lending theme color palette.
pub struct LendingTheme;

impl LendingTheme {
    // === Primary Colors ===

    /// Navy blue - Primary color
    pub const PRIMARY: Color = Color::Rgb(30, 136, 229); // #1E88E5

    /// Lighter blue for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(100, 181, 246); // #64B5F6

    /// Darker blue for accents
    pub const PRIMARY_DARK: Color = Color::Rgb(13, 71, 161); // #0D47A1

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(76, 175, 80); // #4CAF50

    pub const WARNING: Color = Color::Rgb(255, 193, 7); // #FFC107

    pub const DANGER: Color = Color::Rgb(244, 67, 54); // #F44336

    // === Background Colors ===

    /// Near-black with blue tint
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for the active tab
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the text cursor
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Get risk tier style
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        let (r, g, b) = level.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Get eligibility decision style
    #[must_use]
    pub fn eligibility(decision: Eligibility) -> Style {
        let (r, g, b) = decision.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Get confidence gauge style
    #[must_use]
    pub fn confidence(percent: u8) -> Style {
        if percent >= 90 {
            Self::success()
        } else if percent >= 80 {
            Self::warning()
        } else {
            Self::danger()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_styles_follow_domain_colors() {
        assert_eq!(
            LendingTheme::risk_level(RiskLevel::Low).fg,
            Some(Color::Rgb(76, 175, 80))
        );
        assert_eq!(
            LendingTheme::risk_level(RiskLevel::VeryHigh).fg,
            Some(Color::Rgb(183, 28, 28))
        );
        assert_eq!(
            LendingTheme::eligibility(Eligibility::ConditionallyApproved).fg,
            Some(Color::Rgb(255, 193, 7))
        );
    }

    #[test]
    fn test_confidence_style_bands() {
        assert_eq!(LendingTheme::confidence(100), LendingTheme::success());
        assert_eq!(LendingTheme::confidence(85), LendingTheme::warning());
        assert_eq!(LendingTheme::confidence(70), LendingTheme::danger());
    }
}
