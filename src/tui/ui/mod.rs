//! UI module: View components for the TUI.

pub mod features;
pub mod output;
pub mod overview;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::LendingTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Scores are indicative estimates from a rule-based model and are not a credit decision.",
            LendingTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Review every application against your lending policy.",
            LendingTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(LendingTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
