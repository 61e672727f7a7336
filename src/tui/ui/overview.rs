//! Overview screen: what the model predicts and why it matters.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::LendingTheme;

const INTRO: &str = "This dashboard demonstrates a predictive lending model focused on \
estimating borrower risk and Cost of Funds (COF). It uses credit, income, delinquency, \
and account-related features to provide insights and predictions for banking and \
financial systems.";

const CARDS: [(&str, &str); 2] = [
    (
        "What is COF?",
        "Cost of Funds (COF) represents the interest expense a financial institution must \
         pay for the money they use in their lending operations. It's a critical metric for \
         determining loan pricing and profitability.",
    ),
    (
        "Risk Prediction",
        "Our model evaluates borrower attributes to predict the likelihood of default or \
         late payments. This helps lenders make informed decisions about loan approvals and \
         interest rates.",
    ),
];

const BENEFITS: [(&str, &str); 3] = [
    (
        "Improved Accuracy",
        "Targets better prediction accuracy than traditional credit scoring methods, \
         resulting in fewer bad loans.",
    ),
    (
        "Faster Decisions",
        "Automated risk assessment reduces loan processing time from days to minutes.",
    ),
    (
        "Deeper Insights",
        "Surfaces relationships between borrower attributes and loan performance, allowing \
         for more nuanced lending strategies.",
    ),
];

/// Render the overview screen.
pub fn render_overview(f: &mut Frame, area: Rect, has_result: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Intro
            Constraint::Length(7), // COF / risk cards
            Constraint::Min(0),    // Benefits
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);

    let intro = Paragraph::new(Span::styled(INTRO, LendingTheme::text())).wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[1]);

    render_cards(f, chunks[2], &CARDS);
    render_benefits(f, chunks[3]);
    render_footer(f, chunks[4], has_result);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", LendingTheme::text()),
        Span::styled("Lending Model: Predicting Risk and COF", LendingTheme::title()),
        Span::styled(" │ ", LendingTheme::text_muted()),
        Span::styled("Lending Model Dashboard", LendingTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_cards(f: &mut Frame, area: Rect, cards: &[(&str, &str)]) {
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (column, (title, body)) in columns.iter().zip(cards.iter()) {
        let card = Paragraph::new(Span::styled(*body, LendingTheme::text_secondary()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(format!(" {title} "), LendingTheme::subtitle()))
                    .borders(Borders::ALL)
                    .border_style(LendingTheme::border()),
            );
        f.render_widget(card, *column);
    }
}

fn render_benefits(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Benefits of the Model ", LendingTheme::title()))
        .borders(Borders::TOP)
        .border_style(LendingTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    render_cards(f, inner, &BENEFITS);
}

fn render_footer(f: &mut Frame, area: Rect, has_result: bool) {
    let mut spans = vec![
        Span::styled("[I] ", LendingTheme::key_hint()),
        Span::styled("Input Features ", LendingTheme::key_desc()),
        Span::styled("[O] ", LendingTheme::key_hint()),
        Span::styled("Model Output ", LendingTheme::key_desc()),
        Span::styled("[Q] ", LendingTheme::key_hint()),
        Span::styled("Quit", LendingTheme::key_desc()),
    ];
    if has_result {
        spans.push(Span::styled(
            "   (result available)",
            LendingTheme::success(),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(footer, area);
}
