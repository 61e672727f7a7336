//! Model output view: lending decision for the submitted application.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::feature::group_thousands;
use crate::domain::{FeatureRecord, ScoringResult};
use crate::tui::styles::LendingTheme;

/// Applicant profile rows: label and display value.
#[must_use]
pub fn applicant_profile(record: &FeatureRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Credit Score", format!("{:.0}", record.credit_score())),
        (
            "Annual Income",
            format!("${}", group_thousands(record.total_income())),
        ),
        ("DTI Ratio", format!("{:.1}%", record.debt_to_income() * 100.0)),
        (
            "Payment History",
            format!("{:.0} payments", record.payment_count()),
        ),
        ("Delinquencies", format!("{:.0}", record.delinquency_count())),
        ("LTV Ratio", format!("{:.1}%", record.loan_to_value() * 100.0)),
    ]
}

/// Render the model output screen
pub fn render_output(
    f: &mut Frame,
    area: Rect,
    record: &FeatureRecord,
    result: Option<&ScoringResult>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_output_header(f, chunks[0]);
    match result {
        Some(result) => render_result(f, chunks[1], record, result),
        None => render_prompt(f, chunks[1]),
    }
    render_output_footer(f, chunks[2], result.is_some());
}

fn render_output_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", LendingTheme::text()),
        Span::styled("Lending Decision Results", LendingTheme::title()),
        Span::styled(" │ Model Output", LendingTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_prompt(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Please enter application details on the 'Input Features' page to see lending decision results.",
            LendingTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [I] to go to Input Features",
            LendingTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_result(f: &mut Frame, area: Rect, record: &FeatureRecord, result: &ScoringResult) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Decision panels
            Constraint::Min(0),    // Summary
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[0]);

    render_probability(f, top[0], result);
    render_risk(f, top[1], result);
    render_eligibility(f, top[2], result);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[1]);

    render_profile(f, bottom[0], record);
    render_breakdown(f, bottom[1], result);
    render_confidence(f, bottom[2], result);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {title} "), LendingTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(LendingTheme::border())
}

fn render_probability(f: &mut Frame, area: Rect, result: &ScoringResult) {
    let block = panel("Default Probability");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .margin(1)
        .split(inner);

    let style = LendingTheme::risk_level(result.risk_level);
    let value = Paragraph::new(Line::from(Span::styled(
        format!("{:.1}%", result.default_probability * 100.0),
        style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(value, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(style)
        .ratio(result.default_probability.clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[1]);
}

fn render_risk(f: &mut Frame, area: Rect, result: &ScoringResult) {
    let mut lines = vec![
        Line::from(Span::styled(
            result.risk_level.label(),
            LendingTheme::risk_level(result.risk_level).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Key Risk Factors", LendingTheme::text_secondary())),
    ];

    if result.risk_factors.is_empty() {
        lines.push(Line::from(Span::styled(
            "No significant risk factors identified.",
            LendingTheme::text(),
        )));
    } else {
        lines.extend(result.risk_factors.iter().map(|factor| {
            Line::from(Span::styled(
                format!("• {}", factor.description()),
                LendingTheme::text(),
            ))
        }));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Risk Level"));
    f.render_widget(content, area);
}

fn render_eligibility(f: &mut Frame, area: Rect, result: &ScoringResult) {
    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            result.eligibility.label(),
            LendingTheme::eligibility(result.eligibility).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            result.eligibility.message(),
            LendingTheme::text(),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("Loan Eligibility"));
    f.render_widget(content, area);
}

fn render_profile(f: &mut Frame, area: Rect, record: &FeatureRecord) {
    let lines: Vec<Line> = applicant_profile(record)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<16}"), LendingTheme::text_secondary()),
                Span::styled(value, LendingTheme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel("Applicant Profile")), area);
}

fn render_breakdown(f: &mut Frame, area: Rect, result: &ScoringResult) {
    let breakdown = &result.breakdown;
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<20}", "Base rate"), LendingTheme::text_secondary()),
        Span::styled(
            format!("{:>7.1}%", breakdown.base_rate * 100.0),
            LendingTheme::text(),
        ),
    ])];

    lines.extend(breakdown.contributions.iter().map(|c| {
        let style = if c.adjustment > 0.0 {
            LendingTheme::danger()
        } else if c.adjustment < 0.0 {
            LendingTheme::success()
        } else {
            LendingTheme::text_muted()
        };
        Line::from(vec![
            Span::styled(format!("{:<20}", c.step), LendingTheme::text_secondary()),
            Span::styled(format!("{:>+7.1}%", c.adjustment * 100.0), style),
        ])
    }));

    lines.push(Line::from(vec![
        Span::styled(format!("{:<20}", "Total (clamped)"), LendingTheme::focused()),
        Span::styled(
            format!("{:>7.1}%", result.default_probability * 100.0),
            LendingTheme::focused(),
        ),
    ]));

    f.render_widget(Paragraph::new(lines).block(panel("Score Breakdown")), area);
}

fn render_confidence(f: &mut Frame, area: Rect, result: &ScoringResult) {
    let block = panel("Model Confidence");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(LendingTheme::border()),
        )
        .gauge_style(LendingTheme::confidence(result.model_confidence))
        .percent(u16::from(result.model_confidence))
        .label(format!("{}%", result.model_confidence));
    f.render_widget(gauge, chunks[0]);

    let note = Paragraph::new(Line::from(Span::styled(
        format!("{} risk factor(s) matched", result.matched_factors),
        LendingTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(note, chunks[1]);
}

fn render_output_footer(f: &mut Frame, area: Rect, has_result: bool) {
    let content = if has_result {
        Line::from(vec![
            Span::styled("[A] ", LendingTheme::key_hint()),
            Span::styled("Adjust Features ", LendingTheme::key_desc()),
            Span::styled("[N] ", LendingTheme::key_hint()),
            Span::styled("New Application ", LendingTheme::key_desc()),
            Span::styled("[Esc] ", LendingTheme::key_hint()),
            Span::styled("Overview", LendingTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[I] ", LendingTheme::key_hint()),
            Span::styled("Input Features ", LendingTheme::key_desc()),
            Span::styled("[Esc] ", LendingTheme::key_hint()),
            Span::styled("Overview", LendingTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(footer, area);
}
