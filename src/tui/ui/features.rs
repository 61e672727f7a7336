//! Loan application input form.
//!
//! One tab per feature category. Every catalog feature has a text buffer;
//! the buffers are the only mutable form state and are parsed into a fresh
//! [`FeatureRecord`] on submit.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    FeatureCategory, FeatureKind, FeatureRecord, FeatureSpec, ValidationError, FEATURE_CATALOG,
};
use crate::tui::styles::LendingTheme;

/// Input form state
pub struct FeatureFormState {
    /// Index into [`FeatureCategory::ALL`]
    pub tab: usize,
    /// Selected row within the current tab
    pub selected: usize,
    /// Text buffers in catalog order
    buffers: Vec<String>,
    pub error_message: Option<String>,
}

impl Default for FeatureFormState {
    fn default() -> Self {
        Self::from_record(&FeatureRecord::defaults())
    }
}

/// Text shown in a buffer for `value`, without grouping separators.
///
/// Shortest exact form, so parsing the text gives back `value`.
fn edit_text(value: f64) -> String {
    value.to_string()
}

/// Text for a value reached by stepping, snapped to the step's precision.
fn stepped_text(spec: &FeatureSpec, value: f64) -> String {
    match spec.kind {
        FeatureKind::Ratio => format!("{value:.2}"),
        FeatureKind::Count | FeatureKind::Currency | FeatureKind::Amount => {
            format!("{value:.0}")
        }
    }
}

impl FeatureFormState {
    /// Form pre-filled with the values of `record`.
    #[must_use]
    pub fn from_record(record: &FeatureRecord) -> Self {
        Self {
            tab: 0,
            selected: 0,
            buffers: record
                .iter()
                .map(|(_, value)| edit_text(value))
                .collect(),
            error_message: None,
        }
    }

    #[must_use]
    pub fn category(&self) -> FeatureCategory {
        FeatureCategory::ALL[self.tab]
    }

    /// Catalog indices of the fields on the current tab.
    fn tab_fields(&self) -> Vec<usize> {
        let category = self.category();
        FEATURE_CATALOG
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.category == category)
            .map(|(index, _)| index)
            .collect()
    }

    /// Catalog index of the selected field.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.tab_fields()[self.selected]
    }

    #[must_use]
    pub fn selected_spec(&self) -> &'static FeatureSpec {
        &FEATURE_CATALOG[self.selected_index()]
    }

    /// Current text of a field by catalog index.
    #[must_use]
    pub fn buffer(&self, index: usize) -> &str {
        &self.buffers[index]
    }

    pub fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % FeatureCategory::ALL.len();
        self.selected = 0;
    }

    pub fn prev_tab(&mut self) {
        self.tab = self
            .tab
            .checked_sub(1)
            .unwrap_or(FeatureCategory::ALL.len() - 1);
        self.selected = 0;
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.tab_fields().len();
    }

    pub fn prev_field(&mut self) {
        let count = self.tab_fields().len();
        self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' {
            let index = self.selected_index();
            self.buffers[index].push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let index = self.selected_index();
        self.buffers[index].pop();
    }

    /// Restore the current field to its declared default.
    pub fn reset_field(&mut self) {
        let index = self.selected_index();
        let spec = self.selected_spec();
        self.buffers[index].zeroize();
        self.buffers[index] = edit_text(spec.default);
        self.error_message = None;
    }

    /// Restore every field to its declared default.
    pub fn reset_all(&mut self) {
        for (buffer, spec) in self.buffers.iter_mut().zip(FEATURE_CATALOG.iter()) {
            buffer.zeroize();
            *buffer = edit_text(spec.default);
        }
        self.error_message = None;
    }

    /// Move the current field by `steps` increments, clamped to its range.
    ///
    /// Unparsable text is treated as the field's default.
    pub fn adjust(&mut self, steps: f64) {
        let index = self.selected_index();
        let spec = self.selected_spec();
        let current = FeatureRecord::parse_field(spec.name, &self.buffers[index])
            .unwrap_or(spec.default);
        let next = spec.normalize(current + steps * spec.step);
        self.buffers[index].zeroize();
        self.buffers[index] = stepped_text(spec, next);
        self.error_message = None;
    }

    /// Parse every buffer into a record.
    ///
    /// # Errors
    /// Returns the first field whose text is not a number.
    pub fn to_record(&self) -> Result<FeatureRecord, ValidationError> {
        self.buffers.iter().zip(FEATURE_CATALOG.iter()).try_fold(
            FeatureRecord::defaults(),
            |record, (text, spec)| {
                let value = FeatureRecord::parse_field(spec.name, text)?;
                record.with_value(spec.name, value)
            },
        )
    }

    /// Wipe all field buffers from memory and clear values.
    pub fn clear_sensitive(&mut self) {
        for buffer in self.buffers.iter_mut() {
            buffer.zeroize();
        }
        self.error_message = None;
        self.tab = 0;
        self.selected = 0;
    }
}

/// Render the input form
pub fn render_feature_form(f: &mut Frame, area: Rect, state: &FeatureFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Tabs
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_tabs(f, chunks[1], state);
    render_form_fields(f, chunks[2], state);
    render_form_footer(f, chunks[3], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", LendingTheme::text()),
        Span::styled("Enter Loan Application Details", LendingTheme::title()),
        Span::styled(
            " │ All 30 features feed the default probability, risk level and eligibility",
            LendingTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_tabs(f: &mut Frame, area: Rect, state: &FeatureFormState) {
    let titles: Vec<Line> = FeatureCategory::ALL
        .iter()
        .map(|category| Line::from(format!(" {} ", category.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.tab)
        .style(LendingTheme::text_secondary())
        .highlight_style(LendingTheme::selected())
        .divider(Span::styled("│", LendingTheme::text_muted()));

    f.render_widget(tabs, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FeatureFormState) {
    let fields = state.tab_fields();

    let field_height = 4;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (row, &index) in fields.iter().enumerate() {
        let spec = &FEATURE_CATALOG[index];
        let is_selected = row == state.selected;

        let (border_style, title_style) = if is_selected {
            (LendingTheme::border_focused(), LendingTheme::focused())
        } else {
            (LendingTheme::border(), LendingTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", spec.name), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let text = state.buffer(index);
        let value_display = if text.is_empty() {
            Span::styled("(empty)", LendingTheme::text_muted())
        } else {
            Span::styled(text, LendingTheme::text())
        };

        let content = Paragraph::new(vec![
            Line::from(vec![
                Span::raw(" "),
                value_display,
                if is_selected {
                    Span::styled("▌", LendingTheme::cursor())
                } else {
                    Span::raw("")
                },
                Span::styled(
                    format!(
                        "   range {} – {}, step {}",
                        spec.format_value(spec.min),
                        spec.format_value(spec.max),
                        spec.format_value(spec.step)
                    ),
                    LendingTheme::text_muted(),
                ),
            ]),
            Line::from(Span::styled(
                format!(" {}", spec.description),
                LendingTheme::text_secondary(),
            )),
        ])
        .block(block);

        f.render_widget(content, chunks[row]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FeatureFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", LendingTheme::danger()),
            Span::styled(err.clone(), LendingTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[←→] ", LendingTheme::key_hint()),
            Span::styled("Category ", LendingTheme::key_desc()),
            Span::styled("[↑↓] ", LendingTheme::key_hint()),
            Span::styled("Field ", LendingTheme::key_desc()),
            Span::styled("[+/-] ", LendingTheme::key_hint()),
            Span::styled("Adjust ", LendingTheme::key_desc()),
            Span::styled("[Del] ", LendingTheme::key_hint()),
            Span::styled("Default ", LendingTheme::key_desc()),
            Span::styled("[R] ", LendingTheme::key_hint()),
            Span::styled("Reset All ", LendingTheme::key_desc()),
            Span::styled("[Enter] ", LendingTheme::key_hint()),
            Span::styled("Generate Predictions ", LendingTheme::key_desc()),
            Span::styled("[Esc] ", LendingTheme::key_hint()),
            Span::styled("Back", LendingTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(LendingTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::{CREDIT_SCORE, DEBT_TO_INCOME, TOTAL_INCOME};

    fn select(state: &mut FeatureFormState, name: &str) {
        for tab in 0..FeatureCategory::ALL.len() {
            state.tab = tab;
            if let Some(row) = state
                .tab_fields()
                .iter()
                .position(|&index| FEATURE_CATALOG[index].name == name)
            {
                state.selected = row;
                return;
            }
        }
        panic!("Unknown feature {name}");
    }

    #[test]
    fn test_default_form_round_trips_defaults() {
        let record = FeatureFormState::default()
            .to_record()
            .expect("Should parse defaults");
        assert_eq!(record, FeatureRecord::defaults());
    }

    #[test]
    fn test_form_keeps_exact_record_values() {
        let record = FeatureRecord::defaults()
            .with_value(DEBT_TO_INCOME, 0.454)
            .and_then(|r| r.with_value(TOTAL_INCOME, 50_000.4))
            .expect("Should accept values");

        let state = FeatureFormState::from_record(&record);
        assert_eq!(state.to_record().expect("Should parse"), record);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut state = FeatureFormState::default();
        state.prev_tab();
        assert_eq!(state.category(), FeatureCategory::RiskEligibility);
        state.next_tab();
        assert_eq!(state.category(), FeatureCategory::CreditBalance);
    }

    #[test]
    fn test_field_navigation_stays_in_tab() {
        let mut state = FeatureFormState::default();
        let count = FeatureCategory::CreditBalance.features().count();
        state.prev_field();
        assert_eq!(state.selected, count - 1);
        state.next_field();
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_spec().category, FeatureCategory::CreditBalance);
    }

    #[test]
    fn test_adjust_steps_and_clamps() {
        let mut state = FeatureFormState::default();
        select(&mut state, TOTAL_INCOME);

        state.adjust(1.0);
        let record = state.to_record().expect("Should parse");
        assert!((record.total_income() - 80_000.0).abs() < f64::EPSILON);

        state.adjust(-1000.0);
        let record = state.to_record().expect("Should parse");
        assert!((record.total_income() - 20_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_typing_replaces_value() {
        let mut state = FeatureFormState::default();
        select(&mut state, CREDIT_SCORE);

        for _ in 0..3 {
            state.delete_char();
        }
        for c in "590x".chars() {
            state.input_char(c);
        }

        let record = state.to_record().expect("Should parse");
        assert!((record.credit_score() - 590.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let mut state = FeatureFormState::default();
        select(&mut state, CREDIT_SCORE);
        for _ in 0..3 {
            state.delete_char();
        }

        let err = state.to_record().expect_err("Should reject empty field");
        assert_eq!(err.field(), CREDIT_SCORE);
    }

    #[test]
    fn test_reset_field_and_reset_all() {
        let mut state = FeatureFormState::default();
        select(&mut state, CREDIT_SCORE);
        state.adjust(-50.0);
        state.reset_field();
        assert_eq!(state.buffer(state.selected_index()), "680");

        state.adjust(10.0);
        select(&mut state, TOTAL_INCOME);
        state.adjust(3.0);
        state.reset_all();
        assert_eq!(
            state.to_record().expect("Should parse"),
            FeatureRecord::defaults()
        );
    }

    #[test]
    fn test_clear_sensitive_wipes_buffers() {
        let mut state = FeatureFormState::default();
        state.next_tab();
        state.clear_sensitive();

        assert_eq!(state.tab, 0);
        assert!((0..FEATURE_CATALOG.len()).all(|i| state.buffer(i).is_empty()));
    }
}
