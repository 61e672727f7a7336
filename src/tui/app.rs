//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Scoring service integration
//!
//! The app owns the current application record and its latest result; form
//! edits produce new records and every submit re-scores from scratch.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::threshold::ThresholdModel;
use crate::application::ScoringService;
use crate::domain::{FeatureRecord, ScoringResult};

use super::ui::{
    features::{render_feature_form, FeatureFormState},
    output::render_output,
    overview::render_overview,
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    InputFeatures,
    ModelOutput,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    service: ScoringService<ThresholdModel>,

    /// Last submitted application
    record: FeatureRecord,

    /// Result for `record`, once submitted
    result: Option<ScoringResult>,

    /// Input form state
    form: FeatureFormState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application backed by the standard threshold model.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(ScoringService::new(ThresholdModel::new()))
    }

    /// Create application with an injected scoring service.
    #[must_use]
    pub fn with_service(service: ScoringService<ThresholdModel>) -> Self {
        let record = FeatureRecord::defaults();
        Self {
            screen: Screen::Overview,
            should_quit: false,
            service,
            form: FeatureFormState::from_record(&record),
            record,
            result: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn record(&self) -> &FeatureRecord {
        &self.record
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(model = self.service.model_name(), "Dashboard ready");

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        // Application data must not outlive the session.
        self.form.clear_sensitive();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Overview => render_overview(f, content_area, self.result.is_some()),
                    Screen::InputFeatures => render_feature_form(f, content_area, &self.form),
                    Screen::ModelOutput => {
                        render_output(f, content_area, &self.record, self.result.as_ref())
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows reports releases too
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Overview => self.handle_overview_key(key),
            Screen::InputFeatures => self.handle_form_key(key),
            Screen::ModelOutput => self.handle_output_key(key),
        }
    }

    fn handle_overview_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('i') | KeyCode::Char('I') | KeyCode::Enter => {
                self.screen = Screen::InputFeatures;
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.screen = Screen::ModelOutput;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Overview;
            }
            KeyCode::Left => self.form.prev_tab(),
            KeyCode::Right => self.form.next_tab(),
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form.next_field(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.form.adjust(1.0),
            KeyCode::Char('-') => self.form.adjust(-1.0),
            KeyCode::Char('r') | KeyCode::Char('R') => self.form.reset_all(),
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.reset_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_output_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Overview;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.reload_form();
                self.screen = Screen::InputFeatures;
            }
            KeyCode::Char('i') | KeyCode::Char('I') if self.result.is_none() => {
                self.screen = Screen::InputFeatures;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.new_application();
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.form.to_record() {
            Ok(record) => {
                self.result = Some(self.service.evaluate(&record));
                self.record = record;
                self.screen = Screen::ModelOutput;
            }
            Err(e) => {
                tracing::debug!(field = e.field(), "Form rejected");
                self.form.error_message = Some(e.to_string());
            }
        }
    }

    /// Rebuild the form from the submitted record, wiping the old buffers.
    fn reload_form(&mut self) {
        let (tab, selected) = (self.form.tab, self.form.selected);
        self.form.clear_sensitive();
        self.form = FeatureFormState::from_record(&self.record);
        self.form.tab = tab;
        self.form.selected = selected;
    }

    fn new_application(&mut self) {
        self.form.clear_sensitive();
        self.record = FeatureRecord::defaults();
        self.result = None;
        self.form = FeatureFormState::from_record(&self.record);
        self.screen = Screen::InputFeatures;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Eligibility, RiskLevel};

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_starts_on_overview_without_result() {
        let app = App::new();
        assert_eq!(app.screen(), Screen::Overview);
        assert!(app.result().is_none());
        assert_eq!(app.record(), &FeatureRecord::defaults());
    }

    #[test]
    fn test_submit_defaults_scores_record() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen(), Screen::InputFeatures);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::ModelOutput);

        let result = app.result().expect("Should have a result");
        assert_eq!(result.risk_level, RiskLevel::Moderate);
        assert_eq!(result.eligibility, Eligibility::Approved);
    }

    #[test]
    fn test_output_without_result_prompts_for_input() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.screen(), Screen::ModelOutput);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.screen(), Screen::InputFeatures);
    }

    #[test]
    fn test_adjust_keeps_record_and_new_resets() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        // Risk & Eligibility is the last tab
        press(&mut app, KeyCode::Left);
        while app.form.selected_spec().name != crate::domain::feature::CREDIT_SCORE {
            press(&mut app, KeyCode::Down);
        }
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "590".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!((app.record().credit_score() - 590.0).abs() < f64::EPSILON);
        assert!(app.result().is_some());

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen(), Screen::InputFeatures);
        assert!((app.record().credit_score() - 590.0).abs() < f64::EPSILON);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen(), Screen::InputFeatures);
        assert!(app.result().is_none());
        assert_eq!(app.record(), &FeatureRecord::defaults());
    }

    #[test]
    fn test_amend_and_resubmit_keeps_decision() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        while app.form.selected_spec().name != crate::domain::feature::DEBT_TO_INCOME {
            press(&mut app, KeyCode::Down);
        }
        for _ in 0..app.form.buffer(app.form.selected_index()).len() {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "0.454".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        let first_record = app.record().clone();
        let first_result = app.result().cloned().expect("Should have a result");
        assert!((first_record.debt_to_income() - 0.454).abs() < f64::EPSILON);
        assert_eq!(first_result.eligibility, Eligibility::ConditionallyApproved);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::ModelOutput);
        assert_eq!(app.record(), &first_record);
        assert_eq!(app.result(), Some(&first_result));
    }

    #[test]
    fn test_invalid_form_stays_on_form() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::InputFeatures);
        assert!(app.form.error_message.is_some());
        assert!(app.result().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = App::new();
        press(&mut app, KeyCode::Char('i'));
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }
}
