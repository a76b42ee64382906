//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive form surface: a settings panel for the
//! applicant fields, one submit action, and a result panel with the decision
//! banner and the attribution chart.
//!
//! Submissions are independent: each `p` press builds a fresh record, runs
//! the full pipeline, and renders the outcome. Pipeline errors land in the
//! status line without ending the session; `r` reloads the artifacts after
//! the underlying cause is fixed.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::artifacts::{ArtifactStore, ModelBundle};
use crate::cli::TuiArgs;
use crate::domain::{
    ApplicantRecord, Decision, Education, Gender, HomeOwnership, LoanIntent, PreviousDefault,
    AGE_BOUNDS, CREDIT_HISTORY_BOUNDS, CREDIT_SCORE_BOUNDS, EMPLOYMENT_BOUNDS, INCOME_BOUNDS,
    INTEREST_RATE_BOUNDS, LOAN_AMOUNT_BOUNDS,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::AttributionChart;

/// Most bars the result chart will show; weaker features are summarized in
/// the table-free UI by omission.
const MAX_CHART_BARS: usize = 8;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::io(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// One row of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Age,
    Income,
    EmploymentYears,
    LoanAmount,
    InterestRate,
    CreditHistory,
    CreditScore,
    PreviousDefault,
    HomeOwnership,
    LoanIntent,
    Gender,
    Education,
}

impl FormField {
    const ALL: [FormField; 12] = [
        FormField::Age,
        FormField::Income,
        FormField::EmploymentYears,
        FormField::LoanAmount,
        FormField::InterestRate,
        FormField::CreditHistory,
        FormField::CreditScore,
        FormField::PreviousDefault,
        FormField::HomeOwnership,
        FormField::LoanIntent,
        FormField::Gender,
        FormField::Education,
    ];

    fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Income => "Annual income",
            FormField::EmploymentYears => "Employment (years)",
            FormField::LoanAmount => "Loan amount",
            FormField::InterestRate => "Interest rate (%)",
            FormField::CreditHistory => "Credit history (years)",
            FormField::CreditScore => "Credit score",
            FormField::PreviousDefault => "Previous default",
            FormField::HomeOwnership => "Home ownership",
            FormField::LoanIntent => "Loan intent",
            FormField::Gender => "Gender",
            FormField::Education => "Education",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            FormField::Age
                | FormField::Income
                | FormField::EmploymentYears
                | FormField::LoanAmount
                | FormField::InterestRate
                | FormField::CreditHistory
                | FormField::CreditScore
        )
    }
}

struct App {
    store: ArtifactStore,
    bundle: Option<ModelBundle>,
    record: ApplicantRecord,
    selected_field: usize,
    /// Text buffer while a numeric field is being typed.
    edit_buffer: Option<String>,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: TuiArgs) -> Self {
        let store = crate::app::store_from_args(&args.artifact);
        let mut app = Self {
            store,
            bundle: None,
            record: ApplicantRecord::default(),
            selected_field: 0,
            edit_buffer: None,
            status: String::new(),
            run: None,
        };
        app.reload_bundle();
        app
    }

    /// Load (or re-load) the artifacts. Failure is recoverable: the session
    /// stays up and `r` retries once the cause is fixed.
    fn reload_bundle(&mut self) {
        match self.store.load() {
            Ok(bundle) => {
                self.status = format!(
                    "Model loaded: {} members, threshold {:.2}.",
                    bundle.ensemble.members.len(),
                    bundle.ensemble.threshold
                );
                self.bundle = Some(bundle);
            }
            Err(err) => {
                self.bundle = None;
                self.status = format!("{err} (press r to retry)");
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::io(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.edit_buffer.is_some() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FormField::ALL.len() - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                let field = FormField::ALL[self.selected_field];
                if field.is_numeric() {
                    self.edit_buffer = Some(String::new());
                    self.status = format!(
                        "Editing {}. Enter to apply, Esc to cancel.",
                        field.label()
                    );
                } else {
                    self.adjust_field(1);
                }
            }
            KeyCode::Char('p') => self.submit(),
            KeyCode::Char('r') => self.reload_bundle(),
            KeyCode::Char('d') => self.write_debug_bundle(),
            _ => {}
        }

        false
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.edit_buffer = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                if let Some(buffer) = self.edit_buffer.take() {
                    self.apply_edit(&buffer);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.edit_buffer {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' {
                    if let Some(buffer) = &mut self.edit_buffer {
                        buffer.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self, buffer: &str) {
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            self.status = "Edit canceled (empty input).".to_string();
            return;
        }
        let parsed: f64 = match trimmed.parse() {
            Ok(v) => v,
            Err(e) => {
                self.status = format!("Invalid number '{trimmed}': {e}");
                return;
            }
        };

        let field = FormField::ALL[self.selected_field];
        match field {
            FormField::Age => {
                self.record.age = clamp_u32(parsed, AGE_BOUNDS);
            }
            FormField::Income => {
                self.record.income = parsed.clamp(INCOME_BOUNDS.0, INCOME_BOUNDS.1);
            }
            FormField::EmploymentYears => {
                self.record.employment_years = clamp_u32(parsed, EMPLOYMENT_BOUNDS);
            }
            FormField::LoanAmount => {
                self.record.loan_amount = parsed.clamp(LOAN_AMOUNT_BOUNDS.0, LOAN_AMOUNT_BOUNDS.1);
            }
            FormField::InterestRate => {
                self.record.interest_rate =
                    round_tenth(parsed.clamp(INTEREST_RATE_BOUNDS.0, INTEREST_RATE_BOUNDS.1));
            }
            FormField::CreditHistory => {
                self.record.credit_history_years = clamp_u32(parsed, CREDIT_HISTORY_BOUNDS);
            }
            FormField::CreditScore => {
                self.record.credit_score = clamp_u32(parsed, CREDIT_SCORE_BOUNDS);
            }
            _ => {}
        }
        self.status = format!("{}: {}", field.label(), self.field_value(field));
    }

    fn adjust_field(&mut self, delta: i64) {
        let field = FormField::ALL[self.selected_field];
        match field {
            FormField::Age => {
                self.record.age = step_u32(self.record.age, delta, 1, AGE_BOUNDS);
            }
            FormField::Income => {
                self.record.income =
                    step_f64(self.record.income, delta, 1_000.0, INCOME_BOUNDS);
            }
            FormField::EmploymentYears => {
                self.record.employment_years =
                    step_u32(self.record.employment_years, delta, 1, EMPLOYMENT_BOUNDS);
            }
            FormField::LoanAmount => {
                self.record.loan_amount =
                    step_f64(self.record.loan_amount, delta, 500.0, LOAN_AMOUNT_BOUNDS);
            }
            FormField::InterestRate => {
                self.record.interest_rate = round_tenth(step_f64(
                    self.record.interest_rate,
                    delta,
                    0.1,
                    INTEREST_RATE_BOUNDS,
                ));
            }
            FormField::CreditHistory => {
                self.record.credit_history_years = step_u32(
                    self.record.credit_history_years,
                    delta,
                    1,
                    CREDIT_HISTORY_BOUNDS,
                );
            }
            FormField::CreditScore => {
                self.record.credit_score =
                    step_u32(self.record.credit_score, delta, 10, CREDIT_SCORE_BOUNDS);
            }
            FormField::PreviousDefault => {
                self.record.previous_default =
                    cycle(&PreviousDefault::ALL, self.record.previous_default, delta);
            }
            FormField::HomeOwnership => {
                self.record.home_ownership =
                    cycle(&HomeOwnership::ALL, self.record.home_ownership, delta);
            }
            FormField::LoanIntent => {
                self.record.loan_intent = cycle(&LoanIntent::ALL, self.record.loan_intent, delta);
            }
            FormField::Gender => {
                self.record.gender = cycle(&Gender::ALL, self.record.gender, delta);
            }
            FormField::Education => {
                self.record.education = cycle(&Education::ALL, self.record.education, delta);
            }
        }
        self.status = format!("{}: {}", field.label(), self.field_value(field));
    }

    /// Run the full pipeline for the current form state.
    fn submit(&mut self) {
        let Some(bundle) = &self.bundle else {
            self.status = "Model bundle not loaded (press r to retry).".to_string();
            return;
        };

        match crate::app::pipeline::run_predict(bundle, &self.record) {
            Ok(run) => {
                self.status = format!(
                    "{} with probability {:.2}",
                    run.prediction.decision.display_name(),
                    run.prediction.probability
                );
                self.run = Some(run);
            }
            Err(err) => {
                // Recoverable per submission: fix the input (or artifacts)
                // and press p again.
                self.status = err.to_string();
            }
        }
    }

    fn write_debug_bundle(&mut self) {
        let (Some(bundle), Some(run)) = (&self.bundle, &self.run) else {
            self.status = "Nothing to dump yet (press p first).".to_string();
            return;
        };
        match crate::debug::write_debug_bundle(bundle, &self.record, run) {
            Ok(path) => {
                self.status = format!("Wrote debug bundle: {}", path.display());
            }
            Err(err) => {
                self.status = format!("Debug write failed: {err}");
            }
        }
    }

    fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Age => self.record.age.to_string(),
            FormField::Income => format!("{:.0}", self.record.income),
            FormField::EmploymentYears => self.record.employment_years.to_string(),
            FormField::LoanAmount => format!("{:.0}", self.record.loan_amount),
            FormField::InterestRate => format!("{:.1}", self.record.interest_rate),
            FormField::CreditHistory => self.record.credit_history_years.to_string(),
            FormField::CreditScore => self.record.credit_score.to_string(),
            FormField::PreviousDefault => self.record.previous_default.label().to_string(),
            FormField::HomeOwnership => self.record.home_ownership.label().to_string(),
            FormField::LoanIntent => self.record.loan_intent.label().to_string(),
            FormField::Gender => self.record.gender.label().to_string(),
            FormField::Education => self.record.education.label().to_string(),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("uw", Style::default().fg(Color::Cyan)),
            Span::raw(" — loan approval screen"),
        ]));

        let model = match &self.bundle {
            Some(bundle) => {
                let names: Vec<&str> = bundle
                    .ensemble
                    .members
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect();
                format!(
                    "model: {} | threshold: {:.2} | artifacts: {}",
                    names.join("+"),
                    bundle.ensemble.threshold,
                    self.store.path().display()
                )
            }
            None => format!("model: (not loaded) | artifacts: {}", self.store.path().display()),
        };
        lines.push(Line::from(Span::styled(
            model,
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(FormField::ALL.len());
        for (idx, field) in FormField::ALL.iter().enumerate() {
            let value = match (&self.edit_buffer, idx == self.selected_field) {
                (Some(buffer), true) => format!("{buffer}_"),
                _ => self.field_value(*field),
            };
            items.push(ListItem::new(format!("{:<22} {}", field.label(), value)));
        }

        let list = List::new(items)
            .block(Block::default().title("Applicant").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.edit_buffer.is_some() {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        self.draw_banner(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_banner(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Decision").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No prediction yet. Press p to screen the applicant.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let prediction = &run.prediction;
        let (color, mark) = match prediction.decision {
            Decision::Approved => (Color::Green, "✔"),
            Decision::Denied => (Color::Red, "✘"),
        };

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!(
                "{mark} {} with probability {:.2}",
                prediction.decision.display_name(),
                prediction.probability
            ),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        let members: Vec<String> = prediction
            .members
            .iter()
            .map(|m| format!("{}={:.2}", m.name, m.probability))
            .collect();
        lines.push(Line::from(Span::styled(
            format!(
                "threshold {:.2} | {}",
                prediction.threshold,
                members.join("  ")
            ),
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Feature contributions")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            return;
        };
        let Some(attribution) = &run.attribution else {
            let msg = Paragraph::new("No attribution available for this model.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        // Strongest bars, rendered bottom-up so the strongest lands on top.
        let mut rows: Vec<(&str, f64)> = attribution
            .contributions
            .iter()
            .filter(|c| c.contribution != 0.0)
            .map(|c| (c.feature.as_str(), c.contribution))
            .collect();
        rows.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(MAX_CHART_BARS);
        rows.reverse();

        if rows.is_empty() {
            let msg = Paragraph::new("No feature moved the prediction.")
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(msg, inner);
            return;
        }

        let peak = rows.iter().map(|(_, c)| c.abs()).fold(0.0f64, f64::max);
        let bound = (peak * 1.1).max(1e-6);
        let bars: Vec<f64> = rows.iter().map(|(_, c)| *c).collect();

        let (gutter, chart_rect) = chart_layout(inner);
        let widget = AttributionChart {
            bars: &bars,
            x_bounds: [-bound, bound],
        };
        frame.render_widget(widget, chart_rect);

        if let Some(gutter) = gutter {
            draw_bar_labels(frame, gutter, chart_rect, &rows);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  p predict  r reload  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn clamp_u32(value: f64, bounds: (u32, u32)) -> u32 {
    (value.round() as i64)
        .clamp(i64::from(bounds.0), i64::from(bounds.1)) as u32
}

fn step_u32(current: u32, delta: i64, step: u32, bounds: (u32, u32)) -> u32 {
    let next = i64::from(current) + delta * i64::from(step);
    next.clamp(i64::from(bounds.0), i64::from(bounds.1)) as u32
}

fn step_f64(current: f64, delta: i64, step: f64, bounds: (f64, f64)) -> f64 {
    (current + delta as f64 * step).clamp(bounds.0, bounds.1)
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Cycle a categorical value through its option list.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i64) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as i64;
    let n = all.len() as i64;
    let next = (idx + delta).rem_euclid(n);
    all[next as usize]
}

/// Reserve a left gutter for feature-name labels next to the chart.
fn chart_layout(inner: Rect) -> (Option<Rect>, Rect) {
    const GUTTER: u16 = 26;
    if inner.width <= GUTTER + 20 {
        return (None, inner);
    }
    let gutter = Rect {
        x: inner.x,
        y: inner.y,
        width: GUTTER,
        height: inner.height,
    };
    let chart = Rect {
        x: inner.x + GUTTER,
        y: inner.y,
        width: inner.width - GUTTER,
        height: inner.height,
    };
    (Some(gutter), chart)
}

/// Place one label per bar, vertically aligned with the Plotters rows.
fn draw_bar_labels(
    frame: &mut ratatui::Frame<'_>,
    gutter: Rect,
    chart: Rect,
    rows: &[(&str, f64)],
) {
    // The plot area excludes the bottom x-label band and the 1-cell margin.
    let plot_top = chart.y + 1;
    let plot_height = chart.height.saturating_sub(5);
    if plot_height == 0 {
        return;
    }

    let n = rows.len() as f64;
    let style = Style::default().fg(Color::Gray);
    for (idx, (name, _)) in rows.iter().enumerate() {
        // Bar idx is centered at (idx + 0.5) / n of the plot, measured upward.
        let frac = 1.0 - (idx as f64 + 0.5) / n;
        let y = plot_top + ((plot_height.saturating_sub(1)) as f64 * frac).round() as u16;
        let label = truncate_label(name, gutter.width.saturating_sub(1) as usize);
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: gutter.x,
                y,
                width: gutter.width,
                height: 1,
            },
        );
    }
}

fn truncate_label(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_directions() {
        assert_eq!(
            cycle(&HomeOwnership::ALL, HomeOwnership::Other, 1),
            HomeOwnership::Rent
        );
        assert_eq!(
            cycle(&HomeOwnership::ALL, HomeOwnership::Rent, -1),
            HomeOwnership::Other
        );
        assert_eq!(
            cycle(&PreviousDefault::ALL, PreviousDefault::No, 1),
            PreviousDefault::Yes
        );
    }

    #[test]
    fn numeric_steps_clamp_to_bounds() {
        assert_eq!(step_u32(850, 1, 10, CREDIT_SCORE_BOUNDS), 850);
        assert_eq!(step_u32(305, -1, 10, CREDIT_SCORE_BOUNDS), 300);
        assert_eq!(step_f64(500.0, -1, 500.0, LOAN_AMOUNT_BOUNDS), 500.0);
        let rate = step_f64(39.95, 1, 0.1, INTEREST_RATE_BOUNDS);
        assert!(rate <= INTEREST_RATE_BOUNDS.1);
    }

    #[test]
    fn edit_clamp_keeps_values_in_declared_bounds() {
        assert_eq!(clamp_u32(901.0, CREDIT_SCORE_BOUNDS), 850);
        assert_eq!(clamp_u32(12.0, AGE_BOUNDS), 18);
    }
}
