//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, handles
//! key input, renders the timeline and its screens (detail, notes editor,
//! settings, confirm dialog, help) and drives the event loop.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::debug;
use uuid::Uuid;

use crate::cmd::parse_birthdate;
use crate::fields::*;
use crate::i18n::{label, Label};
use crate::kv::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;
use crate::timeline::{band_for_age, band_span, segment, Segment, AGE_BANDS};
use crate::tui::{
    colors::{category_color, BACKGROUND_GRAY, DARK_RED, HEADER_PURPLE},
    enums::{AppState, InputMode},
    input::{InputField, TextArea},
    utils::centered_rect,
};

/// Width of the title column in the timeline table.
const TITLE_WIDTH: u16 = 36;
/// Width taken by the `>> ` highlight symbol.
const HIGHLIGHT_WIDTH: u16 = 3;

/// Main application state for the terminal user interface.
pub struct App<S: KeyValueStore> {
    state: AppState,
    store: TaskStore<S>,
    /// Index into [`App::display_order`].
    selected: usize,
    table_state: TableState,
    notes: TextArea,
    birthday: InputField,
    input_mode: InputMode,
    help_return: AppState,
    status_message: String,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        App {
            state: AppState::Timeline,
            store,
            selected: 0,
            table_state: TableState::default(),
            notes: TextArea::default(),
            birthday: InputField::new(),
            input_mode: InputMode::None,
            help_return: AppState::Timeline,
            status_message: String::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn lang(&self) -> Language {
        self.store.language()
    }

    /// Task ids in on-screen order: grouped by category, catalog order within.
    fn display_order(&self) -> Vec<Uuid> {
        Category::ALL
            .iter()
            .flat_map(|c| self.store.tasks_in(*c).map(|t| t.id))
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = *self.display_order().get(self.selected)?;
        self.store.task(id)
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_task().map(|t| t.id)
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        let len = self.store.tasks().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn open_help(&mut self) {
        self.help_return = self.state;
        self.state = AppState::Help;
    }

    /// Apply one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status_message.clear();

        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            if self.state == AppState::Notes {
                self.save_notes();
            }
            return true;
        }

        match self.state {
            AppState::Timeline => self.handle_timeline_input(key),
            AppState::Detail => self.handle_detail_input(key),
            AppState::Notes => self.handle_notes_input(key, modifiers),
            AppState::Settings => self.handle_settings_input(key),
            AppState::Confirm => self.handle_confirm_input(key),
            AppState::Help => self.handle_help_input(key),
        }
    }

    fn handle_timeline_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.store.tasks().len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.selected_task().is_some() {
                    self.state = AppState::Detail;
                }
            }
            KeyCode::Char('s') => self.state = AppState::Settings,
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.open_help(),
            _ => {}
        }
        false
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> bool {
        let Some(task) = self.selected_task() else {
            self.state = AppState::Timeline;
            return false;
        };
        let (id, status, notes) = (task.id, task.status, task.notes.clone());

        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.state = AppState::Timeline,
            KeyCode::Left => self.change_status(id, status.prev()),
            KeyCode::Right | KeyCode::Char(' ') => self.change_status(id, status.next()),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('w') => {
                if let Err(e) = self.store.set_work_in_progress(id, None) {
                    self.set_status_message(e.to_string());
                }
            }
            KeyCode::Char('n') => {
                self.notes = TextArea::from_text(&notes);
                self.state = AppState::Notes;
            }
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.open_help(),
            _ => {}
        }
        false
    }

    fn change_status(&mut self, id: Uuid, status: Status) {
        match self.store.update_status(id, status) {
            Ok(()) => self.set_status_message(format!(
                "{}: {}",
                label(Label::Status, self.lang()),
                status.name(self.lang())
            )),
            Err(e) => self.set_status_message(e.to_string()),
        }
    }

    /// Handle keys in the fullscreen notes editor. Esc saves and returns.
    fn handle_notes_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Esc => {
                self.save_notes();
                self.state = AppState::Detail;
            }
            KeyCode::Char(c) => self.notes.insert_char(c),
            KeyCode::Enter => self.notes.newline(),
            KeyCode::Backspace | KeyCode::Delete if modifiers.contains(KeyModifiers::CONTROL) => {
                self.notes.clear()
            }
            KeyCode::Backspace => self.notes.backspace(),
            KeyCode::Delete => self.notes.delete(),
            KeyCode::Left => self.notes.move_left(),
            KeyCode::Right => self.notes.move_right(),
            KeyCode::Up => self.notes.move_up(),
            KeyCode::Down => self.notes.move_down(),
            KeyCode::Home => self.notes.home(),
            KeyCode::End => self.notes.end(),
            _ => {}
        }
        false
    }

    fn save_notes(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.store.update_notes(id, self.notes.text()) {
            self.set_status_message(e.to_string());
        }
    }

    fn handle_settings_input(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Text {
            match key {
                KeyCode::Esc => self.close_birthday_input(),
                KeyCode::Enter => self.submit_birthday(),
                KeyCode::Char(c) => self.birthday.handle_char(c),
                KeyCode::Backspace => self.birthday.handle_backspace(),
                KeyCode::Delete => self.birthday.handle_delete(),
                KeyCode::Left => self.birthday.move_cursor_left(),
                KeyCode::Right => self.birthday.move_cursor_right(),
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => self.state = AppState::Timeline,
            KeyCode::Char('b') => {
                self.birthday = InputField::with_value(&self.store.birthdate().to_string());
                self.birthday.active = true;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('l') => {
                let next = self.lang().next();
                self.store.set_language(next);
                self.set_status_message(format!("{}: {}", label(Label::Language, next), next.native_name()));
            }
            KeyCode::Char('r') => self.state = AppState::Confirm,
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.open_help(),
            _ => {}
        }
        false
    }

    fn close_birthday_input(&mut self) {
        self.birthday.active = false;
        self.input_mode = InputMode::None;
    }

    /// Save the typed birthday. A bad or future date keeps the field open.
    fn submit_birthday(&mut self) {
        let saved = parse_birthdate(&self.birthday.value)
            .map(|date| self.store.set_birthdate(date).is_ok())
            .unwrap_or(false);
        let lang = self.lang();
        if saved {
            self.close_birthday_input();
            self.set_status_message(format!(
                "{}: {} ({} {})",
                label(Label::Birthday, lang),
                self.store.birthdate(),
                self.store.current_age(),
                label(Label::YearsOld, lang)
            ));
        } else {
            debug!(input = %self.birthday.value, "rejected birthday");
            self.set_status_message(label(Label::InvalidBirthday, lang));
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.store.reset_to_default();
                self.state = AppState::Settings;
                self.set_status_message(label(Label::TasksReset, self.lang()));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::Settings;
            }
            _ => {}
        }
        false
    }

    fn handle_help_input(&mut self, key: KeyCode) -> bool {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')
        ) {
            self.state = self.help_return;
        }
        false
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    /// Render the age-band timeline with one bar per task.
    fn render_timeline(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let age = self.store.current_age();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header_text = Line::from(vec![
            Span::styled(label(Label::AppTitle, lang), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{}: {} {}",
                    label(Label::CurrentAge, lang),
                    age,
                    label(Label::YearsOld, lang)
                ),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]);
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let bands_width = chunks[1].width.saturating_sub(2 + HIGHLIGHT_WIDTH + TITLE_WIDTH);
        let band_width = (bands_width / AGE_BANDS.len() as u16).max(1);
        let current_band = band_for_age(age);

        let mut header_cells = vec![Cell::from("")];
        header_cells.extend(AGE_BANDS.iter().enumerate().map(|(i, band)| {
            if i == current_band {
                Cell::from(format!("▼ {}", band.header(lang)))
                    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            } else {
                Cell::from(band.header(lang))
            }
        }));
        let header = Row::new(header_cells)
            .style(Style::default().bg(HEADER_PURPLE).fg(Color::White))
            .height(1);

        let selected_id = self.selected_id();
        let mut selected_row = None;
        let mut rows: Vec<Row> = Vec::new();
        for category in Category::ALL {
            let color = category_color(category);
            let progress = self.store.progress(category);
            rows.push(Row::new(vec![Cell::from(format!(
                "{} ({}/{})",
                category.name(lang),
                progress.completed,
                progress.total()
            ))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))]));

            for task in self.store.tasks_in(category) {
                if Some(task.id) == selected_id {
                    selected_row = Some(rows.len());
                }
                rows.push(task_row(task, age, band_width as usize));
            }
        }
        self.table_state.select(selected_row);

        let mut widths = vec![Constraint::Length(TITLE_WIDTH)];
        widths.extend(AGE_BANDS.iter().map(|_| Constraint::Length(band_width)));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(0)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(BACKGROUND_GRAY)),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.table_state);
    }

    /// Render every field of the selected task.
    fn render_detail(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let Some(task) = self.selected_task() else {
            return;
        };
        let color = category_color(task.category);
        let (first_band, last_band) = band_span(task);
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let field = |l: Label| Span::styled(format!("{}: ", label(l, lang)), bold);

        let mut text = vec![
            Line::from(Span::styled(task.title.clone(), bold.fg(color))),
            Line::from(Span::styled(task.category.name(lang), Style::default().fg(color))),
            Line::from(""),
            Line::from(vec![
                field(Label::AgeRange),
                Span::raw(format!(
                    "{}  ({} → {})",
                    task.age_range(),
                    AGE_BANDS[first_band].header(lang),
                    AGE_BANDS[last_band].header(lang)
                )),
            ]),
            Line::from(vec![
                field(Label::Status),
                Span::raw(format!("◀ {} {} ▶", status_glyph(task.status), task.status.name(lang))),
            ]),
            Line::from(vec![
                field(Label::WorkInProgress),
                Span::raw(label(if task.is_work_in_progress { Label::Yes } else { Label::No }, lang)),
            ]),
            Line::from(""),
            Line::from(task.description.clone()),
            Line::from(""),
            Line::from(field(Label::Notes)),
        ];
        if task.notes.is_empty() {
            text.push(Line::from(Span::styled("-", Style::default().fg(Color::DarkGray))));
        } else {
            text.extend(task.notes.lines().map(|l| Line::from(l.to_string())));
        }

        let paragraph = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(label(Label::TaskDetails, lang)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the fullscreen notes editor.
    fn render_notes(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let title = self
            .selected_task()
            .map(|t| format!("{} - {}", label(Label::Notes, lang), t.title))
            .unwrap_or_else(|| label(Label::Notes, lang).to_string());

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White).bg(Color::Blue));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let visible_height = inner.height as usize;
        if visible_height == 0 {
            return;
        }
        let scroll = (self.notes.row + 1).saturating_sub(visible_height);
        let visible_lines: Vec<Line> = self
            .notes
            .lines()
            .iter()
            .skip(scroll)
            .take(visible_height)
            .map(|l| Line::from(l.as_str()))
            .collect();
        f.render_widget(Paragraph::new(visible_lines), inner);

        let x = (self.notes.col as u16).min(inner.width.saturating_sub(1));
        let y = (self.notes.row - scroll) as u16;
        f.set_cursor_position((inner.x + x, inner.y + y));
    }

    /// Render birthday, language and reset controls.
    fn render_settings(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let editing = self.input_mode == InputMode::Text;

        let birthday_value = if editing {
            Span::styled(self.birthday.value.clone(), Style::default().fg(Color::Black).bg(Color::Gray))
        } else {
            Span::raw(self.store.birthdate().to_string())
        };
        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[b] {}: ", label(Label::ChildBirthDate, lang)), bold),
                birthday_value,
            ]),
        ];
        if editing {
            text.push(Line::from(Span::styled(
                format!("    {}", label(Label::BirthdayFormatHint, lang)),
                Style::default().fg(Color::DarkGray),
            )));
        }
        text.extend([
            Line::from(format!(
                "    {}: {} {}",
                label(Label::CurrentAge, lang),
                self.store.current_age(),
                label(Label::YearsOld, lang)
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[l] {}: ", label(Label::Language, lang)), bold),
                Span::raw(lang.native_name()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("[r] {}", label(Label::ResetToDefault, lang)),
                bold.fg(Color::LightRed),
            )),
        ]);

        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(label(Label::Settings, lang)));
        f.render_widget(paragraph, area);

        if editing {
            // Border, "[b] " and the label with its ": ".
            let prefix = 4 + label(Label::ChildBirthDate, lang).chars().count() as u16 + 2;
            f.set_cursor_position((
                area.x + 1 + prefix + self.birthday.cursor as u16,
                area.y + 2,
            ));
        }
    }

    /// Render the reset confirmation dialog.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let block = Block::default()
            .title(label(Label::ResetTasks, lang))
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(60, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                label(Label::ResetConfirmation, lang),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("[y] {}", label(Label::Reset, lang)),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::raw(format!("[n] {}", label(Label::Cancel, lang))),
            ]),
            Line::from(""),
            Line::from(label(Label::ConfirmHint, lang)),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the key bindings for every screen.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let heading = |s: &'static str| {
            Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)))
        };
        let help_text = vec![
            heading(label(Label::AppTitle, lang)),
            Line::from(""),
            Line::from(format!("  {}", label(Label::TimelineHint, lang))),
            Line::from(""),
            heading(label(Label::TaskDetails, lang)),
            Line::from(format!("  {}", label(Label::DetailHint, lang))),
            Line::from(""),
            heading(label(Label::Notes, lang)),
            Line::from(format!("  {}", label(Label::NotesHint, lang))),
            Line::from(format!("  Ctrl+Backspace  {}", label(Label::ClearNotes, lang))),
            Line::from(""),
            heading(label(Label::Settings, lang)),
            Line::from(format!("  {}", label(Label::SettingsHint, lang))),
            Line::from(format!("  {}", label(Label::BirthdayFormatHint, lang))),
            Line::from(""),
            Line::from(format!("  Ctrl+C  {}", label(Label::Quit, lang))),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title(label(Label::Help, lang)))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let lang = self.lang();
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let hint = match self.state {
                AppState::Timeline => Label::TimelineHint,
                AppState::Detail => Label::DetailHint,
                AppState::Notes => Label::NotesHint,
                AppState::Settings if self.input_mode == InputMode::Text => Label::BirthdayFormatHint,
                AppState::Settings => Label::SettingsHint,
                AppState::Confirm => Label::ConfirmHint,
                AppState::Help => Label::Done,
            };
            label(hint, lang).to_string()
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(HEADER_PURPLE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view for the current state.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::Timeline => self.render_timeline(f, chunks[0]),
            AppState::Detail => self.render_detail(f, chunks[0]),
            AppState::Notes => self.render_notes(f, chunks[0]),
            AppState::Settings => self.render_settings(f, chunks[0]),
            AppState::Confirm => {
                self.render_settings(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
            AppState::Help => self.render_help(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop. Runs until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// One timeline row: title plus a bar cell per age band.
fn task_row(task: &Task, age: u32, band_width: usize) -> Row<'static> {
    let color = category_color(task.category);
    let mut title_style = Style::default().fg(Color::White);
    if task.is_applicable_at(age) {
        title_style = title_style.add_modifier(Modifier::BOLD);
    } else if task.is_past_at(age) && task.status != Status::Completed {
        title_style = title_style.fg(Color::Yellow);
    }
    let mut bar_style = Style::default().fg(color).bg(BACKGROUND_GRAY);
    if task.status == Status::Completed {
        title_style = title_style.fg(Color::DarkGray);
        bar_style = bar_style.add_modifier(Modifier::DIM);
    }

    let marker = if task.is_work_in_progress { "★" } else { " " };
    let mut cells = vec![
        Cell::from(format!("{} {} {}", marker, status_glyph(task.status), task.title)).style(title_style),
    ];
    cells.extend(
        AGE_BANDS
            .iter()
            .map(|band| Cell::from(bar_text(segment(band, task), band_width)).style(bar_style)),
    );
    Row::new(cells)
}

fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::NotStarted => "○",
        Status::InProgress => "◐",
        Status::Completed => "●",
    }
}

/// Text for one bar cell `width` columns wide.
///
/// Tapered ends use half blocks so an in-progress bar visibly narrows where
/// its age window starts and stops.
pub fn bar_text(segment: Segment, width: usize) -> String {
    match segment {
        Segment::Empty => " ".repeat(width),
        Segment::Plain => "█".repeat(width),
        Segment::Tapered { left, right } => {
            let mut cells = vec!['█'; width];
            if let Some(first) = cells.first_mut().filter(|_| left) {
                *first = '▐';
            }
            if let Some(last) = cells.last_mut().filter(|_| right) {
                *last = '▌';
            }
            cells.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskKey;
    use crate::kv::MemoryStore;
    use crate::store::today;
    use chrono::Months;
    use ratatui::backend::TestBackend;

    fn app() -> App<MemoryStore> {
        App::new(TaskStore::initialize(MemoryStore::new(), Language::English))
    }

    fn press(app: &mut App<MemoryStore>, keys: &[KeyCode]) {
        for k in keys {
            assert!(!app.handle_key(*k, KeyModifiers::NONE));
        }
    }

    fn type_text(app: &mut App<MemoryStore>, s: &str) {
        for c in s.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn screen(app: &mut App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_timeline_navigation_and_quit() {
        let mut app = app();
        let first = app.selected_task().unwrap().key;
        assert_eq!(first, TaskKey::IepParticipation);
        press(&mut app, &[KeyCode::Up, KeyCode::Down, KeyCode::Char('j')]);
        assert_eq!(app.selected, 2);
        press(&mut app, &[KeyCode::End, KeyCode::Down]);
        assert_eq!(app.selected, app.store().tasks().len() - 1);
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
    }

    #[test]
    fn test_detail_status_and_wip() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.state(), AppState::Detail);
        let id = app.selected_task().unwrap().id;

        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.store().task(id).unwrap().status, Status::InProgress);
        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.store().task(id).unwrap().status, Status::NotStarted);
        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.store().task(id).unwrap().status, Status::Completed);

        press(&mut app, &[KeyCode::Char('w')]);
        assert!(app.store().task(id).unwrap().is_work_in_progress);
        press(&mut app, &[KeyCode::Char('w')]);
        assert!(!app.store().task(id).unwrap().is_work_in_progress);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.state(), AppState::Timeline);
    }

    #[test]
    fn test_notes_editor_saves_on_escape() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('n')]);
        assert_eq!(app.state(), AppState::Notes);
        type_text(&mut app, "Gọi trung tâm");
        press(&mut app, &[KeyCode::Enter]);
        // 'q' and 'w' are text here, not commands.
        type_text(&mut app, "qw");
        press(&mut app, &[KeyCode::Backspace, KeyCode::Esc]);
        assert_eq!(app.state(), AppState::Detail);
        assert_eq!(app.selected_task().unwrap().notes, "Gọi trung tâm\nq");

        press(&mut app, &[KeyCode::Char('n')]);
        app.handle_key(KeyCode::Backspace, KeyModifiers::CONTROL);
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.selected_task().unwrap().notes, "");
    }

    #[test]
    fn test_ctrl_c_in_notes_saves_then_quits() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('n')]);
        type_text(&mut app, "draft");
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.selected_task().unwrap().notes, "draft");
    }

    #[test]
    fn test_settings_birthday_entry() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('s'), KeyCode::Char('b')]);
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        let fourteen = today().checked_sub_months(Months::new(14 * 12)).unwrap();
        type_text(&mut app, &fourteen.to_string());
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.store().birthdate(), fourteen);
        assert_eq!(app.store().current_age(), 14);
        assert_eq!(app.input_mode, InputMode::None);

        press(&mut app, &[KeyCode::Char('b')]);
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        type_text(&mut app, "2999-01-01");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.status_message(), "Invalid birthday");
        assert_eq!(app.store().birthdate(), fourteen);
        assert_eq!(app.input_mode, InputMode::Text);
        press(&mut app, &[KeyCode::Esc, KeyCode::Esc]);
        assert_eq!(app.state(), AppState::Timeline);
    }

    #[test]
    fn test_settings_language_and_reset() {
        let mut app = app();
        let id = app.selected_task().unwrap().id;
        press(&mut app, &[KeyCode::Enter, KeyCode::Right, KeyCode::Esc]);

        press(&mut app, &[KeyCode::Char('s'), KeyCode::Char('l')]);
        assert_eq!(app.store().language(), Language::Spanish);
        assert_eq!(app.selected_task().unwrap().title, "Participación en el IEP");

        press(&mut app, &[KeyCode::Char('r'), KeyCode::Char('n')]);
        assert_eq!(app.state(), AppState::Settings);
        assert_eq!(app.store().task(id).unwrap().status, Status::InProgress);

        press(&mut app, &[KeyCode::Char('r'), KeyCode::Char('y')]);
        assert_eq!(app.state(), AppState::Settings);
        assert!(app.store().tasks().iter().all(|t| t.status == Status::NotStarted));
        assert_eq!(app.status_message(), "Tareas restablecidas");
    }

    #[test]
    fn test_help_returns_to_previous_screen() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('h')]);
        assert_eq!(app.state(), AppState::Help);
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.state(), AppState::Detail);
    }

    #[test]
    fn test_confirm_and_help_pair_keys_with_text() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('s'), KeyCode::Char('l'), KeyCode::Char('r')]);
        let s = screen(&mut app);
        assert!(s.contains("[y] Restablecer"));
        assert!(s.contains("[n] Cancelar"));

        press(&mut app, &[KeyCode::Esc, KeyCode::Char('h')]);
        let s = screen(&mut app);
        assert!(s.contains("Ctrl+Backspace  borrar notas"));
        assert!(s.contains("Ctrl+C  salir"));
    }

    #[test]
    fn test_render_every_screen() {
        let mut app = app();
        let s = screen(&mut app);
        assert!(s.contains("PHP Planner"));
        assert!(s.contains("Current Age: 12 years old"));
        assert!(s.contains("IEP Participation"));

        press(&mut app, &[KeyCode::Enter]);
        assert!(screen(&mut app).contains("Task Details"));
        press(&mut app, &[KeyCode::Char('n')]);
        screen(&mut app);
        press(&mut app, &[KeyCode::Esc, KeyCode::Esc, KeyCode::Char('s')]);
        assert!(screen(&mut app).contains("Settings"));
        press(&mut app, &[KeyCode::Char('r')]);
        assert!(screen(&mut app).contains("Reset Tasks"));
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('h')]);
        assert!(screen(&mut app).contains("Help"));
    }

    #[test]
    fn test_bar_text_tapers_in_progress_ends() {
        assert_eq!(bar_text(Segment::Empty, 3), "   ");
        assert_eq!(bar_text(Segment::Plain, 3), "███");
        assert_eq!(bar_text(Segment::Tapered { left: true, right: false }, 4), "▐███");
        assert_eq!(bar_text(Segment::Tapered { left: false, right: true }, 4), "███▌");
        assert_eq!(bar_text(Segment::Tapered { left: true, right: true }, 4), "▐██▌");
        assert_eq!(bar_text(Segment::Tapered { left: true, right: true }, 0), "");
    }
}
