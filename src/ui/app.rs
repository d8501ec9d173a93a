use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Record;
use crate::publish::{PublishOutcome, Publisher};
use crate::store::{RecordId, RecordStore};

use super::forms::{ConfirmRecordDelete, RecordField, RecordForm};
use super::helpers::{centered_rect, surface_error, value_or_dash};
use super::screens::RecordListScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width share of the record list pane; the rest holds the detail pane.
const LIST_PANE_PERCENT: u16 = 40;

/// Fine-grained modes layered over the list screen. Keeping this explicit
/// makes it easy to reason about which rendering path runs and what the
/// keyboard shortcuts should do.
enum Mode {
    Normal,
    AddingRecord(RecordForm),
    EditingRecord { id: RecordId, form: RecordForm },
    ConfirmDelete(ConfirmRecordDelete),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: RecordStore,
    publisher: Publisher,
    screen: RecordListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: RecordStore, publisher: Publisher) -> Self {
        let screen = RecordListScreen::new(store.snapshot());
        Self {
            store,
            publisher,
            screen,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingRecord(form) => self.handle_add_record(code, form),
            Mode::EditingRecord { id, form } => self.handle_edit_record(code, id, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Searching(state) => self.handle_search(code, state),
        };

        Ok(exit)
    }

    /// Ctrl+P publishes from any mode without disturbing an open form.
    pub(crate) fn handle_ctrl_p(&mut self) -> Result<()> {
        self.publish_now();
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-5),
            KeyCode::PageDown => self.screen.move_selection(5),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    query: String::new(),
                }));
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Ok(Mode::AddingRecord(RecordForm::default()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some((id, record)) = self.current_record() {
                    self.clear_status();
                    return Ok(Mode::EditingRecord {
                        id,
                        form: RecordForm::from_record(&record),
                    });
                }
                self.set_status("No record selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                if let Some((id, record)) = self.current_record() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmRecordDelete::from(id, &record)));
                }
                self.set_status("No record selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('c') => {
                self.screen.clear_selection();
                self.clear_status();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.publish_now();
            }
            KeyCode::Enter => {
                if let Some((_, record)) = self.current_record() {
                    let link = record.open_chat_url.trim().to_string();
                    let title = record.display_line();
                    if link.is_empty() {
                        self.set_status(
                            "This record does not have an open chat link.",
                            StatusKind::Error,
                        );
                    } else if let Err(err) = open_link(&link) {
                        self.set_status(
                            format!("Failed to open link: {err}"),
                            StatusKind::Error,
                        );
                    } else {
                        self.set_status(format!("Opened chat for {title}."), StatusKind::Info);
                    }
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_record(&mut self, code: KeyCode, mut form: RecordForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(record) => {
                    let title = record.display_line();
                    match self.store.add(record) {
                        Ok(_) => {
                            self.refresh_records();
                            self.set_status(format!("Added {title}."), StatusKind::Info);
                            return Mode::Normal;
                        }
                        Err(err) => {
                            let message = surface_error(&err.into());
                            form.error = Some(message.clone());
                            self.set_status(message, StatusKind::Error);
                        }
                    }
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingRecord(form)
    }

    fn handle_edit_record(&mut self, code: KeyCode, id: RecordId, mut form: RecordForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(record) => {
                    let title = record.display_line();
                    match self.store.update(id, record) {
                        Ok(()) => {
                            self.refresh_records();
                            self.set_status(format!("Updated {title}."), StatusKind::Info);
                            return Mode::Normal;
                        }
                        Err(err) => {
                            let message = surface_error(&err.into());
                            form.error = Some(message.clone());
                            self.set_status(message, StatusKind::Error);
                        }
                    }
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingRecord { id, form }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmRecordDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.remove(confirm.id) {
                    Ok(removed) => {
                        self.refresh_records();
                        self.set_status(
                            format!("Deleted {}.", removed.display_line()),
                            StatusKind::Info,
                        );
                        Mode::Normal
                    }
                    Err(err) => {
                        let message = surface_error(&err.into());
                        self.set_status(message, StatusKind::Error);
                        Mode::Normal
                    }
                }
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.screen.set_filter(None);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                // Executing the search commits the keyword, clears the input
                // box, and leaves the selection at Unselected.
                self.screen.set_filter(Some(state.query.clone()));
                let shown = self.screen.visible.len();
                match self.screen.filter.clone() {
                    Some(keyword) => self.set_status(
                        format!("{shown} record(s) match '{keyword}'."),
                        StatusKind::Info,
                    ),
                    None => self.clear_status(),
                }
                return Mode::Normal;
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::Backspace => {
                state.query.pop();
                self.preview_filter(&state);
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                    self.preview_filter(&state);
                }
            }
            _ => {}
        }
        Mode::Searching(state)
    }

    /// Live-narrow the view while the search bar is open.
    fn preview_filter(&mut self, state: &SearchState) {
        if state.query.trim().is_empty() {
            self.screen.set_filter(None);
        } else {
            self.screen.set_filter(Some(state.query.clone()));
        }
    }

    fn publish_now(&mut self) {
        match self.publisher.publish(&self.store) {
            Ok(PublishOutcome::Pushed { message }) => {
                self.set_status(
                    format!("Published. Commit message: {message}."),
                    StatusKind::Info,
                );
            }
            Ok(PublishOutcome::NoChanges) => {
                self.set_status("No changes to publish.", StatusKind::Info);
            }
            Err(err) => {
                let message = surface_error(&err.into());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    /// Rebuild the list screen from a fresh store snapshot. Runs after every
    /// completed mutation, so the selection also resets to Unselected.
    fn refresh_records(&mut self) {
        self.screen.set_records(self.store.snapshot());
    }

    /// Clone of the selected record, so handlers can mutate state afterward.
    fn current_record(&self) -> Option<(RecordId, Record)> {
        self.screen
            .current()
            .map(|(id, record)| (id, record.clone()))
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(LIST_PANE_PERCENT),
                Constraint::Percentage(100 - LIST_PANE_PERCENT),
            ])
            .split(content_area);

        self.draw_record_list(frame, panes[0]);
        self.draw_detail(frame, panes[1]);
        self.draw_footer(frame, footer_area);

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingRecord(form) => self.draw_record_form(frame, content_area, "Add Record", form),
            Mode::EditingRecord { form, .. } => {
                self.draw_record_form(frame, content_area, "Edit Record", form)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, content_area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, content_area, state),
        }
    }

    fn draw_record_list(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.screen.filter {
            Some(keyword) => format!("Stores ('{keyword}')"),
            None => "Stores".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.screen.records.is_empty() {
            let message = Paragraph::new("No stores yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        if self.screen.visible.is_empty() {
            let message = Paragraph::new("No stores match the current search.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .screen
            .visible
            .iter()
            .map(|(_, record)| ListItem::new(record.display_line()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.screen.selected);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Details");

        let lines = match self.screen.current() {
            Some((_, record)) => vec![
                detail_line("Name", &record.name),
                detail_line("Region", &record.region),
                detail_line("Latitude", value_or_dash(&record.lat)),
                detail_line("Longitude", value_or_dash(&record.lng)),
                detail_line("Address", value_or_dash(&record.address)),
                detail_line("Open chat", value_or_dash(&record.open_chat_url)),
                detail_line("Phone", value_or_dash(&record.phone_number)),
            ],
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select a store to see its details.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        };

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Normal => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[e]", key_style),
                Span::raw(" Edit   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[c]", key_style),
                Span::raw(" Clear   "),
                Span::styled("[p]", key_style),
                Span::raw(" Publish   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Open Chat   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Mode::AddingRecord(_) | Mode::EditingRecord { .. } => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[n/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Searching(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Apply   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear Search"),
            ]),
        }
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &RecordForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = RecordField::ORDER
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = format!("{}: ", form.active.label()).len() as u16;
        let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
        let cursor_y = inner.y + form.active.row();
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRecordDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {}?", confirm.display_line)),
            Line::from("The document file is rewritten immediately."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Render one labeled value for the detail pane.
fn detail_line(label: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}
