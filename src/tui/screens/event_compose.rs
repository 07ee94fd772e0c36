//! Event compose screen: the draft form beside the location map.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::compose::{
    CategoryPicker, ComposeConfig, DateField, EditOutcome, EventDraftComposer, EventStore,
    FieldId, LocationCandidate, SessionOutcome, TextEdit,
};
use crate::model::Trip;
use crate::tui::action::Action;
use crate::tui::widgets::form::ROW_HEIGHT;
use crate::tui::widgets::{draw_form, draw_map};

/// State for the compose screen: one composition session plus its outcome.
#[derive(Debug)]
pub struct EventComposeState {
    composer: EventDraftComposer,
    outcome: Rc<RefCell<Option<SessionOutcome>>>,
    error: Option<String>,
}

impl EventComposeState {
    /// Opens a session for `trip`. The session's completion is recorded for
    /// [`take_outcome`](Self::take_outcome).
    pub fn new(trip: &Trip, config: &ComposeConfig, today: NaiveDate) -> Self {
        let outcome = Rc::new(RefCell::new(None));
        let mut composer = EventDraftComposer::new(trip, config, today);
        let sink = Rc::clone(&outcome);
        composer.set_completion(move |o| {
            *sink.borrow_mut() = Some(o.clone());
        });
        Self {
            composer,
            outcome,
            error: None,
        }
    }

    /// Returns the underlying composition session.
    pub fn composer(&self) -> &EventDraftComposer {
        &self.composer
    }

    /// Returns the inline error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The session's outcome, once it has ended.
    pub fn take_outcome(&mut self) -> Option<SessionOutcome> {
        self.outcome.borrow_mut().take()
    }

    /// Tries to save. On failure the form stays open with the reason shown.
    pub fn commit<S: EventStore + ?Sized>(&mut self, store: &mut S) -> bool {
        match self.composer.commit(store) {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.composer.cancel();
    }

    /// Applies a location chosen in the search modal.
    pub fn apply_selection(&mut self, candidate: LocationCandidate) {
        self.composer.on_location_selected(candidate);
        self.error = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.composer.fields().active_picker() {
            Some(FieldId::Category) => self.handle_category_key(key),
            Some(FieldId::StartDate) => self.handle_date_key(DateField::Start, key),
            Some(FieldId::EndDate) => self.handle_date_key(DateField::End, key),
            _ => self.handle_form_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let focused = self.composer.fields().focused();
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.save(),
            KeyCode::Tab | KeyCode::Down => {
                self.composer.fields_mut().focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.composer.fields_mut().focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => self.edit(focused, TextEdit::Insert(ch)),
            KeyCode::Backspace => self.edit(focused, TextEdit::Backspace),
            KeyCode::Enter => match focused {
                FieldId::Location => Action::OpenLocationSearch,
                FieldId::Name | FieldId::Notes => self.save(),
                picker => {
                    self.composer.fields_mut().open_picker(picker);
                    Action::None
                }
            },
            KeyCode::Esc => Action::CancelCompose,
            _ => Action::None,
        }
    }

    fn edit(&mut self, id: FieldId, edit: TextEdit) -> Action {
        if self.composer.fields_mut().try_edit(id, edit) == EditOutcome::Rejected {
            self.error = Some(format!("{} is chosen with Enter", id.label()));
        } else {
            self.error = None;
        }
        Action::None
    }

    fn save(&mut self) -> Action {
        if self.composer.fields().save_enabled() {
            Action::CommitEvent
        } else {
            self.error = Some("Add an event name to save".to_string());
            Action::None
        }
    }

    fn handle_category_key(&mut self, key: KeyEvent) -> Action {
        let fields = self.composer.fields_mut();
        match key.code {
            KeyCode::Up => fields.category_picker_mut().move_up(),
            KeyCode::Down => fields.category_picker_mut().move_down(),
            KeyCode::Enter => fields.confirm_category_picker(),
            KeyCode::Esc => fields.close_pickers(),
            _ => {}
        }
        Action::None
    }

    fn handle_date_key(&mut self, which: DateField, key: KeyEvent) -> Action {
        let fields = self.composer.fields_mut();
        match key.code {
            KeyCode::Left => fields.date_picker_mut(which).step_days(-1),
            KeyCode::Right => fields.date_picker_mut(which).step_days(1),
            KeyCode::Up => fields.date_picker_mut(which).step_days(-7),
            KeyCode::Down => fields.date_picker_mut(which).step_days(7),
            KeyCode::PageUp => fields.date_picker_mut(which).step_months(-1),
            KeyCode::PageDown => fields.date_picker_mut(which).step_months(1),
            KeyCode::Enter => fields.confirm_date_picker(which),
            KeyCode::Esc => fields.close_pickers(),
            _ => {}
        }
        Action::None
    }
}

/// Area just below the field row for `id`, for picker popups.
fn popup_area(form_area: Rect, id: FieldId, height: u16) -> Rect {
    let y = form_area.y + (id.index() as u16 + 1) * ROW_HEIGHT;
    let bottom = form_area.y + form_area.height;
    Rect {
        x: form_area.x + 2,
        y: y.min(bottom.saturating_sub(height)),
        width: form_area.width.saturating_sub(4),
        height: height.min(form_area.height),
    }
}

#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
fn draw_picker(state: &EventComposeState, frame: &mut Frame, form_area: Rect) {
    let fields = state.composer.fields();
    let block = |title: &'static str| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
    };
    match fields.active_picker() {
        Some(FieldId::Category) => {
            let rows = CategoryPicker::rows();
            let area = popup_area(form_area, FieldId::Category, rows.len() as u16 + 2);
            let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
            let list = List::new(items)
                .block(block(" Category "))
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));
            let mut list_state =
                ListState::default().with_selected(Some(fields.category_picker().selected_row()));
            frame.render_widget(Clear, area);
            frame.render_stateful_widget(list, area, &mut list_state);
        }
        Some(id @ (FieldId::StartDate | FieldId::EndDate)) => {
            let which = if id == FieldId::StartDate {
                DateField::Start
            } else {
                DateField::End
            };
            let date = fields.date_picker(which).date();
            let area = popup_area(form_area, id, 4);
            let lines = vec![
                Line::from(Span::styled(
                    fields.format_date(date),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(Span::styled(
                    "\u{2190}/\u{2192} day  \u{2191}/\u{2193} week  PgUp/PgDn month",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines).block(block(" Date ")), area);
        }
        _ => {}
    }
}

/// Renders the compose screen.
#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn draw_event_compose(
    state: &EventComposeState,
    min_map_span: f64,
    frame: &mut Frame,
    area: Rect,
) {
    let [form_side, map_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
    draw_map(
        state.composer.location().map(),
        min_map_span,
        "Location",
        frame,
        map_area,
    );

    let block = Block::default()
        .title(" Add Event ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_side);
    frame.render_widget(block, form_side);

    let form_height = ROW_HEIGHT * FieldId::all().len() as u16;
    let [form_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(form_height),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.composer.fields(), frame, form_area);
    draw_picker(state, frame, form_area);

    if let Some(err) = state.error() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(err, Style::default().fg(Color::Red)))),
            error_area,
        );
    }

    let save_style = if state.composer.fields().save_enabled() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Tab: next  Enter: pick  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Ctrl+S: save", save_style),
        Span::styled("  Esc: cancel", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, footer_area);
}
