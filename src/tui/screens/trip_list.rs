//! Trip list screen: lists the session's trips for the user to open.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::TripId;
use crate::storage::TripsController;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::StatusBarContext;

/// One table row, captured when the list is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRow {
    pub id: TripId,
    pub context: StatusBarContext,
}

/// State for the trip list screen.
#[derive(Debug, Clone, Default)]
pub struct TripListState {
    rows: Vec<TripRow>,
    /// Index of the highlighted trip, or `None` if the list is empty.
    selected: Option<usize>,
    error: Option<String>,
}

impl TripListState {
    /// Creates an empty state. Call [`load`](Self::load) to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the rows from `trips`, keeping the selection in range.
    pub fn load(&mut self, trips: &TripsController, date_format: &str) {
        self.rows = trips
            .trips()
            .iter()
            .map(|t| TripRow {
                id: t.id(),
                context: StatusBarContext::from_trip(t, date_format),
            })
            .collect();
        self.selected = match (self.selected, self.rows.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.error = None;
    }

    /// Returns the trip rows in display order.
    pub fn rows(&self) -> &[TripRow] {
        &self.rows
    }

    /// Returns the index of the highlighted row, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows `msg` until the list is next loaded.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    fn selected_id(&self) -> Option<TripId> {
        self.selected.and_then(|i| self.rows.get(i)).map(|r| r.id)
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.rows.len() => Some(i + 1),
            other => other,
        };
    }
}

impl ScreenState for TripListState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Enter => self.selected_id().map_or(Action::None, Action::OpenTrip),
            KeyCode::Char('d') => self.selected_id().map_or(Action::None, Action::DeleteTrip),
            KeyCode::Char('n') => Action::Navigate(Screen::TripCreate),
            KeyCode::Char('m') => Action::ToggleMenu,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders the trip list screen.
#[mutants::skip]
pub fn draw_trip_list(state: &TripListState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Trips ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if state.rows().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("No trips yet."),
            Line::from("Press 'n' to plan a new trip."),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(vec!["Trip", "Events", "Dates"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if state.selected() == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            let dates = match &row.context.dates {
                Some((first, last)) if first == last => first.clone(),
                Some((first, last)) => format!("{first} to {last}"),
                None => "-".to_string(),
            };
            Row::new(vec![
                row.context.trip_name.clone(),
                row.context.event_count.to_string(),
                dates,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths).header(header);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    frame.render_widget(table, table_area);

    let footer = Paragraph::new("n: new  Enter: open  d: delete  m: menu  q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(err)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(err_line, footer_area);
    }
}
