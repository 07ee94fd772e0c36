//! Event list screen: the open trip's events beside an overview map.
//!
//! Only a window of [`PAGE_SIZE`] rows is bound to address cells at a time;
//! scrolling rebinds the same cells to different events.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::compose::{Annotation, MapState, format_date};
use crate::geo::EdgePadding;
use crate::lookup::AddressCells;
use crate::model::{Event, Trip, TripId};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::draw_map;

/// Rows shown (and cells bound) at once.
pub const PAGE_SIZE: usize = 8;

/// State for the event list screen.
#[derive(Debug, Clone, Default)]
pub struct EventListState {
    trip: Option<TripId>,
    events: Vec<Event>,
    selected: Option<usize>,
    /// Index of the first visible event.
    offset: usize,
    overview: MapState,
    message: Option<String>,
}

impl EventListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `trip`'s events and fits the overview map around them.
    /// Reloading the same trip keeps the scroll position.
    pub fn load(&mut self, trip: &Trip, padding: EdgePadding) {
        if self.trip != Some(trip.id()) {
            self.selected = None;
            self.offset = 0;
            self.message = None;
        }
        self.trip = Some(trip.id());
        self.events = trip.events().to_vec();

        self.overview
            .set_region(trip.events_coordinate_region(padding));
        self.overview.replace_annotations(
            self.events
                .iter()
                .map(|e| Annotation {
                    title: e.name.clone(),
                    subtitle: e.address.clone(),
                    coordinate: e.coordinate,
                })
                .collect(),
        );

        self.selected = match (self.selected, self.events.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.scroll_to_selection();
    }

    /// Returns the trip whose events are listed.
    pub fn trip(&self) -> Option<TripId> {
        self.trip
    }

    /// Returns every event of the trip, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the index of the highlighted event, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the overview map fitted to the trip.
    pub fn overview(&self) -> &MapState {
        &self.overview
    }

    /// Returns the status message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, msg: String) {
        self.message = Some(msg);
    }

    /// Events currently in the visible window.
    pub fn visible(&self) -> &[Event] {
        let end = (self.offset + PAGE_SIZE).min(self.events.len());
        &self.events[self.offset.min(end)..end]
    }

    /// Binds each visible row's cell to its event and clears the rest.
    pub fn bind_cells(&self, cells: &mut AddressCells) {
        let visible = self.visible();
        for slot in 0..PAGE_SIZE {
            match visible.get(slot) {
                Some(event) => cells.bind(slot, event),
                None => cells.unbind(slot),
            }
        }
        cells.truncate(PAGE_SIZE);
    }

    fn scroll_to_selection(&mut self) {
        let Some(i) = self.selected else {
            self.offset = 0;
            return;
        };
        if i < self.offset {
            self.offset = i;
        } else if i >= self.offset + PAGE_SIZE {
            self.offset = i + 1 - PAGE_SIZE;
        }
    }

    fn select_prev(&mut self) {
        if let Some(i) = self.selected
            && i > 0
        {
            self.selected = Some(i - 1);
            self.scroll_to_selection();
        }
    }

    fn select_next(&mut self) {
        if let Some(i) = self.selected
            && i + 1 < self.events.len()
        {
            self.selected = Some(i + 1);
            self.scroll_to_selection();
        }
    }
}

impl ScreenState for EventListState {
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
            KeyCode::Char('a') if self.trip.is_some() => Action::ComposeEvent,
            KeyCode::Char('m') => Action::ToggleMenu,
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::TripList),
            _ => Action::None,
        }
    }
}

fn dates_text(event: &Event, date_format: &str) -> String {
    match (event.start_date, event.end_date) {
        (Some(start), Some(end)) if start != end => format!(
            "{} to {}",
            format_date(start, date_format),
            format_date(end, date_format)
        ),
        (Some(d), _) | (None, Some(d)) => format_date(d, date_format),
        (None, None) => "-".to_string(),
    }
}

/// Text for a row's address column.
pub fn address_text<'a>(cells: &'a AddressCells, slot: usize, event: &'a Event) -> &'a str {
    if let Some(address) = cells.address(slot) {
        address
    } else if let Some(address) = event.address.as_deref() {
        address
    } else if cells.is_pending(slot) {
        "\u{2026}"
    } else {
        "-"
    }
}

/// Renders the event list screen.
#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn draw_event_list(
    state: &EventListState,
    cells: &AddressCells,
    date_format: &str,
    min_map_span: f64,
    frame: &mut Frame,
    area: Rect,
) {
    let [list_area, map_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
    draw_map(state.overview(), min_map_span, "Overview", frame, map_area);

    let block = Block::default()
        .title(" Events ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(list_area);
    frame.render_widget(block, list_area);

    let [table_area, message_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if state.events().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("No events yet."),
            Line::from("Press 'a' to add one."),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            table_area,
        );
    } else {
        let header = Row::new(vec!["Event", "Category", "Dates", "Address"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let rows: Vec<Row> = state
            .visible()
            .iter()
            .enumerate()
            .map(|(slot, event)| {
                let style = if state.selected() == Some(state.offset() + slot) {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    event.name.clone(),
                    event
                        .category
                        .map_or_else(|| "-".to_string(), |c| c.to_string()),
                    dates_text(event, date_format),
                    address_text(cells, slot, event).to_string(),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Min(12),
            Constraint::Min(16),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    if let Some(msg) = state.message() {
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(Color::Green)),
            message_area,
        );
    }

    let footer = Paragraph::new("a: add event  m: menu  Esc: trips")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
