//! Location search modal presented over the compose screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::compose::LocationCandidate;
use crate::geo::GeoRegion;
use crate::lookup::LocationSearch;
use crate::tui::action::Action;

/// State for the location search modal. Results refresh on every keystroke.
#[derive(Debug, Clone, Default)]
pub struct LocationSearchState {
    query: String,
    results: Vec<LocationCandidate>,
    selected: Option<usize>,
    scope: Option<GeoRegion>,
}

impl LocationSearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the query and sets the region hint for this presentation.
    pub fn present(&mut self, scope: Option<GeoRegion>) {
        self.query.clear();
        self.results.clear();
        self.selected = None;
        self.scope = scope;
    }

    /// Returns the typed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the candidates matching the query.
    pub fn results(&self) -> &[LocationCandidate] {
        &self.results
    }

    /// Returns the index of the highlighted candidate, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the region used to rank results, if any.
    pub fn scope(&self) -> Option<&GeoRegion> {
        self.scope.as_ref()
    }

    /// Handles a key, querying `search` when the text changes.
    pub fn handle_key(&mut self, key: KeyEvent, search: &dyn LocationSearch) -> Action {
        match key.code {
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.refresh(search);
                Action::None
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refresh(search);
                Action::None
            }
            KeyCode::Up => {
                self.selected = match self.selected {
                    Some(i) if i > 0 => Some(i - 1),
                    other => other,
                };
                Action::None
            }
            KeyCode::Down => {
                self.selected = match self.selected {
                    Some(i) if i + 1 < self.results.len() => Some(i + 1),
                    other => other,
                };
                Action::None
            }
            KeyCode::Enter => self
                .selected
                .and_then(|i| self.results.get(i))
                .map_or(Action::None, |c| Action::LocationSelected(c.clone())),
            KeyCode::Esc => Action::CloseLocationSearch,
            _ => Action::None,
        }
    }

    fn refresh(&mut self, search: &dyn LocationSearch) {
        self.results = search.search(&self.query, self.scope.as_ref());
        self.selected = if self.results.is_empty() { None } else { Some(0) };
    }
}

fn result_item(candidate: &LocationCandidate) -> ListItem<'_> {
    let name = candidate.name.as_deref().unwrap_or("Unnamed place");
    let mut lines = vec![Line::from(Span::styled(
        name,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(address) = candidate.formatted_address.as_deref() {
        lines.push(Line::from(Span::styled(
            address,
            Style::default().fg(Color::DarkGray),
        )));
    }
    ListItem::new(lines)
}

/// Renders the modal centred in `area`.
#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn draw_location_search(state: &LocationSearchState, frame: &mut Frame, area: Rect) {
    let [modal] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::vertical([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(modal);

    let block = Block::default()
        .title(" Search Location ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(Clear, modal);
    frame.render_widget(block, modal);

    let [query_area, results_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let query = Paragraph::new(Line::from(vec![
        Span::raw(state.query()),
        Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ),
    ]))
    .block(
        Block::default()
            .title("Query")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(query, query_area);

    if state.results().is_empty() {
        let hint = if state.query().trim().is_empty() {
            "Type a place name or address."
        } else {
            "No matching places."
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            results_area,
        );
    } else {
        let items: Vec<ListItem> = state.results().iter().map(result_item).collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));
        let mut list_state = ListState::default().with_selected(state.selected());
        frame.render_stateful_widget(list, results_area, &mut list_state);
    }

    let footer = Paragraph::new("Up/Down: choose  Enter: select  Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
