//! Trip creation screen: a single name field.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::validate_trip_name;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// State for the trip creation screen.
#[derive(Debug, Clone, Default)]
pub struct TripCreateState {
    name: String,
    error: Option<String>,
}

impl TripCreateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the typed trip name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an error not tied to the name's shape (e.g. from the controller).
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    /// Returns the validation error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.error = None;
    }

    fn submit(&mut self) -> Action {
        self.error = None;
        match validate_trip_name(&self.name) {
            Ok(()) => Action::CreateTrip(self.name.trim().to_string()),
            Err(e) => {
                self.error = Some(e.to_string());
                Action::None
            }
        }
    }
}

impl ScreenState for TripCreateState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(ch) => {
                self.name.push(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.name.pop();
                Action::None
            }
            KeyCode::Esc => Action::Navigate(Screen::TripList),
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }
}

/// Renders the trip creation screen.
#[mutants::skip]
pub fn draw_trip_create(state: &TripCreateState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" New Trip ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [field_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let border_color = if state.error().is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let field = Paragraph::new(Line::from(vec![
        Span::raw(state.name()),
        Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ),
    ]))
    .block(
        Block::default()
            .title("Trip Name *")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(field, field_area);

    if let Some(err) = state.error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from("Enter: create  Esc: cancel"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(state: &mut TripCreateState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    mod input {
        use super::*;

        #[test]
        fn typing_appends() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "Lisbon");
            assert_eq!(state.name(), "Lisbon");
        }

        #[test]
        fn backspace_removes_last() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "Rom");
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.name(), "Ro");
        }

        #[test]
        fn backspace_on_empty_is_noop() {
            let mut state = TripCreateState::new();
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.name(), "");
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn enter_creates_trimmed_trip() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "  Kyoto ");
            assert_eq!(
                state.handle_key(press(KeyCode::Enter)),
                Action::CreateTrip("Kyoto".into())
            );
            assert_eq!(state.error(), None);
        }

        #[test]
        fn blank_name_shows_error() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "   ");
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert!(state.error().is_some());
        }

        #[test]
        fn retry_clears_previous_error() {
            let mut state = TripCreateState::new();
            state.handle_key(press(KeyCode::Enter));
            type_str(&mut state, "Oslo");
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(state.error(), None);
        }

        #[test]
        fn esc_returns_to_trip_list() {
            let mut state = TripCreateState::new();
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::TripList)
            );
        }

        #[test]
        fn reset_clears_name_and_error() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "x");
            state.set_error("boom".into());
            state.reset();
            assert_eq!(state.name(), "");
            assert_eq!(state.error(), None);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        #[test]
        fn renders_name_and_error() {
            let mut state = TripCreateState::new();
            type_str(&mut state, "Porto");
            state.set_error("trip name cannot be empty".into());
            let mut terminal = Terminal::new(TestBackend::new(50, 10)).unwrap();
            terminal
                .draw(|frame| draw_trip_create(&state, frame, frame.area()))
                .unwrap();
            let output = buffer_to_string(terminal.backend().buffer());
            assert!(output.contains("New Trip"));
            assert!(output.contains("Porto"));
            assert!(output.contains("trip name cannot be empty"));
        }
    }
}
