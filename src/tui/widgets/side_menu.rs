//! Collapsible side menu.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::debug;

/// Whether the menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Collapsed,
    Expanded,
}

/// Entries offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Trips,
    NewTrip,
    Quit,
}

static ALL_OPTIONS: &[MenuOption] = &[MenuOption::Trips, MenuOption::NewTrip, MenuOption::Quit];

impl MenuOption {
    pub fn all() -> &'static [MenuOption] {
        ALL_OPTIONS
    }
}

#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Trips => "Trips",
            Self::NewTrip => "New Trip",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// A two-state menu. The highlighted row survives collapsing.
#[derive(Debug, Clone, Default)]
pub struct SideMenu {
    state: MenuState,
    highlighted: usize,
}

impl SideMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == MenuState::Expanded
    }

    pub fn highlighted(&self) -> MenuOption {
        ALL_OPTIONS[self.highlighted]
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            MenuState::Collapsed => MenuState::Expanded,
            MenuState::Expanded => MenuState::Collapsed,
        };
        debug!(state = ?self.state, "side menu toggled");
    }

    /// Collapses the menu if it is open.
    pub fn dismiss(&mut self) {
        self.state = MenuState::Collapsed;
    }

    /// Collapses the menu, then yields `option`.
    pub fn choose(&mut self, option: MenuOption) -> MenuOption {
        self.dismiss();
        option
    }

    /// Handles a key while expanded. Returns the chosen option, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<MenuOption> {
        match key.code {
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.highlighted = (self.highlighted + 1).min(ALL_OPTIONS.len() - 1);
                None
            }
            KeyCode::Enter => Some(self.choose(self.highlighted())),
            KeyCode::Esc | KeyCode::Char('m') => {
                self.dismiss();
                None
            }
            _ => None,
        }
    }
}

/// Renders the menu over the left edge of `area` when expanded.
#[mutants::skip]
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn draw_side_menu(menu: &SideMenu, frame: &mut Frame, area: Rect) {
    if !menu.is_expanded() {
        return;
    }
    let width = area.width.min(20);
    let panel = Rect { width, ..area };

    let lines: Vec<Line> = ALL_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = if i == menu.highlighted {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::styled(format!(" {option} "), style)
        })
        .collect();

    let block = Block::default()
        .title(" Menu ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Clear, panel);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
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

    mod state {
        use super::*;

        #[test]
        fn starts_collapsed() {
            assert_eq!(SideMenu::new().state(), MenuState::Collapsed);
        }

        #[test]
        fn toggle_alternates() {
            let mut menu = SideMenu::new();
            menu.toggle();
            assert_eq!(menu.state(), MenuState::Expanded);
            menu.toggle();
            assert_eq!(menu.state(), MenuState::Collapsed);
        }

        #[test]
        fn dismiss_is_idempotent() {
            let mut menu = SideMenu::new();
            menu.dismiss();
            assert_eq!(menu.state(), MenuState::Collapsed);
            menu.toggle();
            menu.dismiss();
            menu.dismiss();
            assert_eq!(menu.state(), MenuState::Collapsed);
        }

        #[test]
        fn choose_collapses_before_yielding() {
            let mut menu = SideMenu::new();
            menu.toggle();
            assert_eq!(menu.choose(MenuOption::NewTrip), MenuOption::NewTrip);
            assert!(!menu.is_expanded());
        }
    }

    mod keys {
        use super::*;

        #[test]
        fn down_then_enter_chooses_second_option() {
            let mut menu = SideMenu::new();
            menu.toggle();
            assert_eq!(menu.handle_key(press(KeyCode::Down)), None);
            assert_eq!(menu.handle_key(press(KeyCode::Enter)), Some(MenuOption::NewTrip));
            assert!(!menu.is_expanded());
        }

        #[test]
        fn highlight_is_clamped() {
            let mut menu = SideMenu::new();
            menu.handle_key(press(KeyCode::Up));
            assert_eq!(menu.highlighted(), MenuOption::Trips);
            for _ in 0..10 {
                menu.handle_key(press(KeyCode::Down));
            }
            assert_eq!(menu.highlighted(), MenuOption::Quit);
        }

        #[test]
        fn esc_dismisses_without_choice() {
            let mut menu = SideMenu::new();
            menu.toggle();
            assert_eq!(menu.handle_key(press(KeyCode::Esc)), None);
            assert!(!menu.is_expanded());
        }
    }

    #[test]
    fn all_lists_every_option() {
        assert_eq!(
            MenuOption::all(),
            &[MenuOption::Trips, MenuOption::NewTrip, MenuOption::Quit]
        );
    }
}
