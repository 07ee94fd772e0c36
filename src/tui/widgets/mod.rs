//! Reusable TUI widgets.

pub mod form;
pub mod map;
pub mod side_menu;
pub mod status_bar;

pub use form::{draw_form, field_title};
pub use map::{Viewport, draw_map};
pub use side_menu::{MenuOption, MenuState, SideMenu, draw_side_menu};
pub use status_bar::{StatusBarContext, draw_status_bar};
