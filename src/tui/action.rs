//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::compose::LocationCandidate;
use crate::model::TripId;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Create a trip with the given name and open it.
    CreateTrip(String),
    /// Open the trip's event list.
    OpenTrip(TripId),
    /// Remove a trip and its events.
    DeleteTrip(TripId),
    /// Start an "add event" session for the open trip.
    ComposeEvent,
    /// Present the location search over the compose screen.
    OpenLocationSearch,
    /// The location search reported a selection.
    LocationSelected(LocationCandidate),
    /// The location search was dismissed without a selection.
    CloseLocationSearch,
    /// Save the draft being composed.
    CommitEvent,
    /// Abandon the draft being composed.
    CancelCompose,
    /// Expand or collapse the side menu.
    ToggleMenu,
    /// Quit the application.
    Quit,
}

/// Common behavior for screen state types that need no outside context.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
