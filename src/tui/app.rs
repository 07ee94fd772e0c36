use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::compose::SessionOutcome;
use crate::config::Settings;
use crate::lookup::{AddressCells, PlaceCatalog};
use crate::model::TripId;
use crate::storage::TripsController;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    EventComposeState, EventListState, LocationSearchState, TripCreateState, TripListState,
    draw_event_compose, draw_event_list, draw_location_search, draw_trip_create, draw_trip_list,
};
use super::widgets::{MenuOption, SideMenu, StatusBarContext, draw_side_menu, draw_status_bar};

/// How long the loop waits for input before servicing lookups again.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// List and open trips.
    TripList,
    /// Name a new trip.
    TripCreate,
    /// Events of the open trip with an overview map.
    EventList,
    /// Compose a new event for the open trip.
    EventCompose,
    /// Search for the event's location, over the compose screen.
    LocationSearch,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    trips: TripsController,
    current_trip: Option<TripId>,
    trip_list: TripListState,
    trip_create: TripCreateState,
    event_list: EventListState,
    compose: Option<EventComposeState>,
    search: LocationSearchState,
    menu: SideMenu,
    catalog: PlaceCatalog,
    cells: AddressCells,
    settings: Settings,
    runtime: Runtime,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::TripList`] screen.
    ///
    /// Address lookups run on `runtime`, which the event loop drives between
    /// key presses.
    pub fn new(settings: Settings, catalog: PlaceCatalog, runtime: Runtime) -> Self {
        let cells = AddressCells::new(Arc::new(catalog.clone()), runtime.handle().clone());
        Self {
            screen: Screen::TripList,
            trips: TripsController::new(),
            current_trip: None,
            trip_list: TripListState::new(),
            trip_create: TripCreateState::new(),
            event_list: EventListState::new(),
            compose: None,
            search: LocationSearchState::new(),
            menu: SideMenu::new(),
            catalog,
            cells,
            settings,
            runtime,
            should_quit: false,
        }
    }

    /// Main event loop: service lookups → draw → poll input → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.tick();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Binds visible event rows, lets pending lookups run, and applies
    /// their replies.
    pub fn tick(&mut self) {
        if self.screen == Screen::EventList {
            self.event_list.bind_cells(&mut self.cells);
        }
        self.runtime.block_on(tokio::task::yield_now());
        let applied = self.cells.drain();
        if applied > 0 {
            debug!(applied, "address replies applied");
        }
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        let min_span = self.settings.min_map_span_degrees;

        match self.screen {
            Screen::TripList => draw_trip_list(&self.trip_list, frame, body),
            Screen::TripCreate => draw_trip_create(&self.trip_create, frame, body),
            Screen::EventList => draw_event_list(
                &self.event_list,
                &self.cells,
                &self.settings.date_format,
                min_span,
                frame,
                body,
            ),
            Screen::EventCompose => {
                if let Some(compose) = &self.compose {
                    draw_event_compose(compose, min_span, frame, body);
                }
            }
            Screen::LocationSearch => {
                if let Some(compose) = &self.compose {
                    draw_event_compose(compose, min_span, frame, body);
                }
                draw_location_search(&self.search, frame, body);
            }
        }

        if let Some(ctx) = self.status_context() {
            draw_status_bar(&ctx, frame, status);
        }
        draw_side_menu(&self.menu, frame, body);
    }

    fn status_context(&self) -> Option<StatusBarContext> {
        let trip = self.trips.trip(self.current_trip?)?;
        Some(StatusBarContext::from_trip(trip, &self.settings.date_format))
    }

    /// Handles a key event: the menu first when it is open, then the screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.menu.is_expanded() {
            if let Some(option) = self.menu.handle_key(key) {
                self.apply_menu_option(option);
            }
            return;
        }

        let action = match self.screen {
            Screen::TripList => self.trip_list.handle_key(key),
            Screen::TripCreate => self.trip_create.handle_key(key),
            Screen::EventList => self.event_list.handle_key(key),
            Screen::EventCompose => match self.compose.as_mut() {
                Some(compose) => compose.handle_key(key),
                None => Action::Navigate(Screen::EventList),
            },
            Screen::LocationSearch => self.search.handle_key(key, &self.catalog),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::CreateTrip(name) => match self.trips.create_trip(name) {
                Ok(id) => self.open_trip(id),
                Err(e) => self.trip_create.set_error(e.to_string()),
            },
            Action::OpenTrip(id) => self.open_trip(id),
            Action::DeleteTrip(id) => {
                self.trips.delete_trip(id);
                if self.current_trip == Some(id) {
                    self.current_trip = None;
                }
                self.navigate(Screen::TripList);
            }
            Action::ComposeEvent => self.start_compose(),
            Action::OpenLocationSearch => {
                if let Some(compose) = &self.compose {
                    self.search
                        .present(compose.composer().search_scope().copied());
                    self.screen = Screen::LocationSearch;
                }
            }
            Action::LocationSelected(candidate) => {
                if let Some(compose) = self.compose.as_mut() {
                    compose.apply_selection(candidate);
                }
                self.screen = Screen::EventCompose;
            }
            Action::CloseLocationSearch => self.screen = Screen::EventCompose,
            Action::CommitEvent => {
                if let Some(compose) = self.compose.as_mut() {
                    compose.commit(&mut self.trips);
                }
                self.finish_compose();
            }
            Action::CancelCompose => {
                if let Some(compose) = self.compose.as_mut() {
                    compose.cancel();
                }
                self.finish_compose();
            }
            Action::ToggleMenu => self.menu.toggle(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn apply_menu_option(&mut self, option: MenuOption) {
        match option {
            MenuOption::Trips => self.navigate(Screen::TripList),
            MenuOption::NewTrip => self.navigate(Screen::TripCreate),
            MenuOption::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        match screen {
            Screen::TripList => {
                self.compose = None;
                self.trip_list
                    .load(&self.trips, &self.settings.date_format);
            }
            Screen::TripCreate => {
                self.compose = None;
                self.trip_create.reset();
            }
            Screen::EventList => self.refresh_event_list(),
            Screen::EventCompose | Screen::LocationSearch => {
                if self.compose.is_none() {
                    return;
                }
            }
        }
        self.screen = screen;
    }

    fn open_trip(&mut self, id: TripId) {
        if self.trips.trip(id).is_none() {
            warn!(trip = %id, "open requested for unknown trip");
            self.trip_list.set_error(format!("{id} no longer exists"));
            return;
        }
        self.current_trip = Some(id);
        self.navigate(Screen::EventList);
    }

    fn refresh_event_list(&mut self) {
        if let Some(trip) = self.current_trip.and_then(|id| self.trips.trip(id)) {
            self.event_list.load(trip, self.settings.fit_padding());
        }
    }

    fn start_compose(&mut self) {
        let Some(trip) = self.current_trip.and_then(|id| self.trips.trip(id)) else {
            return;
        };
        let today = chrono::Local::now().date_naive();
        self.compose = Some(EventComposeState::new(
            trip,
            &self.settings.compose_config(),
            today,
        ));
        self.screen = Screen::EventCompose;
    }

    /// Leaves the compose screen once its session has reported an outcome.
    /// A failed commit reports nothing, so the form stays open.
    fn finish_compose(&mut self) {
        let Some(outcome) = self.compose.as_mut().and_then(|c| c.take_outcome()) else {
            return;
        };
        self.compose = None;
        self.navigate(Screen::EventList);
        if let SessionOutcome::Saved(event) = outcome {
            self.event_list.set_message(format!("Added {}", event.name));
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a reference to the [`TripsController`].
    pub fn trips(&self) -> &TripsController {
        &self.trips
    }

    /// Returns the open trip, if any.
    pub fn current_trip(&self) -> Option<TripId> {
        self.current_trip
    }

    /// Returns the side menu.
    pub fn menu(&self) -> &SideMenu {
        &self.menu
    }

    /// Returns the active compose screen state, if any.
    pub fn compose(&self) -> Option<&EventComposeState> {
        self.compose.as_ref()
    }

    /// Returns the event list screen state.
    pub fn event_list(&self) -> &EventListState {
        &self.event_list
    }

    /// Returns the address cells backing the event list.
    pub fn cells(&self) -> &AddressCells {
        &self.cells
    }
}
