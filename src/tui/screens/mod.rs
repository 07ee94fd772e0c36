//! TUI screen implementations.

pub mod event_compose;
pub mod event_list;
pub mod location_search;
pub mod trip_create;
pub mod trip_list;

pub use event_compose::{EventComposeState, draw_event_compose};
pub use event_list::{EventListState, PAGE_SIZE, draw_event_list};
pub use location_search::{LocationSearchState, draw_location_search};
pub use trip_create::{TripCreateState, draw_trip_create};
pub use trip_list::{TripListState, TripRow, draw_trip_list};
