mod category;
mod coordinate;
mod event;
mod trip;
mod validation;

pub use category::EventCategory;
pub use coordinate::Coordinate;
pub use event::{Event, EventId, NewEvent};
pub use trip::{Trip, TripId};
pub use validation::{
    RequiredField, ValidationError, resolve_event_name, validate_coordinate, validate_trip_name,
};
