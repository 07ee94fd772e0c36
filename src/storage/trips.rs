use tracing::{info, warn};

use crate::compose::EventStore;
use crate::model::{Event, EventId, NewEvent, Trip, TripId, ValidationError};

/// Owns the user's trips and their events for the running session.
#[derive(Debug, Clone, Default)]
pub struct TripsController {
    trips: Vec<Trip>,
    next_trip_id: u64,
    next_event_id: u64,
}

impl TripsController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a trip with the given name and returns its id.
    pub fn create_trip(&mut self, name: String) -> Result<TripId, ValidationError> {
        let id = TripId(self.next_trip_id + 1);
        let trip = Trip::new(id, name)?;
        self.next_trip_id += 1;
        info!(trip = %id, name = trip.name(), "trip created");
        self.trips.push(trip);
        Ok(id)
    }

    /// Trips in creation order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id() == id)
    }

    fn trip_mut(&mut self, id: TripId) -> Option<&mut Trip> {
        self.trips.iter_mut().find(|t| t.id() == id)
    }

    /// Removes a trip and all its events. Returns the removed trip.
    pub fn delete_trip(&mut self, id: TripId) -> Option<Trip> {
        let pos = self.trips.iter().position(|t| t.id() == id)?;
        info!(trip = %id, "trip deleted");
        Some(self.trips.remove(pos))
    }
}

impl EventStore for TripsController {
    fn add_event(&mut self, new: NewEvent) -> Event {
        self.next_event_id += 1;
        let event = Event::from_new(EventId(self.next_event_id), new);
        match self.trip_mut(event.trip) {
            Some(trip) => trip.push_event(event.clone()),
            None => warn!(trip = %event.trip, event = %event.id, "event added to unknown trip"),
        }
        event
    }
}
