use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::EventCategory;
use super::coordinate::Coordinate;
use super::trip::TripId;

/// Identifier of a persisted [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[mutants::skip]
impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

/// Fields handed to the persistence collaborator when a draft is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub trip: TripId,
}

/// A durable itinerary event, owned by a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub trip: TripId,
}

impl Event {
    /// Builds the durable event from committed draft fields.
    pub fn from_new(id: EventId, new: NewEvent) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            category: new.category,
            coordinate: new.coordinate,
            address: new.address,
            start_date: new.start_date,
            end_date: new.end_date,
            notes: new.notes,
            trip: new.trip,
        }
    }
}
