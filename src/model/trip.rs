use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::Event;
use super::validation::{ValidationError, validate_trip_name};
use crate::geo::{EdgePadding, GeoRegion, fit};

/// Identifier of a [`Trip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId(pub u64);

#[mutants::skip]
impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trip-{}", self.0)
    }
}

/// A named collection of events.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub(crate) id: TripId,
    pub(crate) name: String,
    pub(crate) events: Vec<Event>,
}

impl Trip {
    /// Creates an empty trip, rejecting blank names.
    pub fn new(id: TripId, name: String) -> Result<Self, ValidationError> {
        validate_trip_name(&name)?;
        Ok(Self {
            id,
            name: name.trim().to_string(),
            events: Vec::new(),
        })
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Region covering every event of the trip, or `None` for an empty trip.
    pub fn events_coordinate_region(&self, padding: EdgePadding) -> Option<GeoRegion> {
        fit(self.events.iter().map(|e| &e.coordinate), padding)
    }

    /// Earliest and latest dates across all events, if any are set.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .events
            .iter()
            .flat_map(|e| [e.start_date, e.end_date])
            .flatten();
        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}
