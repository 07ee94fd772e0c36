use chrono::NaiveDate;

use crate::model::{Coordinate, EventCategory};

/// The location chosen through the search modal.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLocation {
    pub name: Option<String>,
    pub coordinate: Coordinate,
    pub address: Option<String>,
}

/// An event under construction. Lives for one composition session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub category: Option<EventCategory>,
    pub selected_location: Option<SelectedLocation>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: String,
}
