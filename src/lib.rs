#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal itinerary planner: trips, geolocated events, and maps.

pub mod compose;
pub mod config;
pub mod geo;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod storage;
pub mod tui;
