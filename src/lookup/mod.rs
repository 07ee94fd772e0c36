//! Location search and address lookup collaborators.

mod catalog;
mod cells;

use futures::future::BoxFuture;

use crate::compose::LocationCandidate;
use crate::geo::GeoRegion;
use crate::model::Coordinate;

pub use catalog::{Place, PlaceCatalog};
pub use cells::{AddressCells, AddressReply};

/// Finds places matching a free-form query.
pub trait LocationSearch {
    /// Returns candidates for `query`. When `scope` is given, candidates
    /// inside it are ranked first.
    fn search(&self, query: &str, scope: Option<&GeoRegion>) -> Vec<LocationCandidate>;
}

/// Resolves a coordinate to a display address, possibly asynchronously.
pub trait AddressLookup: Send + Sync + 'static {
    fn lookup(&self, coordinate: Coordinate) -> BoxFuture<'static, Option<String>>;
}
