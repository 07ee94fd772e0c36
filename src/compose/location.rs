//! Keeps the composition map in step with the selected location.

use tracing::debug;

use super::draft::SelectedLocation;
use crate::geo::{GeoRegion, Span, fixed_span_region};
use crate::model::Coordinate;

/// Span used to frame a fresh selection.
pub const DEFAULT_SELECTION_SPAN: Span = Span::new(0.05, 0.05);

/// A result reported by the location-search collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCandidate {
    pub name: Option<String>,
    pub coordinate: Coordinate,
    pub formatted_address: Option<String>,
}

/// A map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub title: String,
    pub subtitle: Option<String>,
    pub coordinate: Coordinate,
}

/// Visible region and pins of one map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    region: Option<GeoRegion>,
    annotations: Vec<Annotation>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<&GeoRegion> {
        self.region.as_ref()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn set_region(&mut self, region: Option<GeoRegion>) {
        self.region = region;
    }

    /// Swaps the whole pin set at once: the old pins are dropped before the
    /// new ones are added.
    pub fn replace_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations.clear();
        self.annotations.extend(annotations);
    }
}

/// Location field changes produced by a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFieldUpdate {
    pub location: SelectedLocation,
    pub display_text: String,
}

/// Everything a selection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionUpdate {
    pub region: GeoRegion,
    pub annotations: Vec<Annotation>,
    pub field_update: LocationFieldUpdate,
}

/// Converts search results into map and field updates.
#[derive(Debug, Clone)]
pub struct LocationSelectionBridge {
    map: MapState,
    span: Span,
    search_scope: Option<GeoRegion>,
}

impl LocationSelectionBridge {
    /// `search_scope` is the trip's prior region, if it has one.
    pub fn new(search_scope: Option<GeoRegion>, span: Span) -> Self {
        Self {
            map: MapState::new(),
            span,
            search_scope,
        }
    }

    /// Region hint passed to the location search.
    pub fn search_scope(&self) -> Option<&GeoRegion> {
        self.search_scope.as_ref()
    }

    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Drops a single pin on the candidate and frames it at a fixed span,
    /// regardless of the previous region or pins.
    pub fn on_location_selected(&mut self, candidate: LocationCandidate) -> SelectionUpdate {
        let title = candidate.name.clone().unwrap_or_default();
        let annotation = Annotation {
            title: title.clone(),
            subtitle: candidate.formatted_address.clone(),
            coordinate: candidate.coordinate,
        };
        let region = fixed_span_region(candidate.coordinate, self.span);

        self.map.replace_annotations(vec![annotation]);
        self.map.set_region(Some(region));
        debug!(name = %title, coordinate = %candidate.coordinate, "location selected");

        SelectionUpdate {
            region,
            annotations: self.map.annotations().to_vec(),
            field_update: LocationFieldUpdate {
                location: SelectedLocation {
                    name: candidate.name,
                    coordinate: candidate.coordinate,
                    address: candidate.formatted_address,
                },
                display_text: title,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn candidate(name: &str, lat: f64, lon: f64, address: Option<&str>) -> LocationCandidate {
        LocationCandidate {
            name: Some(name.to_string()),
            coordinate: Coordinate::new(lat, lon),
            formatted_address: address.map(str::to_string),
        }
    }

    fn bridge() -> LocationSelectionBridge {
        LocationSelectionBridge::new(None, DEFAULT_SELECTION_SPAN)
    }

    #[test]
    fn one_pin_with_title_and_subtitle() {
        let mut b = bridge();
        let update = b.on_location_selected(candidate(
            "Café Lumen",
            48.86,
            2.35,
            Some("3 Rue Lumen, Paris"),
        ));
        assert_eq!(update.annotations.len(), 1);
        assert_eq!(update.annotations[0].title, "Café Lumen");
        assert_eq!(
            update.annotations[0].subtitle.as_deref(),
            Some("3 Rue Lumen, Paris")
        );
        assert_eq!(b.map().annotations(), update.annotations.as_slice());
    }

    #[test]
    fn missing_address_leaves_subtitle_empty() {
        let mut b = bridge();
        let update = b.on_location_selected(candidate("Pier 39", 37.81, -122.41, None));
        assert_eq!(update.annotations[0].subtitle, None);
    }

    #[test]
    fn region_is_fixed_span_on_coordinate() {
        let mut b = bridge();
        b.on_location_selected(candidate("Far", -33.86, 151.21, None));
        let update = b.on_location_selected(candidate("Near", 48.86, 2.35, None));
        assert_eq!(update.region.center, Coordinate::new(48.86, 2.35));
        assert_eq!(update.region.span, DEFAULT_SELECTION_SPAN);
        assert_eq!(b.map().region(), Some(&update.region));
    }

    #[test]
    fn reselecting_replaces_previous_pin() {
        let mut b = bridge();
        b.on_location_selected(candidate("First", 1.0, 1.0, None));
        b.on_location_selected(candidate("Second", 2.0, 2.0, None));
        assert_eq!(b.map().annotations().len(), 1);
        assert_eq!(b.map().annotations()[0].title, "Second");
    }

    #[test]
    fn field_update_carries_name_and_location() {
        let mut b = bridge();
        let update = b.on_location_selected(candidate("Louvre", 48.8606, 2.3376, Some("Paris")));
        assert_eq!(update.field_update.display_text, "Louvre");
        assert_eq!(
            update.field_update.location,
            SelectedLocation {
                name: Some("Louvre".into()),
                coordinate: Coordinate::new(48.8606, 2.3376),
                address: Some("Paris".into()),
            }
        );
    }

    #[test]
    fn search_scope_comes_from_trip() {
        let scope = GeoRegion::new(Coordinate::new(41.9, 12.5), Span::new(1.0, 1.0));
        let b = LocationSelectionBridge::new(Some(scope), DEFAULT_SELECTION_SPAN);
        assert_eq!(b.search_scope(), Some(&scope));
        assert_eq!(bridge().search_scope(), None);
    }

    #[test]
    fn replace_annotations_drops_stale_pins() {
        let mut map = MapState::new();
        let pin = |t: &str| Annotation {
            title: t.to_string(),
            subtitle: None,
            coordinate: Coordinate::new(0.0, 0.0),
        };
        map.replace_annotations(vec![pin("a"), pin("b"), pin("c")]);
        map.replace_annotations(vec![pin("d")]);
        assert_eq!(map.annotations(), &[pin("d")]);
    }

    #[quickcheck]
    fn always_exactly_one_pin(prior: Vec<(i8, i8)>, lat: i8, lon: i8) -> bool {
        let mut b = bridge();
        for (la, lo) in prior {
            b.on_location_selected(candidate("prior", la as f64 / 2.0, lo as f64, None));
        }
        b.on_location_selected(candidate("final", lat as f64 / 2.0, lon as f64, None));
        b.map().annotations().len() == 1 && b.map().annotations()[0].title == "final"
    }
}
