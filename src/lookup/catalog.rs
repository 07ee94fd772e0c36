use std::path::Path;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AddressLookup, LocationSearch};
use crate::compose::LocationCandidate;
use crate::geo::GeoRegion;
use crate::model::Coordinate;
use crate::storage::StorageError;

/// Radius within which a known place answers an address lookup.
const ADDRESS_RADIUS_KM: f64 = 0.5;

/// One entry of the local gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    fn to_candidate(&self) -> LocationCandidate {
        LocationCandidate {
            name: Some(self.name.clone()),
            coordinate: self.coordinate(),
            formatted_address: self.address.clone(),
        }
    }
}

/// A local list of places, searchable by name or address.
///
/// Stands in for a geocoding service; a JSON array of [`Place`] entries can
/// replace the built-in list.
#[derive(Debug, Clone)]
pub struct PlaceCatalog {
    places: Arc<Vec<Place>>,
}

impl PlaceCatalog {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places: Arc::new(places),
        }
    }

    /// A small built-in gazetteer.
    pub fn builtin() -> Self {
        let place = |name: &str, latitude, longitude, address: &str| Place {
            name: name.to_string(),
            latitude,
            longitude,
            address: Some(address.to_string()),
        };
        Self::new(vec![
            place("Eiffel Tower", 48.8584, 2.2945, "Champ de Mars, 75007 Paris, France"),
            place("Louvre Museum", 48.8606, 2.3376, "Rue de Rivoli, 75001 Paris, France"),
            place("Café de Flore", 48.8541, 2.3326, "172 Bd Saint-Germain, 75006 Paris, France"),
            place("Gare du Nord", 48.8809, 2.3553, "18 Rue de Dunkerque, 75010 Paris, France"),
            place("Colosseum", 41.8902, 12.4922, "Piazza del Colosseo, 00184 Rome, Italy"),
            place("Pantheon", 41.8986, 12.4769, "Piazza della Rotonda, 00186 Rome, Italy"),
            place("Roma Termini", 41.9010, 12.5018, "Piazza dei Cinquecento, 00185 Rome, Italy"),
            place("Belém Tower", 38.6916, -9.2160, "Av. Brasília, 1400-038 Lisbon, Portugal"),
            place("Time Out Market", 38.7071, -9.1459, "Av. 24 de Julho 49, 1200-479 Lisbon, Portugal"),
            place("Shibuya Crossing", 35.6595, 139.7005, "Shibuya City, Tokyo, Japan"),
            place("Senso-ji", 35.7148, 139.7967, "2-3-1 Asakusa, Taito City, Tokyo, Japan"),
            place("Golden Gate Bridge", 37.8199, -122.4783, "Golden Gate Bridge, San Francisco, CA, USA"),
            place("Ferry Building", 37.7955, -122.3937, "1 Ferry Building, San Francisco, CA, USA"),
        ])
    }

    /// Reads a JSON array of places.
    pub async fn load(path: &Path) -> Result<Self, StorageError> {
        let content = tokio::fs::read_to_string(path).await?;
        let places: Vec<Place> = serde_json::from_str(&content)?;
        if let Some(bad) = places.iter().find(|p| !p.coordinate().is_valid()) {
            return Err(StorageError::InvalidPlace {
                path: path.to_path_buf(),
                name: bad.name.clone(),
            });
        }
        debug!(path = %path.display(), count = places.len(), "place catalog loaded");
        Ok(Self::new(places))
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// The closest place to `coordinate` within `max_km`, if any.
    pub fn nearest(&self, coordinate: Coordinate, max_km: f64) -> Option<&Place> {
        nearest_in(&self.places, coordinate, max_km)
    }
}

fn nearest_in(places: &[Place], coordinate: Coordinate, max_km: f64) -> Option<&Place> {
    places
        .iter()
        .map(|p| (p, p.coordinate().distance_km(&coordinate)))
        .filter(|(_, d)| *d <= max_km)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(p, _)| p)
}

impl LocationSearch for PlaceCatalog {
    fn search(&self, query: &str, scope: Option<&GeoRegion>) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let matcher = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                warn!(error = %e, "could not build search pattern");
                return Vec::new();
            }
        };

        let (mut inside, outside): (Vec<&Place>, Vec<&Place>) = self
            .places
            .iter()
            .filter(|p| {
                matcher.is_match(&p.name)
                    || p.address.as_deref().is_some_and(|a| matcher.is_match(a))
            })
            .partition(|p| scope.is_some_and(|s| s.contains(&p.coordinate())));
        inside.extend(outside);
        inside.into_iter().map(Place::to_candidate).collect()
    }
}

impl AddressLookup for PlaceCatalog {
    fn lookup(&self, coordinate: Coordinate) -> BoxFuture<'static, Option<String>> {
        let places = Arc::clone(&self.places);
        async move {
            nearest_in(&places, coordinate, ADDRESS_RADIUS_KM)
                .map(|p| p.address.clone().unwrap_or_else(|| p.name.clone()))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::geo::Span;

    fn names(candidates: &[LocationCandidate]) -> Vec<&str> {
        candidates
            .iter()
            .filter_map(|c| c.name.as_deref())
            .collect()
    }

    mod search {
        use super::*;

        #[test]
        fn matches_name_case_insensitively() {
            let catalog = PlaceCatalog::builtin();
            let results = catalog.search("louvre", None);
            assert_eq!(names(&results), vec!["Louvre Museum"]);
            assert_eq!(
                results[0].formatted_address.as_deref(),
                Some("Rue de Rivoli, 75001 Paris, France")
            );
        }

        #[test]
        fn matches_address() {
            let catalog = PlaceCatalog::builtin();
            let results = catalog.search("Lisbon", None);
            assert_eq!(names(&results), vec!["Belém Tower", "Time Out Market"]);
        }

        #[test]
        fn blank_query_returns_nothing() {
            assert!(PlaceCatalog::builtin().search("   ", None).is_empty());
        }

        #[test]
        fn regex_metacharacters_are_literal() {
            let catalog = PlaceCatalog::new(vec![Place {
                name: "Bar (Old Town)".into(),
                latitude: 0.0,
                longitude: 0.0,
                address: None,
            }]);
            assert_eq!(catalog.search("(old", None).len(), 1);
            assert!(catalog.search(".*", None).is_empty());
        }

        #[test]
        fn scope_ranks_inside_first() {
            let catalog = PlaceCatalog::builtin();
            let rome = GeoRegion::new(Coordinate::new(41.9, 12.49), Span::new(0.2, 0.2));
            let unscoped = catalog.search("a", None);
            let scoped = catalog.search("a", Some(&rome));
            assert_eq!(unscoped.len(), scoped.len());
            let first = scoped[0].coordinate;
            assert!(rome.contains(&first), "first result {first} should be in Rome");
        }
    }

    mod nearest {
        use super::*;

        #[test]
        fn finds_closest_within_radius() {
            let catalog = PlaceCatalog::builtin();
            let p = catalog
                .nearest(Coordinate::new(48.8605, 2.3375), 0.5)
                .unwrap();
            assert_eq!(p.name, "Louvre Museum");
        }

        #[test]
        fn nothing_outside_radius() {
            let catalog = PlaceCatalog::builtin();
            assert!(catalog.nearest(Coordinate::new(0.0, 0.0), 10.0).is_none());
        }
    }

    mod loading {
        use super::*;

        #[tokio::test]
        async fn load_reads_json_array() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"[{{"name":"Café Lumen","latitude":48.86,"longitude":2.35,"address":"Paris"}},
                   {{"name":"Hut","latitude":46.5,"longitude":8.0}}]"#
            )
            .unwrap();
            let catalog = PlaceCatalog::load(file.path()).await.unwrap();
            assert_eq!(catalog.places().len(), 2);
            assert_eq!(catalog.places()[1].address, None);
        }

        #[tokio::test]
        async fn load_rejects_invalid_coordinate() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"[{{"name":"Nowhere","latitude":95.0,"longitude":0.0}}]"#).unwrap();
            let err = PlaceCatalog::load(file.path()).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidPlace { ref name, .. } if name == "Nowhere"));
        }

        #[tokio::test]
        async fn load_rejects_bad_json() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "not json").unwrap();
            let err = PlaceCatalog::load(file.path()).await.unwrap_err();
            assert!(matches!(err, StorageError::Json(_)));
        }

        #[tokio::test]
        async fn load_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = PlaceCatalog::load(&dir.path().join("none.json"))
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::Io(_)));
        }
    }

    #[tokio::test]
    async fn address_lookup_uses_nearest_place() {
        let catalog = PlaceCatalog::builtin();
        let address = catalog.lookup(Coordinate::new(41.8902, 12.4922)).await;
        assert_eq!(
            address.as_deref(),
            Some("Piazza del Colosseo, 00184 Rome, Italy")
        );
        assert_eq!(catalog.lookup(Coordinate::new(0.0, 0.0)).await, None);
    }
}
