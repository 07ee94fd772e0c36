use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of itinerary event. A closed, ordered set.
///
/// Picker rows are offset by one: row 0 means "no category", row `n`
/// is the `n`th variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Food,
    Lodging,
    Transit,
    Sightseeing,
}

static ALL_CATEGORIES: &[EventCategory] = &[
    EventCategory::Food,
    EventCategory::Lodging,
    EventCategory::Transit,
    EventCategory::Sightseeing,
];

static DISPLAY_NAMES: &[Option<&str>] = &[
    None,
    Some("Food"),
    Some("Lodging"),
    Some("Transit"),
    Some("Sightseeing"),
];

impl EventCategory {
    /// Returns the human-readable label for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            EventCategory::Food => "Food",
            EventCategory::Lodging => "Lodging",
            EventCategory::Transit => "Transit",
            EventCategory::Sightseeing => "Sightseeing",
        }
    }

    /// Picker labels by row. Row 0 is `None` ("unset").
    pub fn display_names() -> &'static [Option<&'static str>] {
        DISPLAY_NAMES
    }

    /// Maps a picker row to a category. Row 0 and out-of-range rows are `None`.
    pub fn from_row(row: usize) -> Option<Self> {
        row.checked_sub(1).and_then(|i| ALL_CATEGORIES.get(i).copied())
    }

    /// The picker row that selects this category.
    pub fn row(&self) -> usize {
        ALL_CATEGORIES
            .iter()
            .position(|c| c == self)
            .map_or(0, |i| i + 1)
    }

    /// Returns all categories in picker order.
    pub fn all() -> &'static [EventCategory] {
        ALL_CATEGORIES
    }
}

#[mutants::skip]
impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_zero_is_unset() {
        assert_eq!(EventCategory::from_row(0), None);
        assert_eq!(EventCategory::display_names()[0], None);
    }

    #[test]
    fn row_two_is_lodging() {
        assert_eq!(EventCategory::from_row(2), Some(EventCategory::Lodging));
        assert_eq!(EventCategory::display_names()[2], Some("Lodging"));
    }

    #[test]
    fn out_of_range_row_is_unset() {
        assert_eq!(EventCategory::from_row(DISPLAY_NAMES.len()), None);
        assert_eq!(EventCategory::from_row(usize::MAX), None);
    }

    #[test]
    fn display_names_match_variants() {
        for category in EventCategory::all() {
            assert_eq!(
                EventCategory::display_names()[category.row()],
                Some(category.display_name())
            );
        }
    }

    #[test]
    fn row_round_trips() {
        for category in EventCategory::all() {
            assert_eq!(EventCategory::from_row(category.row()), Some(*category));
        }
    }

    #[test]
    fn one_more_row_than_variants() {
        assert_eq!(
            EventCategory::display_names().len(),
            EventCategory::all().len() + 1
        );
    }

    #[test]
    fn serde_round_trip() {
        for category in EventCategory::all() {
            let json = serde_json::to_string(category).unwrap();
            let back: EventCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(*category, back);
        }
    }
}
