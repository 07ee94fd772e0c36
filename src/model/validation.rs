use std::fmt;

use thiserror::Error;

use super::coordinate::Coordinate;

/// A draft field that must be present before an event can be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Location,
    Name,
}

#[mutants::skip]
impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Location => f.write_str("location"),
            RequiredField::Name => f.write_str("name"),
        }
    }
}

/// Validation errors raised when committing an event draft.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(RequiredField),
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(Coordinate),
    #[error("trip name cannot be empty")]
    EmptyTripName,
}

/// Resolves the event name: the typed name trimmed, or the location's name
/// when the typed one is blank.
pub fn resolve_event_name(typed: &str, location_name: Option<&str>) -> Result<String, ValidationError> {
    let typed = typed.trim();
    if !typed.is_empty() {
        return Ok(typed.to_string());
    }
    match location_name.map(str::trim) {
        Some(fallback) if !fallback.is_empty() => Ok(fallback.to_string()),
        _ => Err(ValidationError::MissingField(RequiredField::Name)),
    }
}

/// Validates a coordinate for persistence.
pub fn validate_coordinate(coordinate: Coordinate) -> Result<(), ValidationError> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinate(coordinate))
    }
}

/// Validates a trip name: must contain something other than whitespace.
pub fn validate_trip_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyTripName)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- resolve_event_name ---

    #[test]
    fn typed_name_wins() {
        assert_eq!(
            resolve_event_name("Dinner", Some("Café Lumen")),
            Ok("Dinner".to_string())
        );
    }

    #[test]
    fn empty_name_falls_back_to_location() {
        assert_eq!(
            resolve_event_name("", Some("Café Lumen")),
            Ok("Café Lumen".to_string())
        );
    }

    #[test]
    fn empty_name_without_location_name() {
        assert_eq!(
            resolve_event_name("", None),
            Err(ValidationError::MissingField(RequiredField::Name))
        );
    }

    #[test]
    fn empty_name_with_empty_location_name() {
        assert_eq!(
            resolve_event_name("", Some("")),
            Err(ValidationError::MissingField(RequiredField::Name))
        );
    }

    #[test]
    fn blank_name_falls_back_to_location() {
        assert_eq!(
            resolve_event_name("  ", Some("Café Lumen")),
            Ok("Café Lumen".to_string())
        );
    }

    #[test]
    fn blank_name_without_location_name() {
        assert_eq!(
            resolve_event_name(" \t", None),
            Err(ValidationError::MissingField(RequiredField::Name))
        );
    }

    #[test]
    fn typed_name_is_trimmed() {
        assert_eq!(
            resolve_event_name("  Dinner ", None),
            Ok("Dinner".to_string())
        );
    }

    #[quickcheck]
    fn non_blank_typed_name_is_kept(name: String, fallback: Option<String>) -> bool {
        if name.trim().is_empty() {
            return true;
        }
        resolve_event_name(&name, fallback.as_deref()) == Ok(name.trim().to_string())
    }

    // --- validate_coordinate ---

    #[test]
    fn valid_coordinate_accepted() {
        assert_eq!(validate_coordinate(Coordinate::new(48.86, 2.35)), Ok(()));
    }

    #[test]
    fn invalid_coordinate_rejected() {
        let c = Coordinate::new(123.0, 2.35);
        assert_eq!(
            validate_coordinate(c),
            Err(ValidationError::InvalidCoordinate(c))
        );
    }

    // --- validate_trip_name ---

    #[test]
    fn trip_name_accepted() {
        assert_eq!(validate_trip_name("Lisbon 2026"), Ok(()));
    }

    #[test]
    fn blank_trip_name_rejected() {
        assert_eq!(validate_trip_name("   "), Err(ValidationError::EmptyTripName));
        assert_eq!(validate_trip_name(""), Err(ValidationError::EmptyTripName));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ValidationError::MissingField(RequiredField::Location).to_string(),
            "location is required"
        );
        assert_eq!(
            ValidationError::MissingField(RequiredField::Name).to_string(),
            "name is required"
        );
    }
}
