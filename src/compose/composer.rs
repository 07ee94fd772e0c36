//! One "add event" session, from open to save or cancel.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use super::constraints::FieldConstraintModel;
use super::location::{LocationCandidate, LocationSelectionBridge, SelectionUpdate};
use crate::geo::{EdgePadding, GeoRegion, Span};
use crate::model::{
    Event, NewEvent, RequiredField, Trip, TripId, ValidationError, resolve_event_name,
    validate_coordinate,
};

/// The persistence collaborator. Treated as infallible.
pub trait EventStore {
    /// Persists a new event and returns the durable entity.
    fn add_event(&mut self, new: NewEvent) -> Event;
}

/// Per-session settings taken from the app configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeConfig {
    pub date_format: String,
    pub selection_span: Span,
    pub search_padding: EdgePadding,
}

/// Where a session is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Saved,
    Cancelled,
}

/// What the session reports to its caller when it ends.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Saved(Event),
    Cancelled,
}

/// Why a commit did not happen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("composition session has already ended")]
    SessionEnded,
}

type CompletionFn = Box<dyn FnMut(&SessionOutcome)>;

/// Drives a composition session: owns the field model and the map bridge,
/// and turns the final draft into a persistence call.
pub struct EventDraftComposer {
    trip: TripId,
    fields: FieldConstraintModel,
    location: LocationSelectionBridge,
    state: SessionState,
    completion: Option<CompletionFn>,
}

impl EventDraftComposer {
    /// Starts a session for `trip`. The trip's existing events, if any,
    /// bias the location search.
    pub fn new(trip: &Trip, config: &ComposeConfig, today: NaiveDate) -> Self {
        let scope = trip.events_coordinate_region(config.search_padding);
        Self {
            trip: trip.id(),
            fields: FieldConstraintModel::new(today, config.date_format.clone()),
            location: LocationSelectionBridge::new(scope, config.selection_span),
            state: SessionState::Active,
            completion: None,
        }
    }

    /// Registers the callback that receives the session outcome.
    pub fn set_completion(&mut self, completion: impl FnMut(&SessionOutcome) + 'static) {
        self.completion = Some(Box::new(completion));
    }

    pub fn trip(&self) -> TripId {
        self.trip
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn fields(&self) -> &FieldConstraintModel {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldConstraintModel {
        &mut self.fields
    }

    pub fn location(&self) -> &LocationSelectionBridge {
        &self.location
    }

    /// Region hint for the location search.
    pub fn search_scope(&self) -> Option<&GeoRegion> {
        self.location.search_scope()
    }

    /// Applies a search selection to both the map and the draft fields.
    pub fn on_location_selected(&mut self, candidate: LocationCandidate) -> SelectionUpdate {
        let update = self.location.on_location_selected(candidate);
        self.fields.apply_location(update.field_update.clone());
        update
    }

    /// Validates the draft and hands it to `store`.
    ///
    /// A missing location, unresolvable name or invalid coordinate fails
    /// without calling the store and leaves the session active, so the
    /// caller chooses whether to keep the form open.
    pub fn commit<S: EventStore + ?Sized>(&mut self, store: &mut S) -> Result<Event, CommitError> {
        if !self.is_active() {
            return Err(CommitError::SessionEnded);
        }
        let new = match self.validated_event() {
            Ok(new) => new,
            Err(e) => {
                warn!(trip = %self.trip, error = %e, "event draft rejected");
                return Err(e.into());
            }
        };

        let event = store.add_event(new);
        info!(trip = %self.trip, event = %event.id, name = %event.name, "event added");
        self.finish(SessionOutcome::Saved(event.clone()));
        Ok(event)
    }

    /// Ends the session without saving. No-op once the session has ended.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.finish(SessionOutcome::Cancelled);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.state = match outcome {
            SessionOutcome::Saved(_) => SessionState::Saved,
            SessionOutcome::Cancelled => SessionState::Cancelled,
        };
        if let Some(completion) = self.completion.as_mut() {
            completion(&outcome);
        }
    }

    fn validated_event(&self) -> Result<NewEvent, ValidationError> {
        let draft = self.fields.draft();
        let location = draft
            .selected_location
            .as_ref()
            .ok_or(ValidationError::MissingField(RequiredField::Location))?;
        let name = resolve_event_name(&draft.name, location.name.as_deref())?;
        validate_coordinate(location.coordinate)?;

        Ok(NewEvent {
            name,
            description: None,
            category: draft.category,
            coordinate: location.coordinate,
            address: location.address.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            notes: (!draft.notes.is_empty()).then(|| draft.notes.clone()),
            trip: self.trip,
        })
    }
}

#[mutants::skip]
impl fmt::Debug for EventDraftComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDraftComposer")
            .field("trip", &self.trip)
            .field("fields", &self.fields)
            .field("location", &self.location)
            .field("state", &self.state)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::compose::field::{FieldId, TextEdit};
    use crate::compose::location::DEFAULT_SELECTION_SPAN;
    use crate::compose::picker::DateField;
    use crate::model::{Coordinate, EventCategory, EventId};

    /// Records every call; returns sequential ids.
    #[derive(Default)]
    struct RecordingStore {
        added: Vec<NewEvent>,
    }

    impl EventStore for RecordingStore {
        fn add_event(&mut self, new: NewEvent) -> Event {
            self.added.push(new.clone());
            Event::from_new(EventId(self.added.len() as u64), new)
        }
    }

    fn config() -> ComposeConfig {
        ComposeConfig {
            date_format: "%b %-d, %Y".to_string(),
            selection_span: DEFAULT_SELECTION_SPAN,
            search_padding: EdgePadding::uniform(1000.0),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn trip() -> Trip {
        Trip::new(TripId(9), "Paris".to_string()).unwrap()
    }

    fn composer() -> EventDraftComposer {
        EventDraftComposer::new(&trip(), &config(), today())
    }

    fn cafe() -> LocationCandidate {
        LocationCandidate {
            name: Some("Café Lumen".to_string()),
            coordinate: Coordinate::new(48.86, 2.35),
            formatted_address: Some("3 Rue Lumen, Paris".to_string()),
        }
    }

    fn type_name(c: &mut EventDraftComposer, s: &str) {
        for ch in s.chars() {
            c.fields_mut().try_edit(FieldId::Name, TextEdit::Insert(ch));
        }
    }

    #[test]
    fn missing_location_fails_without_calling_store() {
        let mut c = composer();
        type_name(&mut c, "Dinner");
        let mut store = RecordingStore::default();
        let result = c.commit(&mut store);
        assert_eq!(
            result,
            Err(CommitError::Validation(ValidationError::MissingField(
                RequiredField::Location
            )))
        );
        assert!(store.added.is_empty());
        assert!(c.is_active());
    }

    #[test]
    fn empty_name_falls_back_to_location_name() {
        let mut c = composer();
        c.on_location_selected(cafe());
        let mut store = RecordingStore::default();
        let event = c.commit(&mut store).unwrap();
        assert_eq!(event.name, "Café Lumen");
        assert_eq!(event.coordinate, Coordinate::new(48.86, 2.35));
        assert_eq!(event.trip, TripId(9));
    }

    #[test]
    fn blank_name_falls_back_to_location_name() {
        let mut c = composer();
        c.on_location_selected(cafe());
        type_name(&mut c, "   ");
        let mut store = RecordingStore::default();
        let event = c.commit(&mut store).unwrap();
        assert_eq!(event.name, "Café Lumen");
    }

    #[test]
    fn unnamed_location_and_empty_name_fails() {
        let mut c = composer();
        c.on_location_selected(LocationCandidate {
            name: None,
            ..cafe()
        });
        let mut store = RecordingStore::default();
        assert_eq!(
            c.commit(&mut store),
            Err(CommitError::Validation(ValidationError::MissingField(
                RequiredField::Name
            )))
        );
        assert!(store.added.is_empty());
    }

    #[test]
    fn invalid_coordinate_fails() {
        let mut c = composer();
        type_name(&mut c, "Nowhere");
        c.on_location_selected(LocationCandidate {
            coordinate: Coordinate::new(f64::NAN, 0.0),
            ..cafe()
        });
        let mut store = RecordingStore::default();
        assert!(matches!(
            c.commit(&mut store),
            Err(CommitError::Validation(ValidationError::InvalidCoordinate(_)))
        ));
        assert!(store.added.is_empty());
    }

    #[test]
    fn full_draft_is_handed_to_store() {
        let mut c = composer();
        type_name(&mut c, "Dinner");
        c.on_location_selected(cafe());
        c.fields_mut().on_category_confirmed(1);
        let start = NaiveDate::from_ymd_opt(2026, 11, 3).unwrap();
        c.fields_mut().on_date_confirmed(DateField::Start, start);
        c.fields_mut().confirm_date_picker(DateField::End);
        c.fields_mut().on_notes_changed("window seat".to_string());

        let mut store = RecordingStore::default();
        c.commit(&mut store).unwrap();

        assert_eq!(
            store.added,
            vec![NewEvent {
                name: "Dinner".to_string(),
                description: None,
                category: Some(EventCategory::Food),
                coordinate: Coordinate::new(48.86, 2.35),
                address: Some("3 Rue Lumen, Paris".to_string()),
                start_date: Some(start),
                end_date: Some(start),
                notes: Some("window seat".to_string()),
                trip: TripId(9),
            }]
        );
    }

    #[test]
    fn empty_notes_are_none() {
        let mut c = composer();
        c.on_location_selected(cafe());
        let mut store = RecordingStore::default();
        let event = c.commit(&mut store).unwrap();
        assert_eq!(event.notes, None);
    }

    #[test]
    fn selection_updates_map_and_field() {
        let mut c = composer();
        let update = c.on_location_selected(cafe());
        assert_eq!(c.location().map().annotations().len(), 1);
        assert_eq!(c.fields().field(FieldId::Location).text(), "Café Lumen");
        assert_eq!(update.region.span, DEFAULT_SELECTION_SPAN);
    }

    #[test]
    fn commit_ends_session_and_notifies() {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcomes);
        let mut c = composer();
        c.set_completion(move |o| sink.borrow_mut().push(o.clone()));
        c.on_location_selected(cafe());

        let mut store = RecordingStore::default();
        let event = c.commit(&mut store).unwrap();

        assert_eq!(c.state(), SessionState::Saved);
        assert_eq!(*outcomes.borrow(), vec![SessionOutcome::Saved(event)]);
        assert_eq!(c.commit(&mut store), Err(CommitError::SessionEnded));
        assert_eq!(store.added.len(), 1);
    }

    #[test]
    fn failed_commit_does_not_notify() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut c = composer();
        c.set_completion(move |_| *sink.borrow_mut() += 1);
        let mut store = RecordingStore::default();
        assert!(c.commit(&mut store).is_err());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn cancel_notifies_once() {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&outcomes);
        let mut c = composer();
        c.set_completion(move |o| sink.borrow_mut().push(o.clone()));
        c.cancel();
        c.cancel();
        assert_eq!(c.state(), SessionState::Cancelled);
        assert_eq!(*outcomes.borrow(), vec![SessionOutcome::Cancelled]);
    }

    #[test]
    fn cancelled_session_rejects_commit() {
        let mut c = composer();
        c.on_location_selected(cafe());
        c.cancel();
        let mut store = RecordingStore::default();
        assert_eq!(c.commit(&mut store), Err(CommitError::SessionEnded));
        assert!(store.added.is_empty());
    }

    #[test]
    fn empty_trip_has_no_search_scope() {
        assert_eq!(composer().search_scope(), None);
    }

    #[test]
    fn trip_with_events_scopes_search() {
        let mut t = trip();
        t.push_event(Event::from_new(
            EventId(1),
            NewEvent {
                name: "Louvre".to_string(),
                description: None,
                category: None,
                coordinate: Coordinate::new(48.8606, 2.3376),
                address: None,
                start_date: None,
                end_date: None,
                notes: None,
                trip: TripId(9),
            },
        ));
        let c = EventDraftComposer::new(&t, &config(), today());
        let scope = c.search_scope().unwrap();
        assert!(scope.contains(&Coordinate::new(48.8606, 2.3376)));
    }
}
