//! Event composition: draft fields, pickers, map synchronization, commit.

mod composer;
mod constraints;
mod draft;
mod field;
mod location;
mod picker;

pub use composer::{
    CommitError, ComposeConfig, EventDraftComposer, EventStore, SessionOutcome, SessionState,
};
pub use constraints::{FieldConstraintModel, date_field_id, format_date};
pub use draft::{EventDraft, SelectedLocation};
pub use field::{DraftField, EditOutcome, FieldId, InputMode, TextEdit};
pub use location::{
    Annotation, DEFAULT_SELECTION_SPAN, LocationCandidate, LocationFieldUpdate,
    LocationSelectionBridge, MapState, SelectionUpdate,
};
pub use picker::{CategoryPicker, DateField, DatePicker, UNSET_CATEGORY_LABEL};
