//! Field dependency rules for an event draft.

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::draft::EventDraft;
use super::field::{DraftField, EditOutcome, FieldId, TextEdit};
use super::location::LocationFieldUpdate;
use super::picker::{CategoryPicker, DateField, DatePicker};
use crate::model::EventCategory;

/// Fallback when the configured date format cannot be rendered.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Tracks the draft's field values and derives save state, date seeding, and
/// which fields may be typed into.
#[derive(Debug, Clone)]
pub struct FieldConstraintModel {
    draft: EventDraft,
    fields: Vec<DraftField>,
    focus: usize,
    category_picker: CategoryPicker,
    start_picker: DatePicker,
    end_picker: DatePicker,
    date_format: String,
}

impl FieldConstraintModel {
    /// Creates an empty draft. Date pickers start at `today`.
    pub fn new(today: NaiveDate, date_format: impl Into<String>) -> Self {
        Self {
            draft: EventDraft::default(),
            fields: FieldId::all().iter().map(|&id| DraftField::new(id)).collect(),
            focus: 0,
            category_picker: CategoryPicker::new(),
            start_picker: DatePicker::new(today),
            end_picker: DatePicker::new(today),
            date_format: date_format.into(),
        }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> &DraftField {
        &self.fields[id.index()]
    }

    fn field_mut(&mut self, id: FieldId) -> &mut DraftField {
        &mut self.fields[id.index()]
    }

    /// The focused field.
    pub fn focused(&self) -> FieldId {
        FieldId::all()[self.focus]
    }

    pub fn set_focus(&mut self, id: FieldId) {
        self.focus = id.index();
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// `true` iff the name field holds something other than whitespace.
    ///
    /// A missing location does not disable saving; it is rejected at commit.
    pub fn save_enabled(&self) -> bool {
        !self.draft.name.trim().is_empty()
    }

    /// Attempts a typed edit on `id`. Picker-bound fields reject all edits.
    pub fn try_edit(&mut self, id: FieldId, edit: TextEdit) -> EditOutcome {
        let outcome = self.field_mut(id).apply(edit);
        if outcome == EditOutcome::Rejected {
            trace!(field = ?id, "typed edit rejected on picker field");
            return outcome;
        }
        let text = self.field(id).text().to_string();
        match id {
            FieldId::Name => self.on_name_changed(text),
            FieldId::Notes => self.on_notes_changed(text),
            _ => {}
        }
        outcome
    }

    /// Replaces the event name.
    pub fn on_name_changed(&mut self, text: String) {
        self.field_mut(FieldId::Name).text = text.clone();
        self.draft.name = text;
    }

    /// Replaces the notes.
    pub fn on_notes_changed(&mut self, text: String) {
        self.field_mut(FieldId::Notes).text = text.clone();
        self.draft.notes = text;
    }

    /// Applies a category chosen by picker row. Row 0 or an unknown row
    /// clears the category.
    pub fn on_category_confirmed(&mut self, row: usize) {
        let category = EventCategory::from_row(row);
        self.draft.category = category;
        self.field_mut(FieldId::Category).text = category
            .map(|c| c.display_name().to_string())
            .unwrap_or_default();
        self.category_picker.select_row(row);
        self.category_picker.close();
        debug!(row, ?category, "category confirmed");
    }

    /// Confirms the category picker's highlighted row.
    pub fn confirm_category_picker(&mut self) {
        self.on_category_confirmed(self.category_picker.selected_row());
    }

    /// Applies a confirmed date to `which`.
    ///
    /// If the other date field has no text yet, its picker is seeded with
    /// `date` (its text stays empty).
    pub fn on_date_confirmed(&mut self, which: DateField, date: NaiveDate) {
        let text = self.format_date(date);
        self.field_mut(date_field_id(which)).text = text;
        match which {
            DateField::Start => self.draft.start_date = Some(date),
            DateField::End => self.draft.end_date = Some(date),
        }
        let other = which.other();
        if self.field(date_field_id(other)).is_empty() {
            self.date_picker_mut(other).seed(date);
        }
        self.date_picker_mut(which).seed(date);
        self.date_picker_mut(which).close();
        debug!(?which, %date, "date confirmed");
    }

    /// Confirms the picker bound to `which` with its current value.
    pub fn confirm_date_picker(&mut self, which: DateField) {
        let date = self.date_picker(which).date();
        self.on_date_confirmed(which, date);
    }

    /// Fills the location field from a search selection.
    pub fn apply_location(&mut self, update: LocationFieldUpdate) {
        self.field_mut(FieldId::Location).text = update.display_text;
        self.draft.selected_location = Some(update.location);
    }

    /// Opens the picker bound to `id`. Returns `false` for fields without an
    /// inline picker (free-text fields and the location search).
    pub fn open_picker(&mut self, id: FieldId) -> bool {
        self.close_pickers();
        match id {
            FieldId::Category => {
                let row = self.draft.category.map_or(0, |c| c.row());
                self.category_picker.select_row(row);
                self.category_picker.open();
                true
            }
            FieldId::StartDate => {
                self.start_picker.open();
                true
            }
            FieldId::EndDate => {
                self.end_picker.open();
                true
            }
            FieldId::Name | FieldId::Location | FieldId::Notes => false,
        }
    }

    /// Closes any open picker without applying its value.
    pub fn close_pickers(&mut self) {
        self.category_picker.close();
        self.start_picker.close();
        self.end_picker.close();
    }

    /// The field whose picker is currently open, if any.
    pub fn active_picker(&self) -> Option<FieldId> {
        if self.category_picker.is_open() {
            Some(FieldId::Category)
        } else if self.start_picker.is_open() {
            Some(FieldId::StartDate)
        } else if self.end_picker.is_open() {
            Some(FieldId::EndDate)
        } else {
            None
        }
    }

    pub fn category_picker(&self) -> &CategoryPicker {
        &self.category_picker
    }

    pub fn category_picker_mut(&mut self) -> &mut CategoryPicker {
        &mut self.category_picker
    }

    pub fn date_picker(&self, which: DateField) -> &DatePicker {
        match which {
            DateField::Start => &self.start_picker,
            DateField::End => &self.end_picker,
        }
    }

    pub fn date_picker_mut(&mut self, which: DateField) -> &mut DatePicker {
        match which {
            DateField::Start => &mut self.start_picker,
            DateField::End => &mut self.end_picker,
        }
    }

    /// Formats `date` with the configured pattern, falling back to ISO 8601
    /// when the pattern cannot be rendered.
    pub fn format_date(&self, date: NaiveDate) -> String {
        format_date(date, &self.date_format)
    }
}

/// Formats `date` with `pattern`, or as ISO 8601 if `pattern` is unusable.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(ISO_DATE_FORMAT));
    }
    out
}

/// The field a date picker writes to.
pub fn date_field_id(which: DateField) -> FieldId {
    match which {
        DateField::Start => FieldId::StartDate,
        DateField::End => FieldId::EndDate,
    }
}
