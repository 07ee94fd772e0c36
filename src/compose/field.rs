//! Draft form fields and their interaction modes.

/// The fields of an event draft, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Location,
    Category,
    StartDate,
    EndDate,
    Notes,
}

static ALL_FIELDS: &[FieldId] = &[
    FieldId::Name,
    FieldId::Location,
    FieldId::Category,
    FieldId::StartDate,
    FieldId::EndDate,
    FieldId::Notes,
];

impl FieldId {
    /// Returns all fields in display order.
    pub fn all() -> &'static [FieldId] {
        ALL_FIELDS
    }

    /// Position of this field in [`FieldId::all`].
    pub fn index(self) -> usize {
        ALL_FIELDS.iter().position(|&f| f == self).unwrap_or(0)
    }

    /// Row title shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Event Name",
            FieldId::Location => "Location",
            FieldId::Category => "Category",
            FieldId::StartDate => "Start Date",
            FieldId::EndDate => "End Date",
            FieldId::Notes => "Notes",
        }
    }

    /// Text shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "Add an event name",
            FieldId::Location => "Add a location",
            FieldId::Category => "Select category",
            FieldId::StartDate => "Add a start date",
            FieldId::EndDate => "Add an end date",
            FieldId::Notes => "Add notes",
        }
    }

    /// Whether the field takes typed text or only a bound picker's value.
    pub fn input_mode(self) -> InputMode {
        match self {
            FieldId::Name | FieldId::Notes => InputMode::FreeText,
            FieldId::Location | FieldId::Category | FieldId::StartDate | FieldId::EndDate => {
                InputMode::ExclusivePicker
            }
        }
    }
}

/// How a field accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Characters typed by the user go straight into the field.
    FreeText,
    /// Only the bound picker (or search modal) may change the value.
    ExclusivePicker,
}

/// A character-level edit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
}

/// Result of an edit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected,
}

/// One field's visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub(crate) id: FieldId,
    pub(crate) text: String,
    pub(crate) mode: InputMode,
}

impl DraftField {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            text: String::new(),
            mode: id.input_mode(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The field's own text (empty when unset).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text to render: the value, or the placeholder when empty.
    pub fn display(&self) -> &str {
        if self.text.is_empty() {
            self.id.placeholder()
        } else {
            &self.text
        }
    }

    /// Applies a typed edit. Fields with a bound picker reject every edit.
    pub(crate) fn apply(&mut self, edit: TextEdit) -> EditOutcome {
        if self.mode == InputMode::ExclusivePicker {
            return EditOutcome::Rejected;
        }
        match edit {
            TextEdit::Insert(ch) => self.text.push(ch),
            TextEdit::Backspace => {
                self.text.pop();
            }
        }
        EditOutcome::Applied
    }
}
