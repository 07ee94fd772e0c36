//! Picker adapters: the exclusive input mechanisms for category and date fields.

use chrono::{Days, Months, NaiveDate};

use crate::model::EventCategory;

/// Label of picker row 0.
pub const UNSET_CATEGORY_LABEL: &str = "- Select Category -";

/// Which date field a date picker is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    /// The opposite date field.
    pub fn other(self) -> Self {
        match self {
            DateField::Start => DateField::End,
            DateField::End => DateField::Start,
        }
    }
}

/// Single-column picker over [`EventCategory::display_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPicker {
    row: usize,
    open: bool,
}

impl CategoryPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row labels; row 0 is the unset placeholder.
    pub fn rows() -> Vec<&'static str> {
        EventCategory::display_names()
            .iter()
            .map(|name| name.unwrap_or(UNSET_CATEGORY_LABEL))
            .collect()
    }

    pub fn row_count() -> usize {
        EventCategory::display_names().len()
    }

    /// The currently highlighted row.
    pub fn selected_row(&self) -> usize {
        self.row
    }

    /// Highlights `row`, clamped to the available rows.
    pub fn select_row(&mut self, row: usize) {
        self.row = row.min(Self::row_count().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.select_row(self.row + 1);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Calendar picker holding an underlying date value.
///
/// The value persists between openings, so a seeded value becomes the
/// starting point the next time the picker is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    date: NaiveDate,
    open: bool,
}

impl DatePicker {
    /// Creates a closed picker whose value defaults to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            open: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Replaces the underlying value without touching any field text.
    pub fn seed(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Moves the value by `days`; out-of-range results leave it unchanged.
    pub fn step_days(&mut self, days: i64) {
        let next = if days >= 0 {
            self.date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = next {
            self.date = date;
        }
    }

    /// Moves the value by `months`, clamping the day to the month's end.
    pub fn step_months(&mut self, months: i32) {
        let next = if months >= 0 {
            self.date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = next {
            self.date = date;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
