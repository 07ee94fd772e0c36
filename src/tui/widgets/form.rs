//! Form widget for the event draft fields.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::compose::{DraftField, FieldConstraintModel, FieldId, InputMode};

/// Height of one field row, borders included.
pub const ROW_HEIGHT: u16 = 3;

/// Title shown on a field's border. Required fields carry a `*`.
pub fn field_title(id: FieldId) -> String {
    match id {
        FieldId::Name | FieldId::Location => format!("{} *", id.label()),
        _ => id.label().to_string(),
    }
}

/// The row's body: the field text, or its placeholder dimmed.
fn field_line(field: &DraftField, focused: bool) -> Line<'_> {
    let mut spans = if field.is_empty() {
        vec![Span::styled(field.display(), Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::raw(field.text())]
    };
    match field.mode() {
        InputMode::FreeText if focused => spans.push(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        )),
        InputMode::ExclusivePicker => {
            spans.push(Span::styled("  \u{25be}", Style::default().fg(Color::DarkGray)));
        }
        InputMode::FreeText => {}
    }
    Line::from(spans)
}

/// Renders every draft field as a bordered row within `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(model: &FieldConstraintModel, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = model
        .fields()
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (field, row) in model.fields().iter().zip(rows.iter()) {
        let focused = field.id() == model.focused();
        let border_color = if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(field_title(field.id()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        frame.render_widget(Paragraph::new(field_line(field, focused)).block(block), *row);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::compose::TextEdit;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn model() -> FieldConstraintModel {
        FieldConstraintModel::new(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), "%Y-%m-%d")
    }

    fn render(model: &FieldConstraintModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 18)).unwrap();
        terminal
            .draw(|frame| draw_form(model, frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn required_fields_are_marked() {
        assert_eq!(field_title(FieldId::Name), "Event Name *");
        assert!(field_title(FieldId::Location).ends_with('*'));
        assert!(!field_title(FieldId::Notes).ends_with('*'));
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let output = render(&model());
        for placeholder in ["Add an event name", "Add a location", "Select category", "Add notes"] {
            assert!(output.contains(placeholder), "missing {placeholder:?}");
        }
    }

    #[test]
    fn typed_text_replaces_placeholder() {
        let mut m = model();
        for ch in "Tea".chars() {
            m.try_edit(FieldId::Name, TextEdit::Insert(ch));
        }
        let output = render(&m);
        assert!(output.contains("Tea"));
        assert!(!output.contains("Add an event name"));
    }

    #[test]
    fn confirmed_date_is_shown() {
        let mut m = model();
        m.on_date_confirmed(
            crate::compose::DateField::Start,
            NaiveDate::from_ymd_opt(2026, 6, 3).unwrap(),
        );
        assert!(render(&m).contains("2026-06-03"));
    }
}
