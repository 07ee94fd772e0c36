//! Status bar widget: persistent one-line trip context display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::compose::format_date;
use crate::model::Trip;

/// Data passed to the status bar widget; decoupled from `Trip` so screens
/// can render it without holding a borrow of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Name of the open trip.
    pub trip_name: String,
    /// Number of events in the trip.
    pub event_count: usize,
    /// Earliest and latest event dates, already formatted.
    pub dates: Option<(String, String)>,
}

impl StatusBarContext {
    pub fn from_trip(trip: &Trip, date_format: &str) -> Self {
        let dates = trip.date_range().map(|(first, last)| {
            (
                format_date(first, date_format),
                format_date(last, date_format),
            )
        });
        Self {
            trip_name: trip.name().to_string(),
            event_count: trip.events().len(),
            dates,
        }
    }
}

/// Renders a one-line status bar showing the open trip.
///
/// Display format (left-aligned, Cyan):
/// - With dates:    `Lisbon  3 events  Jun 1, 2026 to Jun 4, 2026`
/// - Without dates: `Lisbon  1 event`
///
/// Renders nothing if `ctx.trip_name` is empty (no open trip).
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    if ctx.trip_name.is_empty() {
        return;
    }

    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let noun = if ctx.event_count == 1 { "event" } else { "events" };
    let mut spans = vec![
        Span::styled(ctx.trip_name.clone(), cyan),
        Span::styled("  ", cyan),
        Span::styled(format!("{} {noun}", ctx.event_count), cyan),
    ];
    if let Some((first, last)) = &ctx.dates {
        spans.push(Span::styled("  ", cyan));
        if first == last {
            spans.push(Span::styled(first.clone(), green));
        } else {
            spans.push(Span::styled(format!("{first} to {last}"), green));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
