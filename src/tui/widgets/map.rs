//! Map widget: world outline plus annotation pins on a braille canvas.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};

use crate::compose::MapState;
use crate::geo::GeoRegion;

/// Canvas bounds in degrees: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub const WORLD: Viewport = Viewport {
        x: [-180.0, 180.0],
        y: [-90.0, 90.0],
    };

    /// The bounds for `region`, widened to at least `min_span` degrees.
    /// No region shows the whole world.
    pub fn for_region(region: Option<&GeoRegion>, min_span: f64) -> Self {
        match region {
            Some(region) => {
                let r = region.with_min_span(min_span);
                Viewport {
                    x: [r.west(), r.east()],
                    y: [r.south(), r.north()],
                }
            }
            None => Self::WORLD,
        }
    }

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.x[0]..=self.x[1]).contains(&longitude) && (self.y[0]..=self.y[1]).contains(&latitude)
    }
}

/// Renders `map` in `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_map(map: &MapState, min_span: f64, title: &str, frame: &mut Frame, area: Rect) {
    let viewport = Viewport::for_region(map.region(), min_span);
    let pins: Vec<(f64, f64)> = map
        .annotations()
        .iter()
        .map(|a| (a.coordinate.longitude, a.coordinate.latitude))
        .collect();
    let labels: Vec<(f64, f64, String)> = map
        .annotations()
        .iter()
        .filter(|a| !a.title.is_empty())
        .map(|a| (a.coordinate.longitude, a.coordinate.latitude, a.title.clone()))
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds(viewport.x)
        .y_bounds(viewport.y)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &pins,
                color: Color::Yellow,
            });
            for (x, y, label) in &labels {
                ctx.print(
                    *x,
                    *y,
                    Line::from(Span::styled(
                        format!(" {label}"),
                        Style::default().fg(Color::Yellow),
                    )),
                );
            }
        });
    frame.render_widget(canvas, area);
}
