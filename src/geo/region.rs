use crate::model::Coordinate;

use super::projection::{MapPoint, MapRect};

/// Extent of a [`GeoRegion`] in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Span {
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }
}

/// A map viewport described by a center and a span. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRegion {
    pub center: Coordinate,
    pub span: Span,
}

impl GeoRegion {
    pub const fn new(center: Coordinate, span: Span) -> Self {
        Self { center, span }
    }

    /// Converts a projected rectangle back into a region whose latitude and
    /// longitude bounds are exactly the rectangle's corners.
    pub fn from_map_rect(rect: &MapRect) -> Self {
        let north_west = MapPoint {
            x: rect.x,
            y: rect.y,
        }
        .to_coordinate();
        let south_east = MapPoint {
            x: rect.max_x(),
            y: rect.max_y(),
        }
        .to_coordinate();

        let center = Coordinate::new(
            (north_west.latitude + south_east.latitude) / 2.0,
            (north_west.longitude + south_east.longitude) / 2.0,
        );
        let span = Span::new(
            north_west.latitude - south_east.latitude,
            south_east.longitude - north_west.longitude,
        );
        Self { center, span }
    }

    /// Southern latitude bound.
    pub fn south(&self) -> f64 {
        self.center.latitude - self.span.latitude_delta / 2.0
    }

    /// Northern latitude bound.
    pub fn north(&self) -> f64 {
        self.center.latitude + self.span.latitude_delta / 2.0
    }

    /// Western longitude bound.
    pub fn west(&self) -> f64 {
        self.center.longitude - self.span.longitude_delta / 2.0
    }

    /// Eastern longitude bound.
    pub fn east(&self) -> f64 {
        self.center.longitude + self.span.longitude_delta / 2.0
    }

    /// Returns `true` if `coordinate` falls inside the region (edges included).
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        const EPS: f64 = 1e-9;
        coordinate.latitude >= self.south() - EPS
            && coordinate.latitude <= self.north() + EPS
            && coordinate.longitude >= self.west() - EPS
            && coordinate.longitude <= self.east() + EPS
    }

    /// Returns a copy widened so that neither delta is below `min_delta`.
    pub fn with_min_span(&self, min_delta: f64) -> Self {
        Self {
            center: self.center,
            span: Span::new(
                self.span.latitude_delta.max(min_delta),
                self.span.longitude_delta.max(min_delta),
            ),
        }
    }
}
