use std::f64::consts::PI;

use crate::model::Coordinate;

/// Width and height of the projected world, in map points.
pub const WORLD_SIZE: f64 = 268_435_456.0;

/// Latitude limit of the square Web-Mercator world.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A point on the flat Web-Mercator plane. Origin is the top-left
/// (north-west) corner; `y` grows southwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    /// Projects a coordinate onto the map plane.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        let lat = coordinate.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin_lat = lat.to_radians().sin();
        let x = (coordinate.longitude + 180.0) / 360.0 * WORLD_SIZE;
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * WORLD_SIZE;
        Self { x, y }
    }

    /// Inverse projection back to degrees.
    pub fn to_coordinate(self) -> Coordinate {
        let longitude = self.x / WORLD_SIZE * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * self.y / WORLD_SIZE);
        let latitude = n.sinh().atan().to_degrees();
        Coordinate::new(latitude, longitude)
    }
}

/// Padding added around a fitted rectangle, in map points per side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgePadding {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgePadding {
    /// The same padding on all four sides.
    pub const fn uniform(points: f64) -> Self {
        Self {
            top: points,
            left: points,
            bottom: points,
            right: points,
        }
    }
}

/// An axis-aligned rectangle on the map plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MapRect {
    /// A `size` x `size` rectangle centred on `point`.
    pub fn centered_on(point: MapPoint, size: f64) -> Self {
        Self {
            x: point.x - size / 2.0,
            y: point.y - size / 2.0,
            width: size,
            height: size,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &MapRect) -> MapRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        MapRect {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    /// Grows the rectangle outward by `padding` on each side.
    pub fn padded(&self, padding: EdgePadding) -> MapRect {
        MapRect {
            x: self.x - padding.left,
            y: self.y - padding.top,
            width: self.width + padding.left + padding.right,
            height: self.height + padding.top + padding.bottom,
        }
    }

    /// Returns `true` if `point` lies inside or on the edge of the rectangle.
    pub fn contains(&self, point: MapPoint) -> bool {
        (self.x..=self.max_x()).contains(&point.x) && (self.y..=self.max_y()).contains(&point.y)
    }
}
