use crate::model::Coordinate;

use super::projection::{EdgePadding, MapPoint, MapRect};
use super::region::{GeoRegion, Span};

/// Side length, in map points, of the rectangle placed around each point.
pub const POINT_RECT_SIZE: f64 = 0.01;

/// Computes the smallest region covering every coordinate, grown by
/// `padding` on each side.
///
/// Each coordinate is projected onto the map plane and wrapped in a
/// [`POINT_RECT_SIZE`] square; the union of those squares is padded and
/// converted back to degrees. A single coordinate yields a small region
/// centred on it. An empty input yields `None`.
///
/// Latitudes past the Mercator limit project onto the world's edge, so the
/// latitude bounds are widened afterwards to cover the raw inputs.
///
/// Longitudes are not wrapped: points on both sides of the 180° meridian
/// produce a region spanning almost the whole world.
pub fn fit<'a, I>(coordinates: I, padding: EdgePadding) -> Option<GeoRegion>
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    let (rect, south, north) = coordinates
        .into_iter()
        .map(|c| {
            let rect = MapRect::centered_on(MapPoint::from_coordinate(*c), POINT_RECT_SIZE);
            (rect, c.latitude, c.latitude)
        })
        .reduce(|(acc, south, north), (r, lat, _)| {
            (acc.union(&r), south.min(lat), north.max(lat))
        })?;
    let region = GeoRegion::from_map_rect(&rect.padded(padding));
    Some(cover_latitudes(region, south, north))
}

fn cover_latitudes(region: GeoRegion, south: f64, north: f64) -> GeoRegion {
    if south >= region.south() && north <= region.north() {
        return region;
    }
    let south = south.min(region.south());
    let north = north.max(region.north());
    let center = Coordinate::new((north + south) / 2.0, region.center.longitude);
    GeoRegion::new(center, Span::new(north - south, region.span.longitude_delta))
}

/// A region of constant `span` centred on `center`, independent of any
/// previous viewport. Used to frame a single fresh selection.
pub fn fixed_span_region(center: Coordinate, span: Span) -> GeoRegion {
    GeoRegion::new(center, span)
}
