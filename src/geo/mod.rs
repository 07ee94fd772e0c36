//! Map geometry: Web-Mercator projection, regions, and viewport fitting.

mod fit;
mod projection;
mod region;

pub use fit::{POINT_RECT_SIZE, fit, fixed_span_region};
pub use projection::{EdgePadding, MapPoint, MapRect, WORLD_SIZE};
pub use region::{GeoRegion, Span};
