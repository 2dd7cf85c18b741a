#![doc = include_str!("../docs/geo.md")]

/// Latitude bound of the square Web-Mercator world, in degrees.
pub const MAX_MERCATOR_LAT: f64 = 85.05113;

/// Default raster/vector tile edge, in pixels.
pub const DEFAULT_TILE_SIZE: f64 = 512.0;

#[doc(hidden)]
pub mod coord;
pub mod project;


#[doc(inline)]
pub use coord::coordinate::Coordinate;
#[doc(inline)]
pub use coord::lnglat::LngLat;
#[doc(inline)]
pub use project::{project, unproject, scale_zoom, zoom_scale};

/// Screen and world-pixel positions.
pub type Point = geo::Point<f64>;
