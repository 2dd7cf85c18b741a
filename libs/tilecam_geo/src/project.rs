//! Web-Mercator forward and inverse projection
//!
//! All functions take a `world_size`, the pixel span of the whole world
//! at the zoom of interest. Pixel `(0, 0)` is the north-west corner of
//! the world (`-180°`, `~85.05°`); `y` grows southwards.
//!
//! *Learn more [here](https://en.wikipedia.org/wiki/Web_Mercator_projection?useskin=vector).*

use std::f64::consts::PI;

use crate::{LngLat, Point};

/// Longitude to absolute x pixel.
#[inline]
pub fn lng_x(lng: f64, world_size: f64) -> f64 {
    (180.0 + lng) * world_size / 360.0
}

/// Latitude to absolute y pixel.
#[inline]
pub fn lat_y(lat: f64, world_size: f64) -> f64 {
    let y = 180.0 / PI * (PI / 4.0 + lat * PI / 360.0).tan().ln();
    (180.0 - y) * world_size / 360.0
}

/// Absolute x pixel to longitude, the exact inverse of [lng_x].
#[inline]
pub fn x_lng(x: f64, world_size: f64) -> f64 {
    x * 360.0 / world_size - 180.0
}

/// Absolute y pixel to latitude, the exact inverse of [lat_y].
#[inline]
pub fn y_lat(y: f64, world_size: f64) -> f64 {
    let y2 = 180.0 - y * 360.0 / world_size;
    360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0
}

/// Projects a geographic position into absolute world pixels.
pub fn project(lnglat: LngLat, world_size: f64) -> Point {
    Point::new(lng_x(lnglat.lng, world_size), lat_y(lnglat.lat, world_size))
}

/// Converts absolute world pixels back into a geographic position.
pub fn unproject(point: Point, world_size: f64) -> LngLat {
    LngLat::new(x_lng(point.x(), world_size), y_lat(point.y(), world_size))
}

/// Linear magnification of `zoom` relative to zoom 0.
#[inline]
pub fn zoom_scale(zoom: f64) -> f64 {
    zoom.exp2()
}

/// Zoom offset that produces the magnification `scale`.
#[inline]
pub fn scale_zoom(scale: f64) -> f64 {
    scale.log2()
}
