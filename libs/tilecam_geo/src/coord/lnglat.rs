use std::fmt::{Display, Formatter};

/// A geographic position in degrees.
///
/// Longitude is left unrestricted so that positions east or west of
/// the antimeridian keep their world copy; use [LngLat::wrap] to
/// bring it back into the canonical range.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the same position with longitude normalised into `[-180, 180)`.
    ///
    /// ```rust
    /// use tilecam_geo::LngLat;
    ///
    /// let wrapped = LngLat::new(190.0, 10.0).wrap();
    /// assert_eq!(wrapped, LngLat::new(-170.0, 10.0));
    /// ```
    pub fn wrap(&self) -> Self {
        Self {
            lng: (self.lng + 180.0).rem_euclid(360.0) - 180.0,
            lat: self.lat,
        }
    }
}

impl From<geo::Point<f64>> for LngLat {
    fn from(value: geo::Point<f64>) -> Self {
        let (lng, lat) = value.x_y();
        LngLat { lng, lat }
    }
}

impl From<LngLat> for geo::Point<f64> {
    fn from(value: LngLat) -> Self {
        geo::Point::new(value.lng, value.lat)
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        LngLat { lng, lat }
    }
}

impl Display for LngLat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LngLat({}, {})", self.lng, self.lat)
    }
}
