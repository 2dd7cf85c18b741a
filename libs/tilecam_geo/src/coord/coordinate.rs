use std::fmt::{Display, Formatter};

/// A fractional position in tile space.
///
/// At a given `zoom` the world spans `[0, 2^zoom)` on both axes, so the
/// integer part of `column`/`row` names a tile and the fraction is the
/// offset inside it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinate {
    pub column: f64,
    pub row: f64,
    pub zoom: f64,
}

impl Coordinate {
    pub const fn new(column: f64, row: f64, zoom: f64) -> Self {
        Self { column, row, zoom }
    }

    /// Re-expresses the same position at another zoom level.
    ///
    /// ```rust
    /// use tilecam_geo::Coordinate;
    ///
    /// let coord = Coordinate::new(1.5, 0.5, 1.0).zoom_to(3.0);
    /// assert_eq!(coord, Coordinate::new(6.0, 2.0, 3.0));
    /// ```
    pub fn zoom_to(&self, zoom: f64) -> Self {
        let scale = (zoom - self.zoom).exp2();
        Self {
            column: self.column * scale,
            row: self.row * scale,
            zoom,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}
