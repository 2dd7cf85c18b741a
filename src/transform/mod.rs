//! The perspective map camera.
//!
//! A [Transform] owns the camera state and the matrix stack derived from
//! it, and answers every question that maps between geographic positions,
//! tile space and screen pixels.

use glam::{DMat4, DVec3, DVec4};
use log::warn;
use tilecam_geo::project::{lat_y, lng_x, x_lng, y_lat};
use tilecam_geo::{Coordinate, LngLat, Point, zoom_scale};
use tilecam_tiles::TileCoord;

pub mod covering;
#[doc(hidden)]
pub mod error;
pub mod matrices;
pub mod state;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use covering::{CoveringOptions, ZoomRounding};
#[doc(inline)]
pub use error::{Degeneracy, TransformError};
#[doc(inline)]
pub use matrices::Matrices;
#[doc(inline)]
pub use state::{StateUpdate, TransformState};

use matrices::Camera;

/// Anything a per-tile model matrix can be computed for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PosSource {
    Tile(TileCoord),
    Coordinate(Coordinate),
}

impl From<TileCoord> for PosSource {
    fn from(value: TileCoord) -> Self {
        PosSource::Tile(value)
    }
}

impl From<Coordinate> for PosSource {
    fn from(value: Coordinate) -> Self {
        PosSource::Coordinate(value)
    }
}

/// A camera over a Web-Mercator map.
///
/// Every state change goes through [Transform::update_state], which
/// recomputes the matrix stack before returning, so queries never see
/// matrices from an older state.
///
/// ```rust
/// use tilecam::{LngLat, StateUpdate, Transform, TransformState};
///
/// let mut transform = Transform::new(TransformState::default()).unwrap();
/// transform
///     .update_state(StateUpdate {
///         width: Some(512.0),
///         height: Some(512.0),
///         ..StateUpdate::default()
///     })
///     .unwrap();
///
/// let centre = transform.location_point(LngLat::new(0.0, 0.0)).unwrap();
/// assert!((centre.x() - 256.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Transform {
    state: TransformState,
    matrices: Option<Matrices>,
}

impl Transform {
    /// Creates a camera, computing its matrices if the viewport height is
    /// already known.
    pub fn new(state: TransformState) -> Result<Self, TransformError> {
        let mut transform = Transform {
            state,
            matrices: None,
        };

        transform.state.constrain();
        transform.calculate_matrices()?;
        Ok(transform)
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Merges `update` into the state and synchronously recomputes the
    /// matrix stack.
    ///
    /// While the viewport height is zero the recompute is skipped and the
    /// matrices are cleared; geometry queries then fail with
    /// [Degeneracy::UnknownViewport]. On error the matrices are cleared
    /// as well, never left describing the previous state.
    pub fn update_state(&mut self, update: StateUpdate) -> Result<(), TransformError> {
        self.state.merge(update);
        self.state.constrain();
        self.calculate_matrices()
    }

    /// Recomputes the matrix stack from the current state, failing if the
    /// viewport height is still unknown.
    pub fn recalculate(&mut self) -> Result<(), TransformError> {
        if self.state.height == 0.0 {
            self.matrices = None;
            return Err(Degeneracy::UnknownViewport.into());
        }

        self.calculate_matrices()
    }

    fn calculate_matrices(&mut self) -> Result<(), TransformError> {
        self.matrices = None;

        if self.state.height == 0.0 {
            return Ok(());
        }

        let camera = Camera {
            width: self.state.width,
            height: self.state.height,
            altitude: self.state.altitude,
            pitch: self.pitch(),
            bearing: self.bearing(),
            center: DVec3::new(self.x(), self.y(), 0.0),
        };

        match Matrices::calculate(camera) {
            Ok(matrices) => {
                self.matrices = Some(matrices);
                Ok(())
            }
            Err(reason) => {
                warn!("Camera is degenerate ({reason}): {:?}", self.state);
                Err(reason.into())
            }
        }
    }

    /// The current matrix stack.
    pub fn matrices(&self) -> Result<&Matrices, TransformError> {
        self.matrices
            .as_ref()
            .ok_or(TransformError::DegenerateCamera(Degeneracy::UnknownViewport))
    }

    pub fn proj_matrix(&self) -> Result<DMat4, TransformError> {
        Ok(self.matrices()?.proj)
    }

    pub fn pixel_matrix(&self) -> Result<DMat4, TransformError> {
        Ok(self.matrices()?.pixel)
    }

    pub fn pixel_matrix_inverse(&self) -> Result<DMat4, TransformError> {
        Ok(self.matrices()?.pixel_inverse)
    }

    pub fn tile_size(&self) -> f64 {
        self.state.tile_size
    }

    pub fn min_zoom(&self) -> f64 {
        self.state.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.state.max_zoom
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    /// The integer zoom level tile space is expressed in.
    pub fn tile_zoom(&self) -> f64 {
        self.state.zoom.floor()
    }

    pub fn scale(&self) -> f64 {
        zoom_scale(self.state.zoom)
    }

    /// Pixel span of the whole world at the current zoom.
    pub fn world_size(&self) -> f64 {
        self.state.tile_size * self.scale()
    }

    pub fn width(&self) -> f64 {
        self.state.width
    }

    pub fn height(&self) -> f64 {
        self.state.height
    }

    pub fn size(&self) -> Point {
        Point::new(self.state.width, self.state.height)
    }

    pub fn center_point(&self) -> Point {
        self.size() / 2.0
    }

    pub fn center(&self) -> LngLat {
        self.state.center
    }

    /// Bearing in radians, negated: the state holds a clockwise compass
    /// heading while the matrix rotates counter-clockwise.
    pub fn bearing(&self) -> f64 {
        -self.state.bearing.to_radians()
    }

    /// Pitch in radians.
    pub fn pitch(&self) -> f64 {
        self.state.pitch.to_radians()
    }

    pub fn altitude(&self) -> f64 {
        self.state.altitude
    }

    /// Centre x in world pixels.
    pub fn x(&self) -> f64 {
        lng_x(self.state.center.lng, self.world_size())
    }

    /// Centre y in world pixels.
    pub fn y(&self) -> f64 {
        lat_y(self.state.center.lat, self.world_size())
    }

    /// Centre in world pixels.
    pub fn point(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Screen pixel showing `lnglat`.
    pub fn location_point(&self, lnglat: LngLat) -> Result<Point, TransformError> {
        self.coordinate_point(self.location_coordinate(lnglat))
    }

    /// Geographic position under the screen pixel `point`.
    pub fn point_location(&self, point: Point) -> Result<LngLat, TransformError> {
        Ok(self.coordinate_location(self.point_coordinate(point)?))
    }

    /// Tile-space position of `lnglat` at [Transform::tile_zoom].
    pub fn location_coordinate(&self, lnglat: LngLat) -> Coordinate {
        let world_size = self.world_size();
        let k = zoom_scale(self.tile_zoom()) / world_size;

        Coordinate::new(
            lng_x(lnglat.lng, world_size) * k,
            lat_y(lnglat.lat, world_size) * k,
            self.tile_zoom(),
        )
    }

    /// Geographic position of a tile-space coordinate.
    pub fn coordinate_location(&self, coord: Coordinate) -> LngLat {
        let world_size = zoom_scale(coord.zoom);
        LngLat::new(
            x_lng(coord.column, world_size),
            y_lat(coord.row, world_size),
        )
    }

    /// Screen pixel showing a tile-space coordinate.
    pub fn coordinate_point(&self, coord: Coordinate) -> Result<Point, TransformError> {
        let pixel = self.pixel_matrix()?;
        let scale = self.world_size() / zoom_scale(coord.zoom);

        let p = pixel * DVec4::new(coord.column * scale, coord.row * scale, 0.0, 1.0);
        Ok(Point::new(p.x / p.w, p.y / p.w))
    }

    /// Tile-space coordinate, at [Transform::tile_zoom], of the ground
    /// under the screen pixel `point`.
    pub fn point_coordinate(&self, point: Point) -> Result<Coordinate, TransformError> {
        let inverse = self.pixel_matrix_inverse()?;

        // A screen pixel is a ray, not a point. Unproject it at two depths
        // and intersect the line with the ground plane z = 0.
        let near = inverse * DVec4::new(point.x(), point.y(), 0.0, 1.0);
        let far = inverse * DVec4::new(point.x(), point.y(), 1.0, 1.0);

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let t = if near.z == far.z {
            0.0
        } else {
            (0.0 - near.z) / (far.z - near.z)
        };

        let ground = near.lerp(far, t);
        let scale = self.world_size() / zoom_scale(self.tile_zoom());

        Ok(Coordinate::new(
            ground.x / scale,
            ground.y / scale,
            self.tile_zoom(),
        ))
    }

    /// The model matrix placing a tile (or tile-space origin) on screen.
    ///
    /// Tiles deeper than `max_zoom` are overscaled copies of their
    /// `max_zoom` ancestor and get that ancestor's matrix. `None` means
    /// no overscaling.
    pub fn calculate_pos_matrix<C>(
        &self,
        coord: C,
        max_zoom: Option<u8>,
    ) -> Result<DMat4, TransformError>
    where
        C: Into<PosSource>,
    {
        let proj = self.proj_matrix()?;

        let coord = match coord.into() {
            PosSource::Tile(tile) => tile.to_coordinate(max_zoom.unwrap_or(u8::MAX)),
            PosSource::Coordinate(coord) => coord,
        };

        let z = match max_zoom {
            Some(max_zoom) => coord.zoom.min(max_zoom as f64),
            None => coord.zoom,
        };

        let scale = self.world_size() / zoom_scale(z);
        let translate = DMat4::from_translation(DVec3::new(
            coord.column * scale,
            coord.row * scale,
            0.0,
        ));

        Ok(proj * translate)
    }
}
