use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DMat4, DVec3};
use log::debug;

use super::error::Degeneracy;

/// Near clipping plane, in pixels from the camera.
const NEAR_Z: f64 = 1.0;

/// Headroom on the far plane so geometry exactly at the horizon is not
/// clipped by rounding.
const FAR_Z_MARGIN: f64 = 1.01;

/// Furthest the top edge of the viewport may reach on the ground, in
/// multiples of the camera's distance to the centre. Past this the view is
/// close enough to the horizon that its tile count is unbounded.
const MAX_TOP_SURFACE_RATIO: f64 = 10.0;

/// The derived matrix stack of a camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrices {
    /// World pixels to clip space.
    pub proj: DMat4,
    /// World pixels to screen pixels.
    pub pixel: DMat4,
    /// Screen pixels (with clip-space depth) back to world pixels.
    pub pixel_inverse: DMat4,
}

/// The camera parameters the matrix stack depends on.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Camera {
    pub width: f64,
    pub height: f64,
    pub altitude: f64,
    /// Radians.
    pub pitch: f64,
    /// Radians, counter-clockwise.
    pub bearing: f64,
    /// Camera centre in world pixels.
    pub center: DVec3,
}

impl Matrices {
    pub(crate) fn calculate(camera: Camera) -> Result<Self, Degeneracy> {
        let Camera {
            width,
            height,
            altitude,
            pitch,
            bearing,
            center,
        } = camera;

        // Distance from the centre point to the top of the viewport on the
        // ground, in altitude units, by the law of sines.
        let half_fov = (0.5 / altitude).atan();
        let ground_angle = FRAC_PI_2 + pitch;
        let camera_to_center = 0.5 / half_fov.tan() * height;
        let top_angle = PI - ground_angle - half_fov;
        let top_half_surface = half_fov.sin() * camera_to_center / top_angle.sin();

        if top_angle <= 0.0 || top_half_surface > MAX_TOP_SURFACE_RATIO * camera_to_center {
            return Err(Degeneracy::InvalidPitch);
        }

        // Depth of the furthest fragment that should be rendered.
        let furthest = (FRAC_PI_2 - pitch).cos() * top_half_surface + camera_to_center;
        let far_z = furthest * FAR_Z_MARGIN;

        if !far_z.is_finite() || far_z <= NEAR_Z {
            return Err(Degeneracy::InvalidPitch);
        }

        let proj = DMat4::perspective_rh_gl(2.0 * half_fov, width / height, NEAR_Z, far_z)
            * DMat4::from_scale(DVec3::new(1.0, -1.0, 1.0))
            * DMat4::from_translation(DVec3::new(0.0, 0.0, -camera_to_center))
            * DMat4::from_rotation_x(pitch)
            * DMat4::from_rotation_z(bearing)
            * DMat4::from_translation(-center);

        let pixel = DMat4::from_scale(DVec3::new(width / 2.0, -height / 2.0, 1.0))
            * DMat4::from_translation(DVec3::new(1.0, -1.0, 0.0))
            * proj;

        let determinant = pixel.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(Degeneracy::SingularMatrix);
        }

        let pixel_inverse = pixel.inverse();
        if !pixel_inverse.is_finite() {
            return Err(Degeneracy::SingularMatrix);
        }

        debug!(
            "Recalculated matrices: {width}x{height}, far_z={far_z:.3}, camera_to_center={camera_to_center:.3}"
        );

        Ok(Matrices {
            proj,
            pixel,
            pixel_inverse,
        })
    }
}
