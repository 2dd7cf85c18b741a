use tilecam_geo::{DEFAULT_TILE_SIZE, LngLat, MAX_MERCATOR_LAT};

/// Default for [TransformState::max_pitch].
pub const DEFAULT_MAX_PITCH: f64 = 60.0;

/// The camera's configuration.
///
/// Angles are in degrees, `width`/`height` in pixels. A zero `height`
/// means the viewport is not known yet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformState {
    pub tile_size: f64,
    pub center: LngLat,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    /// Camera height above the centre, in viewport heights.
    pub altitude: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Steepest tilt `pitch` is clamped to, degrees.
    pub max_pitch: f64,
    /// Allowed `[min, max]` centre longitude, unconstrained when `None`.
    pub lng_range: Option<[f64; 2]>,
    /// Allowed `[min, max]` centre latitude.
    pub lat_range: [f64; 2],
    pub width: f64,
    pub height: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        TransformState {
            tile_size: DEFAULT_TILE_SIZE,
            center: LngLat::new(0.0, 0.0),
            zoom: 0.0,
            bearing: 0.0,
            pitch: 0.0,
            altitude: 1.5,
            min_zoom: 0.0,
            max_zoom: 20.0,
            max_pitch: DEFAULT_MAX_PITCH,
            lng_range: None,
            lat_range: [-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT],
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A partial [TransformState]. Fields left as `None` keep their
/// current value when merged.
///
/// ```rust
/// use tilecam::{LngLat, StateUpdate};
///
/// let update = StateUpdate {
///     center: Some(LngLat::new(151.2, -33.8)),
///     zoom: Some(9.0),
///     ..StateUpdate::default()
/// };
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub tile_size: Option<f64>,
    pub center: Option<LngLat>,
    pub zoom: Option<f64>,
    pub bearing: Option<f64>,
    pub pitch: Option<f64>,
    pub altitude: Option<f64>,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub max_pitch: Option<f64>,
    pub lng_range: Option<[f64; 2]>,
    pub lat_range: Option<[f64; 2]>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl StateUpdate {
    /// An update that only resizes the viewport.
    pub fn size(width: f64, height: f64) -> Self {
        StateUpdate {
            width: Some(width),
            height: Some(height),
            ..StateUpdate::default()
        }
    }
}

impl From<TransformState> for StateUpdate {
    fn from(value: TransformState) -> Self {
        StateUpdate {
            tile_size: Some(value.tile_size),
            center: Some(value.center),
            zoom: Some(value.zoom),
            bearing: Some(value.bearing),
            pitch: Some(value.pitch),
            altitude: Some(value.altitude),
            min_zoom: Some(value.min_zoom),
            max_zoom: Some(value.max_zoom),
            max_pitch: Some(value.max_pitch),
            lng_range: value.lng_range,
            lat_range: Some(value.lat_range),
            width: Some(value.width),
            height: Some(value.height),
        }
    }
}

impl TransformState {
    /// Merges `update` into the state, keeping unspecified fields.
    pub(crate) fn merge(&mut self, update: StateUpdate) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = update.$field {
                    self.$field = value;
                })*
            };
        }

        merge!(
            tile_size, center, zoom, bearing, pitch, altitude, min_zoom, max_zoom, max_pitch,
            lat_range, width, height,
        );

        if update.lng_range.is_some() {
            self.lng_range = update.lng_range;
        }
    }

    /// Pulls zoom, pitch and centre back inside their configured ranges.
    pub(crate) fn constrain(&mut self) {
        self.zoom = bound(self.zoom, self.min_zoom, self.max_zoom);
        self.pitch = bound(self.pitch, 0.0, self.max_pitch);

        let [min_lat, max_lat] = self.lat_range;
        self.center.lat = bound(self.center.lat, min_lat, max_lat);

        if let Some([min_lng, max_lng]) = self.lng_range {
            self.center.lng = bound(self.center.lng, min_lng, max_lng);
        }
    }
}

/// Like `f64::clamp`, without panicking on inverted or NaN bounds.
fn bound(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
