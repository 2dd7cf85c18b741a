use log::debug;
use measure_time::debug_time;
use strum::{AsRefStr, Display, EnumString};
use tilecam_geo::{DEFAULT_TILE_SIZE, Point, scale_zoom};
use tilecam_tiles::{MAX_TILE_ZOOM, TileCoord, cover};

use super::{Transform, TransformError};

/// How a fractional covering zoom becomes an integer tile zoom.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ZoomRounding {
    /// Never upscale past the source data: fewer, blurrier tiles.
    #[default]
    Floor,
    /// Halves round up: crisper imagery at the cost of more tiles.
    Round,
}

impl ZoomRounding {
    fn apply(self, zoom: f64) -> f64 {
        match self {
            ZoomRounding::Floor => zoom.floor(),
            ZoomRounding::Round => (zoom + 0.5).floor(),
        }
    }
}

/// Describes the tile source a covering is computed for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoveringOptions {
    /// Edge length of the source's tiles, in pixels.
    pub tile_size: f64,
    /// Below this zoom the source has nothing to draw.
    pub min_zoom: u8,
    /// Deepest zoom the source has data for.
    pub max_zoom: u8,
    pub round_zoom: ZoomRounding,
    /// Stamp overscaled tiles with the zoom they are displayed at, rather
    /// than the `max_zoom` their data comes from.
    pub reparse_overscaled: bool,
}

impl Default for CoveringOptions {
    fn default() -> Self {
        CoveringOptions {
            tile_size: DEFAULT_TILE_SIZE,
            min_zoom: 0,
            max_zoom: 22,
            round_zoom: ZoomRounding::Floor,
            reparse_overscaled: false,
        }
    }
}

impl Transform {
    /// The integer zoom whose tiles, at `options.tile_size`, best match
    /// the current view.
    pub fn covering_zoom_level(&self, options: &CoveringOptions) -> i32 {
        let zoom = self.zoom() + scale_zoom(self.tile_size() / options.tile_size);
        options.round_zoom.apply(zoom) as i32
    }

    /// Every tile needed to draw the current view from a source described
    /// by `options`.
    ///
    /// Returns no tiles when the covering zoom is below the source's
    /// `min_zoom`. Above `max_zoom` tiles are taken from `max_zoom`.
    pub fn covering_tiles(
        &self,
        options: &CoveringOptions,
    ) -> Result<Vec<TileCoord>, TransformError> {
        debug_time!("covering tiles");

        let actual_z = self.covering_zoom_level(options);
        if actual_z < options.min_zoom as i32 {
            debug!("Covering zoom {actual_z} is below min_zoom {}", options.min_zoom);
            return Ok(vec![]);
        }

        let z = actual_z.min(options.max_zoom as i32).min(MAX_TILE_ZOOM as i32) as u8;
        let output_z = if options.reparse_overscaled {
            actual_z.min(MAX_TILE_ZOOM as i32) as u8
        } else {
            z
        };

        let (width, height) = (self.width(), self.height());
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ]
        .map(|corner| {
            self.point_coordinate(corner)
                .map(|coord| coord.zoom_to(z as f64))
        });

        let [a, b, c, d] = corners;
        let tiles = cover(z, &[a?, b?, c?, d?], output_z);

        debug!("Covered view at z={z} (actual {actual_z}) with {} tiles", tiles.len());
        Ok(tiles)
    }
}
