use smallvec::{SmallVec, smallvec};
use tilecam_geo::Coordinate;

use crate::TileError;

mod parse;

/// Number of low bits of a packed id reserved for the zoom level.
const ZOOM_SLOTS: u64 = 32;

/// Deepest zoom whose packed ids stay clear of `u64` overflow for any
/// practical world copy.
pub const MAX_TILE_ZOOM: u8 = 24;

/// An integer tile address within one world copy.
///
/// `x` and `y` are canonical, `[0, 2^z)`, while `w` selects the world
/// copy the tile is drawn in. The packed [id](TileCoord::id) is a
/// bijection over `(z, x, y, w)` for `z <= 20` and small `|w|`.
///
/// Fields are read-only; the id always matches the address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileCoord {
    z: u8,
    x: u32,
    y: u32,
    w: i32,
    id: u64,
}

impl TileCoord {
    pub fn new(z: u8, x: u32, y: u32, w: i32) -> Self {
        debug_assert!(z <= MAX_TILE_ZOOM, "zoom {z} does not fit the id");

        // Interleave the sign of `w` into its magnitude: 0, -1, 1, -2, 2 ...
        let packed_w = if w >= 0 {
            2 * w as u64
        } else {
            (-2 * w as i64 - 1) as u64
        };

        let dim = 1u64 << z;
        let id = (dim * dim * packed_w + dim * y as u64 + x as u64) * ZOOM_SLOTS + z as u64;

        TileCoord { z, x, y, w, id }
    }

    #[inline]
    pub fn z(&self) -> u8 {
        self.z
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// World copy, `0` for the canonical world.
    #[inline]
    pub fn w(&self) -> i32 {
        self.w
    }

    /// Packed identifier, usable as a hash key.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Unpacks an identifier produced by [TileCoord::id].
    ///
    /// Fails on ids whose zoom is beyond [MAX_TILE_ZOOM] or whose world
    /// copy does not fit an `i32`.
    pub fn from_id(id: u64) -> Result<Self, TileError> {
        let z = id % ZOOM_SLOTS;
        if z > MAX_TILE_ZOOM as u64 {
            return Err(TileError::InvalidId(id));
        }

        let dim = 1u64 << z;

        let xy = (id - z) / ZOOM_SLOTS;
        let x = xy % dim;
        let y = ((xy - x) / dim) % dim;

        let packed_w = (xy / (dim * dim)) as i128;
        let w = if packed_w % 2 != 0 {
            -packed_w - 1
        } else {
            packed_w
        } / 2;

        let w = i32::try_from(w).map_err(|_| TileError::InvalidId(id))?;
        Ok(TileCoord::new(z as u8, x as u32, y as u32, w))
    }

    /// The same tile in the canonical world copy.
    ///
    /// Tile data does not depend on the world copy, so this is the
    /// address to fetch and cache under.
    pub fn wrapped(&self) -> Self {
        TileCoord::new(self.z, self.x, self.y, 0)
    }

    /// The tile one level up, or `None` at the root.
    ///
    /// Past `source_max_zoom` a tile is an overscaled copy of the source's
    /// deepest data, so its parent keeps the same `x`/`y`.
    pub fn parent(&self, source_max_zoom: u8) -> Option<Self> {
        if self.z == 0 {
            return None;
        }

        if self.z > source_max_zoom {
            return Some(TileCoord::new(self.z - 1, self.x, self.y, self.w));
        }

        Some(TileCoord::new(self.z - 1, self.x / 2, self.y / 2, self.w))
    }

    /// The tiles one level down.
    ///
    /// At or beyond `source_max_zoom` there is no finer data, so the only
    /// child is a single overscaled tile with the same `x`/`y`. Tiles at
    /// [MAX_TILE_ZOOM] have no children.
    pub fn children(&self, source_max_zoom: u8) -> SmallVec<[Self; 4]> {
        if self.z >= MAX_TILE_ZOOM {
            return SmallVec::new();
        }

        let z = self.z + 1;

        if self.z >= source_max_zoom {
            return smallvec![TileCoord::new(z, self.x, self.y, self.w)];
        }

        let (x, y) = (self.x * 2, self.y * 2);
        smallvec![
            TileCoord::new(z, x, y, self.w),
            TileCoord::new(z, x + 1, y, self.w),
            TileCoord::new(z, x, y + 1, self.w),
            TileCoord::new(z, x + 1, y + 1, self.w),
        ]
    }

    /// Position of the tile's north-west corner in tile space, folding the
    /// world copy into the column.
    pub fn to_coordinate(&self, source_max_zoom: u8) -> Coordinate {
        let zoom = self.z.min(source_max_zoom) as i32;
        let tile_scale = 2f64.powi(zoom);

        Coordinate::new(
            self.x as f64 + tile_scale * self.w as f64,
            self.y as f64,
            zoom as f64,
        )
    }
}
