#![doc = include_str!("../docs/tiles.md")]

pub mod coord;
pub mod cover;

#[doc(hidden)]
pub mod error;


#[doc(inline)]
pub use coord::{MAX_TILE_ZOOM, TileCoord};
#[doc(inline)]
pub use cover::cover;
#[doc(inline)]
pub use error::TileError;
