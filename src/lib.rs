#![doc = include_str!("../readme.md")]

pub mod error;
pub mod transform;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use transform::{
    CoveringOptions, Degeneracy, Matrices, PosSource, StateUpdate, Transform, TransformError,
    TransformState, ZoomRounding,
};

#[doc(inline)]
pub use tilecam_geo::{Coordinate, LngLat, Point};
#[doc(inline)]
pub use tilecam_tiles::{TileCoord, TileError};
