use std::fmt::{Display, Formatter};

use tilecam_tiles::TileError;

use crate::impl_err;
use crate::transform::TransformError;

/// Every failure surfaced by the crate.
#[derive(Debug)]
pub enum Error {
    Transform(TransformError),
    Tile(TileError),
}

impl_err!(TransformError, Transform);
impl_err!(TileError, Tile);

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transform(err) => write!(f, "transform: {err}"),
            Error::Tile(err) => write!(f, "tile: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transform(err) => Some(err),
            Error::Tile(err) => Some(err),
        }
    }
}
