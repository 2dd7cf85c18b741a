use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::{MAX_TILE_ZOOM, TileCoord};
use crate::TileError;

impl Display for TileCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Parses `z/x/y` (canonical world) or `z/x/y@w`.
impl FromStr for TileCoord {
    type Err = TileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (address, w) = match value.trim().split_once('@') {
            Some((address, w)) => (address, w.parse::<i32>()?),
            None => (value.trim(), 0),
        };

        let mut parts = address.split('/');
        let (Some(z), Some(x), Some(y), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TileError::Parse(value.to_string()));
        };

        let z = z.parse::<u8>()?;
        if z > MAX_TILE_ZOOM {
            return Err(TileError::Parse(value.to_string()));
        }

        let (x, y) = (x.parse::<u32>()?, y.parse::<u32>()?);
        if (x as u64) >> z != 0 || (y as u64) >> z != 0 {
            return Err(TileError::Parse(value.to_string()));
        }

        Ok(TileCoord::new(z, x, y, w))
    }
}
