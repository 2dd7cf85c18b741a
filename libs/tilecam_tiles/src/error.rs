use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

#[derive(Debug)]
pub enum TileError {
    /// The text is not of the form `z/x/y` or `z/x/y@w`.
    Parse(String),
    /// A component of the address is not an integer of the right width.
    ParseInt(ParseIntError),
    /// A packed id with no valid address behind it.
    InvalidId(u64),
}

impl Display for TileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TileError::Parse(value) => write!(f, "malformed tile address: {value:?}"),
            TileError::ParseInt(err) => write!(f, "malformed tile component: {err}"),
            TileError::InvalidId(id) => write!(f, "id {id} does not address a tile"),
        }
    }
}

impl std::error::Error for TileError {}

impl From<ParseIntError> for TileError {
    fn from(value: ParseIntError) -> Self {
        TileError::ParseInt(value)
    }
}
