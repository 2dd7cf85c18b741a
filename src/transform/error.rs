use std::fmt::{Display, Formatter};
use strum::{AsRefStr, Display as StrumDisplay};

/// Why the camera cannot produce a usable matrix stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Degeneracy {
    /// The viewport height is not known yet, so no matrices exist.
    UnknownViewport,
    /// The pixel matrix has no inverse.
    SingularMatrix,
    /// The pitch and altitude put the horizon inside the view.
    InvalidPitch,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransformError {
    DegenerateCamera(Degeneracy),
}

impl Display for TransformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::DegenerateCamera(reason) => write!(f, "degenerate camera: {reason}"),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<Degeneracy> for TransformError {
    fn from(value: Degeneracy) -> Self {
        TransformError::DegenerateCamera(value)
    }
}
