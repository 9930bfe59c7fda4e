//! Errors raised while building scenes and loading configuration
//!
//! Queries themselves never fail; only construction and I/O do.

use std::fmt;

use crate::sim::EntityId;

#[derive(Debug)]
pub enum Error {
    /// A shape needs at least two vertices to form an edge
    InsufficientVertices { entity: usize, count: usize },
    /// A vertex, position or centroid contained NaN or infinity
    NonFiniteCoordinate { entity: usize },
    /// An entity id does not name an entity in the scene
    UnknownEntity(EntityId),
    /// FOV angle must lie in (0, 360) degrees
    InvalidFovAngle(f32),
    /// A step, speed or distance setting is out of range
    InvalidSetting { field: &'static str, value: f32 },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientVertices { entity, count } => write!(
                f,
                "entity {} has {} vertices, at least 2 are required",
                entity, count
            ),
            Error::NonFiniteCoordinate { entity } => {
                write!(f, "entity {} has a non-finite coordinate", entity)
            }
            Error::UnknownEntity(id) => write!(f, "unknown entity {}", id.index()),
            Error::InvalidFovAngle(deg) => {
                write!(f, "FOV angle {} is outside (0, 360) degrees", deg)
            }
            Error::InvalidSetting { field, value } => {
                write!(f, "setting {} has invalid value {}", field, value)
            }
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
