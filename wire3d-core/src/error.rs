//! Errors reported while building a scene
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("object `{0}` has no points")]
    EmptyObject(String),

    #[error("object `{object}`: edge {edge} references point {index}, but only {len} points exist")]
    EdgeOutOfRange {
        object: String,
        edge: usize,
        index: usize,
        len: usize,
    },

    #[error("object `{object}`: surface {surface} references point {index}, but only {len} points exist")]
    SurfaceOutOfRange {
        object: String,
        surface: usize,
        index: usize,
        len: usize,
    },

    #[error("object `{object}`: surface {surface} has {count} points, at least 3 are required")]
    DegenerateSurface {
        object: String,
        surface: usize,
        count: usize,
    },

    #[error("an object named `{0}` already exists in world space")]
    DuplicateObject(String),

    #[error("invalid STL data: {0}")]
    Stl(String),
}
