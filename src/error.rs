//! Crate-wide error type

use thiserror::Error;

use crate::engine::BodyId;

/// Errors surfaced by maze generation, scene assembly and the engine boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("invalid maze dimensions: {rows} rows x {cols} cols (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown body: {0:?}")]
    UnknownBody(BodyId),

    #[error("drawing surface unavailable: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
