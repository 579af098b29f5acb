//! Error types for grid construction and mutation.

use thiserror::Error;

/// Result alias used across the simulation crate.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Coordinate outside the addressable interior `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} interior")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Mass that is NaN or infinite.
    #[error("mass {mass} at ({x}, {y}) is not finite")]
    InvalidMass { x: i32, y: i32, mass: f32 },

    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid flow parameters: {0}")]
    InvalidParams(String),
}
