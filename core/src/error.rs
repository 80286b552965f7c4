//! Errors returned by the simulation engine.

use thiserror::Error;

use crate::coord::{Coord, Direction};

/// Result type returned by fallible engine routines.
pub type SimResult<T> = Result<T, SimError>;

/// Any error the engine can return.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unknown automaton: {0:?}")]
    UnsupportedAutomaton(String),
}

/// Error returned when a coordinate lies outside of a grid.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("coordinate {pos} is outside of {width}x{height} grid")]
pub struct BoundsError {
    /// Offending coordinate.
    pub pos: Coord,
    /// Width of the grid that rejected the coordinate.
    pub width: usize,
    /// Height of the grid that rejected the coordinate.
    pub height: usize,
}

/// Error returned when a value lies outside of its domain.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("row {row} has {len} cells, expected {width}")]
    RaggedRow { row: usize, len: usize, width: usize },
    #[error("health {health} out of range 0..={max_health}")]
    HealthOutOfRange { health: u32, max_health: u32 },
    #[error("maximum health {0} is too low; a full creature must split into two living halves")]
    MaxHealthTooLow(u32),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("input map has no entry for {0:?}")]
    MissingDirection(Direction),
    #[error("activation counter must be non-negative, got {0}")]
    NegativeCounter(i64),
    #[error("activation counter {0} does not fit in a cell")]
    CounterOverflow(i64),
    #[error("activation threshold must be positive")]
    ZeroThreshold,
    #[error("{name} must be within 0..=1, got {value}")]
    DensityOutOfRange { name: &'static str, value: f64 },
    #[error("only single-layer grids are simulated, got depth {0}")]
    UnsupportedDepth(usize),
    #[error("invalid life-like rule {0:?}")]
    InvalidRule(String),
}
