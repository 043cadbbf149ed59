//! Error types for the checkers engine.
//!
//! Illegal moves are not errors: the validator reports them as
//! `MoveOutcome::Invalid` and the controller treats them as a no-op.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Coordinates outside the 8x8 board.
    #[error("Position ({row}, {col}) is off the board (must be 0-7)")]
    OutOfRangePosition { row: usize, col: usize },

    /// Square notation that could not be parsed.
    #[error("Invalid square: {0:?} (expected a1-h8)")]
    InvalidSquare(String),

    #[error("Invalid board layout: {0}")]
    InvalidLayout(String),

    /// A piece placed on a light square.
    #[error("Square ({row}, {col}) is not playable")]
    NonPlayableSquare { row: usize, col: usize },

    /// The controller and the board disagree; the game cannot continue.
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
