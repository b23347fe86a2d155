//! Error types for the puzzle solver.

use thiserror::Error;

use crate::board::Position;

/// Main error type for puzzle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The board is not a valid square permutation of `0..n²`.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No sequence of moves reaches the goal from this board.
    #[error("Puzzle is not solvable")]
    Unsolvable,

    /// A replayed move does not move the blank onto an adjacent cell.
    #[error("Illegal move: blank at {from} cannot move to {to}")]
    IllegalMove { from: Position, to: Position },

    /// The search expanded more nodes than the configured limit.
    #[error("Expansion limit of {0} nodes exceeded")]
    ExpansionLimit(usize),
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
