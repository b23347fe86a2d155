//! Sliding-tile (N-puzzle) solver.
//!
//! Builds solved and shuffled boards, decides solvability from inversion
//! parity and finds move sequences with a weighted A* search.
//!
//! ```
//! use slider_puzzle::{solve, Board};
//!
//! let board = Board::from_flat(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
//! let moves = solve(&board).unwrap();
//!
//! let finished = board.replay(&moves).unwrap();
//! assert!(finished.is_goal());
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod queue;
pub mod search;
pub mod shuffle;
pub mod solvability;

pub use board::{goal_position, Board, Move, Position};
pub use config::{ConfigError, SolverConfig, Strategy};
pub use error::{PuzzleError, Result};
pub use heuristic::{heuristic, linear_conflicts, manhattan};
pub use queue::PriorityQueue;
pub use search::{solve, solve_visited_set, SearchNode, SearchTree, Solution, SolveStats, Solver};
pub use shuffle::{generate_random, generate_random_with, shuffle_tiles};
pub use solvability::{count_inversions, is_solvable};

/// The solved board for dimension `size`.
pub fn generate_solved(size: usize) -> Result<Board> {
    Board::solved(size)
}
