use rand::{thread_rng, Rng};
use tracing::debug;

use crate::board::{Board, Position};
use crate::error::Result;
use crate::solvability::is_solvable;

/// Fisher–Yates shuffle: walks `i` down from the last index, swapping with a
/// uniformly chosen `j` in `0..=i`.
pub fn shuffle_tiles<R: Rng + ?Sized>(tiles: &mut [u32], rng: &mut R) {
    for i in (1..tiles.len()).rev() {
        let j = rng.gen_range(0..=i);
        tiles.swap(i, j);
    }
}

/// A random solvable board of the given dimension, seeded from the thread RNG.
pub fn generate_random(size: usize) -> Result<Board> {
    generate_random_with(size, &mut thread_rng())
}

/// A random solvable board drawn from `rng`.
///
/// Unsolvable permutations are repaired with one transposition of two
/// numbered tiles, which flips the inversion parity without moving the blank.
pub fn generate_random_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board> {
    let mut tiles = Board::solved(size)?.flatten();
    shuffle_tiles(&mut tiles, rng);

    let mut board = Board::from_flat(size, &tiles)?;
    let blank = board.blank();
    if !is_solvable(&tiles, size, blank.row) {
        let row = if blank.row == 0 { 1 } else { 0 };
        debug!(row, "repairing unsolvable shuffle");
        board.swap(Position::new(row, 0), Position::new(row, 1));
    }

    Ok(board)
}
