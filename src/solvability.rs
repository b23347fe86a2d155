//! Reachability test based on permutation parity.
//!
//! A move swaps the blank with a neighbor. Horizontal moves never change the
//! relative order of the numbered tiles; vertical moves jump one tile over
//! `n - 1` others. That fixes the parity of the inversion count (odd `n`) or
//! of inversions plus blank row (even `n`) across every reachable board.

use crate::board::Board;

/// Counts pairs `i < j` with `tiles[i] > tiles[j]`, ignoring the blank.
///
/// Merge-sort based, `O(k log k)` in the number of tiles.
pub fn count_inversions(tiles: &[u32]) -> usize {
    let mut values: Vec<u32> = tiles.iter().copied().filter(|&t| t != 0).collect();
    let mut scratch = vec![0; values.len()];
    sort_and_count(&mut values, &mut scratch)
}

fn sort_and_count(values: &mut [u32], scratch: &mut [u32]) -> usize {
    let len = values.len();
    if len < 2 {
        return 0;
    }

    let mid = len / 2;
    let mut inversions = {
        let (left, right) = values.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        sort_and_count(left, left_scratch) + sort_and_count(right, right_scratch)
    };

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < len {
        if values[i] <= values[j] {
            scratch[k] = values[i];
            i += 1;
        } else {
            // values[j] is smaller than everything left in the left half.
            scratch[k] = values[j];
            inversions += mid - i;
            j += 1;
        }
        k += 1;
    }
    scratch[k..k + mid - i].copy_from_slice(&values[i..mid]);
    k += mid - i;
    scratch[k..k + len - j].copy_from_slice(&values[j..len]);

    values.copy_from_slice(&scratch[..len]);
    inversions
}

/// Decides solvability of a row-major tile sequence of an `size × size`
/// board whose blank sits on `blank_row`.
pub fn is_solvable(tiles: &[u32], size: usize, blank_row: usize) -> bool {
    let inversions = count_inversions(tiles);

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + blank_row) % 2 == 1
    }
}

impl Board {
    /// Whether the goal configuration can be reached from this board.
    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.flatten(), self.size(), self.blank().row)
    }
}
