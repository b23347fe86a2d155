//! Distance estimate used to order the search.
//!
//! Linear conflicts are counted over every pair in every row and column,
//! without picking a maximal non-crossing subset per line. The estimate can
//! therefore exceed the true distance on some boards.

use crate::board::{goal_position, Board};

/// Sum over numbered tiles of the L1 distance to their goal cell.
pub fn manhattan(board: &Board) -> usize {
    let size = board.size();
    let mut distance = 0;
    for (i, row) in board.rows().iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if let Some(goal) = goal_position(value, size) {
                distance += i.abs_diff(goal.row) + j.abs_diff(goal.col);
            }
        }
    }
    distance
}

/// Pairs of tiles sharing a line with their goal line whose order is reversed.
pub fn linear_conflicts(board: &Board) -> usize {
    let size = board.size();
    let rows = board.rows();
    let mut conflicts = 0;

    for row in 0..size {
        for col1 in 0..size {
            for col2 in col1 + 1..size {
                let (Some(a), Some(b)) = (
                    goal_position(rows[row][col1], size),
                    goal_position(rows[row][col2], size),
                ) else {
                    continue;
                };
                if a.row == row && b.row == row && a.col > b.col {
                    conflicts += 1;
                }
            }
        }
    }

    for col in 0..size {
        for row1 in 0..size {
            for row2 in row1 + 1..size {
                let (Some(a), Some(b)) = (
                    goal_position(rows[row1][col], size),
                    goal_position(rows[row2][col], size),
                ) else {
                    continue;
                };
                if a.col == col && b.col == col && a.row > b.row {
                    conflicts += 1;
                }
            }
        }
    }

    conflicts
}

/// `manhattan + 2 × linear_conflicts`.
pub fn heuristic(board: &Board) -> usize {
    manhattan(board) + 2 * linear_conflicts(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(size: usize, tiles: &[u32]) -> Board {
        Board::from_flat(size, tiles).unwrap()
    }

    #[test]
    fn test_solved_board_scores_zero() {
        let board = Board::solved(3).unwrap();
        assert_eq!(manhattan(&board), 0);
        assert_eq!(linear_conflicts(&board), 0);
        assert_eq!(heuristic(&board), 0);
    }

    #[test]
    fn test_one_move_from_goal() {
        let board = flat(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(manhattan(&board), 1);
        assert_eq!(linear_conflicts(&board), 0);
        assert_eq!(heuristic(&board), 1);
    }

    #[test]
    fn test_row_conflict() {
        // 2 and 1 both belong in row 0, reversed.
        let board = flat(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(manhattan(&board), 2);
        assert_eq!(linear_conflicts(&board), 1);
        assert_eq!(heuristic(&board), 4);
    }

    #[test]
    fn test_column_conflict() {
        // 4 and 1 both belong in column 0, reversed.
        let board = flat(3, &[4, 2, 3, 1, 5, 6, 7, 8, 0]);
        assert_eq!(linear_conflicts(&board), 1);
        assert_eq!(heuristic(&board), manhattan(&board) + 2);
    }

    #[test]
    fn test_every_reversed_pair_is_counted() {
        // A fully reversed goal row yields three pairwise conflicts.
        let board = flat(3, &[3, 2, 1, 4, 5, 6, 7, 8, 0]);
        assert_eq!(linear_conflicts(&board), 3);
        assert_eq!(manhattan(&board), 4);
        assert_eq!(heuristic(&board), 10);
    }

    #[test]
    fn test_tiles_off_their_line_do_not_conflict() {
        // 4 sits in row 0 but belongs in row 1.
        let board = flat(3, &[4, 1, 3, 2, 5, 6, 7, 8, 0]);
        assert_eq!(linear_conflicts(&board), 0);
    }
}
