use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::{PuzzleError, Result};

/// A cell on the board, addressed by row and column from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    fn offset(self, (dr, dc): (isize, isize), size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction the blank travels in a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    /// Neighbor enumeration order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The move taking the blank from `from` to `to`, if the cells are orthogonally adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        Move::ALL.into_iter().find(|m| m.as_offset() == (dr, dc))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Cell that holds `tile` on the solved board, or `None` for the blank.
pub fn goal_position(tile: u32, size: usize) -> Option<Position> {
    let index = (tile as usize).checked_sub(1)?;
    Some(Position::new(index / size, index % size))
}

/// An `n × n` configuration of tiles `1..n²` plus the blank (`0`).
///
/// The blank position is cached and kept in sync by every mutation, so a
/// `Board` can only be built through the validating constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Board {
    size: usize,
    tiles: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
}

impl Board {
    /// The solved configuration: tiles in row-major order, blank in the last cell.
    pub fn solved(size: usize) -> Result<Self> {
        check_size(size)?;
        let mut tiles = Vec::with_capacity(size);
        let mut value = 1;

        for i in 0..size {
            let mut row = Vec::with_capacity(size);
            for j in 0..size {
                if i == size - 1 && j == size - 1 {
                    row.push(0);
                } else {
                    row.push(value);
                    value += 1;
                }
            }
            tiles.push(row);
        }

        Ok(Self {
            size,
            tiles,
            blank_row: size - 1,
            blank_col: size - 1,
        })
    }

    /// Builds a board from its rows, rejecting anything that is not a square
    /// permutation of `0..n²` with `n >= 2`.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(PuzzleError::Configuration(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                size
            )));
        }

        let cells = size * size;
        let mut seen = vec![false; cells];
        let mut blank = None;
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let slot = seen.get_mut(value as usize).ok_or_else(|| {
                    PuzzleError::Configuration(format!(
                        "tile {} at ({}, {}) is out of range 0..{}",
                        value, i, j, cells
                    ))
                })?;
                if *slot {
                    return Err(PuzzleError::Configuration(format!(
                        "tile {} appears more than once",
                        value
                    )));
                }
                *slot = true;
                if value == 0 {
                    blank = Some((i, j));
                }
            }
        }

        // Every cell was filled with a distinct in-range value, so 0 is present.
        let (blank_row, blank_col) = blank.ok_or_else(|| {
            PuzzleError::Configuration("board has no blank tile".to_string())
        })?;

        Ok(Self {
            size,
            tiles: rows,
            blank_row,
            blank_col,
        })
    }

    /// Builds a board from a row-major sequence of `size²` tiles.
    pub fn from_flat(size: usize, tiles: &[u32]) -> Result<Self> {
        check_size(size)?;
        if tiles.len() != size * size {
            return Err(PuzzleError::Configuration(format!(
                "expected {} tiles for a {}x{} board, got {}",
                size * size,
                size,
                size,
                tiles.len()
            )));
        }
        Self::from_rows(tiles.chunks(size).map(<[u32]>::to_vec).collect())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn blank(&self) -> Position {
        Position::new(self.blank_row, self.blank_col)
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.tiles
    }

    /// Row-major copy of the tiles, blank included.
    pub fn flatten(&self) -> Vec<u32> {
        self.tiles.iter().flat_map(|row| row.iter().copied()).collect()
    }

    /// Exchanges two cells in place.
    pub fn swap(&mut self, a: Position, b: Position) {
        let tmp = self.tiles[a.row][a.col];
        self.tiles[a.row][a.col] = self.tiles[b.row][b.col];
        self.tiles[b.row][b.col] = tmp;

        if self.tiles[a.row][a.col] == 0 {
            (self.blank_row, self.blank_col) = (a.row, a.col);
        } else if self.tiles[b.row][b.col] == 0 {
            (self.blank_row, self.blank_col) = (b.row, b.col);
        }
    }

    /// A copy of this board with the blank moved one cell in `direction`,
    /// or `None` when that would leave the grid.
    pub fn try_move(&self, direction: Move) -> Option<Self> {
        let target = self.blank().offset(direction.as_offset(), self.size)?;
        let mut next = self.clone();
        next.swap(self.blank(), target);
        Some(next)
    }

    /// Every board reachable with one move, in up/left/down/right order.
    pub fn neighbors(&self) -> Vec<Self> {
        Move::ALL
            .iter()
            .filter_map(|&direction| self.try_move(direction))
            .collect()
    }

    /// Slides the tile at `to` into the blank.
    pub fn apply_move(&mut self, to: Position) -> Result<()> {
        let from = self.blank();
        let legal = to.row < self.size && to.col < self.size && Move::between(from, to).is_some();
        if !legal {
            return Err(PuzzleError::IllegalMove { from, to });
        }
        self.swap(from, to);
        Ok(())
    }

    /// Applies `moves` in order to a copy of this board.
    pub fn replay(&self, moves: &[Position]) -> Result<Self> {
        let mut board = self.clone();
        for &to in moves {
            board.apply_move(to)?;
        }
        Ok(board)
    }

    /// True when every numbered tile sits on its goal cell.
    pub fn is_goal(&self) -> bool {
        self.tiles.iter().enumerate().all(|(i, row)| {
            row.iter().enumerate().all(|(j, &value)| {
                value == 0 || goal_position(value, self.size) == Some(Position::new(i, j))
            })
        })
    }
}

fn check_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(PuzzleError::Configuration(format!(
            "board dimension must be at least 2, got {}",
            size
        )));
    }
    Ok(())
}

impl Index<Position> for Board {
    type Output = u32;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.tiles[pos.row][pos.col]
    }
}

impl TryFrom<Vec<Vec<u32>>> for Board {
    type Error = PuzzleError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<u32>> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in &self.tiles {
            for &val in row {
                write!(f, "{:>width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_solved_layout() {
        let b = Board::solved(3).unwrap();
        assert_eq!(b.flatten(), vec![1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(b.blank(), Position::new(2, 2));
        assert!(b.is_goal());
    }

    #[test]
    fn test_solved_rejects_tiny_dimension() {
        assert!(matches!(Board::solved(1), Err(PuzzleError::Configuration(_))));
        assert!(matches!(Board::solved(0), Err(PuzzleError::Configuration(_))));
    }

    #[test]
    fn test_from_rows_validation() {
        let non_square = Board::from_rows(vec![vec![1, 2, 3], vec![0, 4, 5]]);
        assert!(matches!(non_square, Err(PuzzleError::Configuration(_))));

        let ragged = Board::from_rows(vec![vec![1, 2], vec![3]]);
        assert!(matches!(ragged, Err(PuzzleError::Configuration(_))));

        let duplicate = Board::from_rows(vec![vec![1, 1], vec![2, 0]]);
        assert!(matches!(duplicate, Err(PuzzleError::Configuration(_))));

        let out_of_range = Board::from_rows(vec![vec![1, 2], vec![4, 0]]);
        assert!(matches!(out_of_range, Err(PuzzleError::Configuration(_))));

        let from_flat = Board::from_flat(3, &[1, 2, 3, 4]);
        assert!(matches!(from_flat, Err(PuzzleError::Configuration(_))));
    }

    #[test]
    fn test_blank_is_located() {
        let b = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        assert_eq!(b.blank(), Position::new(1, 1));
        assert_eq!(b[Position::new(2, 1)], 5);
    }

    #[test]
    fn test_goal_position() {
        assert_eq!(goal_position(1, 3), Some(Position::new(0, 0)));
        assert_eq!(goal_position(6, 3), Some(Position::new(1, 2)));
        assert_eq!(goal_position(15, 4), Some(Position::new(3, 2)));
        assert_eq!(goal_position(0, 4), None);
    }

    #[test]
    fn test_swap_tracks_blank() {
        let mut b = Board::solved(3).unwrap();
        b.swap(Position::new(2, 2), Position::new(1, 2));
        assert_eq!(b.blank(), Position::new(1, 2));
        b.swap(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(b.blank(), Position::new(1, 2));
        assert_eq!(b[Position::new(0, 0)], 2);
    }

    #[test]
    fn test_neighbor_counts() {
        let corner = Board::solved(3).unwrap();
        assert_eq!(corner.neighbors().len(), 2);

        let edge = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert_eq!(edge.neighbors().len(), 3);

        let interior = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        assert_eq!(interior.neighbors().len(), 4);
    }

    #[test]
    fn test_neighbors_leave_input_untouched() {
        let b = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        let before = b.clone();
        let mut neighbors = b.neighbors();
        assert_eq!(b, before);

        let blanks: Vec<Position> = neighbors.iter().map(Board::blank).collect();
        assert_eq!(
            blanks,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(1, 2),
            ]
        );

        // Mutating one neighbor must not leak into its siblings or the source.
        neighbors[0].swap(Position::new(2, 2), Position::new(2, 0));
        assert_eq!(b, before);
        assert_eq!(neighbors[1][Position::new(2, 2)], 8);
    }

    #[test]
    fn test_move_between() {
        let origin = Position::new(1, 1);
        assert_eq!(Move::between(origin, Position::new(0, 1)), Some(Move::Up));
        assert_eq!(Move::between(origin, Position::new(1, 2)), Some(Move::Right));
        assert_eq!(Move::between(origin, Position::new(2, 2)), None);
        assert_eq!(Move::between(origin, origin), None);
        assert_eq!(Move::Left.opposite(), Move::Right);
    }

    #[test]
    fn test_apply_move_rejects_non_adjacent() {
        let mut b = Board::solved(3).unwrap();
        let err = b.apply_move(Position::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::IllegalMove {
                from: Position::new(2, 2),
                to: Position::new(0, 0),
            }
        );
        assert!(b.apply_move(Position::new(2, 3)).is_err());

        b.apply_move(Position::new(2, 1)).unwrap();
        assert_eq!(b.blank(), Position::new(2, 1));
        assert!(!b.is_goal());
    }

    #[test]
    fn test_display() {
        let b = Board::solved(2).unwrap();
        assert_eq!(b.to_string(), "1 2 \n3 0 \n");
    }

    #[test]
    fn test_equality_includes_dimension() {
        assert_ne!(Board::solved(2).unwrap(), Board::solved(3).unwrap());
        assert_eq!(Board::solved(4).unwrap(), Board::solved(4).unwrap());
    }
}
