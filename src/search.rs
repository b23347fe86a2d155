//! Best-first (A*) search over board states.
//!
//! Nodes live in an arena and refer to their parent by index. The open set
//! holds `(priority, index)` entries ordered by `2 × heuristic + steps`, which
//! weights the estimate above the path cost. Paths found this way are valid
//! but not guaranteed to be shortest.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::board::{Board, Position};
use crate::config::{SolverConfig, Strategy};
use crate::error::{PuzzleError, Result};
use crate::heuristic::heuristic;
use crate::queue::PriorityQueue;

/// One discovered state in the search tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchNode {
    pub board: Board,
    pub heuristic: usize,
    pub steps: usize,
    /// Arena index of the node this one was expanded from.
    pub previous: Option<usize>,
}

impl SearchNode {
    /// Ordering key in the open set.
    pub fn priority(&self) -> usize {
        self.heuristic * 2 + self.steps
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    /// Length of the returned path.
    pub steps: usize,
    /// Nodes whose neighbors were generated.
    pub expanded: usize,
    /// Nodes pushed onto the open set, the start node excluded.
    pub generated: usize,
    /// Largest size the open set reached.
    pub max_open: usize,
}

/// Moves that take a board to the goal, plus search counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Cells the blank moves into, in replay order.
    pub moves: Vec<Position>,
    pub stats: SolveStats,
}

/// Every node created by a finished search, with the goal node's index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTree {
    pub nodes: Vec<SearchNode>,
    pub goal: usize,
    pub stats: SolveStats,
}

impl SearchTree {
    /// Blank destinations from the start node to the goal node.
    pub fn path(&self) -> Vec<Position> {
        let mut path = Vec::new();
        let mut cursor = Some(self.goal);
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            path.push(node.board.blank());
            cursor = node.previous;
        }
        path.reverse();
        // The start state needs no move.
        path.remove(0);
        path
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    priority: usize,
    node: usize,
}

fn by_priority(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.priority.cmp(&b.priority)
}

/// A* solver driven by a [`SolverConfig`].
///
/// With `check_solvable` disabled, an unsolvable board never terminates under
/// [`Strategy::OneStep`] unless `expansion_limit` is set.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds a move sequence that takes `start` to the goal.
    pub fn solve(&self, start: &Board) -> Result<Solution> {
        let tree = self.explore(start)?;
        Ok(Solution {
            moves: tree.path(),
            stats: tree.stats,
        })
    }

    /// Runs the search and keeps the whole node arena.
    pub fn explore(&self, start: &Board) -> Result<SearchTree> {
        if self.config.check_solvable && !start.is_solvable() {
            warn!(tiles = ?start.flatten(), "refusing to search an unsolvable board");
            return Err(PuzzleError::Unsolvable);
        }

        let strategy = self.config.strategy;
        debug!(size = start.size(), ?strategy, "starting search");

        let root = SearchNode {
            board: start.clone(),
            heuristic: heuristic(start),
            steps: 0,
            previous: None,
        };
        let mut open = PriorityQueue::from_vec(
            vec![OpenEntry {
                priority: root.priority(),
                node: 0,
            }],
            by_priority,
        );
        let mut nodes = vec![root];
        let mut visited: HashSet<Board> = HashSet::new();
        let mut stats = SolveStats {
            max_open: 1,
            ..SolveStats::default()
        };

        let goal = loop {
            let Some(OpenEntry { node: current, .. }) = open.pop() else {
                warn!(expanded = stats.expanded, "open set exhausted without reaching the goal");
                return Err(PuzzleError::Unsolvable);
            };

            if nodes[current].board.is_goal() {
                break current;
            }
            if strategy == Strategy::VisitedSet && !visited.insert(nodes[current].board.clone()) {
                continue;
            }
            if let Some(limit) = self.config.expansion_limit {
                if stats.expanded >= limit {
                    warn!(limit, "expansion limit reached");
                    return Err(PuzzleError::ExpansionLimit(limit));
                }
            }

            stats.expanded += 1;
            let parent = nodes[current].previous;
            let steps = nodes[current].steps + 1;
            trace!(
                node = current,
                steps = steps - 1,
                heuristic = nodes[current].heuristic,
                open = open.len(),
                "expanding"
            );

            let neighbors = nodes[current].board.neighbors();
            for board in neighbors {
                let skip = match strategy {
                    Strategy::OneStep => parent.is_some_and(|p| nodes[p].board == board),
                    Strategy::VisitedSet => visited.contains(&board),
                };
                if skip {
                    continue;
                }

                let node = SearchNode {
                    heuristic: heuristic(&board),
                    board,
                    steps,
                    previous: Some(current),
                };
                open.push(OpenEntry {
                    priority: node.priority(),
                    node: nodes.len(),
                });
                nodes.push(node);
                stats.generated += 1;
            }
            stats.max_open = stats.max_open.max(open.len());
        };

        stats.steps = nodes[goal].steps;
        info!(
            steps = stats.steps,
            expanded = stats.expanded,
            generated = stats.generated,
            ?strategy,
            "solution found"
        );

        Ok(SearchTree { nodes, goal, stats })
    }
}

/// Solves with one-step cycle suppression and returns the blank destinations.
pub fn solve(board: &Board) -> Result<Vec<Position>> {
    Solver::default().solve(board).map(|solution| solution.moves)
}

/// Solves with a full visited set.
pub fn solve_visited_set(board: &Board) -> Result<Solution> {
    Solver::new(SolverConfig::new().with_strategy(Strategy::VisitedSet)).solve(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn flat(size: usize, tiles: &[u32]) -> Board {
        Board::from_flat(size, tiles).unwrap()
    }

    fn assert_solves(start: &Board, moves: &[Position]) {
        let mut board = start.clone();
        for &to in moves {
            assert!(
                Move::between(board.blank(), to).is_some(),
                "{} is not adjacent to the blank at {}",
                to,
                board.blank()
            );
            board.apply_move(to).unwrap();
        }
        assert!(board.is_goal());
    }

    #[test]
    fn test_single_move() {
        let board = flat(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(solve(&board).unwrap(), vec![Position::new(2, 2)]);
    }

    #[test]
    fn test_solved_board_needs_no_moves() {
        let board = Board::solved(3).unwrap();
        assert!(solve(&board).unwrap().is_empty());

        let solution = solve_visited_set(&board).unwrap();
        assert!(solution.moves.is_empty());
        assert_eq!(solution.stats.steps, 0);
        assert_eq!(solution.stats.expanded, 0);
    }

    #[test]
    fn test_both_strategies_reach_goal() {
        let board = flat(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]);
        let moves = solve(&board).unwrap();
        assert_solves(&board, &moves);

        let board = flat(3, &[8, 6, 7, 2, 5, 4, 3, 0, 1]);
        let solution = solve_visited_set(&board).unwrap();
        assert_solves(&board, &solution.moves);
        assert_eq!(solution.stats.steps, solution.moves.len());
        assert!(solution.stats.expanded > 0);
        assert!(solution.stats.generated >= solution.stats.steps);
    }

    #[test]
    fn test_one_step_never_undoes_previous_move() {
        let board = flat(3, &[0, 1, 3, 4, 2, 5, 7, 8, 6]);
        let moves = solve(&board).unwrap();
        assert_solves(&board, &moves);

        let mut blanks = vec![board.blank()];
        blanks.extend(moves.iter().copied());
        for window in blanks.windows(3) {
            assert_ne!(window[0], window[2]);
        }
    }

    #[test]
    fn test_four_by_four() {
        let board = flat(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 0, 11, 13, 14, 15, 12]);
        let moves = solve(&board).unwrap();
        assert_eq!(moves, vec![Position::new(2, 3), Position::new(3, 3)]);
    }

    #[test]
    fn test_unsolvable_is_rejected() {
        let board = flat(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]);
        assert_eq!(solve(&board), Err(PuzzleError::Unsolvable));
        assert_eq!(solve_visited_set(&board), Err(PuzzleError::Unsolvable));
    }

    #[test]
    fn test_visited_set_exhausts_unsolvable_space() {
        let board = flat(2, &[2, 1, 3, 0]);
        let solver = Solver::new(
            SolverConfig::new()
                .with_strategy(Strategy::VisitedSet)
                .with_check_solvable(false),
        );
        assert_eq!(solver.solve(&board), Err(PuzzleError::Unsolvable));
    }

    #[test]
    fn test_expansion_limit() {
        let board = flat(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let solver = Solver::new(SolverConfig::new().with_expansion_limit(1));
        assert_eq!(solver.solve(&board), Err(PuzzleError::ExpansionLimit(1)));

        let solver = Solver::new(SolverConfig::new().with_expansion_limit(10));
        let solution = solver.solve(&board).unwrap();
        assert_eq!(solution.moves, vec![Position::new(2, 1), Position::new(2, 2)]);
    }

    #[test]
    fn test_tree_links_form_path() {
        let board = flat(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        let tree = Solver::default().explore(&board).unwrap();
        assert!(tree.nodes[tree.goal].board.is_goal());
        assert_eq!(tree.nodes[0].board, board);
        assert_eq!(tree.nodes[0].previous, None);
        for node in &tree.nodes[1..] {
            let parent = node.previous.unwrap();
            assert_eq!(tree.nodes[parent].steps + 1, node.steps);
            assert!(tree.nodes[parent].board.neighbors().contains(&node.board));
        }
    }
}
