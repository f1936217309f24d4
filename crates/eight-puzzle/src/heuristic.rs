//! Heuristic evaluators: estimates of the slides remaining to the goal.
//!
//! Every evaluator here is admissible, so A* with any of them returns a
//! minimum-length path.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::puzzle::{Board, Tile, BLANK, WIDTH};

/// Selectable heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Always zero; the search degrades to uniform-cost
    Null,
    /// Sum of grid distances from each value to its goal cell
    #[default]
    Manhattan,
    /// Number of non-blank tiles off their goal cell
    Misplaced,
}

impl Heuristic {
    pub fn evaluate(self, board: &Board, goal: &Tile) -> u32 {
        match self {
            Heuristic::Null => null(board, goal),
            Heuristic::Manhattan => manhattan(board, goal),
            Heuristic::Misplaced => misplaced(board, goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Null => "null",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Misplaced => "misplaced",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn null(_board: &Board, _goal: &Tile) -> u32 {
    0
}

/// Manhattan distance, summed over every tile value in the goal.
///
/// The blank is skipped: it moves on every slide, so counting it could
/// overestimate and break admissibility.
pub fn manhattan(board: &Board, goal: &Tile) -> u32 {
    let mut total = 0;
    for (goal_idx, &value) in goal.board.cells().iter().enumerate() {
        if value == BLANK {
            continue;
        }
        let idx = board.position_of(value);
        let col_dist = (idx % WIDTH).abs_diff(goal_idx % WIDTH);
        let row_dist = (idx / WIDTH).abs_diff(goal_idx / WIDTH);
        total += (col_dist + row_dist) as u32;
    }
    total
}

pub fn misplaced(board: &Board, goal: &Tile) -> u32 {
    board
        .cells()
        .iter()
        .zip(goal.board.cells())
        .filter(|&(&a, &b)| a != BLANK && a != b)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> Tile {
        Tile::from(Board::goal())
    }

    fn board(cells: [u8; 9]) -> Board {
        Board::try_from_slice(&cells).unwrap()
    }

    #[test]
    fn test_goal_scores_zero() {
        let g = goal();
        assert_eq!(manhattan(&g.board, &g), 0);
        assert_eq!(misplaced(&g.board, &g), 0);
        assert_eq!(null(&g.board, &g), 0);
    }

    #[test]
    fn test_manhattan_single_slide() {
        // blank and 1 exchanged: tile 1 is one cell off
        let b = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(manhattan(&b, &goal()), 1);
        assert_eq!(misplaced(&b, &goal()), 1);
    }

    #[test]
    fn test_manhattan_indexes_by_value() {
        // 1..4 all shifted right by one, blank moved to index 4
        let b = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        // 1: (0,0)->(0,1) = 1; 2: (0,1)->(0,2) = 1;
        // 3: (0,2)->(1,0) = 3; 4: (1,0)->(1,1) = 1
        assert_eq!(manhattan(&b, &goal()), 6);
    }

    #[test]
    fn test_manhattan_against_other_goal() {
        let other = Tile::from(board([1, 2, 3, 4, 5, 6, 7, 8, 0]));
        assert_eq!(manhattan(&other.board, &other), 0);
        assert!(manhattan(&Board::goal(), &other) > 0);
    }

    #[test]
    fn test_evaluate_dispatch() {
        let b = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Heuristic::Null.evaluate(&b, &goal()), 0);
        assert_eq!(Heuristic::Manhattan.evaluate(&b, &goal()), 1);
        assert_eq!(Heuristic::Misplaced.evaluate(&b, &goal()), 1);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);
    }
}
