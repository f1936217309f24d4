//! Board and search-state types for the 3x3 sliding-tile puzzle.
//!
//! A board is stored row-major: index `i` is row `i / 3`, column `i % 3`.
//! The value 0 is the blank cell.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};

/// Side length of the grid
pub const WIDTH: usize = 3;

/// Number of cells on the grid
pub const CELLS: usize = WIDTH * WIDTH;

/// Value used for the blank cell
pub const BLANK: u8 = 0;

/// Direction the blank moves in a single slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions in neighbor emission order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(s)
    }
}

/// An arrangement of the nine cells. Always a permutation of 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board([u8; CELLS]);

impl Board {
    /// The fixed goal: blank top-left, values ascending row-major
    pub fn goal() -> Self {
        Board([0, 1, 2, 3, 4, 5, 6, 7, 8])
    }

    /// Build a board from raw cell values, rejecting anything that is not a
    /// permutation of 0..=8.
    pub fn try_from_slice(cells: &[u8]) -> Result<Self> {
        if cells.len() != CELLS {
            return Err(PuzzleError::InvalidLength { got: cells.len() });
        }

        let mut seen = [false; CELLS];
        for &value in cells {
            let slot = seen.get_mut(value as usize);
            match slot {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(PuzzleError::NotAPermutation {
                        cells: cells.iter().map(|&v| i64::from(v)).collect(),
                    })
                }
            }
        }

        let mut board = [0u8; CELLS];
        board.copy_from_slice(cells);
        Ok(Board(board))
    }

    /// Parse command-line tokens: `_` is the blank, anything else must be an
    /// integer. Integers outside 0..=8 are reported as a bad permutation.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let values = tokens
            .iter()
            .map(|t| parse_cell(t.as_ref()))
            .collect::<Result<Vec<i64>>>()?;
        let cells = values
            .iter()
            .map(|&v| u8::try_from(v))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| PuzzleError::NotAPermutation {
                cells: values.clone(),
            })?;
        Self::try_from_slice(&cells)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.0
    }

    /// Index of the blank cell
    pub fn blank_index(&self) -> usize {
        self.position_of(BLANK)
    }

    /// Index currently holding `value`.
    ///
    /// Every board is a permutation, so a value in 0..=8 is always present.
    pub fn position_of(&self, value: u8) -> usize {
        self.0
            .iter()
            .position(|&v| v == value)
            .unwrap_or(CELLS)
    }

    /// Copy of this board with the cells at `i` and `j` exchanged
    pub fn swap(&self, i: usize, j: usize) -> Board {
        let mut cells = self.0;
        cells.swap(i, j);
        Board(cells)
    }

    /// Number of ordered pairs of non-blank tiles that appear out of order
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.0.iter().copied().filter(|&v| v != BLANK).collect();
        let mut inversions = 0;
        for i in 0..tiles.len() {
            for j in (i + 1)..tiles.len() {
                if tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }
        inversions
    }

    /// On an odd-width grid a slide never changes inversion parity, so two
    /// boards are mutually reachable exactly when their parities match.
    pub fn is_solvable_towards(&self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }
}

fn parse_cell(token: &str) -> Result<i64> {
    let cell = token.trim();
    if cell == "_" {
        return Ok(i64::from(BLANK));
    }
    cell.parse::<i64>().map_err(|_| PuzzleError::InvalidToken {
        token: token.to_string(),
    })
}

impl TryFrom<Vec<u8>> for Board {
    type Error = PuzzleError;

    fn try_from(cells: Vec<u8>) -> Result<Self> {
        Board::try_from_slice(&cells)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.0.to_vec()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(WIDTH) {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == BLANK {
                        "_".to_string()
                    } else {
                        v.to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A board together with its path cost and A* score.
///
/// Equality and hashing look at the board only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tile {
    pub board: Board,
    /// Slides taken from the start
    pub cost: u32,
    /// `cost` plus the heuristic estimate to the goal
    pub score: u32,
}

impl Tile {
    pub fn new(board: Board, cost: u32, score: u32) -> Self {
        Self { board, cost, score }
    }
}

impl From<Board> for Tile {
    fn from(board: Board) -> Self {
        Tile::new(board, 0, 0)
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}
