//! Error types for the eight-puzzle crate

use thiserror::Error;

/// Errors raised while building a board from user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("expected 9 cells, got {got}")]
    InvalidLength { got: usize },

    #[error("invalid cell '{token}' (expected '_' or an integer 0-8)")]
    InvalidToken { token: String },

    #[error("cells {cells:?} are not a permutation of 0-8")]
    NotAPermutation { cells: Vec<i64> },

    #[error("board has the wrong inversion parity and cannot reach the goal")]
    Unsolvable,
}

impl PuzzleError {
    /// Whether the error means the input itself was malformed, as opposed to
    /// a well-formed board that simply cannot be solved.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, PuzzleError::Unsolvable)
    }
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
