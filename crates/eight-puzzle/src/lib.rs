//! A* solver for the 8-puzzle (3x3 sliding-tile puzzle).
//!
//! This crate finds a minimum-length sequence of slides from a starting
//! board to the fixed goal `_ 1 2 / 3 4 5 / 6 7 8`, with a selectable
//! heuristic and optional time and expansion budgets.

pub mod error;
pub mod heuristic;
pub mod moves;
pub mod puzzle;
pub mod solver;

// Re-export main types
pub use error::PuzzleError;
pub use heuristic::Heuristic;
pub use moves::{apply_move, directions, move_between, neighbors, verify_path};
pub use puzzle::{Board, Direction, Tile};
pub use solver::{
    reconstruct, search, search_with, AbortReason, SearchConfig, SearchOutcome, SearchResult,
    SearchStats,
};
