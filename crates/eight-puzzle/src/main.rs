//! CLI entry point for the 8-puzzle solver.
//!
//! Usage:
//!   eight-puzzle <TILE> x9 [options]
//!
//! Tiles are given row-major; `_` (or 0) is the blank. Example:
//!   eight-puzzle 1 2 5 3 4 _ 6 7 8
//!
//! Options:
//!   --heuristic <h>        null | manhattan | misplaced (default: manhattan)
//!   --timeout <seconds>    Give up after this long
//!   --max-expansions <n>   Give up after expanding this many boards
//!   --json                 Print the result as JSON
//!   -v, --verbose          More log output on stderr (repeatable)

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{debug, LevelFilter};
use serde::Serialize;

use eight_puzzle::{
    directions, search, AbortReason, Board, Direction, Heuristic, PuzzleError, SearchConfig,
    SearchOutcome, SearchResult, SearchStats,
};

#[derive(Parser)]
#[command(name = "eight-puzzle")]
#[command(about = "Solve the 3x3 sliding-tile puzzle with A* search")]
#[command(version)]
struct Cli {
    /// The nine cells in row-major order; `_` marks the blank
    #[arg(
        value_name = "TILE",
        num_args = 9,
        required = true,
        allow_negative_numbers = true
    )]
    tiles: Vec<String>,

    /// Heuristic guiding the search
    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Maximum search time in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of boards to expand
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format for a solve attempt
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<Board>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    directions: Vec<Direction>,
    path: Vec<Board>,
    heuristic: Heuristic,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SearchStats>,
}

impl SolveOutput {
    fn rejected(reason: &str, start: Option<Board>, heuristic: Heuristic) -> Self {
        Self {
            solved: false,
            reason: Some(reason.to_string()),
            start,
            moves: None,
            directions: Vec::new(),
            path: Vec::new(),
            heuristic,
            stats: None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let goal = Board::goal();
    let start = match parse_start(&cli.tiles, &goal) {
        Ok(board) => board,
        Err(e) if e.is_invalid_input() => {
            debug!("rejected input {:?}: {}", cli.tiles, e);
            if cli.json {
                print_json(&SolveOutput::rejected("invalid_input", None, cli.heuristic));
            } else {
                println!("Invalid input list");
            }
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            if cli.json {
                let start = Board::from_tokens(&cli.tiles).ok();
                print_json(&SolveOutput::rejected("unsolvable", start, cli.heuristic));
            } else {
                println!("Unsolvable input list: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let config = SearchConfig {
        heuristic: cli.heuristic,
        timeout: cli.timeout.map(Duration::from_secs),
        max_expansions: cli.max_expansions,
    };

    let result = search(start, goal, &config);

    if cli.json {
        print_json(&format_result(start, &result, cli.heuristic));
    } else {
        print_text(&result);
    }

    if result.path().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parse the tile tokens and reject boards that cannot reach `goal`
fn parse_start(tokens: &[String], goal: &Board) -> Result<Board, PuzzleError> {
    let start = Board::from_tokens(tokens)?;
    if !start.is_solvable_towards(goal) {
        return Err(PuzzleError::Unsolvable);
    }
    Ok(start)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}

fn reason_for(outcome: &SearchOutcome) -> Option<String> {
    match outcome {
        SearchOutcome::Found(_) => None,
        SearchOutcome::NoPath => Some("no_path".to_string()),
        SearchOutcome::Aborted(AbortReason::Timeout) => Some("timeout".to_string()),
        SearchOutcome::Aborted(AbortReason::ExpansionLimit) => {
            Some("expansion_limit".to_string())
        }
    }
}

fn format_result(start: Board, result: &SearchResult, heuristic: Heuristic) -> SolveOutput {
    let path: Vec<Board> = result
        .path()
        .map(|p| p.iter().map(|t| t.board).collect())
        .unwrap_or_default();

    SolveOutput {
        solved: result.path().is_some(),
        reason: reason_for(&result.outcome),
        start: Some(start),
        moves: result.moves(),
        directions: directions(&path).unwrap_or_default(),
        path,
        heuristic,
        stats: Some(result.stats.clone()),
    }
}

fn print_text(result: &SearchResult) {
    match &result.outcome {
        SearchOutcome::Found(path) => {
            println!("Path starting at:\n");
            for (i, tile) in path.iter().enumerate() {
                if i > 0 {
                    println!("\n   |\n   |\n   V\n");
                }
                print!("{}", tile.board);
            }
            println!();
            println!(
                "Solved in {} moves ({} boards expanded, {} ms)",
                path.len() - 1,
                result.stats.expanded,
                result.stats.elapsed_ms
            );
        }
        SearchOutcome::NoPath => {
            println!(
                "No path found: open set exhausted after {} expansions",
                result.stats.expanded
            );
        }
        SearchOutcome::Aborted(reason) => {
            let what = match reason {
                AbortReason::Timeout => "timed out",
                AbortReason::ExpansionLimit => "hit the expansion limit",
            };
            println!(
                "Search {} after {} expansions",
                what, result.stats.expanded
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tiles: &[&str]) -> Vec<String> {
        std::iter::once("eight-puzzle")
            .chain(tiles.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_negative_tile_reaches_validation() {
        let cli = Cli::try_parse_from(args(&["1", "2", "-1", "3", "4", "5", "6", "7", "8"]))
            .expect("negative tile should parse as a positional value");
        assert_eq!(cli.tiles.len(), 9);

        let err = parse_start(&cli.tiles, &Board::goal()).unwrap_err();
        assert!(matches!(err, PuzzleError::NotAPermutation { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_flags_still_parse_after_tiles() {
        let cli = Cli::try_parse_from(args(&[
            "1", "0", "2", "3", "4", "5", "6", "7", "8", "-v", "--json",
        ]))
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(cli.json);
        assert_eq!(cli.tiles.len(), 9);
    }

    #[test]
    fn test_wrong_tile_count_rejected_by_parser() {
        assert!(Cli::try_parse_from(args(&["1", "2", "3"])).is_err());
    }

    #[test]
    fn test_parse_start_classifies_errors() {
        let goal = Board::goal();
        let tiles = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let ok = parse_start(&tiles(&["1", "_", "2", "3", "4", "5", "6", "7", "8"]), &goal);
        assert_eq!(ok.unwrap().blank_index(), 1);

        let bad = parse_start(&tiles(&["x", "1", "2", "3", "4", "5", "6", "7", "8"]), &goal);
        assert!(bad.unwrap_err().is_invalid_input());

        let unsolvable = parse_start(&tiles(&["_", "2", "1", "3", "4", "5", "6", "7", "8"]), &goal)
            .unwrap_err();
        assert_eq!(unsolvable, PuzzleError::Unsolvable);
        assert!(!unsolvable.is_invalid_input());
    }
}
