//! Slide generation and path checking.
//!
//! A slide moves the blank into an orthogonally adjacent cell. Neighbors are
//! always emitted left, right, up, down; the search relies on this order for
//! its tie-breaking.

use smallvec::SmallVec;

use crate::puzzle::{Board, Direction, WIDTH};

/// Neighbor list: a blank has at most four adjacent cells
pub type Neighbors = SmallVec<[(Direction, Board); 4]>;

/// Whether the blank at `index` can slide in `dir` without leaving the grid
fn can_slide(index: usize, dir: Direction) -> bool {
    match dir {
        Direction::Left => index % WIDTH != 0,
        Direction::Right => index % WIDTH != WIDTH - 1,
        Direction::Up => index / WIDTH != 0,
        Direction::Down => index / WIDTH != WIDTH - 1,
    }
}

/// Cell the blank at `index` moves into. Caller must check `can_slide`.
fn target_index(index: usize, dir: Direction) -> usize {
    match dir {
        Direction::Left => index - 1,
        Direction::Right => index + 1,
        Direction::Up => index - WIDTH,
        Direction::Down => index + WIDTH,
    }
}

/// Apply a single slide, or `None` if it would leave the grid
pub fn apply_move(board: &Board, dir: Direction) -> Option<Board> {
    let blank = board.blank_index();
    if !can_slide(blank, dir) {
        return None;
    }
    Some(board.swap(blank, target_index(blank, dir)))
}

/// All boards one slide away, in left, right, up, down order
pub fn neighbors(board: &Board) -> Neighbors {
    let blank = board.blank_index();
    Direction::ALL
        .iter()
        .filter(|&&dir| can_slide(blank, dir))
        .map(|&dir| (dir, board.swap(blank, target_index(blank, dir))))
        .collect()
}

/// The slide that turns `from` into `to`, if they are exactly one slide apart
pub fn move_between(from: &Board, to: &Board) -> Option<Direction> {
    neighbors(from)
        .into_iter()
        .find(|(_, next)| next == to)
        .map(|(dir, _)| dir)
}

/// Directions taken along a path of consecutive boards.
///
/// Returns `None` if any consecutive pair is not a single slide.
pub fn directions(path: &[Board]) -> Option<Vec<Direction>> {
    path.windows(2)
        .map(|pair| move_between(&pair[0], &pair[1]))
        .collect()
}

/// Does `path` start at `start`, end at `goal`, and advance by one legal slide
/// at each step?
pub fn verify_path(start: &Board, goal: &Board, path: &[Board]) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if first == start && last == goal => {
            directions(path).is_some()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [u8; 9]) -> Board {
        Board::try_from_slice(&cells).unwrap()
    }

    #[test]
    fn test_neighbor_counts_by_blank_position() {
        // corner
        assert_eq!(neighbors(&Board::goal()).len(), 2);
        // edge
        assert_eq!(neighbors(&board([1, 0, 2, 3, 4, 5, 6, 7, 8])).len(), 3);
        // center
        assert_eq!(neighbors(&board([1, 2, 3, 4, 0, 5, 6, 7, 8])).len(), 4);
    }

    #[test]
    fn test_neighbor_emission_order() {
        let center = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let dirs: Vec<Direction> = neighbors(&center).iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dirs,
            vec![Direction::Left, Direction::Right, Direction::Up, Direction::Down]
        );

        let next: Vec<Board> = neighbors(&center).iter().map(|(_, b)| *b).collect();
        assert_eq!(next[0], board([1, 2, 3, 0, 4, 5, 6, 7, 8]));
        assert_eq!(next[1], board([1, 2, 3, 4, 5, 0, 6, 7, 8]));
        assert_eq!(next[2], board([1, 0, 3, 4, 2, 5, 6, 7, 8]));
        assert_eq!(next[3], board([1, 2, 3, 4, 7, 5, 6, 0, 8]));
    }

    #[test]
    fn test_every_neighbor_is_one_swap_away() {
        let mut cells = [0u8, 1, 2, 3, 4, 5, 6, 7, 8];
        for blank in 0..9 {
            cells.swap(0, blank);
            let b = board(cells);
            let count = neighbors(&b).len();
            assert!((2..=4).contains(&count));
            for (_, next) in neighbors(&b) {
                assert_ne!(next, b);
                let differing = (0..9).filter(|&i| next.cells()[i] != b.cells()[i]).count();
                assert_eq!(differing, 2);
                assert_ne!(next.cells()[b.blank_index()], 0);
            }
            cells.swap(0, blank);
        }
    }

    #[test]
    fn test_apply_move_respects_edges() {
        let goal = Board::goal();
        assert_eq!(apply_move(&goal, Direction::Left), None);
        assert_eq!(apply_move(&goal, Direction::Up), None);
        assert_eq!(
            apply_move(&goal, Direction::Right),
            Some(board([1, 0, 2, 3, 4, 5, 6, 7, 8]))
        );

        let center = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        for dir in Direction::ALL {
            let moved = apply_move(&center, dir).unwrap();
            assert_eq!(apply_move(&moved, dir.opposite()), Some(center));
        }
    }

    #[test]
    fn test_move_between_and_verify() {
        let start = board([1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let goal = Board::goal();
        assert_eq!(move_between(&start, &goal), Some(Direction::Left));
        assert!(verify_path(&start, &goal, &[start, goal]));
        assert!(!verify_path(&start, &goal, &[start]));
        assert!(!verify_path(&goal, &goal, &[start, goal]));

        let far = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert_eq!(move_between(&far, &goal), None);
        assert!(!verify_path(&far, &goal, &[far, goal]));
    }
}
