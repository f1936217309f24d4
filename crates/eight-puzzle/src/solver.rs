//! A* search over sliding-tile boards.
//!
//! The open set is a binary heap keyed by `(score, insertion order)`, so among
//! equal scores the board queued first is expanded first. Every distinct board
//! gets exactly one node in an arena; a cheaper rediscovery rewrites that
//! node's cost and parent in place and queues a fresh heap entry, leaving the
//! old entry to be skipped when popped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::heuristic::Heuristic;
use crate::moves::neighbors;
use crate::puzzle::{Board, Tile};

/// Configuration for the search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Heuristic used to order the open set
    pub heuristic: Heuristic,
    /// Give up once this much time has passed
    pub timeout: Option<Duration>,
    /// Give up after expanding this many nodes
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Manhattan,
            timeout: None,
            max_expansions: None,
        }
    }
}

/// Why a search stopped before reaching a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    Timeout,
    ExpansionLimit,
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Path from start to goal, both ends included
    Found(Vec<Tile>),
    /// Open set exhausted without meeting the goal
    NoPath,
    Aborted(AbortReason),
}

/// Counters collected during a search
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Nodes moved from open to closed
    pub expanded: usize,
    /// Distinct boards discovered, start included
    pub generated: usize,
    /// Closed nodes re-opened after a cheaper path turned up
    pub reopened: usize,
    /// Largest open-heap size seen
    pub max_open: usize,
    pub elapsed_ms: u64,
}

/// Result of a search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn path(&self) -> Option<&[Tile]> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Number of slides in the found path
    pub fn moves(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Index of a node in the arena
pub type NodeId = usize;

/// A discovered board and the node it was reached from
#[derive(Debug, Clone)]
pub struct Node {
    pub tile: Tile,
    pub parent: Option<NodeId>,
    closed: bool,
    /// Sequence number of the heap entry that currently represents this node
    queued_at: u64,
}

/// One node per distinct board, looked up by board
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    index: FxHashMap<Board, NodeId>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn lookup(&self, board: &Board) -> Option<NodeId> {
        self.index.get(board).copied()
    }

    /// Add a node for a board not yet in the arena
    pub fn insert(&mut self, tile: Tile, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            tile,
            parent,
            closed: false,
            queued_at: 0,
        });
        self.index.insert(tile.board, id);
        id
    }
}

/// Walk parent links back from `end` and return the tiles in start-to-end order
pub fn reconstruct(arena: &Arena, end: NodeId) -> Vec<Tile> {
    let mut path = Vec::new();
    let mut curr = arena.get(end);
    while let Some(node) = curr {
        path.push(node.tile);
        curr = node.parent.and_then(|p| arena.get(p));
    }
    path.reverse();
    path
}

type HeapEntry = Reverse<(u32, u64, NodeId)>;

/// Open set with stable tie-breaking on insertion order
struct OpenSet {
    heap: BinaryHeap<HeapEntry>,
    next_seq: u64,
}

impl OpenSet {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    fn push(&mut self, arena: &mut Arena, id: NodeId) {
        let node = &mut arena.nodes[id];
        node.queued_at = self.next_seq;
        node.closed = false;
        self.heap.push(Reverse((node.tile.score, self.next_seq, id)));
        self.next_seq += 1;
    }

    /// Lowest-score live node, skipping entries superseded by a later push
    fn pop(&mut self, arena: &Arena) -> Option<NodeId> {
        while let Some(Reverse((_, seq, id))) = self.heap.pop() {
            let node = &arena.nodes[id];
            if !node.closed && node.queued_at == seq {
                return Some(id);
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Search from `start` to `goal` using the configured heuristic
pub fn search(start: Board, goal: Board, config: &SearchConfig) -> SearchResult {
    let heuristic = config.heuristic;
    debug!("search using {} heuristic", heuristic.name());
    search_with(start, goal, |board, goal| heuristic.evaluate(board, goal), config)
}

/// Search with an arbitrary heuristic function.
///
/// `config.heuristic` is ignored; `h` is called once per generated neighbor.
pub fn search_with<H>(start: Board, goal: Board, h: H, config: &SearchConfig) -> SearchResult
where
    H: Fn(&Board, &Tile) -> u32,
{
    let start_time = Instant::now();
    // A timeout too large to represent as an instant means no deadline
    let deadline = config.timeout.and_then(|t| start_time.checked_add(t));
    let goal = Tile::from(goal);

    let mut stats = SearchStats::default();
    let mut arena = Arena::new();
    let mut open = OpenSet::new();

    let start_tile = Tile::new(start, 0, h(&start, &goal));
    debug!("search start: h={}", start_tile.score);
    let start_id = arena.insert(start_tile, None);
    open.push(&mut arena, start_id);
    stats.generated = 1;
    stats.max_open = 1;

    let finish = |outcome: SearchOutcome, mut stats: SearchStats| {
        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
        SearchResult { outcome, stats }
    };

    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!("search timed out after {} expansions", stats.expanded);
                return finish(SearchOutcome::Aborted(AbortReason::Timeout), stats);
            }
        }
        if let Some(limit) = config.max_expansions {
            if stats.expanded >= limit {
                warn!("search hit expansion limit {}", limit);
                return finish(SearchOutcome::Aborted(AbortReason::ExpansionLimit), stats);
            }
        }

        let Some(curr_id) = open.pop(&arena) else {
            break;
        };
        let curr = arena.nodes[curr_id].tile;

        if curr.board == goal.board {
            let path = reconstruct(&arena, curr_id);
            debug!(
                "search found {} move path after {} expansions",
                path.len() - 1,
                stats.expanded
            );
            return finish(SearchOutcome::Found(path), stats);
        }

        arena.nodes[curr_id].closed = true;
        stats.expanded += 1;
        trace!("expand cost={} score={}\n{}", curr.cost, curr.score, curr.board);

        for (_, board) in neighbors(&curr.board) {
            let cost = curr.cost + 1;
            let score = cost + h(&board, &goal);

            match arena.lookup(&board) {
                None => {
                    let id = arena.insert(Tile::new(board, cost, score), Some(curr_id));
                    open.push(&mut arena, id);
                    stats.generated += 1;
                }
                Some(id) if cost < arena.nodes[id].tile.cost => {
                    if arena.nodes[id].closed {
                        stats.reopened += 1;
                    }
                    let node = &mut arena.nodes[id];
                    node.tile.cost = cost;
                    node.tile.score = score;
                    node.parent = Some(curr_id);
                    open.push(&mut arena, id);
                }
                Some(_) => {}
            }
        }

        stats.max_open = stats.max_open.max(open.len());
    }

    debug!("open set exhausted after {} expansions", stats.expanded);
    finish(SearchOutcome::NoPath, stats)
}
