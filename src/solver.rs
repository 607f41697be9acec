//! Search strategies over the implicit graph of board states.
//!
//! Four strategies share one contract: take a validated initial board, search
//! the state graph defined by `Board::successors`, and return either a
//! [`Solution`] (the full path plus statistics) or
//! [`SearchOutcome::Exhausted`] once the reachable space is spent. Exhaustion
//! is a normal result, not an error; the only error the entry point can
//! return is a [`BoardError`] for a board that fails validation up front.
//!
//! The three best-first strategies (UCS, GBFS, A*) run the same loop and
//! differ only in the priority key: `g`, `h`, or `g + h`. States already
//! popped once are skipped on later pops (lazy deletion), so a state may sit
//! in the queue several times but is expanded at most once. Ties between
//! equal priorities break FIFO via a monotonic sequence number, which keeps
//! runs deterministic.
//!
//! IDA* instead runs depth-first passes bounded by an `f = g + h` threshold,
//! raising the threshold to the minimum pruned `f` between passes. Memory
//! stays proportional to the search depth at the price of re-expanding
//! shallow states every pass. Each pass tracks visited states only along the
//! current recursion path (inserted on descent, removed on backtrack); there
//! is no bookkeeping carried across passes.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::{Duration, Instant};

use log::debug;

use crate::engine::{Board, BoardError, Move};
use crate::heuristics::Heuristic;

/// Observer for the final solution path.
///
/// After a strategy finds the goal it calls `add_step` once per board along
/// the path, initial board first, goal board last. The sink only ever sees
/// finished path states, never in-flight search internals.
pub trait StepSink {
    fn add_step(&mut self, board: &Board);
}

/// A `StepSink` that simply collects owned copies of the path boards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub steps: Vec<Board>,
}

impl StepSink for CollectingSink {
    fn add_step(&mut self, board: &Board) {
        self.steps.push(board.clone());
    }
}

/// Which search algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform Cost Search: priority is `g`. Optimal in move count.
    Ucs,
    /// Greedy Best-First Search: priority is `h` alone. Fast, not optimal.
    Gbfs,
    /// A*: priority is `g + h`. Optimal when the heuristic is admissible.
    AStar,
    /// Iterative Deepening A*: threshold-bounded DFS over `f = g + h`.
    IdaStar,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Ucs => "UCS",
            Strategy::Gbfs => "GBFS",
            Strategy::AStar => "A*",
            Strategy::IdaStar => "IDA*",
        }
    }

    fn priority(&self, g: u32, h: u32) -> u32 {
        match self {
            Strategy::Ucs => g,
            Strategy::Gbfs => h,
            Strategy::AStar | Strategy::IdaStar => g.saturating_add(h),
        }
    }
}

/// A solved puzzle: the board sequence from initial to goal, the moves
/// between them, and the run's statistics.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every board along the path; `boards[0]` is the initial board and the
    /// last entry satisfies `is_goal`.
    pub boards: Vec<Board>,
    /// The move taking `boards[i]` to `boards[i + 1]`.
    pub moves: Vec<Move>,
    /// Path cost in slides; equals `moves.len()`.
    pub cost: u32,
    pub nodes_expanded: u64,
    pub elapsed: Duration,
}

/// Result of a completed search run. Exhaustion is a reportable outcome,
/// not an error.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    Exhausted { nodes_expanded: u64, elapsed: Duration },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

/// One entry in the search-node arena. Parent links are indices into the
/// arena, so path reconstruction is a plain walk backwards through a vector.
struct Node {
    board: Board,
    parent: Option<usize>,
    mv: Option<Move>,
    g: u32,
    h: u32,
}

/// Runs `strategy` with `heuristic` on `board`.
///
/// The board is validated first; a malformed board (missing exit, missing or
/// misaligned primary piece) is reported as an error instead of being
/// searched. UCS ignores the heuristic for ordering but still records `h`
/// values for reporting.
///
/// If `sink` is given it receives every board along the winning path, initial
/// to goal, before the outcome is returned.
pub fn solve(
    board: &Board,
    strategy: Strategy,
    heuristic: Heuristic,
    sink: Option<&mut dyn StepSink>,
) -> Result<SearchOutcome, BoardError> {
    board.validate()?;
    let outcome = match strategy {
        Strategy::IdaStar => ida_star(board, heuristic, sink),
        _ => best_first(board, strategy, heuristic, sink),
    };
    match &outcome {
        SearchOutcome::Solved(solution) => debug!(
            "{} solved: cost {}, {} nodes, {:?}",
            strategy.name(),
            solution.cost,
            solution.nodes_expanded,
            solution.elapsed
        ),
        SearchOutcome::Exhausted {
            nodes_expanded,
            elapsed,
        } => debug!(
            "{} exhausted the state space: {} nodes, {:?}",
            strategy.name(),
            nodes_expanded,
            elapsed
        ),
    }
    Ok(outcome)
}

/// Shared loop for UCS, GBFS, and A*.
fn best_first(
    initial: &Board,
    strategy: Strategy,
    heuristic: Heuristic,
    sink: Option<&mut dyn StepSink>,
) -> SearchOutcome {
    let start = Instant::now();
    let mut arena: Vec<Node> = Vec::new();
    // Reverse turns the max-heap into a min-heap; the middle element is the
    // insertion sequence number, giving FIFO order among equal priorities.
    let mut queue: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut nodes_expanded: u64 = 0;
    let mut seq: u64 = 0;

    let h0 = heuristic.evaluate(initial);
    arena.push(Node {
        board: initial.clone(),
        parent: None,
        mv: None,
        g: 0,
        h: h0,
    });
    queue.push(Reverse((strategy.priority(0, h0), seq, 0)));

    while let Some(Reverse((_, _, index))) = queue.pop() {
        // Lazy deletion: the same state may have been enqueued repeatedly;
        // only the first pop expands it.
        if !visited.insert(arena[index].board.canonical_key()) {
            continue;
        }
        nodes_expanded += 1;

        if arena[index].board.is_goal() {
            return SearchOutcome::Solved(reconstruct(
                &arena,
                index,
                nodes_expanded,
                start.elapsed(),
                sink,
            ));
        }

        let g = arena[index].g + 1;
        for (next_board, mv) in arena[index].board.successors() {
            if visited.contains(&next_board.canonical_key()) {
                continue;
            }
            let h = heuristic.evaluate(&next_board);
            seq += 1;
            let child = arena.len();
            arena.push(Node {
                board: next_board,
                parent: Some(index),
                mv: Some(mv),
                g,
                h,
            });
            queue.push(Reverse((strategy.priority(g, h), seq, child)));
        }
    }

    SearchOutcome::Exhausted {
        nodes_expanded,
        elapsed: start.elapsed(),
    }
}

/// Walks parent links from the goal node back to the root, reverses, and
/// feeds the sink.
fn reconstruct(
    arena: &[Node],
    goal: usize,
    nodes_expanded: u64,
    elapsed: Duration,
    sink: Option<&mut dyn StepSink>,
) -> Solution {
    let mut boards = Vec::new();
    let mut moves = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        boards.push(arena[index].board.clone());
        if let Some(mv) = arena[index].mv {
            moves.push(mv);
        }
        current = arena[index].parent;
    }
    boards.reverse();
    moves.reverse();
    if let Some(sink) = sink {
        for board in &boards {
            sink.add_step(board);
        }
    }
    Solution {
        boards,
        moves,
        cost: arena[goal].g,
        nodes_expanded,
        elapsed,
    }
}

enum DfsOutcome {
    /// Goal reached. The path below the root is accumulated goal-first while
    /// the recursion unwinds.
    Found,
    /// Goal not reached within the threshold; carries the minimum `f` among
    /// pruned descendants, or `u32::MAX` if nothing was pruned.
    Minimum(u32),
}

fn ida_star(
    initial: &Board,
    heuristic: Heuristic,
    sink: Option<&mut dyn StepSink>,
) -> SearchOutcome {
    let start = Instant::now();
    let mut nodes_expanded: u64 = 0;
    let mut threshold = heuristic.evaluate(initial);

    loop {
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(initial.canonical_key());
        let mut path: Vec<(Board, Move)> = Vec::new();

        match bounded_dfs(
            initial,
            0,
            threshold,
            heuristic,
            &mut visited,
            &mut path,
            &mut nodes_expanded,
        ) {
            DfsOutcome::Found => {
                // The unwind pushed goal-first; flip to initial-first.
                path.reverse();
                let mut boards = Vec::with_capacity(path.len() + 1);
                let mut moves = Vec::with_capacity(path.len());
                boards.push(initial.clone());
                for (board, mv) in path {
                    boards.push(board);
                    moves.push(mv);
                }
                if let Some(sink) = sink {
                    for board in &boards {
                        sink.add_step(board);
                    }
                }
                let cost = moves.len() as u32;
                return SearchOutcome::Solved(Solution {
                    boards,
                    moves,
                    cost,
                    nodes_expanded,
                    elapsed: start.elapsed(),
                });
            }
            DfsOutcome::Minimum(u32::MAX) => {
                return SearchOutcome::Exhausted {
                    nodes_expanded,
                    elapsed: start.elapsed(),
                };
            }
            DfsOutcome::Minimum(next) => {
                debug!("IDA* raising threshold from {threshold} to {next}");
                threshold = next;
            }
        }
    }
}

/// Depth-first walk bounded by `threshold` on `f = g + h`.
///
/// `visited` holds the states on the current recursion path: inserted before
/// descending into a child, removed when the child backtracks, so alternate
/// routes through the same state stay reachable within the pass.
fn bounded_dfs(
    board: &Board,
    g: u32,
    threshold: u32,
    heuristic: Heuristic,
    visited: &mut HashSet<String>,
    path: &mut Vec<(Board, Move)>,
    nodes_expanded: &mut u64,
) -> DfsOutcome {
    let f = g.saturating_add(heuristic.evaluate(board));
    if f > threshold {
        return DfsOutcome::Minimum(f);
    }
    *nodes_expanded += 1;

    if board.is_goal() {
        return DfsOutcome::Found;
    }

    let mut min = u32::MAX;
    for (next_board, mv) in board.successors() {
        let key = next_board.canonical_key();
        if !visited.insert(key.clone()) {
            continue;
        }
        let result = bounded_dfs(
            &next_board,
            g + 1,
            threshold,
            heuristic,
            visited,
            path,
            nodes_expanded,
        );
        match result {
            DfsOutcome::Found => {
                path.push((next_board, mv));
                return DfsOutcome::Found;
            }
            DfsOutcome::Minimum(m) => min = min.min(m),
        }
        visited.remove(&key);
    }
    DfsOutcome::Minimum(min)
}
