//! Backtracking search over propagated grid copies.
//!
//! Every node is propagated before it branches. The branch cell is the
//! first unknown cell in row-major order, tried occupied first and water
//! second, so solutions come out in a fixed order for a given grid.

use alloc::vec::Vec;

use log::trace;

use crate::cell::Cell;
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::propagate::{propagate, Status};
use crate::validate::Solution;

/// How many solutions to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    FirstOnly,
    /// Stop after `k` solutions.
    CountUpTo(usize),
}

impl SearchMode {
    pub fn limit(self) -> usize {
        match self {
            SearchMode::FirstOnly => 1,
            SearchMode::CountUpTo(k) => k,
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Grids propagated, root included.
    pub nodes: usize,
    /// Nodes rejected by propagation or validation.
    pub pruned: usize,
    pub max_depth: usize,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.pruned += other.pruned;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Solutions in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SolutionSet {
    pub solutions: Vec<Solution>,
    /// The whole tree was explored, so no further solutions exist.
    pub exhausted: bool,
    pub stats: SearchStats,
}

impl SolutionSet {
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn first(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}

/// Finds up to `mode.limit()` solutions of `grid`.
pub fn search(grid: &Grid, fleet: &Fleet, mode: SearchMode) -> SolutionSet {
    let limit = mode.limit();
    if limit == 0 {
        return SolutionSet {
            solutions: Vec::new(),
            exhausted: false,
            stats: SearchStats::default(),
        };
    }
    let mut searcher = Searcher::new(fleet, limit);
    let exhausted = searcher.explore(grid.clone(), 0);
    trace!(
        "search finished: {} solutions, {} nodes, depth {}",
        searcher.solutions.len(),
        searcher.stats.nodes,
        searcher.stats.max_depth
    );
    SolutionSet {
        solutions: searcher.solutions,
        exhausted,
        stats: searcher.stats,
    }
}

struct Searcher<'a> {
    fleet: &'a Fleet,
    limit: usize,
    solutions: Vec<Solution>,
    stats: SearchStats,
    #[cfg(feature = "std")]
    cancel: Option<&'a parallel::Cancel<'a>>,
}

impl<'a> Searcher<'a> {
    fn new(fleet: &'a Fleet, limit: usize) -> Self {
        Searcher {
            fleet,
            limit,
            solutions: Vec::new(),
            stats: SearchStats::default(),
            #[cfg(feature = "std")]
            cancel: None,
        }
    }

    #[cfg(feature = "std")]
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|c| c.is_set())
    }

    #[cfg(not(feature = "std"))]
    fn cancelled(&self) -> bool {
        false
    }

    /// Depth-first search below `grid`. Returns `false` once the search
    /// stopped early, either at the solution limit or on cancellation.
    fn explore(&mut self, grid: Grid, depth: usize) -> bool {
        if self.cancelled() {
            return false;
        }
        let (grid, pos) = match self.visit(grid, depth) {
            None => return true,
            Some(Node::Leaf(solution)) => {
                self.solutions.push(solution);
                return self.solutions.len() < self.limit;
            }
            Some(Node::Branch(grid, pos)) => (grid, pos),
        };
        let mut occupied = grid.clone();
        occupied.put(pos, Cell::SHIP);
        if !self.explore(occupied, depth + 1) {
            return false;
        }
        let mut water = grid;
        water.put(pos, Cell::Water);
        self.explore(water, depth + 1)
    }

    /// Propagates one node. `None` when it was pruned.
    fn visit(&mut self, grid: Grid, depth: usize) -> Option<Node> {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        let node = expand(grid, self.fleet);
        if node.is_none() {
            self.stats.pruned += 1;
        }
        node
    }
}

enum Node {
    Leaf(Solution),
    Branch(Grid, (usize, usize)),
}

fn expand(grid: Grid, fleet: &Fleet) -> Option<Node> {
    let (grid, status) = propagate(&grid, fleet);
    if let Status::Contradiction(conflict) = status {
        trace!("pruned: {}", conflict);
        return None;
    }
    match grid.first_unknown() {
        Some(pos) => Some(Node::Branch(grid, pos)),
        None => match Solution::validated(grid, fleet) {
            Ok(solution) => Some(Node::Leaf(solution)),
            Err(violation) => {
                trace!("rejected leaf: {}", violation);
                None
            }
        },
    }
}

#[cfg(feature = "std")]
pub use parallel::search_parallel;

#[cfg(feature = "std")]
mod parallel {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::config::PARALLEL_DEPTH;

    /// Cancellation flags of every right-hand branch on the path from the
    /// root.
    pub(super) struct Cancel<'a> {
        flag: &'a AtomicBool,
        parent: Option<&'a Cancel<'a>>,
    }

    impl Cancel<'_> {
        pub(super) fn is_set(&self) -> bool {
            self.flag.load(Ordering::Relaxed) || self.parent.is_some_and(|p| p.is_set())
        }
    }

    struct Outcome {
        solutions: Vec<Solution>,
        complete: bool,
        stats: SearchStats,
    }

    /// [`search`] with the top of the tree split across the rayon pool.
    ///
    /// Both branches of a node near the root run with `rayon::join`. The
    /// water branch is cancelled as soon as the occupied branch alone has
    /// found enough solutions, and results are joined occupied-first, so
    /// the returned solutions equal those of the sequential search.
    pub fn search_parallel(grid: &Grid, fleet: &Fleet, mode: SearchMode) -> SolutionSet {
        let limit = mode.limit();
        if limit == 0 {
            return search(grid, fleet, mode);
        }
        let never = AtomicBool::new(false);
        let root = Cancel {
            flag: &never,
            parent: None,
        };
        let outcome = split(grid.clone(), fleet, limit, 0, &root);
        SolutionSet {
            solutions: outcome.solutions,
            exhausted: outcome.complete,
            stats: outcome.stats,
        }
    }

    fn split(grid: Grid, fleet: &Fleet, limit: usize, depth: usize, cancel: &Cancel<'_>) -> Outcome {
        if depth >= PARALLEL_DEPTH {
            let mut searcher = Searcher::new(fleet, limit);
            searcher.cancel = Some(cancel);
            let complete = searcher.explore(grid, depth);
            return Outcome {
                solutions: searcher.solutions,
                complete,
                stats: searcher.stats,
            };
        }
        if cancel.is_set() {
            return Outcome {
                solutions: Vec::new(),
                complete: false,
                stats: SearchStats::default(),
            };
        }

        let mut stats = SearchStats {
            nodes: 1,
            pruned: 0,
            max_depth: depth,
        };
        let (grid, pos) = match expand(grid, fleet) {
            None => {
                stats.pruned = 1;
                return Outcome {
                    solutions: Vec::new(),
                    complete: true,
                    stats,
                };
            }
            Some(Node::Leaf(solution)) => {
                return Outcome {
                    solutions: vec![solution],
                    complete: limit > 1,
                    stats,
                };
            }
            Some(Node::Branch(grid, pos)) => (grid, pos),
        };

        let mut occupied = grid.clone();
        occupied.put(pos, Cell::SHIP);
        let mut water = grid;
        water.put(pos, Cell::Water);

        let enough = AtomicBool::new(false);
        let (left, right) = rayon::join(
            || {
                let out = split(occupied, fleet, limit, depth + 1, cancel);
                if out.solutions.len() >= limit {
                    enough.store(true, Ordering::Relaxed);
                }
                out
            },
            || {
                let scope = Cancel {
                    flag: &enough,
                    parent: Some(cancel),
                };
                split(water, fleet, limit, depth + 1, &scope)
            },
        );

        stats.merge(left.stats);
        stats.merge(right.stats);
        let complete = left.complete && right.complete;
        let mut solutions = left.solutions;
        solutions.extend(right.solutions);
        solutions.truncate(limit);
        Outcome {
            complete: complete && solutions.len() < limit,
            solutions,
            stats,
        }
    }
}
