//! Solvability classification of a puzzle.

use alloc::vec::Vec;
use core::fmt;

use log::info;

use crate::config::CLASSIFY_LIMIT;
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::propagate::{propagate, Status};
use crate::puzzle::Puzzle;
use crate::search::{search, SearchMode, SolutionSet};
use crate::validate::Solution;

/// How a puzzle can be solved, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Classification {
    /// Propagation alone yields the unique solution.
    SolvedByLogic(Solution),
    /// Exactly one solution, but search was needed to find it.
    UniqueRequiresSearch(Solution),
    /// At least two solutions; the first two found are kept.
    Ambiguous(Vec<Solution>),
    /// No solution.
    Contradictory,
}

impl Classification {
    /// The unique solution, if there is one.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Classification::SolvedByLogic(s) | Classification::UniqueRequiresSearch(s) => Some(s),
            Classification::Ambiguous(_) | Classification::Contradictory => None,
        }
    }

    /// Every solution found while classifying.
    pub fn solutions(&self) -> &[Solution] {
        match self {
            Classification::SolvedByLogic(s) | Classification::UniqueRequiresSearch(s) => {
                core::slice::from_ref(s)
            }
            Classification::Ambiguous(all) => all,
            Classification::Contradictory => &[],
        }
    }

    pub fn is_unique(&self) -> bool {
        self.solution().is_some()
    }

    /// Short machine-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            Classification::SolvedByLogic(_) => "solved-by-logic",
            Classification::UniqueRequiresSearch(_) => "unique-requires-search",
            Classification::Ambiguous(_) => "ambiguous",
            Classification::Contradictory => "contradictory",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Propagates, then searches for up to two solutions if deduction alone
/// does not finish the grid.
pub fn classify(puzzle: &Puzzle) -> Classification {
    classify_with(puzzle, search)
}

/// [`classify`] with the residual search run in parallel.
#[cfg(feature = "std")]
pub fn classify_parallel(puzzle: &Puzzle) -> Classification {
    classify_with(puzzle, crate::search::search_parallel)
}

fn classify_with<F>(puzzle: &Puzzle, run: F) -> Classification
where
    F: Fn(&Grid, &Fleet, SearchMode) -> SolutionSet,
{
    let fleet = puzzle.ruleset().fleet();
    let (closure, status) = propagate(puzzle.grid(), fleet);
    let result = match status {
        Status::Contradiction(conflict) => {
            info!("contradiction before search: {}", conflict);
            Classification::Contradictory
        }
        _ if closure.is_complete() => match Solution::validated(closure, fleet) {
            Ok(solution) => Classification::SolvedByLogic(solution),
            Err(violation) => {
                info!("deduced grid is invalid: {}", violation);
                Classification::Contradictory
            }
        },
        _ => {
            let found = run(&closure, fleet, SearchMode::CountUpTo(CLASSIFY_LIMIT));
            info!(
                "search visited {} nodes, max depth {}",
                found.stats.nodes, found.stats.max_depth
            );
            let mut solutions = found.solutions;
            if solutions.len() > 1 {
                Classification::Ambiguous(solutions)
            } else {
                match solutions.pop() {
                    Some(solution) => Classification::UniqueRequiresSearch(solution),
                    None => Classification::Contradictory,
                }
            }
        }
    };
    info!("puzzle classified as {}", result);
    result
}
