#![cfg_attr(not(feature = "std"), no_std)]

//! Solver for Battleships (Bimaru) solitaire puzzles.
//!
//! A puzzle is a grid with row and column sums, a fleet of ships and a few
//! revealed cells. [`propagate`] deduces forced cells, [`search`] finishes
//! the job by backtracking and [`classify`] tells whether a puzzle is fair.

extern crate alloc;

mod cell;
pub mod classify;
mod common;
pub mod config;
mod fleet;
mod grid;
mod layout;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
pub mod propagate;
mod puzzle;
mod ruleset;
pub mod search;
mod ship;
mod text;
pub mod validate;

pub use cell::{Cell, Segment};
#[cfg(feature = "std")]
pub use classify::classify_parallel;
pub use classify::{classify, Classification};
pub use common::{PuzzleError, RulesetError};
pub use fleet::{Fleet, FleetState};
pub use grid::{Grid, GridError, Line, LineState};
pub use layout::{layouts, random_layout, solved_grid, Layouts};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use propagate::{propagate, propagate_steps, Conflict, Rule, Status, Step};
pub use puzzle::Puzzle;
pub use ruleset::Ruleset;
#[cfg(feature = "std")]
pub use search::search_parallel;
pub use search::{search, SearchMode, SearchStats, SolutionSet};
pub use ship::{Direction, Orientation, Ship};
pub use text::{ParseError, ParseErrorKind};
pub use validate::{Solution, Violation};
