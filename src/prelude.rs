//! Commonly used types and functions for ease of import.

pub use crate::{
    classify, propagate, search, Cell, Classification, Fleet, Grid, Puzzle, Ruleset, SearchMode,
    Segment, Solution, Status,
};

#[cfg(feature = "std")]
pub use crate::{classify_parallel, search_parallel};
