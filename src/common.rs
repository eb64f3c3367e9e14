//! Common error types for puzzle construction and layout.

use crate::grid::GridError;

/// Reasons a ruleset or puzzle is rejected before solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesetError {
    /// Grid has zero rows or zero columns.
    EmptyGrid { rows: usize, cols: usize },
    /// Fleet contains a ship of length zero.
    ZeroLengthShip,
    /// Fleet needs more cells than the grid holds.
    FleetTooLarge { cells: usize, capacity: usize },
    /// Ship longer than the longest line of the grid.
    ShipTooLong { length: usize, max: usize },
    /// Wrong number of row or column sums.
    SumCount { expected: usize, found: usize },
    /// A line sum larger than the line.
    SumTooLarge { sum: usize, len: usize },
    /// Row sums, column sums and fleet disagree on the number of ship cells.
    SumMismatch {
        fleet: usize,
        rows: usize,
        cols: usize,
    },
    /// Clue grid dimensions differ from the ruleset.
    GridSize { rows: usize, cols: usize },
    /// Stored cells do not cover the grid.
    CellCount { expected: usize, found: usize },
}

impl core::fmt::Display for RulesetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RulesetError::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one row and column, got {}x{}", rows, cols)
            }
            RulesetError::ZeroLengthShip => write!(f, "ship lengths must be positive"),
            RulesetError::FleetTooLarge { cells, capacity } => {
                write!(f, "fleet needs {} cells but the grid has {}", cells, capacity)
            }
            RulesetError::ShipTooLong { length, max } => {
                write!(f, "ship of length {} does not fit in a line of {}", length, max)
            }
            RulesetError::SumCount { expected, found } => {
                write!(f, "expected {} line sums, found {}", expected, found)
            }
            RulesetError::SumTooLarge { sum, len } => {
                write!(f, "line sum {} exceeds line length {}", sum, len)
            }
            RulesetError::SumMismatch { fleet, rows, cols } => write!(
                f,
                "fleet covers {} cells but row sums total {} and column sums total {}",
                fleet, rows, cols
            ),
            RulesetError::GridSize { rows, cols } => {
                write!(f, "clue grid is {}x{}, which does not match the ruleset", rows, cols)
            }
            RulesetError::CellCount { expected, found } => {
                write!(f, "expected {} cells, found {}", expected, found)
            }
        }
    }
}

/// Errors returned by puzzle construction and layout operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A cell outside the grid was addressed.
    OutOfBounds { row: usize, col: usize },
    /// Ruleset or puzzle parameters are inconsistent.
    InvalidRuleset(RulesetError),
    /// Ship placement leaves the grid.
    ShipOutOfBounds,
    /// Two ships of a layout overlap or touch.
    ShipsTouch,
    /// Layout ships do not match the fleet composition.
    FleetMismatch,
    /// Random placement gave up.
    UnableToPlaceShip,
}

impl From<GridError> for PuzzleError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds { row, col } => PuzzleError::OutOfBounds { row, col },
        }
    }
}

impl From<RulesetError> for PuzzleError {
    fn from(err: RulesetError) -> Self {
        PuzzleError::InvalidRuleset(err)
    }
}

impl core::fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PuzzleError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is out of bounds", row, col)
            }
            PuzzleError::InvalidRuleset(e) => write!(f, "invalid ruleset: {}", e),
            PuzzleError::ShipOutOfBounds => write!(f, "ship placement is out of bounds"),
            PuzzleError::ShipsTouch => write!(f, "ships overlap or touch"),
            PuzzleError::FleetMismatch => write!(f, "ships do not match the fleet"),
            PuzzleError::UnableToPlaceShip => write!(f, "unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RulesetError {}

#[cfg(feature = "std")]
impl std::error::Error for PuzzleError {}
