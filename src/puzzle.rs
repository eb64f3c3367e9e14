//! A ruleset paired with its clue grid.

use alloc::vec::Vec;

use crate::cell::Cell;
use crate::common::{PuzzleError, RulesetError};
use crate::grid::Grid;
use crate::layout;
use crate::ruleset::Ruleset;
use crate::ship::Ship;

/// Ruleset plus the initial grid: line sums and any revealed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawPuzzle"))]
pub struct Puzzle {
    ruleset: Ruleset,
    grid: Grid,
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawPuzzle {
    ruleset: Ruleset,
    grid: Grid,
}

#[cfg(feature = "std")]
impl TryFrom<RawPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(raw: RawPuzzle) -> Result<Self, Self::Error> {
        Puzzle::new(raw.ruleset, raw.grid)
    }
}

impl Puzzle {
    /// Checks the grid against the ruleset. Both sum totals must equal the
    /// number of cells the fleet covers.
    pub fn new(ruleset: Ruleset, grid: Grid) -> Result<Self, PuzzleError> {
        if grid.rows() != ruleset.rows() || grid.cols() != ruleset.cols() {
            return Err(RulesetError::GridSize {
                rows: grid.rows(),
                cols: grid.cols(),
            }
            .into());
        }
        let fleet = ruleset.fleet().cells();
        let rows: usize = grid.row_sums().iter().sum();
        let cols: usize = grid.col_sums().iter().sum();
        if rows != fleet || cols != fleet {
            return Err(RulesetError::SumMismatch { fleet, rows, cols }.into());
        }
        Ok(Puzzle { ruleset, grid })
    }

    /// Puzzle without clues.
    pub fn from_sums(
        ruleset: Ruleset,
        row_sums: Vec<usize>,
        col_sums: Vec<usize>,
    ) -> Result<Self, PuzzleError> {
        let grid = Grid::new(ruleset.rows(), ruleset.cols(), row_sums, col_sums)?;
        Puzzle::new(ruleset, grid)
    }

    /// Clue-free puzzle whose line sums come from a fleet placement.
    pub fn from_layout(ruleset: Ruleset, ships: &[Ship]) -> Result<Self, PuzzleError> {
        let grid = layout::solved_grid(&ruleset, ships)?.blank();
        Puzzle::new(ruleset, grid)
    }

    /// Reveals one cell.
    pub fn with_clue(mut self, row: usize, col: usize, cell: Cell) -> Result<Self, PuzzleError> {
        self.grid.set(row, col, cell)?;
        Ok(self)
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of revealed cells.
    pub fn clue_count(&self) -> usize {
        self.grid.cells().filter(|(_, c)| !c.is_unknown()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::Fleet;
    use alloc::vec;
    use crate::ship::Orientation;

    fn small() -> Ruleset {
        Ruleset::new(3, 4, Fleet::from_lengths([3, 1, 1])).unwrap()
    }

    #[test]
    fn sums_must_match_fleet() {
        assert!(Puzzle::from_sums(small(), vec![3, 0, 2], vec![2, 1, 2, 0]).is_ok());
        assert_eq!(
            Puzzle::from_sums(small(), vec![3, 0, 1], vec![2, 1, 2, 0]),
            Err(PuzzleError::InvalidRuleset(RulesetError::SumMismatch {
                fleet: 5,
                rows: 4,
                cols: 5
            }))
        );
        let grid = Grid::new(4, 3, vec![2, 1, 1, 1], vec![2, 2, 1]).unwrap();
        assert_eq!(
            Puzzle::new(small(), grid),
            Err(PuzzleError::InvalidRuleset(RulesetError::GridSize {
                rows: 4,
                cols: 3
            }))
        );
    }

    #[test]
    fn layout_gives_sums_and_clues_are_bounded() {
        let ships = [
            Ship::new(0, 0, Orientation::Horizontal, 3),
            Ship::new(2, 0, Orientation::Horizontal, 1),
            Ship::new(2, 2, Orientation::Vertical, 1),
        ];
        let puzzle = Puzzle::from_layout(small(), &ships).unwrap();
        assert_eq!(puzzle.grid().row_sums(), &[3, 0, 2]);
        assert_eq!(puzzle.grid().col_sums(), &[2, 1, 2, 0]);
        assert_eq!(puzzle.clue_count(), 0);

        let puzzle = puzzle.with_clue(1, 1, Cell::Water).unwrap();
        assert_eq!(puzzle.clue_count(), 1);
        assert_eq!(
            puzzle.with_clue(3, 0, Cell::Water),
            Err(PuzzleError::OutOfBounds { row: 3, col: 0 })
        );
    }
}
