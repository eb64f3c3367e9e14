//! Full consistency check of a finished grid.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::cell::{Cell, Segment};
use crate::fleet::{components, Fleet};
use crate::grid::{Grid, Line};
use crate::ship::Ship;

/// First rule a finished grid breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Violation {
    /// Cell is unknown, or occupied without a specific segment.
    Unresolved { row: usize, col: usize },
    LineSum {
        line: Line,
        expected: usize,
        found: usize,
    },
    /// Occupied cell with an occupied diagonal neighbour.
    Touching { row: usize, col: usize },
    Bent { row: usize, col: usize },
    /// Segment does not match the cell's position in its ship.
    Shape { row: usize, col: usize },
    Fleet {
        length: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unresolved { row, col } => {
                write!(f, "cell ({}, {}) is not resolved", row, col)
            }
            Violation::LineSum {
                line,
                expected,
                found,
            } => write!(f, "{} has {} ship cells, expected {}", line, found, expected),
            Violation::Touching { row, col } => {
                write!(f, "ship at ({}, {}) touches another diagonally", row, col)
            }
            Violation::Bent { row, col } => write!(f, "ship at ({}, {}) is not straight", row, col),
            Violation::Shape { row, col } => {
                write!(f, "segment at ({}, {}) does not match its ship", row, col)
            }
            Violation::Fleet {
                length,
                expected,
                found,
            } => write!(
                f,
                "found {} ships of length {}, fleet has {}",
                found, length, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Violation {}

/// Checks every rule of a solved puzzle against `grid`.
pub fn check(grid: &Grid, fleet: &Fleet) -> Result<(), Violation> {
    if let Some(((row, col), _)) = grid
        .cells()
        .find(|(_, cell)| cell.is_unknown() || *cell == Cell::SHIP)
    {
        return Err(Violation::Unresolved { row, col });
    }
    for line in grid.lines() {
        let state = grid.tally(line);
        if state.occupied != state.target {
            return Err(Violation::LineSum {
                line,
                expected: state.target,
                found: state.occupied,
            });
        }
    }
    for ((row, col), cell) in grid.cells() {
        if cell.is_occupied() && grid.diagonals(row, col).any(|p| grid.at(p).is_occupied()) {
            return Err(Violation::Touching { row, col });
        }
    }

    let mut found: BTreeMap<usize, usize> = BTreeMap::new();
    for component in components(grid) {
        let (row, col) = component.first();
        let ship = component.as_ship().ok_or(Violation::Bent { row, col })?;
        for (i, pos) in ship.cells().enumerate() {
            if grid.at(pos) != Cell::Occupied(ship.segment_at(i)) {
                return Err(Violation::Shape {
                    row: pos.0,
                    col: pos.1,
                });
            }
        }
        *found.entry(ship.length()).or_insert(0) += 1;
    }
    let lengths = fleet.lengths().chain(found.keys().copied());
    for length in lengths {
        let expected = fleet.count(length);
        let count = found.get(&length).copied().unwrap_or(0);
        if count != expected {
            return Err(Violation::Fleet {
                length,
                expected,
                found: count,
            });
        }
    }
    Ok(())
}

/// A grid that passed [`check`]: no unknown cells, every segment specific.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Solution(Grid);

impl Solution {
    pub(crate) fn validated(grid: Grid, fleet: &Fleet) -> Result<Self, Violation> {
        check(&grid, fleet)?;
        Ok(Solution(grid))
    }

    pub fn grid(&self) -> &Grid {
        &self.0
    }

    pub fn into_grid(self) -> Grid {
        self.0
    }

    /// Ships of the solution, ordered by origin.
    pub fn ships(&self) -> Vec<Ship> {
        components(&self.0)
            .iter()
            .filter_map(|c| c.as_ship())
            .collect()
    }

    /// Segment shown at (row, col), `None` for water or out of bounds.
    pub fn segment(&self, row: usize, col: usize) -> Option<Segment> {
        self.0.get(row, col).ok().and_then(|c| c.segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn grid(rows: &[&str], row_sums: Vec<usize>, col_sums: Vec<usize>) -> Grid {
        let mut grid = Grid::new(rows.len(), rows[0].len(), row_sums, col_sums).unwrap();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                grid.set(r, c, Cell::from_symbol(ch).unwrap()).unwrap();
            }
        }
        grid
    }

    #[test]
    fn accepts_a_solved_grid() {
        let g = grid(&["<->~", "~~~~", "O~O~"], vec![3, 0, 2], vec![2, 1, 2, 0]);
        let fleet = Fleet::from_lengths([3, 1, 1]);
        assert_eq!(check(&g, &fleet), Ok(()));
        let solution = Solution::validated(g, &fleet).unwrap();
        assert_eq!(solution.ships().len(), 3);
        assert_eq!(solution.segment(2, 0), Some(Segment::Whole));
        assert_eq!(solution.segment(1, 0), None);
    }

    #[test]
    fn reports_first_violation() {
        let fleet = Fleet::from_lengths([1, 1]);
        let g = grid(&["O~", "~."], vec![1, 0], vec![1, 0]);
        assert_eq!(check(&g, &fleet), Err(Violation::Unresolved { row: 1, col: 1 }));
        let g = grid(&["O~", "~O"], vec![1, 1], vec![1, 1]);
        assert_eq!(check(&g, &fleet), Err(Violation::Touching { row: 0, col: 0 }));
        let g = grid(&["<>", "~~"], vec![2, 0], vec![1, 1]);
        assert_eq!(
            check(&g, &fleet),
            Err(Violation::Fleet {
                length: 1,
                expected: 2,
                found: 0
            })
        );
        let g = grid(&["O~", "~~"], vec![2, 0], vec![1, 0]);
        assert_eq!(
            check(&g, &fleet),
            Err(Violation::LineSum {
                line: Line::Row(0),
                expected: 2,
                found: 1
            })
        );
        let g = grid(&["<<", "~~"], vec![2, 0], vec![1, 1]);
        assert_eq!(check(&g, &Fleet::from_lengths([2])), Err(Violation::Shape { row: 0, col: 1 }));
    }
}
