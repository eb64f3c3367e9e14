//! Rectangular grid of cells together with its fixed line sums.
//!
//! The grid is plain storage plus geometric queries. Cells are kept in
//! row-major order; every public accessor is bounds-checked and reports
//! [`GridError::OutOfBounds`] instead of panicking.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::cell::{Cell, Segment};
use crate::common::RulesetError;
use crate::ship::Direction;

/// Errors returned by grid accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Row or column index is outside the grid.
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "OutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}

/// A row or a column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(r) => write!(f, "row {}", r),
            Line::Col(c) => write!(f, "column {}", c),
        }
    }
}

/// Counts over one line, recomputed from the grid on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    pub occupied: usize,
    pub water: usize,
    pub unknown: usize,
    pub target: usize,
}

impl LineState {
    /// Occupied cells still to be found.
    pub fn missing(&self) -> usize {
        self.target.saturating_sub(self.occupied)
    }

    /// More occupied cells than the target allows.
    pub fn is_overfilled(&self) -> bool {
        self.occupied > self.target
    }

    /// Too much water left to ever reach the target.
    pub fn is_starved(&self) -> bool {
        self.occupied + self.unknown < self.target
    }
}

/// Cell states plus row and column target sums.
///
/// Deserialization goes through [`Grid::new`], so a decoded grid has the
/// same guarantees as a constructed one.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawGrid"))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    row_sums: Vec<usize>,
    col_sums: Vec<usize>,
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    row_sums: Vec<usize>,
    col_sums: Vec<usize>,
}

#[cfg(feature = "std")]
impl TryFrom<RawGrid> for Grid {
    type Error = RulesetError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(raw.rows, raw.cols, raw.row_sums, raw.col_sums)?;
        if raw.cells.len() != grid.cells.len() {
            return Err(RulesetError::CellCount {
                expected: grid.cells.len(),
                found: raw.cells.len(),
            });
        }
        grid.cells = raw.cells;
        Ok(grid)
    }
}

const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Grid {
    /// Creates an all-unknown grid with the given line sums.
    pub fn new(
        rows: usize,
        cols: usize,
        row_sums: Vec<usize>,
        col_sums: Vec<usize>,
    ) -> Result<Self, RulesetError> {
        if rows == 0 || cols == 0 {
            return Err(RulesetError::EmptyGrid { rows, cols });
        }
        if row_sums.len() != rows {
            return Err(RulesetError::SumCount {
                expected: rows,
                found: row_sums.len(),
            });
        }
        if col_sums.len() != cols {
            return Err(RulesetError::SumCount {
                expected: cols,
                found: col_sums.len(),
            });
        }
        if let Some(&sum) = row_sums.iter().find(|&&s| s > cols) {
            return Err(RulesetError::SumTooLarge { sum, len: cols });
        }
        if let Some(&sum) = col_sums.iter().find(|&&s| s > rows) {
            return Err(RulesetError::SumTooLarge { sum, len: rows });
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![Cell::Unknown; rows * cols],
            row_sums,
            col_sums,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_sums(&self) -> &[usize] {
        &self.row_sums
    }

    pub fn col_sums(&self) -> &[usize] {
        &self.col_sums
    }

    /// Reads the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[row * self.cols + col])
    }

    /// Writes the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        self.cells[row * self.cols + col] = cell;
        Ok(())
    }

    /// Unchecked read for positions produced by the grid's own iterators.
    #[inline]
    pub(crate) fn at(&self, (row, col): (usize, usize)) -> Cell {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn put(&mut self, (row, col): (usize, usize), cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            Err(GridError::OutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Target sum of a line.
    pub fn target(&self, line: Line) -> Result<usize, GridError> {
        match line {
            Line::Row(r) => self
                .row_sums
                .get(r)
                .copied()
                .ok_or(GridError::OutOfBounds { row: r, col: 0 }),
            Line::Col(c) => self
                .col_sums
                .get(c)
                .copied()
                .ok_or(GridError::OutOfBounds { row: 0, col: c }),
        }
    }

    /// All rows followed by all columns.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        (0..self.rows)
            .map(Line::Row)
            .chain((0..self.cols).map(Line::Col))
    }

    /// Positions of a line in increasing order. Out-of-range lines are empty.
    pub fn line_cells(&self, line: Line) -> impl Iterator<Item = (usize, usize)> {
        let (len, fixed, is_row) = match line {
            Line::Row(r) if r < self.rows => (self.cols, r, true),
            Line::Col(c) if c < self.cols => (self.rows, c, false),
            _ => (0, 0, true),
        };
        (0..len).map(move |i| if is_row { (fixed, i) } else { (i, fixed) })
    }

    /// Occupied, water and unknown counts of a line.
    pub fn line_state(&self, line: Line) -> Result<LineState, GridError> {
        self.target(line)?;
        Ok(self.tally(line))
    }

    /// [`Grid::line_state`] for lines produced by [`Grid::lines`].
    pub(crate) fn tally(&self, line: Line) -> LineState {
        let mut state = LineState {
            target: self.target(line).unwrap_or(0),
            ..LineState::default()
        };
        for pos in self.line_cells(line) {
            match self.at(pos) {
                Cell::Unknown => state.unknown += 1,
                Cell::Water => state.water += 1,
                Cell::Occupied(_) => state.occupied += 1,
            }
        }
        state
    }

    /// Position reached by moving (`dr`, `dc`) from (row, col), if inside.
    pub fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// One step in `dir` from (row, col), if inside.
    pub fn step(&self, row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = dir.delta();
        self.offset(row, col, dr, dc)
    }

    /// Orthogonal neighbours inside the grid.
    pub fn neighbors4(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(row, col, dir))
    }

    /// Diagonal neighbours inside the grid.
    pub fn diagonals(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        DIAGONALS
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(row, col, dr, dc))
    }

    /// All eight surrounding cells inside the grid.
    pub fn neighbors8(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors4(row, col).chain(self.diagonals(row, col))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| (i / cols, i % cols))
    }

    /// Every cell with its position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.positions().map(move |pos| (pos, self.at(pos)))
    }

    /// First unknown cell in row-major order.
    pub fn first_unknown(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(Cell::is_unknown)
            .map(|i| (i / self.cols, i % self.cols))
    }

    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_unknown()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// No unknown cells remain.
    pub fn is_complete(&self) -> bool {
        !self.cells.iter().any(Cell::is_unknown)
    }

    /// Complete, and every occupied cell shows a specific segment.
    pub fn is_resolved(&self) -> bool {
        self.cells
            .iter()
            .all(|c| !c.is_unknown() && *c != Cell::Occupied(Segment::Any))
    }

    /// Same dimensions and sums, every cell unknown.
    pub fn blank(&self) -> Grid {
        Grid {
            cells: vec![Cell::Unknown; self.rows * self.cols],
            ..self.clone()
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.rows, self.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", self.at((r, c)).symbol())?;
            }
            writeln!(f, " {}", self.row_sums[r])?;
        }
        for (c, sum) in self.col_sums.iter().enumerate() {
            if c > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", sum)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn grid_3x4() -> Grid {
        Grid::new(3, 4, vec![3, 0, 2], vec![2, 1, 2, 0]).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions_and_sums() {
        assert_eq!(
            Grid::new(0, 3, vec![], vec![0, 0, 0]),
            Err(RulesetError::EmptyGrid { rows: 0, cols: 3 })
        );
        assert_eq!(
            Grid::new(2, 2, vec![0], vec![0, 0]),
            Err(RulesetError::SumCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Grid::new(2, 2, vec![3, 0], vec![0, 0]),
            Err(RulesetError::SumTooLarge { sum: 3, len: 2 })
        );
    }

    #[test]
    fn bounds_are_checked() {
        let mut grid = grid_3x4();
        assert_eq!(grid.get(2, 3), Ok(Cell::Unknown));
        assert_eq!(grid.get(3, 0), Err(GridError::OutOfBounds { row: 3, col: 0 }));
        assert_eq!(
            grid.set(0, 4, Cell::Water),
            Err(GridError::OutOfBounds { row: 0, col: 4 })
        );
        assert_eq!(grid.target(Line::Col(4)), Err(GridError::OutOfBounds { row: 0, col: 4 }));
        assert_eq!(grid.target(Line::Row(0)), Ok(3));
    }

    #[test]
    fn neighbours_stay_inside() {
        let grid = grid_3x4();
        let corner: Vec<_> = grid.neighbors8(0, 0).collect();
        assert_eq!(corner.len(), 3);
        assert!(corner.contains(&(1, 1)));
        assert_eq!(grid.neighbors4(1, 1).count(), 4);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
        assert_eq!(grid.diagonals(2, 3).collect::<Vec<_>>(), vec![(1, 2)]);
        assert_eq!(grid.step(0, 0, Direction::Up), None);
        assert_eq!(grid.step(0, 0, Direction::Right), Some((0, 1)));
    }

    #[test]
    fn line_state_counts() {
        let mut grid = grid_3x4();
        grid.set(0, 0, Cell::SHIP).unwrap();
        grid.set(0, 3, Cell::Water).unwrap();
        let state = grid.line_state(Line::Row(0)).unwrap();
        assert_eq!(
            state,
            LineState {
                occupied: 1,
                water: 1,
                unknown: 2,
                target: 3
            }
        );
        assert_eq!(state.missing(), 2);
        assert!(!state.is_overfilled());
        assert!(!state.is_starved());
        assert_eq!(grid.first_unknown(), Some((0, 1)));
        assert_eq!(grid.unknown_count(), 10);
        assert!(!grid.is_complete());
    }

    #[test]
    fn positions_are_row_major() {
        let grid = grid_3x4();
        let positions: Vec<_> = grid.positions().take(5).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (0, 2), (0, 3), (1, 0)]);
        let col: Vec<_> = grid.line_cells(Line::Col(2)).collect();
        assert_eq!(col, vec![(0, 2), (1, 2), (2, 2)]);
    }
}
