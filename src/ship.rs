//! Ship geometry: orientations, directions and located ships.

use core::fmt;

use crate::cell::Segment;

/// Orientation of a ship on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// The other orientation.
    pub fn perpendicular(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Direction from the first cell of a ship toward its last.
    pub fn forward(self) -> Direction {
        match self {
            Orientation::Horizontal => Direction::Right,
            Orientation::Vertical => Direction::Down,
        }
    }

    /// The two directions along this orientation, backward first.
    pub fn directions(self) -> [Direction; 2] {
        [self.forward().opposite(), self.forward()]
    }
}

/// One orthogonal step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column offsets of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Axis this direction moves along.
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }
}

/// A ship of some length placed at (`row`, `col`) with `orientation`.
///
/// The origin is the top-left cell; horizontal ships extend to the right and
/// vertical ships extend down.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    row: usize,
    col: usize,
    orientation: Orientation,
    length: usize,
}

impl Ship {
    /// Creates a ship. Length-one ships are always stored as horizontal so
    /// that equal placements compare equal.
    pub fn new(row: usize, col: usize, orientation: Orientation, length: usize) -> Self {
        let orientation = if length == 1 {
            Orientation::Horizontal
        } else {
            orientation
        };
        Ship {
            row,
            col,
            orientation,
            length,
        }
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Last cell of the ship.
    pub fn end(&self) -> (usize, usize) {
        self.cell(self.length.saturating_sub(1))
    }

    /// The `i`th cell counted from the origin.
    pub fn cell(&self, i: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Horizontal => (self.row, self.col + i),
            Orientation::Vertical => (self.row + i, self.col),
        }
    }

    /// Cells covered by the ship, origin first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| self.cell(i))
    }

    /// Returns `true` if the ship covers (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (r0, c0) = self.origin();
        let (r1, c1) = self.end();
        (r0..=r1).contains(&row) && (c0..=c1).contains(&col)
    }

    /// The segment a solved grid shows at the `i`th cell of this ship.
    pub fn segment_at(&self, i: usize) -> Segment {
        let forward = self.orientation.forward();
        if self.length == 1 {
            Segment::Whole
        } else if i == 0 {
            Segment::End(forward)
        } else if i + 1 == self.length {
            Segment::End(forward.opposite())
        } else {
            Segment::Mid(self.orientation)
        }
    }

    /// Whether the ship lies inside a `rows` x `cols` grid.
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        let Some(last) = self.length.checked_sub(1) else {
            return false;
        };
        let (r, c) = match self.orientation {
            Orientation::Horizontal => (Some(self.row), self.col.checked_add(last)),
            Orientation::Vertical => (self.row.checked_add(last), Some(self.col)),
        };
        matches!((r, c), (Some(r), Some(c)) if r < rows && c < cols)
    }

    /// Returns `true` if the two ships overlap or touch, diagonals included.
    pub fn touches(&self, other: &Ship) -> bool {
        let (a0, b0) = self.origin();
        let (a1, b1) = self.end();
        let (c0, d0) = other.origin();
        let (c1, d1) = other.end();
        a0 <= c1 + 1 && c0 <= a1 + 1 && b0 <= d1 + 1 && d0 <= b1 + 1
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ origin: ({}, {}), orientation: {:?}, length: {} }}",
            self.row, self.col, self.orientation, self.length
        )
    }
}
