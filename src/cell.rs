//! Cell states of a Battleships grid.

use core::fmt;

use crate::ship::{Direction, Orientation};

/// Which part of a ship an occupied cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Known to be occupied, part not yet determined.
    Any,
    /// A ship of length one.
    Whole,
    /// End of a ship; the direction points toward the rest of the ship.
    End(Direction),
    /// Interior of a ship lying along the given orientation.
    Mid(Orientation),
}

impl Segment {
    /// Returns `true` when the part has been determined.
    pub fn is_specific(&self) -> bool {
        !matches!(self, Segment::Any)
    }

    /// Orientation implied by the segment on its own, if any.
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Segment::End(dir) => Some(dir.orientation()),
            Segment::Mid(orient) => Some(*orient),
            Segment::Any | Segment::Whole => None,
        }
    }

    /// Whether the ship goes on from this segment in `dir`. Always `false`
    /// for `Any`.
    pub fn continues(&self, dir: Direction) -> bool {
        match self {
            Segment::End(d) => *d == dir,
            Segment::Mid(orient) => dir.orientation() == *orient,
            Segment::Any | Segment::Whole => false,
        }
    }

    /// Whether a cell showing `self` can hold the `expected` part of a ship.
    pub fn admits(&self, expected: Segment) -> bool {
        *self == Segment::Any || *self == expected
    }

    /// Symbol used by the text format.
    pub fn symbol(&self) -> char {
        match self {
            Segment::Any => '#',
            Segment::Whole => 'O',
            Segment::End(Direction::Right) => '<',
            Segment::End(Direction::Left) => '>',
            Segment::End(Direction::Down) => '^',
            Segment::End(Direction::Up) => 'v',
            Segment::Mid(Orientation::Horizontal) => '-',
            Segment::Mid(Orientation::Vertical) => '|',
        }
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Not yet determined.
    #[default]
    Unknown,
    /// No ship here.
    Water,
    /// Part of a ship.
    Occupied(Segment),
}

impl Cell {
    /// Generic occupied cell.
    pub const SHIP: Cell = Cell::Occupied(Segment::Any);

    pub fn is_unknown(&self) -> bool {
        matches!(self, Cell::Unknown)
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Cell::Water)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    /// Segment of an occupied cell.
    pub fn segment(&self) -> Option<Segment> {
        match self {
            Cell::Occupied(seg) => Some(*seg),
            _ => None,
        }
    }

    /// Symbol used by the text format.
    pub fn symbol(&self) -> char {
        match self {
            Cell::Unknown => '.',
            Cell::Water => '~',
            Cell::Occupied(seg) => seg.symbol(),
        }
    }

    /// Parses a text-format symbol. `w` is accepted as an alias for water.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        let cell = match symbol {
            '.' => Cell::Unknown,
            '~' | 'w' | 'W' => Cell::Water,
            '#' => Cell::SHIP,
            'O' | 'o' => Cell::Occupied(Segment::Whole),
            '<' => Cell::Occupied(Segment::End(Direction::Right)),
            '>' => Cell::Occupied(Segment::End(Direction::Left)),
            '^' => Cell::Occupied(Segment::End(Direction::Down)),
            'v' | 'V' => Cell::Occupied(Segment::End(Direction::Up)),
            '-' => Cell::Occupied(Segment::Mid(Orientation::Horizontal)),
            '|' => Cell::Occupied(Segment::Mid(Orientation::Vertical)),
            _ => return None,
        };
        Some(cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Cell; 10] = [
        Cell::Unknown,
        Cell::Water,
        Cell::SHIP,
        Cell::Occupied(Segment::Whole),
        Cell::Occupied(Segment::End(Direction::Up)),
        Cell::Occupied(Segment::End(Direction::Down)),
        Cell::Occupied(Segment::End(Direction::Left)),
        Cell::Occupied(Segment::End(Direction::Right)),
        Cell::Occupied(Segment::Mid(Orientation::Horizontal)),
        Cell::Occupied(Segment::Mid(Orientation::Vertical)),
    ];

    #[test]
    fn symbols_are_distinct_and_parse_back() {
        for cell in ALL {
            assert_eq!(Cell::from_symbol(cell.symbol()), Some(cell));
        }
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.symbol(), b.symbol());
            }
        }
        assert_eq!(Cell::from_symbol('?'), None);
    }

    #[test]
    fn predicates() {
        assert!(Cell::Unknown.is_unknown());
        assert!(!Cell::Unknown.is_occupied());
        assert!(Cell::Water.is_water());
        assert!(Cell::SHIP.is_occupied());
        assert_eq!(Cell::Water.segment(), None);
        assert!(!Segment::Any.is_specific());
        assert!(Segment::Whole.is_specific());
        assert!(Segment::Any.admits(Segment::Whole));
        assert!(!Segment::Whole.admits(Segment::Any));
        assert_eq!(
            Segment::End(Direction::Left).orientation(),
            Some(Orientation::Horizontal)
        );
    }
}
