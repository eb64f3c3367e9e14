//! Fleet composition and the fleet state derived from a grid.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::grid::Grid;
use crate::ship::{Orientation, Ship};

/// Multiset of ship lengths: length -> count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(from = "RawFleet"))]
pub struct Fleet {
    ships: BTreeMap<usize, usize>,
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawFleet {
    ships: BTreeMap<usize, usize>,
}

// zero counts would show up in `lengths` and `longest`
#[cfg(feature = "std")]
impl From<RawFleet> for Fleet {
    fn from(raw: RawFleet) -> Self {
        raw.ships
            .into_iter()
            .fold(Fleet::new(), |fleet, (length, count)| fleet.with(length, count))
    }
}

impl Fleet {
    /// Empty fleet.
    pub fn new() -> Self {
        Fleet::default()
    }

    /// Builds a fleet from a list of ship lengths, one entry per ship.
    pub fn from_lengths<I: IntoIterator<Item = usize>>(lengths: I) -> Self {
        let mut fleet = Fleet::new();
        for length in lengths {
            *fleet.ships.entry(length).or_insert(0) += 1;
        }
        fleet
    }

    /// Adds `count` ships of `length`.
    pub fn with(mut self, length: usize, count: usize) -> Self {
        if count > 0 {
            *self.ships.entry(length).or_insert(0) += count;
        }
        self
    }

    /// Number of ships of the given length.
    pub fn count(&self, length: usize) -> usize {
        self.ships.get(&length).copied().unwrap_or(0)
    }

    /// Distinct lengths, shortest first.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.ships.keys().copied()
    }

    /// (length, count) pairs, shortest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ships.iter().map(|(&l, &n)| (l, n))
    }

    /// One entry per ship, longest first.
    pub fn to_lengths(&self) -> Vec<usize> {
        self.ships
            .iter()
            .rev()
            .flat_map(|(&l, &n)| core::iter::repeat(l).take(n))
            .collect()
    }

    pub fn ship_count(&self) -> usize {
        self.ships.values().sum()
    }

    /// Cells covered by the whole fleet.
    pub fn cells(&self) -> usize {
        self.ships.iter().map(|(l, n)| l * n).sum()
    }

    pub fn longest(&self) -> Option<usize> {
        self.ships.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

/// How many ships of each length a grid already shows as finished.
///
/// A ship counts as identified when it is a straight run of occupied cells
/// whose orthogonal neighbours are all water or the grid edge. The state is
/// always derived from the grid and never stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FleetState {
    identified: BTreeMap<usize, usize>,
}

impl FleetState {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut state = FleetState::default();
        for component in components(grid) {
            if component.complete {
                if let Some(ship) = component.as_ship() {
                    state.record(ship.length());
                }
            }
        }
        state
    }

    pub(crate) fn record(&mut self, length: usize) {
        *self.identified.entry(length).or_insert(0) += 1;
    }

    /// Identified ships of the given length.
    pub fn identified(&self, length: usize) -> usize {
        self.identified.get(&length).copied().unwrap_or(0)
    }

    /// Ships of `length` still to be placed.
    pub fn remaining(&self, fleet: &Fleet, length: usize) -> usize {
        fleet.count(length).saturating_sub(self.identified(length))
    }

    /// First length with more identified ships than the fleet holds.
    pub fn excess(&self, fleet: &Fleet) -> Option<usize> {
        self.identified
            .iter()
            .find(|(&l, &n)| n > fleet.count(l))
            .map(|(&l, _)| l)
    }

    /// Every ship of the fleet has been identified.
    pub fn is_exhausted(&self, fleet: &Fleet) -> bool {
        fleet.iter().all(|(l, n)| self.identified(l) == n) && self.excess(fleet).is_none()
    }
}

/// A maximal orthogonally connected set of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Component {
    /// Cells in row-major order.
    pub cells: Vec<(usize, usize)>,
    /// No orthogonal neighbour is unknown.
    pub complete: bool,
}

impl Component {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn first(&self) -> (usize, usize) {
        self.cells[0]
    }

    pub fn contains(&self, pos: (usize, usize)) -> bool {
        self.cells.binary_search(&pos).is_ok()
    }

    /// Orientation given by the cell layout; `None` for single cells.
    pub fn axis(&self) -> Option<Orientation> {
        let (r0, c0) = self.first();
        if self.len() < 2 {
            None
        } else if self.cells.iter().all(|&(r, _)| r == r0) {
            Some(Orientation::Horizontal)
        } else if self.cells.iter().all(|&(_, c)| c == c0) {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    pub fn is_straight(&self) -> bool {
        self.len() < 2 || self.axis().is_some()
    }

    /// The ship this component forms, if it is straight.
    pub fn as_ship(&self) -> Option<Ship> {
        let (row, col) = self.first();
        if self.len() == 1 {
            return Some(Ship::new(row, col, Orientation::Horizontal, 1));
        }
        self.axis()
            .map(|orientation| Ship::new(row, col, orientation, self.len()))
    }
}

/// Occupied components of the grid, ordered by their first cell.
pub(crate) fn components(grid: &Grid) -> Vec<Component> {
    let cols = grid.cols();
    let mut seen = vec![false; grid.rows() * cols];
    let mut found = Vec::new();
    let mut stack = Vec::new();
    for start in grid.positions() {
        if seen[start.0 * cols + start.1] || !grid.at(start).is_occupied() {
            continue;
        }
        seen[start.0 * cols + start.1] = true;
        stack.push(start);
        let mut cells = Vec::new();
        let mut complete = true;
        while let Some(pos) = stack.pop() {
            cells.push(pos);
            for next in grid.neighbors4(pos.0, pos.1) {
                let cell = grid.at(next);
                if cell.is_unknown() {
                    complete = false;
                } else if cell.is_occupied() && !seen[next.0 * cols + next.1] {
                    seen[next.0 * cols + next.1] = true;
                    stack.push(next);
                }
            }
        }
        cells.sort_unstable();
        found.push(Component { cells, complete });
    }
    found
}
