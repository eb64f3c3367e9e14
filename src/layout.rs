//! Fleet placements: rendering a placement as a solved grid, placing a
//! fleet at random and enumerating every placement.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::cell::Cell;
use crate::common::PuzzleError;
use crate::config::{LAYOUT_RESTARTS, PLACEMENT_ATTEMPTS};
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::ruleset::Ruleset;
use crate::ship::{Orientation, Ship};

/// Solved grid showing `ships`, with line sums computed from them.
///
/// Ships must lie inside the grid, must not touch each other (diagonals
/// included) and must match the ruleset's fleet exactly.
pub fn solved_grid(ruleset: &Ruleset, ships: &[Ship]) -> Result<Grid, PuzzleError> {
    let (rows, cols) = (ruleset.rows(), ruleset.cols());
    if ships.iter().any(|s| !s.fits(rows, cols)) {
        return Err(PuzzleError::ShipOutOfBounds);
    }
    for (i, a) in ships.iter().enumerate() {
        if ships[i + 1..].iter().any(|b| a.touches(b)) {
            return Err(PuzzleError::ShipsTouch);
        }
    }
    if Fleet::from_lengths(ships.iter().map(Ship::length)) != *ruleset.fleet() {
        return Err(PuzzleError::FleetMismatch);
    }

    let mut row_sums = vec![0; rows];
    let mut col_sums = vec![0; cols];
    for (r, c) in ships.iter().flat_map(|s| s.cells()) {
        row_sums[r] += 1;
        col_sums[c] += 1;
    }
    let mut grid = Grid::new(rows, cols, row_sums, col_sums)?;
    for pos in grid.positions() {
        grid.put(pos, Cell::Water);
    }
    for ship in ships {
        for (i, pos) in ship.cells().enumerate() {
            grid.put(pos, Cell::Occupied(ship.segment_at(i)));
        }
    }
    Ok(grid)
}

/// Places the whole fleet at random, longest ship first.
///
/// Each ship gets [`PLACEMENT_ATTEMPTS`] tries; when one runs out the layout
/// starts over, up to [`LAYOUT_RESTARTS`] times.
pub fn random_layout<R: Rng + ?Sized>(
    rng: &mut R,
    ruleset: &Ruleset,
) -> Result<Vec<Ship>, PuzzleError> {
    let lengths = ruleset.fleet().to_lengths();
    'restart: for restart in 0..LAYOUT_RESTARTS {
        let mut placed: Vec<Ship> = Vec::with_capacity(lengths.len());
        for &length in &lengths {
            match random_placement(rng, ruleset, length, &placed) {
                Some(ship) => placed.push(ship),
                None => {
                    debug!("layout attempt {} failed on a ship of length {}", restart, length);
                    continue 'restart;
                }
            }
        }
        return Ok(placed);
    }
    Err(PuzzleError::UnableToPlaceShip)
}

fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    ruleset: &Ruleset,
    length: usize,
    placed: &[Ship],
) -> Option<Ship> {
    let (rows, cols) = (ruleset.rows(), ruleset.cols());
    for _ in 0..PLACEMENT_ATTEMPTS {
        let mut orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let extent = match orient {
            Orientation::Horizontal => cols,
            Orientation::Vertical => rows,
        };
        if length > extent {
            orient = orient.perpendicular();
        }
        let (max_r, max_c) = match orient {
            Orientation::Horizontal => (rows - 1, cols.checked_sub(length)?),
            Orientation::Vertical => (rows.checked_sub(length)?, cols - 1),
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        let ship = Ship::new(r, c, orient, length);
        if !placed.iter().any(|other| other.touches(&ship)) {
            return Some(ship);
        }
    }
    None
}

/// Every valid placement of the ruleset's fleet, see [`layouts`].
#[derive(Debug, Clone)]
pub struct Layouts {
    /// Ship lengths in placement order, longest first.
    lengths: Vec<usize>,
    /// Candidate ships for each distinct length, in row-major order.
    options: Vec<Vec<Ship>>,
    /// Index into `options` for each entry of `lengths`.
    group: Vec<usize>,
    placed: Vec<Ship>,
    chosen: Vec<usize>,
    resume: usize,
    done: bool,
}

/// Enumerates every way to hide the fleet, each layout exactly once.
///
/// Ships of equal length are interchangeable, so they are placed in
/// increasing candidate order and a layout never reappears with two equal
/// ships swapped. Layouts come out longest ship first.
pub fn layouts(ruleset: &Ruleset) -> Layouts {
    let (rows, cols) = (ruleset.rows(), ruleset.cols());
    let lengths = ruleset.fleet().to_lengths();
    let mut options: Vec<Vec<Ship>> = Vec::new();
    let mut group = Vec::with_capacity(lengths.len());
    for (i, &length) in lengths.iter().enumerate() {
        if i == 0 || lengths[i - 1] != length {
            let orientations: &[Orientation] = if length == 1 {
                &[Orientation::Horizontal]
            } else {
                &Orientation::ALL
            };
            let mut ships = Vec::new();
            for r in 0..rows {
                for c in 0..cols {
                    for &orient in orientations {
                        let ship = Ship::new(r, c, orient, length);
                        if ship.fits(rows, cols) {
                            ships.push(ship);
                        }
                    }
                }
            }
            options.push(ships);
        }
        group.push(options.len() - 1);
    }
    Layouts {
        lengths,
        options,
        group,
        placed: Vec::new(),
        chosen: Vec::new(),
        resume: 0,
        done: false,
    }
}

impl Layouts {
    fn backtrack(&mut self) {
        match self.chosen.pop() {
            Some(i) => {
                self.placed.pop();
                self.resume = i + 1;
            }
            None => self.done = true,
        }
    }
}

impl Iterator for Layouts {
    type Item = Vec<Ship>;

    fn next(&mut self) -> Option<Vec<Ship>> {
        while !self.done {
            let depth = self.placed.len();
            if depth == self.lengths.len() {
                let layout = self.placed.clone();
                self.backtrack();
                return Some(layout);
            }
            let options = &self.options[self.group[depth]];
            let placed = &self.placed;
            let found = (self.resume..options.len())
                .find(|&i| !placed.iter().any(|other| other.touches(&options[i])));
            match found {
                Some(i) => {
                    self.placed.push(options[i]);
                    self.chosen.push(i);
                    let same = self.lengths.get(depth + 1) == Some(&self.lengths[depth]);
                    self.resume = if same { i + 1 } else { 0 };
                }
                None => self.backtrack(),
            }
        }
        None
    }
}
