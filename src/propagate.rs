//! Constraint propagation.
//!
//! [`propagate`] applies every deduction rule to a private copy of the grid
//! and repeats full passes until one changes nothing. Deductions only ever
//! move a cell from `Unknown` to `Water` or `Occupied`, or refine
//! `Occupied(Any)` to a specific segment. A rule that would need any other
//! change reports a [`Conflict`] and the pass stops there.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::cell::{Cell, Segment};
use crate::fleet::{components, Component, Fleet, FleetState};
use crate::grid::{Grid, Line};
use crate::ship::{Direction, Orientation, Ship};

/// Outcome of a propagation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// At least one cell changed.
    Progressed,
    /// Nothing could be deduced.
    Fixpoint,
    /// The grid cannot be completed.
    Contradiction(Conflict),
}

impl Status {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Status::Contradiction(_))
    }
}

/// Why a grid has no completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Conflict {
    /// More occupied cells than the line sum.
    Overfilled(Line),
    /// Not enough non-water cells left to reach the line sum.
    Starved(Line),
    /// Occupied cell where water is required, typically a diagonal contact.
    Touching { row: usize, col: usize },
    /// Occupied cells turning a corner.
    Bent { row: usize, col: usize },
    /// A revealed segment cannot be satisfied.
    Shape { row: usize, col: usize },
    /// No remaining ship fits around a partial ship.
    NoPlacement { row: usize, col: usize },
    /// More finished ships of a length than the fleet holds.
    FleetExceeded { length: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Overfilled(line) => write!(f, "{} has too many ship cells", line),
            Conflict::Starved(line) => write!(f, "{} cannot reach its sum", line),
            Conflict::Touching { row, col } => {
                write!(f, "ship at ({}, {}) touches another", row, col)
            }
            Conflict::Bent { row, col } => write!(f, "ship at ({}, {}) is bent", row, col),
            Conflict::Shape { row, col } => {
                write!(f, "segment at ({}, {}) cannot be satisfied", row, col)
            }
            Conflict::NoPlacement { row, col } => {
                write!(f, "no ship fits the run at ({}, {})", row, col)
            }
            Conflict::FleetExceeded { length } => {
                write!(f, "too many ships of length {}", length)
            }
        }
    }
}

/// The deduction rules, in the order a pass applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    /// Saturated lines get water, exhausted lines get ship cells.
    LineSums,
    /// Revealed segments fix their orthogonal neighbours.
    Clues,
    /// Diagonals and the sides of a run are water.
    Isolation,
    /// Ship cells with known neighbours get their segment.
    Shapes,
    /// Cells common to every placement of a partial ship.
    Placement,
    /// Once every ship is found the rest is water.
    FleetComplete,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::LineSums => "line sums",
            Rule::Clues => "clues",
            Rule::Isolation => "isolation",
            Rule::Shapes => "shapes",
            Rule::Placement => "placement",
            Rule::FleetComplete => "fleet complete",
        };
        f.write_str(name)
    }
}

/// Cells one rule set during one pass, with the value each was given.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// 1-based pass number.
    pub pass: usize,
    pub rule: Rule,
    pub cells: Vec<(usize, usize, Cell)>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass {}, {}:", self.pass, self.rule)?;
        for (row, col, cell) in &self.cells {
            write!(f, " ({},{}){}", row, col, cell)?;
        }
        Ok(())
    }
}

type Deduced = Result<(), Conflict>;

/// Runs every deduction rule until a fixpoint or a contradiction.
///
/// The input grid is never modified. On contradiction the returned grid is
/// the partially deduced copy at the moment the conflict was found.
pub fn propagate(grid: &Grid, fleet: &Fleet) -> (Grid, Status) {
    fixpoint(grid, fleet, None)
}

/// [`propagate`], also returning every deduction in the order it was made.
pub fn propagate_steps(grid: &Grid, fleet: &Fleet) -> (Grid, Status, Vec<Step>) {
    let mut steps = Vec::new();
    let (grid, status) = fixpoint(grid, fleet, Some(&mut steps));
    (grid, status, steps)
}

fn fixpoint(grid: &Grid, fleet: &Fleet, mut steps: Option<&mut Vec<Step>>) -> (Grid, Status) {
    let mut work = grid.clone();
    let mut progressed = false;
    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut pass = Pass {
            grid: &mut work,
            fleet,
            changed: false,
            number: passes,
            steps: steps.as_deref_mut(),
            touched: Vec::new(),
        };
        let outcome = pass.run();
        let changed = pass.changed;
        if let Err(conflict) = outcome {
            debug!("contradiction after {} passes: {}", passes, conflict);
            return (work, Status::Contradiction(conflict));
        }
        if !changed {
            break;
        }
        progressed = true;
    }
    trace!("fixpoint after {} passes", passes);
    let status = if progressed {
        Status::Progressed
    } else {
        Status::Fixpoint
    };
    (work, status)
}

/// One sweep of all rules over the grid.
struct Pass<'a> {
    grid: &'a mut Grid,
    fleet: &'a Fleet,
    changed: bool,
    number: usize,
    /// Present when the caller wants the deductions spelled out.
    steps: Option<&'a mut Vec<Step>>,
    touched: Vec<(usize, usize, Cell)>,
}

impl Pass<'_> {
    fn run(&mut self) -> Deduced {
        self.apply(Rule::LineSums, Self::line_sums)?;
        self.apply(Rule::Clues, Self::clues)?;
        self.apply(Rule::Isolation, Self::isolation)?;
        self.apply(Rule::Shapes, Self::shapes)?;
        self.apply(Rule::Placement, Self::runs)?;
        self.apply(Rule::FleetComplete, Self::fleet_complete)
    }

    /// Runs one rule and files the cells it set as a [`Step`].
    fn apply(&mut self, rule: Rule, deduce: fn(&mut Self) -> Deduced) -> Deduced {
        let outcome = deduce(self);
        if let Some(steps) = self.steps.as_deref_mut() {
            if !self.touched.is_empty() {
                steps.push(Step {
                    pass: self.number,
                    rule,
                    cells: core::mem::take(&mut self.touched),
                });
            }
        }
        outcome
    }

    /// Writes a deduced cell.
    fn mark(&mut self, (row, col): (usize, usize), cell: Cell) {
        self.grid.put((row, col), cell);
        self.changed = true;
        if self.steps.is_some() {
            self.touched.push((row, col, cell));
        }
    }

    fn water(&mut self, pos: (usize, usize), conflict: Conflict) -> Deduced {
        match self.grid.at(pos) {
            Cell::Unknown => {
                self.mark(pos, Cell::Water);
                Ok(())
            }
            Cell::Water => Ok(()),
            Cell::Occupied(_) => Err(conflict),
        }
    }

    fn occupy(&mut self, pos: (usize, usize), conflict: Conflict) -> Deduced {
        match self.grid.at(pos) {
            Cell::Unknown => {
                self.mark(pos, Cell::SHIP);
                Ok(())
            }
            Cell::Occupied(_) => Ok(()),
            Cell::Water => Err(conflict),
        }
    }

    fn refine(&mut self, (row, col): (usize, usize), segment: Segment) -> Deduced {
        match self.grid.at((row, col)) {
            Cell::Occupied(Segment::Any) => {
                self.mark((row, col), Cell::Occupied(segment));
                Ok(())
            }
            Cell::Occupied(current) if current == segment => Ok(()),
            _ => Err(Conflict::Shape { row, col }),
        }
    }

    /// Line saturation and exhaustion.
    fn line_sums(&mut self) -> Deduced {
        for line in self.grid.lines() {
            let state = self.grid.tally(line);
            if state.is_overfilled() {
                return Err(Conflict::Overfilled(line));
            }
            if state.is_starved() {
                return Err(Conflict::Starved(line));
            }
            if state.unknown == 0 {
                continue;
            }
            let fill = if state.occupied == state.target {
                Cell::Water
            } else if state.occupied + state.unknown == state.target {
                Cell::SHIP
            } else {
                continue;
            };
            for pos in self.grid.line_cells(line) {
                if self.grid.at(pos).is_unknown() {
                    self.mark(pos, fill);
                }
            }
        }
        Ok(())
    }

    /// Consequences of specific segments for their orthogonal neighbours.
    fn clues(&mut self) -> Deduced {
        for (row, col) in self.grid.positions() {
            let segment = match self.grid.at((row, col)) {
                Cell::Occupied(segment) if segment.is_specific() => segment,
                _ => continue,
            };
            let shape = Conflict::Shape { row, col };
            for dir in Direction::ALL {
                match self.grid.step(row, col, dir) {
                    Some(next) if segment.continues(dir) => self.occupy(next, shape)?,
                    Some(next) => self.water(next, shape)?,
                    None if segment.continues(dir) => return Err(shape),
                    None => {}
                }
            }
        }
        Ok(())
    }

    /// Ships never touch: diagonals of an occupied cell are water, and so
    /// are the sides of a run once its axis is known.
    fn isolation(&mut self) -> Deduced {
        for (row, col) in self.grid.positions() {
            if !self.grid.at((row, col)).is_occupied() {
                continue;
            }
            let touching = Conflict::Touching { row, col };
            let diagonals: Vec<_> = self.grid.diagonals(row, col).collect();
            for pos in diagonals {
                self.water(pos, touching)?;
            }
            let mut axis = None;
            for orient in Orientation::ALL {
                let occupied = orient
                    .directions()
                    .into_iter()
                    .filter_map(|d| self.grid.step(row, col, d))
                    .any(|p| self.grid.at(p).is_occupied());
                if occupied {
                    if axis.is_some() {
                        return Err(Conflict::Bent { row, col });
                    }
                    axis = Some(orient);
                }
            }
            if let Some(orient) = axis {
                for dir in orient.perpendicular().directions() {
                    if let Some(pos) = self.grid.step(row, col, dir) {
                        self.water(pos, Conflict::Bent { row, col })?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Generic occupied cells with four known neighbours get their segment.
    fn shapes(&mut self) -> Deduced {
        for (row, col) in self.grid.positions() {
            if self.grid.at((row, col)) != Cell::SHIP {
                continue;
            }
            let mut occupied: Vec<Direction> = Vec::with_capacity(4);
            let mut settled = true;
            for dir in Direction::ALL {
                if let Some(pos) = self.grid.step(row, col, dir) {
                    match self.grid.at(pos) {
                        Cell::Unknown => settled = false,
                        Cell::Occupied(_) => occupied.push(dir),
                        Cell::Water => {}
                    }
                }
            }
            if !settled {
                continue;
            }
            let segment = match occupied.as_slice() {
                [] => Segment::Whole,
                [dir] => Segment::End(*dir),
                [a, b] if a.orientation() == b.orientation() => Segment::Mid(a.orientation()),
                _ => return Err(Conflict::Bent { row, col }),
            };
            self.refine((row, col), segment)?;
        }
        Ok(())
    }

    /// Fleet bookkeeping plus placement analysis of every partial ship.
    fn runs(&mut self) -> Deduced {
        let found = components(self.grid);
        let mut state = FleetState::default();
        for component in &found {
            let (row, col) = component.first();
            if !component.is_straight() {
                return Err(Conflict::Bent { row, col });
            }
            if !component.complete {
                continue;
            }
            if let Some(ship) = component.as_ship() {
                for (i, (r, c)) in ship.cells().enumerate() {
                    let admitted = self
                        .grid
                        .at((r, c))
                        .segment()
                        .is_some_and(|s| s.admits(ship.segment_at(i)));
                    if !admitted {
                        return Err(Conflict::Shape { row: r, col: c });
                    }
                }
                state.record(ship.length());
            }
        }
        if let Some(length) = state.excess(self.fleet) {
            return Err(Conflict::FleetExceeded { length });
        }

        for component in found.iter().filter(|c| !c.complete) {
            self.settle(component, &state)?;
        }
        Ok(())
    }

    /// Every unknown becomes water once the whole fleet is identified.
    fn fleet_complete(&mut self) -> Deduced {
        if !FleetState::from_grid(self.grid).is_exhausted(self.fleet) {
            return Ok(());
        }
        for pos in self.grid.positions() {
            if self.grid.at(pos).is_unknown() {
                self.mark(pos, Cell::Water);
            }
        }
        Ok(())
    }

    /// Occupies cells shared by every placement of a partial ship and floods
    /// neighbours that no placement reaches.
    fn settle(&mut self, component: &Component, state: &FleetState) -> Deduced {
        let (row, col) = component.first();
        let no_fit = Conflict::NoPlacement { row, col };
        let candidates = self.placements(component, state);
        if candidates.is_empty() {
            return Err(no_fit);
        }
        let cols = self.grid.cols();
        let mut cover = vec![0usize; self.grid.rows() * cols];
        for ship in &candidates {
            for (r, c) in ship.cells() {
                cover[r * cols + c] += 1;
            }
        }
        for (i, &n) in cover.iter().enumerate() {
            if n == candidates.len() {
                self.occupy((i / cols, i % cols), no_fit)?;
            }
        }
        for &(r, c) in &component.cells {
            let around: Vec<_> = self.grid.neighbors4(r, c).collect();
            for pos in around {
                if cover[pos.0 * cols + pos.1] == 0 && !component.contains(pos) {
                    self.water(pos, no_fit)?;
                }
            }
        }
        Ok(())
    }

    /// Every ship of a still-available length that could contain the
    /// component.
    fn placements(&self, component: &Component, state: &FleetState) -> Vec<Ship> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let (first, last) = (component.first(), component.cells[component.len() - 1]);
        let axes: &[Orientation] = match component.axis() {
            Some(Orientation::Horizontal) => &[Orientation::Horizontal],
            Some(Orientation::Vertical) => &[Orientation::Vertical],
            None => &Orientation::ALL,
        };
        let mut found = Vec::new();
        for length in self.fleet.lengths() {
            if length < component.len() || state.remaining(self.fleet, length) == 0 {
                continue;
            }
            if length == 1 {
                let ship = Ship::new(first.0, first.1, Orientation::Horizontal, 1);
                if self.placeable(&ship) {
                    found.push(ship);
                }
                continue;
            }
            for &orient in axes {
                let (lo, hi) = match orient {
                    Orientation::Horizontal => (last.1, first.1),
                    Orientation::Vertical => (last.0, first.0),
                };
                let start = (lo + 1).saturating_sub(length);
                for s in start..=hi {
                    let ship = match orient {
                        Orientation::Horizontal => Ship::new(first.0, s, orient, length),
                        Orientation::Vertical => Ship::new(s, first.1, orient, length),
                    };
                    if ship.fits(rows, cols) && self.placeable(&ship) {
                        found.push(ship);
                    }
                }
            }
        }
        found
    }

    /// A placement is possible when its cells are not water, revealed
    /// segments match, no other ship sits in its surrounding ring, and the
    /// line sums leave room for the cells it would add.
    fn placeable(&self, ship: &Ship) -> bool {
        let grid = &*self.grid;
        let mut added = 0;
        let mut crossing: BTreeMap<Line, usize> = BTreeMap::new();
        for (i, pos) in ship.cells().enumerate() {
            match grid.at(pos) {
                Cell::Water => return false,
                Cell::Occupied(segment) => {
                    if !segment.admits(ship.segment_at(i)) {
                        return false;
                    }
                }
                Cell::Unknown => {
                    added += 1;
                    let across = match ship.orientation() {
                        Orientation::Horizontal => Line::Col(pos.1),
                        Orientation::Vertical => Line::Row(pos.0),
                    };
                    *crossing.entry(across).or_insert(0) += 1;
                }
            }
        }

        let (r0, c0) = ship.origin();
        let (r1, c1) = ship.end();
        for r in r0.saturating_sub(1)..=(r1 + 1).min(grid.rows() - 1) {
            for c in c0.saturating_sub(1)..=(c1 + 1).min(grid.cols() - 1) {
                if !ship.contains(r, c) && grid.at((r, c)).is_occupied() {
                    return false;
                }
            }
        }

        let along = match ship.orientation() {
            Orientation::Horizontal => Line::Row(r0),
            Orientation::Vertical => Line::Col(c0),
        };
        let room = |line: Line, extra: usize| {
            let state = grid.tally(line);
            state.occupied + extra <= state.target
        };
        room(along, added) && crossing.into_iter().all(|(line, n)| room(line, n))
    }
}
