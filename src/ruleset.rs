//! Immutable puzzle parameters: grid dimensions and fleet.

use crate::common::RulesetError;
use crate::config::{STANDARD_FLEET, STANDARD_SIZE};
use crate::fleet::Fleet;

/// Grid dimensions plus the fleet to hide in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawRuleset"))]
pub struct Ruleset {
    rows: usize,
    cols: usize,
    fleet: Fleet,
}

#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawRuleset {
    rows: usize,
    cols: usize,
    fleet: Fleet,
}

#[cfg(feature = "std")]
impl TryFrom<RawRuleset> for Ruleset {
    type Error = RulesetError;

    fn try_from(raw: RawRuleset) -> Result<Self, Self::Error> {
        Ruleset::new(raw.rows, raw.cols, raw.fleet)
    }
}

impl Ruleset {
    /// Validates that the fleet can be laid out on a `rows` x `cols` grid at
    /// all: every ship fits along the longer side and the fleet does not need
    /// more cells than the grid has.
    ///
    /// Length is checked against the longer side only, so on a tall grid a
    /// ship longer than `cols` is accepted and can only be placed vertically.
    pub fn new(rows: usize, cols: usize, fleet: Fleet) -> Result<Self, RulesetError> {
        if rows == 0 || cols == 0 {
            return Err(RulesetError::EmptyGrid { rows, cols });
        }
        if fleet.count(0) > 0 {
            return Err(RulesetError::ZeroLengthShip);
        }
        let capacity = rows * cols;
        if fleet.cells() > capacity {
            return Err(RulesetError::FleetTooLarge {
                cells: fleet.cells(),
                capacity,
            });
        }
        let max = rows.max(cols);
        if let Some(length) = fleet.longest().filter(|&l| l > max) {
            return Err(RulesetError::ShipTooLong { length, max });
        }
        Ok(Ruleset { rows, cols, fleet })
    }

    /// 10x10 with one 4, two 3s, three 2s and four 1s.
    pub fn standard() -> Self {
        Ruleset {
            rows: STANDARD_SIZE,
            cols: STANDARD_SIZE,
            fleet: Fleet::from_lengths(STANDARD_FLEET),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}
