//! Plain-text puzzle format and grid rendering.
//!
//! A puzzle file is a list of `key values...` lines followed by an optional
//! `grid` section with one row of cell symbols per line:
//!
//! ```text
//! # a comment
//! rows 3
//! cols 4
//! fleet 3 1 1
//! row-sums 3 0 2
//! col-sums 2 1 2 0
//! grid
//! . . . .
//! . . w .
//! O . . .
//! ```
//!
//! Whitespace between symbols is optional. Comments are only recognised
//! before the `grid` line, since `#` is also the occupied-cell symbol.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::cell::Cell;
use crate::common::PuzzleError;
use crate::fleet::Fleet;
use crate::grid::Grid;
use crate::puzzle::Puzzle;
use crate::ruleset::Ruleset;

/// What went wrong while reading a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownKey(String),
    MissingKey(&'static str),
    BadNumber(String),
    /// A key that takes one value got several, or none.
    ExpectedOne(&'static str),
    BadSymbol(char),
    /// Grid section does not match the declared size.
    GridShape { expected: usize, found: usize },
    Invalid(PuzzleError),
}

/// Parse failure with the 1-based line it was found on; line 0 refers to
/// the document as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        ParseError { line, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        match &self.kind {
            ParseErrorKind::UnknownKey(key) => write!(f, "unknown key '{}'", key),
            ParseErrorKind::MissingKey(key) => write!(f, "missing '{}'", key),
            ParseErrorKind::BadNumber(text) => write!(f, "'{}' is not a number", text),
            ParseErrorKind::ExpectedOne(key) => write!(f, "'{}' takes exactly one value", key),
            ParseErrorKind::BadSymbol(ch) => write!(f, "unknown cell symbol '{}'", ch),
            ParseErrorKind::GridShape { expected, found } => {
                write!(f, "expected {} grid cells, found {}", expected, found)
            }
            ParseErrorKind::Invalid(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[derive(Default)]
struct Header {
    rows: Option<usize>,
    cols: Option<usize>,
    fleet: Option<Vec<usize>>,
    row_sums: Option<Vec<usize>>,
    col_sums: Option<Vec<usize>>,
}

fn numbers<'a>(line: usize, values: impl Iterator<Item = &'a str>) -> Result<Vec<usize>, ParseError> {
    values
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| ParseError::new(line, ParseErrorKind::BadNumber(v.to_string())))
        })
        .collect()
}

fn single(line: usize, key: &'static str, values: Vec<usize>) -> Result<usize, ParseError> {
    match values.as_slice() {
        [n] => Ok(*n),
        _ => Err(ParseError::new(line, ParseErrorKind::ExpectedOne(key))),
    }
}

fn required<T>(value: Option<T>, key: &'static str) -> Result<T, ParseError> {
    value.ok_or_else(|| ParseError::new(0, ParseErrorKind::MissingKey(key)))
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut header = Header::default();
        let mut grid_start = None;
        let mut lines = s.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

        for (n, line) in lines.by_ref() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut words = line.split_whitespace();
            let key = words.next().unwrap_or_default();
            match key {
                "rows" => header.rows = Some(single(n, "rows", numbers(n, words)?)?),
                "cols" => header.cols = Some(single(n, "cols", numbers(n, words)?)?),
                "fleet" => header.fleet = Some(numbers(n, words)?),
                "row-sums" => header.row_sums = Some(numbers(n, words)?),
                "col-sums" => header.col_sums = Some(numbers(n, words)?),
                "grid" => {
                    grid_start = Some(n);
                    break;
                }
                other => {
                    return Err(ParseError::new(n, ParseErrorKind::UnknownKey(other.to_string())))
                }
            }
        }

        let rows = required(header.rows, "rows")?;
        let cols = required(header.cols, "cols")?;
        let fleet = Fleet::from_lengths(required(header.fleet, "fleet")?);
        let invalid = |line: usize, e: PuzzleError| ParseError::new(line, ParseErrorKind::Invalid(e));
        let ruleset = Ruleset::new(rows, cols, fleet).map_err(|e| invalid(0, e.into()))?;
        let mut grid = Grid::new(
            rows,
            cols,
            required(header.row_sums, "row-sums")?,
            required(header.col_sums, "col-sums")?,
        )
        .map_err(|e| invalid(0, e.into()))?;

        if let Some(start) = grid_start {
            let body: Vec<(usize, &str)> = lines.filter(|(_, l)| !l.is_empty()).collect();
            if body.len() != rows {
                return Err(ParseError::new(
                    start,
                    ParseErrorKind::GridShape {
                        expected: rows * cols,
                        found: body.iter().map(|(_, l)| symbols(l).count()).sum(),
                    },
                ));
            }
            for (r, (n, line)) in body.into_iter().enumerate() {
                let found = symbols(line).count();
                if found != cols {
                    return Err(ParseError::new(
                        n,
                        ParseErrorKind::GridShape {
                            expected: cols,
                            found,
                        },
                    ));
                }
                for (c, ch) in symbols(line).enumerate() {
                    let cell = Cell::from_symbol(ch)
                        .ok_or_else(|| ParseError::new(n, ParseErrorKind::BadSymbol(ch)))?;
                    grid.set(r, c, cell).map_err(|e| invalid(n, e.into()))?;
                }
            }
        }

        Puzzle::new(ruleset, grid).map_err(|e| invalid(0, e))
    }
}

fn symbols(line: &str) -> impl Iterator<Item = char> + '_ {
    line.chars().filter(|c| !c.is_whitespace())
}

fn join(f: &mut fmt::Formatter<'_>, values: &[usize]) -> fmt::Result {
    for v in values {
        write!(f, " {}", v)?;
    }
    Ok(())
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        writeln!(f, "rows {}", grid.rows())?;
        writeln!(f, "cols {}", grid.cols())?;
        write!(f, "fleet")?;
        join(f, &self.ruleset().fleet().to_lengths())?;
        write!(f, "\nrow-sums")?;
        join(f, grid.row_sums())?;
        write!(f, "\ncol-sums")?;
        join(f, grid.col_sums())?;
        writeln!(f)?;
        if self.clue_count() > 0 {
            writeln!(f, "grid")?;
            for r in 0..grid.rows() {
                for c in 0..grid.cols() {
                    if c > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", grid.at((r, c)))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Board view: symbols with the row sum at the end of each row and the
/// column sums underneath.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                write!(f, "{} ", self.at((r, c)))?;
            }
            writeln!(f, "| {}", self.row_sums()[r])?;
        }
        for (c, sum) in self.col_sums().iter().enumerate() {
            if c > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", sum)?;
        }
        writeln!(f)
    }
}
