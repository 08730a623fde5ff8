//! Grid coordinates and their text form.
//!
//! Columns are written as letters (`A` is column 0) and rows as plain
//! zero-based integers, so the square `(2, 7)` reads as `C 7`.

use std::fmt;

use thiserror::Error;

use crate::core::ship::Orientation;

/// A square on the grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The square `distance` steps away in `orientation`, or `None` on overflow.
    pub fn step(self, orientation: Orientation, distance: usize) -> Option<Self> {
        match orientation {
            Orientation::Right => self.x.checked_add(distance).map(|x| Self::new(x, self.y)),
            Orientation::Down => self.y.checked_add(distance).map(|y| Self::new(self.x, y)),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match column_letter(self.x) {
            Some(letter) => write!(f, "{} {}", letter, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Why a line could not be read as a `<column> <row>` pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    #[error("expected a column letter and a row number, got {0} token(s)")]
    WrongTokenCount(usize),
    #[error("invalid column {0:?}, expected a single letter")]
    BadColumn(String),
    #[error("invalid row {0:?}, expected a non-negative number")]
    BadRow(String),
}

/// Column index for a single ASCII letter, case-insensitive.
pub fn column_index(token: &str) -> Option<usize> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => None,
    }
}

/// Upper-case letter naming column `x`, if it has one.
pub fn column_letter(x: usize) -> Option<char> {
    u8::try_from(x)
        .ok()
        .filter(|&x| x < 26)
        .map(|x| (b'A' + x) as char)
}

/// Parse a shot written as two whitespace-separated tokens, e.g. `B 3`.
///
/// Only the syntax is checked: a well-formed square outside the board is
/// accepted here and resolves to a miss later.
pub fn parse_shot(line: &str) -> Result<Coord, InputFormatError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [column, row] = tokens[..] else {
        return Err(InputFormatError::WrongTokenCount(tokens.len()));
    };
    let x = column_index(column).ok_or_else(|| InputFormatError::BadColumn(column.to_string()))?;
    let y = row
        .parse::<usize>()
        .map_err(|_| InputFormatError::BadRow(row.to_string()))?;
    Ok(Coord::new(x, y))
}

/// Text form of a shot, the inverse of [`parse_shot`] for lettered columns.
pub fn format_shot(coord: Coord) -> String {
    coord.to_string()
}

