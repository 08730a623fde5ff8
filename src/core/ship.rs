//! Ship identities, orientation and the per-ship damage count.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::coord::Coord;

/// Direction a ship extends from its origin square.
///
/// On the wire this is the single letter `"r"` or `"d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "r")]
    Right,
    #[serde(rename = "d")]
    Down,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Right => write!(f, "right"),
            Orientation::Down => write!(f, "down"),
        }
    }
}

/// Identity of a ship, unique within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u32);

impl ShipId {
    /// Lowercase letter shown for this ship when the board is revealed.
    /// Letters wrap after `z`.
    pub fn glyph(self) -> char {
        (b'a' + (self.0 % 26) as u8) as char
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A ship placed on a board.
///
/// The ship only remembers which squares it covers; the squares themselves,
/// including their hit flags, live in the board's grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    orientation: Orientation,
    cells: Vec<Coord>,
    hits: usize,
}

impl Ship {
    pub(crate) fn new(id: ShipId, orientation: Orientation, cells: Vec<Coord>) -> Self {
        Self {
            id,
            orientation,
            cells,
            hits: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Number of squares the ship covers.
    pub fn length(&self) -> usize {
        self.cells.len()
    }

    /// Covered squares, starting at the origin.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn origin(&self) -> Coord {
        self.cells[0]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Squares of this ship not yet hit.
    pub fn hit_points(&self) -> usize {
        self.length() - self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.hit_points() == 0
    }

    /// Count one more covered square as hit. The board calls this only on a
    /// square's first hit.
    pub(crate) fn record_hit(&mut self) {
        debug_assert!(self.hits < self.length());
        self.hits += 1;
    }
}
