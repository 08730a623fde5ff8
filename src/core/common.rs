//! Common types for Battleships: shot results and placement errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::coord::Coord;
use crate::core::ship::{Orientation, ShipId};

/// Outcome of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    /// Shot landed on a ship that is still afloat.
    Hit,
    /// Shot landed on a ship that has no unhit squares left.
    Sunk,
    /// Shot landed on open water or off the board.
    Miss,
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotResult::Hit => write!(f, "hit"),
            ShotResult::Sunk => write!(f, "sunk"),
            ShotResult::Miss => write!(f, "miss"),
        }
    }
}

/// Errors returned by [`Board::place_ship`](crate::Board::place_ship).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Requested length is zero or longer than allowed.
    #[error("ship length {length} is outside 1..={max}")]
    InvalidLength { length: usize, max: usize },
    /// Some square of the run falls off the grid.
    #[error("ship of length {length} from {origin} going {orientation} leaves the {size}x{size} board")]
    OutOfBounds {
        length: usize,
        origin: Coord,
        orientation: Orientation,
        size: usize,
    },
    /// Some square of the run already belongs to another ship.
    #[error("square {at} is already occupied by ship {occupant}")]
    Overlap { at: Coord, occupant: ShipId },
    /// Random placement gave up.
    #[error("no free position for a ship of length {length} after {attempts} attempts")]
    NoRoom { length: usize, attempts: usize },
}
