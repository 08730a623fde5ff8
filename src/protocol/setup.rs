//! Setup records: a player's name and fleet layout.
//!
//! The same JSON shape is read from setup files by console players and sent
//! as the first line by agents:
//!
//! ```json
//! {"name": "Bot", "ships": [{"size": 3, "x": "B", "y": 4, "dir": "d"}]}
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{column_index, column_letter, Board, Coord, Orientation, PlacementError};
use crate::player::PlayerError;
use crate::protocol::ProtocolError;

/// One ship of a setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub size: usize,
    /// Column letter of the origin square.
    pub x: String,
    /// Row of the origin square.
    pub y: usize,
    pub dir: Orientation,
}

impl fmt::Display for ShipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size {} at {:?} {} going {}",
            self.size, self.x, self.y, self.dir
        )
    }
}

/// Name and fleet of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub name: String,
    pub ships: Vec<ShipPlacement>,
}

/// Errors that abort a player's setup before the first turn.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot place ship ({ship}): {source}")]
    Placement {
        ship: String,
        #[source]
        source: PlacementError,
    },
    #[error("ship ({ship}) has invalid column {column:?}")]
    BadColumn { ship: String, column: String },
    #[error("setup places no ships")]
    EmptyFleet,
    #[error("cannot read setup file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("setup file {} is not a valid setup: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("could not show the placed fleet: {0}")]
    ShowBoard(#[source] PlayerError),
}

impl Setup {
    /// Decode the handshake line an agent sends first.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(line).map_err(|source| ProtocolError::InvalidJson {
            line: line.to_string(),
            source,
        })
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Read a setup file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SetupError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|source| SetupError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Describe the ships already placed on `board`.
    pub fn from_board(name: impl Into<String>, board: &Board) -> Self {
        let ships = board
            .ships()
            .iter()
            .map(|ship| {
                let origin = ship.origin();
                ShipPlacement {
                    size: ship.length(),
                    x: column_letter(origin.x).map(String::from).unwrap_or_default(),
                    y: origin.y,
                    dir: ship.orientation(),
                }
            })
            .collect();
        Self {
            name: name.into(),
            ships,
        }
    }

    /// Place every ship on `board` in order. Stops at the first ship that
    /// cannot be placed.
    pub fn apply_to(&self, board: &mut Board) -> Result<(), SetupError> {
        if self.ships.is_empty() {
            return Err(SetupError::EmptyFleet);
        }
        for ship in &self.ships {
            let x = column_index(&ship.x).ok_or_else(|| SetupError::BadColumn {
                ship: ship.to_string(),
                column: ship.x.clone(),
            })?;
            board
                .place_ship(ship.size, Coord::new(x, ship.y), ship.dir)
                .map_err(|source| SetupError::Placement {
                    ship: ship.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}
