//! Core battleships model
//!
//! Boards, ships and shot resolution. Nothing in here performs I/O; the
//! player and protocol layers build on these types.

pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod ship;
pub mod view;

// Re-export commonly used types
pub use board::{Board, BoardDisplay, Square};
pub use common::{PlacementError, ShotResult};
pub use config::*;
pub use coord::{column_index, column_letter, format_shot, parse_shot, Coord, InputFormatError};
pub use ship::{Orientation, Ship, ShipId};
pub use view::{Glyph, PublicBoard};
