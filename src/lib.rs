//! Two-player Battleships.
//!
//! Each seat is played by a human at the terminal ([`ConsolePlayer`]) or by
//! an external program ([`AgentPlayer`]) that speaks a newline-delimited JSON
//! protocol over its stdin and stdout. [`GameEngine`] runs the turns.

pub mod core;
mod game;
mod logging;
pub mod player;
pub mod protocol;
pub mod transport;

pub use crate::core::*;
pub use game::*;
pub use logging::init_logging;
pub use player::{AgentPlayer, ConsolePlayer, Player, PlayerError, SetupSource, SharedInput};
pub use protocol::{EngineEvent, Phase, ProtocolError, Setup, SetupError, ShipPlacement};
pub use transport::{InMemoryTransport, ProcessTransport, Transport};
