//! Player trait and implementations
//!
//! A player is a source of moves. This module defines the [`Player`] trait
//! and its two implementations:
//! - [`ConsolePlayer`]: a human typing shots at a terminal
//! - [`AgentPlayer`]: an external process speaking the line protocol
//!
//! Players never own a board. The engine keeps each board and only hands
//! players public views of it.

use thiserror::Error;

use crate::core::{Board, Coord, PublicBoard, ShotResult};
use crate::protocol::{ProtocolError, Setup, SetupError};

/// Faults a player can raise once the game is under way.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("input closed before a shot was entered")]
    InputClosed,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Interface implemented by different player types.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Produce this player's name and fleet layout.
    async fn setup(&mut self) -> Result<Setup, SetupError>;

    /// Show the player its own fleet once setup has been placed. Only a
    /// player at a terminal has any use for this.
    async fn show_own_board(&mut self, _board: &Board) -> Result<(), PlayerError> {
        Ok(())
    }

    /// Choose the next square to fire at.
    ///
    /// `own` is the player's own board and `opponent` the board under
    /// attack, both as public views.
    async fn make_shot(
        &mut self,
        own: &PublicBoard,
        opponent: &PublicBoard,
    ) -> Result<Coord, PlayerError>;

    /// Inform the player of the result of its last shot.
    async fn notify_status(&mut self, _result: ShotResult) -> Result<(), PlayerError> {
        Ok(())
    }

    /// Release any resources held by the player. Called once the game ends,
    /// however it ends.
    async fn shutdown(&mut self) {}
}

pub mod agent;
pub use agent::AgentPlayer;

pub mod console;
pub use console::{ConsolePlayer, SetupSource, SharedInput};
