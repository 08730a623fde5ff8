//! Line protocol spoken with agent processes.
//!
//! Every message is one line of UTF-8 text. The agent opens with its
//! [`Setup`] record; afterwards the engine sends [`EngineEvent`]s and the
//! agent answers each `shoot` with a `<column> <row>` line.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Coord, InputFormatError, PublicBoard, ShotResult};

pub mod setup;
pub use setup::{Setup, SetupError, ShipPlacement};

/// Stage of the exchange a message belongs to, for error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Shoot,
    Status,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Shoot => write!(f, "shoot"),
            Phase::Status => write!(f, "status"),
        }
    }
}

/// Messages written by the engine to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EngineEvent {
    /// Ask the agent for its next shot.
    Shoot {
        own_board: PublicBoard,
        opponent_board: PublicBoard,
    },
    /// Report the result of the agent's last shot. No reply is expected.
    Status { status: ShotResult },
}

impl EngineEvent {
    /// Encode as a single line, without the trailing newline.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Decode one line. Event names outside the known set are reported as
    /// [`ProtocolError::UnknownEvent`] rather than as bad JSON.
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let invalid = |source| ProtocolError::InvalidJson {
            line: line.to_string(),
            source,
        };
        let value: serde_json::Value = serde_json::from_str(line).map_err(invalid)?;
        match value.get("event").and_then(|e| e.as_str()) {
            Some("shoot") | Some("status") => serde_json::from_str(line).map_err(invalid),
            Some(other) => Err(ProtocolError::UnknownEvent(other.to_string())),
            None => Err(ProtocolError::MissingEvent {
                line: line.to_string(),
            }),
        }
    }
}

/// Faults in the exchange with an agent. Any of these forfeits the game for
/// the agent that caused it.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("could not start agent {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("agent closed its pipe during {phase}")]
    Closed { phase: Phase },
    #[error("agent did not answer within {after:?} during {phase}")]
    Timeout { phase: Phase, after: Duration },
    #[error("line longer than {max} bytes during {phase}")]
    LineTooLong { phase: Phase, max: usize },
    #[error("pipe error during {phase}: {source}")]
    Io {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON {line:?}: {source}")]
    InvalidJson {
        line: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed shot {line:?}: {source}")]
    MalformedShot {
        line: String,
        #[source]
        source: InputFormatError,
    },
    #[error("message has no event name: {line:?}")]
    MissingEvent { line: String },
    #[error("unknown event {0:?}")]
    UnknownEvent(String),
    #[error("could not encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Read an agent's reply to a `shoot` event.
pub fn decode_shot(line: &str) -> Result<Coord, ProtocolError> {
    crate::core::parse_shot(line).map_err(|source| ProtocolError::MalformedShot {
        line: line.to_string(),
        source,
    })
}
