use std::time::Duration;

use log::debug;

use crate::core::{Coord, PublicBoard, ShotResult};
use crate::player::{Player, PlayerError};
use crate::protocol::{decode_shot, EngineEvent, Phase, ProtocolError, Setup, SetupError};
use crate::transport::{ProcessTransport, Transport};

/// A player driven by an external program over a line [`Transport`].
pub struct AgentPlayer<T: Transport = ProcessTransport> {
    transport: T,
}

impl AgentPlayer<ProcessTransport> {
    /// Start `program` and wrap its stdio pipes.
    pub fn spawn(
        program: &str,
        args: &[String],
        read_timeout: Option<Duration>,
    ) -> Result<Self, ProtocolError> {
        Ok(Self::new(ProcessTransport::spawn(program, args, read_timeout)?))
    }
}

impl<T: Transport> AgentPlayer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn send_event(&mut self, event: &EngineEvent, phase: Phase) -> Result<(), ProtocolError> {
        let line = event.encode()?;
        self.transport.send_line(&line, phase).await
    }
}

#[async_trait::async_trait]
impl<T: Transport> Player for AgentPlayer<T> {
    async fn setup(&mut self) -> Result<Setup, SetupError> {
        let line = self.transport.recv_line(Phase::Setup).await?;
        let setup = Setup::decode(&line)?;
        debug!(
            "agent {:?} announced {} ship(s)",
            setup.name,
            setup.ships.len()
        );
        Ok(setup)
    }

    async fn make_shot(
        &mut self,
        own: &PublicBoard,
        opponent: &PublicBoard,
    ) -> Result<Coord, PlayerError> {
        let event = EngineEvent::Shoot {
            own_board: own.clone(),
            opponent_board: opponent.clone(),
        };
        self.send_event(&event, Phase::Shoot).await?;
        let line = self.transport.recv_line(Phase::Shoot).await?;
        Ok(decode_shot(&line)?)
    }

    async fn notify_status(&mut self, result: ShotResult) -> Result<(), PlayerError> {
        self.send_event(&EngineEvent::Status { status: result }, Phase::Status)
            .await?;
        Ok(())
    }

    async fn shutdown(&mut self) {
        self.transport.close().await;
    }
}
