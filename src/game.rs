//! Turn engine: sets up both seats, then alternates shots until one fleet is
//! sunk or a player forfeits.

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::core::{Board, Coord, GameConfig, ShotResult};
use crate::player::{Player, PlayerError};
use crate::protocol::{Phase, SetupError};

/// One side of the game: a move source plus the board it owns.
pub struct Seat {
    label: String,
    name: String,
    board: Board,
    player: Box<dyn Player>,
}

impl Seat {
    fn new(label: String, player: Box<dyn Player>, board_size: usize) -> Self {
        Self {
            label,
            name: String::new(),
            board: Board::new(board_size),
            player,
        }
    }

    /// Name announced during setup, or the seat label before that.
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.label
        } else {
            &self.name
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn has_lost(&self) -> bool {
        self.board.all_sunk()
    }

    async fn setup(&mut self) -> Result<(), SetupError> {
        let setup = self.player.setup().await?;
        setup.apply_to(&mut self.board)?;
        self.name = setup.name;
        self.player
            .show_own_board(&self.board)
            .await
            .map_err(SetupError::ShowBoard)
    }
}

/// Where the engine is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Setup,
    AwaitingShot,
    Resolving,
    GameOver,
}

/// A resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Seat index of the player who fired.
    pub shooter: usize,
    pub target: Coord,
    pub result: ShotResult,
}

/// What a call to [`GameEngine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Shot(Turn),
    /// The game is over; see [`GameEngine::report`].
    Over,
}

/// How the game ended.
#[derive(Debug)]
pub enum Outcome {
    /// The loser's fleet was sunk.
    Victory,
    /// The loser failed while the engine was waiting on it.
    Forfeit { phase: Phase, error: PlayerError },
}

/// Summary of a finished game.
#[derive(Debug)]
pub struct GameReport {
    pub winner: usize,
    pub winner_name: String,
    pub loser_name: String,
    pub shots: usize,
    pub outcome: Outcome,
}

impl GameReport {
    pub fn is_forfeit(&self) -> bool {
        matches!(self.outcome, Outcome::Forfeit { .. })
    }
}

/// Errors that stop a game before it can produce a [`GameReport`].
#[derive(Debug, Error)]
pub enum GameError {
    #[error("setup failed for {player}: {source}")]
    Setup {
        player: String,
        #[source]
        source: SetupError,
    },
    #[error("game has not been set up")]
    NotStarted,
}

/// Drives two players through a game.
pub struct GameEngine {
    seats: [Seat; 2],
    active: usize,
    state: TurnState,
    shots: usize,
    seed: Option<u64>,
    report: Option<GameReport>,
}

impl GameEngine {
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>, config: &GameConfig) -> Self {
        Self {
            seats: [
                Seat::new("player 1".to_string(), first, config.board_size),
                Seat::new("player 2".to_string(), second, config.board_size),
            ],
            active: 0,
            state: TurnState::Setup,
            shots: 0,
            seed: config.seed,
            report: None,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Index of the seat whose turn it is.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn seat(&self, index: usize) -> &Seat {
        &self.seats[index]
    }

    /// Shots resolved so far.
    pub fn shots(&self) -> usize {
        self.shots
    }

    pub fn report(&self) -> Option<&GameReport> {
        self.report.as_ref()
    }

    /// Set up both seats in random order. The seat set up first shoots first.
    pub async fn setup(&mut self) -> Result<(), GameError> {
        if self.state != TurnState::Setup {
            return Ok(());
        }
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut order = [0, 1];
        order.shuffle(&mut rng);

        for index in order {
            let seat = &mut self.seats[index];
            seat.setup().await.map_err(|source| GameError::Setup {
                player: seat.label.clone(),
                source,
            })?;
            info!(
                "{} is {:?} with {} ship(s)",
                seat.label,
                seat.name,
                seat.board.ships().len()
            );
        }
        self.active = order[0];
        self.state = TurnState::AwaitingShot;
        debug!("{} shoots first", self.seats[self.active].name());
        Ok(())
    }

    /// Play a single shot.
    pub async fn step(&mut self) -> Result<Step, GameError> {
        match self.state {
            TurnState::Setup => return Err(GameError::NotStarted),
            TurnState::GameOver => return Ok(Step::Over),
            TurnState::AwaitingShot | TurnState::Resolving => {}
        }

        let shooter = self.active;
        let [first, second] = &mut self.seats;
        let (active, defender) = if shooter == 0 {
            (first, second)
        } else {
            (second, first)
        };

        let own = active.board.public_view();
        let opponent = defender.board.public_view();
        let target = match active.player.make_shot(&own, &opponent).await {
            Ok(target) => target,
            Err(error) => {
                self.forfeit(shooter, Phase::Shoot, error);
                return Ok(Step::Over);
            }
        };

        self.state = TurnState::Resolving;
        let result = defender.board.shoot(target.x, target.y);
        self.shots += 1;
        debug!("{} fires at {}: {}", active.name(), target, result);
        let notified = active.player.notify_status(result).await;
        let defeated = result != ShotResult::Miss && defender.has_lost();
        let turn = Turn {
            shooter,
            target,
            result,
        };

        if defeated {
            if let Err(error) = notified {
                warn!(
                    "{} could not be told it won: {}",
                    active.name(),
                    error
                );
            }
            self.finish(shooter, Outcome::Victory);
        } else if let Err(error) = notified {
            self.forfeit(shooter, Phase::Status, error);
        } else {
            if result == ShotResult::Miss {
                self.active = 1 - shooter;
            }
            self.state = TurnState::AwaitingShot;
        }
        Ok(Step::Shot(turn))
    }

    /// Set up, play to the end and release both players.
    pub async fn run(mut self) -> Result<GameReport, GameError> {
        let result = self.play().await;
        self.shutdown().await;
        result
    }

    async fn play(&mut self) -> Result<GameReport, GameError> {
        self.setup().await?;
        while let Step::Shot(_) = self.step().await? {}
        self.report.take().ok_or(GameError::NotStarted)
    }

    /// Release both players' resources.
    pub async fn shutdown(&mut self) {
        for seat in &mut self.seats {
            seat.player.shutdown().await;
        }
    }

    fn forfeit(&mut self, faulty: usize, phase: Phase, error: PlayerError) {
        warn!(
            "{} forfeits during {}: {}",
            self.seats[faulty].name(),
            phase,
            error
        );
        self.finish(1 - faulty, Outcome::Forfeit { phase, error });
    }

    fn finish(&mut self, winner: usize, outcome: Outcome) {
        let report = GameReport {
            winner,
            winner_name: self.seats[winner].name().to_string(),
            loser_name: self.seats[1 - winner].name().to_string(),
            shots: self.shots,
            outcome,
        };
        info!(
            "game over after {} shot(s): {} wins",
            report.shots, report.winner_name
        );
        self.state = TurnState::GameOver;
        self.report = Some(report);
    }
}
