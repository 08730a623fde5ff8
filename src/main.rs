use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use battleships::{
    init_logging, AgentPlayer, ConsolePlayer, GameConfig, GameEngine, Outcome, Player,
    SharedInput, DEFAULT_BOARD_SIZE,
};
use clap::{Parser, ValueEnum};
use log::error;
use tokio::io::{BufReader, Stdin};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum GameType {
    /// Two humans at this terminal.
    Console,
    /// Two agent programs.
    Agent,
    /// Player 1 at this terminal, player 2 an agent program.
    Mixed,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short = 't', long = "type", value_enum, default_value_t = GameType::Console)]
    game_type: GameType,

    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_board_size)]
    size: usize,

    /// Seconds to wait for each line from an agent before it forfeits.
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, help = "Fix RNG seed for reproducible turn order (e.g., --seed 12345)")]
    seed: Option<u64>,

    /// Setup file for a console seat, or executable for an agent seat.
    player1: String,

    /// Setup file for a console seat, or executable for an agent seat.
    player2: String,

    /// Extra arguments for agent 1, as a JSON array or space separated.
    #[arg(short = '1', value_name = "ARGS", allow_hyphen_values = true)]
    args1: Option<String>,

    /// Extra arguments for agent 2, as a JSON array or space separated.
    #[arg(short = '2', value_name = "ARGS", allow_hyphen_values = true)]
    args2: Option<String>,
}

fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{}", e))?;
    if (1..=26).contains(&size) {
        Ok(size)
    } else {
        Err("board size must be between 1 and 26".to_string())
    }
}

/// Agent arguments are accepted as a JSON string array, or split on
/// whitespace when they are not one.
fn agent_args(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(raw) => serde_json::from_str::<Vec<String>>(raw)
            .unwrap_or_else(|_| raw.split_whitespace().map(String::from).collect()),
    }
}

fn console(setup_file: &str, input: &SharedInput<BufReader<Stdin>>) -> Box<dyn Player> {
    Box::new(ConsolePlayer::stdio(setup_file, input.clone()))
}

fn agent(program: &str, args: Option<&str>, timeout: Option<Duration>) -> anyhow::Result<Box<dyn Player>> {
    let player = AgentPlayer::spawn(program, &agent_args(args), timeout)
        .with_context(|| format!("failed to start agent {}", program))?;
    Ok(Box::new(player))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match play(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn play(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = GameConfig {
        board_size: cli.size,
        read_timeout: cli.timeout.map(Duration::from_secs),
        seed: cli.seed,
    };

    // Both console seats read the one stdin.
    let input = SharedInput::stdin();
    let (first, second) = match cli.game_type {
        GameType::Console => (
            console(&cli.player1, &input),
            console(&cli.player2, &input),
        ),
        GameType::Agent => (
            agent(&cli.player1, cli.args1.as_deref(), config.read_timeout)?,
            agent(&cli.player2, cli.args2.as_deref(), config.read_timeout)?,
        ),
        GameType::Mixed => (
            console(&cli.player1, &input),
            agent(&cli.player2, cli.args2.as_deref(), config.read_timeout)?,
        ),
    };

    let report = GameEngine::new(first, second, &config)
        .run()
        .await
        .context("game aborted during setup")?;

    match &report.outcome {
        Outcome::Victory => {
            println!("{} has won!", report.winner_name);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Forfeit { phase, error } => {
            eprintln!(
                "{} forfeited during {}: {}",
                report.loser_name, phase, error
            );
            println!("{} has won!", report.winner_name);
            Ok(ExitCode::FAILURE)
        }
    }
}
