//! Reference agent: fires at the first blank square of the opponent board.
//!
//! Sends its setup line on start, then answers every `shoot` event on stdin
//! with a shot on stdout. Exits cleanly when stdin closes.

use std::path::PathBuf;

use anyhow::{bail, Context};
use battleships::{
    format_shot, init_logging, Board, EngineEvent, Setup, DEFAULT_BOARD_SIZE, STANDARD_FLEET,
};
use clap::Parser;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Setup file to announce. Without one a random standard fleet is used.
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Name to announce, overriding the setup file's.
    #[arg(long)]
    name: Option<String>,

    /// Board size used for random fleets.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    #[arg(long, help = "Fix RNG seed for the random fleet (e.g., --seed 12345)")]
    seed: Option<u64>,
}

async fn build_setup(args: &Args) -> anyhow::Result<Setup> {
    let mut setup = match &args.setup {
        Some(path) => Setup::load(path).await?,
        None => {
            let mut rng = match args.seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let mut board = Board::new(args.size);
            board
                .place_random_fleet(&mut rng, &STANDARD_FLEET)
                .context("cannot fit the standard fleet")?;
            Setup::from_board("first-empty", &board)
        }
    };
    if let Some(name) = &args.name {
        setup.name = name.clone();
    }
    Ok(setup)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let setup = build_setup(&args).await?;

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout.write_all(setup.encode()?.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    info!("{} is ready with {} ship(s)", setup.name, setup.ships.len());

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match EngineEvent::decode(&line)? {
            EngineEvent::Shoot { opponent_board, .. } => {
                let Some(target) = opponent_board.first_blank() else {
                    bail!("no blank square left to shoot at");
                };
                debug!("shooting at {}", target);
                stdout.write_all(format_shot(target).as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            EngineEvent::Status { status } => debug!("last shot: {}", status),
        }
    }
    Ok(())
}
