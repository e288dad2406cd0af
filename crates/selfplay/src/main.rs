//! Self-play harness - pits difficulty tiers against each other.
//!
//! Games run through the same library calls a user interface would make:
//! `choose_move` for the side to move, then `apply_move`, until the game
//! ends or the ply limit is hit.

mod runner;

use anyhow::Context;
use chess_core::Color;
use chess_engine::{create_initial_state, GameState};
use chess_search::{ComputerPlayer, Difficulty, SearchConfig};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runner::{GameOutcome, SelfPlay};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Self-play - computer vs computer games.
#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Plays computer-vs-computer chess games")]
struct Args {
    /// Difficulty for white (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// Difficulty for black (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    black: Difficulty,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    games: u32,

    /// Stop a game after this many plies
    #[arg(long, default_value = "200")]
    max_plies: u32,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Search configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,

    /// Per-move time budget in milliseconds, overrides the config file
    #[arg(long)]
    max_time_ms: Option<u64>,

    /// Score root moves on all cores
    #[arg(long)]
    parallel: bool,
}

#[derive(Debug, Default)]
struct Tally {
    white_wins: u32,
    black_wins: u32,
    stalemates: u32,
    unfinished: u32,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Checkmate { winner: Color::White } => self.white_wins += 1,
            GameOutcome::Checkmate { winner: Color::Black } => self.black_wins += 1,
            GameOutcome::Stalemate => self.stalemates += 1,
            GameOutcome::PlyLimit => self.unfinished += 1,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if args.parallel {
        config.parallel_root = true;
    }
    if args.max_time_ms.is_some() {
        config.max_time_ms = args.max_time_ms;
    }

    let start = match &args.fen {
        Some(fen) => GameState::from_fen(fen).context("invalid --fen")?,
        None => create_initial_state(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        white = %args.white,
        black = %args.black,
        games = args.games,
        seed,
        "starting self-play"
    );

    let player = ComputerPlayer::new(config, StdRng::seed_from_u64(seed));
    let mut selfplay = SelfPlay::new(player, args.white, args.black, args.max_plies);
    let mut tally = Tally::default();

    for game in 1..=args.games {
        tracing::info!(game, fen = %start.to_fen(), "game started");
        let record = selfplay.play(start.clone());
        tracing::info!(
            game,
            plies = record.moves.len(),
            fen = %record.final_state.to_fen(),
            "{}",
            record.outcome
        );
        tally.record(record.outcome);
    }

    tracing::info!(
        white_wins = tally.white_wins,
        black_wins = tally.black_wins,
        stalemates = tally.stalemates,
        unfinished = tally.unfinished,
        "self-play finished"
    );
    Ok(())
}
