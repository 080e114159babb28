//! Perfect Play - Unified CLI
//!
//! Play tic-tac-toe in the terminal or inspect positions from scripts.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use perfect_play::cli::{Cli, Command, EngineArgs};
use perfect_play::{PlayConfig, analyze, render_analysis, render_game, self_play};
use perfect_tictactoe::{Board, Player, Pruning};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            human,
            engine_first,
            pruning,
        } => run_play(config, human, engine_first, pruning),
        Command::Analyze {
            board,
            to_move,
            json,
            engine,
        } => {
            init_stderr_tracing();
            run_analyze(board, to_move, json, engine)
        }
        Command::Selfplay { games, engine } => {
            init_stderr_tracing();
            run_selfplay(games, engine)
        }
    }
}

/// Run the interactive terminal game
fn run_play(
    config_path: PathBuf,
    human: Option<Player>,
    engine_first: bool,
    pruning: Option<Pruning>,
) -> Result<()> {
    let mut config = PlayConfig::load_or_default(&config_path)?.with_env()?;
    if let Some(human) = human {
        config = config.with_human(human);
    }
    if engine_first {
        config = config.with_engine_first();
    }
    if let Some(pruning) = pruning {
        config = config.with_pruning(pruning);
    }

    perfect_play::tui::run_tui(config)
}

/// Print scores for every move in a position
#[instrument(skip(board, engine), fields(board = %board))]
fn run_analyze(board: Board, to_move: Option<Player>, json: bool, engine: EngineArgs) -> Result<()> {
    let analysis = analyze(&board, to_move, &engine.engine())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", render_analysis(&analysis));
    }
    Ok(())
}

/// Play the engine against itself
#[instrument(skip(engine))]
fn run_selfplay(games: u32, engine: EngineArgs) -> Result<()> {
    let engine = engine.engine();
    let mut first = Player::X;
    for index in 1..=games {
        let record = self_play(&engine, first)?;
        println!("{}", render_game(index, &record));
        first = first.opponent();
    }
    info!(games, "Self-play finished");
    Ok(())
}

/// Non-interactive commands log to stderr so stdout stays parseable
fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
