//! Command-line interface for perfect_play.

use clap::{Args, Parser, Subcommand};
use perfect_tictactoe::{Board, Engine, Player, Pruning, SearchConfig};
use std::path::PathBuf;

/// Perfect Play - tic-tac-toe against an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "perfect_play")]
#[command(about = "Tic-tac-toe against an exhaustive minimax engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the config file (defaults apply when it is missing)
        #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Side you play (x or o)
        #[arg(long)]
        human: Option<Player>,

        /// Let the engine open every round
        #[arg(long)]
        engine_first: bool,

        /// Engine pruning (none or alpha-beta)
        #[arg(long)]
        pruning: Option<Pruning>,
    },

    /// Score every move in a position
    Analyze {
        /// Board in row notation, e.g. "XX./OO./..."
        board: Board,

        /// Side to move; inferred from the mark counts when omitted
        #[arg(long)]
        to_move: Option<Player>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Engine settings
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Let the engine play itself
    Selfplay {
        /// Number of games; the opening side alternates
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Engine settings
        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Engine flags shared by the non-interactive commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct EngineArgs {
    /// Side whose wins score positive (x or o)
    #[arg(long, default_value = "x")]
    pub maximizer: Player,

    /// Tree pruning (none or alpha-beta)
    #[arg(long, default_value = "none")]
    pub pruning: Pruning,

    /// Score root moves in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl EngineArgs {
    /// Engine built from the flags.
    pub fn engine(&self) -> Engine {
        Engine::new(SearchConfig::new(self.maximizer, self.pruning, self.parallel))
    }
}
