//! Perfect Play library - terminal front end for perfect tic-tac-toe
//!
//! The game logic and the engine live in [`perfect_tictactoe`]; this
//! crate adds configuration, the command line, analysis output and the
//! terminal UI.
//!
//! # Architecture
//!
//! - **Config**: [`PlayConfig`] from TOML, environment and flags
//! - **Analysis**: [`analyze`] and [`self_play`] for scripted use
//! - **TUI**: [`tui::run_tui`] drives a [`perfect_tictactoe::Round`] from
//!   key presses

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod analysis;
mod config;

pub mod cli;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, DEFAULT_CONFIG_PATH, ENV_FIRST, ENV_HUMAN, ENV_PRUNING, PlayConfig,
};

// Crate-level exports - Analysis
pub use analysis::{
    Analysis, GameRecord, analyze, infer_to_move, render_analysis, render_game, self_play,
};
