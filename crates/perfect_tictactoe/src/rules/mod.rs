//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search engine, the contracts and the round state
//! machine all share one definition of legality and termination.

pub mod draw;
pub mod placement;
pub mod terminal;
pub mod win;

pub use draw::is_full;
pub use placement::{apply, legal_moves};
pub use terminal::{TerminalState, terminal_state};
pub use win::check_winner;
