//! Perfect tic-tac-toe - pure game logic with an exhaustive minimax engine
//!
//! The crate holds everything that does not touch a terminal, a file or
//! the environment.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Position`], [`Move`] and the [`rules`]
//!   (legal moves, placement, terminal classification)
//! - **Search**: [`Engine`] walks every continuation and picks the best
//!   move, preferring quick wins and slow losses
//! - **Phases**: typestate game phases guarded by move contracts
//! - **Round**: the event-driven [`Round`] state machine a front end drives
//!
//! # Example
//!
//! ```
//! use perfect_tictactoe::{Board, Player, Position, Value, minimax};
//!
//! let board: Board = "XX./OO./...".parse()?;
//! let outcome = minimax(&board, Player::X)?;
//! assert_eq!(outcome.best_move, Position::TopRight);
//! assert_eq!(outcome.value, Value::Win);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod contracts;
mod invariants;
mod phases;
mod position;
mod round;
mod typestate;
mod types;

pub mod rules;
pub mod search;

// Crate-level exports - Board model
pub use action::{Move, MoveError};
pub use position::Position;
pub use rules::{TerminalState, apply, legal_moves, terminal_state};
pub use types::{Board, BoardParseError, Player, Square};

// Crate-level exports - Search
pub use search::{
    Engine, Pruning, ScoredMove, SearchConfig, SearchError, SearchOutcome, Value, minimax,
};

// Crate-level exports - Phases and contracts
pub use contracts::{Contract, LegalMove, MoveContract, PlayersTurn, SquareIsEmpty};
pub use invariants::{
    BalancedMarksInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, TicTacToeInvariants,
};
pub use phases::Outcome;
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup};

// Crate-level exports - Round state machine
pub use round::{Round, RoundError, RoundEvent, Seats};
