//! Event-driven round state machine.
//!
//! A [`Round`] moves `NotStarted -> Turn -> ... -> GameOver` in response
//! to [`RoundEvent`]s. Human moves and engine moves are separate events,
//! so the front end drives the engine's turn explicitly instead of
//! re-entering its input handler.

use super::action::{Move, MoveError};
use super::phases::Outcome;
use super::search::{Engine, SearchError};
use super::typestate::{GameInProgress, GameResult, GameSetup};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Which side the person plays and which side opens each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Seats {
    /// Side controlled by the person at the keyboard.
    pub human: Player,
    /// Side that moves first in every round.
    pub first: Player,
}

impl Seats {
    /// Side controlled by the engine.
    pub fn engine(&self) -> Player {
        self.human.opponent()
    }

    /// True when `player` is the engine's side.
    pub fn is_engine(&self, player: Player) -> bool {
        player == self.engine()
    }
}

impl Default for Seats {
    fn default() -> Self {
        Self {
            human: Player::X,
            first: Player::X,
        }
    }
}

/// Inputs that drive a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Leave the title screen.
    Start,
    /// The person picked a cell.
    HumanMove(Position),
    /// The front end is ready for the engine to reply.
    EngineMoveRequested,
    /// Clear the board after a finished round.
    NewRound,
}

/// State of the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    /// Nothing played yet.
    #[default]
    NotStarted,
    /// Waiting for `to_move`.
    Turn {
        /// Current position.
        board: Board,
        /// Side on turn.
        to_move: Player,
        /// Accepted moves, oldest first.
        history: Vec<Move>,
    },
    /// Round decided.
    GameOver {
        /// Final position.
        board: Board,
        /// How it ended.
        outcome: Outcome,
        /// Accepted moves, oldest first.
        history: Vec<Move>,
    },
}

/// Error returned when an event cannot be applied to the current round.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum RoundError {
    /// A move event arrived before the round began.
    #[display("Round has not started")]
    NotStarted,

    /// `Start` arrived after the first round began.
    #[display("Round has already started")]
    AlreadyStarted,

    /// `NewRound` arrived before the current round finished.
    #[display("Round is still in progress")]
    RoundInProgress,

    /// A human move arrived while the engine is on turn.
    #[display("It is the engine's turn")]
    NotHumanTurn,

    /// The engine was asked to move on the human's turn.
    #[display("It is the human's turn")]
    NotEngineTurn,

    /// The move itself was illegal.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// The engine could not search the position.
    #[display("{}", _0)]
    #[from]
    Search(SearchError),
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::Move(e) => Some(e),
            RoundError::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl Round {
    /// Applies an event, returning the next round state.
    ///
    /// On error nothing has changed; callers keep their own copy of
    /// `self` if they need to continue from it.
    #[instrument(skip(self, engine), fields(phase = self.phase_name()))]
    pub fn handle(self, event: RoundEvent, seats: &Seats, engine: &Engine) -> Result<Round, RoundError> {
        match (self, event) {
            (Round::NotStarted, RoundEvent::Start) | (Round::GameOver { .. }, RoundEvent::NewRound) => {
                info!(first = %seats.first, human = %seats.human, "New round");
                Ok(Round::fresh(seats))
            }
            (_, RoundEvent::Start) => Err(RoundError::AlreadyStarted),
            (Round::Turn { .. }, RoundEvent::NewRound) => Err(RoundError::RoundInProgress),
            (Round::NotStarted, _) => Err(RoundError::NotStarted),
            (Round::GameOver { .. }, _) => Err(MoveError::GameOver.into()),
            (Round::Turn { board, to_move, history }, RoundEvent::HumanMove(position)) => {
                if seats.is_engine(to_move) {
                    return Err(RoundError::NotHumanTurn);
                }
                let game = GameInProgress::resume(board, history, seats.first, to_move);
                Ok(Round::after(game.make_move(Move::new(to_move, position))?))
            }
            (Round::Turn { board, to_move, history }, RoundEvent::EngineMoveRequested) => {
                if !seats.is_engine(to_move) {
                    return Err(RoundError::NotEngineTurn);
                }
                let outcome = engine.search(&board, to_move)?;
                debug!(best_move = %outcome.best_move, value = %outcome.value, "Engine reply");
                let game = GameInProgress::resume(board, history, seats.first, to_move);
                Ok(Round::after(game.make_move(Move::new(to_move, outcome.best_move))?))
            }
        }
    }

    fn fresh(seats: &Seats) -> Round {
        let game = GameSetup::new().start(seats.first);
        Round::Turn {
            board: game.board().clone(),
            to_move: game.to_move(),
            history: Vec::new(),
        }
    }

    fn after(result: GameResult) -> Round {
        match result {
            GameResult::InProgress(game) => Round::Turn {
                board: game.board().clone(),
                to_move: game.to_move(),
                history: game.history().to_vec(),
            },
            GameResult::Finished(game) => {
                info!(outcome = %game.outcome(), "Round over");
                Round::GameOver {
                    board: game.board().clone(),
                    outcome: *game.outcome(),
                    history: game.history().to_vec(),
                }
            }
        }
    }

    /// Board of the current round, if one has started.
    pub fn board(&self) -> Option<&Board> {
        match self {
            Round::NotStarted => None,
            Round::Turn { board, .. } | Round::GameOver { board, .. } => Some(board),
        }
    }

    /// Side on turn, if the round is live.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            Round::Turn { to_move, .. } => Some(*to_move),
            _ => None,
        }
    }

    /// Outcome, once the round is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Round::GameOver { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        match self {
            Round::NotStarted => &[],
            Round::Turn { history, .. } | Round::GameOver { history, .. } => history,
        }
    }

    /// True when the engine should be asked for a move.
    pub fn awaits_engine(&self, seats: &Seats) -> bool {
        self.to_move().is_some_and(|side| seats.is_engine(side))
    }

    fn phase_name(&self) -> &'static str {
        match self {
            Round::NotStarted => "not_started",
            Round::Turn { .. } => "turn",
            Round::GameOver { .. } => "game_over",
        }
    }
}
