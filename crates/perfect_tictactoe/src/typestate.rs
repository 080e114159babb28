//! Phase-specific typestate structs for tic-tac-toe.
//!
//! Each phase is its own type. A `GameFinished` always has an outcome
//! and a `GameInProgress` always has a side to move.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::phases::Outcome;
use super::rules::{TerminalState, placement::place, terminal_state};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start with an empty board.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game with the given opening side.
    #[instrument(skip(self))]
    pub fn start(self, first_player: Player) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            first: first_player,
            to_move: first_player,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) first: Player,
    pub(crate) to_move: Player,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked; postconditions in debug builds.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        game.board = place(&game.board, action.position, action.player);
        game.history.push(action);
        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        let result = match terminal_state(&game.board) {
            TerminalState::Won(winner) => {
                debug!(%winner, "Game won");
                GameResult::Finished(game.finish(Outcome::Winner(winner)))
            }
            TerminalState::Draw => {
                debug!("Game drawn");
                GameResult::Finished(game.finish(Outcome::Draw))
            }
            TerminalState::Ongoing => GameResult::InProgress(game),
        };
        Ok(result)
    }

    /// Rebuilds a live game from stored parts.
    pub(crate) fn resume(board: Board, history: Vec<Move>, first: Player, to_move: Player) -> Self {
        Self {
            board,
            history,
            first,
            to_move,
        }
    }

    fn finish(self, outcome: Outcome) -> GameFinished {
        GameFinished {
            board: self.board,
            history: self.history,
            first: self.first,
            outcome,
        }
    }

    /// Returns the current player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the side that opened the game.
    pub fn first(&self) -> Player {
        self.first
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns valid positions in row-major order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Replays moves from an empty board, opening with the first move's
    /// player (X when `moves` is empty).
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameResult, MoveError> {
        let first = moves.first().map(|m| m.player).unwrap_or(Player::X);
        let mut game = GameSetup::new().start(first);

        for (i, action) in moves.iter().enumerate() {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) if i + 1 == moves.len() => {
                    return Ok(GameResult::Finished(g));
                }
                GameResult::Finished(_) => return Err(MoveError::GameOver),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    first: Player,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the side that opened the game.
    pub fn first(&self) -> Player {
        self.first
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_stops_at_win() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomLeft),
            Move::new(Player::X, Position::TopRight),
            Move::new(Player::O, Position::BottomRight),
        ];
        assert_eq!(GameInProgress::replay(&moves), Err(MoveError::GameOver));
        assert!(matches!(
            GameInProgress::replay(&moves[..5]),
            Ok(GameResult::Finished(_))
        ));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_finishing_move_is_checked() {
        let game = GameSetup::new().start(Player::X);
        let Ok(GameResult::InProgress(mut game)) =
            game.make_move(Move::new(Player::X, Position::TopLeft))
        else {
            panic!("Expected in-progress game");
        };

        // O gets two marks it never played, so TopCenter completes a column.
        game.board.set(Position::Center, crate::Square::Occupied(Player::O));
        game.board.set(Position::BottomCenter, crate::Square::Occupied(Player::O));

        assert!(matches!(
            game.make_move(Move::new(Player::O, Position::TopCenter)),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_opening_side_can_be_o() {
        let game = GameSetup::new().start(Player::O);
        let Ok(GameResult::InProgress(game)) = game.make_move(Move::new(Player::O, Position::Center))
        else {
            panic!("Expected in-progress game");
        };
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.first(), Player::O);
    }
}
