//! Terminal-state classification.

use super::super::{Board, Player};
use super::{check_winner, is_full};
use serde::{Deserialize, Serialize};

/// Classification of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TerminalState {
    /// Play continues.
    #[display("ongoing")]
    Ongoing,
    /// A player has three in a row.
    #[display("{} wins", _0)]
    Won(Player),
    /// The board is full with no winner.
    #[display("draw")]
    Draw,
}

impl TerminalState {
    /// Returns true for wins and draws.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalState::Ongoing)
    }

    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            TerminalState::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Classifies the board: a win is checked first (rows, columns,
/// diagonals), then a full board is a draw, otherwise play continues.
pub fn terminal_state(board: &Board) -> TerminalState {
    if let Some(winner) = check_winner(board) {
        TerminalState::Won(winner)
    } else if is_full(board) {
        TerminalState::Draw
    } else {
        TerminalState::Ongoing
    }
}
