//! Position scoring.
//!
//! Scores are always from the maximizer's point of view. A decided game
//! is worth `1 + empty squares left` to the winner, so a win reached
//! with more of the board still open outranks a slower one and a loss
//! that fills more of the board outranks a quicker one. Draws are 0.
//! The score depends only on the finished board, never on where a
//! search started, so it survives pruning and parallel evaluation.

use crate::rules::{TerminalState, terminal_state};
use crate::{Board, Player};
use serde::{Deserialize, Serialize};

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Outcome class of a position under optimal play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Value {
    /// The maximizer loses.
    #[display("loss")]
    Loss,
    /// Neither side can force a win.
    #[display("draw")]
    Draw,
    /// The maximizer wins.
    #[display("win")]
    Win,
}

impl Value {
    /// Category of a score, discarding the depth refinement.
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => Value::Win,
            -1 => Value::Loss,
            _ => Value::Draw,
        }
    }
}

/// Score of a finished board, or `None` while play continues.
pub(crate) fn terminal_score(board: &Board, maximizer: Player) -> Option<i32> {
    match terminal_state(board) {
        TerminalState::Ongoing => None,
        TerminalState::Draw => Some(DRAW_SCORE),
        TerminalState::Won(winner) => {
            let margin = 1 + board.empty_count() as i32;
            Some(if winner == maximizer { margin } else { -margin })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quicker_win_scores_higher() {
        let quick: Board = "XXX/OO./...".parse().expect("valid notation");
        let slow: Board = "XXX/OOX/O.O".parse().expect("valid notation");
        let quick_score = terminal_score(&quick, Player::X).expect("terminal");
        let slow_score = terminal_score(&slow, Player::X).expect("terminal");
        assert_eq!(quick_score, 5);
        assert_eq!(slow_score, 2);
        assert!(quick_score > slow_score);
    }

    #[test]
    fn test_loss_is_negated_for_other_maximizer() {
        let board: Board = "XXX/OO./...".parse().expect("valid notation");
        assert_eq!(terminal_score(&board, Player::O), Some(-5));
    }

    #[test]
    fn test_ongoing_and_draw() {
        assert_eq!(terminal_score(&Board::new(), Player::X), None);
        let drawn: Board = "XOX/XOO/OXX".parse().expect("valid notation");
        assert_eq!(terminal_score(&drawn, Player::X), Some(DRAW_SCORE));
    }

    #[test]
    fn test_value_from_score() {
        assert_eq!(Value::from_score(7), Value::Win);
        assert_eq!(Value::from_score(0), Value::Draw);
        assert_eq!(Value::from_score(-2), Value::Loss);
        assert!(Value::Loss < Value::Draw && Value::Draw < Value::Win);
    }
}
