//! Recursive game-tree evaluation.

use super::Pruning;
use super::score::terminal_score;
use crate::rules::{legal_moves, placement::place};
use crate::{Board, Player};

/// Full window for an unbounded search.
pub(crate) const FULL_WINDOW: (i32, i32) = (i32::MIN, i32::MAX);

/// Walks the tree below one position and counts the nodes it visits.
#[derive(Debug)]
pub(crate) struct TreeSearch {
    maximizer: Player,
    pruning: Pruning,
    nodes: u64,
}

impl TreeSearch {
    pub(crate) fn new(maximizer: Player, pruning: Pruning) -> Self {
        Self {
            maximizer,
            pruning,
            nodes: 0,
        }
    }

    /// Nodes visited so far.
    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score of `board` with `to_move` on turn.
    ///
    /// Without pruning the window is ignored and the score is exact. With
    /// alpha-beta the score is exact when it lies strictly inside
    /// `(alpha, beta)` and a bound on the far side otherwise.
    pub(crate) fn score(&mut self, board: &Board, to_move: Player, window: (i32, i32)) -> i32 {
        match self.pruning {
            Pruning::None => self.minimax(board, to_move),
            Pruning::AlphaBeta => self.alpha_beta(board, to_move, window.0, window.1),
        }
    }

    fn minimax(&mut self, board: &Board, to_move: Player) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board, self.maximizer) {
            return score;
        }

        let maximizing = to_move == self.maximizer;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for position in legal_moves(board) {
            let child = place(board, position, to_move);
            let score = self.minimax(&child, to_move.opponent());
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    fn alpha_beta(&mut self, board: &Board, to_move: Player, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(board, self.maximizer) {
            return score;
        }

        let maximizing = to_move == self.maximizer;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for position in legal_moves(board) {
            let child = place(board, position, to_move);
            let score = self.alpha_beta(&child, to_move.opponent(), alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
