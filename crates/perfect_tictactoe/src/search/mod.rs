//! Optimal-move search.
//!
//! [`Engine::search`] runs a full-depth minimax over every continuation
//! of a position and returns the best move for the side on turn. One side
//! is the maximizer (X unless configured otherwise); its wins score
//! positive and its losses negative, see [`score`] for the depth
//! refinement. Candidates are tried in row-major order and the first one
//! reaching the extremal score is kept, so results are deterministic
//! regardless of pruning or parallel evaluation.

pub mod score;
mod tree;

pub use score::Value;

use crate::rules::{TerminalState, legal_moves, placement::place, terminal_state};
use crate::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use tree::{FULL_WINDOW, TreeSearch};

/// Whether the tree walk may skip branches that cannot change the result.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Pruning {
    /// Visit every node.
    #[default]
    None,
    /// Alpha-beta cut-offs. Same move and score, fewer nodes.
    AlphaBeta,
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct SearchConfig {
    /// Side whose wins score positive.
    pub maximizer: Player,
    /// Tree pruning strategy.
    pub pruning: Pruning,
    /// Evaluate root candidates on the rayon pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            maximizer: Player::X,
            pruning: Pruning::None,
            parallel: false,
        }
    }
}

/// A root candidate and its exact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Cell to play.
    pub position: Position,
    /// Score after playing it, from the maximizer's point of view.
    pub score: i32,
}

impl ScoredMove {
    /// Outcome class of this candidate.
    pub fn value(&self) -> Value {
        Value::from_score(self.score)
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The chosen cell.
    pub best_move: Position,
    /// Outcome class under optimal play, from the maximizer's view.
    pub value: Value,
    /// Depth-refined score behind `value`.
    pub score: i32,
    /// Tree nodes visited.
    pub nodes: u64,
}

/// Error returned when the engine is asked to search a position it cannot.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The position is already decided.
    #[display("Cannot search a finished position ({})", _0)]
    TerminalPosition(TerminalState),

    /// No empty square remains.
    #[display("No legal moves to search")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}

/// Exhaustive minimax engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_new::new)]
pub struct Engine {
    config: SearchConfig,
}

impl Engine {
    /// Returns the engine settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `to_move` and the value of the position.
    ///
    /// The caller's board is only read. Fails on a finished board.
    #[instrument(skip(self, board), fields(board = %board, ?to_move, pruning = %self.config.pruning))]
    pub fn search(&self, board: &Board, to_move: Player) -> Result<SearchOutcome, SearchError> {
        let candidates = self.candidates(board)?;
        let maximizing = to_move == self.config.maximizer;

        let (best, nodes) = if self.runs_parallel() {
            let (scored, nodes) = self.score_candidates(board, to_move, &candidates);
            (select(&scored, maximizing), nodes)
        } else {
            self.search_sequential(board, to_move, &candidates, maximizing)
        };
        let best = best.ok_or(SearchError::NoLegalMoves)?;

        let outcome = SearchOutcome {
            best_move: best.position,
            value: best.value(),
            score: best.score,
            nodes,
        };
        info!(
            best_move = %outcome.best_move,
            value = %outcome.value,
            score = outcome.score,
            nodes = outcome.nodes,
            "Search complete"
        );
        Ok(outcome)
    }

    /// Exact score of every legal move, in row-major order.
    #[instrument(skip(self, board), fields(board = %board, ?to_move))]
    pub fn score_moves(&self, board: &Board, to_move: Player) -> Result<Vec<ScoredMove>, SearchError> {
        let candidates = self.candidates(board)?;
        let (scored, nodes) = self.score_candidates(board, to_move, &candidates);
        debug!(candidates = scored.len(), nodes, "Scored all moves");
        Ok(scored)
    }

    fn candidates(&self, board: &Board) -> Result<Vec<Position>, SearchError> {
        let state = terminal_state(board);
        if state.is_terminal() {
            return Err(SearchError::TerminalPosition(state));
        }
        let candidates = legal_moves(board);
        if candidates.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(candidates)
    }

    fn runs_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.config.parallel
    }

    /// Row-major walk that narrows the window to the best score so far.
    ///
    /// A later candidate can only be taken if it strictly improves, so a
    /// bound returned for a cut-off branch never displaces the incumbent.
    fn search_sequential(
        &self,
        board: &Board,
        to_move: Player,
        candidates: &[Position],
        maximizing: bool,
    ) -> (Option<ScoredMove>, u64) {
        let mut tree = TreeSearch::new(self.config.maximizer, self.config.pruning);
        let mut best: Option<ScoredMove> = None;

        for &position in candidates {
            let window = match best {
                Some(incumbent) if maximizing => (incumbent.score, i32::MAX),
                Some(incumbent) => (i32::MIN, incumbent.score),
                None => FULL_WINDOW,
            };
            let child = place(board, position, to_move);
            let score = tree.score(&child, to_move.opponent(), window);
            debug!(%position, score, "Scored candidate");

            if improves(best, score, maximizing) {
                best = Some(ScoredMove { position, score });
            }
        }

        (best, tree.nodes())
    }

    /// Exact scores for all candidates, each on its own board copy.
    fn score_candidates(
        &self,
        board: &Board,
        to_move: Player,
        candidates: &[Position],
    ) -> (Vec<ScoredMove>, u64) {
        let score_one = |position: Position| {
            let mut tree = TreeSearch::new(self.config.maximizer, self.config.pruning);
            let child = place(board, position, to_move);
            let score = tree.score(&child, to_move.opponent(), FULL_WINDOW);
            (ScoredMove { position, score }, tree.nodes())
        };

        #[cfg(feature = "parallel")]
        let results: Vec<(ScoredMove, u64)> = if self.config.parallel {
            use rayon::prelude::*;
            candidates.par_iter().map(|&p| score_one(p)).collect()
        } else {
            candidates.iter().map(|&p| score_one(p)).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(ScoredMove, u64)> = candidates.iter().map(|&p| score_one(p)).collect();

        let nodes = results.iter().map(|(_, n)| n).sum();
        (results.into_iter().map(|(m, _)| m).collect(), nodes)
    }
}

fn improves(best: Option<ScoredMove>, score: i32, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(incumbent) if maximizing => score > incumbent.score,
        Some(incumbent) => score < incumbent.score,
    }
}

/// First extremal candidate in slice order.
fn select(scored: &[ScoredMove], maximizing: bool) -> Option<ScoredMove> {
    scored.iter().fold(None, |best, candidate| {
        if improves(best, candidate.score, maximizing) {
            Some(*candidate)
        } else {
            best
        }
    })
}

/// Searches with the default engine: X maximizes, no pruning.
pub fn minimax(board: &Board, side_to_move: Player) -> Result<SearchOutcome, SearchError> {
    Engine::default().search(board, side_to_move)
}
