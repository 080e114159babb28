//! Invariants of an in-progress game.
//!
//! Checked after every accepted move in debug builds.

use super::rules::placement::place;
use super::typestate::GameInProgress;
use super::Board;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The opening side has the same number of marks as the other side,
/// or exactly one more.
pub struct BalancedMarksInvariant;

impl Invariant<GameInProgress> for BalancedMarksInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.board().side_to_move(game.first()) == Some(game.to_move())
    }

    fn description() -> &'static str {
        "Opening side leads by zero or one mark and the turn matches"
    }
}

/// Replaying the history onto an empty board reproduces the board.
///
/// Since placements never overwrite, this also shows no square was
/// changed once set.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut replayed = Board::new();
        for action in game.history() {
            if !replayed.is_empty(action.position) {
                return false;
            }
            replayed = place(&replayed, action.position, action.player);
        }
        &replayed == game.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}

/// All in-progress invariants as a composable set.
pub type TicTacToeInvariants = (BalancedMarksInvariant, HistoryConsistentInvariant);
