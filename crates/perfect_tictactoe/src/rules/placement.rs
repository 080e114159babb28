//! Move enumeration and placement.

use super::super::action::MoveError;
use super::super::{Board, Player, Position, Square};
use super::terminal_state;
use tracing::{debug, instrument};

/// Every empty cell in row-major order.
///
/// The sequence is empty iff the board is full.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}

/// Places `player`'s mark at `position` on a copy of `board`.
///
/// Fails without touching anything if the board is already decided or
/// the square is taken.
#[instrument(skip(board), fields(board = %board))]
pub fn apply(board: &Board, position: Position, player: Player) -> Result<Board, MoveError> {
    if terminal_state(board).is_terminal() {
        debug!("Rejected move on finished board");
        return Err(MoveError::GameOver);
    }

    if !board.is_empty(position) {
        debug!("Rejected move on occupied square");
        return Err(MoveError::SquareOccupied(position));
    }

    Ok(place(board, position, player))
}

/// Placement without rule checks, for callers that iterate
/// [`legal_moves`] of a non-terminal board.
pub(crate) fn place(board: &Board, position: Position, player: Player) -> Board {
    let mut next = board.clone();
    next.set(position, Square::Occupied(player));
    next
}
