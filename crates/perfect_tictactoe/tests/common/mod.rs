//! Shared helpers for integration tests.

use perfect_tictactoe::{Board, Player, apply, legal_moves, terminal_state};
use std::collections::HashSet;

/// Every board reachable from the empty board with X opening,
/// terminal boards included.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut frontier = vec![Board::new()];
    seen.insert(Board::new());

    while let Some(board) = frontier.pop() {
        if terminal_state(&board).is_terminal() {
            continue;
        }
        let Some(to_move) = board.side_to_move(Player::X) else {
            panic!("Unbalanced board {board}");
        };
        for position in legal_moves(&board) {
            let next = apply(&board, position, to_move).expect("legal move");
            if seen.insert(next.clone()) {
                frontier.push(next);
            }
        }
    }

    let mut boards: Vec<Board> = seen.into_iter().collect();
    boards.sort_by_key(|b| b.notation());
    boards
}
