//! Keyboard mapping.

use crossterm::event::KeyCode;
use perfect_tictactoe::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Leave the program.
    Quit,
    /// Move the cursor.
    Cursor(KeyCode),
    /// Play at the cursor.
    PlaceAtCursor,
    /// Play at a specific cell.
    PlaceAt(Position),
    /// Any other key; starts a round on the title and result screens.
    Other,
}

/// Maps a key to an action.
pub fn action_for(key: KeyCode) -> InputAction {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('x') | KeyCode::Esc => {
            InputAction::Quit
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => InputAction::Cursor(key),
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::PlaceAtCursor,
        KeyCode::Char(c) => match Position::from_key(c) {
            Some(position) => InputAction::PlaceAt(position),
            None => InputAction::Other,
        },
        _ => InputAction::Other,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };

    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}
