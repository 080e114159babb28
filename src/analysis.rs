//! Non-interactive commands: position analysis and engine self-play.

use anyhow::{Context, Result, bail};
use perfect_tictactoe::{
    Board, Engine, GameResult, GameSetup, Move, Outcome, Player, ScoredMove, SearchOutcome,
    terminal_state,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Scores for every move in one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Board in row notation.
    pub board: String,
    /// Side on turn.
    pub to_move: Player,
    /// Side whose wins score positive.
    pub maximizer: Player,
    /// Every legal move in row-major order.
    pub moves: Vec<ScoredMove>,
    /// The engine's choice.
    pub best: SearchOutcome,
}

/// Side to move implied by the mark counts, X when they are level.
pub fn infer_to_move(board: &Board) -> Option<Player> {
    board
        .side_to_move(Player::X)
        .or_else(|| board.side_to_move(Player::O))
}

/// Scores every legal move of `board` and picks the best.
#[instrument(skip(board, engine), fields(board = %board))]
pub fn analyze(board: &Board, to_move: Option<Player>, engine: &Engine) -> Result<Analysis> {
    let to_move = match to_move {
        Some(side) => side,
        None => match infer_to_move(board) {
            Some(side) => side,
            None => bail!("Cannot tell whose turn it is on {}: mark counts differ by more than one", board),
        },
    };

    let state = terminal_state(board);
    if state.is_terminal() {
        bail!("Position {} is already decided ({})", board, state);
    }

    let moves = engine
        .score_moves(board, to_move)
        .context("Failed to score moves")?;
    let best = engine
        .search(board, to_move)
        .context("Failed to search position")?;
    debug!(candidates = moves.len(), "Analysis complete");

    Ok(Analysis {
        board: board.notation(),
        to_move,
        maximizer: engine.config().maximizer,
        moves,
        best,
    })
}

/// Human-readable analysis report.
pub fn render_analysis(analysis: &Analysis) -> String {
    let header = format!("Board {}  ({} to move)", analysis.board, analysis.to_move);
    let rows = analysis.moves.iter().map(|scored| {
        let marker = if scored.position == analysis.best.best_move {
            '*'
        } else {
            ' '
        };
        format!(
            "{} {:<14} {:>3}  {}",
            marker,
            scored.position.label(),
            scored.score,
            scored.value()
        )
    });
    let footer = format!(
        "Best: {} ({} for {}, {} nodes)",
        analysis.best.best_move, analysis.best.value, analysis.maximizer, analysis.best.nodes
    );

    std::iter::once(header)
        .chain(rows)
        .chain(std::iter::once(footer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One finished engine-vs-engine game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Side that opened.
    pub first: Player,
    /// Moves in order.
    pub moves: Vec<Move>,
    /// Final result.
    pub outcome: Outcome,
}

/// Plays the engine against itself from an empty board.
#[instrument(skip(engine))]
pub fn self_play(engine: &Engine, first: Player) -> Result<GameRecord> {
    let mut game = GameSetup::new().start(first);

    loop {
        let to_move = game.to_move();
        let outcome = engine
            .search(game.board(), to_move)
            .context("Engine failed to find a move")?;
        let action = Move::new(to_move, outcome.best_move);

        match game.make_move(action).context("Engine played an illegal move")? {
            GameResult::InProgress(next) => game = next,
            GameResult::Finished(done) => {
                info!(outcome = %done.outcome(), moves = done.history().len(), "Self-play game over");
                return Ok(GameRecord {
                    first,
                    moves: done.history().to_vec(),
                    outcome: *done.outcome(),
                });
            }
        }
    }
}

/// One-line summary of a self-play game.
pub fn render_game(index: u32, record: &GameRecord) -> String {
    let moves = record
        .moves
        .iter()
        .map(|m| format!("{}{}", m.player, m.position.to_index() + 1))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Game {}: {}  => {}", index, moves, record.outcome)
}
