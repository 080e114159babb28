//! Tests for the minimax engine.

mod common;

use perfect_tictactoe::{
    Board, Engine, Player, Position, Pruning, SearchConfig, SearchError, TerminalState, Value,
    apply, minimax, terminal_state,
};

fn board(notation: &str) -> Board {
    notation.parse().expect("valid notation")
}

fn engine(maximizer: Player, pruning: Pruning, parallel: bool) -> Engine {
    Engine::new(SearchConfig::new(maximizer, pruning, parallel))
}

#[test]
fn test_takes_immediate_win() {
    let outcome = minimax(&board("XX./OO./..."), Player::X).expect("search succeeds");
    assert_eq!(outcome.best_move, Position::TopRight);
    assert_eq!(outcome.value, Value::Win);
    assert_eq!(outcome.score, 5);
}

#[test]
fn test_prefers_faster_win() {
    let position = board("XX./O../..O");
    let engine = Engine::default();

    let scores = engine.score_moves(&position, Player::X).expect("search succeeds");
    let center = scores
        .iter()
        .find(|m| m.position == Position::Center)
        .expect("center is legal");
    assert_eq!(center.value(), Value::Win);
    assert_eq!(center.score, 3);

    let outcome = engine.search(&position, Player::X).expect("search succeeds");
    assert_eq!(outcome.best_move, Position::TopRight);
    assert_eq!(outcome.score, 5);
}

#[test]
fn test_delays_unavoidable_loss() {
    let position = board("XO./.X./...");

    let as_maximizer = engine(Player::O, Pruning::None, false)
        .search(&position, Player::O)
        .expect("search succeeds");
    assert_eq!(as_maximizer.best_move, Position::BottomRight);
    assert_eq!(as_maximizer.value, Value::Loss);
    assert_eq!(as_maximizer.score, -3);

    let as_minimizer = minimax(&position, Player::O).expect("search succeeds");
    assert_eq!(as_minimizer.best_move, Position::BottomRight);
    assert_eq!(as_minimizer.value, Value::Win);
    assert_eq!(as_minimizer.score, 3);
}

#[test]
fn test_empty_board_is_a_draw() {
    let outcome = minimax(&Board::new(), Player::X).expect("search succeeds");
    assert_eq!(outcome.best_move, Position::TopLeft);
    assert_eq!(outcome.value, Value::Draw);
    assert_eq!(outcome.score, 0);
}

#[test]
fn test_every_opening_reply_is_a_draw() {
    let engine = engine(Player::X, Pruning::AlphaBeta, false);
    let scores = engine.score_moves(&Board::new(), Player::X).expect("search succeeds");
    assert_eq!(scores.len(), 9);
    assert!(scores.iter().all(|m| m.value() == Value::Draw));
}

#[test]
fn test_self_play_draws() {
    for pruning in [Pruning::None, Pruning::AlphaBeta] {
        let engine = engine(Player::X, pruning, false);
        let mut position = Board::new();
        let mut to_move = Player::X;

        while !terminal_state(&position).is_terminal() {
            let outcome = engine.search(&position, to_move).expect("search succeeds");
            position = apply(&position, outcome.best_move, to_move).expect("engine plays legally");
            to_move = to_move.opponent();
        }

        assert_eq!(terminal_state(&position), TerminalState::Draw);
    }
}

#[test]
fn test_engine_never_picks_occupied_square() {
    let engine = engine(Player::X, Pruning::AlphaBeta, false);
    for position in common::reachable_boards() {
        if terminal_state(&position).is_terminal() {
            continue;
        }
        let to_move = position.side_to_move(Player::X).expect("balanced board");
        let outcome = engine.search(&position, to_move).expect("search succeeds");
        assert!(position.is_empty(outcome.best_move), "board {position}");
    }
}

#[test]
fn test_pruning_and_parallel_match_plain_search() {
    let plain = engine(Player::X, Pruning::None, false);
    let variants = [
        engine(Player::X, Pruning::AlphaBeta, false),
        engine(Player::X, Pruning::None, true),
        engine(Player::X, Pruning::AlphaBeta, true),
    ];

    for position in common::reachable_boards() {
        if terminal_state(&position).is_terminal() || position.empty_count() > 7 {
            continue;
        }
        let to_move = position.side_to_move(Player::X).expect("balanced board");
        let expected = plain.search(&position, to_move).expect("search succeeds");

        for variant in &variants {
            let outcome = variant.search(&position, to_move).expect("search succeeds");
            assert_eq!(
                (outcome.best_move, outcome.value, outcome.score),
                (expected.best_move, expected.value, expected.score),
                "board {position} with {:?}",
                variant.config()
            );
        }
    }
}

#[test]
fn test_alpha_beta_visits_fewer_nodes() {
    let plain = minimax(&Board::new(), Player::X).expect("search succeeds");
    let pruned = engine(Player::X, Pruning::AlphaBeta, false)
        .search(&Board::new(), Player::X)
        .expect("search succeeds");
    assert_eq!(pruned.best_move, plain.best_move);
    assert!(pruned.nodes < plain.nodes);
}

#[test]
fn test_search_is_deterministic() {
    let position = board("X../.O./...");
    let first = minimax(&position, Player::X).expect("search succeeds");
    for _ in 0..3 {
        assert_eq!(minimax(&position, Player::X), Ok(first));
    }
}

#[test]
fn test_terminal_board_is_rejected() {
    assert_eq!(
        minimax(&board("OOO/XX./X.."), Player::X),
        Err(SearchError::TerminalPosition(TerminalState::Won(Player::O)))
    );
}
