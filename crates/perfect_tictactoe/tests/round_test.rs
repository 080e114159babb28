//! Tests for the round state machine and the typestate phases behind it.

use perfect_tictactoe::{
    Board, Engine, GameInProgress, GameResult, GameSetup, Move, MoveError, Outcome, Player,
    Position, Round, RoundError, RoundEvent, Seats, Square,
};

fn started(seats: &Seats) -> Round {
    Round::NotStarted
        .handle(RoundEvent::Start, seats, &Engine::default())
        .expect("start always succeeds")
}

#[test]
fn test_human_then_engine_alternate() {
    let seats = Seats::default();
    let engine = Engine::default();

    let round = started(&seats);
    assert_eq!(round.to_move(), Some(Player::X));
    assert!(!round.awaits_engine(&seats));

    let round = round
        .handle(RoundEvent::HumanMove(Position::Center), &seats, &engine)
        .expect("legal move");
    assert_eq!(round.to_move(), Some(Player::O));
    assert!(round.awaits_engine(&seats));

    let round = round
        .handle(RoundEvent::EngineMoveRequested, &seats, &engine)
        .expect("engine move");
    assert_eq!(round.to_move(), Some(Player::X));
    assert_eq!(round.history().len(), 2);

    let board = round.board().expect("round started");
    assert_eq!(board.count(Player::O), 1);
    assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::O));
}

#[test]
fn test_turn_guards() {
    let seats = Seats::default();
    let engine = Engine::default();
    let round = started(&seats);

    assert_eq!(
        round.clone().handle(RoundEvent::EngineMoveRequested, &seats, &engine),
        Err(RoundError::NotEngineTurn)
    );

    let round = round
        .handle(RoundEvent::HumanMove(Position::TopLeft), &seats, &engine)
        .expect("legal move");
    assert_eq!(
        round.handle(RoundEvent::HumanMove(Position::Center), &seats, &engine),
        Err(RoundError::NotHumanTurn)
    );
}

#[test]
fn test_occupied_square_rejected() {
    let seats = Seats::new(Player::O, Player::X);
    let engine = Engine::default();
    let round = started(&seats)
        .handle(RoundEvent::EngineMoveRequested, &seats, &engine)
        .expect("engine opens");

    assert_eq!(
        round.handle(RoundEvent::HumanMove(Position::TopLeft), &seats, &engine),
        Err(RoundError::Move(MoveError::SquareOccupied(Position::TopLeft)))
    );
}

#[test]
fn test_engine_never_loses_a_round() {
    let seats = Seats::new(Player::X, Player::X);
    let engine = Engine::default();
    let mut round = started(&seats);

    // Human always takes the first open square.
    while round.outcome().is_none() {
        let event = if round.awaits_engine(&seats) {
            RoundEvent::EngineMoveRequested
        } else {
            let board = round.board().expect("round started");
            let open = Position::ALL
                .into_iter()
                .find(|p| board.is_empty(*p))
                .expect("live round has an open square");
            RoundEvent::HumanMove(open)
        };
        round = round.handle(event, &seats, &engine).expect("legal event");
    }

    assert_ne!(round.outcome(), Some(Outcome::Winner(Player::X)));
    assert_eq!(
        round.clone().handle(RoundEvent::EngineMoveRequested, &seats, &engine),
        Err(RoundError::Move(MoveError::GameOver))
    );

    let round = round
        .handle(RoundEvent::NewRound, &seats, &engine)
        .expect("new round");
    assert_eq!(round.board(), Some(&Board::new()));
    assert!(round.history().is_empty());
}

#[test]
fn test_new_round_rejected_mid_game() {
    let seats = Seats::default();
    let engine = Engine::default();
    let round = started(&seats)
        .handle(RoundEvent::HumanMove(Position::Center), &seats, &engine)
        .expect("legal move");

    assert_eq!(
        round.clone().handle(RoundEvent::NewRound, &seats, &engine),
        Err(RoundError::RoundInProgress)
    );
    assert_eq!(
        round.clone().handle(RoundEvent::Start, &seats, &engine),
        Err(RoundError::AlreadyStarted)
    );
    assert_eq!(round.history().len(), 1);
}

#[test]
fn test_start_rejected_after_game_over() {
    let seats = Seats::new(Player::O, Player::X);
    let engine = Engine::default();
    let mut round = started(&seats);

    // Human always takes the first open square.
    while round.outcome().is_none() {
        let event = if round.awaits_engine(&seats) {
            RoundEvent::EngineMoveRequested
        } else {
            let board = round.board().expect("round started");
            let open = Position::ALL
                .into_iter()
                .find(|p| board.is_empty(*p))
                .expect("live round has an open square");
            RoundEvent::HumanMove(open)
        };
        round = round.handle(event, &seats, &engine).expect("legal event");
    }

    assert_eq!(
        round.clone().handle(RoundEvent::Start, &seats, &engine),
        Err(RoundError::AlreadyStarted)
    );
    assert_eq!(
        Round::NotStarted.handle(RoundEvent::NewRound, &seats, &engine),
        Err(RoundError::NotStarted)
    );
}

#[test]
fn test_round_serializes() {
    let seats = Seats::default();
    let round = started(&seats)
        .handle(RoundEvent::HumanMove(Position::Center), &seats, &Engine::default())
        .expect("legal move");
    let json = serde_json::to_string(&round).expect("serialize");
    let back: Round = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, round);
}

#[test]
fn test_typestate_lifecycle() {
    let game = GameSetup::new().start(Player::X);
    assert_eq!(game.to_move(), Player::X);

    let moves = [
        Move::new(Player::X, Position::TopLeft),
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::TopRight),
        Move::new(Player::X, Position::BottomLeft),
        Move::new(Player::O, Position::MiddleLeft),
        Move::new(Player::X, Position::MiddleRight),
        Move::new(Player::O, Position::BottomRight),
        Move::new(Player::X, Position::BottomCenter),
    ];

    let mut game = game;
    for (i, action) in moves.iter().enumerate() {
        match game.make_move(*action).expect("legal move") {
            GameResult::InProgress(g) => game = g,
            GameResult::Finished(finished) => {
                assert_eq!(i, moves.len() - 1);
                assert!(finished.outcome().is_draw());
                assert_eq!(finished.history(), &moves);
                return;
            }
        }
    }
    panic!("Game should have finished");
}

#[test]
fn test_wrong_player_rejected() {
    let game = GameSetup::new().start(Player::X);
    assert_eq!(
        game.make_move(Move::new(Player::O, Position::Center)),
        Err(MoveError::WrongPlayer(Player::O))
    );
}

#[test]
fn test_replay_matches_incremental_play() {
    let moves = [
        Move::new(Player::O, Position::Center),
        Move::new(Player::X, Position::TopLeft),
    ];
    let Ok(GameResult::InProgress(game)) = GameInProgress::replay(&moves) else {
        panic!("Expected in-progress game");
    };
    assert_eq!(game.first(), Player::O);
    assert_eq!(game.to_move(), Player::O);
    assert_eq!(game.board().to_string(), "X../.O./...");
}
