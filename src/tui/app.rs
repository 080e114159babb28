//! Application state and logic.

use super::input::{InputAction, action_for, move_cursor};
use crate::PlayConfig;
use crossterm::event::KeyCode;
use perfect_tictactoe::{Engine, Outcome, Position, Round, RoundEvent, Seats};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title screen.
    Title,
    /// Board with cursor.
    Board,
    /// Result screen.
    Result(Outcome),
}

/// Main application state.
pub struct App {
    round: Round,
    seats: Seats,
    engine: Engine,
    engine_delay: Duration,
    cursor: Position,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application on the title screen.
    pub fn new(config: &PlayConfig) -> Self {
        Self {
            round: Round::NotStarted,
            seats: config.seats(),
            engine: config.engine(),
            engine_delay: config.engine_delay(),
            cursor: Position::Center,
            status_message: String::new(),
            should_quit: false,
        }
    }

    /// Gets the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Seat assignment.
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    /// Cursor cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Pause before each engine move.
    pub fn engine_delay(&self) -> Duration {
        self.engine_delay
    }

    /// Screen for the current round state.
    pub fn screen(&self) -> Screen {
        match &self.round {
            Round::NotStarted => Screen::Title,
            Round::Turn { .. } => Screen::Board,
            Round::GameOver { outcome, .. } => Screen::Result(*outcome),
        }
    }

    /// True when the loop should request the engine's move.
    pub fn awaits_engine(&self) -> bool {
        self.round.awaits_engine(&self.seats)
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        let action = action_for(key);
        if action == InputAction::Quit {
            debug!("Quit requested");
            self.should_quit = true;
            return;
        }

        match self.screen() {
            Screen::Title => self.dispatch(RoundEvent::Start),
            Screen::Result(_) => self.dispatch(RoundEvent::NewRound),
            Screen::Board => match action {
                InputAction::Cursor(direction) => {
                    self.cursor = move_cursor(self.cursor, direction);
                }
                InputAction::PlaceAtCursor => self.dispatch(RoundEvent::HumanMove(self.cursor)),
                InputAction::PlaceAt(position) => {
                    self.cursor = position;
                    self.dispatch(RoundEvent::HumanMove(position));
                }
                InputAction::Quit | InputAction::Other => {}
            },
        }
    }

    /// Lets the engine play its move.
    pub fn play_engine_move(&mut self) {
        self.dispatch(RoundEvent::EngineMoveRequested);
    }

    fn dispatch(&mut self, event: RoundEvent) {
        match self.round.clone().handle(event, &self.seats, &self.engine) {
            Ok(next) => {
                self.round = next;
                self.status_message = self.describe();
            }
            Err(e) => {
                warn!(error = %e, ?event, "Event rejected");
                self.status_message = e.to_string();
            }
        }
    }

    fn describe(&self) -> String {
        match &self.round {
            Round::NotStarted => String::new(),
            Round::Turn { to_move, .. } if self.seats.is_engine(*to_move) => {
                "Engine is thinking...".to_string()
            }
            Round::Turn { to_move, .. } => format!("Your move ({})", to_move),
            Round::GameOver { .. } => String::new(),
        }
    }

    /// Headline for the result screen.
    pub fn result_headline(&self, outcome: Outcome) -> &'static str {
        match outcome.winner() {
            Some(winner) if winner == self.seats.human => "You won!",
            Some(_) => "Engine won!",
            None => "Draw!",
        }
    }
}
