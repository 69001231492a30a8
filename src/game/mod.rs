//! Core Connect Four game logic: board representation, four-in-a-row
//! detection, move enumeration, and the session state machine.

mod board;
mod moves;
mod player;
mod state;
pub mod win;

pub use board::{Board, Cell, CENTER_COL, COLS, ROWS};
pub use moves::{format_moves, legal_moves, parse_moves, Move, ParseMovesError};
pub use player::Player;
pub use state::{GameOutcome, GameSession, GameStatus};
pub use win::winner;
