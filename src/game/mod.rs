//! Core Connect Four game logic: the gravity board and its win scan, tokens,
//! players, and the turn-taking game session.

mod board;
mod player;
mod state;
mod token;

pub use board::{
    lines, Board, Cell, Direction, GameResult, Position, COLS, COLUMN_HEADER, ROWS, SEPARATOR,
    WIN_LENGTH,
};
pub use player::Player;
pub use state::GameState;
pub use token::Token;
