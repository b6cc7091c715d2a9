//! Rules engine for five-in-a-row on a square board.
//!
//! [`Board`] stores the cells and validates coordinates; [`GameState`]
//! owns a board and decides, after every placement, whether the move won
//! the game or filled the board for a draw.

pub mod gomoku;
pub mod messages;

pub use gomoku::{
    Board, BoardError, BoardPosition, BoardPositionError, Cell, Coordinate, GameState, Outcome,
    PlacementError, Stone,
};
