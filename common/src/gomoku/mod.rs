mod board;
mod game_state;

pub use board::{
    Board, BoardError, BoardPosition, BoardPositionError, Cell, Coordinate, PlacementError,
    Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE,
};
pub use game_state::{GameState, Outcome, PIECES_TO_WIN_IN_LINE};
