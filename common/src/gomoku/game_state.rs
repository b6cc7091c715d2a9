use crate::gomoku::board::{Board, BoardError, BoardPositionError, Cell, PlacementError, Stone};
use crate::messages::StateResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const PIECES_TO_WIN_IN_LINE: i32 = 5;

// Horizontal, principal diagonal, vertical, anti-diagonal
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    InProgress,
    Won(Stone),
    Draw,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    board: Board,
    game_over: bool,
    winner: Option<Stone>,
    to_move: Stone,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::with_board(Board::default())
    }
}

impl GameState {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(GameState::with_board(Board::with_size(size)?))
    }

    /// Starts a game from a prepared position.
    ///
    /// The position is judged as if its last stone had just been placed: a
    /// five-in-a-row anywhere ends the game with that winner, and a full
    /// board without one is a draw.
    pub fn with_board(board: Board) -> Self {
        let mut game_state = GameState {
            board,
            game_over: false,
            winner: None,
            to_move: Stone::Black,
        };
        game_state.winner = game_state.find_any_winner();
        game_state.game_over = game_state.winner.is_some() || game_state.board.is_full();
        if game_state.game_over {
            info!("prepared position is already over: {:?}", game_state.outcome());
        }
        game_state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell, BoardPositionError> {
        self.board.get(x, y)
    }

    pub fn render(&self) -> String {
        self.board.render()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    pub fn outcome(&self) -> Outcome {
        match (self.game_over, self.winner) {
            (_, Some(stone)) => Outcome::Won(stone),
            (true, None) => Outcome::Draw,
            (false, None) => Outcome::InProgress,
        }
    }

    /// Places `stone` at `(x, y)` and updates the winner and game-over flag.
    ///
    /// Once the game is over this does nothing and returns `Ok(())`; callers
    /// should check [`GameState::is_over`] before asking for more input.
    /// A failed placement leaves the state untouched.
    pub fn place(&mut self, x: usize, y: usize, stone: Stone) -> Result<(), PlacementError> {
        if self.game_over {
            debug!("ignoring {} stone at ({}, {}): game is over", stone, x, y);
            return Ok(());
        }
        self.board.place(x, y, stone)?;
        debug!("placed {} stone at ({}, {})", stone, x, y);
        self.to_move = stone.opponent();

        self.winner = self.check_winner(x, y);
        if let Some(winner) = self.winner {
            info!("{} wins with a line through ({}, {})", winner, x, y);
            self.game_over = true;
        } else if self.board.is_full() {
            info!("board is full, game drawn");
            self.game_over = true;
        }
        Ok(())
    }

    // Place a stone for whoever is due to move
    pub fn play(&mut self, x: usize, y: usize) -> Result<(), PlacementError> {
        self.place(x, y, self.to_move)
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.game_over = false;
        self.winner = None;
        self.to_move = Stone::Black;
        info!("game reset");
    }

    pub fn snapshot(&self) -> StateResponse {
        StateResponse {
            board: self.board.clone(),
            outcome: self.outcome(),
            to_move: self.to_move,
        }
    }

    // Scans every occupied cell as an anchor; only used for prepared positions
    fn find_any_winner(&self) -> Option<Stone> {
        let size = self.board.size();
        (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .find_map(|(x, y)| self.check_winner(x, y))
    }

    // Only lines through the anchor can have been completed by the last move
    fn check_winner(&self, x: usize, y: usize) -> Option<Stone> {
        let cell = self.board.get(x, y).ok()?;
        let stone = cell.stone()?;
        // Cannot fail: a board is at most MAX_BOARD_SIZE wide, well below i32::MAX
        let (x, y) = (i32::try_from(x).ok()?, i32::try_from(y).ok()?);
        let last = PIECES_TO_WIN_IN_LINE - 1;

        for (dx, dy) in DIRECTIONS {
            for i in 0..PIECES_TO_WIN_IN_LINE {
                let (x_start, y_start) = (x - i * dx, y - i * dy);
                let (x_end, y_end) = (x_start + last * dx, y_start + last * dy);
                if self.board.cell_at(x_start, y_start).is_none()
                    || self.board.cell_at(x_end, y_end).is_none()
                {
                    continue;
                }
                let five_in_line = (0..PIECES_TO_WIN_IN_LINE).all(|j| {
                    self.board.cell_at(x_start + j * dx, y_start + j * dy) == Some(cell)
                });
                if five_in_line {
                    return Some(stone);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gomoku::board::{BoardPosition, Coordinate};

    fn place_all(game_state: &mut GameState, stone: Stone, positions: &[(usize, usize)]) {
        for &(x, y) in positions {
            game_state.place(x, y, stone).unwrap();
        }
    }

    // Rows alternate in pairs (BBWWBB...) and each row is the inverse of
    // the one above, which leaves no five-in-a-row on any axis.
    fn draw_pattern(x: usize, y: usize) -> Stone {
        if (x / 2 + y) % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    #[test]
    fn test_new_game_state() {
        let game_state = GameState::default();
        assert_eq!(game_state.size(), 15);
        assert!(!game_state.is_over());
        assert_eq!(game_state.winner(), None);
        assert_eq!(game_state.to_move(), Stone::Black);
        assert_eq!(game_state.outcome(), Outcome::InProgress);
        assert!(matches!(GameState::new(0), Err(BoardError::ZeroSize)));
    }

    #[test]
    fn test_horizontal_win() {
        let mut game_state = GameState::new(15).unwrap();
        place_all(
            &mut game_state,
            Stone::Black,
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
        );
        assert!(!game_state.is_over());
        game_state.place(4, 0, Stone::Black).unwrap();
        assert_eq!(game_state.winner(), Some(Stone::Black));
        assert!(game_state.is_over());
        assert_eq!(game_state.outcome(), Outcome::Won(Stone::Black));
    }

    #[test]
    fn test_win_on_every_axis() {
        let axes: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];
        for (dx, dy) in axes {
            // The anchor is placed last, at each position along the line
            for anchor_idx in 0..5 {
                let mut game_state = GameState::new(9).unwrap();
                let line: Vec<(usize, usize)> = (0..5)
                    .map(|i| ((4 + i * dx) as usize, (2 + i * dy) as usize))
                    .collect();
                for (i, &(x, y)) in line.iter().enumerate() {
                    if i != anchor_idx {
                        game_state.place(x, y, Stone::White).unwrap();
                    }
                }
                assert!(!game_state.is_over());
                let (x, y) = line[anchor_idx];
                game_state.place(x, y, Stone::White).unwrap();
                assert_eq!(game_state.winner(), Some(Stone::White), "axis ({}, {})", dx, dy);
                assert!(game_state.is_over());
            }
        }
    }

    #[test]
    fn test_win_along_edges() {
        let mut game_state = GameState::new(5).unwrap();
        place_all(
            &mut game_state,
            Stone::Black,
            &[(4, 0), (3, 1), (2, 2), (1, 3)],
        );
        game_state.place(0, 4, Stone::Black).unwrap();
        assert_eq!(game_state.winner(), Some(Stone::Black));

        let mut game_state = GameState::new(5).unwrap();
        place_all(
            &mut game_state,
            Stone::White,
            &[(4, 4), (4, 3), (4, 1), (4, 0)],
        );
        game_state.place(4, 2, Stone::White).unwrap();
        assert_eq!(game_state.winner(), Some(Stone::White));
    }

    #[test]
    fn test_overline_wins() {
        let mut game_state = GameState::new(15).unwrap();
        place_all(
            &mut game_state,
            Stone::Black,
            &[(2, 7), (3, 7), (4, 7), (6, 7), (7, 7)],
        );
        assert!(!game_state.is_over());
        game_state.place(5, 7, Stone::Black).unwrap();
        assert_eq!(game_state.winner(), Some(Stone::Black));
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut game_state = GameState::new(15).unwrap();
        place_all(&mut game_state, Stone::Black, &[(0, 0), (1, 0), (3, 0), (4, 0)]);
        game_state.place(2, 0, Stone::White).unwrap();
        assert!(!game_state.is_over());
        assert_eq!(game_state.winner(), None);
    }

    #[test]
    fn test_four_is_not_enough_on_small_board() {
        let mut game_state = GameState::new(4).unwrap();
        place_all(&mut game_state, Stone::Black, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert!(!game_state.is_over());
        assert_eq!(game_state.winner(), None);
    }

    #[test]
    fn test_draw() {
        for size in [5, 6, 15] {
            let mut game_state = GameState::new(size).unwrap();
            for y in 0..size {
                for x in 0..size {
                    assert!(!game_state.is_over());
                    game_state.place(x, y, draw_pattern(x, y)).unwrap();
                }
            }
            assert!(game_state.is_over());
            assert_eq!(game_state.winner(), None);
            assert_eq!(game_state.outcome(), Outcome::Draw);
        }
    }

    #[test]
    fn test_draw_on_tiny_board() {
        let mut game_state = GameState::new(1).unwrap();
        game_state.place(0, 0, Stone::White).unwrap();
        assert_eq!(game_state.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let board = Board::from_codes(&[
            vec![1, 1, 1, 1, 0],
            vec![2, 2, 1, 2, 2],
            vec![1, 1, 2, 1, 1],
            vec![2, 2, 1, 2, 2],
            vec![1, 1, 2, 1, 2],
        ])
        .unwrap();
        let mut game_state = GameState::with_board(board);
        game_state.place(4, 0, Stone::Black).unwrap();
        assert_eq!(game_state.outcome(), Outcome::Won(Stone::Black));
    }

    #[test]
    fn test_prepared_full_board_is_drawn() {
        let board = Board::from_codes(&[vec![1, 2], vec![2, 1]]).unwrap();
        let mut game_state = GameState::with_board(board);
        assert!(game_state.is_over());
        assert_eq!(game_state.outcome(), Outcome::Draw);
        assert_eq!(game_state.winner(), None);

        // Terminal, so a placement is ignored rather than rejected as occupied
        let before = game_state.clone();
        assert_eq!(game_state.place(0, 0, Stone::White), Ok(()));
        assert_eq!(game_state, before);

        game_state.reset();
        assert_eq!(game_state.outcome(), Outcome::InProgress);
        game_state.place(0, 0, Stone::White).unwrap();
        assert_eq!(game_state.get(0, 0), Ok(Cell::White));
    }

    #[test]
    fn test_prepared_winning_position() {
        let board = Board::from_codes(&[
            vec![0, 0, 0, 0, 0, 0],
            vec![0, 2, 0, 0, 0, 0],
            vec![0, 0, 2, 0, 0, 0],
            vec![0, 0, 0, 2, 0, 0],
            vec![0, 0, 0, 0, 2, 0],
            vec![0, 0, 0, 0, 0, 2],
        ])
        .unwrap();
        let game_state = GameState::with_board(board);
        assert!(game_state.is_over());
        assert_eq!(game_state.outcome(), Outcome::Won(Stone::White));
    }

    #[test]
    fn test_prepared_open_position_is_in_progress() {
        let board = Board::from_codes(&[
            vec![1, 1, 1, 1, 0],
            vec![2, 2, 2, 2, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let game_state = GameState::with_board(board);
        assert!(!game_state.is_over());
        assert_eq!(game_state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_new_game_state_too_large() {
        let result = GameState::new(usize::MAX / 2);
        assert!(matches!(result, Err(BoardError::TooLarge { .. })));
    }

    #[test]
    fn test_placement_after_game_over_is_ignored() {
        let mut game_state = GameState::new(15).unwrap();
        place_all(
            &mut game_state,
            Stone::Black,
            &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
        );
        assert!(game_state.is_over());
        let before = game_state.clone();

        assert_eq!(game_state.place(7, 7, Stone::White), Ok(()));
        // Even invalid coordinates are swallowed once the game is over
        assert_eq!(game_state.place(99, 99, Stone::White), Ok(()));
        assert_eq!(game_state, before);
        assert_eq!(game_state.get(7, 7), Ok(Cell::Empty));
    }

    #[test]
    fn test_failed_placement_leaves_state_unchanged() {
        let mut game_state = GameState::new(5).unwrap();
        game_state.place(1, 1, Stone::Black).unwrap();
        let before = game_state.clone();

        let occupied = game_state.place(1, 1, Stone::White);
        assert_eq!(
            occupied,
            Err(PlacementError::CellOccupied(
                BoardPosition::new(game_state.board(), 1, 1).unwrap(),
                Cell::Black
            ))
        );
        let out_of_bounds = game_state.place(5, 0, Stone::White);
        assert_eq!(
            out_of_bounds,
            Err(PlacementError::InvalidPosition(
                BoardPositionError::OutOfBounds(Coordinate::X, 5, 5)
            ))
        );
        assert_eq!(game_state, before);
    }

    #[test]
    fn test_play_alternates() {
        let mut game_state = GameState::new(5).unwrap();
        game_state.play(0, 0).unwrap();
        game_state.play(1, 0).unwrap();
        assert_eq!(game_state.get(0, 0), Ok(Cell::Black));
        assert_eq!(game_state.get(1, 0), Ok(Cell::White));
        assert_eq!(game_state.to_move(), Stone::Black);

        // A rejected move does not hand the turn over
        assert!(game_state.play(1, 0).is_err());
        assert_eq!(game_state.to_move(), Stone::Black);
    }

    #[test]
    fn test_reset() {
        let mut game_state = GameState::new(5).unwrap();
        place_all(
            &mut game_state,
            Stone::White,
            &[(0, 4), (1, 4), (2, 4), (3, 4), (4, 4)],
        );
        assert!(game_state.is_over());

        game_state.reset();
        let once = game_state.clone();
        game_state.reset();
        assert_eq!(game_state, once);
        assert_eq!(game_state, GameState::new(5).unwrap());
        assert!(!game_state.is_over());
        assert_eq!(game_state.winner(), None);
        assert!(game_state.board().rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_snapshot() {
        let mut game_state = GameState::new(5).unwrap();
        game_state.play(2, 2).unwrap();
        let snapshot = game_state.snapshot();
        assert_eq!(snapshot.board, *game_state.board());
        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.to_move, Stone::White);
    }
}
