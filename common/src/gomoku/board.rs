use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Board size must be at least 1")]
    ZeroSize,
    #[error("Board size {size} exceeds the maximum of {max}")]
    TooLarge { size: usize, max: usize },
    #[error("Board with no rows given")]
    NoRows,
    #[error("Board is not square: row {row} has length {len}, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("Unknown cell code {code} at ({x}, {y})")]
    UnknownCell { x: usize, y: usize, code: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coordinate {
    X,
    Y,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::X => write!(f, "x"),
            Coordinate::Y => write!(f, "y"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum BoardPositionError {
    #[error("{0} coordinate {1} exceeds board size {2}")]
    OutOfBounds(Coordinate, usize, usize),
}

#[derive(Error, Debug, PartialEq)]
pub enum PlacementError {
    #[error("Invalid placement position: {0}")]
    InvalidPosition(#[from] BoardPositionError),
    #[error("Cell at {0} is already occupied by {1:?}")]
    CellOccupied(BoardPosition, Cell),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    // 0 = empty, 1 = black, 2 = white
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }

    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Stone::Black),
            Cell::White => Some(Stone::White),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Black => '*',
            Cell::White => '0',
        }
    }
}

impl From<Stone> for Cell {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardPosition(usize, usize);

impl BoardPosition {
    pub fn new(board: &Board, x: usize, y: usize) -> Result<Self, BoardPositionError> {
        let size = board.size();
        if x >= size {
            return Err(BoardPositionError::OutOfBounds(Coordinate::X, x, size));
        }
        if y >= size {
            return Err(BoardPositionError::OutOfBounds(Coordinate::Y, y, size));
        }
        Ok(BoardPosition(x, y))
    }

    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

pub const DEFAULT_BOARD_SIZE: usize = 15;
// Keeps size * size allocatable and every coordinate representable as an i32
pub const MAX_BOARD_SIZE: usize = 4096;

/// Square grid of cells, stored row-major in a single vector.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            size: DEFAULT_BOARD_SIZE,
            cells: vec![Cell::Empty; DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE],
        }
    }
}

impl Board {
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        check_max_size(size)?;
        Ok(Board {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    // Ensure that the given rows meet the following criteria:
    // - there is at least one row
    // - there are no more than MAX_BOARD_SIZE rows
    // - every row is as long as there are rows
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        check_square(rows.len(), rows.iter().map(Vec::len))?;
        let size = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Board { size, cells })
    }

    // Same criteria as Board::new, for the integer encoding
    // 0 (empty), 1 (black) and 2 (white). The input is copied, not kept.
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        check_square(rows.len(), rows.iter().map(Vec::len))?;
        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, code)| (x, y, *code)))
            .map(|(x, y, code)| {
                Cell::from_code(code).ok_or(BoardError::UnknownCell { x, y, code })
            })
            .collect::<Result<Vec<Cell>, BoardError>>()?;
        Ok(Board {
            size: rows.len(),
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell, BoardPositionError> {
        let pos = BoardPosition::new(self, x, y)?;
        Ok(self.cells[self.index(pos)])
    }

    // Signed so that line scans can step off the edge of the board
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.cells[y * self.size + x])
    }

    pub fn place(&mut self, x: usize, y: usize, stone: Stone) -> Result<(), PlacementError> {
        let pos = BoardPosition::new(self, x, y)?;
        let idx = self.index(pos);
        let current = self.cells[idx];
        if !current.is_empty() {
            return Err(PlacementError::CellOccupied(pos, current));
        }
        self.cells[idx] = stone.into();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn index(&self, pos: BoardPosition) -> usize {
        pos.y() * self.size + pos.x()
    }
}

fn check_square(size: usize, row_lens: impl Iterator<Item = usize>) -> Result<(), BoardError> {
    if size == 0 {
        return Err(BoardError::NoRows);
    }
    check_max_size(size)?;
    match row_lens.enumerate().find(|(_, len)| *len != size) {
        Some((row, len)) => Err(BoardError::NotSquare { row, len, size }),
        None => Ok(()),
    }
}

fn check_max_size(size: usize) -> Result<(), BoardError> {
    if size > MAX_BOARD_SIZE {
        return Err(BoardError::TooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Board::new(rows)
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.rows().map(<[Cell]>::to_vec).collect()
    }
}
