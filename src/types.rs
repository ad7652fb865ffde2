// Othello board types
// Cells are indexed 0..63 row-major: row = index / 8, column = index % 8.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::OthelloError;

/// Number of cells on the board
pub const NUM_CELLS: usize = 64;

/// Cells per row (and rows per board)
pub const CELLS_PER_ROW: usize = 8;

/// Corner cells, in index order
pub const CORNERS: [usize; 4] = [0, 7, 56, 63];

/// One of the two players
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Returns the other side
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Cell state of a disc owned by this side
    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Black => "black",
            Side::White => "white",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single cell, exchanged as `1` (black), `-1` (white) or `0` (empty)
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "i8", into = "i8")]
pub enum Cell {
    Black,
    White,
    #[default]
    Empty,
}

impl Cell {
    /// Owner of the cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Black => Some(Side::Black),
            Cell::White => Some(Side::White),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl TryFrom<i8> for Cell {
    type Error = OthelloError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Cell::Black),
            -1 => Ok(Cell::White),
            0 => Ok(Cell::Empty),
            other => Err(OthelloError::MalformedBoard {
                reason: format!("invalid cell value {}", other),
            }),
        }
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> i8 {
        match cell {
            Cell::Black => 1,
            Cell::White => -1,
            Cell::Empty => 0,
        }
    }
}

/// The eight rays a disc can flank along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    South,
    North,
    NorthEast,
    SouthEast,
    NorthWest,
    SouthWest,
}

impl Direction {
    /// All directions, in probing order
    pub fn all() -> [Direction; 8] {
        [
            Direction::East,
            Direction::West,
            Direction::South,
            Direction::North,
            Direction::NorthEast,
            Direction::SouthEast,
            Direction::NorthWest,
            Direction::SouthWest,
        ]
    }

    /// Row and column offsets; rows grow with the index
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthWest => (1, -1),
        }
    }

    /// Index of the neighbouring cell in this direction, or `None` past the edge.
    /// Works on row/column pairs, so a step never wraps into the adjacent row.
    pub fn step(&self, index: usize) -> Option<usize> {
        let (d_row, d_col) = self.delta();
        let row = (index / CELLS_PER_ROW) as i32 + d_row;
        let col = (index % CELLS_PER_ROW) as i32 + d_col;
        let size = CELLS_PER_ROW as i32;

        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some((row * size + col) as usize)
    }
}

/// Fixed 64-cell board with value semantics
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

impl Board {
    /// Board with no discs
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; NUM_CELLS],
        }
    }

    /// Standard opening: 27 and 36 black, 28 and 35 white
    pub fn initial() -> Self {
        let mut board = Board::empty();
        board.cells[27] = Cell::Black;
        board.cells[36] = Cell::Black;
        board.cells[28] = Cell::White;
        board.cells[35] = Cell::White;
        board
    }

    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        Board { cells }
    }

    /// Builds a board from explicit disc lists; handy for setting up positions
    pub fn from_discs(black: &[usize], white: &[usize]) -> Result<Self, OthelloError> {
        let mut board = Board::empty();
        for &cell in black {
            board.set(cell, Cell::Black)?;
        }
        for &cell in white {
            board.set(cell, Cell::White)?;
        }
        Ok(board)
    }

    /// State of a cell; indices past the board read as empty
    pub fn get(&self, index: usize) -> Cell {
        self.cells.get(index).copied().unwrap_or(Cell::Empty)
    }

    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), OthelloError> {
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(OthelloError::CellOutOfRange { cell: index })?;
        *slot = cell;
        Ok(())
    }

    /// Writes an on-board cell; indices come from move generation
    pub(crate) fn put(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Number of discs owned by `side`
    pub fn count_pieces(&self, side: Side) -> usize {
        let target = side.cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Number of non-empty cells
    pub fn total_discs(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn empty_count(&self) -> usize {
        NUM_CELLS - self.total_discs()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}

impl TryFrom<Vec<i8>> for Board {
    type Error = OthelloError;

    fn try_from(values: Vec<i8>) -> Result<Self, Self::Error> {
        if values.len() != NUM_CELLS {
            return Err(OthelloError::MalformedBoard {
                reason: format!("expected {} cells, got {}", NUM_CELLS, values.len()),
            });
        }

        let mut cells = [Cell::Empty; NUM_CELLS];
        for (slot, value) in cells.iter_mut().zip(values) {
            *slot = Cell::try_from(value)?;
        }
        Ok(Board { cells })
    }
}

impl From<Board> for Vec<i8> {
    fn from(board: Board) -> Vec<i8> {
        board.cells.iter().map(|&c| i8::from(c)).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(CELLS_PER_ROW) {
            let line: String = row
                .iter()
                .map(|c| match c {
                    Cell::Black => 'B',
                    Cell::White => 'W',
                    Cell::Empty => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Position query: a board and the side to move
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PositionRequest {
    pub board: Board,
    pub side: Side,
}

/// Query about one destination cell
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CellRequest {
    pub board: Board,
    pub side: Side,
    pub cell: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent().opponent(), Side::Black);
    }

    #[test]
    fn test_step_does_not_wrap_rows() {
        // Right edge of row 0 has no eastern neighbour
        assert_eq!(Direction::East.step(7), None);
        assert_eq!(Direction::NorthEast.step(15), None);
        assert_eq!(Direction::SouthEast.step(7), None);
        // Left edge of row 1 has no western neighbour
        assert_eq!(Direction::West.step(8), None);
        assert_eq!(Direction::SouthWest.step(8), None);
        // Top and bottom rows
        assert_eq!(Direction::North.step(3), None);
        assert_eq!(Direction::South.step(60), None);

        assert_eq!(Direction::East.step(6), Some(7));
        assert_eq!(Direction::South.step(3), Some(11));
        assert_eq!(Direction::NorthWest.step(9), Some(0));
        assert_eq!(Direction::SouthWest.step(9), Some(16));
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.count_pieces(Side::Black), 2);
        assert_eq!(board.count_pieces(Side::White), 2);
        assert_eq!(board.get(27), Cell::Black);
        assert_eq!(board.get(28), Cell::White);
        assert_eq!(board.total_discs(), 4);
        assert_eq!(board.empty_count(), 60);
        assert!(!board.is_full());
    }

    #[test]
    fn test_board_json_is_array_of_small_integers() {
        let board = Board::initial();
        let json = serde_json::to_value(board).unwrap();
        let values = json.as_array().unwrap();
        assert_eq!(values.len(), 64);
        assert_eq!(values[27].as_i64(), Some(1));
        assert_eq!(values[28].as_i64(), Some(-1));
        assert_eq!(values[0].as_i64(), Some(0));

        let parsed: Board = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_malformed_board_rejected() {
        let short: Result<Board, _> = serde_json::from_str("[0, 1, -1]");
        assert!(short.is_err());

        let mut values = vec![0i8; 64];
        values[10] = 2;
        let err = Board::try_from(values).unwrap_err();
        assert!(matches!(err, OthelloError::MalformedBoard { .. }));
    }

    #[test]
    fn test_set_out_of_range() {
        let mut board = Board::empty();
        assert_eq!(
            board.set(64, Cell::Black),
            Err(OthelloError::CellOutOfRange { cell: 64 })
        );
    }

    #[test]
    fn test_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::White).unwrap(), "\"white\"");
        let side: Side = serde_json::from_str("\"black\"").unwrap();
        assert_eq!(side, Side::Black);
    }
}
