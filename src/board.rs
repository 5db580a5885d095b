//! Playing field representation

use crate::tetromino::TetrominoType;

/// Field dimensions
pub const BOARD_WIDTH: usize = 9;
pub const BOARD_HEIGHT: usize = 15;

/// A cell on the board - either empty or holding a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Character shown for this cell
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Filled(piece_type) => piece_type.symbol(),
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top row
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Check if a position is inside the field and empty
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_empty())
    }

    /// Lock a piece onto the board; positions are (row, col)
    pub fn lock_piece(&mut self, positions: &[(i32, i32)], piece_type: TetrominoType) {
        for &(row, col) in positions {
            self.set(row, col, Cell::Filled(piece_type));
        }
    }

    /// Check if a line is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Remove `row` and let everything above it fall by one.
    /// The top row is refilled empty; rows below `row` are untouched.
    pub fn collapse_from(&mut self, row: usize) {
        for target in (1..=row).rev() {
            self.cells[target] = self.cells[target - 1];
        }
        self.cells[0] = [Cell::Empty; BOARD_WIDTH];
    }

    /// Check if the board is completely empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell; BOARD_WIDTH])> {
        self.cells.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: i32, piece_type: TetrominoType) {
        for col in 0..BOARD_WIDTH as i32 {
            board.set(row, col, Cell::Filled(piece_type));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(TetrominoType::Z)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(TetrominoType::Z)));
        assert!(!board.is_valid_position(5, 5));
        assert!(board.is_valid_position(5, 6));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_HEIGHT as i32, 0), None);
        assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
        assert!(!board.set(BOARD_HEIGHT as i32, 0, Cell::Filled(TetrominoType::T)));
        assert!(!board.is_valid_position(-1, 4));
        assert!(board.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        fill_row(&mut board, 3, TetrominoType::L);
        board.reset();
        assert!(board.is_empty());
    }

    #[test]
    fn test_row_full() {
        let mut board = Board::new();
        let bottom = BOARD_HEIGHT as i32 - 1;
        for col in 0..BOARD_WIDTH as i32 - 1 {
            board.set(bottom, col, Cell::Filled(TetrominoType::J));
        }
        assert!(!board.is_row_full(BOARD_HEIGHT - 1));
        board.set(bottom, BOARD_WIDTH as i32 - 1, Cell::Filled(TetrominoType::J));
        assert!(board.is_row_full(BOARD_HEIGHT - 1));
    }

    #[test]
    fn test_collapse_shifts_rows_above() {
        let mut board = Board::new();
        board.set(0, 0, Cell::Filled(TetrominoType::I));
        board.set(6, 2, Cell::Filled(TetrominoType::S));
        fill_row(&mut board, 7, TetrominoType::T);
        board.set(8, 4, Cell::Filled(TetrominoType::O));
        let before = board.clone();

        board.collapse_from(7);

        // Row 7 now holds what row 6 held, everything above moved down
        assert_eq!(board.get(7, 2), Some(Cell::Filled(TetrominoType::S)));
        assert_eq!(board.get(1, 0), Some(Cell::Filled(TetrominoType::I)));
        assert!(!board.is_row_full(7));
        // Top row refilled empty
        assert!((0..BOARD_WIDTH as i32).all(|col| board.get(0, col) == Some(Cell::Empty)));
        // Rows below untouched
        for row in 8..BOARD_HEIGHT as i32 {
            for col in 0..BOARD_WIDTH as i32 {
                assert_eq!(board.get(row, col), before.get(row, col));
            }
        }
    }

    #[test]
    fn test_collapse_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0, TetrominoType::Z);
        board.set(1, 3, Cell::Filled(TetrominoType::L));
        board.collapse_from(0);
        assert!(!board.is_row_full(0));
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
        assert_eq!(board.get(1, 3), Some(Cell::Filled(TetrominoType::L)));
    }

    #[test]
    fn test_cell_symbol() {
        assert_eq!(Cell::Empty.symbol(), ' ');
        assert_eq!(Cell::Filled(TetrominoType::O).symbol(), 'O');
    }
}
