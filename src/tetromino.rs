//! Tetromino definitions and shapes
//!
//! The catalog holds the 7 standard tetrominoes in a fixed spawn orientation.
//! Offsets are (dx, dy) pairs relative to the piece's pivot, with y growing
//! downward to match the field's row order.

/// A cell offset (dx, dy) relative to a piece's pivot
pub type Offset = (i32, i32);

/// Number of cells in every tetromino
pub const PIECE_SIZE: usize = 4;

/// The 7 tetromino types, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    J,
    L,
    O, // square
    S,
    T,
    Z,
}

impl TetrominoType {
    /// Get all tetromino types in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// The character drawn for this piece on the field
    pub fn symbol(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
            TetrominoType::O => 'O',
            TetrominoType::S => 'S',
            TetrominoType::T => 'T',
            TetrominoType::Z => 'Z',
        }
    }

    /// Get the spawn-orientation offsets for this tetromino
    pub fn offsets(&self) -> [Offset; PIECE_SIZE] {
        match self {
            TetrominoType::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            // J.
            // JJJ
            TetrominoType::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
            // ..L
            // LLL
            TetrominoType::L => [(-1, 0), (0, 0), (1, 0), (1, -1)],
            TetrominoType::O => [(0, 0), (0, 1), (1, 1), (1, 0)],
            // .SS
            // SS.
            TetrominoType::S => [(0, 0), (-1, 0), (0, -1), (1, -1)],
            // .T.
            // TTT
            TetrominoType::T => [(0, 0), (0, -1), (-1, 0), (1, 0)],
            // ZZ.
            // .ZZ
            TetrominoType::Z => [(0, 0), (1, 0), (0, -1), (-1, -1)],
        }
    }

    /// The I and O pieces rotate about a cell corner rather than a cell
    /// centre, so each rotation is followed by a one-column nudge.
    pub fn is_off_center(&self) -> bool {
        matches!(self, TetrominoType::I | TetrominoType::O)
    }

    /// Get spawn pivot (x, y) - pieces spawn near the top middle
    pub fn spawn_position(&self) -> (i32, i32) {
        match self {
            TetrominoType::O => (3, 0),
            TetrominoType::I => (4, 0),
            _ => (4, 1),
        }
    }
}

/// Find the catalog index of the piece drawn with `symbol`
pub fn find_index(symbol: char) -> Option<usize> {
    TetrominoType::all()
        .iter()
        .position(|piece| piece.symbol() == symbol)
}
