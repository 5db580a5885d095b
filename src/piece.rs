//! Active falling piece logic

use crate::board::Board;
use crate::tetromino::{Offset, PIECE_SIZE, TetrominoType};

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Pivot position in field coordinates (x is the column, y the row)
    pub x: i32,
    pub y: i32,
    /// Current cell offsets from the pivot, rotated in place
    pub offsets: [Offset; PIECE_SIZE],
    /// Number of clockwise quarter turns applied since spawning.
    /// Only reported in the debug dump.
    pub rotation: u32,
}

impl Piece {
    /// Create a new piece at its spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        let (x, y) = piece_type.spawn_position();
        Self {
            piece_type,
            x,
            y,
            offsets: piece_type.offsets(),
            rotation: 0,
        }
    }

    /// Get the absolute (row, col) positions of all 4 blocks
    pub fn block_positions(&self) -> [(i32, i32); PIECE_SIZE] {
        self.offsets.map(|(dx, dy)| (self.y + dy, self.x + dx))
    }

    /// Check whether any block lies outside the field or on a filled cell
    pub fn intersects(&self, board: &Board) -> bool {
        self.block_positions()
            .iter()
            .any(|&(row, col)| !board.is_valid_position(row, col))
    }

    /// Which block, if any, sits on the given field cell
    pub fn covers(&self, row: i32, col: i32) -> Option<usize> {
        self.block_positions()
            .iter()
            .position(|&position| position == (row, col))
    }

    /// Try to translate the piece, returns true if successful.
    /// A rejected move leaves the pivot exactly where it was.
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        self.x += dx;
        self.y += dy;
        if self.intersects(board) {
            self.x -= dx;
            self.y -= dy;
            false
        } else {
            true
        }
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_move(-1, 0, board)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_move(1, 0, board)
    }

    /// Try to move down, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.try_move(0, 1, board)
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.move_down(board) {
            distance += 1;
        }
        distance
    }

    /// Turn the offsets a quarter turn clockwise about the pivot.
    /// No collision check: callers validate and undo.
    pub fn rotate_cw(&mut self) {
        self.rotation += 1;

        for offset in &mut self.offsets {
            let (x, y) = *offset;
            *offset = (-y, x);
        }

        if self.piece_type.is_off_center() {
            for offset in &mut self.offsets {
                offset.0 += 1;
            }
        }
    }

    /// Three clockwise quarter turns make one counter-clockwise turn
    pub fn rotate_ccw(&mut self) {
        self.rotate_cw();
        self.rotate_cw();
        self.rotate_cw();
    }

    /// Rotate clockwise, reverting if the result would collide
    pub fn try_rotate_cw(&mut self, board: &Board) -> bool {
        self.rotate_cw();
        if self.intersects(board) {
            self.rotate_ccw();
            false
        } else {
            true
        }
    }

    /// Rotate counter-clockwise, reverting if the result would collide
    pub fn try_rotate_ccw(&mut self, board: &Board) -> bool {
        self.rotate_ccw();
        if self.intersects(board) {
            self.rotate_cw();
            false
        } else {
            true
        }
    }
}
