//! Next-piece selection
//!
//! Pieces are dealt in catalog order, round-robin. The player may pick the
//! next piece by symbol, which moves the cursor and continues the cycle from
//! there.

use crate::tetromino::{self, TetrominoType};

/// Deterministic cycle through the shape catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Catalog index of the piece the next spawn will produce
    index: usize,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog index of the upcoming piece
    pub fn index(&self) -> usize {
        self.index
    }

    /// Preview the upcoming piece without consuming it
    pub fn peek(&self) -> TetrominoType {
        TetrominoType::all()[self.index]
    }

    /// Get the upcoming piece and move the cursor on by one
    pub fn advance(&mut self) -> TetrominoType {
        let piece_type = self.peek();
        self.index = (self.index + 1) % TetrominoType::all().len();
        piece_type
    }

    /// Make the piece drawn with `symbol` the next one.
    /// Returns false, leaving the cursor alone, if no piece has that symbol.
    pub fn choose(&mut self, symbol: char) -> bool {
        match tetromino::find_index(symbol) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}
