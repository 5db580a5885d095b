//! Text rendering of the field, messages and the debug dump

use crate::board::{BOARD_WIDTH, Cell};
use crate::game::{Game, GameEvent};
use std::io::{self, Write};

/// Row of the field that carries the next-piece preview
const NEXT_PREVIEW_ROW: usize = 1;

/// Character shown at (row, col): the falling piece wins over the field
fn cell_char(game: &Game, row: usize, col: usize, cell: Cell) -> char {
    let piece = &game.current_piece;
    if piece.covers(row as i32, col as i32).is_some() {
        piece.piece_type.symbol()
    } else {
        cell.symbol()
    }
}

/// Render the field with the falling piece, score and next piece
pub fn render_field<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "/{:=^width$}\\    SCORE: {}",
        " Field ",
        game.score.points,
        width = BOARD_WIDTH
    )?;

    for (row, cells) in game.board.rows() {
        let line: String = cells
            .iter()
            .enumerate()
            .map(|(col, &cell)| cell_char(game, row, col, cell))
            .collect();
        write!(out, "|{}|", line)?;
        if row == NEXT_PREVIEW_ROW {
            write!(out, "     NEXT: {}", game.next_piece().symbol())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\\{}/", "=".repeat(BOARD_WIDTH))
}

/// Print what an event means to the player
pub fn render_event<W: Write>(out: &mut W, game: &Game, event: GameEvent) -> io::Result<()> {
    match event {
        GameEvent::PieceSpawned(piece_type) => {
            writeln!(out, "A new piece has appeared: {}", piece_type.symbol())
        }
        GameEvent::LineCleared { bonus, points } => {
            writeln!(out, "Line cleared! +{} (x{})", points, bonus)
        }
        GameEvent::Tetris => write!(out, "\n*** TETRIS! ***\n\n"),
        GameEvent::ShapeNotFound(symbol) => writeln!(out, "No shape found for {}", symbol),
        GameEvent::GameOver => {
            render_field(out, game)?;
            writeln!(out, "Game over :[")
        }
    }
}

/// Dump the game's internals
pub fn render_debug<W: Write>(out: &mut W, game: &Game) -> io::Result<()> {
    let piece = &game.current_piece;
    let symbol = piece.piece_type.symbol();

    writeln!(out, "next_shape_index = {}", game.next_index())?;
    writeln!(out, "piece_symbol     = {} ({})", u32::from(symbol), symbol)?;
    writeln!(out, "piece_x          = {}", piece.x)?;
    writeln!(out, "piece_y          = {}", piece.y)?;
    writeln!(out, "game_running     = {}", game.is_running())?;
    writeln!(out, "piece_rotation   = {}", piece.rotation)?;
    for (i, (x, y)) in piece.offsets.iter().enumerate() {
        writeln!(out, "coordinates[{}]   = {{ {}, {} }}", i, x, y)?;
    }

    writeln!(out, "\nField:")?;
    for (row, cells) in game.board.rows() {
        write!(out, "{:>2}:  ", row)?;
        for cell in cells {
            let c = cell.symbol();
            write!(out, "{} {} ", u32::from(c), c)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_HEIGHT;
    use crate::game::Action;
    use crate::tetromino::TetrominoType;

    fn rendered(game: &Game) -> Vec<String> {
        let mut out = Vec::new();
        render_field(&mut out, game).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_fresh_field() {
        let game = Game::new();
        let lines = rendered(&game);

        // Blank line, top border, rows, bottom border
        assert_eq!(lines.len(), BOARD_HEIGHT + 3);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "/= Field =\\    SCORE: 0");
        assert_eq!(lines[2], "|   IIII  |");
        assert_eq!(lines[3], "|         |     NEXT: J");
        assert_eq!(lines[4], "|         |");
        assert_eq!(lines[BOARD_HEIGHT + 2], "\\=========/");
    }

    #[test]
    fn test_locked_cells_and_piece_overlay() {
        let mut game = Game::new();
        game.board.set(14, 0, Cell::Filled(TetrominoType::Z));
        game.process_action(Action::MoveLeft);
        let lines = rendered(&game);
        assert_eq!(lines[2], "|  IIII   |");
        assert_eq!(lines[BOARD_HEIGHT + 1], "|Z        |");
    }

    #[test]
    fn test_messages() {
        let game = Game::new();
        let mut out = Vec::new();
        render_event(&mut out, &game, GameEvent::PieceSpawned(TetrominoType::L)).unwrap();
        render_event(&mut out, &game, GameEvent::ShapeNotFound('x')).unwrap();
        render_event(&mut out, &game, GameEvent::LineCleared { bonus: 4, points: 460 }).unwrap();
        render_event(&mut out, &game, GameEvent::Tetris).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "A new piece has appeared: L\nNo shape found for x\nLine cleared! +460 (x4)\n\n*** TETRIS! ***\n\n"
        );
    }

    #[test]
    fn test_game_over_shows_field() {
        let game = Game::new();
        let mut out = Vec::new();
        render_event(&mut out, &game, GameEvent::GameOver).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("/= Field =\\"));
        assert!(text.ends_with("Game over :[\n"));
    }

    #[test]
    fn test_debug_dump() {
        let game = Game::new();
        let mut out = Vec::new();
        render_debug(&mut out, &game).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("next_shape_index = 1\n"));
        assert!(text.contains("piece_symbol     = 73 (I)\n"));
        assert!(text.contains("piece_x          = 4\n"));
        assert!(text.contains("coordinates[0]   = { -1, 0 }\n"));
        assert!(text.contains(" 0:  32   32   "));
        assert!(text.contains("14:  "));
    }
}
