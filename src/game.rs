//! Core game state and logic

use crate::board::{BOARD_HEIGHT, Board};
use crate::piece::Piece;
use crate::score::Score;
use crate::selector::Selector;
use crate::tetromino::TetrominoType;
use tracing::{debug, info, warn};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// A freshly spawned piece had no room
    GameOver,
    /// The player asked to stop
    Quit,
}

/// Actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    /// Replace the current piece with the next one without locking it
    NewPiece,
    /// Lock the current piece where it is
    Place,
    /// Pick the next piece by its symbol
    ChooseNext(char),
    Quit,
}

/// Things worth telling the player, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece appeared after the previous one was locked
    PieceSpawned(TetrominoType),
    /// One line was removed; `bonus` counts lines cleared by this lock so far
    LineCleared { bonus: u32, points: u64 },
    /// Four lines went in a single lock
    Tetris,
    /// No piece is drawn with this symbol
    ShapeNotFound(char),
    GameOver,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board; never holds the current piece
    pub board: Board,
    /// Current falling piece
    pub current_piece: Piece,
    /// Deals the upcoming pieces
    selector: Selector,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Pending notifications for the front end
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new game with the first piece in play
    pub fn new() -> Self {
        let mut game = Self {
            board: Board::new(),
            current_piece: Piece::new(TetrominoType::I),
            selector: Selector::new(),
            score: Score::new(),
            state: GameState::Playing,
            events: Vec::new(),
        };
        game.reset();
        game
    }

    /// Clear the field and score and deal the first piece, unannounced
    pub fn reset(&mut self) {
        self.board.reset();
        self.selector = Selector::new();
        self.score = Score::new();
        self.state = GameState::Playing;
        self.events.clear();
        self.spawn_piece(false);
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Playing
    }

    /// The piece the next spawn will produce
    pub fn next_piece(&self) -> TetrominoType {
        self.selector.peek()
    }

    /// Catalog index of the next piece
    pub fn next_index(&self) -> usize {
        self.selector.index()
    }

    /// Take the notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        if !self.is_running() {
            return;
        }

        match action {
            Action::MoveLeft => {
                self.current_piece.move_left(&self.board);
            }
            Action::MoveRight => {
                self.current_piece.move_right(&self.board);
            }
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::RotateCW => {
                self.current_piece.try_rotate_cw(&self.board);
            }
            Action::RotateCCW => {
                self.current_piece.try_rotate_ccw(&self.board);
            }
            Action::NewPiece => self.spawn_piece(false),
            Action::Place => self.lock_piece(),
            Action::ChooseNext(symbol) => self.choose_next(symbol),
            Action::Quit => {
                info!(score = self.score.points, "player quit");
                self.state = GameState::Quit;
            }
        }
    }

    fn soft_drop(&mut self) {
        if !self.current_piece.move_down(&self.board) {
            self.lock_piece();
        }
    }

    fn hard_drop(&mut self) {
        let distance = self.current_piece.hard_drop(&self.board);
        debug!(distance, "hard drop");
        self.lock_piece();
    }

    fn choose_next(&mut self, symbol: char) {
        if self.selector.choose(symbol) {
            info!(%symbol, "next piece chosen");
        } else {
            warn!(%symbol, "no shape for chosen symbol");
            self.events.push(GameEvent::ShapeNotFound(symbol));
        }
    }

    /// Lock the current piece, clear lines and spawn the next
    fn lock_piece(&mut self) {
        let positions = self.current_piece.block_positions();
        let piece_type = self.current_piece.piece_type;
        self.board.lock_piece(&positions, piece_type);
        debug!(piece = %piece_type.symbol(), ?positions, "piece locked");

        self.consume_lines();
        self.spawn_piece(true);
    }

    /// Remove full rows bottom-up, scoring each one as it goes
    fn consume_lines(&mut self) {
        let mut bonus = 0;
        let mut row = BOARD_HEIGHT;

        while row > 0 {
            // Re-test the same row after a collapse: the row above moved into it
            if !self.board.is_row_full(row - 1) {
                row -= 1;
                continue;
            }

            self.board.collapse_from(row - 1);
            bonus += 1;
            let points = self.score.add_line(bonus);
            info!(row = row - 1, bonus, points, total = self.score.points, "line cleared");
            self.events.push(GameEvent::LineCleared { bonus, points });
            if bonus == 4 {
                self.events.push(GameEvent::Tetris);
            }
        }
    }

    /// Put the next piece in play; the game ends if it has no room
    fn spawn_piece(&mut self, announce: bool) {
        let piece_type = self.selector.advance();
        self.current_piece = Piece::new(piece_type);
        debug!(piece = %piece_type.symbol(), next = %self.next_piece().symbol(), "piece spawned");

        if self.current_piece.intersects(&self.board) {
            info!(score = self.score.points, lines = self.score.lines, "game over");
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
        } else if announce {
            self.events.push(GameEvent::PieceSpawned(piece_type));
        }
    }
}
