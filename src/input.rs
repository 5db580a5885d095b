//! Command input
//!
//! Commands arrive on a byte stream one non-whitespace character at a time.
//! Whitespace between characters (including newlines) is skipped, so a
//! player may type one command per line or several on one line.

use crate::game::Action;
use crate::settings::Settings;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::warn;

/// A command the player can type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateCW,
    RotateCCW,
    NewPiece,
    SoftDrop,
    HardDrop,
    MoveLeft,
    MoveRight,
    Place,
    /// Prompts for a symbol before anything changes
    ChooseNext,
    Debug,
    Quit,
}

impl Command {
    /// The game action for commands that need no further input
    pub fn action(self) -> Option<Action> {
        match self {
            Command::RotateCW => Some(Action::RotateCW),
            Command::RotateCCW => Some(Action::RotateCCW),
            Command::NewPiece => Some(Action::NewPiece),
            Command::SoftDrop => Some(Action::SoftDrop),
            Command::HardDrop => Some(Action::HardDrop),
            Command::MoveLeft => Some(Action::MoveLeft),
            Command::MoveRight => Some(Action::MoveRight),
            Command::Place => Some(Action::Place),
            Command::Quit => Some(Action::Quit),
            Command::ChooseNext | Command::Debug => None,
        }
    }
}

/// Key bindings configuration - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub rotate_cw: Vec<char>,
    pub rotate_ccw: Vec<char>,
    pub new_piece: Vec<char>,
    pub soft_drop: Vec<char>,
    pub hard_drop: Vec<char>,
    pub move_left: Vec<char>,
    pub move_right: Vec<char>,
    pub place: Vec<char>,
    pub choose_next: Vec<char>,
    pub debug: Vec<char>,
    pub quit: Vec<char>,
}

impl KeyBindings {
    /// Parse a key string into a command character.
    /// Only single visible characters can be typed as commands.
    fn parse_key(s: &str) -> Option<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Some(c),
            _ => None,
        }
    }

    /// Parse a list of key strings, skipping unusable entries
    fn parse_keys(name: &str, keys: &[String]) -> Vec<char> {
        keys.iter()
            .filter_map(|s| {
                let key = Self::parse_key(s);
                if key.is_none() {
                    warn!(command = name, key = %s, "ignoring key binding, expected one visible character");
                }
                key
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            rotate_cw: Self::parse_keys("rotate_cw", &keys.rotate_cw),
            rotate_ccw: Self::parse_keys("rotate_ccw", &keys.rotate_ccw),
            new_piece: Self::parse_keys("new_piece", &keys.new_piece),
            soft_drop: Self::parse_keys("soft_drop", &keys.soft_drop),
            hard_drop: Self::parse_keys("hard_drop", &keys.hard_drop),
            move_left: Self::parse_keys("move_left", &keys.move_left),
            move_right: Self::parse_keys("move_right", &keys.move_right),
            place: Self::parse_keys("place", &keys.place),
            choose_next: Self::parse_keys("choose_next", &keys.choose_next),
            debug: Self::parse_keys("debug", &keys.debug),
            quit: Self::parse_keys("quit", &keys.quit),
        }
    }

    /// Map a typed character to its command.
    /// When two commands share a key, the one listed first wins.
    pub fn command_for(&self, key: char) -> Option<Command> {
        let table = [
            (&self.rotate_cw, Command::RotateCW),
            (&self.rotate_ccw, Command::RotateCCW),
            (&self.new_piece, Command::NewPiece),
            (&self.soft_drop, Command::SoftDrop),
            (&self.hard_drop, Command::HardDrop),
            (&self.move_left, Command::MoveLeft),
            (&self.move_right, Command::MoveRight),
            (&self.place, Command::Place),
            (&self.choose_next, Command::ChooseNext),
            (&self.debug, Command::Debug),
            (&self.quit, Command::Quit),
        ];

        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|(_, command)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Failure to get the next character from the player
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input ended while waiting for a command")]
    Exhausted,
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
}

/// Separator between typed characters: ASCII space, tab, newline, vertical
/// tab, form feed or carriage return
fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Reads whitespace-separated characters from a buffered stream.
/// Bytes that are not UTF-8 come through as U+FFFD.
pub struct CharReader<R> {
    reader: R,
    line: Vec<char>,
    pos: usize,
}

impl<R: BufRead> CharReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
        }
    }

    /// Next non-whitespace character, reading more lines as needed
    pub fn next_char(&mut self) -> Result<char, InputError> {
        loop {
            while let Some(&c) = self.line.get(self.pos) {
                self.pos += 1;
                if !is_separator(c) {
                    return Ok(c);
                }
            }

            let mut buf = Vec::new();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(InputError::Exhausted);
            }
            self.line = String::from_utf8_lossy(&buf).chars().collect();
            self.pos = 0;
        }
    }
}
