//! TEXTRIS - turn-based Tetris in the terminal
//!
//! Nothing falls on its own: every command read from stdin is one move.

mod board;
mod game;
mod input;
mod piece;
mod score;
mod selector;
mod settings;
mod tetromino;
mod ui;

use game::{Action, Game};
use input::{CharReader, Command, InputError, KeyBindings};
use settings::{LoggingSettings, Settings};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, LevelFilter};

/// Prompt shown while waiting for a command
const PROMPT: &str = "  > ";

/// Why the command loop stopped early
#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

/// Get the textris temp directory, creating it if needed
fn textris_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("textris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Send log lines to a file; stdout belongs to the game.
/// Returns None, leaving logging off, if the file cannot be created.
fn init_logging(dir: &Path, log_file: &str, logging: &LoggingSettings) -> Option<WorkerGuard> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file)
        .build(dir)
        .ok()?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level_directive = format!("textris={}", logging.level)
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level_directive),
        )
        .with_ansi(false)
        .init();

    Some(guard)
}

fn main() -> ExitCode {
    let loaded = Settings::load();
    let settings = match &loaded {
        Ok(Some((settings, _))) => settings.clone(),
        _ => Settings::default(),
    };

    let log_dir = textris_temp_dir();
    let log_file = format!("{}.log", std::process::id());
    let _guard = init_logging(&log_dir, &log_file, &settings.logging);

    info!("TEXTRIS starting up, log={}", log_dir.join(&log_file).display());
    match loaded {
        Ok(Some((_, path))) => info!("Loaded settings from {}", path.display()),
        Ok(None) => info!("No settings file, using defaults"),
        Err(e) => warn!("Ignoring settings: {}", e),
    }

    let bindings = KeyBindings::from_settings(&settings);
    let mut input = CharReader::new(io::stdin().lock());
    let mut out = io::stdout().lock();
    let mut game = Game::new();

    match run_app(&mut game, &bindings, &mut input, &mut out) {
        Ok(()) => {
            info!(score = game.score.points, lines = game.score.lines, "TEXTRIS finished");
            ExitCode::SUCCESS
        }
        Err(AppError::Input(e)) => {
            error!("Fatal input error: {}", e);
            eprintln!("textris: {}", e);
            ExitCode::from(1)
        }
        Err(AppError::Output(e)) => {
            error!("Fatal output error: {}", e);
            eprintln!("textris: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Read the next character after showing `prompt`
fn prompt_char<R: BufRead, W: Write>(
    input: &mut CharReader<R>,
    out: &mut W,
    prompt: &str,
) -> Result<char, AppError> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    Ok(input.next_char()?)
}

/// The command loop: render, read one command, apply it, until the game stops
fn run_app<R: BufRead, W: Write>(
    game: &mut Game,
    bindings: &KeyBindings,
    input: &mut CharReader<R>,
    out: &mut W,
) -> Result<(), AppError> {
    writeln!(out, "Welcome to textris!")?;

    while game.is_running() {
        ui::render_field(out, game)?;

        let key = prompt_char(input, out, PROMPT)?;
        match bindings.command_for(key) {
            None => {
                debug!(%key, "unknown command");
                writeln!(out, "Unknown command!")?;
            }
            Some(Command::Debug) => ui::render_debug(out, game)?,
            Some(Command::ChooseNext) => {
                let symbol = prompt_char(input, out, "Enter new next shape: ")?;
                game.process_action(Action::ChooseNext(symbol));
            }
            Some(command) => {
                if command == Command::Quit {
                    writeln!(out, "Quitting...")?;
                }
                if let Some(action) = command.action() {
                    game.process_action(action);
                }
            }
        }

        for event in game.drain_events() {
            ui::render_event(out, game, event)?;
        }
    }

    writeln!(out, "\nGoodbye!")?;
    out.flush()?;
    Ok(())
}
