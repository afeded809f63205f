mod logging;
mod ui;

use arcade_snake::config::EngineConfig;
use arcade_snake::constants::*;
use arcade_snake::high_score::{HighScoreStore, JsonFileStore, MemoryStore};
use arcade_snake::input::{map_key, process_input, InputOutcome};
use arcade_snake::session::ArcadeSession;
use arcade_snake::utils::persistence;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

type Session = ArcadeSession<Box<dyn HighScoreStore>, StdRng>;

fn print_help() {
    println!("Arcade Snake - terminal Snake with power-ups and fun facts\n");
    println!("Usage: arcade_snake [options]\n");
    println!("Options:");
    println!("  --config <path>  Load engine settings from a JSON file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

/// Parse CLI arguments. Returns the explicit config path, if any.
fn parse_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config needs a path");
                    std::process::exit(1);
                }
            },
            "--version" | "-v" => {
                println!("arcade_snake {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'arcade_snake --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    config_path
}

/// High-score store in the data directory, or an in-memory one when the
/// platform gives us nowhere to write.
fn open_store() -> Box<dyn HighScoreStore> {
    match JsonFileStore::in_data_dir() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "high score store");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, high score will not persist");
            Box::new(MemoryStore::default())
        }
    }
}

fn main() -> io::Result<()> {
    let config_path = parse_args();

    let config = match EngineConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Logging is best effort; the game runs without it.
    if let Ok(log_path) = persistence::data_file_path(LOG_FILE_NAME) {
        if let Err(e) = logging::init(&log_path) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut session: Session = ArcadeSession::new(config, open_store(), StdRng::from_entropy());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut session);

    // Cleanup terminal
    if let Err(e) = terminal.show_cursor() {
        tracing::error!(error = %e, "failed to show cursor");
    }
    let raw_mode = disable_raw_mode();
    let screen = terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .map(|_| ());
    first_error([raw_mode, screen])?;

    tracing::info!(high_score = session.high_score(), "exiting");
    result
}

/// Every cleanup step has already run; surface the first failure.
fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().collect()
}

fn run<S: HighScoreStore, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut ArcadeSession<S, R>,
) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, session))?;

        if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press
                    && process_input(session, map_key(key_event)) == InputOutcome::Quit
                {
                    return Ok(());
                }
            }
        }

        // Carry sub-millisecond remainders into the next frame.
        let dt_ms = last_frame.elapsed().as_millis() as u64;
        last_frame += Duration::from_millis(dt_ms);
        session.advance(dt_ms);
    }
}
