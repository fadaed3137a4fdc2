use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use snake::config::{FRAME_POLL_MS, clamp_frame_advance};
use snake::game::{GameEvent, GameSession};
use snake::input::{GameInput, map_game_key, map_prompt_key, poll_key};
use snake::renderer::{self, Overlay, Scene};
use snake::score::{FileScoreStore, MemoryScoreStore, ScoreStore};
use snake::terminal_runtime::TerminalSession;
use snake::ui::menu::SessionSummary;
use snake::ui::prompt::{NamePrompt, PromptState};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Player name; skips the name prompt.
    #[arg(long)]
    name: Option<String>,

    /// Score file location (defaults to the platform data directory).
    #[arg(long = "scores-file", value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Keep scores in memory only.
    #[arg(long, conflicts_with = "scores_file")]
    ephemeral: bool,

    /// Seed for reproducible food and item placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Which screen the front-end shows on top of the board.
#[derive(Debug)]
enum Screen {
    Start,
    NamePrompt(NamePrompt),
    Playing,
    GameOver(SessionSummary),
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let store: Box<dyn ScoreStore> = if cli.ephemeral {
        Box::new(MemoryScoreStore::default())
    } else {
        let store = match cli.scores_file.clone() {
            Some(path) => FileScoreStore::open(path),
            None => FileScoreStore::open_default(),
        };
        tracing::info!(path = %store.path().display(), "using score file");
        Box::new(store)
    };
    let session = match cli.seed {
        Some(seed) => GameSession::new_with_seed(store, seed),
        None => GameSession::new(store),
    };

    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, session, cli.name)
}

fn run(
    terminal: &mut TerminalSession,
    mut session: GameSession,
    cli_name: Option<String>,
) -> io::Result<()> {
    let mut screen = Screen::Start;
    let mut latest = session.snapshot();
    let mut last_advance = Instant::now();

    loop {
        terminal.terminal_mut().draw(|frame| {
            let overlay = match &screen {
                Screen::Start => Overlay::Start,
                Screen::NamePrompt(prompt) => Overlay::NamePrompt(prompt),
                Screen::Playing => Overlay::None,
                Screen::GameOver(summary) => Overlay::GameOver(summary),
            };
            renderer::render(
                frame,
                Scene {
                    frame: &latest,
                    high_score: session.high_score(),
                    history: session.history(),
                    overlay,
                },
            );
        })?;

        if let Some(key) = poll_key(Duration::from_millis(FRAME_POLL_MS))? {
            if let Screen::NamePrompt(prompt) = &mut screen {
                let answer = match map_prompt_key(key).map(|input| prompt.apply(input)) {
                    Some(PromptState::Submitted(name)) => Some(name),
                    Some(PromptState::Cancelled) => Some(None),
                    Some(PromptState::Editing) | None => None,
                };
                if let Some(name) = answer {
                    session.start(|| name);
                    screen = Screen::Playing;
                }
            } else {
                match map_game_key(key) {
                    Some(GameInput::Quit) => break,
                    Some(GameInput::Start) if !session.is_running() => {
                        if session.has_player_name() || cli_name.is_some() {
                            session.start(|| cli_name.clone());
                            screen = Screen::Playing;
                        } else {
                            screen = Screen::NamePrompt(NamePrompt::new());
                        }
                    }
                    Some(GameInput::Direction(direction)) => session.set_direction(direction),
                    Some(GameInput::Start) | None => {}
                }
            }
        }

        let now = Instant::now();
        session.advance(clamp_frame_advance(now.duration_since(last_advance)));
        last_advance = now;

        for event in session.drain_events() {
            match event {
                GameEvent::Render(frame) => latest = frame,
                GameEvent::SessionEnded {
                    player,
                    score,
                    reason,
                    new_high_score,
                } => {
                    screen = Screen::GameOver(SessionSummary {
                        player,
                        score,
                        reason,
                        new_high_score,
                    });
                }
            }
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
