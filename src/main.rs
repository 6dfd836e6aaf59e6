use std::fs;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacman_chase::config::Settings;
use pacman_chase::error::{AppError, AppResult};
use pacman_chase::game::Phase;
use pacman_chase::input::{self, Command};
use pacman_chase::level::Layout;
use pacman_chase::render::{Palette, Renderer};
use pacman_chase::session::Session;
use pacman_chase::terminal::TerminalGuard;

/// Input poll timeout while no game loop is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    init_logging(&settings)?;

    let layout = load_layout(&settings)?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed, tick_ms = settings.tick_ms, fps = settings.fps, "starting");

    let mut session = Session::new(layout, ChaCha8Rng::seed_from_u64(seed), settings.timing());
    let mut renderer = Renderer::new(session.layout(), Palette::for_theme(settings.theme));

    let mut screen = TerminalGuard::enter(io::stdout())?;
    let result = run(screen.writer(), &mut session, &mut renderer);
    drop(screen);

    let state = session.state();
    info!(phase = ?state.phase, score = state.score, "exiting");
    Ok(result?)
}

fn init_logging(settings: &Settings) -> AppResult<()> {
    // The terminal belongs to the game, so logs only go to a file.
    let Some(path) = settings.log_file.as_ref() else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.clone(),
            source,
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_layout(settings: &Settings) -> AppResult<Layout> {
    let Some(path) = settings.maze.as_ref() else {
        return Ok(Layout::reference());
    };
    let text = fs::read_to_string(path).map_err(|source| AppError::LayoutRead {
        path: path.clone(),
        source,
    })?;
    let layout = Layout::parse(&text).map_err(|source| AppError::LayoutInvalid {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        rows = layout.maze().height(),
        cols = layout.maze().width(),
        "loaded maze"
    );
    Ok(layout)
}

fn run(
    stdout: &mut Stdout,
    session: &mut Session<ChaCha8Rng>,
    renderer: &mut Renderer,
) -> AppResult<()> {
    // Phase whose static screen is currently on display.
    let mut shown: Option<Phase> = None;

    loop {
        let wait = session
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) => match input::translate(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Start) if !session.is_running() => {
                        session.start(Instant::now())
                    }
                    Some(Command::Restart) => session.start(Instant::now()),
                    Some(Command::Steer(dir)) => session.set_pending_direction(dir),
                    Some(Command::Start) | None => {}
                },
                Event::Resize(_, _) => {
                    renderer.invalidate();
                    shown = None;
                }
                _ => {}
            }
        }

        let pump = session.pump(Instant::now());
        if pump.frame_due {
            renderer.render(stdout, session.layout(), session.game())?;
        }

        if session.is_running() {
            shown = None;
        } else if shown != Some(session.phase()) {
            renderer.render(stdout, session.layout(), session.game())?;
            renderer.render_overlay(stdout, session.layout(), &session.state())?;
            shown = Some(session.phase());
        }
    }
}
