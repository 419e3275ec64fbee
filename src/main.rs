//! T-Rex Runner entry point
//!
//! Loads settings, sets up logging and the terminal, then runs the fixed-step
//! game loop until the player quits.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::{event, terminal};

use trex_runner::platform::{InputEvent, TerminalGuard, map_event};
use trex_runner::renderer::{ItemId, Renderer, Scene, TerminalCanvas};
use trex_runner::settings::DEFAULT_SETTINGS_PATH;
use trex_runner::sim::{FixedStep, GameEvent};
use trex_runner::{FileHighScoreStore, Session, Settings};

fn main() -> io::Result<()> {
    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    // Settings diagnostics are logged by `resolve`, so the logger comes first
    let read = Settings::read(&settings_path);
    init_logging(&Settings::log_path_of(&read));
    log::info!(
        "T-Rex Runner starting (settings: {})",
        settings_path.display()
    );
    let settings = Settings::resolve(read, &settings_path);

    let seed = settings.resolve_seed();
    let store = FileHighScoreStore::new(settings.high_score_path.clone());
    let mut session = Session::new(store, settings.tuning.clone(), seed);

    let _guard = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(stdout(), cols, rows);
    let mut scene = Scene::new(&mut canvas, session.state());

    let result = run(&mut session, &mut canvas, &mut scene);
    log::info!(
        "Exiting after {} run(s), high score {}",
        session.state().run(),
        session.state().high_score()
    );
    result
}

/// Send log records to a file; the terminal belongs to the game
fn init_logging(path: &Path) {
    match File::create(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => {
            eprintln!("Logging disabled, cannot open {}: {}", path.display(), e);
        }
    }
}

fn run(
    session: &mut Session<FileHighScoreStore>,
    canvas: &mut TerminalCanvas<io::Stdout>,
    scene: &mut Scene<ItemId>,
) -> io::Result<()> {
    let mut pacer = FixedStep::new(session.state().tuning().tick_ms);
    let mut last = Instant::now();

    loop {
        // Input
        if event::poll(pacer.until_next())? {
            while event::poll(Duration::ZERO)? {
                match map_event(&event::read()?) {
                    Some(InputEvent::Quit) => return Ok(()),
                    Some(InputEvent::Jump) => session.request_jump(),
                    Some(InputEvent::Restart) => session.request_restart(),
                    Some(InputEvent::Resize(cols, rows)) => canvas.resize(cols, rows),
                    None => {}
                }
            }
        }

        // Simulation
        let now = Instant::now();
        let steps = pacer.advance(now - last);
        last = now;
        if steps == 0 {
            continue;
        }
        for _ in 0..steps {
            for event in session.tick() {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        log::debug!("Crashed with score {}", score)
                    }
                    GameEvent::Restarted { run } => log::debug!("Run {} started", run),
                    _ => {}
                }
            }
        }

        // Render
        scene.sync(canvas, session.state());
        if let Err(e) = canvas.present() {
            log::warn!("Frame not drawn: {}", e);
        }
    }
}
