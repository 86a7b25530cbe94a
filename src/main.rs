use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::GameConfig;
use grid_snake::game::Game;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging;
use grid_snake::terminal_runtime::TerminalSession;
use tracing::info;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the per-user config when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_default()?,
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut session = TerminalSession::enter()?;
    session.fits(config.bounds())?;
    run(&mut session, config)
}

fn run(session: &mut TerminalSession, config: GameConfig) -> io::Result<()> {
    let mut input = InputHandler::new(FRAME_INTERVAL);
    let mut game = Game::new(config);
    game.set_running(false);
    let mut started = false;
    let mut last_tick = Instant::now();

    loop {
        session.draw(&game, started)?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Confirm if !started => {
                    started = true;
                    game.set_running(true);
                    last_tick = Instant::now();
                }
                GameInput::Confirm if game.is_over() => {
                    game.reset();
                    last_tick = Instant::now();
                }
                GameInput::Pause if started => game.toggle_pause(),
                GameInput::Direction(direction) if game.is_running() => {
                    game.enqueue_direction(direction);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= game.tick_interval() {
            let was_over = game.is_over();
            game.step();
            last_tick = Instant::now();

            if game.is_over() && !was_over {
                info!(score = game.score(), reason = ?game.end_reason(), "session ended");
            }
        }
    }

    if started && !game.is_over() {
        info!(score = game.score(), "quit during a running game");
    }

    Ok(())
}
