use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use snake_runner::config::{config_path, load_config, ConfigError, GameConfig};
use snake_runner::display::DisplayModel;
use snake_runner::game::GameState;
use snake_runner::input::{Command, Direction, InputHandler, KeyAction};
use snake_runner::renderer;
use snake_runner::snake::Position;
use snake_runner::terminal_runtime::{install_panic_hook, AppTerminal, TerminalSession};
use snake_runner::ui::prompt::{PromptAction, SpeedPrompt};
use snake_runner::walls::WallLayout;
use tracing_subscriber::EnvFilter;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WallsArg {
    Perimeter,
    Open,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,
    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,
    /// Ticks per second, 1 to 15.
    #[arg(long)]
    speed: Option<u32>,
    /// Start column of the head.
    #[arg(long)]
    start_x: Option<i32>,
    /// Start row of the head.
    #[arg(long)]
    start_y: Option<i32>,
    /// Initial heading.
    #[arg(long, value_enum)]
    direction: Option<Direction>,
    /// Wall layout.
    #[arg(long, value_enum)]
    walls: Option<WallsArg>,
    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = resolve_config(&cli).map_err(invalid_input)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        speed = config.ticks_per_second,
        "starting"
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
    .map_err(invalid_input)?;

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), state)
}

fn run(terminal: &mut AppTerminal, mut state: GameState) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut model = DisplayModel::new(state.config().bounds());
    let mut prompt: Option<SpeedPrompt> = None;
    state.flush(&mut model);

    loop {
        terminal.draw(|frame| renderer::render(frame, &model, prompt.as_ref()))?;

        if let Some(key) = input.poll_key(FRAME_INTERVAL)? {
            if let Some(open_prompt) = prompt.as_mut() {
                match open_prompt.handle_key(key) {
                    PromptAction::Editing => {}
                    PromptAction::Cancel => prompt = None,
                    PromptAction::Submit(text) => {
                        prompt = None;
                        let _ = state.apply(Command::SetSpeed(text));
                    }
                }
            } else if let Some(action) = KeyAction::from_key(key) {
                match action {
                    KeyAction::Quit => break,
                    KeyAction::OpenSpeedPrompt if !state.is_running() => {
                        prompt = Some(SpeedPrompt::new(state.speed()));
                    }
                    other => {
                        if let Some(command) = other.command() {
                            let _ = state.apply(command);
                        }
                    }
                }
            }
        }

        let _ = state.advance(Instant::now());
        state.flush(&mut model);
    }

    tracing::info!("quit");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let mut config = load_config(&path)?;

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(speed) = cli.speed {
        config.ticks_per_second = speed;
    }
    if cli.start_x.is_some() || cli.start_y.is_some() {
        let fallback = config.start_position();
        config.start = Some(Position::new(
            cli.start_x.unwrap_or(fallback.x),
            cli.start_y.unwrap_or(fallback.y),
        ));
    }
    if let Some(direction) = cli.direction {
        config.direction = direction;
    }
    if let Some(walls) = cli.walls {
        config.walls = match walls {
            WallsArg::Perimeter => WallLayout::Perimeter,
            WallsArg::Open => WallLayout::Open,
        };
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    // The terminal belongs to the game, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn invalid_input(error: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
