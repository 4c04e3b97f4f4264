use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::{Board, Cell};
use crate::config::{
    displayed_speed, speed_in_range, tick_interval, ConfigError, GameConfig,
    MAX_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND,
};
use crate::display::{DisplayEvent, DisplaySink, Notice};
use crate::engine::{self, Playfield, TickOutcome};
use crate::food::spawn_position;
use crate::input::{Command, Direction};
use crate::scheduler::TickScheduler;
use crate::snake::Snake;
use crate::walls::WallGenerator;

/// Lifecycle state of the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// No game in progress.
    Stopped,
    /// A fresh round is laid out but not ticking.
    Ready,
    Running,
    Paused,
    /// The last run ended in a collision.
    GameOver,
    /// The last run filled every free cell.
    Won,
}

impl GameStatus {
    /// True while ticks are being scheduled.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// True while a game is in progress, paused or not.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// Rejections reported back to the player for a command.
///
/// Out-of-range speeds carry the parsed value as text so the error stays `Eq`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CommandError {
    #[error("Invalid speed: {0:?} is not a number")]
    SpeedNotNumeric(String),
    #[error(
        "Speed must be within {} and {}, got {}",
        MIN_TICKS_PER_SECOND,
        MAX_TICKS_PER_SECOND,
        .0
    )]
    SpeedOutOfRange(String),
    #[error("Speed can only be changed while the game is paused or stopped")]
    SpeedLocked,
}

/// Parses raw speed input into ticks per second.
///
/// Fractional and exponent forms are accepted. Blank input counts as zero
/// and so fails the range check rather than the numeric one.
pub fn parse_speed(input: &str) -> Result<f64, CommandError> {
    let trimmed = input.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| CommandError::SpeedNotNumeric(trimmed.to_owned()))?
    };

    if !speed_in_range(value) {
        return Err(CommandError::SpeedOutOfRange(value.to_string()));
    }

    Ok(value)
}

/// Lifecycle controller owning the round, the tick scheduler and the
/// outgoing display events.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Playfield,
    status: GameStatus,
    speed: f64,
    tick_count: u64,
    config: GameConfig,
    scheduler: TickScheduler,
    rng: StdRng,
    pending: Vec<DisplayEvent>,
}

impl GameState {
    /// Creates a game seeded from system entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = config.bounds();
        let speed = f64::from(config.ticks_per_second);
        let mut state = Self {
            field: Playfield {
                board: Board::new(bounds),
                snake: Snake::new(config.start_position(), config.direction),
                food: None,
            },
            status: GameStatus::Stopped,
            speed,
            tick_count: 0,
            scheduler: TickScheduler::new(tick_interval(speed)),
            config,
            rng,
            pending: Vec::new(),
        };

        state.lay_out_round();
        state.pending.push(DisplayEvent::Speed(displayed_speed(speed)));
        state.pending.push(DisplayEvent::Status(state.status));

        Ok(state)
    }

    /// Dispatches one external command.
    ///
    /// Rejections are returned and also queued as a display notice.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        let result = match command {
            Command::SetDirection(direction) => {
                let _ = self.set_direction(direction);
                Ok(())
            }
            Command::ToggleRun => {
                self.toggle();
                Ok(())
            }
            Command::Stop => {
                self.stop();
                Ok(())
            }
            Command::Reset => {
                let _ = self.reset();
                Ok(())
            }
            Command::SetSpeed(input) => self.set_speed(&input),
        };

        if let Err(error) = &result {
            tracing::warn!(%error, "command rejected");
            self.pending.push(DisplayEvent::Notice(Notice::Rejected(error.clone())));
        }

        result
    }

    /// Starts, pauses or resumes. Starting from an inactive state lays out a
    /// fresh round first.
    pub fn toggle(&mut self) {
        match self.status {
            GameStatus::Running => {
                self.scheduler.cancel();
                self.set_status(GameStatus::Paused);
                tracing::info!(tick = self.tick_count, "game paused");
            }
            GameStatus::Paused => {
                self.scheduler.start();
                self.set_status(GameStatus::Running);
                tracing::info!(tick = self.tick_count, "game resumed");
            }
            GameStatus::Stopped | GameStatus::Ready | GameStatus::GameOver | GameStatus::Won => {
                self.lay_out_round();
                self.scheduler.start();
                self.set_status(GameStatus::Running);
                tracing::info!(speed = self.speed, "game started");
            }
        }
    }

    /// Abandons the game in progress and lays out a fresh round.
    pub fn stop(&mut self) {
        if !self.status.is_active() {
            return;
        }

        self.scheduler.cancel();
        self.lay_out_round();
        self.set_status(GameStatus::Stopped);
        tracing::info!(tick = self.tick_count, "game stopped");
    }

    /// Lays out a fresh round. Ignored while running.
    pub fn reset(&mut self) -> bool {
        if self.status.is_running() {
            tracing::debug!("reset ignored while running");
            return false;
        }

        self.scheduler.cancel();
        self.lay_out_round();
        self.set_status(GameStatus::Ready);
        true
    }

    /// Steers the snake while running. Returns whether the change was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.status.is_running() {
            return false;
        }

        self.field.snake.request_direction(direction)
    }

    /// Changes the tick rate from raw user input.
    pub fn set_speed(&mut self, input: &str) -> Result<(), CommandError> {
        if self.status.is_running() {
            return Err(CommandError::SpeedLocked);
        }

        let speed = parse_speed(input)?;
        self.speed = speed;
        self.scheduler.set_interval(tick_interval(speed));
        self.pending.push(DisplayEvent::Speed(displayed_speed(speed)));
        tracing::info!(speed, "speed changed");
        Ok(())
    }

    /// Fires the scheduled tick if it is due at `now` and re-arms the
    /// scheduler while the game keeps running.
    pub fn advance(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.scheduler.poll(now) {
            return None;
        }

        let outcome = self.tick();
        if self.status.is_running() {
            self.scheduler.schedule_next(now);
        }
        outcome
    }

    /// Runs one simulation tick immediately. Does nothing unless running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.status.is_running() {
            return None;
        }

        self.tick_count += 1;
        let outcome = engine::advance(&mut self.field, &mut self.rng);

        match outcome {
            TickOutcome::Lost(reason) => {
                self.scheduler.cancel();
                self.set_status(GameStatus::GameOver);
                self.pending.push(DisplayEvent::Notice(Notice::Lost(reason)));
                tracing::info!(
                    ?reason,
                    length = self.field.snake.display_length(),
                    tick = self.tick_count,
                    "game lost"
                );
            }
            TickOutcome::Won => {
                self.scheduler.cancel();
                self.push_length();
                self.set_status(GameStatus::Won);
                self.pending.push(DisplayEvent::Notice(Notice::Won));
                tracing::info!(
                    length = self.field.snake.display_length(),
                    tick = self.tick_count,
                    "board filled"
                );
            }
            TickOutcome::Moved | TickOutcome::Grew => self.push_length(),
        }

        Some(outcome)
    }

    /// Sends pending cell changes, then queued scalar events, to `sink`.
    pub fn flush<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) {
        for change in self.field.board.take_changes() {
            sink.emit(DisplayEvent::Cell(change));
        }
        for event in self.pending.drain(..) {
            sink.emit(event);
        }
    }

    /// Collects all pending display events.
    pub fn drain_events(&mut self) -> Vec<DisplayEvent> {
        let mut events = Vec::new();
        self.flush(&mut events);
        events
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Current speed in ticks per second, possibly fractional.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns true while a tick is waiting to fire.
    #[must_use]
    pub fn tick_pending(&self) -> bool {
        self.scheduler.is_armed()
    }

    fn lay_out_round(&mut self) {
        let bounds = self.config.bounds();
        let start = self.config.start_position();
        let field = &mut self.field;

        field.board.clear();
        field.board.set_walls(self.config.walls.generate(bounds));
        field.snake = Snake::new(start, self.config.direction);
        field.board.classify(start, Cell::Head);

        field.food = spawn_position(&mut self.rng, &field.board, &field.snake, start);
        if let Some(food) = field.food {
            field.board.classify(food, Cell::Food);
        }

        self.tick_count = 0;
        self.push_length();
    }

    fn push_length(&mut self) {
        self.pending
            .push(DisplayEvent::Length(self.field.snake.display_length()));
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status == status {
            return;
        }
        self.status = status;
        self.pending.push(DisplayEvent::Status(status));
    }
}
