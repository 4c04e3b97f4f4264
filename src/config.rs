use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Direction;
use crate::snake::Position;
use crate::walls::{WallGenerator, WallLayout};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the default head cell: one step up-left of the centre, so a
    /// 30x30 board starts at (14, 14).
    #[must_use]
    pub fn default_start(self) -> Position {
        Position::new(start_axis(self.width), start_axis(self.height))
    }
}

fn start_axis(extent: u16) -> i32 {
    match extent {
        2 => 1,
        _ => (i32::from(extent) / 2 - 1).max(0),
    }
}

pub const DEFAULT_GRID_WIDTH: u16 = 30;
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Ticks per second used when nothing else is configured.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;
pub const MIN_TICKS_PER_SECOND: u32 = 1;
pub const MAX_TICKS_PER_SECOND: u32 = 15;

pub const DEFAULT_DIRECTION: Direction = Direction::Down;

const APP_DIR_NAME: &str = "snake-runner";
const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the delay between two ticks at `ticks_per_second`.
#[must_use]
pub fn tick_interval(ticks_per_second: f64) -> Duration {
    Duration::from_secs_f64(1.0 / ticks_per_second.max(f64::from(MIN_TICKS_PER_SECOND)))
}

/// Returns true when `ticks_per_second` is inside the accepted speed range.
#[must_use]
pub fn speed_in_range(ticks_per_second: f64) -> bool {
    (f64::from(MIN_TICKS_PER_SECOND)..=f64::from(MAX_TICKS_PER_SECOND)).contains(&ticks_per_second)
}

/// Whole ticks per second shown to the player for a possibly fractional speed.
#[must_use]
pub fn displayed_speed(ticks_per_second: f64) -> u32 {
    let rounded = ticks_per_second.round();
    if rounded <= 0.0 {
        0
    } else {
        // In range after validation, so the cast cannot truncate.
        rounded.min(f64::from(u32::MAX)) as u32
    }
}

/// Errors raised while loading or validating [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: u16, height: u16 },
    #[error(
        "speed must be within {} and {}, got {}",
        MIN_TICKS_PER_SECOND,
        MAX_TICKS_PER_SECOND,
        .0
    )]
    SpeedOutOfRange(u32),
    #[error("start position ({}, {}) lies outside the board", .0.x, .0.y)]
    StartOutOfBounds(Position),
    #[error("start position ({}, {}) is a wall", .0.x, .0.y)]
    StartOnWall(Position),
    #[error("board has no free cell for food next to the start position")]
    NoRoomForFood,
}

/// Load-time game configuration.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub ticks_per_second: u32,
    /// Start cell of the head; `None` means [`GridSize::default_start`].
    pub start: Option<Position>,
    pub direction: Direction,
    pub walls: WallLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            start: None,
            direction: DEFAULT_DIRECTION,
            walls: WallLayout::Perimeter,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Resolved start position of the head.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.start.unwrap_or_else(|| self.bounds().default_start())
    }

    /// Checks that a round can be set up from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }

        if !speed_in_range(f64::from(self.ticks_per_second)) {
            return Err(ConfigError::SpeedOutOfRange(self.ticks_per_second));
        }

        let start = self.start_position();
        if !start.is_within_bounds(self.bounds()) {
            return Err(ConfigError::StartOutOfBounds(start));
        }

        let walls = self.walls.generate(self.bounds());
        if walls.contains(&start) {
            return Err(ConfigError::StartOnWall(start));
        }

        if walls.len() + 1 >= self.bounds().total_cells() {
            return Err(ConfigError::NoRoomForFood);
        }

        Ok(())
    }
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads configuration from `path`.
///
/// Returns defaults when the file does not exist. Returns `Err` when the file
/// exists but cannot be read or parsed. The result is not validated.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GameConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Fixed colors for the terminal renderer.
#[derive(Debug)]
pub struct Palette {
    pub head: Color,
    pub body: Color,
    pub food: Color,
    pub wall: Color,
    pub empty_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub notice: Color,
    pub menu_title: Color,
}

pub const PALETTE: Palette = Palette {
    head: Color::White,
    body: Color::Blue,
    food: Color::Red,
    wall: Color::DarkGray,
    empty_bg: Color::Black,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    notice: Color::Yellow,
    menu_title: Color::Green,
};

/// Terminal columns used per board cell so cells render roughly square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_HEAD: &str = "██";
pub const GLYPH_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_WALL: &str = "░░";
pub const GLYPH_EMPTY: &str = "  ";
