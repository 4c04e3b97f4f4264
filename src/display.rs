use crate::board::{Cell, CellChange};
use crate::config::GridSize;
use crate::engine::DeathReason;
use crate::game::{CommandError, GameStatus};
use crate::snake::Position;

/// Player-facing messages raised by the controller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Notice {
    Lost(DeathReason),
    Won,
    Rejected(CommandError),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lost(DeathReason::SelfCollision) => "You lose: hit yourself".to_owned(),
            Self::Lost(DeathReason::WallCollision) => "You lose: hit a wall".to_owned(),
            Self::Lost(DeathReason::EdgeOverflow) => "You lose: left the board".to_owned(),
            Self::Won => "You win: the board is full".to_owned(),
            Self::Rejected(error) => error.to_string(),
        }
    }
}

/// Everything the core reports to a display.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DisplayEvent {
    Cell(CellChange),
    /// Snake length including the head.
    Length(usize),
    /// Ticks per second.
    Speed(u32),
    Status(GameStatus),
    Notice(Notice),
}

/// Receiver of display events.
pub trait DisplaySink {
    fn emit(&mut self, event: DisplayEvent);
}

impl DisplaySink for Vec<DisplayEvent> {
    fn emit(&mut self, event: DisplayEvent) {
        self.push(event);
    }
}

/// Renderer-side mirror of the game, built only from display events.
#[derive(Debug, Clone)]
pub struct DisplayModel {
    size: GridSize,
    cells: Vec<Cell>,
    pub length: usize,
    pub speed: u32,
    pub status: GameStatus,
    pub notice: Option<Notice>,
}

impl DisplayModel {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
            length: 0,
            speed: 0,
            status: GameStatus::Stopped,
            notice: None,
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the mirrored classification, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !position.is_within_bounds(self.size) {
            return None;
        }
        let index = position.y as usize * usize::from(self.size.width) + position.x as usize;
        self.cells.get(index).copied()
    }

    /// Label for the start/pause control, following the current status.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        match self.status {
            GameStatus::Running => "PAUSE",
            GameStatus::Paused => "CONTINUE",
            GameStatus::GameOver | GameStatus::Won => "RE-START",
            GameStatus::Stopped | GameStatus::Ready => "START",
        }
    }
}

impl DisplaySink for DisplayModel {
    fn emit(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Cell(change) => {
                if !change.position.is_within_bounds(self.size) {
                    return;
                }
                let index = change.position.y as usize * usize::from(self.size.width)
                    + change.position.x as usize;
                self.cells[index] = change.cell;
            }
            DisplayEvent::Length(length) => self.length = length,
            DisplayEvent::Speed(speed) => self.speed = speed,
            DisplayEvent::Status(status) => {
                // A fresh run clears the last game's message.
                if status == GameStatus::Running && !self.status.is_active() {
                    self.notice = None;
                }
                self.status = status;
            }
            DisplayEvent::Notice(notice) => self.notice = Some(notice),
        }
    }
}
