use std::io;
use std::time::Duration;

use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Typed commands accepted by the lifecycle controller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    SetDirection(Direction),
    ToggleRun,
    Stop,
    Reset,
    /// Raw user text; parsing and range checks happen in the controller.
    SetSpeed(String),
}

/// Front-end actions decoded from key presses outside the speed prompt.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    Direction(Direction),
    ToggleRun,
    Stop,
    Reset,
    OpenSpeedPrompt,
    Quit,
}

impl KeyAction {
    /// Maps a key event onto a game action, if any.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Self::Quit);
        }

        let action = match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Self::Direction(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Self::Direction(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Self::Direction(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Self::Direction(Direction::Right),
            KeyCode::Char(' ' | 'p' | 'P') | KeyCode::Enter => Self::ToggleRun,
            KeyCode::Char('x' | 'X') => Self::Stop,
            KeyCode::Char('r' | 'R') => Self::Reset,
            KeyCode::Char('v' | 'V' | '+') => Self::OpenSpeedPrompt,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };

        Some(action)
    }

    /// Converts the action into a controller command when it maps onto one.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Direction(direction) => Some(Command::SetDirection(direction)),
            Self::ToggleRun => Some(Command::ToggleRun),
            Self::Stop => Some(Command::Stop),
            Self::Reset => Some(Command::Reset),
            Self::OpenSpeedPrompt | Self::Quit => None,
        }
    }
}

/// Polls crossterm for key presses without blocking longer than `timeout`.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the next key press, ignoring releases and non-key events.
    pub fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{direction_change_is_valid, Command, Direction, KeyAction};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reverse_direction_change_is_invalid() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrow_keys_map_to_direction_commands() {
        let action = KeyAction::from_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));

        assert_eq!(action, Some(KeyAction::Direction(Direction::Left)));
        assert_eq!(
            action.and_then(KeyAction::command),
            Some(Command::SetDirection(Direction::Left))
        );
    }

    #[test]
    fn ctrl_c_quits_and_has_no_command() {
        let action = KeyAction::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(action, Some(KeyAction::Quit));
        assert_eq!(KeyAction::Quit.command(), None);
    }

    #[test]
    fn s_steers_down_and_v_opens_speed_prompt() {
        let press = |ch| KeyAction::from_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));

        assert_eq!(press('s'), Some(KeyAction::Direction(Direction::Down)));
        assert_eq!(press('S'), Some(KeyAction::Direction(Direction::Down)));
        assert_eq!(press('v'), Some(KeyAction::OpenSpeedPrompt));
        assert_eq!(press('+'), Some(KeyAction::OpenSpeedPrompt));
        assert_eq!(KeyAction::OpenSpeedPrompt.command(), None);
    }

    #[test]
    fn direction_parses_from_command_line_values() {
        assert_eq!(Direction::from_str("left", false), Ok(Direction::Left));
        assert_eq!(Direction::from_str("UP", true), Ok(Direction::Up));
        assert!(Direction::from_str("north", true).is_err());
    }
}
