use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }

    /// Applies the edge wrap rule to a freshly stepped position.
    ///
    /// The rule is deliberately asymmetric. A coordinate of `-1` always
    /// re-enters at the far edge of its axis. A coordinate past the far edge
    /// only re-enters at `0` when `direction` is the forward motion of that
    /// axis (`Right` for x, `Down` for y); otherwise it is left out of bounds
    /// and the caller decides what that means.
    #[must_use]
    pub fn wrap_edges(self, direction: Direction, bounds: GridSize) -> Self {
        let max_x = i32::from(bounds.width) - 1;
        let max_y = i32::from(bounds.height) - 1;
        let mut wrapped = self;

        if wrapped.x == -1 {
            wrapped.x = max_x;
        }
        if wrapped.y == -1 {
            wrapped.y = max_y;
        }
        if wrapped.x > max_x && direction == Direction::Right {
            wrapped.x = 0;
        }
        if wrapped.y > max_y && direction == Direction::Down {
            wrapped.y = 0;
        }

        wrapped
    }
}

/// Head, body stack and steering state of the player's snake.
///
/// The body is a most-recent-first stack. `length` counts body segments
/// without the head and matches `body.len()` between ticks.
#[derive(Debug, Clone)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
    direction: Direction,
    gate_open: bool,
    length: usize,
}

impl Snake {
    /// Creates a head-only snake at `start` facing `direction`.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
            direction,
            gate_open: true,
            length: 0,
        }
    }

    /// Creates a snake from a head and body segments ordered newest first.
    #[must_use]
    pub fn from_parts(head: Position, body: Vec<Position>, direction: Direction) -> Self {
        let length = body.len();
        Self {
            head,
            body: VecDeque::from(body),
            direction,
            gate_open: true,
            length,
        }
    }

    /// Accepts a direction change when the per-tick gate is open and the
    /// request does not reverse the current heading. Closes the gate on success.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.gate_open || !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = direction;
        self.gate_open = false;
        true
    }

    /// Re-opens the direction-change gate for the next tick.
    pub fn open_gate(&mut self) {
        self.gate_open = true;
    }

    #[must_use]
    pub fn gate_open(&self) -> bool {
        self.gate_open
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    pub(crate) fn set_head(&mut self, head: Position) {
        self.head = head;
    }

    pub(crate) fn push_body(&mut self, position: Position) {
        self.body.push_front(position);
    }

    pub(crate) fn discard_newest(&mut self) -> Option<Position> {
        self.body.pop_front()
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    pub(crate) fn grow(&mut self) {
        self.length += 1;
    }

    /// Number of body segments, not counting the head.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Length shown to the player: body segments plus the head.
    #[must_use]
    pub fn display_length(&self) -> usize {
        self.length + 1
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from newest to oldest.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if the head or any body segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    /// Returns true if one of the first `count` body segments (newest first)
    /// occupies `position`.
    #[must_use]
    pub fn body_prefix_contains(&self, count: usize, position: Position) -> bool {
        self.body.iter().take(count).any(|segment| *segment == position)
    }
}
