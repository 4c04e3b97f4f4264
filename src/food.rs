use rand::Rng;

use crate::board::Board;
use crate::snake::{Position, Snake};

/// Rejection-sampling attempts per board cell before falling back to a scan.
const SPAWN_ATTEMPTS_PER_CELL: usize = 4;

/// Picks a random cell that is not a wall, not part of `snake` and not `head`.
///
/// `head` is passed separately because during a tick the new head position
/// is not yet committed to the snake. Returns `None` when no such cell
/// exists.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    snake: &Snake,
    head: Position,
) -> Option<Position> {
    let bounds = board.size();
    let is_free = |position: Position| {
        position != head && !snake.occupies(position) && !board.is_wall(position)
    };

    for _ in 0..bounds.total_cells() * SPAWN_ATTEMPTS_PER_CELL {
        let candidate = Position::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        if is_free(candidate) {
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = board.positions().filter(|p| is_free(*p)).collect();
    if candidates.is_empty() {
        return None;
    }

    Some(candidates[rng.gen_range(0..candidates.len())])
}
