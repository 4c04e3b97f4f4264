use rand::Rng;

use crate::board::{Board, Cell};
use crate::food::spawn_position;
use crate::snake::{Position, Snake};

/// Why a run ended in a loss.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    SelfCollision,
    WallCollision,
    /// The head crossed the far edge without the wrap rule bringing it back.
    EdgeOverflow,
}

/// Result of advancing the simulation by one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    Grew,
    Lost(DeathReason),
    /// Food was eaten and no free cell remains for the next one.
    Won,
}

/// Board, snake and food of the round in progress.
#[derive(Debug, Clone)]
pub struct Playfield {
    pub board: Board,
    pub snake: Snake,
    pub food: Option<Position>,
}

/// Advances the snake one cell in its current direction.
///
/// Food is consumed when the cell the head is leaving holds the food, so
/// growth is credited on the tick after the head reaches it. On a collision
/// nothing is committed: the head and body keep their pre-tick state and the
/// board is left untouched.
pub fn advance<R: Rng + ?Sized>(field: &mut Playfield, rng: &mut R) -> TickOutcome {
    let bounds = field.board.size();
    let last_head = field.snake.head();
    let direction = field.snake.direction();
    let new_head = last_head.stepped(direction).wrap_edges(direction, bounds);
    field.snake.open_gate();

    field.snake.push_body(last_head);
    let eats = field.food == Some(last_head);

    if let Some(reason) = collision(field, new_head, eats) {
        let _ = field.snake.discard_newest();
        return TickOutcome::Lost(reason);
    }

    field.board.classify(last_head, Cell::Body);

    let outcome = if eats {
        field.snake.grow();
        field.food = spawn_position(rng, &field.board, &field.snake, new_head);
        match field.food {
            Some(food) => {
                field.board.classify(food, Cell::Food);
                TickOutcome::Grew
            }
            None => TickOutcome::Won,
        }
    } else {
        if let Some(tail) = field.snake.pop_tail() {
            field.board.classify(tail, Cell::Empty);
        }
        TickOutcome::Moved
    };

    field.board.classify(new_head, Cell::Head);
    field.snake.set_head(new_head);

    outcome
}

fn collision(field: &Playfield, new_head: Position, eats: bool) -> Option<DeathReason> {
    if !new_head.is_within_bounds(field.board.size()) {
        return Some(DeathReason::EdgeOverflow);
    }

    if field.board.is_wall(new_head) {
        return Some(DeathReason::WallCollision);
    }

    // The oldest segment moves out of the way this tick unless the snake grows.
    let body_len = field.snake.body_len();
    let checked = if eats { body_len } else { body_len.saturating_sub(1) };
    if field.snake.body_prefix_contains(checked, new_head) {
        return Some(DeathReason::SelfCollision);
    }

    None
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::board::{Board, Cell};
    use crate::config::GridSize;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};
    use crate::walls::{WallGenerator, WallLayout};

    use super::{advance, DeathReason, Playfield, TickOutcome};

    fn field(bounds: GridSize, layout: &WallLayout, snake: Snake, food: Position) -> Playfield {
        let mut board = Board::new(bounds);
        board.set_walls(layout.generate(bounds));
        board.classify(snake.head(), Cell::Head);
        for segment in snake.body() {
            board.classify(*segment, Cell::Body);
        }
        board.classify(food, Cell::Food);
        let _ = board.take_changes();

        Playfield {
            board,
            snake,
            food: Some(food),
        }
    }

    fn five_by_five() -> GridSize {
        GridSize {
            width: 5,
            height: 5,
        }
    }

    #[test]
    fn head_moves_down_and_leaves_no_body_without_food() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = field(
            five_by_five(),
            &WallLayout::Perimeter,
            Snake::new(Position::new(2, 2), Direction::Down),
            Position::new(1, 1),
        );

        let outcome = advance(&mut field, &mut rng);

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(field.snake.head(), Position::new(2, 3));
        assert_eq!(field.snake.length(), 0);
        assert_eq!(field.snake.body_len(), 0);
        assert_eq!(field.board.cell(Position::new(2, 3)), Cell::Head);
        assert_eq!(field.board.cell(Position::new(2, 2)), Cell::Empty);
    }

    #[test]
    fn growth_is_credited_when_head_leaves_food_cell() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = GridSize {
            width: 10,
            height: 10,
        };
        let mut field = field(
            bounds,
            &WallLayout::Perimeter,
            Snake::from_parts(Position::new(3, 5), vec![Position::new(2, 5)], Direction::Right),
            Position::new(4, 5),
        );

        assert_eq!(advance(&mut field, &mut rng), TickOutcome::Moved);
        assert_eq!(field.snake.length(), 1);
        assert_eq!(field.board.cell(Position::new(4, 5)), Cell::Head);

        assert_eq!(advance(&mut field, &mut rng), TickOutcome::Grew);
        assert_eq!(field.snake.length(), 2);
        assert_eq!(field.snake.body_len(), 2);
        assert_eq!(field.snake.head(), Position::new(5, 5));

        let food = field.food.expect("food respawned");
        assert!(!field.snake.occupies(food));
        assert!(!field.board.is_wall(food));
        assert_eq!(field.board.cell(food), Cell::Food);
    }

    #[test]
    fn move_without_food_swaps_one_head_and_one_tail_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = field(
            GridSize {
                width: 8,
                height: 8,
            },
            &WallLayout::Perimeter,
            Snake::from_parts(
                Position::new(4, 3),
                vec![Position::new(3, 3), Position::new(2, 3)],
                Direction::Down,
            ),
            Position::new(6, 6),
        );

        advance(&mut field, &mut rng);

        assert_eq!(field.snake.body_len(), 2);
        assert_eq!(field.snake.length(), 2);
        assert_eq!(field.board.cell(Position::new(2, 3)), Cell::Empty);
        assert_eq!(field.board.cell(Position::new(4, 3)), Cell::Body);
        assert_eq!(field.board.cell(Position::new(4, 4)), Cell::Head);
        let body: Vec<Position> = field.snake.body().copied().collect();
        assert_eq!(body, vec![Position::new(4, 3), Position::new(3, 3)]);
    }

    #[test]
    fn wall_collision_rolls_back_head_and_body() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = field(
            five_by_five(),
            &WallLayout::Perimeter,
            Snake::from_parts(Position::new(3, 2), vec![Position::new(2, 2)], Direction::Right),
            Position::new(1, 1),
        );

        let outcome = advance(&mut field, &mut rng);

        assert_eq!(outcome, TickOutcome::Lost(DeathReason::WallCollision));
        assert_eq!(field.snake.head(), Position::new(3, 2));
        assert_eq!(field.snake.body().copied().collect::<Vec<_>>(), vec![Position::new(2, 2)]);
        assert_eq!(field.board.cell(Position::new(3, 2)), Cell::Head);
        assert!(field.board.take_changes().is_empty());
    }

    #[test]
    fn self_collision_ends_run() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = field(
            GridSize {
                width: 8,
                height: 8,
            },
            &WallLayout::Perimeter,
            Snake::from_parts(
                Position::new(3, 3),
                vec![
                    Position::new(3, 4),
                    Position::new(2, 4),
                    Position::new(2, 3),
                    Position::new(2, 2),
                ],
                Direction::Left,
            ),
            Position::new(6, 6),
        );

        let outcome = advance(&mut field, &mut rng);

        assert_eq!(outcome, TickOutcome::Lost(DeathReason::SelfCollision));
        assert_eq!(field.snake.head(), Position::new(3, 3));
        assert_eq!(field.snake.body_len(), 4);
    }

    #[test]
    fn head_may_enter_cell_vacated_by_tail() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut field = field(
            GridSize {
                width: 8,
                height: 8,
            },
            &WallLayout::Perimeter,
            Snake::from_parts(
                Position::new(3, 3),
                vec![Position::new(3, 4), Position::new(2, 4), Position::new(2, 3)],
                Direction::Left,
            ),
            Position::new(6, 6),
        );

        assert_eq!(advance(&mut field, &mut rng), TickOutcome::Moved);
        assert_eq!(field.snake.head(), Position::new(2, 3));
        assert_eq!(field.board.cell(Position::new(2, 3)), Cell::Head);
    }

    #[test]
    fn tail_is_solid_on_a_growth_tick() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut field = field(
            GridSize {
                width: 8,
                height: 8,
            },
            &WallLayout::Perimeter,
            Snake::from_parts(
                Position::new(3, 3),
                vec![Position::new(3, 4), Position::new(2, 4), Position::new(2, 3)],
                Direction::Left,
            ),
            // Leaving the food cell means this tick grows and keeps the tail.
            Position::new(3, 3),
        );

        let outcome = advance(&mut field, &mut rng);

        assert_eq!(outcome, TickOutcome::Lost(DeathReason::SelfCollision));
        assert_eq!(field.snake.head(), Position::new(3, 3));
        assert_eq!(field.snake.body_len(), 3);
        assert_eq!(field.snake.length(), 3);
        assert_eq!(field.food, Some(Position::new(3, 3)));
        assert!(field.board.take_changes().is_empty());
    }

    #[test]
    fn open_board_wraps_on_both_axes() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 4,
            height: 3,
        };
        let mut field = field(
            bounds,
            &WallLayout::Open,
            Snake::new(Position::new(0, 1), Direction::Left),
            Position::new(2, 2),
        );

        advance(&mut field, &mut rng);
        assert_eq!(field.snake.head(), Position::new(3, 1));

        assert!(field.snake.request_direction(Direction::Up));
        advance(&mut field, &mut rng);
        advance(&mut field, &mut rng);
        assert_eq!(field.snake.head(), Position::new(3, 2));
    }

    #[test]
    fn eating_the_last_free_cell_wins() {
        let mut rng = StdRng::seed_from_u64(8);
        let bounds = GridSize {
            width: 4,
            height: 3,
        };
        // Wall everything except a 2x1 corridor.
        let mut walls = Vec::new();
        for y in 0..3 {
            for x in 0..4 {
                if !(y == 1 && (x == 1 || x == 2)) {
                    walls.push(Position::new(x, y));
                }
            }
        }
        let mut field = field(
            bounds,
            &WallLayout::Custom { points: walls },
            Snake::new(Position::new(1, 1), Direction::Right),
            Position::new(1, 1),
        );

        let outcome = advance(&mut field, &mut rng);

        assert_eq!(outcome, TickOutcome::Won);
        assert_eq!(field.food, None);
        assert_eq!(field.snake.head(), Position::new(2, 1));
        assert_eq!(field.snake.length(), 1);
    }
}
