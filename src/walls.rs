use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::snake::Position;

/// Produces the wall set for a fresh round.
pub trait WallGenerator {
    fn generate(&self, bounds: GridSize) -> HashSet<Position>;
}

/// Built-in wall layouts selectable from configuration.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WallLayout {
    /// Every cell on the outer edge of the board.
    #[default]
    Perimeter,
    /// No walls at all; the snake wraps across every edge.
    Open,
    /// Explicit wall cells. Points outside the board are ignored.
    Custom { points: Vec<Position> },
}

impl WallGenerator for WallLayout {
    fn generate(&self, bounds: GridSize) -> HashSet<Position> {
        match self {
            Self::Perimeter => perimeter(bounds),
            Self::Open => HashSet::new(),
            Self::Custom { points } => points
                .iter()
                .copied()
                .filter(|point| point.is_within_bounds(bounds))
                .collect(),
        }
    }
}

fn perimeter(bounds: GridSize) -> HashSet<Position> {
    let max_x = i32::from(bounds.width) - 1;
    let max_y = i32::from(bounds.height) - 1;
    let mut walls = HashSet::new();

    for y in 0..=max_y {
        for x in 0..=max_x {
            if x == 0 || x == max_x || y == 0 || y == max_y {
                walls.insert(Position::new(x, y));
            }
        }
    }

    walls
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{WallGenerator, WallLayout};

    #[test]
    fn perimeter_covers_outer_ring_only() {
        let walls = WallLayout::Perimeter.generate(GridSize {
            width: 5,
            height: 4,
        });

        assert_eq!(walls.len(), 14);
        assert!(walls.contains(&Position::new(0, 0)));
        assert!(walls.contains(&Position::new(4, 3)));
        assert!(walls.contains(&Position::new(2, 0)));
        assert!(!walls.contains(&Position::new(2, 2)));
    }

    #[test]
    fn open_layout_has_no_walls() {
        let walls = WallLayout::Open.generate(GridSize {
            width: 5,
            height: 5,
        });

        assert!(walls.is_empty());
    }

    #[test]
    fn custom_layout_drops_out_of_range_points() {
        let layout = WallLayout::Custom {
            points: vec![Position::new(1, 1), Position::new(7, 1), Position::new(-1, 0)],
        };

        let walls = layout.generate(GridSize {
            width: 5,
            height: 5,
        });

        assert_eq!(walls.len(), 1);
        assert!(walls.contains(&Position::new(1, 1)));
    }

    #[test]
    fn layout_deserializes_from_tagged_json() {
        let layout: WallLayout =
            serde_json::from_str(r#"{"kind":"custom","points":[{"x":2,"y":3}]}"#)
                .expect("layout json should parse");

        assert_eq!(
            layout,
            WallLayout::Custom {
                points: vec![Position::new(2, 3)],
            }
        );
    }
}
