use std::collections::HashSet;

use crate::config::GridSize;
use crate::snake::Position;

/// Semantic classification of one board cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Head,
    Body,
    Food,
    Wall,
}

/// A single cell whose classification changed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellChange {
    pub position: Position,
    pub cell: Cell,
}

/// Fixed-size grid of classified cells plus the wall set.
///
/// Every call to [`Board::classify`] that actually changes a cell is
/// recorded so the display side can mirror the grid from changes alone.
#[derive(Debug, Clone)]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
    walls: HashSet<Position>,
    changes: Vec<CellChange>,
}

impl Board {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
            walls: HashSet::new(),
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Sets the classification of an in-range cell.
    pub fn classify(&mut self, position: Position, cell: Cell) {
        let index = self.index(position);
        if self.cells[index] == cell {
            return;
        }

        self.cells[index] = cell;
        self.changes.push(CellChange { position, cell });
    }

    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[self.index(position)]
    }

    #[must_use]
    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    /// Replaces the wall set and classifies every wall cell.
    pub fn set_walls(&mut self, walls: HashSet<Position>) {
        for position in &walls {
            self.classify(*position, Cell::Wall);
        }
        self.walls = walls;
    }

    /// Empties every cell and forgets the wall set.
    pub fn clear(&mut self) {
        for y in 0..i32::from(self.size.height) {
            for x in 0..i32::from(self.size.width) {
                self.classify(Position::new(x, y), Cell::Empty);
            }
        }
        self.walls.clear();
    }

    /// Iterates over every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = i32::from(self.size.width);
        (0..i32::from(self.size.height))
            .flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Drains the changes recorded since the last call.
    pub fn take_changes(&mut self) -> Vec<CellChange> {
        std::mem::take(&mut self.changes)
    }

    fn index(&self, position: Position) -> usize {
        debug_assert!(position.is_within_bounds(self.size));
        position.y as usize * usize::from(self.size.width) + position.x as usize
    }
}
