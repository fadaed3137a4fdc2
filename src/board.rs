use crate::config::GRID_SIZE;
use crate::input::Direction;
use crate::snake::Snake;

/// Board cell in 1-indexed grid coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    ///
    /// The result may lie outside the board; callers check bounds.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Returns true iff `1 <= x, y <= GRID_SIZE`.
#[must_use]
pub fn is_in_bounds(cell: Cell) -> bool {
    (1..=GRID_SIZE).contains(&cell.x) && (1..=GRID_SIZE).contains(&cell.y)
}

/// Returns true iff any snake segment sits on `cell`.
#[must_use]
pub fn is_occupied(cell: Cell, snake: &Snake) -> bool {
    snake.occupies(cell)
}

/// Number of cells on the board.
#[must_use]
pub fn total_cells() -> usize {
    let side = usize::try_from(GRID_SIZE).unwrap_or(0);
    side * side
}

/// Iterates every board cell, row by row.
pub fn cells() -> impl Iterator<Item = Cell> {
    (1..=GRID_SIZE).flat_map(|y| (1..=GRID_SIZE).map(move |x| Cell::new(x, y)))
}
