use rand::Rng;

use crate::board::{self, Cell};
use crate::config::{GRID_SIZE, SPAWN_SAMPLE_ATTEMPTS};
use crate::snake::Snake;

/// Effect applied when the snake eats a special item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SpecialKind {
    /// Adds three segments.
    Growth,
    /// Removes up to three segments.
    Shrink,
}

/// Temporary bonus or penalty item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpecialItem {
    pub position: Cell,
    pub kind: SpecialKind,
}

/// Picks a free cell for food.
///
/// Samples uniformly at random first, then falls back to choosing among the
/// enumerated free cells so a crowded board still terminates. Returns `None`
/// when the snake covers the whole board.
#[must_use]
pub fn generate_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Option<Cell> {
    for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
        let candidate = Cell::new(rng.gen_range(1..=GRID_SIZE), rng.gen_range(1..=GRID_SIZE));
        if !board::is_occupied(candidate, snake) {
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = board::cells()
        .filter(|cell| !board::is_occupied(*cell, snake))
        .collect();
    if free.is_empty() {
        return None;
    }

    Some(free[rng.gen_range(0..free.len())])
}

/// Rolls for a special item: half the time nothing, otherwise a Growth or
/// Shrink item (equally likely) on a free cell.
#[must_use]
pub fn maybe_generate_special_item<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
) -> Option<SpecialItem> {
    if !rng.gen_bool(0.5) {
        return None;
    }

    let kind = if rng.gen_bool(0.5) {
        SpecialKind::Growth
    } else {
        SpecialKind::Shrink
    };
    let position = generate_food(rng, snake)?;

    Some(SpecialItem { position, kind })
}
