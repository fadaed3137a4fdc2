use std::collections::VecDeque;

use crate::board::Cell;

/// Minimum number of segments a snake ever has.
pub const MIN_SNAKE_LEN: usize = 2;

/// Snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// The two-segment snake every session starts with.
    #[must_use]
    pub fn initial() -> Self {
        Self::from_segments(vec![Cell::new(10, 10), Cell::new(9, 10)])
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(segments.len() >= MIN_SNAKE_LEN);
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Prepends `head` and drops the tail segment.
    pub fn advance(&mut self, head: Cell) {
        self.body.push_front(head);
        let _ = self.body.pop_back();
    }

    /// Prepends `head` and keeps the tail, growing by one.
    pub fn grow(&mut self, head: Cell) {
        self.body.push_front(head);
    }

    /// Appends `count` copies of the current tail cell.
    ///
    /// The copies stack on one cell and separate over the next ticks.
    pub fn extend_tail(&mut self, count: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat_n(tail, count));
    }

    /// Drops tail segments so the length becomes `max(MIN_SNAKE_LEN, len - count)`.
    pub fn shrink(&mut self, count: usize) {
        let target = self.body.len().saturating_sub(count).max(MIN_SNAKE_LEN);
        self.body.truncate(target);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake never has fewer than two segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Copies the body into a vector, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}
