use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
///
/// May briefly hold an out-of-bounds value right after a wall collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
///
/// `tail` is the history of previous head positions, most recent first, and
/// never holds more than `length` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    length: usize,
    tail: VecDeque<Position>,
}

impl Snake {
    /// Create the starting layout: the tail covers the head cell and then
    /// trails straight down, one entry per unit of length.
    pub fn new(head: Position, length: usize) -> Self {
        let tail = (0..length as i32).map(|i| head.moved_by(0, i)).collect();
        Self { head, length, tail }
    }

    /// Create a snake from an explicit layout. Extra tail entries beyond
    /// `length` are dropped.
    pub fn with_layout(head: Position, tail: Vec<Position>, length: usize) -> Self {
        let mut tail = VecDeque::from(tail);
        tail.truncate(length);
        Self { head, length, tail }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.head
    }

    /// Target length; grows by one per apple and never shrinks
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn tail(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.tail.iter()
    }

    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Record the current head in the tail, then step the head once.
    pub fn advance(&mut self, direction: Direction) {
        self.tail.push_front(self.head);
        self.tail.truncate(self.length);
        self.head = self.head.moved_in_direction(direction);
    }

    /// Check if position matches any recorded tail segment
    pub fn collides_with_tail(&self, pos: Position) -> bool {
        self.tail.contains(&pos)
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit its own tail
    SelfCollision,
}

/// The live apples of a round
///
/// Positions are not deduplicated: two apples may share a cell, and an apple
/// may sit under the snake.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppleSet {
    apples: Vec<Position>,
}

impl AppleSet {
    pub fn new(apples: Vec<Position>) -> Self {
        Self { apples }
    }

    pub fn positions(&self) -> &[Position] {
        &self.apples
    }

    pub fn len(&self) -> usize {
        self.apples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apples.is_empty()
    }

    /// Remove every apple at `pos`, returning how many were removed
    pub fn take_at(&mut self, pos: Position) -> usize {
        let before = self.apples.len();
        self.apples.retain(|apple| *apple != pos);
        before - self.apples.len()
    }

    pub fn push(&mut self, pos: Position) {
        self.apples.push(pos);
    }
}
