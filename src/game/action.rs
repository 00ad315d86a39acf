use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The single committed movement direction.
///
/// Input may overwrite it any number of times between ticks; only the value
/// present when the tick fires is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionLatch {
    current: Option<Direction>,
}

impl DirectionLatch {
    /// A latch that already holds `direction`
    pub fn seeded(direction: Direction) -> Self {
        Self {
            current: Some(direction),
        }
    }

    /// Commit `requested` unless it reverses the current direction.
    ///
    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        match self.current {
            Some(current) if current.is_opposite(requested) => false,
            _ => {
                self.current = Some(requested);
                true
            }
        }
    }

    pub fn current(&self) -> Option<Direction> {
        self.current
    }
}
