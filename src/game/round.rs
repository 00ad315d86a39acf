use super::action::{Direction, DirectionLatch};
use super::grid::{FieldSize, Grid};
use super::state::{AppleSet, CollisionType, Position, Snake};

/// Lifecycle state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    Over,
}

/// One play session from the initial layout to game over.
///
/// A round is never revived: retrying builds a brand new one.
#[derive(Debug, Clone)]
pub struct Round {
    snake: Snake,
    apples: AppleSet,
    field: FieldSize,
    cell_size: u32,
    latch: DirectionLatch,
    status: RoundStatus,
    cause: Option<CollisionType>,
    game_over_notified: bool,
    base_length: usize,
    ticks: u64,
}

impl Round {
    /// Create a running round. The score counts growth beyond the snake's
    /// length at this point.
    pub fn new(
        snake: Snake,
        apples: AppleSet,
        field: FieldSize,
        cell_size: u32,
        latch: DirectionLatch,
    ) -> Self {
        let base_length = snake.length();
        Self {
            snake,
            apples,
            field,
            cell_size,
            latch,
            status: RoundStatus::Running,
            cause: None,
            game_over_notified: false,
            base_length,
            ticks: 0,
        }
    }

    /// Grid for the current field size
    pub fn grid(&self) -> Grid {
        Grid::from_field(self.field, self.cell_size)
    }

    /// Forward a direction request to the latch
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.latch.set_direction(direction)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.latch.current()
    }

    /// Apply a new field size; the next tick's bounds check uses it
    pub fn resize(&mut self, field: FieldSize) {
        self.field = field;
    }

    pub fn field(&self) -> FieldSize {
        self.field
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apples(&self) -> &AppleSet {
        &self.apples
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == RoundStatus::Over
    }

    /// What ended the round, if it has ended
    pub fn cause(&self) -> Option<CollisionType> {
        self.cause
    }

    pub fn score(&self) -> usize {
        self.snake.length().saturating_sub(self.base_length)
    }

    /// Number of movement ticks applied so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub(crate) fn apples_mut(&mut self) -> &mut AppleSet {
        &mut self.apples
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Enter the over state. Only the first collision is kept as the cause.
    pub(crate) fn mark_over(&mut self, cause: CollisionType) {
        if self.status == RoundStatus::Running {
            self.status = RoundStatus::Over;
            self.cause = Some(cause);
        }
    }

    /// Returns true exactly once after the round is over
    pub(crate) fn take_game_over_notice(&mut self) -> bool {
        if self.is_over() && !self.game_over_notified {
            self.game_over_notified = true;
            true
        } else {
            false
        }
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            field: self.field,
            grid: self.grid(),
            head: self.snake.head(),
            tail: self.snake.tail().copied().collect(),
            apples: self.apples.positions().to_vec(),
            length: self.snake.length(),
            score: self.score(),
            is_over: self.is_over(),
            cause: self.cause,
            direction: self.direction(),
            ticks: self.ticks,
        }
    }
}

/// Settled view of a round between ticks
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub field: FieldSize,
    pub grid: Grid,
    pub head: Position,
    /// Most recent segment first
    pub tail: Vec<Position>,
    pub apples: Vec<Position>,
    pub length: usize,
    pub score: usize,
    pub is_over: bool,
    pub cause: Option<CollisionType>,
    pub direction: Option<Direction>,
    pub ticks: u64,
}

impl RoundSnapshot {
    pub fn is_snake_at(&self, pos: Position) -> bool {
        self.head == pos || self.tail.contains(&pos)
    }

    pub fn is_apple_at(&self, pos: Position) -> bool {
        self.apples.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round::new(
            Snake::new(Position::new(5, 5), 3),
            AppleSet::new(vec![Position::new(1, 1)]),
            FieldSize::new(250, 250),
            25,
            DirectionLatch::seeded(Direction::Up),
        )
    }

    #[test]
    fn test_new_round_is_running() {
        let round = round();
        assert_eq!(round.status(), RoundStatus::Running);
        assert_eq!(round.score(), 0);
        assert_eq!(round.cause(), None);
        assert_eq!(round.direction(), Some(Direction::Up));
    }

    #[test]
    fn test_mark_over_keeps_first_cause() {
        let mut round = round();
        round.mark_over(CollisionType::Wall);
        round.mark_over(CollisionType::SelfCollision);
        assert!(round.is_over());
        assert_eq!(round.cause(), Some(CollisionType::Wall));
    }

    #[test]
    fn test_game_over_notice_is_one_shot() {
        let mut round = round();
        assert!(!round.take_game_over_notice());

        round.mark_over(CollisionType::Wall);
        assert!(round.take_game_over_notice());
        assert!(!round.take_game_over_notice());
        assert!(!round.take_game_over_notice());
    }

    #[test]
    fn test_grid_follows_resize() {
        let mut round = round();
        assert_eq!(round.grid().cols, 10);

        round.resize(FieldSize::new(125, 250));
        assert_eq!(round.grid().cols, 5);
        assert_eq!(round.snapshot().grid.cols, 5);
    }

    #[test]
    fn test_snapshot_contents() {
        let mut round = round();
        round.snake_mut().grow();
        let snapshot = round.snapshot();

        assert_eq!(snapshot.head, Position::new(5, 5));
        assert_eq!(snapshot.tail.len(), 3);
        assert_eq!(snapshot.apples, vec![Position::new(1, 1)]);
        assert_eq!(snapshot.score, 1);
        assert!(snapshot.is_snake_at(Position::new(5, 7)));
        assert!(snapshot.is_apple_at(Position::new(1, 1)));
        assert!(!snapshot.is_over);
    }
}
