use super::{
    action::DirectionLatch,
    config::GameConfig,
    events::GameEvent,
    grid::{FieldSize, Grid},
    round::Round,
    state::{AppleSet, CollisionType, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Result of a movement tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the head moved this tick
    pub moved: bool,
    /// Whether the round is over after this tick
    pub terminated: bool,
    /// Collision detected by this tick, if any
    pub collision_type: Option<CollisionType>,
}

/// Result of a frame evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameResult {
    /// Events for side-effect adapters, in emission order
    pub events: Vec<GameEvent>,
}

impl FrameResult {
    pub fn apples_eaten(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, GameEvent::AppleEaten { .. }))
            .count()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh round in the canonical layout on a field of the given size
    pub fn reset(&mut self, field: FieldSize) -> Round {
        let snake = Snake::new(self.config.initial_head, self.config.initial_snake_length);

        let grid = Grid::from_field(field, self.config.cell_size);
        let apples = (0..self.config.apple_count)
            .map(|_| self.spawn_apple(&grid))
            .collect();

        Round::new(
            snake,
            AppleSet::new(apples),
            field,
            self.config.cell_size,
            DirectionLatch::seeded(self.config.initial_direction),
        )
    }

    /// Advance the snake one cell in the latched direction
    pub fn tick(&self, round: &mut Round) -> TickResult {
        if round.is_over() {
            return TickResult {
                moved: false,
                terminated: true,
                collision_type: None,
            };
        }

        // Nothing latched yet: the snake waits in place
        let Some(direction) = round.direction() else {
            return TickResult {
                moved: false,
                terminated: false,
                collision_type: None,
            };
        };

        let grid = round.grid();
        round.snake_mut().advance(direction);
        round.record_tick();

        let collision_type = self.check_collision(round, &grid);
        if let Some(collision) = collision_type {
            round.mark_over(collision);
        }

        TickResult {
            moved: true,
            terminated: round.is_over(),
            collision_type,
        }
    }

    /// Evaluate apple consumption and the game-over notice for one frame
    pub fn frame(&mut self, round: &mut Round) -> FrameResult {
        let mut events = Vec::new();

        if !round.is_over() {
            let head = round.snake().head();
            let eaten = round.apples_mut().take_at(head);

            if eaten > 0 {
                let grid = round.grid();
                for _ in 0..eaten {
                    round.snake_mut().grow();
                    let apple = self.spawn_apple(&grid);
                    round.apples_mut().push(apple);
                    events.push(GameEvent::AppleEaten { position: head });
                }
            }
        }

        if round.take_game_over_notice() {
            events.push(GameEvent::GameOver {
                score: round.score(),
                cause: round.cause(),
            });
        }

        FrameResult { events }
    }

    /// Check the head against the grid and then against the tail
    fn check_collision(&self, round: &Round, grid: &Grid) -> Option<CollisionType> {
        let head = round.snake().head();

        if !grid.contains(head) {
            return Some(CollisionType::Wall);
        }

        if round.snake().collides_with_tail(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell. Occupied cells are not excluded, and an
    /// empty axis collapses to 0.
    pub fn spawn_apple(&mut self, grid: &Grid) -> Position {
        let x = if grid.cols > 0 {
            self.rng.gen_range(0..grid.cols)
        } else {
            0
        };
        let y = if grid.rows > 0 {
            self.rng.gen_range(0..grid.rows)
        } else {
            0
        };
        Position::new(x, y)
    }
}
