use super::state::{CollisionType, Position};

/// One-shot notifications emitted by the simulation for side-effect adapters
/// (sound, logging). They carry no authority over the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One apple was consumed at `position`
    AppleEaten { position: Position },
    /// The round ended; emitted once per transition to over
    GameOver {
        score: usize,
        cause: Option<CollisionType>,
    },
}
