//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or rendering dependencies.
//! Front ends drive it through ticks (movement) and frames (apple checks, notifications).

pub mod action;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod round;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, DirectionLatch};
pub use config::GameConfig;
pub use engine::{FrameResult, GameEngine, TickResult};
pub use events::GameEvent;
pub use grid::{FieldSize, Grid};
pub use round::{Round, RoundSnapshot, RoundStatus};
pub use state::{AppleSet, CollisionType, Position, Snake};
