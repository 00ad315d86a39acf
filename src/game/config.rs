use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::action::Direction;
use super::grid::FieldSize;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Field units per grid cell
    pub cell_size: u32,
    /// Field size used until a front end reports its own
    pub field: FieldSize,
    /// Number of apples kept live at all times
    pub apple_count: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Head cell of a fresh round
    pub initial_head: Position,
    /// Direction latched at the start of a round
    pub initial_direction: Direction,
    /// Milliseconds between movement ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between frames (rendering and apple checks)
    pub frame_interval_ms: u64,
    /// Seed for apple placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 25,
            field: FieldSize::new(800, 600),
            apple_count: 5,
            initial_snake_length: 3,
            initial_head: Position::new(10, 15),
            initial_direction: Direction::Up,
            tick_interval_ms: 100,
            frame_interval_ms: 16,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            field: FieldSize::new(width, height),
            ..Default::default()
        }
    }

    /// A 10x10 grid with the head near the middle, for tests
    pub fn small() -> Self {
        Self {
            field: FieldSize::new(250, 250),
            initial_head: Position::new(5, 5),
            seed: Some(7),
            ..Default::default()
        }
    }

    /// Load a JSON config file; missing keys fall back to the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            bail!("cell_size must be greater than zero");
        }
        if self.apple_count == 0 {
            bail!("apple_count must be greater than zero");
        }
        if self.initial_snake_length == 0 {
            bail!("initial_snake_length must be at least 1");
        }
        if self.tick_interval_ms == 0 || self.frame_interval_ms == 0 {
            bail!("tick and frame intervals must be greater than zero");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
