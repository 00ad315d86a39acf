//! Snake Arcade - a grid-based snake game
//!
//! This library provides:
//! - The simulation core: movement, collisions, apples, round lifecycle (game module)
//! - The play session that owns the current round (session module)
//! - Terminal front end: input mapping, rendering, sound cues (input, render, audio modules)
//! - Execution modes: interactive and headless (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
