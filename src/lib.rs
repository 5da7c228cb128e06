//! Neon Snake - a grid Snake game for the terminal
//!
//! This library provides:
//! - Core game logic: grid, snake state machine, food placement (game module)
//! - Cosmetic particle bursts fired when food is eaten (effects module)
//! - TUI rendering and keyboard input (render and input modules)
//! - The interactive session and its tick scheduler (modes module)

pub mod effects;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
