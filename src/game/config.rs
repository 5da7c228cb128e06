use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::grid::Grid;
use super::state::Cell;
use crate::effects::ParticleConfig;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels
    pub surface_width: u32,
    /// Height of the drawing surface in pixels
    pub surface_height: u32,
    /// Side of one grid cell in pixels
    pub cell_size: u32,
    /// Cell the snake's head starts on
    pub start: Cell,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Delay between ticks in milliseconds
    pub tick_period_ms: u64,
    /// Rebuild the grid whenever the terminal is resized
    pub fit_to_terminal: bool,
    pub particles: ParticleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 400,
            surface_height: 400,
            cell_size: 20,
            start: Cell::new(10, 10),
            initial_snake_length: 1,
            food_reward: 10,
            tick_period_ms: 100,
            fit_to_terminal: true,
            particles: ParticleConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a fixed grid of `cols` x `rows` cells
    pub fn new(cols: u32, rows: u32) -> Self {
        let defaults = Self::default();
        Self {
            surface_width: cols.saturating_mul(defaults.cell_size),
            surface_height: rows.saturating_mul(defaults.cell_size),
            fit_to_terminal: false,
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            start: Cell::new(5, 5),
            ..Self::new(10, 10)
        }
    }

    /// Load a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 {
            return Err("cell_size must be at least 1".to_string());
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        if self.tick_period_ms == 0 {
            return Err("tick_period_ms must be at least 1".to_string());
        }

        self.particles.validate()
    }

    /// Grid for the configured surface
    pub fn grid(&self) -> Grid {
        Grid::from_surface(self.surface_width, self.surface_height, self.cell_size)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
