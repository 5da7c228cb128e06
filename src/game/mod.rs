//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller owns one game and is driven tick by tick by whatever scheduler
//! and front end sit on top of it.

pub mod config;
pub mod controller;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use controller::{GameController, GameView};
pub use direction::Direction;
pub use engine::{GameEngine, GameEvent, StepInfo, StepResult};
pub use food::{place_food, PlacementError};
pub use grid::Grid;
pub use state::{Cell, CollisionType, GameState, GameStatus, Snake};
