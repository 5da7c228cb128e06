use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    food::{PlacementError, place_food},
    grid::Grid,
    state::{Cell, CollisionType, GameState, GameStatus, Snake},
};

/// Notifications for the UI produced by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    GameOver {
        final_score: u32,
        cause: CollisionType,
    },
    /// The snake filled the grid
    Won { final_score: u32 },
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Cell of the food eaten this step
    pub eaten_at: Option<Cell>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

impl StepInfo {
    pub fn ate_food(&self) -> bool {
        self.eaten_at.is_some()
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over after this step
    pub terminated: bool,
    pub info: StepInfo,
    pub events: Vec<GameEvent>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a reproducible food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Random source shared with cosmetic effects
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Fresh game on `grid`: snake at the start cell heading right, score 0.
    ///
    /// On a grid without cells the game starts with no food and the first
    /// step is a wall collision.
    pub fn reset(&mut self, grid: Grid) -> GameState {
        let snake = Snake::new(
            self.config.start,
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(snake, None, grid);
        match place_food(&state.snake, &grid, &mut self.rng) {
            Ok(food) => state.food = Some(food),
            Err(PlacementError::EmptyGrid) => {
                debug!("reset on a grid without cells");
            }
            Err(PlacementError::NoFreeCell { .. }) => state.status = GameStatus::Won,
        }
        state
    }

    /// Execute one tick of the game.
    ///
    /// A terminal state is left untouched.
    pub fn step(&mut self, state: &mut GameState, pending: Option<Direction>) -> StepResult {
        if state.status.is_terminal() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
                events: Vec::new(),
            };
        }

        state.snake.direction = state.snake.direction.resolve(pending);

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = state.food == Some(new_head);

        if let Some(collision_type) = self.check_collision(state, new_head, ate_food) {
            state.status = GameStatus::GameOver(collision_type);
            state.steps += 1;
            info!(
                score = state.score,
                cause = ?collision_type,
                length = state.snake.len(),
                "game over"
            );

            return StepResult {
                terminated: true,
                info: StepInfo {
                    eaten_at: None,
                    collision_type: Some(collision_type),
                },
                events: vec![GameEvent::GameOver {
                    final_score: state.score,
                    cause: collision_type,
                }],
            };
        }

        state.snake.move_snake(ate_food);
        state.steps += 1;

        let mut events = Vec::new();
        if ate_food {
            state.score += self.config.food_reward;
            debug!(score = state.score, length = state.snake.len(), "ate food");
            events.push(GameEvent::ScoreChanged(state.score));

            match place_food(&state.snake, &state.grid, &mut self.rng) {
                Ok(food) => state.food = Some(food),
                Err(e) => {
                    info!(score = state.score, "board cleared: {}", e);
                    state.food = None;
                    state.status = GameStatus::Won;
                    events.push(GameEvent::Won {
                        final_score: state.score,
                    });
                }
            }
        }

        StepResult {
            terminated: state.status.is_terminal(),
            info: StepInfo {
                eaten_at: ate_food.then_some(new_head),
                collision_type: None,
            },
            events,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        cell: Cell,
        growing: bool,
    ) -> Option<CollisionType> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_on_move(cell, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
