use tracing::{debug, info, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, GameEvent},
    grid::Grid,
    state::GameState,
};
use crate::effects::{Particle, ParticleSystem};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub particles: &'a [Particle],
}

/// Owns one game session and sequences each tick.
///
/// Input and resize notifications only record what the next tick should
/// use; all state changes happen inside [`GameController::tick`] and
/// [`GameController::restart`].
pub struct GameController {
    engine: GameEngine,
    state: GameState,
    particles: ParticleSystem,
    pending_direction: Option<Direction>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self::from_engine(GameEngine::new(config))
    }

    /// Controller whose food and particles are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_engine(GameEngine::with_seed(config, seed))
    }

    fn from_engine(mut engine: GameEngine) -> Self {
        let grid = engine.config().grid();
        let particles = ParticleSystem::new(engine.config().particles.clone());
        let state = engine.reset(grid);

        Self {
            engine,
            state,
            particles,
            pending_direction: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            state: &self.state,
            particles: self.particles.particles(),
        }
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn is_running(&self) -> bool {
        self.state.is_alive()
    }

    /// Record the direction for the next tick.
    ///
    /// A reversal of the current heading, or any input once the game has
    /// ended, is ignored. Returns whether the request was kept.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() || self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Recompute grid extents for a resized surface.
    ///
    /// Snake and food keep their cells; only later bounds checks and food
    /// placement see the new extents.
    pub fn notify_resize(&mut self, width: u32, height: u32) {
        let grid = Grid::from_surface(width, height, self.config().cell_size);
        if grid != self.state.grid {
            debug!(cols = grid.cols(), rows = grid.rows(), "grid resized");
            self.state.grid = grid;
        }
    }

    /// Start a fresh game on the current grid
    pub fn restart(&mut self) {
        self.state = self.engine.reset(self.state.grid);
        self.pending_direction = None;
        info!(
            cols = self.state.grid.cols(),
            rows = self.state.grid.rows(),
            "game restarted"
        );
    }

    /// Run one tick: snake step, then particle update.
    ///
    /// Does nothing once the game has ended.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let pending = self.pending_direction.take();
        let result = self.engine.step(&mut self.state, pending);

        if let Some(cell) = result.info.eaten_at {
            self.particles
                .spawn_burst(cell, &self.state.grid, self.engine.rng_mut());
        }
        self.particles.advance();

        trace!(
            step = self.state.steps,
            head = ?self.state.snake.head(),
            particles = self.particles.len(),
            "tick"
        );

        result.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, CollisionType, GameStatus};

    fn controller() -> GameController {
        GameController::with_seed(GameConfig::new(20, 20), 3)
    }

    #[test]
    fn test_initial_state() {
        let controller = controller();
        let state = controller.state();

        assert!(controller.is_running());
        assert_eq!(state.snake.body, vec![Cell::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(controller.particles().is_empty());
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut controller = controller();

        assert!(!controller.set_pending_direction(Direction::Left));
        assert_eq!(controller.pending_direction(), None);

        controller.tick();
        assert_eq!(controller.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_latest_valid_input_wins() {
        let mut controller = controller();

        assert!(controller.set_pending_direction(Direction::Up));
        assert!(controller.set_pending_direction(Direction::Down));
        assert!(!controller.set_pending_direction(Direction::Left));
        controller.tick();

        assert_eq!(controller.state().snake.head(), Cell::new(10, 11));
        assert_eq!(controller.pending_direction(), None);
    }

    #[test]
    fn test_eating_spawns_burst() {
        let mut controller = controller();
        controller.state.food = Some(Cell::new(11, 10));

        let events = controller.tick();

        assert_eq!(events, vec![GameEvent::ScoreChanged(10)]);
        assert_eq!(controller.particles().len(), 10);
        // Spawned and advanced in the same tick
        assert!(controller.particles().iter().all(|p| p.alpha < 1.0));
    }

    #[test]
    fn test_game_over_stops_ticks() {
        let mut controller = controller();
        controller.state.snake.body = vec![Cell::new(19, 10)];

        let events = controller.tick();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                final_score: 0,
                cause: CollisionType::Wall
            }]
        );
        assert!(!controller.is_running());

        let frozen = controller.state().clone();
        assert!(controller.tick().is_empty());
        assert!(!controller.set_pending_direction(Direction::Up));
        assert_eq!(controller.state(), &frozen);
    }

    #[test]
    fn test_restart_resets_game() {
        let mut controller = controller();
        controller.state.score = 40;
        controller.state.status = GameStatus::GameOver(CollisionType::SelfCollision);
        controller.pending_direction = Some(Direction::Up);

        controller.restart();

        let state = controller.state();
        assert!(controller.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Cell::new(10, 10)]);
        assert_eq!(controller.pending_direction(), None);
    }

    #[test]
    fn test_resize_changes_bounds_only() {
        let mut controller = controller();
        let snake_before = controller.state().snake.clone();

        controller.notify_resize(240, 230);

        let state = controller.state();
        assert_eq!(state.grid.cols(), 12);
        assert_eq!(state.grid.rows(), 11);
        assert_eq!(state.snake, snake_before);

        // Head at (10,10) moves right to (11,10), still inside 12 columns
        controller.tick();
        assert!(controller.is_running());
        controller.tick();
        assert_eq!(
            controller.state().status,
            GameStatus::GameOver(CollisionType::Wall)
        );
    }

    #[test]
    fn test_restart_keeps_resized_grid() {
        let mut controller = controller();
        controller.notify_resize(600, 300);
        controller.restart();

        assert_eq!(controller.state().grid, Grid::with_cells(30, 15, 20));
    }

    #[test]
    fn test_restart_after_shrinking_to_nothing() {
        let mut controller = controller();
        controller.notify_resize(10, 10);
        controller.restart();

        let state = controller.state();
        assert_eq!(state.grid.area(), 0);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.food, None);

        assert_eq!(
            controller.tick(),
            vec![GameEvent::GameOver {
                final_score: 0,
                cause: CollisionType::Wall
            }]
        );
    }
}
