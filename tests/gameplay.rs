use neon_snake::effects::{ParticleConfig, ParticleSystem};
use neon_snake::game::{
    Cell, CollisionType, Direction, GameConfig, GameController, GameEngine, GameEvent, GameState,
    GameStatus, Grid, Snake,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fixed_grid_config(cols: u32, rows: u32) -> GameConfig {
    GameConfig::new(cols, rows)
}

#[test]
fn length_grows_only_when_food_is_eaten() {
    let mut inputs = StdRng::seed_from_u64(99);

    for seed in 0..20 {
        let mut controller = GameController::with_seed(fixed_grid_config(12, 12), seed);

        for _ in 0..10_000 {
            if !controller.is_running() {
                break;
            }
            let direction = Direction::ALL[inputs.gen_range(0..4)];
            controller.set_pending_direction(direction);

            let before = controller.state().clone();
            let resolved = before.snake.direction.resolve(controller.pending_direction());
            let target = before.snake.head().moved_in_direction(resolved);
            let events = controller.tick();
            let after = controller.state();

            if !after.is_alive() && after.status != GameStatus::Won {
                assert_eq!(after.snake.body, before.snake.body);
                break;
            }

            if before.food == Some(target) {
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(after.score, before.score + 10);
                assert!(events.contains(&GameEvent::ScoreChanged(after.score)));
            } else {
                assert_eq!(after.snake.len(), before.snake.len());
                assert_eq!(after.score, before.score);
            }
        }
    }
}

#[test]
fn food_is_never_placed_on_the_snake() {
    let mut inputs = StdRng::seed_from_u64(5);
    let mut controller = GameController::with_seed(fixed_grid_config(6, 6), 17);

    for _ in 0..500 {
        if !controller.is_running() {
            controller.restart();
        }
        let state = controller.state();
        if let Some(food) = state.food {
            assert!(!state.snake.contains(food));
            assert!(state.grid.in_bounds(food));
        }

        let direction = Direction::ALL[inputs.gen_range(0..4)];
        controller.set_pending_direction(direction);
        controller.tick();
    }
}

#[test]
fn reversal_request_has_no_effect() {
    for current in Direction::ALL {
        let mut engine = GameEngine::with_seed(fixed_grid_config(20, 20), 1);
        let mut state = engine.reset(Grid::with_cells(20, 20, 20));
        state.snake = Snake::new(Cell::new(10, 10), current, 3);
        state.food = Some(Cell::new(0, 0));

        engine.step(&mut state, Some(current.opposite()));

        assert_eq!(state.snake.direction, current);
        assert_eq!(
            state.snake.head(),
            Cell::new(10, 10).moved_in_direction(current)
        );
    }
}

#[test]
fn restart_twice_matches_restart_once() {
    let mut controller = GameController::with_seed(fixed_grid_config(20, 20), 2);
    controller.set_pending_direction(Direction::Down);
    for _ in 0..5 {
        controller.tick();
    }

    controller.restart();
    let once = controller.state().clone();
    controller.restart();
    let twice = controller.state().clone();

    for state in [&once, &twice] {
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.body, vec![Cell::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
    }
    assert_eq!(once.snake, twice.snake);
    assert_eq!(once.grid, twice.grid);
}

#[test]
fn single_tick_from_start() {
    let mut controller = GameController::with_seed(fixed_grid_config(20, 20), 4);
    let food_ahead = controller.state().food == Some(Cell::new(11, 10));

    controller.tick();

    let state = controller.state();
    assert_eq!(state.snake.head(), Cell::new(11, 10));
    assert_eq!(state.snake.len(), if food_ahead { 2 } else { 1 });
}

#[test]
fn entering_the_vacated_tail_cell_is_legal() {
    let mut engine = GameEngine::with_seed(fixed_grid_config(10, 10), 6);
    let body = vec![
        Cell::new(3, 4),
        Cell::new(3, 5),
        Cell::new(4, 5),
        Cell::new(4, 4),
    ];
    let mut state = GameState::new(
        Snake {
            body,
            direction: Direction::Up,
        },
        Some(Cell::new(9, 9)),
        Grid::with_cells(10, 10, 20),
    );

    let result = engine.step(&mut state, Some(Direction::Right));

    assert!(!result.terminated);
    assert_eq!(
        state.snake.body,
        vec![
            Cell::new(4, 4),
            Cell::new(3, 4),
            Cell::new(3, 5),
            Cell::new(4, 5),
        ]
    );
}

#[test]
fn running_into_the_body_ends_the_game() {
    let mut engine = GameEngine::with_seed(fixed_grid_config(10, 10), 6);
    let mut state = GameState::new(
        Snake::new(Cell::new(5, 5), Direction::Up, 5),
        Some(Cell::new(0, 0)),
        Grid::with_cells(10, 10, 20),
    );
    // Body runs down from (5,5) to (5,9); curl right then down then left
    engine.step(&mut state, Some(Direction::Right));
    engine.step(&mut state, Some(Direction::Down));
    let result = engine.step(&mut state, Some(Direction::Left));

    assert_eq!(
        result.events,
        vec![GameEvent::GameOver {
            final_score: 0,
            cause: CollisionType::SelfCollision
        }]
    );
}

#[test]
fn filling_a_two_by_two_grid_wins() {
    let mut engine = GameEngine::with_seed(fixed_grid_config(2, 2), 10);
    let mut state = GameState::new(
        Snake {
            body: vec![Cell::new(1, 1), Cell::new(1, 0), Cell::new(0, 0)],
            direction: Direction::Down,
        },
        Some(Cell::new(0, 1)),
        Grid::with_cells(2, 2, 20),
    );

    let result = engine.step(&mut state, Some(Direction::Left));

    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(state.food, None);
    assert!(result.events.contains(&GameEvent::Won { final_score: 10 }));

    // Terminal: further steps change nothing
    let frozen = state.clone();
    engine.step(&mut state, Some(Direction::Up));
    assert_eq!(state, frozen);
}

#[test]
fn burst_fades_out_without_new_spawns() {
    let config = ParticleConfig::default();
    let grid = Grid::with_cells(20, 20, 20);
    let mut rng = StdRng::seed_from_u64(12);
    let mut system = ParticleSystem::new(config.clone());
    system.spawn_burst(Cell::new(4, 4), &grid, &mut rng);

    let mut count = system.len();
    for _ in 0..config.lifetime_ticks() {
        system.advance();
        assert!(system.len() <= count);
        count = system.len();
    }

    assert!(system.is_empty());
}

#[test]
fn game_over_reports_final_score() {
    let mut controller = GameController::with_seed(fixed_grid_config(20, 20), 21);
    controller.set_pending_direction(Direction::Up);

    let mut last_events = Vec::new();
    while controller.is_running() {
        last_events = controller.tick();
    }

    let score = controller.state().score;
    assert_eq!(
        last_events.last(),
        Some(&GameEvent::GameOver {
            final_score: score,
            cause: CollisionType::Wall
        })
    );
}
