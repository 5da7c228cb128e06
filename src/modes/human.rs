use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use tracing::{debug, info};

use super::scheduler::TickScheduler;
use crate::game::{GameController, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive play in the terminal
pub struct HumanMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn with_controller(controller: GameController) -> Self {
        Self {
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut scheduler = TickScheduler::new(self.controller.config().tick_period());

        if self.controller.config().fit_to_terminal {
            let (cols, rows) = crossterm::terminal::size().context("Failed to read terminal size")?;
            self.fit_to_terminal(cols, rows);
            self.controller.restart();
        }
        self.start_game(&mut scheduler);
        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut scheduler);
                        self.draw(terminal)?;
                    }
                }

                _ = scheduler.tick() => {
                    self.update_game(&mut scheduler);
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games_played = self.metrics.games_played,
            best_score = self.metrics.best_score,
            "session ended"
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, self.controller.view(), &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event, scheduler: &mut TickScheduler) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        self.controller.set_pending_direction(direction);
                    }
                    KeyAction::Restart => self.restart_game(scheduler),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Resize(cols, rows) => {
                if self.controller.config().fit_to_terminal {
                    self.fit_to_terminal(cols, rows);
                }
            }
            _ => {}
        }
    }

    fn fit_to_terminal(&mut self, cols: u16, rows: u16) {
        let cell_size = self.controller.config().cell_size;
        let (width, height) = Renderer::grid_surface(Rect::new(0, 0, cols, rows), cell_size);
        debug!(cols, rows, width, height, "terminal resized");
        self.controller.notify_resize(width, height);
    }

    fn update_game(&mut self, scheduler: &mut TickScheduler) {
        for event in self.controller.tick() {
            match event {
                GameEvent::ScoreChanged(score) => {
                    debug!(score, "score changed");
                }
                GameEvent::GameOver { final_score, .. } | GameEvent::Won { final_score } => {
                    scheduler.stop();
                    self.metrics.on_game_over(final_score);
                }
            }
        }
    }

    fn start_game(&mut self, scheduler: &mut TickScheduler) {
        self.metrics.on_game_start();
        if self.controller.is_running() {
            scheduler.start();
        } else {
            // Board already full at reset
            scheduler.stop();
            self.metrics.on_game_over(self.controller.state().score);
        }
    }

    fn restart_game(&mut self, scheduler: &mut TickScheduler) {
        scheduler.stop();
        self.controller.restart();
        self.start_game(scheduler);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
