use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::effects::Particle;
use crate::game::{Cell, CollisionType, GameState, GameStatus, GameView};
use crate::metrics::GameMetrics;

/// Terminal columns used to draw one grid cell
const CELL_WIDTH: u16 = 2;

const SNAKE_HEAD: Color = Color::Rgb(0, 255, 136);
const SNAKE_BODY: Color = Color::Rgb(0, 255, 68);
const FOOD: Color = Color::Rgb(255, 85, 85);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    fn split(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    /// Surface size in pixels that fills the game panel of a terminal of
    /// size `area`, for `cell_size` pixels per cell
    pub fn grid_surface(area: Rect, cell_size: u32) -> (u32, u32) {
        let game_area = Self::split(area)[1];
        let inner = Block::default().borders(Borders::ALL).inner(game_area);
        let cols = (inner.width / CELL_WIDTH) as u32;
        let rows = inner.height as u32;
        (cols.saturating_mul(cell_size), rows.saturating_mul(cell_size))
    }

    pub fn render(&self, frame: &mut Frame, view: GameView<'_>, metrics: &GameMetrics) {
        let [header, game_area, footer] = Self::split(frame.area());
        let state = view.state;

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, header);

        match state.status {
            GameStatus::Running => {
                let grid = self.render_grid(state, view.particles);
                frame.render_widget(grid, game_area);
            }
            GameStatus::GameOver(cause) => {
                let game_over = self.render_game_over(state, cause);
                frame.render_widget(game_over, game_area);
            }
            GameStatus::Won => {
                let won = self.render_won(state);
                frame.render_widget(won, game_area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, footer);
    }

    fn render_grid(&self, state: &GameState, particles: &[Particle]) -> Paragraph<'_> {
        let sparks = brightest_particles(state, particles);
        let head = state.snake.head();
        let mut lines = Vec::new();

        for y in 0..state.grid.rows() as i32 {
            let mut spans = Vec::new();

            for x in 0..state.grid.cols() as i32 {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(SNAKE_HEAD)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(cell) {
                    Span::styled("■ ", Style::default().fg(SNAKE_BODY))
                } else if state.food == Some(cell) {
                    Span::styled(
                        "● ",
                        Style::default().fg(FOOD).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(particle) = sparks.get(&cell) {
                    let (r, g, b) = particle.faded_rgb();
                    Span::styled(
                        spark_glyph(particle.radius),
                        Style::default().fg(Color::Rgb(r, g, b)),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Neon Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Grid: ", label),
            Span::styled(
                format!("{}x{}", state.grid.cols(), state.grid.rows()),
                value,
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, cause: CollisionType) -> Paragraph<'_> {
        let reason = match cause {
            CollisionType::Wall => "You hit the wall",
            CollisionType::SelfCollision => "You bit your own tail",
        };
        end_screen("GAME OVER", Color::Red, reason, state.score)
    }

    fn render_won(&self, state: &GameState) -> Paragraph<'_> {
        end_screen("BOARD CLEARED", Color::Green, "No room left for food", state.score)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn end_screen(title: &str, color: Color, reason: &str, score: u32) -> Paragraph<'static> {
    let text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]),
        Line::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]),
    ];

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
}

/// Most opaque particle per grid cell
fn brightest_particles<'a>(
    state: &GameState,
    particles: &'a [Particle],
) -> HashMap<Cell, &'a Particle> {
    let mut sparks: HashMap<Cell, &Particle> = HashMap::new();
    for particle in particles {
        let cell = state.grid.cell_at(particle.x, particle.y);
        if !state.grid.in_bounds(cell) {
            continue;
        }
        sparks
            .entry(cell)
            .and_modify(|current| {
                if particle.alpha > current.alpha {
                    *current = particle;
                }
            })
            .or_insert(particle);
    }
    sparks
}

fn spark_glyph(radius: f32) -> &'static str {
    if radius < 2.0 {
        "· "
    } else if radius < 3.0 {
        "• "
    } else {
        "* "
    }
}
