use rand::Rng;
use rand::seq::IteratorRandom;
use thiserror::Error;
use tracing::{debug, warn};

use super::grid::Grid;
use super::state::{Cell, Snake};

/// Random draws tried before falling back to scanning for free cells
pub const MAX_RANDOM_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("no free cell left on a {cols}x{rows} grid")]
    NoFreeCell { cols: u32, rows: u32 },
}

/// Pick a uniformly random grid cell not covered by the snake.
///
/// Draws random cells up to [`MAX_RANDOM_ATTEMPTS`] times, then picks
/// uniformly among the remaining free cells. Fails only when every cell is
/// covered, or when the grid has no cells at all.
pub fn place_food<R: Rng>(
    snake: &Snake,
    grid: &Grid,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    if grid.area() == 0 {
        return Err(PlacementError::EmptyGrid);
    }

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let x = rng.gen_range(0..grid.cols()) as i32;
        let y = rng.gen_range(0..grid.rows()) as i32;
        let cell = Cell::new(x, y);

        if !snake.contains(cell) {
            debug!(x, y, "placed food");
            return Ok(cell);
        }
    }

    warn!(
        snake_len = snake.len(),
        area = grid.area(),
        "random food placement exhausted, scanning for free cells"
    );
    let cell = grid
        .cells()
        .filter(|cell| !snake.contains(*cell))
        .choose(rng)
        .ok_or(PlacementError::NoFreeCell {
            cols: grid.cols(),
            rows: grid.rows(),
        })?;
    debug!(x = cell.x, y = cell.y, "placed food");
    Ok(cell)
}
