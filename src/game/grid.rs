use super::state::Cell;

/// Discrete coordinate space derived from a drawing surface and a cell size.
///
/// Holds no game state; it is rebuilt from scratch whenever the surface is
/// resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cell_size: u32,
}

impl Grid {
    /// Build a grid covering a `width` x `height` surface.
    ///
    /// Partial cells at the right and bottom edges are dropped. A zero cell
    /// size yields an empty grid.
    pub fn from_surface(width: u32, height: u32, cell_size: u32) -> Self {
        let (cols, rows) = if cell_size == 0 {
            (0, 0)
        } else {
            (width / cell_size, height / cell_size)
        };
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    /// Grid with an exact number of columns and rows
    pub fn with_cells(cols: u32, rows: u32, cell_size: u32) -> Self {
        if cell_size == 0 {
            return Self::from_surface(0, 0, 0);
        }
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as i64) < self.cols as i64
            && (cell.y as i64) < self.rows as i64
    }

    /// Pixel midpoint of a cell on the surface
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let size = self.cell_size as f32;
        (
            cell.x as f32 * size + size / 2.0,
            cell.y as f32 * size + size / 2.0,
        )
    }

    /// Cell containing a surface pixel position
    pub fn cell_at(&self, x: f32, y: f32) -> Cell {
        let size = self.cell_size.max(1) as f32;
        Cell::new((x / size).floor() as i32, (y / size).floor() as i32)
    }

    /// Every cell of the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |y| (0..cols).map(move |x| Cell::new(x, y)))
    }
}
