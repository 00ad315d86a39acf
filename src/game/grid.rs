//! Field geometry
//!
//! The field is measured in continuous units (pixels for a canvas, scaled
//! terminal cells for the TUI). The simulation only ever sees the discrete
//! grid derived from it, and that grid is derived fresh on every query so a
//! resize is honoured by the very next tick.

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Continuous size of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: u32,
    pub height: u32,
}

impl FieldSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Discrete column/row view of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    /// Edge length of one square cell, for presentation scaling only
    pub square_size: f64,
}

impl Grid {
    /// Derive the grid for `field` at the given cell size.
    ///
    /// A zero cell size yields an empty grid instead of dividing by zero.
    pub fn from_field(field: FieldSize, cell_size: u32) -> Self {
        if cell_size == 0 {
            return Self {
                cols: 0,
                rows: 0,
                square_size: 0.0,
            };
        }

        let cols = (field.width / cell_size) as i32;
        let rows = (field.height / cell_size) as i32;

        let square_size = if cols == 0 || rows == 0 {
            0.0
        } else {
            (field.width as f64 / cols as f64).min(field.height as f64 / rows as f64)
        };

        Self {
            cols,
            rows,
            square_size,
        }
    }

    /// True when the grid has no valid cell at all
    pub fn is_degenerate(&self) -> bool {
        self.cols <= 0 || self.rows <= 0
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_field() {
        let grid = Grid::from_field(FieldSize::new(800, 600), 25);
        assert_eq!(grid.cols, 32);
        assert_eq!(grid.rows, 24);
        assert_eq!(grid.square_size, 25.0);
    }

    #[test]
    fn test_grid_floors_partial_cells() {
        let grid = Grid::from_field(FieldSize::new(260, 249), 25);
        assert_eq!(grid.cols, 10);
        assert_eq!(grid.rows, 9);
        // 260/10 = 26, 249/9 = 27.67, the smaller edge wins
        assert_eq!(grid.square_size, 26.0);
    }

    #[test]
    fn test_degenerate_field() {
        let grid = Grid::from_field(FieldSize::new(0, 600), 25);
        assert_eq!(grid.cols, 0);
        assert!(grid.is_degenerate());
        assert_eq!(grid.square_size, 0.0);
        assert!(!grid.contains(Position::new(0, 0)));

        let grid = Grid::from_field(FieldSize::new(800, 600), 0);
        assert!(grid.is_degenerate());
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::from_field(FieldSize::new(250, 250), 25);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(9, 9)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(10, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
        assert!(!grid.contains(Position::new(0, 10)));
    }
}
