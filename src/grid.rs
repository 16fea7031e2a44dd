//! Toroidal landscape grid.
//!
//! Discretizes a continuous scalar field into an R x C matrix of cells and
//! owns the torus-wrap addressing scheme. Row 0 is the TOP of the matrix
//! (maximum y); row `rows-1` is the bottom (minimum y). This inversion lets
//! "row index increases downward" coexist with "y increases upward" in the
//! display frame.

use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// One landscape cell with its value and coordinate labels in every frame.
///
/// Immutable after grid construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Matrix row, 0 at the top.
    pub row: usize,
    /// Matrix column, 0 at the left.
    pub col: usize,
    /// Field value sampled at the cell center.
    pub value: f64,
    /// Continuous real-space coordinate of the cell center.
    pub x: f64,
    pub y: f64,
    /// Display-frame integer coordinate: x right, y UP (grid_y = rows-1-row).
    pub grid_x: usize,
    pub grid_y: usize,
    /// Normalized render-box coordinate in [0,1), origin top-left.
    /// Used only by presentation code.
    pub box_x: f64,
    pub box_y: f64,
}

/// A read-only toroidal grid of cells.
///
/// Built once from a sampling function; shared freely afterwards (one grid
/// may back several agents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major, rows * cols entries.
    cells: Vec<Cell>,
    min_value: f64,
    max_value: f64,
}

/// The single torus-wrap primitive: maps any integer onto [0, size).
///
/// `rem_euclid` is non-negative even for negative input, unlike `%`.
#[inline]
fn wrap(index: i64, size: usize) -> usize {
    index.rem_euclid(size as i64) as usize
}

impl Grid {
    /// Discretize `sample` over `[x_min,x_max] x [y_min,y_max]`.
    ///
    /// Cell centers: `x = x_min + (col+0.5)*dx`, `y = y_max - (row+0.5)*dy`.
    pub fn build<F>(
        sample: F,
        rows: usize,
        cols: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, GameError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidParameter(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        if !(x_max > x_min) || !(y_max > y_min) {
            return Err(GameError::InvalidParameter(format!(
                "coordinate range must be non-empty, got \
                 [{x_min},{x_max}] x [{y_min},{y_max}]"
            )));
        }

        let dx = (x_max - x_min) / cols as f64;
        let dy = (y_max - y_min) / rows as f64;

        let mut cells = Vec::with_capacity(rows * cols);
        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;

        for row in 0..rows {
            for col in 0..cols {
                let x = x_min + (col as f64 + 0.5) * dx;
                let y = y_max - (row as f64 + 0.5) * dy;
                let value = sample(x, y);

                min_value = min_value.min(value);
                max_value = max_value.max(value);

                cells.push(Cell {
                    row,
                    col,
                    value,
                    x,
                    y,
                    grid_x: col,
                    grid_y: rows - 1 - row,
                    box_x: col as f64 / cols as f64,
                    box_y: row as f64 / rows as f64,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            cells,
            min_value,
            max_value,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True minimum over all cells (color-scale normalization).
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// True maximum over all cells.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Wrap arbitrary integer indices onto the torus.
    ///
    /// Every neighbor lookup and position normalization in the crate routes
    /// through here; the wrap logic exists exactly once.
    #[inline]
    pub fn normalize(&self, row: i64, col: i64) -> (usize, usize) {
        (wrap(row, self.rows), wrap(col, self.cols))
    }

    /// Cell lookup with torus wrapping. Total over all integer indices.
    #[inline]
    pub fn get_cell(&self, row: i64, col: i64) -> &Cell {
        let (r, c) = self.normalize(row, col);
        &self.cells[r * self.cols + c]
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
