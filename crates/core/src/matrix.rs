//! Matrix module - the cell grid and the pure operations over it
//!
//! The grid is `height` rows of `width` cells stored in one flat row-major
//! vector. Coordinates are `(x, y)` with x growing to the right and y growing
//! downward; row 0 is the top of the hidden buffer.
//!
//! The free functions here never mutate their inputs. [`intersects`] is the one
//! collision test behind movement, rotation, hard drop and the ghost row;
//! [`merge`] and [`clear_full_rows`] each return a fresh grid.

use crate::config::MIN_WIDTH;
use crate::error::ConfigError;
use crate::pieces::{occupied_cells, Shape};
use crate::scoring::line_clear_bonus;
use crate::types::{Cell, EMPTY};

/// The persistent matrix of locked cells
///
/// `Clone` is a deep copy: the cell vector is owned, so a cloned grid never
/// aliases the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width < MIN_WIDTH || height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: 1,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        })
    }

    /// Build a grid from rows, rejecting empty input and ragged rows
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            grid.row_mut(y).copy_from_slice(row);
        }
        Ok(grid)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell; returns false outside the grid
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Inside the grid and nonzero
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Every column of row `y` is nonzero. Out-of-range rows are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|&c| c != EMPTY)
    }

    /// Any column of row `y` is nonzero
    pub fn is_row_occupied(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().any(|&c| c != EMPTY)
    }

    /// Borrow row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy out as nested rows, for renderers that want `Vec<Vec<_>>`
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }

    /// Set every cell to empty; dimensions are unchanged
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

/// Outcome of [`clear_full_rows`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    pub lines_removed: u32,
    /// The grid after removed rows collapsed and empty rows filled the top
    pub grid: Grid,
    /// `50 × lines_removed²`
    pub score_bonus: u32,
    /// Indices of the removed rows in the input grid, top to bottom
    pub cleared_rows: Vec<usize>,
}

/// True if any nonzero cell of `shape`, placed with its origin at `(x, y)`,
/// falls outside the grid or onto an occupied cell.
pub fn intersects(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    occupied_cells(shape).any(|(col, row)| grid.get(x + col, y + row) != Some(EMPTY))
}

/// Return a copy of `grid` with the nonzero cells of `shape` written at `(x, y)`.
///
/// Zero shape cells never overwrite grid content. Cells that land outside the
/// grid are dropped.
pub fn merge(grid: &Grid, shape: &Shape, x: i32, y: i32) -> Grid {
    let mut merged = grid.clone();
    for (col, row) in occupied_cells(shape) {
        merged.set(x + col, y + row, shape[row as usize][col as usize]);
    }
    merged
}

/// Remove every full row and let the rows above fall.
///
/// Surviving rows keep their relative order and settle at the bottom; one empty
/// row is inserted at the top for each removed row.
pub fn clear_full_rows(grid: &Grid) -> ClearResult {
    let mut cleared_rows = Vec::new();
    let mut kept = Vec::with_capacity(grid.cells.len());

    for (y, row) in grid.rows().enumerate() {
        if row.iter().all(|&c| c != EMPTY) {
            cleared_rows.push(y);
        } else {
            kept.extend_from_slice(row);
        }
    }

    let mut cells = vec![EMPTY; cleared_rows.len() * grid.width];
    cells.extend_from_slice(&kept);

    let lines_removed = cleared_rows.len() as u32;
    ClearResult {
        lines_removed,
        grid: Grid {
            width: grid.width,
            height: grid.height,
            cells,
        },
        score_bonus: line_clear_bonus(lines_removed),
        cleared_rows,
    }
}
