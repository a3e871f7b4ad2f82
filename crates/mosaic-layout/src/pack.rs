//! Packing simulation on a fixed-width cell grid.
//!
//! Mirrors CSS grid auto-placement closely enough to predict how tall the
//! rendered mosaic will be. The grid is `columns` cells wide and grows
//! downward as tiles are placed.

use serde::{Deserialize, Serialize};

use mosaic_types::config::PackingMode;

use crate::span::Span;

/// Zero-based top-left cell of a placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub column: u32,
    pub row: u32,
}

/// Result of packing a sequence of spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    /// One placement per input span, same order.
    pub placements: Vec<Placement>,
    /// Number of grid rows touched by any tile.
    pub rows: u32,
}

/// Row-major cell occupancy for a grid of fixed width.
#[derive(Debug, Clone)]
struct Occupancy {
    columns: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(columns: usize) -> Self {
        Self {
            columns,
            cells: Vec::new(),
        }
    }

    fn rows(&self) -> usize {
        self.cells.len() / self.columns
    }

    fn is_free(&self, row: usize, col: usize) -> bool {
        row >= self.rows() || !self.cells[row * self.columns + col]
    }

    fn fits(&self, row: usize, col: usize, w: usize, h: usize) -> bool {
        col + w <= self.columns
            && (row..row + h).all(|r| (col..col + w).all(|c| self.is_free(r, c)))
    }

    fn occupy(&mut self, row: usize, col: usize, w: usize, h: usize) {
        let needed = (row + h) * self.columns;
        if self.cells.len() < needed {
            self.cells.resize(needed, false);
        }
        for r in row..row + h {
            let base = r * self.columns;
            self.cells[base + col..base + col + w].fill(true);
        }
    }

    fn row_full(&self, row: usize) -> bool {
        row < self.rows() && (0..self.columns).all(|c| !self.is_free(row, c))
    }
}

/// Pack `spans` in order onto a grid `columns` wide.
///
/// Tile widths larger than the grid are clamped to `columns`.
pub fn pack(spans: &[Span], columns: u32, mode: PackingMode) -> Packing {
    let columns = columns.max(1) as usize;
    let mut grid = Occupancy::new(columns);
    let mut placements = Vec::with_capacity(spans.len());

    // Dense: first row that still has a free cell.
    let mut first_open = 0usize;
    // Sparse: auto-placement cursor, only ever moves forward.
    let mut cursor = (0usize, 0usize);

    for span in spans {
        let w = (span.width.max(1) as usize).min(columns);
        let h = span.height.max(1) as usize;

        let (row, col) = match mode {
            PackingMode::Dense => find_slot(&grid, first_open, 0, w, h),
            PackingMode::Sparse => find_slot(&grid, cursor.0, cursor.1, w, h),
        };

        grid.occupy(row, col, w, h);
        cursor = (row, col + w);
        while grid.row_full(first_open) {
            first_open += 1;
        }

        placements.push(Placement {
            column: col as u32,
            row: row as u32,
        });
    }

    Packing {
        placements,
        rows: grid.rows() as u32,
    }
}

/// Scan forward from (`start_row`, `start_col`) for the first slot that
/// fits a `w` x `h` tile. Rows below the current grid are always free, so
/// the scan terminates.
fn find_slot(
    grid: &Occupancy,
    start_row: usize,
    start_col: usize,
    w: usize,
    h: usize,
) -> (usize, usize) {
    let last_col = grid.columns - w;
    let mut row = start_row;
    let mut col = start_col;
    loop {
        while col <= last_col {
            if grid.fits(row, col, w, h) {
                return (row, col);
            }
            col += 1;
        }
        row += 1;
        col = 0;
    }
}
