//! Cell matrix with a hidden approach buffer
//!
//! Rows `[0, hidden_rows)` are never drawn; ships appear there and scroll down
//! into the visible area. All coordinates in this module are buffer-space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected grid access
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
}

/// A single grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_ship: bool,
    pub is_revealed: bool,
    pub is_marked: bool,
    /// Ship neighbours (always 0 on ship cells)
    pub adjacent_ships: u8,
    pub has_heart: bool,
}

impl Cell {
    /// Fresh unrevealed empty cell, as scrolled in at the top
    pub const HIDDEN: Cell = Cell {
        is_ship: false,
        is_revealed: false,
        is_marked: false,
        adjacent_ships: 0,
        has_heart: false,
    };
}

/// Partial update for [`Grid::set`]; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPatch {
    pub is_ship: Option<bool>,
    pub is_revealed: Option<bool>,
    pub is_marked: Option<bool>,
    pub has_heart: Option<bool>,
}

impl CellPatch {
    fn apply(&self, cell: &mut Cell) {
        if let Some(v) = self.is_ship {
            cell.is_ship = v;
        }
        if let Some(v) = self.is_revealed {
            cell.is_revealed = v;
        }
        if let Some(v) = self.is_marked {
            cell.is_marked = v;
        }
        if let Some(v) = self.has_heart {
            cell.has_heart = v;
        }
    }
}

/// Grid of `(visible_rows + hidden_rows) × cols` cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    visible_rows: usize,
    hidden_rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(visible_rows: usize, hidden_rows: usize, cols: usize) -> Self {
        let mut grid = Self {
            visible_rows,
            hidden_rows,
            cols,
            cells: vec![Cell::default(); (visible_rows + hidden_rows) * cols],
        };
        grid.initialize();
        grid
    }

    /// Reset every cell: buffer rows hidden, visible rows revealed, no ships
    pub fn initialize(&mut self) {
        for row in 0..self.total_rows() {
            let revealed = !self.is_hidden_row(row);
            for cell in self.row_mut(row) {
                *cell = Cell {
                    is_revealed: revealed,
                    ..Cell::HIDDEN
                };
            }
        }
    }

    /// Wave reset: strip ships, marks and hearts but keep the grid allocated
    pub fn clear_for_wave(&mut self) {
        self.initialize();
    }

    pub fn total_rows(&self) -> usize {
        self.visible_rows + self.hidden_rows
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index of the lowest visible row
    pub fn bottom_row(&self) -> usize {
        self.total_rows() - 1
    }

    pub fn is_hidden_row(&self, row: usize) -> bool {
        row < self.hidden_rows
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.total_rows() && col < self.cols
    }

    /// Translate a visible-space row to buffer space
    pub fn visible_to_buffer(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.visible_rows || col >= self.cols {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(row + self.hidden_rows)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.in_bounds(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::OutOfBounds { row, col })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell, GridError> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GridError> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    /// Apply a partial update to one cell
    pub fn set(&mut self, row: usize, col: usize, patch: CellPatch) -> Result<(), GridError> {
        patch.apply(self.get_mut(row, col)?);
        Ok(())
    }

    /// Cells of one row. Panics on an out-of-range row; callers iterate
    /// `0..total_rows()`.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let cols = self.cols;
        &mut self.cells[row * cols..(row + 1) * cols]
    }

    /// Shift every row down by one and refill row 0 with hidden empty cells.
    /// The previous bottom row is discarded.
    pub fn scroll_down(&mut self) {
        // Descending order so each source row is read before it is overwritten
        let cols = self.cols;
        for row in (1..self.total_rows()).rev() {
            let (above, below) = self.cells.split_at_mut(row * cols);
            below[..cols].copy_from_slice(&above[(row - 1) * cols..]);
        }
        self.row_mut(0).fill(Cell::HIDDEN);
    }

    /// Edge-clamped 8-neighbourhood of a cell (excluding the cell itself)
    pub fn neighbours(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + use<> {
        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.total_rows().saturating_sub(1));
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.cols.saturating_sub(1));
        (row_lo..=row_hi)
            .flat_map(move |r| (col_lo..=col_hi).map(move |c| (r, c)))
            .filter(move |&(r, c)| r != row || c != col)
    }

    pub fn has_ships(&self) -> bool {
        self.cells.iter().any(|c| c.is_ship)
    }

    pub fn ship_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_ship).count()
    }

    /// Uncover every remaining ship (end of game)
    pub fn reveal_ships(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_ship) {
            cell.is_revealed = true;
        }
    }

    /// Iterate `(row, col, cell)` over the whole grid
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_reveals_only_visible_rows() {
        let grid = Grid::new(9, 6, 9);
        assert_eq!(grid.total_rows(), 15);
        for (row, _, cell) in grid.iter() {
            assert_eq!(cell.is_revealed, row >= 6);
            assert!(!cell.is_ship && !cell.is_marked && !cell.has_heart);
            assert_eq!(cell.adjacent_ships, 0);
        }
    }

    #[test]
    fn test_bounds_checked_access() {
        let mut grid = Grid::new(3, 2, 4);
        assert!(grid.get(4, 3).is_ok());
        assert_eq!(
            grid.get(5, 0),
            Err(GridError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(
            grid.set(0, 4, CellPatch::default()),
            Err(GridError::OutOfBounds { row: 0, col: 4 })
        );
        assert_eq!(grid.visible_to_buffer(0, 0), Ok(2));
        assert!(grid.visible_to_buffer(3, 0).is_err());
    }

    #[test]
    fn test_set_applies_only_given_fields() {
        let mut grid = Grid::new(3, 2, 3);
        grid.set(
            1,
            1,
            CellPatch {
                is_ship: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        let cell = grid.get(1, 1).unwrap();
        assert!(cell.is_ship);
        assert!(!cell.is_revealed);
    }

    #[test]
    fn test_scroll_down_shifts_rows_and_clears_top() {
        let mut grid = Grid::new(3, 2, 3);
        grid.get_mut(0, 0).unwrap().is_ship = true;
        grid.get_mut(2, 1).unwrap().is_marked = true;
        grid.get_mut(4, 2).unwrap().has_heart = true;
        let before = grid.clone();

        grid.scroll_down();

        for row in 1..grid.total_rows() {
            assert_eq!(grid.row(row), before.row(row - 1));
        }
        assert!(grid.row(0).iter().all(|c| *c == Cell::HIDDEN));
        // Bottom row content is gone
        assert!(!grid.iter().any(|(_, _, c)| c.has_heart));
    }

    #[test]
    fn test_neighbours_clamped_at_corners() {
        let grid = Grid::new(3, 1, 3);
        assert_eq!(grid.neighbours(0, 0).count(), 3);
        assert_eq!(grid.neighbours(0, 1).count(), 5);
        assert_eq!(grid.neighbours(1, 1).count(), 8);
        assert_eq!(grid.neighbours(3, 2).count(), 3);
    }

    #[test]
    fn test_reveal_ships() {
        let mut grid = Grid::new(3, 2, 3);
        grid.get_mut(0, 1).unwrap().is_ship = true;
        grid.reveal_ships();
        assert!(grid.get(0, 1).unwrap().is_revealed);
        assert!(!grid.get(0, 0).unwrap().is_revealed);
    }
}
