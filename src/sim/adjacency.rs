//! Ship proximity counts
//!
//! Whole-grid recompute; the grid is small enough that incremental updates
//! are not worth the bookkeeping.

use super::grid::Grid;

/// Recount ship neighbours for every non-ship cell. Ship cells are forced to 0.
pub fn recompute_adjacency(grid: &mut Grid) {
    for row in 0..grid.total_rows() {
        for col in 0..grid.cols() {
            let count = if grid.row(row)[col].is_ship {
                0
            } else {
                grid.neighbours(row, col)
                    .filter(|&(r, c)| grid.row(r)[c].is_ship)
                    .count() as u8
            };
            grid.row_mut(row)[col].adjacent_ships = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(grid: &mut Grid, ships: &[(usize, usize)]) {
        for &(r, c) in ships {
            grid.get_mut(r, c).unwrap().is_ship = true;
        }
    }

    #[test]
    fn test_counts_at_corners_and_edges() {
        let mut grid = Grid::new(3, 1, 4);
        // Ships in opposite corners and one on the left edge
        place(&mut grid, &[(0, 0), (3, 3), (2, 0)]);
        recompute_adjacency(&mut grid);

        let count = |r, c| grid.get(r, c).unwrap().adjacent_ships;
        assert_eq!(count(0, 0), 0);
        assert_eq!(count(0, 1), 1);
        assert_eq!(count(1, 0), 2);
        assert_eq!(count(1, 1), 2);
        assert_eq!(count(3, 0), 1);
        assert_eq!(count(3, 2), 1);
        assert_eq!(count(2, 2), 1);
        assert_eq!(count(0, 3), 0);
    }

    #[test]
    fn test_ship_cells_forced_to_zero() {
        let mut grid = Grid::new(3, 0, 3);
        grid.get_mut(1, 1).unwrap().adjacent_ships = 7;
        place(&mut grid, &[(0, 0), (0, 1), (1, 1)]);
        recompute_adjacency(&mut grid);
        assert_eq!(grid.get(1, 1).unwrap().adjacent_ships, 0);
        assert_eq!(grid.get(1, 0).unwrap().adjacent_ships, 3);
    }

    #[test]
    fn test_fully_surrounded_cell_counts_eight() {
        let mut grid = Grid::new(3, 0, 3);
        for r in 0..3 {
            for c in 0..3 {
                if (r, c) != (1, 1) {
                    place(&mut grid, &[(r, c)]);
                }
            }
        }
        recompute_adjacency(&mut grid);
        assert_eq!(grid.get(1, 1).unwrap().adjacent_ships, 8);
    }
}
