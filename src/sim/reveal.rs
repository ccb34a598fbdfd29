//! Flood reveal through zero-adjacency terrain
//!
//! Classic Minesweeper expansion, driven by an explicit stack so region size
//! never touches the call stack.

use super::grid::Grid;

/// Reveal `(row, col)` and, if it has no ship neighbours, its connected
/// zero-adjacency region plus the numbered cells bordering it.
///
/// Out-of-bounds, revealed, marked and ship cells are skipped silently.
/// Returns the number of cells newly revealed.
pub fn flood_reveal(grid: &mut Grid, row: usize, col: usize) -> usize {
    let mut revealed = 0;
    let mut stack = vec![(row, col)];

    while let Some((r, c)) = stack.pop() {
        let Ok(cell) = grid.get_mut(r, c) else {
            continue;
        };
        if cell.is_revealed || cell.is_ship || cell.is_marked {
            continue;
        }
        cell.is_revealed = true;
        revealed += 1;

        if cell.adjacent_ships == 0 {
            stack.extend(grid.neighbours(r, c));
        }
    }

    revealed
}
