//! Read-only view of the game for the presentation layer

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::state::{GamePhase, GameState};

/// What the front end may draw for one visible cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellView {
    /// Still covered; ships underneath stay secret
    Cloud { marked: bool, heart: bool },
    /// Open sky showing its proximity number
    Open { adjacent: u8, heart: bool },
    /// Ship uncovered at game over
    Ship,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        match (cell.is_revealed, cell.is_ship) {
            (true, true) => CellView::Ship,
            (true, false) => CellView::Open {
                adjacent: cell.adjacent_ships,
                heart: cell.has_heart,
            },
            (false, _) => CellView::Cloud {
                marked: cell.is_marked,
                heart: cell.has_heart,
            },
        }
    }
}

/// Frame data: visible cells plus HUD values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Visible rows, top to bottom
    pub cells: Vec<Vec<CellView>>,
    pub lives: u8,
    pub score: u64,
    pub wave: u32,
    pub phase: GamePhase,
    pub ships_remaining: u32,
    pub ships_escaped: u32,
    pub speed_ms: u32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let grid = &state.grid;
        let cells = (grid.hidden_rows()..grid.total_rows())
            .map(|row| grid.row(row).iter().map(CellView::from).collect())
            .collect();
        Self {
            cells,
            lives: state.lives,
            score: state.score,
            wave: state.wave_number,
            phase: state.phase,
            ships_remaining: state.wave.ships_remaining(),
            ships_escaped: state.wave.escaped_ships,
            speed_ms: state.current_speed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_snapshot_hides_buffer_and_ships() {
        let config = Config::default();
        let mut state = GameState::new(&config, 0);
        state.grid.get_mut(0, 0).unwrap().is_ship = true;
        let ship_row = config.hidden_buffer_rows + 2;
        let cell = state.grid.get_mut(ship_row, 1).unwrap();
        cell.is_ship = true;
        cell.is_revealed = false;
        cell.is_marked = true;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.cells.len(), config.rows);
        assert_eq!(snap.cells[0].len(), config.cols);
        assert_eq!(
            snap.cells[2][1],
            CellView::Cloud {
                marked: true,
                heart: false
            }
        );
        assert_eq!(
            snap.cells[0][0],
            CellView::Open {
                adjacent: 0,
                heart: false
            }
        );

        state.grid.reveal_ships();
        assert_eq!(Snapshot::capture(&state).cells[2][1], CellView::Ship);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let config = Config::default();
        let state = GameState::new(&config, 0);
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["lives"], 3);
        assert_eq!(json["cells"][0][0]["kind"], "open");
    }
}
