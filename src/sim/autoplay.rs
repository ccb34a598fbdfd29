//! Demo mode: a bot that plays using full knowledge of the board
//!
//! Drives the native headless run. It cheats by reading ship positions, but
//! only ever acts through the same inputs a player has.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::GameState;

/// One player input, in visible coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal { row: usize, col: usize },
    Mark { row: usize, col: usize },
}

/// Pick the bot's next move.
///
/// Hearts first, then the lowest unmarked ship, then a random covered safe
/// cell. With `blunder_chance` it reveals a random covered cell instead,
/// which may be a ship.
pub fn choose_action(
    state: &GameState,
    blunder_chance: f64,
    rng: &mut impl Rng,
) -> Option<Action> {
    if !state.game_started() {
        return None;
    }

    let grid = &state.grid;
    let hidden = grid.hidden_rows();
    let covered: Vec<(usize, usize)> = (hidden..grid.total_rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
        .filter(|&(row, col)| {
            let cell = grid.row(row)[col];
            !cell.is_revealed && !cell.is_marked
        })
        .collect();

    if let Some(&(row, col)) = covered.iter().find(|&&(r, c)| grid.row(r)[c].has_heart) {
        return Some(Action::Reveal {
            row: row - hidden,
            col,
        });
    }

    if blunder_chance > 0.0 && rng.random::<f64>() < blunder_chance {
        if let Some(&(row, col)) = covered.choose(rng) {
            return Some(Action::Reveal {
                row: row - hidden,
                col,
            });
        }
    }

    if let Some(&(row, col)) = covered
        .iter()
        .rev()
        .find(|&&(r, c)| grid.row(r)[c].is_ship)
    {
        return Some(Action::Mark {
            row: row - hidden,
            col,
        });
    }

    let safe: Vec<_> = covered
        .into_iter()
        .filter(|&(r, c)| !grid.row(r)[c].is_ship)
        .collect();
    safe.choose(rng).map(|&(row, col)| Action::Reveal {
        row: row - hidden,
        col,
    })
}
