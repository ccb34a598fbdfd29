//! Player input: reveal and mark
//!
//! Coordinates arrive in visible space. Moves the rules forbid are ignored
//! rather than reported; only out-of-range coordinates are errors.

use super::adjacency::recompute_adjacency;
use super::grid::GridError;
use super::reveal::flood_reveal;
use super::state::{GameEvent, GameState};
use crate::config::Config;

/// Effect of a player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Rules did not allow the action; nothing changed
    Ignored,
    HeartCollected,
    /// Player uncovered a ship and lost a life
    ShipHit,
    /// Empty terrain opened; number of cells revealed
    Revealed(usize),
    Marked,
    Unmarked,
}

/// Reveal a visible cell
pub fn reveal_at(
    state: &mut GameState,
    config: &Config,
    row: usize,
    col: usize,
) -> Result<ActionOutcome, GridError> {
    let buffer_row = state.grid.visible_to_buffer(row, col)?;
    if !state.game_started() {
        return Ok(ActionOutcome::Ignored);
    }

    let cell = *state.grid.get(buffer_row, col)?;
    if cell.is_marked {
        return Ok(ActionOutcome::Ignored);
    }

    if cell.has_heart {
        state.grid.get_mut(buffer_row, col)?.has_heart = false;
        state.gain_life(config);
        state.score += config.heart_score;
        state.push_event(GameEvent::HeartCollected { row, col });
        return Ok(ActionOutcome::HeartCollected);
    }

    if cell.is_revealed {
        return Ok(ActionOutcome::Ignored);
    }

    if cell.is_ship {
        let target = state.grid.get_mut(buffer_row, col)?;
        target.is_ship = false;
        target.is_revealed = true;
        // Counted both ways: the ship is gone, and it got away from the player
        state.wave.destroyed_ships += 1;
        state.wave.escaped_ships += 1;
        recompute_adjacency(&mut state.grid);
        state.push_event(GameEvent::ShipHit { row, col });
        state.lose_life();
        return Ok(ActionOutcome::ShipHit);
    }

    let count = flood_reveal(&mut state.grid, buffer_row, col);
    state.score += config.reveal_score;
    state.push_event(GameEvent::CellsRevealed { row, col, count });
    Ok(ActionOutcome::Revealed(count))
}

/// Flip the mark on an unrevealed visible cell
pub fn toggle_mark(
    state: &mut GameState,
    config: &Config,
    row: usize,
    col: usize,
) -> Result<ActionOutcome, GridError> {
    let buffer_row = state.grid.visible_to_buffer(row, col)?;
    if !state.game_started() {
        return Ok(ActionOutcome::Ignored);
    }

    let cell = state.grid.get_mut(buffer_row, col)?;
    if cell.is_revealed {
        return Ok(ActionOutcome::Ignored);
    }

    cell.is_marked = !cell.is_marked;
    if !cell.is_marked {
        return Ok(ActionOutcome::Unmarked);
    }
    if cell.is_ship {
        state.score += config.mark_score;
    }
    Ok(ActionOutcome::Marked)
}
