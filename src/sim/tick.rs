//! Board movement and wave progression
//!
//! One call to [`scroll_tick`] is one board movement. The engine calls it from
//! its scroll timer and re-arms timers based on the returned outcome.

use rand::Rng;

use super::adjacency::recompute_adjacency;
use super::placement::{HEART_CHANCE, HEART_MIN_MOVEMENTS, place_heart, seed_wave, spawn_ship};
use super::state::{GameEvent, GamePhase, GameState, Wave};
use crate::config::Config;
use crate::consts::WAVE_BONUS_PER_WAVE;

/// What a movement did to the wave state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (idle or game over)
    Skipped,
    /// Board moved, wave still running (or still pausing)
    Moved,
    /// Board moved and the last ship of the wave is gone
    WaveCompleted,
    /// A life loss at the bottom row ended the game during this movement
    GameOver,
}

/// Start the current wave: clear the board, set the quota and seed ships
pub fn generate_wave(state: &mut GameState, config: &Config) {
    let number = state.wave_number;
    state.grid.clear_for_wave();
    state.wave = Wave::new(number, config.ships_for_wave(number));
    state.phase = GamePhase::WaveActive;

    let seeded = seed_wave(&mut state.grid, &mut state.wave, &mut state.rng);
    place_heart(
        &mut state.grid,
        &mut state.wave,
        state.lives,
        config,
        &mut state.rng,
    );
    recompute_adjacency(&mut state.grid);

    log::info!(
        "Wave {}: {} ships, {} seeded, {} ms per movement",
        number,
        state.wave.ships_in_wave,
        seeded,
        state.current_speed_ms
    );
    state.push_event(GameEvent::WaveStarted {
        wave: number,
        ships: state.wave.ships_in_wave,
    });
}

/// Advance the board by one row.
///
/// A game over during bottom-row resolution still finishes the movement: the
/// board scrolls and a cleared wave is still completed and scored. Only the
/// spawn and heart steps are skipped.
pub fn scroll_tick(state: &mut GameState, config: &Config) -> TickOutcome {
    if !state.game_started() {
        return TickOutcome::Skipped;
    }

    let was_active = state.wave.active;
    resolve_bottom_row(state);
    let game_over = state.is_game_over();

    state.grid.scroll_down();

    state.wave.movement_count += 1;
    if !game_over
        && state.wave.active
        && !state.wave.all_spawned()
        && state.wave.movement_count % config.ship_spawn_interval == 0
    {
        spawn_ship(&mut state.grid, &mut state.wave, config, &mut state.rng);
    }

    if !game_over
        && state.wave.active
        && !state.wave.heart_placed
        && state.lives < config.starting_lives
        && state.wave.movement_count > HEART_MIN_MOVEMENTS
        && state.rng.random::<f64>() < HEART_CHANCE
    {
        place_heart(
            &mut state.grid,
            &mut state.wave,
            state.lives,
            config,
            &mut state.rng,
        );
    }

    recompute_adjacency(&mut state.grid);

    let cleared = was_active && state.wave.all_spawned() && !state.grid.has_ships();
    if cleared {
        complete_wave(state, config);
    }

    if game_over {
        TickOutcome::GameOver
    } else if cleared {
        TickOutcome::WaveCompleted
    } else {
        TickOutcome::Moved
    }
}

/// Settle every cell of the bottom visible row before it scrolls off
fn resolve_bottom_row(state: &mut GameState) {
    let bottom = state.grid.bottom_row();
    let visible_row = state.grid.visible_rows().saturating_sub(1);

    for col in 0..state.grid.cols() {
        let cell = state.grid.row(bottom)[col];

        match (cell.is_ship, cell.is_marked) {
            (true, false) => {
                state.wave.destroyed_ships += 1;
                state.wave.escaped_ships += 1;
                state.push_event(GameEvent::ShipEscaped {
                    row: visible_row,
                    col,
                });
                state.lose_life();
            }
            (true, true) => {
                state.wave.destroyed_ships += 1;
                state.push_event(GameEvent::ShipCleared {
                    row: visible_row,
                    col,
                });
            }
            (false, true) => {
                state.push_event(GameEvent::IncorrectMark {
                    row: visible_row,
                    col,
                });
                state.lose_life();
            }
            (false, false) => {}
        }

        // An uncollected heart just leaves with the row
        state.grid.row_mut(bottom)[col].has_heart = false;
    }
}

fn complete_wave(state: &mut GameState, config: &Config) {
    let finished = state.wave_number;
    state.wave.active = false;
    state.wave_number += 1;
    let bonus = state.wave_number as u64 * WAVE_BONUS_PER_WAVE;
    state.score += bonus;
    state.current_speed_ms = config.speed_for_wave(state.wave_number);
    if !state.is_game_over() {
        state.phase = GamePhase::WaveComplete;
    }

    log::info!(
        "Wave {} complete: {} destroyed, {} escaped, bonus {}",
        finished,
        state.wave.destroyed_ships,
        state.wave.escaped_ships,
        bonus
    );
    state.push_event(GameEvent::WaveCompleted {
        wave: finished,
        bonus,
    });
}
