//! Single owner of the simulation
//!
//! Every mutation goes through `&mut Engine`, so input handlers and timer
//! callbacks are serialized by construction. Time is injected: the host calls
//! [`Engine::advance`] with elapsed milliseconds and the engine fires whatever
//! timers came due, in order, on its own virtual clock.

use super::actions::{self, ActionOutcome};
use super::grid::GridError;
use super::snapshot::Snapshot;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickOutcome, generate_wave, scroll_tick};
use crate::config::{Config, ConfigError};

/// Recurring board movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    period_ms: u64,
    next_due_ms: u64,
}

/// Armed timers. Replaced wholesale on reconfiguration, never edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Timers {
    scroll: Option<Interval>,
    /// One-shot start of the next wave
    wave_start_ms: Option<u64>,
}

impl Timers {
    fn cancel_all(&mut self) {
        self.scroll = None;
        self.wave_start_ms = None;
    }

    fn arm_scroll(&mut self, now_ms: u64, period_ms: u32) {
        let period_ms = u64::from(period_ms.max(1));
        self.scroll = Some(Interval {
            period_ms,
            next_due_ms: now_ms + period_ms,
        });
    }

    /// Earliest pending deadline
    fn next_due(&self) -> Option<u64> {
        let scroll = self.scroll.map(|s| s.next_due_ms);
        match (scroll, self.wave_start_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// The simulation controller
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    state: GameState,
    timers: Timers,
    clock_ms: u64,
}

impl Engine {
    /// Build an idle engine. Rejects configs the simulation cannot run on.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, seed);
        Ok(Self {
            config,
            state,
            timers: Timers::default(),
            clock_ms: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Stage positions in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Virtual time in milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Begin wave 1 and start the scroll timer. No-op unless idle.
    pub fn start_game(&mut self) {
        if self.state.phase != GamePhase::Idle {
            return;
        }
        self.state.current_speed_ms = self.config.wave_base_speed_ms;
        generate_wave(&mut self.state, &self.config);
        self.timers
            .arm_scroll(self.clock_ms, self.state.current_speed_ms);
        log::info!("Game started (seed {})", self.state.seed);
    }

    /// Back to an idle board with full lives, keeping the RNG stream going.
    /// Cancels every pending timer.
    pub fn reset_game(&mut self) {
        self.timers.cancel_all();
        let rng = self.state.rng.clone();
        let seed = self.state.seed;
        self.state = GameState::new(&self.config, seed);
        self.state.rng = rng;
        log::info!("Game reset");
    }

    /// Reset and reseed
    pub fn restart(&mut self, seed: u64) {
        self.timers.cancel_all();
        self.state = GameState::new(&self.config, seed);
    }

    pub fn reveal(&mut self, row: usize, col: usize) -> Result<ActionOutcome, GridError> {
        let outcome = actions::reveal_at(&mut self.state, &self.config, row, col)?;
        self.settle();
        Ok(outcome)
    }

    pub fn toggle_mark(&mut self, row: usize, col: usize) -> Result<ActionOutcome, GridError> {
        actions::toggle_mark(&mut self.state, &self.config, row, col)
    }

    /// Move the virtual clock forward, firing due timers in chronological order
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.clock_ms + elapsed_ms;

        while let Some(due) = self.timers.next_due().filter(|&due| due <= target) {
            self.clock_ms = due;
            // Wave start wins a tie so the new wave exists before the movement
            if self.timers.wave_start_ms == Some(due) {
                self.timers.wave_start_ms = None;
                self.on_wave_start();
            } else if let Some(mut scroll) = self.timers.scroll {
                scroll.next_due_ms += scroll.period_ms;
                self.timers.scroll = Some(scroll);
                self.on_scroll();
            }
        }

        self.clock_ms = target;
    }

    /// Milliseconds until the next timer fires, if any is armed
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers
            .next_due()
            .map(|due| due.saturating_sub(self.clock_ms))
    }

    /// Scroll period currently armed
    pub fn scroll_period_ms(&self) -> Option<u64> {
        self.timers.scroll.map(|s| s.period_ms)
    }

    pub fn wave_start_pending(&self) -> bool {
        self.timers.wave_start_ms.is_some()
    }

    /// Run one movement immediately, outside the timer schedule
    pub fn step(&mut self) -> TickOutcome {
        self.on_scroll()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    fn on_scroll(&mut self) -> TickOutcome {
        let outcome = scroll_tick(&mut self.state, &self.config);
        match outcome {
            TickOutcome::WaveCompleted => {
                // New period means a new interval, not an edited one
                self.timers
                    .arm_scroll(self.clock_ms, self.state.current_speed_ms);
                self.timers.wave_start_ms =
                    Some(self.clock_ms + u64::from(self.config.wave_pause_ms));
                log::debug!(
                    "Scroll re-armed at {} ms, next wave in {} ms",
                    self.state.current_speed_ms,
                    self.config.wave_pause_ms
                );
            }
            TickOutcome::GameOver => self.timers.cancel_all(),
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }
        outcome
    }

    fn on_wave_start(&mut self) {
        if self.state.phase == GamePhase::WaveComplete {
            generate_wave(&mut self.state, &self.config);
        }
    }

    /// Stop the clock work once an action ended the game
    fn settle(&mut self) {
        if self.state.is_game_over() {
            self.timers.cancel_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(Config::default(), 1234).unwrap()
    }

    #[test]
    fn test_start_arms_scroll() {
        let mut engine = engine();
        assert_eq!(engine.next_deadline_ms(), None);
        engine.start_game();
        assert_eq!(engine.phase(), GamePhase::WaveActive);
        assert_eq!(engine.scroll_period_ms(), Some(4000));
        assert_eq!(engine.next_deadline_ms(), Some(4000));

        // Second start is ignored
        engine.start_game();
        assert_eq!(engine.state().wave.movement_count, 0);
    }

    #[test]
    fn test_advance_fires_each_due_movement() {
        let mut engine = engine();
        engine.start_game();
        engine.advance(3999);
        assert_eq!(engine.state().wave.movement_count, 0);
        engine.advance(1);
        assert_eq!(engine.state().wave.movement_count, 1);
        engine.advance(8000);
        assert_eq!(engine.state().wave.movement_count, 3);
        assert_eq!(engine.clock_ms(), 12000);
    }

    #[test]
    fn test_reset_cancels_timers() {
        let mut engine = engine();
        engine.start_game();
        engine.advance(4000);
        engine.reset_game();
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.next_deadline_ms(), None);
        assert_eq!(engine.state().lives, 3);
        assert!(!engine.state().grid.has_ships());

        engine.advance(60_000);
        assert_eq!(engine.state().wave.movement_count, 0);
    }

    #[test]
    fn test_wave_completion_rearms_and_schedules_next_wave() {
        let mut engine = engine();
        engine.start_game();
        {
            let state = engine.state_mut();
            state.grid.clear_for_wave();
            state.wave.ships_spawned = state.wave.ships_in_wave;
        }
        engine.advance(4000);
        assert_eq!(engine.phase(), GamePhase::WaveComplete);
        assert_eq!(engine.scroll_period_ms(), Some(3900));
        assert!(engine.wave_start_pending());
        assert_eq!(engine.next_deadline_ms(), Some(3900));

        engine.advance(5000);
        assert_eq!(engine.phase(), GamePhase::WaveActive);
        assert_eq!(engine.state().wave.number, 2);
        assert_eq!(engine.state().wave.ships_in_wave, 20);
        assert!(!engine.wave_start_pending());
        // The pause movement belonged to the finished wave
        assert_eq!(engine.state().wave.movement_count, 0);
    }

    #[test]
    fn test_game_over_from_action_cancels_timers() {
        let mut engine = engine();
        engine.start_game();
        engine.state_mut().lives = 1;
        let hidden = engine.config().hidden_buffer_rows;
        {
            let cell = engine.state_mut().grid.get_mut(hidden, 0).unwrap();
            cell.is_ship = true;
            cell.is_revealed = false;
        }
        assert_eq!(engine.reveal(0, 0), Ok(ActionOutcome::ShipHit));
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.next_deadline_ms(), None);

        // Frozen: input ignored, time does nothing
        assert_eq!(engine.reveal(1, 1), Ok(ActionOutcome::Ignored));
        engine.advance(100_000);
        assert_eq!(engine.state().wave.movement_count, 0);
    }

    #[test]
    fn test_drain_events() {
        let mut engine = engine();
        engine.start_game();
        let events = engine.drain_events();
        assert!(matches!(events[0], GameEvent::WaveStarted { wave: 1, .. }));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let no_buffer = Config {
            hidden_buffer_rows: 0,
            ..Config::default()
        };
        assert!(matches!(
            Engine::new(no_buffer, 1),
            Err(ConfigError::NoBufferRows)
        ));
        let no_cols = Config {
            cols: 0,
            ..Config::default()
        };
        assert!(matches!(
            Engine::new(no_cols, 1),
            Err(ConfigError::EmptyGrid { rows: 9, cols: 0 })
        ));
        let no_rows = Config {
            rows: 0,
            ..Config::default()
        };
        assert!(Engine::new(no_rows, 1).is_err());
    }

    #[test]
    fn test_marked_and_unmarked_ships_at_bottom() {
        let mut engine = engine();
        engine.start_game();
        {
            let state = engine.state_mut();
            state.grid.clear_for_wave();
            state.wave.ships_spawned = state.wave.ships_in_wave;
            let bottom = state.grid.bottom_row();
            state.grid.get_mut(bottom, 0).unwrap().is_ship = true;
            state.grid.get_mut(bottom, 4).unwrap().is_ship = true;
            // Keeps the wave alive after this movement
            state.grid.get_mut(0, 8).unwrap().is_ship = true;
        }
        engine.toggle_mark(8, 4).unwrap();
        engine.drain_events();

        assert_eq!(engine.step(), TickOutcome::Moved);

        let state = engine.state();
        assert_eq!(state.wave.destroyed_ships, 2);
        assert_eq!(state.wave.escaped_ships, 1);
        assert_eq!(state.lives, 2);
        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::ShipEscaped { row: 8, col: 0 }));
        assert!(events.contains(&GameEvent::ShipCleared { row: 8, col: 4 }));
        assert!(events.contains(&GameEvent::LifeLost { lives: 2 }));
    }

    #[test]
    fn test_last_escape_scrolls_scores_and_stops_timers() {
        let mut engine = engine();
        engine.start_game();
        {
            let state = engine.state_mut();
            state.grid.clear_for_wave();
            state.wave.ships_spawned = state.wave.ships_in_wave;
            state.lives = 1;
            let bottom = state.grid.bottom_row();
            state.grid.get_mut(bottom, 3).unwrap().is_ship = true;
        }

        assert_eq!(engine.step(), TickOutcome::GameOver);

        let state = engine.state();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.grid.has_ships());
        assert_eq!(state.wave_number, 2);
        assert_eq!(state.score, 20);
        assert_eq!(engine.next_deadline_ms(), None);
        assert!(!engine.wave_start_pending());
    }
}
