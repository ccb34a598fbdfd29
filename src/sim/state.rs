//! Game state and core simulation types
//!
//! Everything the engine mutates lives here: grid, wave record, lives, score,
//! RNG and the pending presentation events.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::config::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board shown, waiting for start
    Idle,
    /// Ships spawning and descending
    WaveActive,
    /// Wave cleared; next wave starts after a pause
    WaveComplete,
    /// Out of lives. Only a reset leaves this phase.
    GameOver,
}

/// Per-wave bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// 1-based wave number this record belongs to
    pub number: u32,
    pub ships_in_wave: u32,
    pub ships_spawned: u32,
    pub destroyed_ships: u32,
    pub escaped_ships: u32,
    pub heart_placed: bool,
    /// Board movements since the wave started
    pub movement_count: u32,
    pub active: bool,
}

impl Wave {
    pub fn new(number: u32, ships_in_wave: u32) -> Self {
        Self {
            number,
            ships_in_wave,
            active: true,
            ..Default::default()
        }
    }

    pub fn all_spawned(&self) -> bool {
        self.ships_spawned >= self.ships_in_wave
    }

    pub fn ships_to_spawn(&self) -> u32 {
        self.ships_in_wave.saturating_sub(self.ships_spawned)
    }

    /// Ships not yet destroyed (the HUD counter)
    pub fn ships_remaining(&self) -> u32 {
        self.ships_in_wave.saturating_sub(self.destroyed_ships)
    }
}

/// Transient notifications for the presentation layer. Rows are visible-space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Unmarked ship left through the bottom row
    ShipEscaped { row: usize, col: usize },
    /// Marked ship reached the bottom row and was neutralized
    ShipCleared { row: usize, col: usize },
    /// Marked empty cell reached the bottom row
    IncorrectMark { row: usize, col: usize },
    /// Player revealed a ship directly
    ShipHit { row: usize, col: usize },
    CellsRevealed { row: usize, col: usize, count: usize },
    HeartCollected { row: usize, col: usize },
    LifeLost { lives: u8 },
    WaveStarted { wave: u32, ships: u32 },
    WaveCompleted { wave: u32, bonus: u64 },
    GameOver { score: u64, wave: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: Grid,
    pub wave: Wave,
    /// Current wave number (1-based; advanced on completion)
    pub wave_number: u32,
    pub lives: u8,
    pub score: u64,
    pub phase: GamePhase,
    /// Scroll period for the current wave
    pub current_speed_ms: u32,
    /// Events not yet drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(config: &Config, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid: Grid::new(config.rows, config.hidden_buffer_rows, config.cols),
            wave: Wave::default(),
            wave_number: 1,
            lives: config.starting_lives,
            score: 0,
            phase: GamePhase::Idle,
            current_speed_ms: config.wave_base_speed_ms,
            events: Vec::new(),
        }
    }

    /// True between start and game over
    pub fn game_started(&self) -> bool {
        matches!(self.phase, GamePhase::WaveActive | GamePhase::WaveComplete)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take one life and run the terminal check. Returns true if this call
    /// ended the game.
    pub fn lose_life(&mut self) -> bool {
        if self.is_game_over() || self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.push_event(GameEvent::LifeLost { lives: self.lives });
        if self.lives == 0 {
            self.enter_game_over();
            return true;
        }
        false
    }

    /// Restore one life, capped at the starting count
    pub fn gain_life(&mut self, config: &Config) {
        if self.lives < config.starting_lives {
            self.lives += 1;
        }
    }

    fn enter_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.wave.active = false;
        self.grid.reveal_ships();
        log::info!(
            "Game over on wave {} with score {}",
            self.wave_number,
            self.score
        );
        self.push_event(GameEvent::GameOver {
            score: self.score,
            wave: self.wave_number,
        });
    }
}
