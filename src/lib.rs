//! Sky Sweeper - a scrolling Minesweeper / invaders hybrid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, placement, waves, player actions)
//! - `config`: Load-time game parameters
//! - `web`: Browser facade for the canvas/DOM front end (wasm32 only)

pub mod config;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{Config, ConfigError};
pub use sim::{Engine, GameEvent, GamePhase, Snapshot};

/// Game configuration defaults
pub mod consts {
    /// Visible play area
    pub const ROWS: usize = 9;
    pub const COLS: usize = 9;
    /// Hidden rows above the visible board where ships first appear
    pub const HIDDEN_BUFFER_ROWS: usize = 6;

    pub const STARTING_LIVES: u8 = 3;

    /// Milliseconds per board movement on wave 1
    pub const WAVE_BASE_SPEED_MS: u32 = 4000;
    /// Movement period reduction per wave
    pub const WAVE_SPEED_INCREASE_MS: u32 = 100;
    /// Fastest allowed movement period
    pub const MIN_SPEED_MS: u32 = 500;
    /// Pause between a cleared wave and the next one
    pub const WAVE_PAUSE_MS: u32 = 5000;

    pub const WAVE_BASE_SHIPS: u32 = 15;
    pub const WAVE_INCREASE_SHIPS: u32 = 5;
    /// Spawn a ship every N movements
    pub const SHIP_SPAWN_INTERVAL: u32 = 1;
    /// Rows a wave's ships are spread across before force placement
    pub const MAX_SHIP_SPAWN_ROWS: u32 = 5;
    /// Hard cap on the row distribution limit
    pub const MAX_ROW_DISTRIBUTION: u32 = 7;

    /// Scoring
    pub const HEART_SCORE: u64 = 10;
    pub const REVEAL_SCORE: u64 = 1;
    pub const MARK_SCORE: u64 = 5;
    pub const WAVE_BONUS_PER_WAVE: u64 = 10;
}
