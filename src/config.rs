//! Game parameters
//!
//! Fixed at engine construction. Only the scroll speed changes at runtime, and
//! that is derived per wave from these values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one visible row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("at least one hidden buffer row is required for ships to spawn into")]
    NoBufferRows,
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("ship spawn interval must be at least 1")]
    ZeroSpawnInterval,
    #[error("minimum speed must be at least 1 ms")]
    ZeroMinSpeed,
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Load-time game parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visible rows
    pub rows: usize,
    pub cols: usize,
    /// Hidden rows above the visible area
    pub hidden_buffer_rows: usize,
    pub starting_lives: u8,

    // === Pacing ===
    pub wave_base_speed_ms: u32,
    pub wave_speed_increase_ms: u32,
    pub min_speed_ms: u32,
    pub wave_pause_ms: u32,

    // === Ships ===
    pub wave_base_ships: u32,
    pub wave_increase_ships: u32,
    pub ship_spawn_interval: u32,
    pub max_ship_spawn_rows: u32,

    // === Scoring ===
    pub heart_score: u64,
    pub reveal_score: u64,
    pub mark_score: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            hidden_buffer_rows: HIDDEN_BUFFER_ROWS,
            starting_lives: STARTING_LIVES,

            wave_base_speed_ms: WAVE_BASE_SPEED_MS,
            wave_speed_increase_ms: WAVE_SPEED_INCREASE_MS,
            min_speed_ms: MIN_SPEED_MS,
            wave_pause_ms: WAVE_PAUSE_MS,

            wave_base_ships: WAVE_BASE_SHIPS,
            wave_increase_ships: WAVE_INCREASE_SHIPS,
            ship_spawn_interval: SHIP_SPAWN_INTERVAL,
            max_ship_spawn_rows: MAX_SHIP_SPAWN_ROWS,

            heart_score: HEART_SCORE,
            reveal_score: REVEAL_SCORE,
            mark_score: MARK_SCORE,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.hidden_buffer_rows == 0 {
            return Err(ConfigError::NoBufferRows);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.ship_spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        Ok(())
    }

    /// Visible rows plus the hidden buffer
    pub fn total_rows(&self) -> usize {
        self.rows + self.hidden_buffer_rows
    }

    /// Ship quota for a 1-based wave number
    pub fn ships_for_wave(&self, wave: u32) -> u32 {
        self.wave_base_ships + wave.saturating_sub(1) * self.wave_increase_ships
    }

    /// Scroll period for a 1-based wave number
    pub fn speed_for_wave(&self, wave: u32) -> u32 {
        self.wave_base_speed_ms
            .saturating_sub(wave.saturating_sub(1).saturating_mul(self.wave_speed_increase_ms))
            .max(self.min_speed_ms)
    }

    /// Movements over which a wave's ships are spread before the rest is
    /// force-placed
    pub fn row_distribution_limit(&self, wave: u32) -> u32 {
        (self.max_ship_spawn_rows + wave.saturating_sub(1) / 2).min(MAX_ROW_DISTRIBUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_scaling() {
        let config = Config::default();
        assert_eq!(config.ships_for_wave(1), 15);
        assert_eq!(config.ships_for_wave(3), 25);
        assert_eq!(config.speed_for_wave(1), 4000);
        assert_eq!(config.speed_for_wave(2), 3900);
        assert_eq!(config.speed_for_wave(500), 500);
        assert_eq!(config.row_distribution_limit(1), 5);
        assert_eq!(config.row_distribution_limit(3), 6);
        assert_eq!(config.row_distribution_limit(20), 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "cols": 12, "starting_lives": 5 }"#).unwrap();
        assert_eq!(config.cols, 12);
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.rows, ROWS);
        assert_eq!(config.total_rows(), ROWS + HIDDEN_BUFFER_ROWS);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            Config::from_json(r#"{ "hidden_buffer_rows": 0 }"#),
            Err(ConfigError::NoBufferRows)
        ));
        assert!(matches!(
            Config::from_json(r#"{ "rows": 0 }"#),
            Err(ConfigError::EmptyGrid { .. })
        ));
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
