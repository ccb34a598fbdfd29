//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only through the engine's injected clock
//! - No rendering or platform dependencies

pub mod actions;
pub mod adjacency;
pub mod autoplay;
pub mod engine;
pub mod grid;
pub mod placement;
pub mod reveal;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use actions::{ActionOutcome, reveal_at, toggle_mark};
pub use adjacency::recompute_adjacency;
pub use autoplay::{Action, choose_action};
pub use engine::Engine;
pub use grid::{Cell, CellPatch, Grid, GridError};
pub use placement::{place_heart, seed_wave, spawn_ship};
pub use reveal::flood_reveal;
pub use snapshot::{CellView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, Wave};
pub use tick::{TickOutcome, generate_wave, scroll_tick};
