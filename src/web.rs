//! Browser facade
//!
//! The canvas renderer and DOM HUD live in JavaScript. They own a `WebGame`,
//! forward clicks and timer ticks into it, and draw from JSON snapshots.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::sim::{ActionOutcome, Engine};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            // Someone else installed a logger first; keep using theirs
            log::warn!("console_log not installed: {}", e);
        }
    });
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game with default parameters, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsValue> {
        init_logging();
        let seed = js_sys::Date::now() as u64;
        log::info!("Sky Sweeper initialized with seed: {}", seed);
        let engine = Engine::new(Config::default(), seed).map_err(to_js_error)?;
        Ok(WebGame { engine })
    }

    /// Create a game from a (partial) JSON config
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(json: &str, seed: f64) -> Result<WebGame, JsValue> {
        init_logging();
        let config = Config::from_json(json).map_err(to_js_error)?;
        let engine = Engine::new(config, seed as u64).map_err(to_js_error)?;
        Ok(WebGame { engine })
    }

    #[wasm_bindgen(js_name = "startGame")]
    pub fn start_game(&mut self) {
        self.engine.start_game();
    }

    #[wasm_bindgen(js_name = "resetGame")]
    pub fn reset_game(&mut self) {
        self.engine.reset_game();
    }

    /// Left click. Returns true if the board changed.
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<bool, JsValue> {
        let outcome = self.engine.reveal(row, col).map_err(to_js_error)?;
        Ok(outcome != ActionOutcome::Ignored)
    }

    /// Right click. Returns true if the board changed.
    #[wasm_bindgen(js_name = "toggleMark")]
    pub fn toggle_mark(&mut self, row: usize, col: usize) -> Result<bool, JsValue> {
        let outcome = self.engine.toggle_mark(row, col).map_err(to_js_error)?;
        Ok(outcome != ActionOutcome::Ignored)
    }

    /// Feed elapsed wall time (ms) from the host's timer
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.engine.advance(elapsed_ms.max(0.0) as u64);
    }

    /// Milliseconds until the host should call `advance` again; -1 when idle
    #[wasm_bindgen(js_name = "nextDeadline")]
    pub fn next_deadline(&self) -> f64 {
        self.engine
            .next_deadline_ms()
            .map(|ms| ms as f64)
            .unwrap_or(-1.0)
    }

    /// Current frame as JSON (see `Snapshot`)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(to_js_error)
    }

    /// Pending effect notifications as a JSON array
    #[wasm_bindgen(js_name = "drainEvents")]
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.drain_events()).map_err(to_js_error)
    }
}
