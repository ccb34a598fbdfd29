//! Sky Sweeper entry point
//!
//! The browser build is driven from JavaScript through `skysweeper::web`.
//! Natively this runs a headless demo game played by the autoplay bot.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::process::ExitCode;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use skysweeper::sim::{Action, Engine, GameEvent, GamePhase, choose_action};
    use skysweeper::Config;

    /// Bot moves between two board movements
    const ACTIONS_PER_MOVEMENT: usize = 2;
    /// Chance per move that the bot clicks a random cloud
    const BLUNDER_CHANCE: f64 = 0.03;
    const MAX_WAVES: u32 = 5;
    /// Safety stop for runs that never end (one simulated hour)
    const MAX_CLOCK_MS: u64 = 60 * 60 * 1000;

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0x5eed_u64);
        let config = match args.next() {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        };
        let engine = config.and_then(|config| Engine::new(config, seed));
        let mut engine = match engine {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        log::info!("Sky Sweeper (native demo) starting with seed {}", seed);
        let mut bot_rng = Pcg32::seed_from_u64(seed ^ 0xb07);
        engine.start_game();

        while engine.phase() != GamePhase::GameOver
            && engine.state().wave_number <= MAX_WAVES
            && engine.clock_ms() < MAX_CLOCK_MS
        {
            for _ in 0..ACTIONS_PER_MOVEMENT {
                let Some(action) = choose_action(engine.state(), BLUNDER_CHANCE, &mut bot_rng)
                else {
                    break;
                };
                let result = match action {
                    Action::Reveal { row, col } => engine.reveal(row, col),
                    Action::Mark { row, col } => engine.toggle_mark(row, col),
                };
                if let Err(e) = result {
                    log::warn!("Bot produced a bad move: {}", e);
                }
            }

            for event in engine.drain_events() {
                match event {
                    GameEvent::CellsRevealed { .. } => log::trace!("{:?}", event),
                    _ => log::debug!("{:?}", event),
                }
            }

            match engine.next_deadline_ms() {
                Some(ms) => engine.advance(ms),
                None => break,
            }
        }

        let state = engine.state();
        println!(
            "Final score: {}  wave: {}  lives: {}  time: {}s",
            state.score,
            state.wave_number,
            state.lives,
            engine.clock_ms() / 1000
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `skysweeper::web::WebGame`, this is just to satisfy the compiler
}
