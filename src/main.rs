//! WebGL demos entry point
//!
//! In the browser this starts the selected demo. Natively it plays one
//! headless shooter run on autopilot and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    webgl_demos::web::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use webgl_demos::consts::*;
    use webgl_demos::sim::{GameEvent, ShooterState, TickInput, tick};
    use webgl_demos::timing::FixedStep;
    use webgl_demos::Settings;

    /// Simulated wall-clock limit for the headless run
    const MAX_RUN_MS: f64 = 10.0 * 60.0 * 1000.0;
    /// Frame time of the simulated display
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("WebGL demos (native) starting...");
    log::info!("The demos render in the browser; running a headless shooter on autopilot");

    let settings = Settings::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    let field = Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT);
    let mut state = ShooterState::with_lives(seed, field, settings.starting_lives);

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut step = FixedStep::new();
    let mut elapsed_ms = 0.0;
    let mut destroyed = 0u32;

    while !state.is_over() && elapsed_ms < MAX_RUN_MS {
        for _ in 0..step.advance(FRAME_MS) {
            tick(&mut state, &input, SIM_DT_MS);
        }
        elapsed_ms += FRAME_MS;

        for event in state.drain_events() {
            match event {
                GameEvent::BlockDestroyed { .. } => destroyed += 1,
                GameEvent::LevelUp { level } => {
                    log::info!("[{:>6.1}s] level {}", elapsed_ms / 1000.0, level)
                }
                GameEvent::LifeLost { lives } => {
                    log::info!("[{:>6.1}s] life lost, {} left", elapsed_ms / 1000.0, lives)
                }
                _ => {}
            }
        }
    }

    let outcome = if state.is_over() { "game over" } else { "time limit" };
    log::info!(
        "Run ended ({}) after {:.1}s: score {}, level {}, {} blocks destroyed",
        outcome,
        elapsed_ms / 1000.0,
        state.score,
        state.level,
        destroyed
    );
}
