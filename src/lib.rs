//! WebGL Demos - a gallery of small browser graphics demos on wgpu
//!
//! Core modules:
//! - `catalog`: The demo list and `?demo=` selection
//! - `sim`: Deterministic gameplay (shooter, bounce clicker, AABB hits)
//! - `scene`: Geometry, cameras and per-frame transforms
//! - `renderer`: Shared wgpu setup and the three pipelines the demos use
//! - `web`: Browser runtime (canvas, input, HUD, asset loading)

pub mod audio;
pub mod catalog;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::DemoKind;
pub use error::DemoError;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the demos were tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Fixed timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Shooter field size used when the canvas size is unknown (native runs)
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Gap between the bottom of the player and the bottom of the field
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    /// Horizontal speed in pixels per reference frame
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;

    pub const STARTING_LIVES: u8 = 3;
    pub const POINTS_PER_BLOCK: u64 = 10;

    /// Minimum gap between two waves
    pub const WAVE_DELAY_MS: f64 = 4000.0;
    /// Stagger between blocks spawned in the same wave
    pub const SPAWN_STAGGER_MS: f64 = 200.0;
    /// Hard cap on blocks added by one spawn
    pub const MAX_BLOCKS_PER_SPAWN: usize = 3;

    /// Health bar drawn above each block
    pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
    pub const HEALTH_BAR_OFFSET: f32 = 10.0;

    /// Bounce clicker (NDC units)
    pub const BOUNCE_SPEED: f32 = 0.015;
    pub const BOUNCE_LIMIT: f32 = 0.95;
    pub const BOUNCE_HIT_RADIUS: f32 = 0.1;
    /// Ball drawn as a 40 px sprite
    pub const BOUNCE_BALL_RADIUS_PX: f32 = 20.0;
}
