//! Deterministic gameplay module
//!
//! All game logic lives here. This module must stay pure:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bounce;
pub mod collision;
pub mod levels;
pub mod patterns;
pub mod state;
pub mod tick;

pub use bounce::{BounceState, canvas_to_ndc};
pub use collision::{Rect, point_in_circle};
pub use levels::{LEVELS, LevelConfig, level_config, level_for_score};
pub use patterns::SpawnPattern;
pub use state::{Block, GameEvent, Player, Projectile, ShooterPhase, ShooterState};
pub use tick::{TickInput, tick};
