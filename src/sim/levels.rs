//! Shooter difficulty table
//!
//! Read-only lookup from level number to block size, speed, health, spawn
//! cadence and the spawn patterns the level may pick from.

use super::patterns::SpawnPattern;

/// Settings for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// 1-based level number
    pub level: u32,
    /// Score needed to reach this level
    pub min_score: u64,
    /// Block edge length in pixels
    pub block_size: f32,
    /// Base fall speed in pixels per reference frame
    pub speed: f32,
    /// Hits needed to destroy a block
    pub health: u8,
    /// Minimum time between spawns
    pub spawn_interval_ms: f64,
    pub min_spawn: u32,
    pub max_spawn: u32,
    pub patterns: &'static [SpawnPattern],
}

pub const LEVELS: [LevelConfig; 5] = [
    LevelConfig {
        level: 1,
        min_score: 0,
        block_size: 80.0,
        speed: 1.0,
        health: 1,
        spawn_interval_ms: 3500.0,
        min_spawn: 1,
        max_spawn: 1,
        patterns: &[SpawnPattern::Single],
    },
    LevelConfig {
        level: 2,
        min_score: 50,
        block_size: 90.0,
        speed: 1.2,
        health: 2,
        spawn_interval_ms: 4000.0,
        min_spawn: 1,
        max_spawn: 1,
        patterns: &[SpawnPattern::Single, SpawnPattern::Double],
    },
    LevelConfig {
        level: 3,
        min_score: 150,
        block_size: 100.0,
        speed: 1.4,
        health: 2,
        spawn_interval_ms: 4500.0,
        min_spawn: 1,
        max_spawn: 2,
        patterns: &[SpawnPattern::Double, SpawnPattern::Line],
    },
    LevelConfig {
        level: 4,
        min_score: 300,
        block_size: 110.0,
        speed: 1.6,
        health: 3,
        spawn_interval_ms: 5000.0,
        min_spawn: 1,
        max_spawn: 2,
        patterns: &[SpawnPattern::Line, SpawnPattern::Triangle],
    },
    LevelConfig {
        level: 5,
        min_score: 500,
        block_size: 120.0,
        speed: 1.8,
        health: 3,
        spawn_interval_ms: 5500.0,
        min_spawn: 1,
        max_spawn: 2,
        patterns: &[SpawnPattern::Triangle, SpawnPattern::Wave],
    },
];

/// Highest level whose score threshold has been reached
pub fn level_for_score(score: u64) -> u32 {
    LEVELS
        .iter()
        .filter(|cfg| score >= cfg.min_score)
        .map(|cfg| cfg.level)
        .max()
        .unwrap_or(1)
}

/// Look up a level, clamping out-of-range numbers to the table
pub fn level_config(level: u32) -> &'static LevelConfig {
    let idx = (level.max(1) as usize - 1).min(LEVELS.len() - 1);
    &LEVELS[idx]
}

pub fn max_level() -> u32 {
    LEVELS.len() as u32
}
