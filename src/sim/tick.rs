//! Shooter simulation tick
//!
//! Advances the game by one step: wave timing, movement, hits, lives.

use rand::Rng;

use super::levels::level_for_score;
use super::state::{GameEvent, ShooterPhase, ShooterState};
use crate::consts::*;

/// Ticks between autopilot shots
const AUTOPILOT_FIRE_COOLDOWN: u32 = 12;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right
    pub right: bool,
    /// One-shot: fire a projectile
    pub fire: bool,
    /// One-shot: toggle pause
    pub pause: bool,
    /// AI steers and fires
    pub autopilot: bool,
}

/// Advance the shooter by `dt_ms` milliseconds
pub fn tick(state: &mut ShooterState, input: &TickInput, dt_ms: f64) {
    if input.pause {
        match state.phase {
            ShooterPhase::Playing => {
                state.phase = ShooterPhase::Paused;
                return;
            }
            ShooterPhase::Paused => state.phase = ShooterPhase::Playing,
            ShooterPhase::GameOver => {}
        }
    }

    if state.phase != ShooterPhase::Playing {
        return;
    }

    state.clock_ms += dt_ms;
    // Speeds are tuned per 60 Hz frame
    let frames = (dt_ms / SIM_DT_MS) as f32;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    update_level(state);
    schedule_waves(state);
    release_pending_spawns(state);

    // Player movement
    if input.left {
        state.player.shift(-PLAYER_SPEED * frames, state.field.x);
    }
    if input.right {
        state.player.shift(PLAYER_SPEED * frames, state.field.x);
    }

    if input.fire {
        state.fire();
    }

    // Projectiles fly up and leave through the top
    for shot in &mut state.projectiles {
        shot.rect.pos.y -= shot.speed * frames;
    }
    state.projectiles.retain(|p| p.rect.pos.y >= 0.0);

    // Blocks fall; newest first so removals don't disturb the walk
    let mut i = state.blocks.len();
    while i > 0 {
        i -= 1;
        let speed = state.blocks[i].speed;
        state.blocks[i].rect.pos.y += speed * frames;

        if resolve_hits(state, i) {
            continue;
        }

        if state.blocks[i].rect.bottom() > state.field.y {
            state.blocks.remove(i);
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::LifeLost { lives: state.lives });

            if state.lives == 0 {
                state.phase = ShooterPhase::GameOver;
                state.pending_spawns.clear();
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    level: state.level,
                });
                log::info!("Game over: score {} at level {}", state.score, state.level);
                return;
            }
        }
    }
}

/// Test block `i` against every projectile. Returns true if the block died.
fn resolve_hits(state: &mut ShooterState, i: usize) -> bool {
    let mut j = state.projectiles.len();
    while j > 0 {
        j -= 1;
        if !state.projectiles[j].rect.overlaps(&state.blocks[i].rect) {
            continue;
        }

        state.projectiles.remove(j);
        state.events.push(GameEvent::Hit);

        let block = &mut state.blocks[i];
        block.hp = block.hp.saturating_sub(1);
        if block.hp == 0 {
            state.blocks.remove(i);
            state.score += POINTS_PER_BLOCK;
            state.events.push(GameEvent::BlockDestroyed { score: state.score });
            update_level(state);
            return true;
        }
    }
    false
}

/// Re-derive the level from the score, announcing changes
fn update_level(state: &mut ShooterState) {
    let level = level_for_score(state.score);
    if level != state.level {
        state.level = level;
        state.events.push(GameEvent::LevelUp { level });
        log::info!("Level {}", level);
    }
}

/// Start a new wave when both the wave delay and the level's spawn
/// interval have elapsed
fn schedule_waves(state: &mut ShooterState) {
    let now = state.clock_ms;
    let wave_ready = state
        .last_wave_ms
        .is_none_or(|t| now - t >= WAVE_DELAY_MS);
    if !wave_ready {
        return;
    }

    let cfg = state.config();
    let spawn_ready = state
        .last_spawn_ms
        .is_none_or(|t| now - t > cfg.spawn_interval_ms);
    if !spawn_ready {
        return;
    }

    let count = state.rng.random_range(cfg.min_spawn..=cfg.max_spawn);
    for n in 0..count {
        state.pending_spawns.push(now + n as f64 * SPAWN_STAGGER_MS);
    }
    state.last_spawn_ms = Some(now);
    state.last_wave_ms = Some(now);
}

/// Place every staggered spawn whose time has come
fn release_pending_spawns(state: &mut ShooterState) {
    let now = state.clock_ms;
    let due = state.pending_spawns.iter().filter(|&&t| t <= now).count();
    if due == 0 {
        return;
    }
    state.pending_spawns.retain(|&t| t > now);
    for _ in 0..due {
        state.spawn_formation();
    }
}

/// Steer under the lowest block and shoot when lined up
fn autopilot(state: &mut ShooterState, input: &mut TickInput) {
    input.left = false;
    input.right = false;

    state.autopilot_cooldown = state.autopilot_cooldown.saturating_sub(1);

    let Some(target) = state
        .blocks
        .iter()
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()))
    else {
        return;
    };

    let target_x = target.rect.center().x;
    let half_width = target.rect.size.x / 2.0;
    let player_x = state.player.rect.center().x;
    let dx = target_x - player_x;

    if dx.abs() > PLAYER_SPEED {
        input.left = dx < 0.0;
        input.right = dx > 0.0;
    }

    if dx.abs() < half_width && state.autopilot_cooldown == 0 {
        input.fire = true;
        state.autopilot_cooldown = AUTOPILOT_FIRE_COOLDOWN;
    }
}
