//! Ball-bounce clicker
//!
//! A ball drifts around the canvas in NDC, reflecting off the edges. Clicking
//! within reach of it scores a point.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::collision::point_in_circle;
use crate::consts::{BOUNCE_HIT_RADIUS, BOUNCE_LIMIT, BOUNCE_SPEED, SIM_DT_MS};

#[derive(Debug, Clone)]
pub struct BounceState {
    /// Ball centre in NDC
    pub pos: Vec2,
    /// NDC units per reference frame
    pub vel: Vec2,
    pub score: u32,
}

impl BounceState {
    /// Ball at the centre heading in a random direction
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let angle = rng.random::<f32>() * TAU;
        Self::with_direction(angle)
    }

    pub fn with_direction(angle: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(angle.cos(), angle.sin()) * BOUNCE_SPEED,
            score: 0,
        }
    }

    /// Advance by `dt_ms`; velocity components flip back inward past the limit
    pub fn tick(&mut self, dt_ms: f64) {
        let frames = (dt_ms / SIM_DT_MS) as f32;
        self.pos += self.vel * frames;

        if self.pos.x.abs() > BOUNCE_LIMIT {
            self.vel.x = -self.pos.x.signum() * self.vel.x.abs();
        }
        if self.pos.y.abs() > BOUNCE_LIMIT {
            self.vel.y = -self.pos.y.signum() * self.vel.y.abs();
        }
    }

    /// Register a click at `ndc`. Returns true if it scored.
    pub fn click(&mut self, ndc: Vec2) -> bool {
        let hit = point_in_circle(ndc, self.pos, BOUNCE_HIT_RADIUS);
        if hit {
            self.score += 1;
        }
        hit
    }
}

/// Convert a click position relative to the canvas' top-left (CSS pixels)
/// into NDC, flipping y
pub fn canvas_to_ndc(offset: Vec2, canvas_size: Vec2) -> Vec2 {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        offset.x / canvas_size.x * 2.0 - 1.0,
        -(offset.y / canvas_size.y * 2.0 - 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_constant() {
        let state = BounceState::with_direction(1.234);
        assert!((state.vel.length() - BOUNCE_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_stays_in_bounds() {
        let mut state = BounceState::with_direction(0.7);
        for _ in 0..10_000 {
            state.tick(SIM_DT_MS);
            assert!(state.pos.x.abs() <= BOUNCE_LIMIT + BOUNCE_SPEED);
            assert!(state.pos.y.abs() <= BOUNCE_LIMIT + BOUNCE_SPEED);
        }
    }

    #[test]
    fn test_reflects_off_right_edge() {
        let mut state = BounceState::with_direction(0.0);
        state.pos = Vec2::new(0.949, 0.0);
        state.tick(SIM_DT_MS);
        assert!(state.vel.x < 0.0);
    }

    #[test]
    fn test_click_scores_near_ball() {
        let mut state = BounceState::with_direction(0.0);
        state.pos = Vec2::new(0.5, -0.5);
        assert!(state.click(Vec2::new(0.55, -0.45)));
        assert!(!state.click(Vec2::new(0.7, -0.5)));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_canvas_to_ndc() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(canvas_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(canvas_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
        assert_eq!(canvas_to_ndc(size, size), Vec2::new(1.0, -1.0));
        assert_eq!(canvas_to_ndc(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }
}
