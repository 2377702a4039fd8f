//! Enemy spawn formations

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::MAX_BLOCKS_PER_SPAWN;

/// Formation a group of blocks enters the field in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPattern {
    Single,
    Double,
    Line,
    Triangle,
    Wave,
    Circle,
}

impl SpawnPattern {
    pub const ALL: [SpawnPattern; 6] = [
        SpawnPattern::Single,
        SpawnPattern::Double,
        SpawnPattern::Line,
        SpawnPattern::Triangle,
        SpawnPattern::Wave,
        SpawnPattern::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPattern::Single => "single",
            SpawnPattern::Double => "double",
            SpawnPattern::Line => "line",
            SpawnPattern::Triangle => "triangle",
            SpawnPattern::Wave => "wave",
            SpawnPattern::Circle => "circle",
        }
    }

    /// Top-left corners of the blocks in this formation.
    ///
    /// `size` is the block edge, `field_width` the canvas width. The horizontal
    /// start is random but keeps the formation on screen when it fits.
    pub fn layout<R: Rng>(&self, size: f32, field_width: f32, rng: &mut R) -> Vec<Vec2> {
        let mut start = |span: f32| rng.random::<f32>() * (field_width - span).max(0.0);

        let positions = match self {
            SpawnPattern::Single => vec![Vec2::new(start(size), 0.0)],
            SpawnPattern::Double => {
                let spacing = size * 1.5;
                let x = start(spacing + size);
                vec![Vec2::new(x, 0.0), Vec2::new(x + spacing, 0.0)]
            }
            SpawnPattern::Line => {
                let spacing = size * 1.2;
                let x = start(2.0 * spacing + size);
                (0..3)
                    .map(|i| Vec2::new(x + i as f32 * spacing, 0.0))
                    .collect()
            }
            SpawnPattern::Triangle => {
                let spacing = size * 1.2;
                let x = start(spacing * 2.0 + size);
                vec![
                    Vec2::new(x + spacing, 0.0),
                    Vec2::new(x, size * 0.5),
                    Vec2::new(x + spacing * 2.0, size * 0.5),
                ]
            }
            SpawnPattern::Wave => {
                let spacing = size * 1.2;
                let x = start(2.0 * spacing + size);
                (0..3)
                    .map(|i| {
                        let i = i as f32;
                        Vec2::new(x + i * spacing, (i * 0.8).sin() * size * 0.5)
                    })
                    .collect()
            }
            SpawnPattern::Circle => {
                let radius = size * 1.5;
                let center_x = start(radius * 2.0) + radius;
                (0..3)
                    .map(|i| {
                        let angle = i as f32 / 3.0 * TAU;
                        Vec2::new(center_x + angle.cos() * radius, angle.sin() * radius)
                    })
                    .collect()
            }
        };

        debug_assert!(positions.len() <= MAX_BLOCKS_PER_SPAWN);
        positions
    }
}
