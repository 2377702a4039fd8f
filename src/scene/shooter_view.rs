//! Shooter state to sprites
//!
//! Draw order: background, player, blocks, health bars, projectiles.

use crate::consts::{HEALTH_BAR_HEIGHT, HEALTH_BAR_OFFSET};
use crate::renderer::{SpriteBatch, TextureId, colors};
use crate::sim::{Block, Rect, ShooterState};

/// Textures available to the shooter; `None` means not loaded (not drawn)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteSet {
    pub background: Option<TextureId>,
    pub player: Option<TextureId>,
    pub block: Option<TextureId>,
    pub projectile: Option<TextureId>,
}

/// Fill colour for a block at `fraction` of its health
pub fn health_bar_color(fraction: f32) -> [f32; 4] {
    if fraction > 0.66 {
        colors::HEALTH_HIGH
    } else if fraction > 0.33 {
        colors::HEALTH_MID
    } else {
        colors::HEALTH_LOW
    }
}

/// Backing and fill rects of a block's health bar
pub fn health_bar_rects(block: &Block) -> (Rect, Rect) {
    let y = block.rect.pos.y - HEALTH_BAR_OFFSET;
    let backing = Rect::new(block.rect.pos.x, y, block.rect.size.x, HEALTH_BAR_HEIGHT);
    let fill = Rect::new(
        block.rect.pos.x,
        y,
        block.rect.size.x * block.health_fraction(),
        HEALTH_BAR_HEIGHT,
    );
    (backing, fill)
}

/// Append one frame of the game to `batch`
pub fn build_batch(state: &ShooterState, sprites: &SpriteSet, batch: &mut SpriteBatch) {
    if let Some(bg) = sprites.background {
        batch.push_quad(Rect::new(0.0, 0.0, state.field.x, state.field.y), bg, colors::WHITE);
    }

    if let Some(tex) = sprites.player {
        batch.push_quad(state.player.rect, tex, colors::WHITE);
    }

    if let Some(tex) = sprites.block {
        for block in &state.blocks {
            batch.push_quad(block.rect, tex, colors::WHITE);
        }
    }

    // Bars are untextured, so they do not depend on any sprite loading
    for block in &state.blocks {
        let (backing, fill) = health_bar_rects(block);
        batch.push_quad(backing, TextureId::WHITE, colors::HEALTH_BACKING);
        batch.push_quad(fill, TextureId::WHITE, health_bar_color(block.health_fraction()));
    }

    if let Some(tex) = sprites.projectile {
        for projectile in &state.projectiles {
            batch.push_quad(projectile.rect, tex, colors::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn block(hp: u8, max_hp: u8) -> Block {
        Block {
            id: 1,
            rect: Rect::new(100.0, 200.0, 80.0, 80.0),
            speed: 1.0,
            hp,
            max_hp,
        }
    }

    fn all_sprites() -> SpriteSet {
        SpriteSet {
            background: Some(TextureId(1)),
            player: Some(TextureId(2)),
            block: Some(TextureId(3)),
            projectile: Some(TextureId(4)),
        }
    }

    fn state_with_entities() -> ShooterState {
        let mut state = ShooterState::new(7, Vec2::new(800.0, 600.0));
        state.blocks.push(block(2, 3));
        state.blocks.push(block(1, 3));
        state.fire();
        state
    }

    #[test]
    fn test_health_thresholds() {
        assert_eq!(health_bar_color(1.0), colors::HEALTH_HIGH);
        assert_eq!(health_bar_color(0.67), colors::HEALTH_HIGH);
        assert_eq!(health_bar_color(2.0 / 3.0), colors::HEALTH_HIGH);
        assert_eq!(health_bar_color(0.66), colors::HEALTH_MID);
        assert_eq!(health_bar_color(0.5), colors::HEALTH_MID);
        assert_eq!(health_bar_color(1.0 / 3.0), colors::HEALTH_MID);
        assert_eq!(health_bar_color(0.33), colors::HEALTH_LOW);
        assert_eq!(health_bar_color(0.0), colors::HEALTH_LOW);
    }

    #[test]
    fn test_health_bar_geometry() {
        let (backing, fill) = health_bar_rects(&block(1, 2));
        assert_eq!(backing, Rect::new(100.0, 190.0, 80.0, 5.0));
        assert_eq!(fill, Rect::new(100.0, 190.0, 40.0, 5.0));
    }

    #[test]
    fn test_full_frame_quad_count() {
        let state = state_with_entities();
        let mut batch = SpriteBatch::new(state.field);
        build_batch(&state, &all_sprites(), &mut batch);

        // background + player + 2 blocks + 2x2 bar quads + 1 projectile
        assert_eq!(batch.quad_count(), 1 + 1 + 2 + 4 + 1);
        let order: Vec<TextureId> = batch.draws().iter().map(|(t, _)| *t).collect();
        assert_eq!(
            order,
            vec![
                TextureId(1),
                TextureId(2),
                TextureId(3),
                TextureId::WHITE,
                TextureId(4)
            ]
        );
    }

    #[test]
    fn test_missing_textures_are_skipped() {
        let state = state_with_entities();
        let mut batch = SpriteBatch::new(state.field);
        build_batch(&state, &SpriteSet::default(), &mut batch);

        // Only the health bars remain
        assert_eq!(batch.quad_count(), 4);
        assert!(batch.draws().iter().all(|(t, _)| *t == TextureId::WHITE));
    }

    #[test]
    fn test_empty_bar_for_dead_block_is_dropped() {
        let mut state = ShooterState::new(7, Vec2::new(800.0, 600.0));
        state.blocks.push(block(0, 3));
        let mut batch = SpriteBatch::new(state.field);
        build_batch(&state, &SpriteSet::default(), &mut batch);
        // Zero-width fill is not emitted
        assert_eq!(batch.quad_count(), 1);
    }
}
