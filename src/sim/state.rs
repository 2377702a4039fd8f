//! Shooter game state and entity types
//!
//! Everything the arcade game needs between frames lives here; rendering and
//! the browser layer only read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::levels::{LevelConfig, level_config};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterPhase {
    Playing,
    Paused,
    /// Out of lives; nothing moves until a restart
    GameOver,
}

/// Something that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Shot,
    /// A projectile struck a block
    Hit,
    BlockDestroyed { score: u64 },
    LevelUp { level: u32 },
    LifeLost { lives: u8 },
    GameOver { score: u64, level: u32 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn new(field: Vec2) -> Self {
        let x = ((field.x - PLAYER_WIDTH) / 2.0).max(0.0);
        let y = field.y - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;
        Self {
            rect: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Slide horizontally, staying inside `[0, field_width - width]`
    pub fn shift(&mut self, dx: f32, field_width: f32) {
        let max_x = (field_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, max_x);
    }

    /// Where a newly fired projectile appears (centred on the nose)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.rect.pos.x + (self.rect.size.x - PROJECTILE_WIDTH) / 2.0,
            self.rect.pos.y,
        )
    }
}

/// A falling enemy block
#[derive(Debug, Clone)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed in pixels per reference frame
    pub speed: f32,
    pub hp: u8,
    pub max_hp: u8,
}

impl Block {
    /// Remaining health in `[0, 1]`
    pub fn health_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }
}

/// A player shot travelling upward
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
}

/// Complete shooter state
#[derive(Debug, Clone)]
pub struct ShooterState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Playfield size in pixels
    pub field: Vec2,
    /// Simulated time since the run started
    pub clock_ms: f64,
    pub score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    pub phase: ShooterPhase,
    pub player: Player,
    /// Active blocks, oldest first
    pub blocks: Vec<Block>,
    /// Active projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    pub last_spawn_ms: Option<f64>,
    pub last_wave_ms: Option<f64>,
    /// Due times of staggered spawns not yet placed
    pub pending_spawns: Vec<f64>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Ticks until the autopilot may fire again
    pub(crate) autopilot_cooldown: u32,
    next_id: u32,
}

impl ShooterState {
    /// Create a new run with the given seed and field size
    pub fn new(seed: u64, field: Vec2) -> Self {
        Self::with_lives(seed, field, STARTING_LIVES)
    }

    pub fn with_lives(seed: u64, field: Vec2, lives: u8) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            clock_ms: 0.0,
            score: 0,
            lives: lives.max(1),
            level: 1,
            phase: ShooterPhase::Playing,
            player: Player::new(field),
            blocks: Vec::new(),
            projectiles: Vec::new(),
            last_spawn_ms: None,
            last_wave_ms: None,
            pending_spawns: Vec::new(),
            events: Vec::new(),
            autopilot_cooldown: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &'static LevelConfig {
        level_config(self.level)
    }

    pub fn is_over(&self) -> bool {
        self.phase == ShooterPhase::GameOver
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Keep the player on screen after the canvas changes size
    pub fn resize_field(&mut self, field: Vec2) {
        self.field = field;
        self.player.rect.pos.y = field.y - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;
        self.player.shift(0.0, field.x);
    }

    /// Add one projectile at the player's muzzle
    pub fn fire(&mut self) {
        let id = self.next_entity_id();
        let muzzle = self.player.muzzle();
        self.projectiles.push(Projectile {
            id,
            rect: Rect::new(muzzle.x, muzzle.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed: PROJECTILE_SPEED,
        });
        self.events.push(GameEvent::Shot);
    }

    /// Place one formation chosen from the current level's patterns
    pub fn spawn_formation(&mut self) {
        use rand::Rng;

        let cfg = *self.config();
        let pattern = cfg.patterns[self.rng.random_range(0..cfg.patterns.len())];
        let positions = pattern.layout(cfg.block_size, self.field.x, &mut self.rng);

        for pos in positions.into_iter().take(MAX_BLOCKS_PER_SPAWN) {
            let id = self.next_entity_id();
            let speed = cfg.speed * (0.9 + self.rng.random::<f32>() * 0.2);
            self.blocks.push(Block {
                id,
                rect: Rect::new(pos.x, pos.y, cfg.block_size, cfg.block_size),
                speed,
                hp: cfg.health,
                max_hp: cfg.health,
            });
        }
        log::debug!("Spawned {} formation at level {}", pattern.as_str(), cfg.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Vec2 {
        Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }

    #[test]
    fn test_new_state() {
        let state = ShooterState::new(1, field());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, ShooterPhase::Playing);
        assert_eq!(state.player.rect.pos, Vec2::new(350.0, 530.0));
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_player_clamped() {
        let mut player = Player::new(field());
        player.shift(-1000.0, 800.0);
        assert_eq!(player.rect.pos.x, 0.0);
        player.shift(1000.0, 800.0);
        assert_eq!(player.rect.pos.x, 700.0);
    }

    #[test]
    fn test_fire_centres_projectile() {
        let mut state = ShooterState::new(1, field());
        state.fire();
        let shot = &state.projectiles[0];
        assert_eq!(shot.rect.center().x, state.player.rect.center().x);
        assert_eq!(shot.rect.pos.y, state.player.rect.pos.y);
        assert_eq!(state.drain_events(), vec![GameEvent::Shot]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_spawn_uses_level_config() {
        let mut state = ShooterState::new(5, field());
        state.level = 4;
        state.spawn_formation();
        assert_eq!(state.blocks.len(), 3);
        for block in &state.blocks {
            assert_eq!(block.rect.size, Vec2::splat(110.0));
            assert_eq!(block.hp, 3);
            assert!(block.speed >= 1.6 * 0.9 - 1e-4 && block.speed <= 1.6 * 1.1 + 1e-4);
        }
    }

    #[test]
    fn test_health_fraction() {
        let block = Block {
            id: 1,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            speed: 1.0,
            hp: 1,
            max_hp: 3,
        };
        assert!((block.health_fraction() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_hidpi_backing_gives_css_field() {
        use crate::scene::shapes::css_size;

        let field = css_size((1600, 1200), 2.0);
        assert_eq!(field, Vec2::new(800.0, 600.0));

        let mut state = ShooterState::new(1, field);
        assert_eq!(state.player.rect.pos, Vec2::new(350.0, 530.0));

        // A resize at another ratio keeps the same CSS layout
        state.resize_field(css_size((2400, 1800), 3.0));
        assert_eq!(state.field, Vec2::new(800.0, 600.0));
        assert_eq!(state.player.rect.pos.y, 530.0);
    }
}
