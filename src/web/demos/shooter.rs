//! Shoot the falling blocks

use glam::Vec2;

use super::{Demo, InputEvent, Shell};
use crate::audio::SoundEffect;
use crate::consts::SIM_DT_MS;
use crate::highscores::HighScores;
use crate::renderer::{GpuContext, GpuTexture, SpriteBatch, SpriteRenderer, clear_color, colors};
use crate::scene::shapes::css_size;
use crate::scene::{SpriteSet, build_batch};
use crate::sim::{GameEvent, ShooterPhase, ShooterState, TickInput, tick};
use crate::timing::FixedStep;
use crate::web::assets::AssetInbox;
use crate::web::dom;

/// How long the "Level N!" toast stays up
const TOAST_MS: f64 = 2000.0;
const RESTART_BUTTON: &str = "restart-btn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sprite {
    Background,
    Player,
    Block,
    Projectile,
}

impl Sprite {
    const ALL: [(Sprite, &'static str); 4] = [
        (Sprite::Background, "space.jpg"),
        (Sprite::Player, "player.png"),
        (Sprite::Block, "block.png"),
        (Sprite::Projectile, "projectile.png"),
    ];
}

pub struct ShooterDemo {
    state: ShooterState,
    input: TickInput,
    step: FixedStep,
    renderer: SpriteRenderer,
    batch: SpriteBatch,
    sprites: SpriteSet,
    inbox: AssetInbox<Sprite>,
    high_scores: HighScores,
    toast_ms: Option<f64>,
    /// Phase last shown in the HUD
    shown_phase: ShooterPhase,
}

impl ShooterDemo {
    pub fn new(gpu: &GpuContext, shell: &mut Shell, seed: u64) -> Self {
        let field = field_size(gpu);
        let mut renderer = SpriteRenderer::new(&gpu.device, &gpu.queue, gpu.format());

        // Background shows as flat cornflower until (or unless) the image loads
        let placeholder =
            GpuTexture::solid_color(&gpu.device, &gpu.queue, colors::CORNFLOWER, "background_placeholder");
        let sprites = SpriteSet {
            background: Some(renderer.add_texture(&gpu.device, placeholder)),
            ..SpriteSet::default()
        };

        let mut inbox = AssetInbox::new();
        for (sprite, url) in Sprite::ALL {
            inbox.request(sprite, url);
        }

        let state = ShooterState::with_lives(seed, field, shell.settings.starting_lives);
        log::info!("Shooter field {}x{}, seed {}", field.x, field.y, seed);

        let mut demo = Self {
            state,
            input: TickInput::default(),
            step: FixedStep::new(),
            renderer,
            batch: SpriteBatch::new(field),
            sprites,
            inbox,
            high_scores: HighScores::load(),
            toast_ms: None,
            shown_phase: ShooterPhase::Playing,
        };
        demo.reset_hud(&shell.document);
        demo
    }

    fn receive_assets(&mut self, gpu: &GpuContext) {
        for (sprite, result) in self.inbox.drain() {
            let img = match result {
                Ok(img) => img,
                Err(_) if sprite == Sprite::Background => {
                    log::warn!("Background unavailable, keeping flat colour");
                    continue;
                }
                Err(_) => {
                    log::warn!("{:?} sprite unavailable, it will not be drawn", sprite);
                    continue;
                }
            };

            let texture = GpuTexture::from_rgba(&gpu.device, &gpu.queue, &img, "shooter_sprite");
            match sprite {
                Sprite::Background => {
                    if let Some(id) = self.sprites.background {
                        self.renderer.replace_texture(&gpu.device, id, texture);
                    }
                }
                Sprite::Player => self.sprites.player = Some(self.renderer.add_texture(&gpu.device, texture)),
                Sprite::Block => self.sprites.block = Some(self.renderer.add_texture(&gpu.device, texture)),
                Sprite::Projectile => {
                    self.sprites.projectile = Some(self.renderer.add_texture(&gpu.device, texture))
                }
            }
        }
    }

    fn handle_events(&mut self, shell: &mut Shell) {
        for event in self.state.drain_events() {
            shell.audio.play(SoundEffect::for_event(&event));

            match event {
                GameEvent::LevelUp { level } => {
                    log::info!("Level up: {}", level);
                    dom::set_text(&shell.document, "level-toast", &format!("Level {}!", level));
                    dom::set_hidden(&shell.document, "level-toast", false);
                    self.toast_ms = Some(TOAST_MS);
                }
                GameEvent::GameOver { score, level } => self.game_over(shell, score, level),
                _ => {}
            }
        }
    }

    fn game_over(&mut self, shell: &mut Shell, score: u64, level: u32) {
        log::info!("Game over: score {}, level {}", score, level);
        let document = &shell.document;

        let rank = self.high_scores.add_score(score, level, js_sys::Date::now());
        let rank_text = match rank {
            Some(rank) => {
                self.high_scores.save();
                shell.audio.play(SoundEffect::HighScore);
                format!("New high score! Rank #{}", rank)
            }
            None => match self.high_scores.top_score() {
                Some(best) => format!("Best: {}", best),
                None => String::new(),
            },
        };

        dom::set_text(document, "final-score", &score.to_string());
        dom::set_text(document, "rank", &rank_text);
        dom::set_hidden(document, "game-over", false);
    }

    fn restart(&mut self, field: Vec2, shell: &mut Shell) {
        let seed = js_sys::Date::now() as u64;
        self.state = ShooterState::with_lives(seed, field, shell.settings.starting_lives);
        self.input = TickInput::default();
        self.step.reset();
        self.toast_ms = None;
        self.reset_hud(&shell.document);
        log::info!("Started new run with seed {}", seed);
    }

    fn reset_hud(&mut self, document: &web_sys::Document) {
        self.shown_phase = ShooterPhase::Playing;
        dom::set_hidden(document, "game-over", true);
        dom::set_hidden(document, "paused", true);
        dom::set_hidden(document, "level-toast", true);
        self.update_hud(document);
    }

    fn update_hud(&mut self, document: &web_sys::Document) {
        dom::set_text(document, "score", &format!("Score: {}", self.state.score));
        dom::set_text(document, "lives", &format!("Lives: {}", self.state.lives));
        dom::set_text(document, "level", &format!("Level: {}", self.state.level));

        if self.state.phase != self.shown_phase {
            dom::set_hidden(document, "paused", self.state.phase != ShooterPhase::Paused);
            self.shown_phase = self.state.phase;
        }
    }
}

/// Playfield in CSS pixels; the sprite batch stretches it over the surface
fn field_size(gpu: &GpuContext) -> Vec2 {
    css_size(gpu.size, dom::device_pixel_ratio())
}

impl Demo for ShooterDemo {
    fn update(&mut self, gpu: &GpuContext, shell: &mut Shell, dt_ms: f64) {
        self.receive_assets(gpu);

        for _ in 0..self.step.advance(dt_ms) {
            tick(&mut self.state, &self.input, SIM_DT_MS);
            // One-shot inputs apply to a single tick
            self.input.fire = false;
            self.input.pause = false;
        }
        self.handle_events(shell);

        if let Some(left) = self.toast_ms.as_mut() {
            *left -= dt_ms;
            if *left <= 0.0 {
                self.toast_ms = None;
                dom::set_hidden(&shell.document, "level-toast", true);
            }
        }
        self.update_hud(&shell.document);

        if self.batch.viewport() == self.state.field {
            self.batch.clear();
        } else {
            self.batch = SpriteBatch::new(self.state.field);
        }
        build_batch(&self.state, &self.sprites, &mut self.batch);
        self.renderer.prepare(&gpu.device, &self.batch);
    }

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        gpu.render_pass("shooter_pass", clear_color(colors::DARK_GRAY), |pass| {
            self.renderer.draw(pass)
        })
    }

    fn handle_input(&mut self, event: &InputEvent, shell: &mut Shell) {
        match event {
            InputEvent::KeyDown(key) => match key.as_str() {
                "ArrowLeft" | "a" | "A" => self.input.left = true,
                "ArrowRight" | "d" | "D" => self.input.right = true,
                " " => self.input.fire = true,
                "Escape" | "p" | "P" => self.input.pause = true,
                "i" | "I" => {
                    self.input.autopilot = !self.input.autopilot;
                    log::info!("Autopilot {}", if self.input.autopilot { "on" } else { "off" });
                }
                _ => {}
            },
            InputEvent::KeyUp(key) => match key.as_str() {
                "ArrowLeft" | "a" | "A" => self.input.left = false,
                "ArrowRight" | "d" | "D" => self.input.right = false,
                _ => {}
            },
            InputEvent::Button(RESTART_BUTTON) => {
                let field = self.state.field;
                self.restart(field, shell);
            }
            InputEvent::FocusLost => {
                // Held keys never see their keyup once focus is gone
                self.input.left = false;
                self.input.right = false;
                if shell.settings.auto_pause_on_blur && self.state.phase == ShooterPhase::Playing {
                    self.input.pause = true;
                    log::info!("Auto-paused (focus lost)");
                }
            }
            _ => {}
        }
    }

    fn resized(&mut self, gpu: &GpuContext) {
        self.state.resize_field(field_size(gpu));
    }
}

