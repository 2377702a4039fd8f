//! Ball-bounce clicker

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{Demo, InputEvent, Shell};
use crate::audio::SoundEffect;
use crate::consts::{BOUNCE_BALL_RADIUS_PX, SIM_DT_MS};
use crate::renderer::{ColorRenderer, GpuContext, clear_color, colors};
use crate::scene::shapes::{circle, css_size, px_to_ndc_radius};
use crate::sim::{BounceState, canvas_to_ndc};
use crate::timing::FixedStep;
use crate::web::dom;

const BALL_SEGMENTS: u32 = 32;

pub struct BounceDemo {
    state: BounceState,
    step: FixedStep,
    renderer: ColorRenderer,
}

impl BounceDemo {
    pub fn new(gpu: &GpuContext, shell: &mut Shell, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = BounceState::new(&mut rng);
        dom::set_text(&shell.document, "score", "Score: 0");
        Self {
            state,
            step: FixedStep::new(),
            renderer: ColorRenderer::new(&gpu.device, gpu.format()),
        }
    }
}

impl Demo for BounceDemo {
    fn update(&mut self, gpu: &GpuContext, _shell: &mut Shell, dt_ms: f64) {
        for _ in 0..self.step.advance(dt_ms) {
            self.state.tick(SIM_DT_MS);
        }

        // Radius is in CSS pixels, like the click hit test
        let size = css_size(gpu.size, dom::device_pixel_ratio());
        let radius = px_to_ndc_radius(BOUNCE_BALL_RADIUS_PX, size);
        let ball = circle(self.state.pos, radius, colors::RED, BALL_SEGMENTS);
        self.renderer.upload(&gpu.device, &ball);
    }

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        gpu.render_pass("bounce_pass", clear_color(colors::WHITE), |pass| {
            self.renderer.draw(pass)
        })
    }

    fn handle_input(&mut self, event: &InputEvent, shell: &mut Shell) {
        if let InputEvent::Click { offset, css_size } = event {
            let ndc = canvas_to_ndc(*offset, *css_size);
            if self.state.click(ndc) {
                log::debug!("Ball hit at {:?}, score {}", ndc, self.state.score);
                shell.audio.play(SoundEffect::BounceScore);
                dom::set_text(&shell.document, "score", &format!("Score: {}", self.state.score));
            }
        }
    }
}
