//! Split-screen quad: a random image on top, a random flat colour below

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Demo, Shell};
use crate::renderer::{GpuContext, GpuTexture, SpriteBatch, SpriteRenderer, TextureId, clear_color, colors};
use crate::sim::Rect;
use crate::web::assets::AssetInbox;

const IMAGES: [&str; 3] = ["img/img1.png", "img/img2.png", "img/img3.png"];

pub struct SplitQuadDemo {
    renderer: SpriteRenderer,
    batch: SpriteBatch,
    inbox: AssetInbox<()>,
    image: TextureId,
    tint: [f32; 4],
}

impl SplitQuadDemo {
    pub fn new(gpu: &GpuContext, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let url = IMAGES[rng.random_range(0..IMAGES.len())];
        let tint = [rng.random(), rng.random(), rng.random(), 1.0];

        let mut renderer = SpriteRenderer::new(&gpu.device, &gpu.queue, gpu.format());
        // Blue until the image arrives
        let placeholder = GpuTexture::solid_color(&gpu.device, &gpu.queue, colors::LOADING_BLUE, "loading");
        let image = renderer.add_texture(&gpu.device, placeholder);

        let mut inbox = AssetInbox::new();
        log::info!("Loading {}", url);
        inbox.request((), url);

        Self {
            renderer,
            batch: SpriteBatch::new(viewport(gpu)),
            inbox,
            image,
            tint,
        }
    }
}

fn viewport(gpu: &GpuContext) -> Vec2 {
    Vec2::new(gpu.size.0 as f32, gpu.size.1 as f32)
}

impl Demo for SplitQuadDemo {
    fn update(&mut self, gpu: &GpuContext, _shell: &mut Shell, _dt_ms: f64) {
        for ((), result) in self.inbox.drain() {
            if let Ok(img) = result {
                let texture = GpuTexture::from_rgba(&gpu.device, &gpu.queue, &img, "split_quad_image");
                self.renderer.replace_texture(&gpu.device, self.image, texture);
            }
        }

        let size = viewport(gpu);
        let half = size.y / 2.0;
        self.batch = SpriteBatch::new(size);
        self.batch
            .push_quad(Rect::new(0.0, 0.0, size.x, half), self.image, colors::WHITE);
        self.batch
            .push_quad(Rect::new(0.0, half, size.x, size.y - half), TextureId::WHITE, self.tint);
        self.renderer.prepare(&gpu.device, &self.batch);
    }

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        gpu.render_pass("split_quad_pass", clear_color([0.0, 0.0, 0.0, 1.0]), |pass| {
            self.renderer.draw(pass)
        })
    }
}
