//! Hello-triangle and the form-driven triangle builder

use super::{Demo, InputEvent, Shell};
use crate::renderer::{ColorRenderer, GpuContext, clear_color};
use crate::scene::{TriangleSpec, hello_triangle};
use crate::web::dom;

const DRAW_BUTTON: &str = "draw-btn";

pub struct TriangleDemo {
    renderer: ColorRenderer,
    clear: wgpu::Color,
    /// Builder only: parsed but not yet uploaded
    pending: Option<TriangleSpec>,
    builder: bool,
}

impl TriangleDemo {
    pub fn hello(gpu: &GpuContext) -> Self {
        let mut renderer = ColorRenderer::new(&gpu.device, gpu.format());
        renderer.upload(&gpu.device, &hello_triangle());
        Self {
            renderer,
            clear: clear_color([0.08, 0.08, 0.08, 1.0]),
            pending: None,
            builder: false,
        }
    }

    /// Starts empty; draws whatever the form holds when `#draw-btn` is pressed
    pub fn builder(gpu: &GpuContext, shell: &mut Shell) -> Self {
        dom::set_hidden(&shell.document, "triangle-form", false);
        Self {
            renderer: ColorRenderer::new(&gpu.device, gpu.format()),
            clear: clear_color([0.0, 0.0, 0.0, 1.0]),
            pending: None,
            builder: true,
        }
    }

    fn read_form(&mut self, shell: &Shell) {
        let document = &shell.document;
        match TriangleSpec::parse(|id| dom::input_value(document, id)) {
            Ok(spec) => {
                dom::clear_error(document);
                log::info!("Drawing triangle {:?}", spec.points);
                self.pending = Some(spec);
            }
            Err(e) => {
                log::warn!("Triangle form rejected: {}", e);
                dom::show_error(document, &e.to_string());
            }
        }
    }
}

impl Demo for TriangleDemo {
    fn update(&mut self, gpu: &GpuContext, _shell: &mut Shell, _dt_ms: f64) {
        if let Some(spec) = self.pending.take() {
            self.renderer.upload(&gpu.device, &spec.vertices());
        }
    }

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        gpu.render_pass("triangle_pass", self.clear, |pass| self.renderer.draw(pass))
    }

    fn handle_input(&mut self, event: &InputEvent, shell: &mut Shell) {
        if self.builder && *event == InputEvent::Button(DRAW_BUTTON) {
            self.read_form(shell);
        }
    }
}
