//! The browser demos
//!
//! Every demo implements `Demo`; the runtime in `web` owns the frame loop and
//! feeds it input.

mod bounce;
mod shooter;
mod spinning;
mod split_quad;
mod triangle;

use glam::Vec2;
use web_sys::Document;

use crate::audio::AudioManager;
use crate::catalog::DemoKind;
use crate::renderer::GpuContext;
use crate::settings::Settings;

/// Browser input, already decoupled from the DOM event types
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// `KeyboardEvent.key`
    KeyDown(String),
    KeyUp(String),
    /// Click relative to the canvas' top-left, with the canvas' CSS size
    Click { offset: Vec2, css_size: Vec2 },
    /// A page button was pressed (element id)
    Button(&'static str),
    /// Window blurred or tab hidden
    FocusLost,
    FocusGained,
}

/// Page-level services every demo can use
pub struct Shell {
    pub document: Document,
    pub settings: Settings,
    pub audio: AudioManager,
}

pub trait Demo {
    /// Advance by `dt_ms` of wall-clock time
    fn update(&mut self, gpu: &GpuContext, shell: &mut Shell, dt_ms: f64);

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError>;

    fn handle_input(&mut self, _event: &InputEvent, _shell: &mut Shell) {}

    /// The surface was resized
    fn resized(&mut self, _gpu: &GpuContext) {}
}

/// Build the selected demo on `gpu`
pub fn create(kind: DemoKind, gpu: &GpuContext, shell: &mut Shell, seed: u64) -> Box<dyn Demo> {
    log::info!("Starting demo '{}' ({})", kind.slug(), kind.title());
    match kind {
        DemoKind::Cube => Box::new(spinning::SpinningDemo::cube(gpu)),
        DemoKind::Pyramid => Box::new(spinning::SpinningDemo::pyramid(gpu)),
        DemoKind::Orbit => Box::new(spinning::SpinningDemo::orbit(gpu)),
        DemoKind::Triangle => Box::new(triangle::TriangleDemo::hello(gpu)),
        DemoKind::TriangleBuilder => Box::new(triangle::TriangleDemo::builder(gpu, shell)),
        DemoKind::SplitQuad => Box::new(split_quad::SplitQuadDemo::new(gpu, seed)),
        DemoKind::Bounce => Box::new(bounce::BounceDemo::new(gpu, shell, seed)),
        DemoKind::Shooter => Box::new(shooter::ShooterDemo::new(gpu, shell, seed)),
    }
}
