//! Spinning cube, pyramid and the lit orbit scene

use glam::Vec3;

use super::{Demo, Shell};
use crate::renderer::{GpuContext, Lighting, MeshDraw, MeshId, MeshRenderer, clear_color};
use crate::scene::{Camera, MeshData, colored_cube, orbit_scene, plane, pyramid, solid_box};
use crate::scene::{cube_model, pyramid_model};

const MINT: [f32; 4] = [0.75, 0.85, 0.8, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

enum Scene {
    Cube { cube: MeshId },
    Pyramid { pyramid: MeshId },
    Orbit { main: MeshId, orb: MeshId, ground: MeshId },
}

pub struct SpinningDemo {
    scene: Scene,
    renderer: MeshRenderer,
    camera: Camera,
    lighting: Lighting,
    clear: wgpu::Color,
    elapsed_ms: f64,
}

impl SpinningDemo {
    fn with_scene<F>(gpu: &GpuContext, camera: Camera, clear: [f32; 4], build: F) -> Self
    where
        F: FnOnce(&mut dyn FnMut(MeshData) -> MeshId) -> Scene,
    {
        let mut renderer = MeshRenderer::new(&gpu.device, gpu.format());
        let scene = build(&mut |mesh: MeshData| {
            renderer.add_mesh(&gpu.device, &mesh.vertices, &mesh.indices)
        });
        Self {
            scene,
            renderer,
            camera,
            lighting: Lighting::default(),
            clear: clear_color(clear),
            elapsed_ms: 0.0,
        }
    }

    pub fn cube(gpu: &GpuContext) -> Self {
        Self::with_scene(gpu, Camera::spinning(), MINT, |add| Scene::Cube {
            cube: add(colored_cube()),
        })
    }

    pub fn pyramid(gpu: &GpuContext) -> Self {
        Self::with_scene(gpu, Camera::spinning(), MINT, |add| Scene::Pyramid {
            pyramid: add(pyramid()),
        })
    }

    pub fn orbit(gpu: &GpuContext) -> Self {
        Self::with_scene(gpu, Camera::orbit(), BLACK, |add| Scene::Orbit {
            main: add(solid_box(Vec3::ONE, [1.0, 0.0, 0.0])),
            orb: add(solid_box(Vec3::splat(0.65), [0.0, 0.47, 1.0])),
            ground: add(plane(10.0, 10.0, [0.8, 0.8, 0.8])),
        })
    }

    fn draws(&self) -> Vec<MeshDraw> {
        let t = (self.elapsed_ms / 1000.0) as f32;
        match self.scene {
            Scene::Cube { cube } => vec![MeshDraw::new(cube, cube_model(t))],
            Scene::Pyramid { pyramid } => vec![MeshDraw::new(pyramid, pyramid_model(t))],
            Scene::Orbit { main, orb, ground } => {
                let xf = orbit_scene(t);
                vec![
                    MeshDraw::new(ground, xf.ground).lit().background(),
                    MeshDraw::new(main, xf.main).lit(),
                    MeshDraw::new(orb, xf.orb).lit(),
                ]
            }
        }
    }
}

impl Demo for SpinningDemo {
    fn update(&mut self, gpu: &GpuContext, _shell: &mut Shell, dt_ms: f64) {
        self.elapsed_ms += dt_ms;

        let draws = self.draws();
        let view_proj = self.camera.view_proj(gpu.aspect());
        self.renderer
            .prepare(&gpu.device, &gpu.queue, view_proj, &self.lighting, &draws);
    }

    fn render(&mut self, gpu: &GpuContext) -> Result<(), wgpu::SurfaceError> {
        gpu.render_pass("spinning_pass", self.clear, |pass| self.renderer.draw(pass))
    }
}
