//! Indexed 3D meshes with per-draw transforms
//!
//! Every draw gets its own slot in one uniform buffer, selected with a dynamic
//! offset. There is no depth attachment: meshes are convex and culled, and
//! draws are ordered back to front.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

use super::vertex::MeshVertex;

/// Initial number of per-draw uniform slots; grows on demand
const INITIAL_DRAW_SLOTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MeshUniforms {
    mvp: [[f32; 4]; 4],   // offset 0
    model: [[f32; 4]; 4], // offset 64
    key_light: [f32; 4],  // offset 128 - xyz direction towards light, w intensity
    fill_light: [f32; 4], // offset 144
    params: [f32; 4],     // offset 160 - x: lit, y: ambient
}

/// Handle to geometry uploaded with `MeshRenderer::add_mesh`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshId(usize);

/// Draws in `Background` go first in submission order; `Sorted` draws follow,
/// farthest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawLayer {
    Background,
    #[default]
    Sorted,
}

#[derive(Debug, Clone, Copy)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub model: Mat4,
    pub lit: bool,
    pub layer: DrawLayer,
}

impl MeshDraw {
    pub fn new(mesh: MeshId, model: Mat4) -> Self {
        Self {
            mesh,
            model,
            lit: false,
            layer: DrawLayer::Sorted,
        }
    }

    pub fn lit(mut self) -> Self {
        self.lit = true;
        self
    }

    pub fn background(mut self) -> Self {
        self.layer = DrawLayer::Background;
        self
    }
}

/// Two directional lights plus ambient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Direction pointing from the surface towards the light
    pub key_dir: Vec3,
    pub key_intensity: f32,
    pub fill_dir: Vec3,
    pub fill_intensity: f32,
    pub ambient: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            key_dir: Vec3::new(10.0, 5.0, 5.0).normalize(),
            key_intensity: 1.0,
            fill_dir: Vec3::new(-5.0, 3.0, -5.0).normalize(),
            fill_intensity: 0.3,
            ambient: 0.25,
        }
    }
}

/// Order in which `draws` should be submitted: background layer first, then
/// the rest by decreasing view distance of their origin
pub fn draw_order(view_proj: Mat4, draws: &[MeshDraw]) -> Vec<usize> {
    let depth = |d: &MeshDraw| (view_proj * d.model * Vec4::W).w;

    let mut background: Vec<usize> = Vec::new();
    let mut sorted: Vec<(usize, f32)> = Vec::new();
    for (i, d) in draws.iter().enumerate() {
        match d.layer {
            DrawLayer::Background => background.push(i),
            DrawLayer::Sorted => sorted.push((i, depth(d))),
        }
    }
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    background.extend(sorted.into_iter().map(|(i, _)| i));
    background
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Bytes between consecutive uniform slots
    stride: u64,
    capacity: usize,
    meshes: Vec<GpuMesh>,
    /// Mesh and dynamic offset per draw, in submission order
    frame: Vec<(MeshId, u32)>,
    staging: Vec<u8>,
}

impl MeshRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("mesh.wgsl").into()),
        });

        let uniform_size = std::mem::size_of::<MeshUniforms>() as u64;
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = wgpu::util::align_to(uniform_size, alignment);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (uniform_buffer, bind_group) =
            Self::create_uniforms(device, &bind_group_layout, stride, INITIAL_DRAW_SLOTS);

        Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            bind_group,
            stride,
            capacity: INITIAL_DRAW_SLOTS,
            meshes: Vec::new(),
            frame: Vec::new(),
            staging: Vec::new(),
        }
    }

    fn create_uniforms(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        slots: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_uniforms"),
            size: stride * slots as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<MeshUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    pub fn add_mesh(&mut self, device: &wgpu::Device, vertices: &[MeshVertex], indices: &[u16]) -> MeshId {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        // WebGL needs index buffers padded to 4 bytes
        let mut padded = indices.to_vec();
        if padded.len() % 2 == 1 {
            padded.push(0);
        }
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&padded),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.meshes.push(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        });
        MeshId(self.meshes.len() - 1)
    }

    /// Write this frame's uniforms and record the submission order
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view_proj: Mat4,
        lighting: &Lighting,
        draws: &[MeshDraw],
    ) {
        if draws.len() > self.capacity {
            let slots = draws.len().next_power_of_two();
            log::debug!("Growing mesh uniform buffer to {} slots", slots);
            let (buffer, bind_group) =
                Self::create_uniforms(device, &self.bind_group_layout, self.stride, slots);
            self.uniform_buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = slots;
        }

        self.frame.clear();
        self.staging.clear();
        self.staging.resize(self.stride as usize * draws.len(), 0);

        for (slot, index) in draw_order(view_proj, draws).into_iter().enumerate() {
            let draw = &draws[index];
            let uniforms = MeshUniforms {
                mvp: (view_proj * draw.model).to_cols_array_2d(),
                model: draw.model.to_cols_array_2d(),
                key_light: lighting.key_dir.extend(lighting.key_intensity).to_array(),
                fill_light: lighting.fill_dir.extend(lighting.fill_intensity).to_array(),
                params: [if draw.lit { 1.0 } else { 0.0 }, lighting.ambient, 0.0, 0.0],
            };
            let offset = slot * self.stride as usize;
            let bytes = bytemuck::bytes_of(&uniforms);
            self.staging[offset..offset + bytes.len()].copy_from_slice(bytes);
            self.frame.push((draw.mesh, offset as u32));
        }

        if !self.staging.is_empty() {
            queue.write_buffer(&self.uniform_buffer, 0, &self.staging);
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        for &(mesh_id, offset) in &self.frame {
            let Some(mesh) = self.meshes.get(mesh_id.0) else {
                continue;
            };
            pass.set_bind_group(0, &self.bind_group, &[offset]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
