//! Textured quads in pixel space
//!
//! `SpriteBatch` is plain CPU data so scene code can build and test it
//! without a GPU. `SpriteRenderer` owns the pipeline and one bind group per
//! registered texture.

use std::ops::Range;

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::texture::GpuTexture;
use super::vertex::SpriteVertex;
use crate::sim::Rect;

/// Index into the renderer's texture table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

impl TextureId {
    /// The 1x1 white texture every renderer registers first
    pub const WHITE: TextureId = TextureId(0);
}

/// Quads collected for one frame, grouped into per-texture draw ranges
#[derive(Debug, Clone)]
pub struct SpriteBatch {
    viewport: Vec2,
    vertices: Vec<SpriteVertex>,
    draws: Vec<(TextureId, Range<u32>)>,
}

impl SpriteBatch {
    /// `viewport` is the pixel size mapped onto the whole surface
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
            draws: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Pixel coordinates (y down) to NDC (y up)
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x / self.viewport.x * 2.0 - 1.0,
            1.0 - p.y / self.viewport.y * 2.0,
        )
    }

    /// Quad covering `rect`, sampling the whole texture
    pub fn push_quad(&mut self, rect: Rect, texture: TextureId, tint: [f32; 4]) {
        self.push_quad_uv(rect, [0.0, 0.0, 1.0, 1.0], texture, tint);
    }

    /// Quad covering `rect`, sampling `uv = [u0, v0, u1, v1]`
    pub fn push_quad_uv(&mut self, rect: Rect, uv: [f32; 4], texture: TextureId, tint: [f32; 4]) {
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return;
        }

        let tl = self.to_ndc(rect.pos);
        let br = self.to_ndc(rect.pos + rect.size);
        let [u0, v0, u1, v1] = uv;

        let corner = |x: f32, y: f32, u: f32, v: f32| SpriteVertex {
            position: [x, y],
            uv: [u, v],
            color: tint,
        };
        let top_left = corner(tl.x, tl.y, u0, v0);
        let top_right = corner(br.x, tl.y, u1, v0);
        let bottom_left = corner(tl.x, br.y, u0, v1);
        let bottom_right = corner(br.x, br.y, u1, v1);

        let start = self.vertices.len() as u32;
        // Two CCW triangles
        self.vertices.extend_from_slice(&[
            top_left,
            bottom_left,
            top_right,
            top_right,
            bottom_left,
            bottom_right,
        ]);
        let end = self.vertices.len() as u32;

        match self.draws.last_mut() {
            Some((last, range)) if *last == texture && range.end == start => range.end = end,
            _ => self.draws.push((texture, start..end)),
        }
    }

    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    pub fn draws(&self) -> &[(TextureId, Range<u32>)] {
        &self.draws
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }
}

struct TextureSlot {
    /// Owned so the texture lives as long as its bind group
    _texture: GpuTexture,
    bind_group: wgpu::BindGroup,
}

pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    textures: Vec<TextureSlot>,
    vertex_buffer: Option<wgpu::Buffer>,
    draws: Vec<(TextureId, Range<u32>)>,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SpriteVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let mut renderer = Self {
            pipeline,
            bind_group_layout,
            textures: Vec::new(),
            vertex_buffer: None,
            draws: Vec::new(),
        };
        let white = GpuTexture::solid_color(device, queue, [255; 4], "white");
        let id = renderer.add_texture(device, white);
        debug_assert_eq!(id, TextureId::WHITE);
        renderer
    }

    fn bind_group(&self, device: &wgpu::Device, texture: &GpuTexture) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    pub fn add_texture(&mut self, device: &wgpu::Device, texture: GpuTexture) -> TextureId {
        let bind_group = self.bind_group(device, &texture);
        self.textures.push(TextureSlot {
            _texture: texture,
            bind_group,
        });
        TextureId(self.textures.len() - 1)
    }

    /// Swap the texture behind `id` (placeholder replaced by a loaded image)
    pub fn replace_texture(&mut self, device: &wgpu::Device, id: TextureId, texture: GpuTexture) {
        let bind_group = self.bind_group(device, &texture);
        match self.textures.get_mut(id.0) {
            Some(slot) => {
                slot._texture = texture;
                slot.bind_group = bind_group;
            }
            None => log::warn!("replace_texture: unknown texture {:?}", id),
        }
    }

    /// Upload a frame's batch; `draw` replays it
    pub fn prepare(&mut self, device: &wgpu::Device, batch: &SpriteBatch) {
        self.draws.clear();
        if batch.is_empty() {
            self.vertex_buffer = None;
            return;
        }
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sprite_vertex_buffer"),
            contents: bytemuck::cast_slice(batch.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.draws.extend(batch.draws().iter().cloned());
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(buffer) = &self.vertex_buffer else {
            return;
        };
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, buffer.slice(..));
        for (texture, range) in &self.draws {
            let Some(slot) = self.textures.get(texture.0) else {
                continue;
            };
            pass.set_bind_group(0, &slot.bind_group, &[]);
            pass.draw(range.clone(), 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> SpriteBatch {
        SpriteBatch::new(Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_to_ndc_corners() {
        let b = batch();
        assert_eq!(b.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(b.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(b.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_quad_vertices_cover_rect() {
        let mut b = batch();
        b.push_quad(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            TextureId::WHITE,
            [1.0; 4],
        );
        assert_eq!(b.quad_count(), 1);

        let xs: Vec<f32> = b.vertices().iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = b.vertices().iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }

    #[test]
    fn test_quad_triangles_are_ccw() {
        let mut b = batch();
        b.push_quad(Rect::new(10.0, 20.0, 30.0, 40.0), TextureId(1), [1.0; 4]);
        for tri in b.vertices().chunks(3) {
            let a = Vec2::from(tri[0].position);
            let b2 = Vec2::from(tri[1].position);
            let c = Vec2::from(tri[2].position);
            assert!((b2 - a).perp_dot(c - a) > 0.0);
        }
    }

    #[test]
    fn test_top_left_samples_texture_origin() {
        let mut b = batch();
        b.push_quad(Rect::new(0.0, 0.0, 800.0, 600.0), TextureId(1), [1.0; 4]);
        let top_left = b
            .vertices()
            .iter()
            .find(|v| v.position == [-1.0, 1.0])
            .unwrap();
        assert_eq!(top_left.uv, [0.0, 0.0]);
    }

    #[test]
    fn test_consecutive_quads_share_a_draw() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        b.push_quad(r, TextureId(1), [1.0; 4]);
        b.push_quad(r, TextureId(1), [1.0; 4]);
        b.push_quad(r, TextureId::WHITE, [1.0; 4]);
        b.push_quad(r, TextureId(1), [1.0; 4]);

        let draws = b.draws();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0], (TextureId(1), 0..12));
        assert_eq!(draws[1], (TextureId::WHITE, 12..18));
        assert_eq!(draws[2], (TextureId(1), 18..24));
    }

    #[test]
    fn test_empty_rect_is_skipped() {
        let mut b = batch();
        b.push_quad(Rect::new(5.0, 5.0, 0.0, 10.0), TextureId::WHITE, [1.0; 4]);
        assert!(b.is_empty());
        assert!(b.draws().is_empty());
    }

    #[test]
    fn test_tint_is_carried() {
        let mut b = batch();
        let tint = [0.2, 0.4, 0.6, 0.8];
        b.push_quad(Rect::new(0.0, 0.0, 1.0, 1.0), TextureId::WHITE, tint);
        assert!(b.vertices().iter().all(|v| v.color == tint));
    }

    #[test]
    fn test_clear() {
        let mut b = batch();
        b.push_quad(Rect::new(0.0, 0.0, 1.0, 1.0), TextureId::WHITE, [1.0; 4]);
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.quad_count(), 0);
    }

    #[test]
    fn test_clear_keeps_viewport_mapping() {
        let mut b = batch();
        b.push_quad(Rect::new(0.0, 0.0, 1.0, 1.0), TextureId::WHITE, [1.0; 4]);
        b.clear();
        assert_eq!(b.viewport(), Vec2::new(800.0, 600.0));
        assert_eq!(b.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }
}
