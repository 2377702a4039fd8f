//! wgpu rendering shared by every demo
//!
//! `GpuContext` owns the device and surface. The pipelines only record draws
//! into a render pass the context opens.

pub mod context;
pub mod mesh_pipeline;
pub mod pipeline;
pub mod sprite;
pub mod texture;
pub mod vertex;

pub use context::{GpuContext, clear_color};
pub use mesh_pipeline::{DrawLayer, Lighting, MeshDraw, MeshId, MeshRenderer};
pub use pipeline::ColorRenderer;
pub use sprite::{SpriteBatch, SpriteRenderer, TextureId};
pub use texture::{GpuTexture, RgbaImage, decode_rgba};
pub use vertex::{MeshVertex, SpriteVertex, Vertex, colors};
