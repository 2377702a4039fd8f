//! Geometry and transforms for the demos
//!
//! Pure CPU code: meshes, cameras, per-frame model matrices, 2D shapes and
//! the shooter's sprite layout. Nothing here touches the GPU.

pub mod camera;
pub mod mesh;
pub mod shapes;
pub mod shooter_view;
pub mod spin;
pub mod triangle;

pub use camera::Camera;
pub use mesh::{MeshData, colored_cube, plane, pyramid, solid_box};
pub use shooter_view::{SpriteSet, build_batch, health_bar_color};
pub use spin::{OrbitTransforms, cube_model, orbit_scene, pyramid_model};
pub use triangle::{TriangleSpec, hello_triangle};
