//! Error type shared by demo setup and asset loading

use thiserror::Error;

/// Failures that abort a demo during setup, or a single asset load
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element #{0} not found")]
    CanvasNotFound(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("unknown demo '{0}'")]
    UnknownDemo(String),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid value for '{field}': {value:?}")]
    InvalidInput { field: &'static str, value: String },
}
