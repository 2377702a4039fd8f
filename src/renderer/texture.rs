//! Image decoding and texture upload

use crate::error::DemoError;

/// Decoded image in tightly packed RGBA8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// A 1x1 image of one colour
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }
}

/// Decode PNG or JPEG bytes (format sniffed from the header)
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, DemoError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    Ok(RgbaImage {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}

/// A sampled 2D texture
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl GpuTexture {
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Linear filtering, clamped: the sprites are drawn at arbitrary sizes
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (image.width, image.height),
        }
    }

    /// 1x1 texture of a single colour (placeholders, untextured quads)
    pub fn solid_color(device: &wgpu::Device, queue: &wgpu::Queue, rgba: [u8; 4], label: &str) -> Self {
        Self::from_rgba(device, queue, &RgbaImage::solid(rgba), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(img: &image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let img = image::RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 255, 0, 128])
            }
        });
        let decoded = decode_rgba(&encode(&img, image::ImageFormat::Png)).unwrap();

        assert_eq!(decoded.width, 2);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.pixels.len(), 2 * 2 * 4);
        assert_eq!(&decoded.pixels[0..4], &[255, 0, 0, 255]);
        assert_eq!(&decoded.pixels[4..8], &[0, 255, 0, 128]);
    }

    #[test]
    fn test_decode_jpeg_expands_to_rgba() {
        let rgb = image::RgbImage::from_pixel(8, 4, image::Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();

        let decoded = decode_rgba(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (8, 4));
        assert_eq!(decoded.pixels.len(), 8 * 4 * 4);
        assert!(decoded.pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let err = decode_rgba(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DemoError::Image(_)));
    }

    #[test]
    fn test_solid() {
        let img = RgbaImage::solid([100, 149, 237, 255]);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![100, 149, 237, 255]);
    }
}
