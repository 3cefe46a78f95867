//! RGBA texture upload for quad sources.

use std::path::Path;

use wgpu::{Device, Extent3d, Queue, TextureDimension, TextureFormat, TextureUsages, TextureView};

use crate::error::{BlitError, Result};

/// A GPU texture usable as the quad's sampler source.
///
/// Pixels are stored as `Rgba8Unorm` so values pass through unconverted;
/// color-space handling happens in the quad's fragment stage.
pub struct Texture {
    #[allow(dead_code)] // Kept alive for GPU usage
    texture: wgpu::Texture,
    view: TextureView,
    width: u32,
    height: u32,
}

impl Texture {
    /// Upload tightly-packed RGBA8 pixels.
    pub fn from_rgba8(
        device: &Device,
        queue: &Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BlitError::Texture(format!(
                "zero-sized texture: {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BlitError::Texture(format!(
                "pixel buffer is {} bytes, expected {} for {width}x{height} RGBA",
                pixels.len(),
                expected
            )));
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Quad Source Texture"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            width,
            height,
        })
    }

    /// Decode an encoded image (PNG, JPEG) from memory and upload it.
    pub fn from_bytes(device: &Device, queue: &Queue, bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(device, queue, width, height, rgba.as_raw())
    }

    /// Load an image file and upload it.
    pub fn from_file(device: &Device, queue: &Queue, path: impl AsRef<Path>) -> Result<Self> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(device, queue, width, height, rgba.as_raw())
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
