//! A textured quad blitter built on wgpu.
//!
//! [`TexturedQuad`] draws a texture as a full-screen quad (or a transformed
//! sub-region via its MVP matrix) into a window surface or an
//! [`OffscreenTarget`], with optional linear-to-sRGB conversion and
//! exposure scaling applied in the fragment stage.
//!
//! ```no_run
//! use quadblit::{BlendMode, GpuContext, OffscreenTarget, Texture, TexturedQuad};
//!
//! # fn main() -> quadblit::Result<()> {
//! let ctx = GpuContext::new()?;
//! let format = wgpu::TextureFormat::Rgba8Unorm;
//! let target = OffscreenTarget::new(&ctx.device, 512, 512, format);
//!
//! let mut quad = TexturedQuad::new(
//!     ctx.device.clone(),
//!     ctx.queue.clone(),
//!     format,
//!     BlendMode::None,
//! )?;
//! let texture = Texture::from_rgba8(&ctx.device, &ctx.queue, 1, 1, &[255, 0, 0, 255])?;
//! quad.set_texture(&texture);
//! quad.set_texture_exposure(2.0);
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod quad;
pub mod texture;
pub mod transform;
pub mod vertex;

pub use context::{GpuContext, OffscreenTarget, SurfaceState};
pub use error::{BlitError, Result};
pub use pipeline::BlendMode;
pub use quad::{QuadUniforms, TexturedQuad};
pub use texture::Texture;
pub use transform::Matrix4;
