//! The textured quad: fixed geometry, uniform state, and the draw call.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, BufferUsages, Device, Queue, RenderPass, RenderPipeline,
    Sampler, TextureFormat, TextureView,
};

use crate::error::{BlitError, Result};
use crate::pipeline::{self, BlendMode};
use crate::texture::Texture;
use crate::transform::Matrix4;
use crate::vertex::{QUAD_INDICES, QUAD_VERTICES};

/// Transform applied until the first `set_mvp` call. The hosting widget
/// system's X-flip reflection, kept verbatim (including the negative zero)
/// rather than normalized to identity.
pub const DEFAULT_MVP: Matrix4 = Matrix4 {
    data: [
        -1.0, 0.0, 0.0, 0.0, // row 0
        0.0, 1.0, 0.0, -0.0, // row 1
        0.0, 0.0, 1.0, 0.0, // row 2
        0.0, 0.0, 0.0, 1.0, // row 3
    ],
};

/// GPU mirror of the quad's uniform state. Layout matches the WGSL
/// `QuadUniforms` struct (std140-style, padded to a 16-byte multiple).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadUniforms {
    /// Column-major model-view-projection matrix
    pub mvp: [[f32; 4]; 4],
    /// Non-zero when the source texture holds linear-light values
    pub texture_linear: u32,
    /// Exposure multiplier applied to RGB before any encoding
    pub texture_exposure: f32,
    pub _pad: [f32; 2],
}

impl Default for QuadUniforms {
    fn default() -> Self {
        Self {
            mvp: DEFAULT_MVP.to_cols(),
            texture_linear: 0,
            texture_exposure: 1.0,
            _pad: [0.0; 2],
        }
    }
}

/// Draws a texture as a quad covering the full clip volume (or a
/// transformed sub-region via the MVP), with optional linear-to-sRGB
/// conversion and exposure scaling.
///
/// Geometry and index buffers are fixed for the quad's lifetime; only the
/// uniforms and the texture binding vary. All methods must be called from
/// the thread owning the GPU context.
pub struct TexturedQuad {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: RenderPipeline,
    texture_bind_group_layout: BindGroupLayout,
    sampler: Sampler,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    uniform_buffer: Buffer,
    uniform_bind_group: BindGroup,
    texture_bind_group: Option<BindGroup>,

    // Source of truth for the uniform state; uploads are one-way and the
    // getters never read back from the GPU.
    mvp: Matrix4,
    texture_linear: bool,
    texture_exposure: f32,
}

impl TexturedQuad {
    /// Create a quad drawing into targets of the given format.
    ///
    /// Fails if shader validation fails; no partial object is returned.
    pub fn new(
        device: Arc<Device>,
        queue: Arc<Queue>,
        format: TextureFormat,
        blend_mode: BlendMode,
    ) -> Result<Self> {
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let uniform_layout = pipeline::create_uniform_bind_group_layout(&device);
        let texture_bind_group_layout = pipeline::create_texture_bind_group_layout(&device);
        let render_pipeline = pipeline::create_quad_pipeline(
            &device,
            format,
            blend_mode,
            &uniform_layout,
            &texture_bind_group_layout,
        );
        if let Some(err) = pollster::block_on(error_scope.pop()) {
            return Err(BlitError::Shader(err.to_string()));
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: BufferUsages::INDEX,
        });

        let uniforms = QuadUniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quad Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            device,
            queue,
            pipeline: render_pipeline,
            texture_bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group: None,
            mvp: DEFAULT_MVP,
            texture_linear: false,
            texture_exposure: 1.0,
        })
    }

    /// Bind a texture to the sampler slot.
    ///
    /// The caller keeps ownership; the quad only holds the binding. Content
    /// is not validated here — problems surface at draw time through wgpu's
    /// own error reporting.
    pub fn set_texture(&mut self, texture: &Texture) {
        self.set_texture_view(texture.view());
    }

    /// Bind an arbitrary texture view (e.g. another pass's render target).
    pub fn set_texture_view(&mut self, view: &TextureView) {
        self.texture_bind_group = Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));
    }

    /// Overwrite the transform uniform. Degenerate matrices are accepted
    /// and simply produce degenerate output.
    pub fn set_mvp(&mut self, mvp: Matrix4) {
        self.mvp = mvp;
        self.upload_uniforms();
    }

    /// The last transform set, or the default reflection matrix.
    pub fn mvp(&self) -> Matrix4 {
        self.mvp
    }

    /// Mark the source texture as holding linear-light values, enabling the
    /// sRGB encode in the fragment stage.
    pub fn set_texture_linear(&mut self, linear: bool) {
        self.texture_linear = linear;
        self.upload_uniforms();
    }

    pub fn texture_linear(&self) -> bool {
        self.texture_linear
    }

    /// Set the exposure multiplier. Unclamped; negative or very large
    /// values are accepted.
    pub fn set_texture_exposure(&mut self, exposure: f32) {
        self.texture_exposure = exposure;
        self.upload_uniforms();
    }

    pub fn texture_exposure(&self) -> f32 {
        self.texture_exposure
    }

    fn upload_uniforms(&self) {
        let uniforms = self.uniforms();
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Snapshot of the uniform state as uploaded to the GPU.
    pub fn uniforms(&self) -> QuadUniforms {
        QuadUniforms {
            mvp: self.mvp.to_cols(),
            texture_linear: self.texture_linear as u32,
            texture_exposure: self.texture_exposure,
            _pad: [0.0; 2],
        }
    }

    /// Issue a single indexed draw of the quad's 6 indices.
    ///
    /// The render pass borrow is the drawing scope; it is released on every
    /// exit path when the borrow ends. Skips with a warning if no texture
    /// has been bound yet.
    pub fn draw<'a>(&'a self, render_pass: &mut RenderPass<'a>) {
        let Some(texture_bind_group) = &self.texture_bind_group else {
            log::warn!("TexturedQuad::draw called before set_texture; skipping");
            return;
        };

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_bind_group(1, texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        // Must match the WGSL QuadUniforms struct
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 80);
        assert_eq!(std::mem::offset_of!(QuadUniforms, texture_linear), 64);
        assert_eq!(std::mem::offset_of!(QuadUniforms, texture_exposure), 68);
    }

    #[test]
    fn test_default_uniforms() {
        let u = QuadUniforms::default();
        assert_eq!(u.texture_linear, 0);
        assert_eq!(u.texture_exposure, 1.0);
        assert_eq!(Matrix4::from_cols(u.mvp), DEFAULT_MVP);
    }

    #[test]
    fn test_default_mvp_flips_x() {
        let [x, y, z] = DEFAULT_MVP.transform_point([1.0, 1.0, 1.0]);
        assert_eq!(x, -1.0);
        assert_eq!(y, 1.0);
        assert_eq!(z, 1.0);
    }

    #[test]
    fn test_default_mvp_is_not_identity() {
        assert!(!DEFAULT_MVP.is_identity());
    }
}
