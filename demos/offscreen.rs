//! Blits a generated checkerboard to an offscreen target and writes the
//! result to `offscreen.png`.

use quadblit::{BlendMode, GpuContext, Matrix4, OffscreenTarget, Texture, TexturedQuad};

const TARGET_SIZE: u32 = 512;
const CHECKER_SIZE: u32 = 256;

fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if on { 220 } else { 40 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

fn main() -> quadblit::Result<()> {
    env_logger::init();

    let ctx = GpuContext::new()?;
    let format = wgpu::TextureFormat::Rgba8Unorm;
    let target = OffscreenTarget::new(&ctx.device, TARGET_SIZE, TARGET_SIZE, format);

    let mut quad = TexturedQuad::new(
        ctx.device.clone(),
        ctx.queue.clone(),
        format,
        BlendMode::None,
    )?;

    let pixels = checkerboard(CHECKER_SIZE, 32);
    let texture = Texture::from_rgba8(&ctx.device, &ctx.queue, CHECKER_SIZE, CHECKER_SIZE, &pixels)?;
    quad.set_texture(&texture);
    quad.set_texture_linear(true);
    quad.set_texture_exposure(1.5);

    let view = Matrix4::look_at([0.0, -2.0, -10.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    let model = Matrix4::rotate([0.0, 1.0, 0.0], 0.5);
    let proj = Matrix4::perspective(25.0_f32.to_radians(), 0.1, 20.0, 1.0);
    quad.set_mvp(proj.matmul(&view).matmul(&model));

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Offscreen Encoder"),
        });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Offscreen Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        quad.draw(&mut render_pass);
    }
    ctx.queue.submit(std::iter::once(encoder.finish()));

    let pixels = target.read_back(&ctx.device, &ctx.queue)?;
    let image = image::RgbaImage::from_raw(TARGET_SIZE, TARGET_SIZE, pixels)
        .expect("readback size mismatch");
    image.save("offscreen.png")?;
    println!("Wrote offscreen.png");

    Ok(())
}
