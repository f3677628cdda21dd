use std::path::Path;

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::display::{ImageDisplay, LoadedTexture, SwitchState};
use crate::geometry::QUAD_VERTEX_COUNT;
use crate::interaction::ShaderParameters;
use crate::types::{ImageSlot, ShaderSources};

use super::context::GpuContext;
use super::pipeline::FilterPipeline;
use super::texture::{decode_image, GpuTexture};
use super::uniforms::FilterUniforms;

const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Everything the frame loop needs on the GPU side.
pub(crate) struct GpuState {
    display: ImageDisplay<GpuTexture>,
    uniform_bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    pipeline: FilterPipeline,
    context: GpuContext,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        size: PhysicalSize<u32>,
        shaders: &ShaderSources,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size)?;
        let pipeline = FilterPipeline::new(&context, shaders)?;
        let device = &context.device;

        context.push_error_scope();
        let placeholder = GpuTexture::placeholder(device, &context.queue, &pipeline.texture_layout);
        let display = ImageDisplay::new(LoadedTexture {
            texture: placeholder,
            width: 1,
            height: 1,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("filter uniforms"),
            size: std::mem::size_of::<FilterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("filter uniform bind group"),
            layout: &pipeline.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: display.geometry().as_bytes(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        context.finish_setup_scope("geometry setup")?;

        Ok(Self {
            display,
            uniform_bind_group,
            uniform_buffer,
            vertex_buffer,
            pipeline,
            context,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Pixel size of the image on screen.
    pub(crate) fn extent(&self) -> (u32, u32) {
        self.display.extent()
    }

    /// Decodes and uploads the image at `path`. On failure the current image
    /// stays on screen.
    pub(crate) fn switch_image(&mut self, slot: ImageSlot, path: &Path) -> SwitchState {
        let context = &self.context;
        let layout = &self.pipeline.texture_layout;
        self.display.switch_with(slot, || {
            let image = decode_image(path)?;
            context.push_error_scope();
            let texture = GpuTexture::upload(
                &context.device,
                &context.queue,
                layout,
                &format!("image {slot}"),
                &image,
            );
            if let Some(error) = context.pop_error_scope("texture upload") {
                anyhow::bail!("failed to upload {}: {error}", path.display());
            }
            Ok(LoadedTexture {
                texture,
                width: image.width,
                height: image.height,
            })
        })
    }

    /// Draws one frame with `params` and presents it.
    pub(crate) fn render(&mut self, params: &ShaderParameters) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.context.push_error_scope();

        let uniforms = FilterUniforms::from_parameters(params);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, uniforms.as_bytes());
        self.context.queue.write_buffer(
            &self.vertex_buffer,
            0,
            self.display.geometry().as_bytes(),
        );

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOUR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.display.texture().bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTEX_COUNT as u32, 0..1);
        }
        self.context.queue.submit(Some(encoder.finish()));

        if self.context.pop_error_scope("frame").is_some() {
            debug!(slot = ?self.display.slot(), "frame recorded with GPU errors");
        }
        frame.present();
        Ok(())
    }
}
