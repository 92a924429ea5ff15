//! GPU presentation of a Vello scene onto a window surface.

use peniko::Color;
use vello::wgpu;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};

use crate::renderer::{RenderResult, RendererError};

/// Renders scenes to an intermediate texture and blits them to the window.
///
/// Vello's compute shaders need an `Rgba8Unorm` storage texture, while the
/// window surface is often `Bgra8Unorm`, hence the blit.
pub struct Presenter {
    renderer: vello::Renderer,
    blitter: wgpu::util::TextureBlitter,
}

impl Presenter {
    /// Create a presenter for a surface with the given texture format.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> RenderResult<Self> {
        let renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{e:?}")))?;
        let blitter = wgpu::util::TextureBlitter::new(device, surface_format);
        log::info!("Vello presenter ready for {surface_format:?}");
        Ok(Self { renderer, blitter })
    }

    /// Render `scene` over `base_color` into `target`.
    pub fn present(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        target: &wgpu::Texture,
        base_color: Color,
    ) -> RenderResult<()> {
        let width = target.width();
        let height = target.height();
        if width == 0 || height == 0 {
            return Err(RendererError::Surface(format!("zero-sized target {width}x{height}")));
        }

        let render_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };
        self.renderer
            .render_to_texture(device, queue, scene, &render_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{e:?}")))?;

        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        self.blitter.copy(device, &mut encoder, &render_view, &target_view);
        queue.submit(std::iter::once(encoder.finish()));

        Ok(())
    }
}
