//! The drawable area of the window: its surface and depth buffer.

use crate::context::Context;
use std::sync::Arc;
use winit::window::Window;

/// A window surface configured for rendering, with a depth buffer of matching size.
pub struct Canvas {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
}

impl Canvas {
    /// Configures `surface` for `window`.
    pub fn new(ctxt: &Context, window: Arc<Window>, surface: wgpu::Surface<'static>) -> Self {
        let surface_caps = surface.get_capabilities(&ctxt.adapter);

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: ctxt.surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctxt.device, &surface_config);

        let depth_view = Self::create_depth_view(&ctxt.device, width, height);

        Canvas {
            window,
            surface,
            surface_config,
            depth_view,
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        // wgpu rejects zero-sized textures.
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Context::depth_format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Reconfigures the surface and depth buffer after the window was resized.
    ///
    /// Zero sizes (minimized window) are ignored.
    pub fn resize(&mut self, ctxt: &Context, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&ctxt.device, &self.surface_config);

        self.depth_view = Self::create_depth_view(&ctxt.device, width, height);
    }

    /// Configures the surface again with its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self, ctxt: &Context) {
        self.surface.configure(&ctxt.device, &self.surface_config);
    }

    /// Gets the current surface texture for rendering.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// The depth buffer view.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// The size of the surface in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Asks the windowing system for another frame.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
