//! The `winit` application driving the demo.

use crate::camera::{Camera3d, OrbitCamera3d};
use crate::context::Context;
use crate::demo::{ClickTracker, DisassemblyDemo};
use crate::error::DemoError;
use crate::event::{Action, Key, WindowEvent};
use crate::light::Lighting;
use crate::options::DemoOptions;
use crate::renderer::BlockRenderer;
use crate::window::Canvas;
use glamx::Vec2;
use std::sync::Arc;
use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// GPU state, available once the window exists.
struct Graphics {
    ctxt: Context,
    canvas: Canvas,
    renderer: BlockRenderer,
}

struct App {
    options: DemoOptions,
    demo: DisassemblyDemo,
    camera: OrbitCamera3d,
    lighting: Lighting,
    clicks: ClickTracker,
    gfx: Option<Graphics>,
    last_frame: Instant,
    error: Option<DemoError>,
}

impl App {
    fn new(options: DemoOptions, demo: DisassemblyDemo) -> Self {
        Self {
            camera: OrbitCamera3d::from_options(&options.camera),
            lighting: Lighting::from_options(&options.lighting),
            options,
            demo,
            clicks: ClickTracker::default(),
            gfx: None,
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics, DemoError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.options.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.options.window.width as f64,
                self.options.window.height as f64,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let (ctxt, surface) = pollster::block_on(Context::new(window.clone()))?;
        let canvas = Canvas::new(&ctxt, window, surface);
        let renderer = BlockRenderer::new(&ctxt);

        let (width, height) = canvas.size();
        self.camera.set_viewport(width, height);

        Ok(Graphics {
            ctxt,
            canvas,
            renderer,
        })
    }

    fn handle_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) {
        match event {
            WindowEvent::Close | WindowEvent::Key(Key::Escape, Action::Press) => {
                event_loop.exit();
                return;
            }
            WindowEvent::FramebufferSize(width, height) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.canvas.resize(&gfx.ctxt, width, height);
                }
            }
            _ => {}
        }

        self.camera.handle_event(&event);

        if let Some(click) = self.clicks.handle_event(&event) {
            let Some(gfx) = self.gfx.as_ref() else {
                return;
            };
            let (width, height) = gfx.canvas.size();
            let viewport = Vec2::new(width as f32, height as f32);
            self.demo.handle_click(click, viewport, &self.camera);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.camera.update(dt);

        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.canvas.reconfigure(&gfx.ctxt);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout while acquiring the next frame");
            }
            Err(other) => {
                log::error!("Unexpected surface error: {:?}", other);
            }
        }

        if let Some(gfx) = self.gfx.as_ref() {
            gfx.canvas.request_redraw();
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(gfx) = self.gfx.as_mut() else {
            return Ok(());
        };

        let frame = gfx.canvas.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx.ctxt.create_command_encoder(Some("frame_encoder"));

        {
            let bg = self.options.window.background();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blocks_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: gfx.canvas.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            gfx.renderer.render(
                &gfx.ctxt,
                &self.camera,
                &self.lighting,
                self.demo.registry().objects(),
                &mut render_pass,
            );
        }

        gfx.ctxt.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(gfx) => {
                gfx.canvas.request_redraw();
                self.last_frame = Instant::now();
                self.gfx = Some(gfx);
            }
            Err(e) => {
                log::error!("Failed to initialize graphics: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        match event {
            WinitWindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(event) = WindowEvent::from_winit(&other) {
                    self.handle_event(event_loop, event);
                }
            }
        }
    }
}

/// Opens the window and runs the demo described by `options` until the window closes.
///
/// # Errors
/// Fails if `options` are invalid, if the blocks cannot be created, or if no window or
/// GPU device is available.
pub fn run(options: DemoOptions) -> Result<(), DemoError> {
    let demo = DisassemblyDemo::from_options(&options)?;
    run_demo(options, demo)
}

/// Like [`run`], with an already set up demo, e.g. one with a custom removal rule.
///
/// The blocks of `options` are ignored in favor of those of `demo`.
pub fn run_demo(options: DemoOptions, demo: DisassemblyDemo) -> Result<(), DemoError> {
    options.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(options, demo);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionsError;

    #[test]
    fn invalid_options_fail_before_opening_a_window() {
        let mut options = DemoOptions::default();
        options.camera.znear = 0.0;

        match run(options) {
            Err(DemoError::Options(OptionsError::Invalid(message))) => {
                assert!(message.contains("znear"))
            }
            other => panic!("expected an options error, got {other:?}"),
        }
    }
}
