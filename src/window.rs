//! Windowed host: winit event loop + wgpu presentation.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::animation::Animation;
use crate::config::KaleidoscopeConfig;
use crate::error::RunError;
use crate::gpu::GpuRenderer;
use crate::kaleidoscope::Kaleidoscope;
use crate::scheduler::WindowScheduler;
use crate::surface::DrawList;
use crate::time::FrameClock;

const TITLE: &str = "Kaleidoscope";

/// Open a window and run the animation until it is closed.
pub fn run(config: KaleidoscopeConfig) -> Result<(), RunError> {
    let kaleidoscope = Kaleidoscope::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(kaleidoscope);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    pending_kaleidoscope: Option<Kaleidoscope>,
    animation: Option<Animation<WindowScheduler>>,
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    draw_list: DrawList,
    clock: FrameClock,
    error: Option<RunError>,
}

impl App {
    fn new(kaleidoscope: Kaleidoscope) -> Self {
        let config = kaleidoscope.config();
        let draw_list = DrawList::new(config.width, config.height, kaleidoscope.background());
        Self {
            pending_kaleidoscope: Some(kaleidoscope),
            animation: None,
            window: None,
            renderer: None,
            draw_list,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let Some(kaleidoscope) = self.pending_kaleidoscope.take() else {
            return Ok(());
        };
        let config = kaleidoscope.config();
        let canvas = Vec2::new(config.width, config.height);

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = pollster::block_on(GpuRenderer::new(window.clone(), canvas))?;

        let mut animation = Animation::new(kaleidoscope, WindowScheduler::new(window.clone()));
        animation.start(&mut self.draw_list);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.animation = Some(animation);
        Ok(())
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&self.draw_list) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }
    }

    fn report_fps(&mut self) {
        self.clock.tick();
        if !self.clock.report_due() {
            return;
        }
        let fps = self.clock.fps();
        if let Some(window) = &self.window {
            window.set_title(&format!("{} - {:.0} FPS", TITLE, fps));
        }
        if let Some(animation) = &self.animation {
            let stats = animation.last_stats();
            log::info!(
                "frame {}: {:.1} fps, {} particles, {} paints",
                animation.frames_rendered(),
                fps,
                stats.particles,
                stats.paints
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(animation) = &mut self.animation {
                    animation.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                let ticked = match &mut self.animation {
                    Some(animation) => animation.tick(&mut self.draw_list),
                    None => false,
                };
                self.present(event_loop);
                if ticked {
                    self.report_fps();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drops the pending frame handle before the window goes away.
        self.animation = None;
    }
}
