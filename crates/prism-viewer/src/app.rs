use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use prism_engine::device::{SwapchainTarget, WgpuHost};
use prism_engine::pipeline::check_capability;
use prism_engine::{FrameProcedure, FrameStatus, RenderError, initialize};

use crate::config::ViewerConfig;

type Procedure = FrameProcedure<SwapchainTarget<'static>>;

/// Runs the event loop until the window closes or rendering fails.
pub fn run(config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut state = ViewerState::new(config);

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    match state.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct ViewerState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    /// `None` while the window is open without graphics capability.
    procedure: Option<Procedure>,
    fatal: Option<anyhow::Error>,
}

impl ViewerState {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            window: None,
            procedure: None,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(Arc::new(window))
    }

    /// `Ok(None)` when the host has no graphics capability.
    fn build_procedure(&self, window: Arc<Window>) -> Result<Option<Procedure>> {
        let frame_config = self.config.frame_config();
        let host = WgpuHost::new(&frame_config.device);

        // A surface needs a backend, so the capability check runs before it.
        if let Err(RenderError::CapabilityUnavailable) = check_capability(&host) {
            log::error!("{}; the window stays open without rendering", RenderError::CapabilityUnavailable);
            return Ok(None);
        }

        let size = window.inner_size();
        let surface = host
            .create_surface(window)
            .context("failed to create window surface")?;
        let target = SwapchainTarget::new(surface, size.width, size.height, &frame_config.device);

        let procedure = pollster::block_on(initialize(&host, target, frame_config))
            .context("failed to build the frame procedure")?;
        Ok(Some(procedure))
    }
}

impl ApplicationHandler for ViewerState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e),
        };

        match self.build_procedure(window.clone()) {
            Ok(procedure) => self.procedure = procedure,
            Err(e) => return self.fail(event_loop, e),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.procedure = None;
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(procedure) = self.procedure.as_mut() {
                    if let Err(e) = procedure.resize(size.width, size.height) {
                        return self.fail(event_loop, anyhow::Error::new(e).context("resize failed"));
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(procedure) = self.procedure.as_mut() else {
                    return;
                };

                match procedure.render_frame() {
                    Ok(FrameStatus::Submitted) => {}
                    // Reconfigured or timed out; try again on the next redraw.
                    Ok(FrameStatus::Skipped) => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("frame failed")),
                }
            }

            _ => {}
        }
    }
}
