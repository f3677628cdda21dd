use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{debug, error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowBuilder};

use crate::gpu::GpuState;
use crate::interaction::{Hotkey, InteractionState};
use crate::types::{ImageCatalog, RendererConfig};

/// GPU state, input state and the window they belong to.
pub(crate) struct WindowState {
    gpu: GpuState,
    interaction: InteractionState,
    images: ImageCatalog,
    window: Arc<Window>,
}

impl WindowState {
    pub(crate) fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let mut gpu = GpuState::new(window.as_ref(), size, &config.shaders)?;

        let initial = config.initial_image;
        gpu.switch_image(initial, config.images.path(initial));

        Ok(Self {
            gpu,
            interaction: InteractionState::new(),
            images: config.images.clone(),
            window,
        })
    }

    pub(crate) fn window(&self) -> &Window {
        self.window.as_ref()
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.interaction.close_requested()
    }

    pub(crate) fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if let Some(hotkey) = Hotkey::from_key_code(code) {
            debug!(?code, ?hotkey, "hotkey pressed");
            self.interaction.handle_hotkey(hotkey);
        }
    }

    /// One iteration of the frame loop: apply any requested image switch, fold
    /// pointer travel into the transform, then draw.
    pub(crate) fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Some(slot) = self.interaction.take_pending_image() {
            self.gpu.switch_image(slot, self.images.path(slot));
        }

        let extent = self.gpu.extent();
        self.interaction.advance_frame(extent);
        let params = self.interaction.shader_parameters(extent);
        self.gpu.render(&params)
    }
}

/// Opens the window and runs the event loop until the viewer is closed.
pub(crate) fn run_window(config: RendererConfig) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create viewer window: {err}"))?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window, &config)
        .map_err(|err| anyhow!("failed to initialise renderer: {err:#}"))?;
    info!(
        width = window_size.width,
        height = window_size.height,
        title = %config.title,
        "viewer ready"
    );

    event_loop.set_control_flow(ControlFlow::Wait);
    let run_result = event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
            match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    state.handle_key(&event);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    state.interaction.handle_cursor_moved(position);
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button,
                    ..
                } => {
                    state.interaction.handle_mouse_button(button, button_state);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    state.interaction.handle_scroll(delta);
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                }
                WindowEvent::RedrawRequested => {
                    if let Err(err) = state.render_frame() {
                        match err {
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                state.resize(state.size());
                            }
                            wgpu::SurfaceError::OutOfMemory => {
                                error!("surface out of memory; closing viewer");
                                elwt.exit();
                            }
                            wgpu::SurfaceError::Timeout => {
                                warn!("surface timeout; retrying next frame");
                            }
                            other => {
                                warn!("surface error: {other:?}; retrying next frame");
                            }
                        }
                    }
                    if state.close_requested() {
                        elwt.exit();
                    }
                }
                _ => {}
            }
        }
        Event::AboutToWait => {
            if state.close_requested() {
                elwt.exit();
            } else {
                state.window().request_redraw();
            }
        }
        _ => {}
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))?;
    info!("viewer closed");
    Ok(())
}
