//! Core application state and lifecycle.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;

use kurbo::{Affine, Circle, Point, Size, Stroke};
use peniko::{Color, Fill};
use thumbstick_core::{JoystickEvent, JoystickWidget, PointerEvent, PointerTarget, PointerTracker};
use thumbstick_render::{Presenter, VelloSurface};
use vello::util::{RenderContext, RenderSurface};
use vello::wgpu::PresentMode;
use vello::Scene;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::{AppConfig, AppError};
use crate::movement::Marker;

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,
    presenter: Presenter,

    // Widget and its output
    joystick: JoystickWidget<VelloSurface>,
    joystick_events: Receiver<JoystickEvent>,
    pointer: PointerTracker,

    // Movement consumer
    marker: Marker,
    marker_radius: f64,
    marker_color: Color,
    last_step: Instant,
}

impl AppState {
    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn logical_size(&self) -> Size {
        let size = self.window.inner_size().to_logical::<f64>(self.scale_factor());
        Size::new(size.width, size.height)
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.scale_factor());
        Point::new(logical.x, logical.y)
    }

    fn dispatch(&mut self, event: PointerEvent) {
        if self.joystick.handle_pointer_event(event) {
            self.window.request_redraw();
        }
    }

    /// Drain joystick notifications and move the marker.
    fn update(&mut self) {
        for event in self.joystick_events.try_iter() {
            self.marker.apply(event);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_step).as_secs_f64();
        self.last_step = now;
        let bounds = self.logical_size();
        self.marker.step(dt, bounds);
    }

    /// Compose the joystick scene and the marker into one frame.
    fn build_frame(&self) -> Scene {
        let transform = Affine::scale(self.scale_factor());
        let mut frame = Scene::new();

        let marker = Circle::new(self.marker.position(), self.marker_radius);
        frame.fill(Fill::NonZero, transform, self.marker_color, None, &marker);
        frame.stroke(&Stroke::new(1.5), transform, Color::from_rgba8(30, 41, 59, 255), None, &marker);

        self.joystick.surface().append_to(&mut frame, Some(transform));
        frame
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<RenderContext>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Create the window, GPU surface and widget.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, String> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| format!("Failed to create window: {e}"))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(RenderContext::new);
        let surface: RenderSurface<'static> = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| format!("Failed to create surface: {e:?}"))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let presenter = Presenter::new(device, surface.config.format).map_err(|e| e.to_string())?;

        let logical = PhysicalSize::new(width, height).to_logical::<f64>(window.scale_factor());
        let logical = Size::new(logical.width, logical.height);
        let canvas = VelloSurface::new(logical).with_background(self.config.background());

        let (sender, joystick_events) = mpsc::channel();
        let mut joystick = JoystickWidget::from_config(canvas, &self.config.joystick);
        joystick.set_observer(move |event| {
            // The receiver only goes away with the app itself.
            let _ = sender.send(event);
        });
        joystick.attach_input_handlers();

        let marker = Marker::new(
            Point::new(logical.width / 2.0, logical.height / 2.0),
            self.config.marker_speed,
        );

        log::info!(
            "Thumbstick initialized - joystick at ({}, {}) radius {}",
            self.config.joystick.anchor.x,
            self.config.joystick.anchor.y,
            self.config.joystick.radius
        );

        Ok(AppState {
            window,
            surface,
            presenter,
            joystick,
            joystick_events,
            pointer: PointerTracker::new(),
            marker,
            marker_radius: self.config.marker_radius,
            marker_color: self.config.marker(),
            last_step: Instant::now(),
        })
    }

    fn redraw(&mut self) {
        let (Some(state), Some(render_cx)) = (self.state.as_mut(), self.render_cx.as_ref()) else {
            return;
        };

        state.update();
        let frame = state.build_frame();

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        if let Err(e) = state.presenter.present(
            &device_handle.device,
            &device_handle.queue,
            &frame,
            &surface_texture.texture,
            state.joystick.surface().background(),
        ) {
            log::error!("Failed to render: {e}");
            return;
        }
        surface_texture.present();

        if state.marker.is_moving() {
            state.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw();
            return;
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_ref() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                let logical = state.logical_size();
                state.joystick.surface_mut().resize(logical);
                state.joystick.render();
                state.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = state.to_logical(position);
                let event = state.pointer.moved(position);
                state.dispatch(event);
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match button_state {
                    ElementState::Pressed => state.pointer.pressed(),
                    ElementState::Released => state.pointer.released(),
                };
                if let Some(event) = event {
                    state.dispatch(event);
                }
            }
            _ => {}
        }
    }
}
