//! Window runner: builder, event loop and the per-frame cycle.
//!
//! Each redraw runs one `advance_interaction` + `step`, turns the field into a
//! [`Frame`](crate::Frame), batches it and hands it to the GPU. Keyboard
//! shortcuts:
//!
//! | Key | Action |
//! |-----|--------|
//! | `T` | Toggle light/dark theme (saved to the preferences file) |
//! | `Space` | Pause / resume |
//! | `R` | Recreate the point set |
//! | `Escape` | Quit |

use crate::config::NetworkConfig;
use crate::error::SimulationError;
use crate::field::NetworkField;
use crate::gpu::{Batch, GpuState};
use crate::input::{Input, KeyCode, PointerEvent};
use crate::theme::{Preferences, Theme, ThemePalette};
use crate::time::FrameClock;
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// A windowed network background.
///
/// ```ignore
/// Simulation::new()
///     .with_config(NetworkConfig::node_network())
///     .with_theme(Theme::Light)
///     .run()?;
/// ```
pub struct Simulation {
    config: NetworkConfig,
    theme: Option<Theme>,
    title: String,
    window_size: (u32, u32),
    prefs_path: Option<PathBuf>,
}

impl Simulation {
    /// Create a new simulation with the particle preset.
    pub fn new() -> Self {
        Self {
            config: NetworkConfig::default(),
            theme: None,
            title: "netfield".to_string(),
            window_size: (1280, 720),
            prefs_path: None,
        }
    }

    pub fn with_config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    /// Force a theme. Without this the preferences file decides.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Where the theme preference is read from and saved to.
    pub fn with_preferences(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefs_path = Some(path.into());
        self
    }

    /// The theme the window will start with.
    pub fn initial_theme(&self) -> Theme {
        if let Some(theme) = self.theme {
            return theme;
        }
        match &self.prefs_path {
            Some(path) => match Preferences::load(path) {
                Ok(prefs) => prefs.theme,
                Err(e) => {
                    log::warn!("Ignoring preferences at {}: {}", path.display(), e);
                    Theme::default()
                }
            },
            None => Theme::default(),
        }
    }

    /// Run until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let theme = self.initial_theme();

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            window: None,
            gpu_state: None,
            field: None,
            input: Input::new(),
            clock: FrameClock::new(),
            batch: Batch::new(0, 0),
            theme,
            config: self.config,
            title: self.title,
            window_size: self.window_size,
            prefs_path: self.prefs_path,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    field: Option<NetworkField>,
    input: Input,
    clock: FrameClock,
    batch: Batch,
    theme: Theme,
    config: NetworkConfig,
    title: String,
    window_size: (u32, u32),
    prefs_path: Option<PathBuf>,
    // Set when start-up fails inside the event loop
    error: Option<SimulationError>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_size.0,
                self.window_size.1,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        let size = window.inner_size();
        let field = NetworkField::new(
            self.config.clone(),
            ThemePalette::for_theme(self.theme),
            size.width as f32,
            size.height as f32,
        );
        log::info!(
            "Started {}x{} with {} points ({:?} theme)",
            size.width,
            size.height,
            field.points().len(),
            self.theme
        );

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.field = Some(field);
        Ok(())
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Some(field) = &mut self.field {
            field.set_palette(ThemePalette::for_theme(self.theme));
        }
        log::info!("Theme set to {:?}", self.theme);

        if let Some(path) = &self.prefs_path {
            let prefs = Preferences { theme: self.theme };
            if let Err(e) = prefs.save(path) {
                log::warn!("Could not save preferences to {}: {}", path.display(), e);
            }
        }
    }

    fn handle_shortcuts(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
        }
        if self.input.key_pressed(KeyCode::T) {
            self.toggle_theme();
        }
        if self.input.key_pressed(KeyCode::Space) {
            let paused = self.clock.toggle_pause();
            log::debug!("{}", if paused { "Paused" } else { "Resumed" });
        }
        if self.input.key_pressed(KeyCode::R) {
            if let Some(field) = &mut self.field {
                field.reset();
                log::debug!("Reset to {} points", field.points().len());
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.handle_shortcuts(event_loop);

        let (Some(field), Some(gpu_state)) = (&mut self.field, &mut self.gpu_state) else {
            return;
        };

        for event in self.input.drain_pointer_events() {
            match event {
                PointerEvent::Down(pos) => field.pointer_down(pos),
                PointerEvent::Move(pos) => field.pointer_move(pos),
                PointerEvent::Up => field.pointer_up(),
                PointerEvent::Leave => field.pointer_leave(),
            }
        }

        if !self.clock.is_paused() {
            field.advance_interaction(dt);
            field.step();
        }
        if let Some(fps) = self.clock.take_fps_sample() {
            log::debug!("{:.1} fps, {} points, {} connections", fps, field.points().len(), field.connections().len());
        }

        self.batch.reset(gpu_state.config.width, gpu_state.config.height);
        if field.frame().paint(&mut self.batch) {
            match gpu_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    gpu_state.resize(winit::dpi::PhysicalSize {
                        width: gpu_state.config.width,
                        height: gpu_state.config.height,
                    })
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    event_loop.exit()
                }
                Err(e) => log::warn!("Dropped frame: {:?}", e),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(field) = &mut self.field {
                    field.resize(physical_size.width as f32, physical_size.height as f32);
                    log::debug!(
                        "Resized to {}x{} ({} points)",
                        physical_size.width,
                        physical_size.height,
                        field.points().len()
                    );
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                self.input.begin_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
