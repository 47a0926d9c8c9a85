//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use tessview::Viewer;
//! Viewer::builder()
//!     .with_title("Tessellation sample")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    app::{EventHandler, RenderError, TessApp, WindowContext},
    error::TessViewError,
    gpu::{DiagnosticSink, GpuBackend},
    input::{CursorMode, KeyState, MouseButton},
    mesh::PatchMesh,
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    mesh: Option<PatchMesh>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options and the built-in surface.
    fn new() -> Self {
        Self {
            options: Options::default(),
            mesh: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// View a custom patch mesh instead of the built-in surface.
    #[must_use]
    pub fn with_mesh(mut self, mesh: PatchMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Set the window title, overriding `options.window.title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options;
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer {
            options,
            mesh: self.mesh.unwrap_or_else(PatchMesh::builtin),
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays a patch mesh.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    mesh: PatchMesh,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the backend reports a fatal diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`TessViewError::Backend`] for a fatal backend diagnostic,
    /// [`TessViewError::Gpu`] if the device cannot be initialized, and
    /// [`TessViewError::Viewer`] for window or event-loop failures.
    pub fn run(self) -> Result<(), TessViewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TessViewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            app: TessApp::with_mesh(&self.options, self.mesh),
            options: self.options,
            surface: None,
            backend: None,
            exit_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TessViewError::Viewer(e.to_string()))?;

        match app.exit_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ── Window context ───────────────────────────────────────────────────────

/// Clamp a window size to a usable viewport.
fn viewport_size(inner: PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// The window plus the cursor state the app reads through
/// [`WindowContext`].
///
/// While the pointer is locked the platform stops reporting absolute
/// positions, so relative motion is accumulated into a virtual cursor.
/// Platforms without a true lock (X11, Windows) fall back to confining the
/// cursor, where one drag is limited to the window extent.
struct ViewerWindow {
    window: Arc<Window>,
    cursor: (f64, f64),
    grab: CursorGrabMode,
}

impl ViewerWindow {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            cursor: (0.0, 0.0),
            grab: CursorGrabMode::None,
        }
    }

    /// Relative motion drives the cursor only under a true lock.
    fn uses_relative_motion(&self) -> bool {
        self.grab == CursorGrabMode::Locked
    }

    fn lock_cursor(&mut self) {
        let grab = [CursorGrabMode::Locked, CursorGrabMode::Confined]
            .into_iter()
            .find(|&mode| match self.window.set_cursor_grab(mode) {
                Ok(()) => true,
                Err(e) => {
                    log::debug!("cursor grab {mode:?} unavailable: {e}");
                    false
                }
            });
        match grab {
            Some(mode) => self.grab = mode,
            None => {
                log::warn!("cursor cannot be grabbed; dragging stays unconfined");
                self.grab = CursorGrabMode::None;
            }
        }
        self.window.set_cursor_visible(false);
    }

    fn release_cursor(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("failed to release cursor grab: {e}");
        }
        self.grab = CursorGrabMode::None;
        self.window.set_cursor_visible(true);
    }
}

impl WindowContext for ViewerWindow {
    fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    fn viewport_size(&self) -> (u32, u32) {
        viewport_size(self.window.inner_size())
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        match mode {
            CursorMode::Locked => self.lock_cursor(),
            CursorMode::Normal => self.release_cursor(),
        }
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    app: TessApp,
    options: Options,
    surface: Option<ViewerWindow>,
    backend: Option<GpuBackend>,
    exit_error: Option<TessViewError>,
}

fn key_state(event: &KeyEvent) -> KeyState {
    match (event.state, event.repeat) {
        (ElementState::Released, _) => KeyState::Released,
        (ElementState::Pressed, true) => KeyState::Repeat,
        (ElementState::Pressed, false) => KeyState::Pressed,
    }
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: TessViewError) {
        self.exit_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(surface), Some(backend)) =
            (&self.surface, &mut self.backend)
        else {
            return;
        };
        match self.app.render(surface, backend) {
            Ok(()) => surface.window.request_redraw(),
            Err(RenderError::Skipped(msg)) => {
                log::debug!("{msg}");
                surface.window.request_redraw();
            }
            Err(RenderError::Fatal(msg)) => {
                let error = backend.diagnostics().fatal().cloned().map_or_else(
                    || TessViewError::Viewer(msg),
                    TessViewError::Backend,
                );
                self.fail(event_loop, error);
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        let window_options = &self.options.window;
        let attrs = Window::default_attributes()
            .with_title(&window_options.title)
            .with_inner_size(LogicalSize::new(
                window_options.width,
                window_options.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, TessViewError::Viewer(e.to_string()));
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let backend = pollster::block_on(GpuBackend::new(
            window.clone(),
            size,
            window_options,
            DiagnosticSink::new(),
        ));
        match backend {
            Ok(backend) => self.backend = Some(backend),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        window.request_redraw();
        self.surface = Some(ViewerWindow::new(window));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(surface) = &mut self.surface else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = viewport_size(size);
                if let Some(backend) = &mut self.backend {
                    backend.resize(width, height);
                }
                self.app.framebuffer_resized(surface, width, height);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::MouseInput { button, state, .. } => {
                self.app.mouse_button(
                    surface,
                    MouseButton::from(button),
                    state == ElementState::Pressed,
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                if surface.uses_relative_motion() {
                    return;
                }
                surface.cursor = (position.x, position.y);
                self.app.cursor_moved(surface, position.x, position.y);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                self.app.key(surface, &key, key_state(&event));
            }

            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if !surface.uses_relative_motion() {
                return;
            }
            let (x, y) = (surface.cursor.0 + dx, surface.cursor.1 + dy);
            surface.cursor = (x, y);
            self.app.cursor_moved(surface, x, y);
        }
    }
}
