use super::command::ViewerCommand;
use super::context::{EventHandler, RenderBackend, RenderError, WindowContext};
use crate::camera::OrbitCamera;
use crate::frame::{FrameComposer, RenderDescriptor};
use crate::input::{InputEvent, InteractionController, KeyState, MouseButton};
use crate::mesh::PatchMesh;
use crate::options::Options;
use crate::tessellation::TessellationStore;

/// The application: owns the camera, tessellation parameters, interaction
/// state and the patch mesh, and turns window events into frames.
pub struct TessApp {
    camera: OrbitCamera,
    tessellation: TessellationStore,
    controller: InteractionController,
    composer: FrameComposer,
    mesh: PatchMesh,
}

impl TessApp {
    /// Application for the built-in surface.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self::with_mesh(options, PatchMesh::builtin())
    }

    /// Application for a custom patch mesh.
    #[must_use]
    pub fn with_mesh(options: &Options, mesh: PatchMesh) -> Self {
        let camera = OrbitCamera::from_options(&options.camera);
        log::info!(
            "tessview: {} patches, {} control points",
            mesh.patch_count(),
            mesh.control_points().len()
        );
        Self {
            camera,
            tessellation: TessellationStore::from_options(&options.tessellation),
            controller: InteractionController::with_key_bindings(
                options.keybindings.clone(),
            ),
            composer: FrameComposer::new(&mesh.bounds()),
            mesh,
        }
    }

    /// The orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Tessellation parameters.
    #[must_use]
    pub fn tessellation(&self) -> &TessellationStore {
        &self.tessellation
    }

    /// Pointer capture state and key bindings.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The patch mesh being viewed.
    #[must_use]
    pub fn mesh(&self) -> &PatchMesh {
        &self.mesh
    }

    /// Apply one command.
    pub fn execute(&mut self, command: ViewerCommand, ctx: &mut dyn WindowContext) {
        match command {
            ViewerCommand::AdjustCamera {
                d_pitch,
                d_yaw,
                d_distance,
            } => self.camera.adjust(d_pitch, d_yaw, d_distance),
            ViewerCommand::SetCursorMode(mode) => ctx.set_cursor_mode(mode),
            ViewerCommand::IncreaseLevel => self.tessellation.increase(),
            ViewerCommand::DecreaseLevel => self.tessellation.decrease(),
            ViewerCommand::SelectMode(mode) => self.tessellation.select(mode),
        }
    }

    /// Build this frame's descriptor from the current state.
    pub fn compose_frame(&mut self, ctx: &dyn WindowContext) -> RenderDescriptor {
        self.composer
            .compose(&self.camera, &mut self.tessellation, ctx.viewport_size())
    }

    /// Compose the frame and hand it to `backend`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`RenderError`].
    pub fn render(
        &mut self,
        ctx: &dyn WindowContext,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), RenderError> {
        let frame = self.compose_frame(ctx);
        backend.draw(&frame, &self.mesh)
    }

    fn dispatch(&mut self, ctx: &mut dyn WindowContext, event: InputEvent) {
        let cursor = ctx.cursor_position();
        if let Some(command) = self.controller.handle_event(event, cursor) {
            self.execute(command, ctx);
        }
    }
}

impl EventHandler for TessApp {
    fn cursor_moved(&mut self, ctx: &mut dyn WindowContext, x: f64, y: f64) {
        self.dispatch(ctx, InputEvent::CursorMoved { x, y });
    }

    fn mouse_button(
        &mut self,
        ctx: &mut dyn WindowContext,
        button: MouseButton,
        pressed: bool,
    ) {
        self.dispatch(ctx, InputEvent::MouseButton { button, pressed });
    }

    fn key(&mut self, ctx: &mut dyn WindowContext, key: &str, state: KeyState) {
        if let Some(command) = self.controller.handle_key(key, state) {
            self.execute(command, ctx);
        }
    }

    fn framebuffer_resized(
        &mut self,
        _ctx: &mut dyn WindowContext,
        width: u32,
        height: u32,
    ) {
        // The viewport is re-read from the context every frame.
        log::debug!("framebuffer resized to {width}x{height}");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::frame::{FILL_PASS, LINE_PASS};
    use crate::input::CursorMode;
    use crate::tessellation::TessellationMode;

    struct MockWindow {
        cursor: (f64, f64),
        size: (u32, u32),
        modes: Vec<CursorMode>,
    }

    impl MockWindow {
        fn new() -> Self {
            Self {
                cursor: (0.0, 0.0),
                size: (800, 600),
                modes: Vec::new(),
            }
        }
    }

    impl WindowContext for MockWindow {
        fn cursor_position(&self) -> (f64, f64) {
            self.cursor
        }

        fn viewport_size(&self) -> (u32, u32) {
            self.size
        }

        fn set_cursor_mode(&mut self, mode: CursorMode) {
            self.modes.push(mode);
        }
    }

    #[derive(Default)]
    struct RecordingBackend {
        frames: Vec<RenderDescriptor>,
        fail: bool,
    }

    impl RenderBackend for RecordingBackend {
        fn draw(
            &mut self,
            frame: &RenderDescriptor,
            _mesh: &PatchMesh,
        ) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::Fatal("device lost".into()));
            }
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    fn app() -> TessApp {
        TessApp::new(&Options::default())
    }

    #[test]
    fn initial_frame_uses_defaults() {
        let mut app = app();
        let win = MockWindow::new();
        let frame = app.compose_frame(&win);
        assert!((frame.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert_eq!(frame.mode, TessellationMode::Uniform);
        assert_eq!(frame.terms.w, 800.0);
        assert_eq!(frame.passes, [FILL_PASS, LINE_PASS]);
    }

    #[test]
    fn drag_orbits_then_releases_cursor() {
        let mut app = app();
        let mut win = MockWindow::new();
        win.cursor = (100.0, 100.0);

        app.mouse_button(&mut win, MouseButton::Left, true);
        assert_eq!(win.modes, vec![CursorMode::Locked]);

        app.cursor_moved(&mut win, 150.0, 80.0);
        assert!((app.camera().yaw() - 0.5).abs() < 1e-5);
        assert!((app.camera().pitch() - 0.2).abs() < 1e-5);

        app.mouse_button(&mut win, MouseButton::Left, false);
        assert_eq!(win.modes, vec![CursorMode::Locked, CursorMode::Normal]);

        // Moves after release leave the camera alone.
        let before = app.camera().clone();
        app.cursor_moved(&mut win, 400.0, 400.0);
        assert_eq!(app.camera(), &before);
    }

    #[test]
    fn secondary_drag_dollies() {
        let mut app = app();
        let mut win = MockWindow::new();
        app.mouse_button(&mut win, MouseButton::Right, true);
        app.cursor_moved(&mut win, 0.0, 100.0);
        let expected = 10.0 * 1.0_f32.exp();
        assert!((app.camera().distance() - expected).abs() < 1e-3);
        assert_eq!(app.camera().pitch(), 0.0);
    }

    #[test]
    fn keys_change_level_and_mode() {
        let mut app = app();
        let mut win = MockWindow::new();

        app.key(&mut win, "ArrowDown", KeyState::Pressed);
        assert_eq!(app.tessellation().current_terms().x, 1.0);

        app.key(&mut win, "Digit3", KeyState::Pressed);
        app.key(&mut win, "ArrowUp", KeyState::Pressed);
        app.key(&mut win, "ArrowUp", KeyState::Repeat);
        app.key(&mut win, "ArrowUp", KeyState::Released);
        assert_eq!(app.tessellation().current(), TessellationMode::Edge);
        assert_eq!(app.tessellation().current_terms().x, 202.0);

        let frame = app.compose_frame(&win);
        assert_eq!(frame.mode, TessellationMode::Edge);
        assert_eq!(frame.terms.x, 202.0);
        assert!(win.modes.is_empty());
    }

    #[test]
    fn render_forwards_to_backend() {
        let mut app = app();
        let mut win = MockWindow::new();
        let mut backend = RecordingBackend::default();

        app.render(&win, &mut backend).unwrap();
        win.size = (1024, 768);
        app.render(&win, &mut backend).unwrap();

        assert_eq!(backend.frames.len(), 2);
        assert_eq!(backend.frames[0].terms.w, 800.0);
        assert_eq!(backend.frames[1].terms.w, 1024.0);
        assert_eq!(backend.frames[1].viewport, (1024, 768));
    }

    #[test]
    fn render_propagates_backend_errors() {
        let mut app = app();
        let win = MockWindow::new();
        let mut backend = RecordingBackend {
            fail: true,
            ..RecordingBackend::default()
        };
        let err = app.render(&win, &mut backend).unwrap_err();
        assert!(matches!(err, RenderError::Fatal(_)));
    }

    #[test]
    fn options_seed_initial_state() {
        let mut options = Options::default();
        options.camera.distance = 4.0;
        options.tessellation.initial_mode = TessellationMode::Distance;
        let app = TessApp::new(&options);
        assert_eq!(app.camera().distance(), 4.0);
        assert_eq!(app.tessellation().current(), TessellationMode::Distance);
    }
}
