//! Interfaces between the application core and its collaborators.
//!
//! The window adapter implements [`WindowContext`] and drives an
//! [`EventHandler`]; the graphics backend implements [`RenderBackend`].
//! The core never names a concrete window or GPU type.

use std::fmt;

use crate::frame::RenderDescriptor;
use crate::input::{CursorMode, KeyState, MouseButton};
use crate::mesh::PatchMesh;

/// Window services available to event handlers.
pub trait WindowContext {
    /// Current cursor position in physical pixels.
    fn cursor_position(&self) -> (f64, f64);
    /// Framebuffer size in physical pixels, each at least 1.
    fn viewport_size(&self) -> (u32, u32);
    /// Show/free or hide/lock the cursor.
    fn set_cursor_mode(&mut self, mode: CursorMode);
}

/// Receives window events. Each call gets the window context explicitly.
pub trait EventHandler {
    /// Cursor moved to `(x, y)`.
    fn cursor_moved(&mut self, ctx: &mut dyn WindowContext, x: f64, y: f64);
    /// Mouse button pressed or released.
    fn mouse_button(
        &mut self,
        ctx: &mut dyn WindowContext,
        button: MouseButton,
        pressed: bool,
    );
    /// Key event. `key` is the physical key name (e.g. `"ArrowUp"`).
    fn key(&mut self, ctx: &mut dyn WindowContext, key: &str, state: KeyState);
    /// Framebuffer resized.
    fn framebuffer_resized(
        &mut self,
        ctx: &mut dyn WindowContext,
        width: u32,
        height: u32,
    );
}

/// Failure to draw a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The frame was skipped but rendering can continue.
    Skipped(String),
    /// Rendering cannot continue.
    Fatal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(msg) => write!(f, "frame skipped: {msg}"),
            Self::Fatal(msg) => write!(f, "render failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Draws one frame from a descriptor.
pub trait RenderBackend {
    /// Issue both passes of `frame` against `mesh`, using the level
    /// function selected by `frame.mode`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the frame could not be drawn.
    fn draw(
        &mut self,
        frame: &RenderDescriptor,
        mesh: &PatchMesh,
    ) -> Result<(), RenderError>;
}
