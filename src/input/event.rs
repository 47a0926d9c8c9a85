/// Platform-agnostic input events.
///
/// The viewer translates raw window events into these and feeds them to
/// the [`InteractionController`](super::InteractionController). Keys are
/// handled separately through
/// [`handle_key`](super::InteractionController::handle_key) because they
/// carry a key string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f64,
        /// Vertical position in physical pixels.
        y: f64,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button. Drags orbit the camera.
    Left,
    /// Secondary (right) mouse button. Drags dolly the camera.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button.
    Other,
}

/// State carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key went down.
    Pressed,
    /// Key went up.
    Released,
    /// Auto-repeat while the key is held.
    Repeat,
}

/// Pointer presentation requested from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorMode {
    /// Visible, free-moving cursor.
    #[default]
    Normal,
    /// Hidden cursor locked to the window; motion arrives as relative
    /// deltas.
    Locked,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}
