//! Converts raw platform events into viewer commands.
//!
//! The `InteractionController` owns the pointer capture state (whether
//! drags are currently steering the camera, the last cursor position, and
//! which of the two designated buttons are held) and the key-binding map.
//! It never touches the camera or the window itself: it only returns
//! [`ViewerCommand`]s for the application to execute.

use super::event::{CursorMode, InputEvent, KeyState, MouseButton};
use crate::app::command::ViewerCommand;
use crate::input::KeyAction;
use crate::options::KeybindingOptions;

/// Pixels of drag per radian (orbit) or per e-fold of distance (dolly).
const DRAG_SENSITIVITY: f64 = 100.0;

/// Pointer capture state machine plus key dispatch.
///
/// Capture starts when the primary or secondary button goes down while
/// nothing is captured, and ends only once both are released. While
/// captured, cursor motion orbits the camera, or dollies it when the
/// secondary button is held.
///
/// # Usage
///
/// ```ignore
/// let cursor = ctx.cursor_position();
/// if let Some(cmd) = controller.handle_event(event, cursor) {
///     app.execute(cmd, ctx);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InteractionController {
    /// Whether pointer motion is currently steering the camera.
    captured: bool,
    /// Last cursor position seen while captured.
    last_cursor: (f64, f64),
    /// Whether the primary button is held.
    primary_held: bool,
    /// Whether the secondary button is held.
    secondary_held: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Create a controller with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a controller with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            captured: false,
            last_cursor: (0.0, 0.0),
            primary_held: false,
            secondary_held: false,
            key_bindings,
        }
    }

    /// Whether the pointer is captured.
    #[must_use]
    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Last cursor position recorded while captured.
    #[must_use]
    pub fn last_cursor(&self) -> (f64, f64) {
        self.last_cursor
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Process a pointer event and return zero or one commands.
    ///
    /// `cursor` is the window's current cursor position; it is only read
    /// when a button press starts a capture.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        cursor: (f64, f64),
    ) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed, cursor)
            }
        }
    }

    /// Map a key event through the bindings.
    ///
    /// Presses and auto-repeats trigger the bound action; releases are
    /// ignored, so one tap moves the level by exactly one step rather than
    /// once on press and again on release. Capture state is not involved.
    #[must_use]
    pub fn handle_key(&self, key: &str, state: KeyState) -> Option<ViewerCommand> {
        if state == KeyState::Released {
            return None;
        }
        let action = self.key_bindings.lookup(key)?;
        Some(match action {
            KeyAction::IncreaseLevel => ViewerCommand::IncreaseLevel,
            KeyAction::DecreaseLevel => ViewerCommand::DecreaseLevel,
            KeyAction::SelectUniform
            | KeyAction::SelectDistance
            | KeyAction::SelectEdge => {
                ViewerCommand::SelectMode(action.selected_mode()?)
            }
        })
    }

    /// Cursor moved: while captured, turn the delta into a camera command.
    fn handle_cursor_moved(&mut self, x: f64, y: f64) -> Option<ViewerCommand> {
        if !self.captured {
            return None;
        }

        let dx = x - self.last_cursor.0;
        let dy = y - self.last_cursor.1;
        self.last_cursor = (x, y);

        #[allow(clippy::cast_possible_truncation)]
        let command = if self.secondary_held {
            ViewerCommand::AdjustCamera {
                d_pitch: 0.0,
                d_yaw: 0.0,
                d_distance: (dy / DRAG_SENSITIVITY) as f32,
            }
        } else {
            ViewerCommand::AdjustCamera {
                d_pitch: (-dy / DRAG_SENSITIVITY) as f32,
                d_yaw: (dx / DRAG_SENSITIVITY) as f32,
                d_distance: 0.0,
            }
        };
        Some(command)
    }

    /// Button press/release: track held state and drive capture
    /// transitions.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        cursor: (f64, f64),
    ) -> Option<ViewerCommand> {
        match button {
            MouseButton::Left => self.primary_held = pressed,
            MouseButton::Right => self.secondary_held = pressed,
            MouseButton::Middle | MouseButton::Other => return None,
        }

        let any_held = self.primary_held || self.secondary_held;
        if any_held && !self.captured {
            self.captured = true;
            self.last_cursor = cursor;
            return Some(ViewerCommand::SetCursorMode(CursorMode::Locked));
        }
        if !any_held && self.captured {
            self.captured = false;
            return Some(ViewerCommand::SetCursorMode(CursorMode::Normal));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellation::TessellationMode;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: true,
        }
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: false,
        }
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    #[test]
    fn capture_needs_both_buttons_released() {
        let mut ctl = InteractionController::new();
        let origin = (0.0, 0.0);

        assert_eq!(
            ctl.handle_event(press(MouseButton::Left), origin),
            Some(ViewerCommand::SetCursorMode(CursorMode::Locked))
        );
        assert!(ctl.captured());

        // Second button while captured does not re-capture.
        assert_eq!(ctl.handle_event(press(MouseButton::Right), origin), None);
        assert!(ctl.captured());

        assert_eq!(ctl.handle_event(release(MouseButton::Left), origin), None);
        assert!(ctl.captured());

        assert_eq!(
            ctl.handle_event(release(MouseButton::Right), origin),
            Some(ViewerCommand::SetCursorMode(CursorMode::Normal))
        );
        assert!(!ctl.captured());
    }

    #[test]
    fn secondary_alone_captures() {
        let mut ctl = InteractionController::new();
        let cmd = ctl.handle_event(press(MouseButton::Right), (5.0, 5.0));
        assert_eq!(cmd, Some(ViewerCommand::SetCursorMode(CursorMode::Locked)));
        assert_eq!(ctl.last_cursor(), (5.0, 5.0));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut ctl = InteractionController::new();
        assert_eq!(ctl.handle_event(press(MouseButton::Middle), (0.0, 0.0)), None);
        assert_eq!(ctl.handle_event(press(MouseButton::Other), (0.0, 0.0)), None);
        assert!(!ctl.captured());
    }

    #[test]
    fn motion_without_capture_is_ignored() {
        let mut ctl = InteractionController::new();
        assert_eq!(ctl.handle_event(moved(100.0, 40.0), (0.0, 0.0)), None);
        assert_eq!(ctl.last_cursor(), (0.0, 0.0));
    }

    #[test]
    fn primary_drag_orbits() {
        let mut ctl = InteractionController::new();
        let _ = ctl.handle_event(press(MouseButton::Left), (10.0, 20.0));

        let cmd = ctl.handle_event(moved(60.0, 0.0), (0.0, 0.0));
        assert_eq!(
            cmd,
            Some(ViewerCommand::AdjustCamera {
                d_pitch: 0.2,
                d_yaw: 0.5,
                d_distance: 0.0,
            })
        );
        assert_eq!(ctl.last_cursor(), (60.0, 0.0));

        // Deltas are relative to the previous move, not the press.
        let cmd = ctl.handle_event(moved(60.0, 10.0), (0.0, 0.0));
        assert_eq!(
            cmd,
            Some(ViewerCommand::AdjustCamera {
                d_pitch: -0.1,
                d_yaw: 0.0,
                d_distance: 0.0,
            })
        );
    }

    #[test]
    fn secondary_drag_dollies() {
        let mut ctl = InteractionController::new();
        let _ = ctl.handle_event(press(MouseButton::Left), (0.0, 0.0));
        let _ = ctl.handle_event(press(MouseButton::Right), (0.0, 0.0));

        let cmd = ctl.handle_event(moved(30.0, 50.0), (0.0, 0.0));
        assert_eq!(
            cmd,
            Some(ViewerCommand::AdjustCamera {
                d_pitch: 0.0,
                d_yaw: 0.0,
                d_distance: 0.5,
            })
        );
    }

    #[test]
    fn recapture_resets_last_cursor() {
        let mut ctl = InteractionController::new();
        let _ = ctl.handle_event(press(MouseButton::Left), (0.0, 0.0));
        let _ = ctl.handle_event(moved(10.0, 10.0), (0.0, 0.0));
        let _ = ctl.handle_event(release(MouseButton::Left), (0.0, 0.0));

        let _ = ctl.handle_event(press(MouseButton::Left), (300.0, 200.0));
        let cmd = ctl.handle_event(moved(300.0, 200.0), (0.0, 0.0));
        assert_eq!(
            cmd,
            Some(ViewerCommand::AdjustCamera {
                d_pitch: 0.0,
                d_yaw: 0.0,
                d_distance: 0.0,
            })
        );
    }

    #[test]
    fn keys_map_through_bindings() {
        let ctl = InteractionController::new();
        assert_eq!(
            ctl.handle_key("ArrowUp", KeyState::Pressed),
            Some(ViewerCommand::IncreaseLevel)
        );
        assert_eq!(
            ctl.handle_key("ArrowDown", KeyState::Repeat),
            Some(ViewerCommand::DecreaseLevel)
        );
        assert_eq!(
            ctl.handle_key("Digit2", KeyState::Pressed),
            Some(ViewerCommand::SelectMode(TessellationMode::Distance))
        );
        assert_eq!(ctl.handle_key("ArrowUp", KeyState::Released), None);
        assert_eq!(ctl.handle_key("KeyQ", KeyState::Pressed), None);
    }

    #[test]
    fn keys_do_not_touch_capture() {
        let mut ctl = InteractionController::new();
        let _ = ctl.handle_event(press(MouseButton::Left), (0.0, 0.0));
        let _ = ctl.handle_key("Digit3", KeyState::Pressed);
        assert!(ctl.captured());
    }

    #[test]
    fn rebinding_takes_effect() {
        let mut ctl = InteractionController::new();
        ctl.key_bindings_mut()
            .bind(KeyAction::IncreaseLevel, "Equal");
        assert_eq!(
            ctl.handle_key("Equal", KeyState::Pressed),
            Some(ViewerCommand::IncreaseLevel)
        );
    }
}
