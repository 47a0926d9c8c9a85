//! Input handling: event types, key actions, and the interaction
//! controller that turns raw window events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Pointer capture state machine and key dispatch.
pub mod processor;

pub use event::{CursorMode, InputEvent, KeyState, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InteractionController;
