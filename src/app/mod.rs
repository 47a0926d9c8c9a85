//! Application core: state ownership, command execution and the
//! interfaces to the window and graphics backend.
//!
//! [`TessApp`] is the single event handler. It receives window events
//! through [`EventHandler`], turns them into [`ViewerCommand`]s via the
//! interaction controller, and composes one [`RenderDescriptor`] per frame
//! for a [`RenderBackend`].
//!
//! [`RenderDescriptor`]: crate::frame::RenderDescriptor

pub mod command;
pub mod context;
mod core;

pub use command::ViewerCommand;
pub use context::{EventHandler, RenderBackend, RenderError, WindowContext};
pub use self::core::TessApp;
