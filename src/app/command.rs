//! The viewer's complete interactive vocabulary.
//!
//! Pointer drags and key presses are turned into `ViewerCommand`s by the
//! [`InteractionController`](crate::input::InteractionController) and
//! executed by [`TessApp::execute`](super::TessApp::execute).

use crate::input::CursorMode;
use crate::tessellation::TessellationMode;

/// Every state change the viewer can perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Camera ──
    /// Incremental orbit/dolly: radians of pitch and yaw, and a change of
    /// `ln(distance)`.
    AdjustCamera {
        /// Pitch delta in radians.
        d_pitch: f32,
        /// Yaw delta in radians.
        d_yaw: f32,
        /// Log-distance delta.
        d_distance: f32,
    },

    // ── Window ──
    /// Ask the window to show/free or hide/lock the cursor.
    SetCursorMode(CursorMode),

    // ── Tessellation ──
    /// Raise the active mode's level by one step.
    IncreaseLevel,
    /// Lower the active mode's level by one step.
    DecreaseLevel,
    /// Switch the active tessellation mode.
    SelectMode(TessellationMode),
}
