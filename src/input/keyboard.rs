use serde::{Deserialize, Serialize};

use crate::tessellation::TessellationMode;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// increase_level = "ArrowUp"
/// select_edge = "Digit3"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Raise the active mode's level by one step.
    IncreaseLevel,
    /// Lower the active mode's level by one step.
    DecreaseLevel,
    /// Switch to uniform tessellation.
    SelectUniform,
    /// Switch to distance-based tessellation.
    SelectDistance,
    /// Switch to screen-space edge tessellation.
    SelectEdge,
}

impl KeyAction {
    /// The tessellation mode this action selects, if it is a mode switch.
    #[must_use]
    pub fn selected_mode(self) -> Option<TessellationMode> {
        match self {
            Self::SelectUniform => Some(TessellationMode::Uniform),
            Self::SelectDistance => Some(TessellationMode::Distance),
            Self::SelectEdge => Some(TessellationMode::Edge),
            Self::IncreaseLevel | Self::DecreaseLevel => None,
        }
    }
}
