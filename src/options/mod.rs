//! Viewer configuration with TOML file support.
//!
//! Camera defaults, tessellation presets, key bindings and window settings
//! are consolidated here. Every section uses `#[serde(default)]`, so a
//! partial TOML file (e.g. only overriding `[camera]`) works.

mod camera;
mod keybindings;
mod tessellation;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
use serde::{Deserialize, Serialize};
pub use tessellation::{ModePreset, TessellationOptions};
pub use window::WindowOptions;

use crate::error::TessViewError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Initial camera state and projection.
    pub camera: CameraOptions,
    /// Per-mode tessellation presets.
    pub tessellation: TessellationOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
    /// Window and presentation settings.
    pub window: WindowOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TessViewError::Io`] if the file cannot be read and
    /// [`TessViewError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, TessViewError> {
        let content = std::fs::read_to_string(path).map_err(TessViewError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TessViewError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, TessViewError> {
        toml::from_str(content)
            .map_err(|e| TessViewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TessViewError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), TessViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TessViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TessViewError::Io)?;
        }
        std::fs::write(path, content).map_err(TessViewError::Io)
    }
}
