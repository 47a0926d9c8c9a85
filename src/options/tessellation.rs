use serde::{Deserialize, Serialize};

use crate::tessellation::{ModeLimits, TessellationMode};

/// Initial terms and clamp limits for one tessellation mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ModePreset {
    /// Shader terms; `x` is the adjustable level.
    pub terms: [f32; 4],
    /// Step and clamp range applied to `terms[0]`.
    pub limits: ModeLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Per-mode tessellation presets and the mode active at startup.
pub struct TessellationOptions {
    /// Mode selected when the viewer starts.
    pub initial_mode: TessellationMode,
    /// Same level everywhere.
    pub uniform: ModePreset,
    /// Level falls off with distance from the eye.
    pub distance: ModePreset,
    /// Level follows projected edge length on screen.
    pub edge: ModePreset,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            initial_mode: TessellationMode::Uniform,
            uniform: ModePreset {
                terms: [1.0, 0.0, 0.0, 0.0],
                limits: ModeLimits {
                    step: 0.1,
                    min: 1.0,
                    max: 20.0,
                },
            },
            distance: ModePreset {
                terms: [1.0, 0.05, 5.0, 0.0],
                limits: ModeLimits {
                    step: 0.1,
                    min: 1.0,
                    max: 12.0,
                },
            },
            edge: ModePreset {
                terms: [200.0, 0.0, 0.0, 0.0],
                limits: ModeLimits {
                    step: 1.0,
                    min: 1.0,
                    max: 400.0,
                },
            },
        }
    }
}

impl TessellationOptions {
    /// Preset for the given mode.
    #[must_use]
    pub fn preset(&self, mode: TessellationMode) -> &ModePreset {
        match mode {
            TessellationMode::Uniform => &self.uniform,
            TessellationMode::Distance => &self.distance,
            TessellationMode::Edge => &self.edge,
        }
    }
}
