//! Tessellation parameters and the CPU patch tessellator.
//!
//! [`TessellationStore`] holds the three modes' term vectors and clamp
//! limits plus the current-mode selector. The [`level`] functions turn a
//! mode's terms into a per-edge subdivision level, and [`patch`] evaluates
//! bicubic patches into triangle and line meshes at those levels.

pub mod level;
pub mod patch;

use glam::Vec4;
pub use patch::{tessellate, PatchTessellator, TessellatedMesh, TessellatedVertex};
use serde::{Deserialize, Serialize};

use crate::math;
use crate::options::TessellationOptions;

/// How subdivision levels are chosen for each patch edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TessellationMode {
    /// The same level on every edge.
    #[default]
    Uniform,
    /// Level falls off with distance from the eye.
    Distance,
    /// Level follows the edge's projected length in pixels.
    Edge,
}

impl TessellationMode {
    /// All modes in index order.
    pub const ALL: [Self; 3] = [Self::Uniform, Self::Distance, Self::Edge];

    /// Stable index (0, 1, 2).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Uniform => 0,
            Self::Distance => 1,
            Self::Edge => 2,
        }
    }

    /// Mode for an index, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name for log output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Distance => "distance",
            Self::Edge => "edge",
        }
    }
}

/// Step and clamp range for a mode's adjustable level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeLimits {
    /// Amount added or removed per increase/decrease.
    pub step: f32,
    /// Lowest allowed level.
    pub min: f32,
    /// Highest allowed level.
    pub max: f32,
}

/// Terms and limits of one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeState {
    /// Shader terms. `x` is the adjustable level, `w` receives the
    /// viewport width every frame.
    pub terms: Vec4,
    /// Clamp limits for `terms.x`.
    pub limits: ModeLimits,
}

impl ModeState {
    fn step_level(&mut self, delta: f32) {
        self.terms.x =
            math::clamp(self.terms.x + delta, self.limits.min, self.limits.max);
    }
}

/// The three modes' parameters and which one is active.
///
/// `limits.min <= terms.x <= limits.max` holds for every mode after every
/// mutation. Switching modes never touches any mode's terms.
#[derive(Debug, Clone, PartialEq)]
pub struct TessellationStore {
    modes: [ModeState; 3],
    current: TessellationMode,
}

impl Default for TessellationStore {
    fn default() -> Self {
        Self::from_options(&TessellationOptions::default())
    }
}

impl TessellationStore {
    /// Build the store from configured presets.
    ///
    /// Initial levels outside their limits are clamped into range.
    #[must_use]
    pub fn from_options(options: &TessellationOptions) -> Self {
        let modes = TessellationMode::ALL.map(|mode| {
            let preset = options.preset(mode);
            let mut state = ModeState {
                terms: Vec4::from_array(preset.terms),
                limits: preset.limits,
            };
            if state.limits.min > state.limits.max {
                log::warn!(
                    "{} tessellation limits are inverted ({} > {}), swapping",
                    mode.name(),
                    state.limits.min,
                    state.limits.max
                );
                std::mem::swap(&mut state.limits.min, &mut state.limits.max);
            }
            state.step_level(0.0);
            state
        });
        Self {
            modes,
            current: options.initial_mode,
        }
    }

    /// The active mode.
    #[must_use]
    pub fn current(&self) -> TessellationMode {
        self.current
    }

    /// State of the active mode.
    #[must_use]
    pub fn current_state(&self) -> &ModeState {
        &self.modes[self.current.index()]
    }

    /// State of any mode.
    #[must_use]
    pub fn state(&self, mode: TessellationMode) -> &ModeState {
        &self.modes[mode.index()]
    }

    /// Terms of the active mode.
    #[must_use]
    pub fn current_terms(&self) -> Vec4 {
        self.current_state().terms
    }

    /// Raise the active mode's level by one step, clamped to its max.
    pub fn increase(&mut self) {
        let state = &mut self.modes[self.current.index()];
        state.step_level(state.limits.step);
        log::debug!("{} level -> {}", self.current.name(), state.terms.x);
    }

    /// Lower the active mode's level by one step, clamped to its min.
    pub fn decrease(&mut self) {
        let state = &mut self.modes[self.current.index()];
        state.step_level(-state.limits.step);
        log::debug!("{} level -> {}", self.current.name(), state.terms.x);
    }

    /// Make `mode` active. Nothing else changes.
    pub fn select(&mut self, mode: TessellationMode) {
        if mode != self.current {
            log::info!("tessellation mode: {}", mode.name());
        }
        self.current = mode;
    }

    /// Store the viewport width in the active mode's `terms.w`.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.modes[self.current.index()].terms.w = width;
    }
}
