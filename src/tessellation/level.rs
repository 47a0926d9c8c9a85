//! Per-edge subdivision levels for each tessellation mode.
//!
//! Each function takes the two corner points of a patch edge in model
//! space and returns how many segments the edge should be split into.
//! Results are always within [`MIN_LEVEL`, `MAX_LEVEL`].

use glam::{Mat4, Vec3, Vec4};

use super::TessellationMode;

/// Lowest level any edge receives.
pub const MIN_LEVEL: f32 = 1.0;
/// Highest level any edge receives.
pub const MAX_LEVEL: f32 = 64.0;

/// Edge mode: pixels of projected length per unit of `terms.x / 1000`.
const EDGE_SCALE: f32 = 1000.0;

/// Frame transforms the level functions read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelFrame {
    /// Model-to-world transform.
    pub model: Mat4,
    /// Model-to-clip transform (OpenGL depth range).
    pub clip: Mat4,
    /// Eye position in world space.
    pub eye: Vec3,
}

/// Subdivision level for the edge `a`-`b` under `mode` with `terms`.
#[must_use]
pub fn edge_level(
    mode: TessellationMode,
    terms: Vec4,
    a: Vec3,
    b: Vec3,
    frame: &LevelFrame,
) -> f32 {
    let raw = match mode {
        TessellationMode::Uniform => uniform_level(terms),
        TessellationMode::Distance => distance_level(terms, a, b, frame),
        TessellationMode::Edge => screen_edge_level(terms, a, b, frame),
    };
    clamp_level(raw)
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        return MAX_LEVEL;
    }
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

fn uniform_level(terms: Vec4) -> f32 {
    terms.x
}

/// `x * z / (1 + y * dist)` where `dist` is the world-space distance
/// from the eye to the edge midpoint.
fn distance_level(terms: Vec4, a: Vec3, b: Vec3, frame: &LevelFrame) -> f32 {
    let mid = frame.model.transform_point3((a + b) * 0.5);
    let dist = (mid - frame.eye).length();
    terms.x * terms.z / (1.0 + terms.y * dist)
}

/// Projected length in pixels (`terms.w` is the viewport width) scaled by
/// `terms.x / 1000`.
fn screen_edge_level(terms: Vec4, a: Vec3, b: Vec3, frame: &LevelFrame) -> f32 {
    if terms.w <= 0.0 {
        return MAX_LEVEL;
    }
    let ca = frame.clip * a.extend(1.0);
    let cb = frame.clip * b.extend(1.0);
    // An endpoint at or behind the eye has no meaningful projection.
    if ca.w <= f32::EPSILON || cb.w <= f32::EPSILON {
        return MAX_LEVEL;
    }
    let na = ca.truncate() / ca.w;
    let nb = cb.truncate() / cb.w;
    let pixels = (na.truncate() - nb.truncate()).length() * 0.5 * terms.w;
    pixels * terms.x / EDGE_SCALE
}
