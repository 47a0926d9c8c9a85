//! Orbit camera model.
//!
//! The camera is a pure value type: spherical coordinates around a look-at
//! point, plus the derived eye position, view matrix and projection. It
//! owns no GPU resources; the frame composer reads it once per frame.

/// Spherical-coordinate orbit camera.
pub mod orbit;

pub use orbit::OrbitCamera;
