use serde::{Deserialize, Serialize};

use crate::math::FarPlane;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Initial orbit camera state and projection parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance. Omitted means an infinite far plane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub far: Option<f32>,
    /// Initial elevation in degrees (clamped to +/-80).
    pub pitch_degrees: f32,
    /// Initial heading in degrees.
    pub yaw_degrees: f32,
    /// Initial distance from the look-at target.
    pub distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.5,
            far: None,
            pitch_degrees: 0.0,
            yaw_degrees: 0.0,
            distance: 10.0,
        }
    }
}

impl CameraOptions {
    /// The configured far plane.
    #[must_use]
    pub fn far_plane(&self) -> FarPlane {
        self.far.map_or(FarPlane::Infinite, FarPlane::Finite)
    }
}
