use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::math::{self, FarPlane};
use crate::options::CameraOptions;

/// Pitch limit in degrees, symmetric around the horizon.
const PITCH_LIMIT_DEGREES: f32 = 80.0;
/// Bound on `|ln(distance)|`. Keeps the eye offset and its squared length
/// finite and nonzero in `f32`.
const LOG_DISTANCE_LIMIT: f32 = 30.0;

/// Orbit camera parameterized by spherical coordinates around a look-at
/// point.
///
/// `pitch` stays within +/-80 degrees, `yaw` stays within `[0, 2pi)` and
/// `distance` stays within `[e^-30, e^30]` no matter how many incremental
/// updates are applied, so the eye and view matrix stay finite.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    origin: Vec3,
    pitch: f32,
    yaw: f32,
    distance: f32,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane.
    pub far: FarPlane,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            distance: 10.0,
            fov: math::radians(60.0),
            near: 0.5,
            far: FarPlane::Infinite,
        }
    }
}

impl OrbitCamera {
    /// Build a camera from configured options.
    ///
    /// The initial angles and distance go through the same clamping as
    /// [`adjust`](Self::adjust), and a non-positive distance falls back to
    /// the default.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let defaults = Self::default();
        let distance = if options.distance > 0.0 && options.distance.is_finite()
        {
            options.distance.clamp(
                (-LOG_DISTANCE_LIMIT).exp(),
                LOG_DISTANCE_LIMIT.exp(),
            )
        } else {
            log::warn!(
                "ignoring non-positive camera distance {}",
                options.distance
            );
            defaults.distance
        };

        Self {
            pitch: clamp_pitch(math::radians(options.pitch_degrees)),
            yaw: wrap_yaw(math::radians(options.yaw_degrees)),
            distance,
            fov: math::radians(options.fov_degrees),
            near: options.near,
            far: options.far_plane(),
            ..defaults
        }
    }

    /// Look-at target.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Elevation above the horizon in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Heading around the vertical axis in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Distance from the eye to the look-at target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move the look-at target. Angles and distance are kept.
    pub fn reset(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Apply incremental pitch/yaw/distance changes.
    ///
    /// Pitch is clamped, yaw wraps into `[0, 2pi)`, and distance changes
    /// multiplicatively: `d_distance` is added to `ln(distance)`, so equal
    /// deltas scale the distance by equal ratios. `ln(distance)` saturates
    /// at +/-30.
    pub fn adjust(&mut self, d_pitch: f32, d_yaw: f32, d_distance: f32) {
        self.pitch = clamp_pitch(self.pitch + d_pitch);
        self.yaw = wrap_yaw(self.yaw + d_yaw);
        let log_distance = math::clamp(
            self.distance.ln() + d_distance,
            -LOG_DISTANCE_LIMIT,
            LOG_DISTANCE_LIMIT,
        );
        self.distance = log_distance.exp();
    }

    /// Eye position: spherical `(pitch, yaw, distance)` converted to
    /// Cartesian and offset from the look-at target.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.origin + self.eye_offset()
    }

    fn eye_offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            sin_yaw * cos_pitch * self.distance,
            sin_pitch * self.distance,
            cos_yaw * cos_pitch * self.distance,
        )
    }

    /// View matrix looking from [`eye`](Self::eye) at the target, +Y up.
    ///
    /// Equal to `make_lookat(eye, origin, +Y)`, built around the origin
    /// and then translated so a tiny offset is not lost against a large
    /// origin.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        math::make_lookat(self.eye_offset(), Vec3::ZERO, Vec3::Y)
            * math::make_translate(-self.origin)
    }

    /// Projection for a viewport of the given size. `height` must be
    /// positive.
    #[must_use]
    pub fn perspective(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height as f32;
        math::make_perspective(self.fov, aspect, self.near, self.far)
    }

    /// Camera part of the clip transform: `perspective * view`.
    #[must_use]
    pub fn xform(&self, width: u32, height: u32) -> Mat4 {
        self.perspective(width, height) * self.view()
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    let limit = math::radians(PITCH_LIMIT_DEGREES);
    math::clamp(pitch, -limit, limit)
}

fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = yaw.rem_euclid(TAU);
    // rem_euclid rounds up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn pitch_limit() -> f32 {
        math::radians(PITCH_LIMIT_DEGREES)
    }

    #[test]
    fn default_eye_sits_on_positive_z() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();
        assert!((eye - Vec3::new(0.0, 0.0, 10.0)).length() < EPS);
    }

    #[test]
    fn pitch_stays_clamped_for_any_delta() {
        let deltas = [0.0, 0.3, -0.3, 1.5, -1.5, 100.0, -100.0, 1.0e9, -1.0e9];
        for start in [-80.0_f32, -45.0, 0.0, 30.0, 80.0] {
            for &d in &deltas {
                let mut camera = OrbitCamera::default();
                camera.adjust(math::radians(start), 0.0, 0.0);
                camera.adjust(d, 0.0, 0.0);
                assert!(camera.pitch() >= -pitch_limit());
                assert!(camera.pitch() <= pitch_limit());
            }
        }
    }

    #[test]
    fn repeated_pitch_updates_saturate() {
        let mut camera = OrbitCamera::default();
        for _ in 0..1000 {
            camera.adjust(0.05, 0.0, 0.0);
        }
        assert_eq!(camera.pitch(), pitch_limit());
        for _ in 0..1000 {
            camera.adjust(-0.05, 0.0, 0.0);
        }
        assert_eq!(camera.pitch(), -pitch_limit());
    }

    #[test]
    fn yaw_wraps_into_full_turn() {
        let mut camera = OrbitCamera::default();
        let deltas = [0.7, -2.0, 13.0, -40.0, 1.0e-8, -1.0e-8, 6.2831855];
        for _ in 0..200 {
            for &d in &deltas {
                camera.adjust(0.0, d, 0.0);
                assert!(camera.yaw() >= 0.0, "yaw {}", camera.yaw());
                assert!(camera.yaw() < TAU, "yaw {}", camera.yaw());
            }
        }
    }

    #[test]
    fn negative_yaw_wraps_upward() {
        let mut camera = OrbitCamera::default();
        camera.adjust(0.0, -0.5, 0.0);
        assert!((camera.yaw() - (TAU - 0.5)).abs() < EPS);
    }

    #[test]
    fn distance_stays_positive() {
        let mut camera = OrbitCamera::default();
        for _ in 0..500 {
            camera.adjust(0.0, 0.0, -0.25);
            assert!(camera.distance() > 0.0);
        }
        for _ in 0..500 {
            camera.adjust(0.0, 0.0, 0.2);
            assert!(camera.distance() > 0.0);
        }
    }

    #[test]
    fn long_dolly_drags_keep_view_finite() {
        for origin in [Vec3::ZERO, Vec3::new(2.0, -3.0, 40.0)] {
            let mut camera = OrbitCamera::default();
            camera.reset(origin);
            camera.adjust(0.3, 1.1, 0.0);
            for _ in 0..200 {
                camera.adjust(0.0, 0.0, 1.0);
            }
            assert!(camera.distance().is_finite());
            assert!(camera.eye().is_finite());
            assert!(camera.view().is_finite());
            assert!((camera.distance().ln() - LOG_DISTANCE_LIMIT).abs() < 1e-3);

            for _ in 0..400 {
                camera.adjust(0.0, 0.0, -1.0);
            }
            assert!(camera.distance() > 0.0);
            assert!(camera.view().is_finite());
            assert!(camera.xform(800, 600).is_finite());
            assert!((camera.distance().ln() + LOG_DISTANCE_LIMIT).abs() < 1e-3);
        }
    }

    #[test]
    fn view_matches_lookat_from_eye() {
        let mut camera = OrbitCamera::default();
        camera.adjust(0.4, 2.3, -0.7);
        camera.reset(Vec3::new(1.0, -2.0, 0.5));
        let expected = math::make_lookat(camera.eye(), camera.origin(), Vec3::Y);
        assert!(camera.view().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn distance_round_trips_in_log_domain() {
        for d in [0.01_f32, 0.37, 1.0, -2.5] {
            let mut camera = OrbitCamera::default();
            let before = camera.distance();
            camera.adjust(0.0, 0.0, d);
            camera.adjust(0.0, 0.0, -d);
            assert!((camera.distance() - before).abs() < EPS * before);
        }
    }

    #[test]
    fn equal_deltas_scale_by_equal_ratios() {
        let mut camera = OrbitCamera::default();
        let d0 = camera.distance();
        camera.adjust(0.0, 0.0, 0.5);
        let d1 = camera.distance();
        camera.adjust(0.0, 0.0, 0.5);
        let d2 = camera.distance();
        assert!((d1 / d0 - d2 / d1).abs() < EPS);
        assert!((d1 / d0 - 0.5_f32.exp()).abs() < EPS);
    }

    #[test]
    fn xform_is_perspective_times_view() {
        let mut camera = OrbitCamera::default();
        camera.adjust(0.4, 2.3, -0.7);
        camera.reset(Vec3::new(1.0, -2.0, 0.5));
        for (w, h) in [(800, 600), (1920, 1080), (1, 1)] {
            assert_eq!(
                camera.xform(w, h),
                camera.perspective(w, h) * camera.view()
            );
        }
    }

    #[test]
    fn eye_follows_spherical_coordinates() {
        let mut camera = OrbitCamera::default();
        camera.adjust(math::radians(30.0), math::radians(90.0), 0.0);
        let eye = camera.eye();
        let d = camera.distance();
        let cos_p = math::radians(30.0).cos();
        assert!((eye.x - cos_p * d).abs() < EPS);
        assert!((eye.y - 0.5 * d).abs() < EPS);
        assert!(eye.z.abs() < EPS);
    }

    #[test]
    fn eye_is_offset_from_origin() {
        let mut camera = OrbitCamera::default();
        camera.reset(Vec3::new(2.0, 3.0, 4.0));
        let eye = camera.eye();
        assert!((eye - Vec3::new(2.0, 3.0, 14.0)).length() < EPS);

        // The view still maps the eye to the view-space origin.
        let at_eye = camera.view().transform_point3(eye);
        assert!(at_eye.length() < EPS);
    }

    #[test]
    fn options_are_clamped_like_adjust() {
        let options = CameraOptions {
            pitch_degrees: 120.0,
            yaw_degrees: -90.0,
            distance: -4.0,
            ..CameraOptions::default()
        };
        let camera = OrbitCamera::from_options(&options);
        assert_eq!(camera.pitch(), pitch_limit());
        assert!((camera.yaw() - math::radians(270.0)).abs() < EPS);
        assert_eq!(camera.distance(), OrbitCamera::default().distance());
    }

    #[test]
    fn default_options_match_default_camera() {
        let camera = OrbitCamera::from_options(&CameraOptions::default());
        assert_eq!(camera, OrbitCamera::default());
    }
}
