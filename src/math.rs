//! Linear algebra primitives for the camera and frame transforms.
//!
//! Vectors and matrices are glam's `Vec3`, `Vec4` and `Mat4`: plain value
//! types, with `Mat4` stored as four columns (column-major). `a * b` applied
//! to a column vector `v` means `a * (b * v)`.
//!
//! The `make_*` constructors spell out every matrix explicitly rather than
//! going through glam's helpers. The projection uses the OpenGL clip
//! convention (depth in `[-1, 1]`) and the axis rotations have a fixed
//! column layout that the frame transform depends on, so the exact numbers
//! are part of the contract.

pub use glam::{Mat4, Vec3, Vec4};

/// Convert degrees to radians.
#[inline]
#[must_use]
pub fn radians(degrees: f32) -> f32 {
    std::f32::consts::PI / 180.0 * degrees
}

/// Clamp `x` into `[min, max]`.
#[inline]
#[must_use]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Far clipping plane of a perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FarPlane {
    /// Finite far plane at the given distance.
    Finite(f32),
    /// Infinitely distant far plane.
    Infinite,
}

/// Right-handed perspective projection in the OpenGL clip convention.
///
/// `fov` is the vertical field of view in radians. The bottom row of the
/// matrix is `(0, 0, -1, 0)`, so clip `w` is the eye-space depth. With
/// [`FarPlane::Infinite`] the limit form is produced, which never divides by
/// `near - far`.
#[must_use]
#[rustfmt::skip]
pub fn make_perspective(fov: f32, aspect: f32, near: f32, far: FarPlane) -> Mat4 {
    let f = 1.0 / (fov / 2.0).tan();

    match far {
        FarPlane::Infinite => Mat4::from_cols_array(&[
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, -1.0, -1.0,
            0.0, 0.0, -2.0 * near, 0.0,
        ]),
        FarPlane::Finite(far) => {
            let range = near - far;
            Mat4::from_cols_array(&[
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) / range, -1.0,
                0.0, 0.0, 2.0 * far * near / range, 0.0,
            ])
        }
    }
}

/// Right-handed view matrix looking from `eye` toward `target`.
///
/// `eye` must differ from `target` and `up` must not be parallel to the
/// viewing direction; otherwise the basis is undefined (NaN).
#[must_use]
#[rustfmt::skip]
pub fn make_lookat(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (eye - target).normalize();
    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Mat4::from_cols_array(&[
        x_axis.x, y_axis.x, z_axis.x, 0.0,
        x_axis.y, y_axis.y, z_axis.y, 0.0,
        x_axis.z, y_axis.z, z_axis.z, 0.0,
        -x_axis.dot(eye), -y_axis.dot(eye), -z_axis.dot(eye), 1.0,
    ])
}

/// Non-uniform scale.
#[must_use]
#[rustfmt::skip]
pub fn make_scale(scale: Vec3) -> Mat4 {
    Mat4::from_cols_array(&[
        scale.x, 0.0, 0.0, 0.0,
        0.0, scale.y, 0.0, 0.0,
        0.0, 0.0, scale.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Translation by `offset`.
#[must_use]
#[rustfmt::skip]
pub fn make_translate(offset: Vec3) -> Mat4 {
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        offset.x, offset.y, offset.z, 1.0,
    ])
}

/// Rotation about the X axis. A quarter turn carries +Z onto +Y, which is
/// what stands a z-up asset upright.
#[must_use]
#[rustfmt::skip]
pub fn make_rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation about the Y axis.
#[must_use]
#[rustfmt::skip]
pub fn make_rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        c, 0.0, -s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation about the Z axis.
#[must_use]
#[rustfmt::skip]
pub fn make_rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Combined rotation `Rz(angles.z) * Ry(angles.y) * Rx(angles.x)`.
///
/// X is applied first and Z last. Changing the order changes the result.
#[must_use]
pub fn make_rotate(angles: Vec3) -> Mat4 {
    let x = make_rotate_x(angles.x);
    let y = make_rotate_y(angles.y);
    let z = make_rotate_z(angles.z);
    z * y * x
}
