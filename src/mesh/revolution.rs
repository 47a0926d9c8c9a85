use glam::{Vec2, Vec3};

use super::PatchMesh;

/// Control-point offset that makes a cubic segment approximate a quarter
/// circle.
const ARC_K: f32 = 0.552_284_8;

/// Profile of the built-in surface as cubic segments in the `(radius, z)`
/// plane. Both ends sit on the axis so the swept surface is closed.
pub const PROFILE_SEGMENTS: [[[f32; 2]; 4]; 3] = [
    [[0.0, 0.0], [1.2, 0.0], [1.6, 0.4], [1.6, 1.2]],
    [[1.6, 1.2], [1.6, 2.0], [0.6, 2.0], [0.7, 2.6]],
    [[0.7, 2.6], [0.75, 2.9], [0.5, 3.2], [0.0, 3.2]],
];

/// Unit directions at the start of each quarter turn around +z.
const QUARTERS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, -1.0),
];

/// Columns of control points around the axis: three per quarter arc.
const RING: usize = 12;

/// Sweep a chain of cubic profile segments around the +z axis.
///
/// Each segment becomes four patches, one per quarter turn. `u` runs
/// counter-clockwise around the axis and `v` along the profile, so a
/// profile that moves outward then upward yields outward-facing normals.
/// Consecutive segments must share their end point.
#[must_use]
pub fn revolve_profile(segments: &[[[f32; 2]; 4]]) -> PatchMesh {
    let ring = ring_directions();

    // Profile points shared between consecutive segments.
    let mut profile: Vec<Vec2> = Vec::with_capacity(segments.len() * 3 + 1);
    for (s, segment) in segments.iter().enumerate() {
        let start = usize::from(s > 0);
        profile.extend(segment[start..].iter().map(|&[r, z]| Vec2::new(r, z)));
    }

    let control_points: Vec<Vec3> = profile
        .iter()
        .flat_map(|p| ring.iter().map(move |d| Vec3::new(p.x * d.x, p.x * d.y, p.y)))
        .collect();

    let mut patches = Vec::with_capacity(segments.len() * QUARTERS.len());
    for s in 0..segments.len() {
        for q in 0..QUARTERS.len() {
            patches.push(std::array::from_fn(|k| {
                let (i, j) = (k / 4, k % 4);
                let row = 3 * s + i;
                let col = (3 * q + j) % RING;
                (row * RING + col) as u32
            }));
        }
    }

    match PatchMesh::new(control_points, patches) {
        Ok(mesh) => mesh,
        // Indices are generated in range; only an empty profile can fail.
        Err(e) => {
            log::error!("empty surface of revolution: {e}");
            PatchMesh::builtin_fallback()
        }
    }
}

impl PatchMesh {
    /// A single flat patch, used when a profile produces nothing.
    fn builtin_fallback() -> Self {
        let control_points = (0..16)
            .map(|k| Vec3::new((k % 4) as f32 / 3.0, (k / 4) as f32 / 3.0, 0.0))
            .collect();
        Self {
            bounds: super::Bounds {
                min: Vec3::ZERO,
                max: Vec3::new(1.0, 1.0, 0.0),
            },
            control_points,
            patches: vec![std::array::from_fn(|k| k as u32)],
        }
    }
}

/// The 12 control-point directions of the four-arc circle.
fn ring_directions() -> [Vec2; RING] {
    std::array::from_fn(|c| {
        let (q, m) = (c / 3, c % 3);
        let start = QUARTERS[q];
        let end = QUARTERS[(q + 1) % 4];
        match m {
            0 => start,
            // Tangent at the start of the arc is the end direction.
            1 => start + ARC_K * end,
            _ => end + ARC_K * start,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_patches_per_segment() {
        let mesh = PatchMesh::builtin();
        assert_eq!(mesh.patch_count(), PROFILE_SEGMENTS.len() * 4);
        assert_eq!(mesh.control_points().len(), 10 * RING);
    }

    #[test]
    fn builtin_bounds_are_symmetric_about_the_axis() {
        let b = PatchMesh::builtin().bounds();
        assert!((b.min.x + 1.6).abs() < 1e-5);
        assert!((b.max.x - 1.6).abs() < 1e-5);
        assert!((b.min.y + 1.6).abs() < 1e-5);
        assert_eq!(b.min.z, 0.0);
        assert_eq!(b.max.z, 3.2);
        assert!(b.center().truncate().length() < 1e-5);
    }

    #[test]
    fn patches_tile_the_ring() {
        let mesh = PatchMesh::builtin();
        // The u = 1 edge of each quarter is the u = 0 edge of the next.
        for s in 0..PROFILE_SEGMENTS.len() {
            for q in 0..4 {
                let a = mesh.patches()[s * 4 + q];
                let b = mesh.patches()[s * 4 + (q + 1) % 4];
                for i in 0..4 {
                    assert_eq!(a[i * 4 + 3], b[i * 4]);
                }
            }
        }
    }

    #[test]
    fn segments_share_profile_rows() {
        let mesh = PatchMesh::builtin();
        let lower = mesh.patches()[0];
        let upper = mesh.patches()[4];
        for j in 0..4 {
            assert_eq!(lower[12 + j], upper[j]);
        }
    }

    #[test]
    fn arc_control_points_follow_the_circle() {
        let ring = ring_directions();
        assert_eq!(ring[0], Vec2::new(1.0, 0.0));
        assert_eq!(ring[1], Vec2::new(1.0, ARC_K));
        assert_eq!(ring[2], Vec2::new(ARC_K, 1.0));
        assert_eq!(ring[3], Vec2::new(0.0, 1.0));
        // Midpoint of a cubic quarter arc lies on the unit circle.
        let mid = 0.125 * (ring[0] + 3.0 * ring[1] + 3.0 * ring[2] + ring[3]);
        assert!((mid.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn empty_profile_falls_back() {
        let mesh = revolve_profile(&[]);
        assert_eq!(mesh.patch_count(), 1);
    }
}
