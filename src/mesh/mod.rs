//! Bicubic patch mesh asset.
//!
//! A [`PatchMesh`] is a shared pool of control points plus a list of
//! patches, each referencing 16 of them in a 4x4 grid. Row `i` of a patch
//! runs along the `v` parameter and column `j` along `u`, so index
//! `i * 4 + j` is the control point at `(u_j, v_i)`.

mod revolution;

use std::fmt;

use glam::Vec3;
pub use revolution::{revolve_profile, PROFILE_SEGMENTS};

/// Errors raised when building a patch mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no patches.
    Empty,
    /// A patch references a control point that does not exist.
    IndexOutOfRange {
        /// Patch containing the bad index.
        patch: usize,
        /// The offending index.
        index: u32,
        /// Number of control points available.
        len: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "patch mesh has no patches"),
            Self::IndexOutOfRange { patch, index, len } => write!(
                f,
                "patch {patch} references control point {index} but only \
                 {len} exist"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |b, &p| Self {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }
}

/// Control points and the 16-index patches that reference them.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchMesh {
    control_points: Vec<Vec3>,
    patches: Vec<[u32; 16]>,
    bounds: Bounds,
}

impl PatchMesh {
    /// Build a mesh, checking every patch index against the control point
    /// pool.
    ///
    /// The bounding box is taken over the control points, which contain
    /// the surface.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Empty`] when `patches` is empty and
    /// [`MeshError::IndexOutOfRange`] when a patch references a control
    /// point past the end of `control_points`.
    pub fn new(
        control_points: Vec<Vec3>,
        patches: Vec<[u32; 16]>,
    ) -> Result<Self, MeshError> {
        if patches.is_empty() {
            return Err(MeshError::Empty);
        }
        let len = control_points.len();
        for (patch, indices) in patches.iter().enumerate() {
            if let Some(&index) =
                indices.iter().find(|&&index| index as usize >= len)
            {
                return Err(MeshError::IndexOutOfRange { patch, index, len });
            }
        }
        let bounds =
            Bounds::from_points(&control_points).ok_or(MeshError::Empty)?;
        Ok(Self {
            control_points,
            patches,
            bounds,
        })
    }

    /// The built-in closed surface of revolution.
    #[must_use]
    pub fn builtin() -> Self {
        revolve_profile(&PROFILE_SEGMENTS)
    }

    /// Shared control point pool.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Patch index lists.
    #[must_use]
    pub fn patches(&self) -> &[[u32; 16]] {
        &self.patches
    }

    /// Number of patches.
    #[must_use]
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Bounding box of the control points.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The 16 control points of patch `index`, resolved.
    ///
    /// # Panics
    ///
    /// Panics if `index >= patch_count()`.
    #[must_use]
    pub fn patch_points(&self, index: usize) -> [Vec3; 16] {
        let indices = &self.patches[index];
        std::array::from_fn(|k| self.control_points[indices[k] as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_patch() -> (Vec<Vec3>, [u32; 16]) {
        let points = (0..16)
            .map(|k| Vec3::new((k % 4) as f32, (k / 4) as f32, 0.0))
            .collect();
        (points, std::array::from_fn(|k| k as u32))
    }

    #[test]
    fn new_accepts_valid_indices() {
        let (points, patch) = grid_patch();
        let mesh = PatchMesh::new(points, vec![patch]).unwrap();
        assert_eq!(mesh.patch_count(), 1);
        assert_eq!(mesh.bounds().min, Vec3::ZERO);
        assert_eq!(mesh.bounds().max, Vec3::new(3.0, 3.0, 0.0));
        assert_eq!(mesh.patch_points(0)[5], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn new_rejects_out_of_range_index() {
        let (points, mut patch) = grid_patch();
        patch[7] = 16;
        let err = PatchMesh::new(points, vec![patch]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                patch: 0,
                index: 16,
                len: 16
            }
        );
    }

    #[test]
    fn new_rejects_empty_mesh() {
        assert_eq!(PatchMesh::new(Vec::new(), Vec::new()), Err(MeshError::Empty));
    }

    #[test]
    fn bounds_center() {
        let b = Bounds::from_points(&[
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, -2.0, 4.0),
        ])
        .unwrap();
        assert_eq!(b.center(), Vec3::new(1.0, 0.0, 2.0));
        assert!(Bounds::from_points(&[]).is_none());
    }
}
