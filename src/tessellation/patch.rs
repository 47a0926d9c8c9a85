//! Bicubic patch evaluation into renderable triangle and line meshes.
//!
//! Each patch is sampled on a regular `n x n` grid where `n` is the
//! ceiling of the largest of its four edge levels. The tessellated output
//! stays in model space; only the resolutions depend on the frame.

use glam::{Vec3, Vec4};

use super::level::{self, LevelFrame};
use super::TessellationMode;
use crate::mesh::PatchMesh;

/// Parameter offset used to step off a collapsed edge when the surface
/// derivative vanishes there.
const POLE_NUDGE: f32 = 1.0e-3;

/// Tessellated vertex uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TessellatedVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Unit model-space normal.
    pub normal: [f32; 3],
}

/// Triangles and grid lines for a whole patch mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedMesh {
    /// Shared vertex array.
    pub vertices: Vec<TessellatedVertex>,
    /// Counter-clockwise triangle list.
    pub triangles: Vec<u32>,
    /// Line list tracing the grid edges.
    pub lines: Vec<u32>,
}

// ── Bernstein basis ──

fn bernstein(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t]
}

fn bernstein_derivative(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [
        -3.0 * s * s,
        3.0 * s * s - 6.0 * s * t,
        6.0 * s * t - 3.0 * t * t,
        3.0 * t * t,
    ]
}

fn weighted_sum(points: &[Vec3; 16], bu: [f32; 4], bv: [f32; 4]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    for (i, wv) in bv.iter().enumerate() {
        for (j, wu) in bu.iter().enumerate() {
            sum += points[i * 4 + j] * (wv * wu);
        }
    }
    sum
}

/// Surface point at `(u, v)`.
#[must_use]
pub fn evaluate(points: &[Vec3; 16], u: f32, v: f32) -> Vec3 {
    weighted_sum(points, bernstein(u), bernstein(v))
}

/// Partial derivatives `(dP/du, dP/dv)` at `(u, v)`.
#[must_use]
pub fn derivatives(points: &[Vec3; 16], u: f32, v: f32) -> (Vec3, Vec3) {
    let du = weighted_sum(points, bernstein_derivative(u), bernstein(v));
    let dv = weighted_sum(points, bernstein(u), bernstein_derivative(v));
    (du, dv)
}

/// Unit normal `dP/du x dP/dv` at `(u, v)`.
///
/// Where a patch edge collapses to a point (a pole) one derivative
/// vanishes, so the normal is taken a short step inside the patch.
#[must_use]
pub fn normal(points: &[Vec3; 16], u: f32, v: f32) -> Vec3 {
    let (du, dv) = derivatives(points, u, v);
    if let Some(n) = du.cross(dv).try_normalize() {
        return n;
    }
    let nudge = |t: f32| t + (0.5 - t).signum() * POLE_NUDGE;
    let (du, dv) = derivatives(points, nudge(u), nudge(v));
    du.cross(dv).try_normalize().unwrap_or(Vec3::Z)
}

/// Grid resolution of one patch: the ceiling of its largest edge level.
#[must_use]
pub fn patch_resolution(
    points: &[Vec3; 16],
    mode: TessellationMode,
    terms: Vec4,
    frame: &LevelFrame,
) -> u32 {
    let corners = [points[0], points[3], points[15], points[12]];
    let max_level = (0..4)
        .map(|e| level::edge_level(mode, terms, corners[e], corners[(e + 1) % 4], frame))
        .fold(level::MIN_LEVEL, f32::max);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = max_level.ceil() as u32;
    n.max(1)
}

/// Tessellate every patch at its resolution.
///
/// `resolutions` must hold one entry per patch.
#[must_use]
pub fn tessellate(mesh: &PatchMesh, resolutions: &[u32]) -> TessellatedMesh {
    let mut out = TessellatedMesh::default();
    for (index, &n) in resolutions.iter().enumerate().take(mesh.patch_count()) {
        append_patch(&mut out, &mesh.patch_points(index), n);
    }
    out
}

fn append_patch(out: &mut TessellatedMesh, points: &[Vec3; 16], n: u32) {
    let base = out.vertices.len() as u32;
    let stride = n + 1;
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / n as f32;

    for i in 0..=n {
        let v = i as f32 * step;
        for j in 0..=n {
            let u = j as f32 * step;
            out.vertices.push(TessellatedVertex {
                position: evaluate(points, u, v).to_array(),
                normal: normal(points, u, v).to_array(),
            });
        }
    }

    let at = |i: u32, j: u32| base + i * stride + j;
    for i in 0..n {
        for j in 0..n {
            let (p00, p10) = (at(i, j), at(i, j + 1));
            let (p01, p11) = (at(i + 1, j), at(i + 1, j + 1));
            out.triangles.extend_from_slice(&[p00, p10, p11, p00, p11, p01]);
        }
    }
    for i in 0..=n {
        for j in 0..n {
            // Along u, then along v.
            out.lines.extend_from_slice(&[at(i, j), at(i, j + 1)]);
            out.lines.extend_from_slice(&[at(j, i), at(j + 1, i)]);
        }
    }
}

/// Caches the tessellated mesh and rebuilds it only when some patch's
/// resolution changes.
#[derive(Debug, Default)]
pub struct PatchTessellator {
    resolutions: Vec<u32>,
    mesh: TessellatedMesh,
    generation: u64,
}

impl PatchTessellator {
    /// Create an empty tessellator. The first [`update`](Self::update)
    /// always builds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tessellated mesh.
    #[must_use]
    pub fn mesh(&self) -> &TessellatedMesh {
        &self.mesh
    }

    /// Per-patch grid resolutions of the current mesh.
    #[must_use]
    pub fn resolutions(&self) -> &[u32] {
        &self.resolutions
    }

    /// Incremented on every rebuild, so consumers can tell when to
    /// re-upload.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the cache so the next update rebuilds.
    pub fn invalidate(&mut self) {
        self.resolutions.clear();
    }

    /// Recompute levels for this frame and rebuild if any patch's
    /// resolution changed. Returns whether a rebuild happened.
    pub fn update(
        &mut self,
        mesh: &PatchMesh,
        mode: TessellationMode,
        terms: Vec4,
        frame: &LevelFrame,
    ) -> bool {
        let resolutions: Vec<u32> = (0..mesh.patch_count())
            .map(|p| patch_resolution(&mesh.patch_points(p), mode, terms, frame))
            .collect();
        if resolutions == self.resolutions {
            return false;
        }
        self.mesh = tessellate(mesh, &resolutions);
        self.resolutions = resolutions;
        self.generation += 1;
        log::debug!(
            "tessellated {} patches: {} vertices, {} triangles",
            mesh.patch_count(),
            self.mesh.vertices.len(),
            self.mesh.triangles.len() / 3
        );
        true
    }
}
