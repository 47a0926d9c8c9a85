//! Per-frame transform composition and the two-pass draw policy.
//!
//! Once per frame the [`FrameComposer`] reads the camera and tessellation
//! state and produces a [`RenderDescriptor`]: one clip matrix, the model
//! matrix, the eye position, the active mode and its terms, and the two
//! draw passes (filled surface, then an offset wireframe on top).

use glam::{Mat4, Vec3, Vec4};

use crate::camera::OrbitCamera;
use crate::math;
use crate::mesh::Bounds;
use crate::tessellation::level::LevelFrame;
use crate::tessellation::{TessellationMode, TessellationStore};

/// Depth test applied by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCompare {
    /// Pass when strictly closer.
    Less,
    /// Pass when closer or equal.
    LessEqual,
}

/// How a pass rasterizes triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonFill {
    /// Filled triangles.
    Fill,
    /// Triangle edges only.
    Line,
}

/// Depth offset applied to a pass, in the `glPolygonOffset` sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBias {
    /// Constant offset in depth-buffer units.
    pub constant: i32,
    /// Offset proportional to the polygon's depth slope.
    pub slope_scale: f32,
}

/// One draw of the tessellated mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPass {
    /// Multiplies the shaded color.
    pub color_scale: Vec4,
    /// Depth test.
    pub depth_compare: DepthCompare,
    /// Rasterization mode.
    pub polygon: PolygonFill,
    /// Optional depth offset.
    pub depth_bias: Option<DepthBias>,
}

/// Shaded surface.
pub const FILL_PASS: DrawPass = DrawPass {
    color_scale: Vec4::ONE,
    depth_compare: DepthCompare::Less,
    polygon: PolygonFill::Fill,
    depth_bias: None,
};

/// Black wireframe pulled toward the eye so it wins against the fill.
pub const LINE_PASS: DrawPass = DrawPass {
    color_scale: Vec4::new(0.0, 0.0, 0.0, 1.0),
    depth_compare: DepthCompare::LessEqual,
    polygon: PolygonFill::Line,
    depth_bias: Some(DepthBias {
        constant: -10,
        slope_scale: 1.0,
    }),
};

/// Everything the backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescriptor {
    /// `perspective * view * model`.
    pub clip: Mat4,
    /// Model-to-world transform.
    pub model: Mat4,
    /// Eye position in world space.
    pub eye: Vec3,
    /// Active mode's terms (with `w` set to the viewport width).
    pub terms: Vec4,
    /// Active tessellation mode.
    pub mode: TessellationMode,
    /// Passes in draw order.
    pub passes: [DrawPass; 2],
    /// Viewport size the frame was composed for.
    pub viewport: (u32, u32),
}

impl RenderDescriptor {
    /// Transforms the level functions read.
    #[must_use]
    pub fn level_frame(&self) -> LevelFrame {
        LevelFrame {
            model: self.model,
            clip: self.clip,
            eye: self.eye,
        }
    }
}

/// Model transform that centers `bounds` at the origin and stands a
/// z-up asset upright: `rotate_x(90 deg) * translate(-center)`.
#[must_use]
pub fn model_transform(bounds: &Bounds) -> Mat4 {
    math::make_rotate_x(math::radians(90.0)) * math::make_translate(-bounds.center())
}

/// Builds a [`RenderDescriptor`] each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameComposer {
    model: Mat4,
}

impl FrameComposer {
    /// Composer for a mesh with the given bounding box.
    #[must_use]
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            model: model_transform(bounds),
        }
    }

    /// The fixed model transform.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        self.model
    }

    /// Compose the frame for a viewport of `(width, height)`.
    ///
    /// Writes the width into the active mode's `terms.w` before reading
    /// the terms. Zero dimensions are treated as 1.
    pub fn compose(
        &self,
        camera: &OrbitCamera,
        store: &mut TessellationStore,
        viewport: (u32, u32),
    ) -> RenderDescriptor {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        store.set_viewport_width(width as f32);

        let eye = camera.eye();
        let view = camera.view();
        let clip = camera.perspective(width, height) * view * self.model;

        RenderDescriptor {
            clip,
            model: self.model,
            eye,
            terms: store.current_terms(),
            mode: store.current(),
            passes: [FILL_PASS, LINE_PASS],
            viewport: (width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            min: Vec3::new(-1.0, -1.0, 0.0),
            max: Vec3::new(1.0, 1.0, 3.0),
        }
    }

    #[test]
    fn width_is_written_every_frame() {
        let composer = FrameComposer::new(&bounds());
        let camera = OrbitCamera::default();
        let mut store = TessellationStore::default();

        let d = composer.compose(&camera, &mut store, (800, 600));
        assert_eq!(d.terms.w, 800.0);

        store.select(TessellationMode::Edge);
        let d = composer.compose(&camera, &mut store, (1280, 720));
        assert_eq!(d.terms.w, 1280.0);
        assert_eq!(d.mode, TessellationMode::Edge);
        assert_eq!(d.terms.x, 200.0);
    }

    #[test]
    fn clip_is_perspective_view_model() {
        let composer = FrameComposer::new(&bounds());
        let mut camera = OrbitCamera::default();
        camera.adjust(0.3, 1.1, -0.2);
        let mut store = TessellationStore::default();

        let d = composer.compose(&camera, &mut store, (640, 480));
        let expected = camera.xform(640, 480) * composer.model();
        let diff = (d.clip - expected).abs_diff_eq(Mat4::ZERO, 1e-5);
        assert!(diff);
        assert_eq!(d.eye, camera.eye());
    }

    #[test]
    fn model_centers_and_stands_upright() {
        let model = model_transform(&bounds());
        // Bounds center (0, 0, 1.5) goes to the origin.
        let c = model.transform_point3(Vec3::new(0.0, 0.0, 1.5));
        assert!(c.length() < 1e-5);
        // The top of the asset (max z) ends up on +Y.
        let top = model.transform_point3(Vec3::new(0.0, 0.0, 3.0));
        assert!((top - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn pass_policy_is_fill_then_offset_lines() {
        let composer = FrameComposer::new(&bounds());
        let mut store = TessellationStore::default();
        let d = composer.compose(&OrbitCamera::default(), &mut store, (800, 600));

        let [fill, line] = d.passes;
        assert_eq!(fill.color_scale, Vec4::ONE);
        assert_eq!(fill.depth_compare, DepthCompare::Less);
        assert_eq!(fill.polygon, PolygonFill::Fill);
        assert_eq!(fill.depth_bias, None);

        assert_eq!(line.color_scale, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(line.depth_compare, DepthCompare::LessEqual);
        assert_eq!(line.polygon, PolygonFill::Line);
        assert_eq!(
            line.depth_bias,
            Some(DepthBias {
                constant: -10,
                slope_scale: 1.0
            })
        );
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let composer = FrameComposer::new(&bounds());
        let mut store = TessellationStore::default();
        let d = composer.compose(&OrbitCamera::default(), &mut store, (0, 0));
        assert_eq!(d.viewport, (1, 1));
        assert!(d.clip.is_finite());
    }

    #[test]
    fn level_frame_mirrors_descriptor() {
        let composer = FrameComposer::new(&bounds());
        let mut store = TessellationStore::default();
        let d = composer.compose(&OrbitCamera::default(), &mut store, (800, 600));
        let f = d.level_frame();
        assert_eq!(f.clip, d.clip);
        assert_eq!(f.model, d.model);
        assert_eq!(f.eye, d.eye);
    }
}
