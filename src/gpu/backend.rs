use super::diagnostics::{DiagnosticSink, Severity};
use super::patch_renderer::PatchRenderer;
use super::render_context::{RenderContext, RenderContextError};
use crate::app::{RenderBackend, RenderError};
use crate::frame::{RenderDescriptor, FILL_PASS, LINE_PASS};
use crate::mesh::PatchMesh;
use crate::options::WindowOptions;
use crate::tessellation::PatchTessellator;

/// wgpu implementation of [`RenderBackend`].
///
/// Tessellates on the CPU whenever a patch's resolution changes, uploads
/// the result, and draws the fill and wireframe passes into the window
/// surface.
pub struct GpuBackend {
    context: RenderContext,
    renderer: PatchRenderer,
    tessellator: PatchTessellator,
    diagnostics: DiagnosticSink,
    clear_color: wgpu::Color,
}

impl GpuBackend {
    /// Initialize the device and pipelines for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if the GPU context cannot be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &WindowOptions,
        diagnostics: DiagnosticSink,
    ) -> Result<Self, RenderContextError> {
        let context =
            RenderContext::new(window, size, options.msaa_samples, &diagnostics)
                .await?;
        let renderer = PatchRenderer::new(&context, &[FILL_PASS, LINE_PASS]);
        let [r, g, b, a] = options.clear_color;
        Ok(Self {
            context,
            renderer,
            tessellator: PatchTessellator::new(),
            diagnostics,
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: f64::from(a),
            },
        })
    }

    /// Resize the surface and render targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.context.size() || width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
    }

    /// Shared diagnostic sink.
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        self.context.get_next_frame().map_err(|e| {
            match self.diagnostics.report_surface_error(&e) {
                Severity::Notification => {
                    self.context.reconfigure();
                    RenderError::Skipped(e.to_string())
                }
                severity if severity.is_fatal() => {
                    RenderError::Fatal(e.to_string())
                }
                _ => RenderError::Skipped(e.to_string()),
            }
        })
    }
}

impl RenderBackend for GpuBackend {
    fn draw(
        &mut self,
        frame: &RenderDescriptor,
        mesh: &PatchMesh,
    ) -> Result<(), RenderError> {
        let _ = self.tessellator.update(
            mesh,
            frame.mode,
            frame.terms,
            &frame.level_frame(),
        );
        self.renderer.upload(&self.context, &self.tessellator);

        let output = self.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.renderer.encode(
            &self.context,
            &mut encoder,
            &view,
            frame,
            self.clear_color,
        );
        self.context.submit(encoder);
        output.present();

        match self.diagnostics.fatal() {
            Some(diagnostic) => Err(RenderError::Fatal(diagnostic.to_string())),
            None => Ok(()),
        }
    }
}
