//! wgpu rendering backend.
//!
//! Provides device/surface initialization, growable buffers, backend
//! diagnostics, and the two-pass patch renderer behind
//! [`RenderBackend`](crate::app::RenderBackend).

/// wgpu implementation of the render backend interface.
pub mod backend;
/// Diagnostic severities and the fatal-diagnostic sink.
pub mod diagnostics;
/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Fill and wireframe pipelines for tessellated patches.
pub mod patch_renderer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;

pub use backend::GpuBackend;
pub use diagnostics::{BackendDiagnostic, DiagnosticSink, Severity};
