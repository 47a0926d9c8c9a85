//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::gpu::BackendDiagnostic;
use crate::mesh::MeshError;

/// Errors produced by the tessview crate.
#[derive(Debug)]
pub enum TessViewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The backend reported a fatal diagnostic.
    Backend(BackendDiagnostic),
    /// Invalid patch mesh.
    Mesh(MeshError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TessViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Backend(d) => write!(f, "fatal backend diagnostic: {d}"),
            Self::Mesh(e) => write!(f, "mesh error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TessViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Backend(d) => Some(d),
            Self::Mesh(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<RenderContextError> for TessViewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<BackendDiagnostic> for TessViewError {
    fn from(d: BackendDiagnostic) -> Self {
        Self::Backend(d)
    }
}

impl From<MeshError> for TessViewError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<std::io::Error> for TessViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::gpu::Severity;

    #[test]
    fn backend_diagnostic_converts_and_chains() {
        let err: TessViewError = BackendDiagnostic {
            severity: Severity::High,
            message: "device lost".to_owned(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "fatal backend diagnostic: [high] device lost"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn mesh_error_displays_context() {
        let err = TessViewError::from(MeshError::Empty);
        assert_eq!(err.to_string(), "mesh error: patch mesh has no patches");
    }
}
