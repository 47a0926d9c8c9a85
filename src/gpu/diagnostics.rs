//! Backend diagnostics and their severity.
//!
//! wgpu reports uncaptured errors on whatever thread it likes, so the sink
//! logs every diagnostic immediately and parks the first fatal one in a
//! write-once cell. The event loop polls the cell after each frame and
//! shuts down when it is set.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// How serious a backend diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The device is unusable.
    High,
    /// API misuse; results can no longer be trusted.
    Medium,
    /// A frame was dropped.
    Low,
    /// Informational; handled internally.
    Notification,
}

impl Severity {
    /// High and medium diagnostics end the process.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }

    fn log_level(self) -> log::Level {
        match self {
            Self::High | Self::Medium => log::Level::Error,
            Self::Low => log::Level::Warn,
            Self::Notification => log::Level::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Notification => "notification",
        };
        f.write_str(name)
    }
}

/// A message from the graphics backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDiagnostic {
    /// How serious it is.
    pub severity: Severity,
    /// Backend-provided description.
    pub message: String,
}

impl fmt::Display for BackendDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

impl std::error::Error for BackendDiagnostic {}

/// Severity of an uncaptured wgpu error.
#[must_use]
pub fn classify_error(error: &wgpu::Error) -> Severity {
    match error {
        wgpu::Error::Validation { .. } => Severity::Medium,
        // Out-of-memory and internal errors leave the device unusable.
        _ => Severity::High,
    }
}

/// Severity of a failed swapchain acquire.
///
/// `Lost` and `Outdated` are recovered by reconfiguring the surface.
#[must_use]
pub fn classify_surface_error(error: &wgpu::SurfaceError) -> Severity {
    match error {
        wgpu::SurfaceError::OutOfMemory => Severity::High,
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            Severity::Notification
        }
        _ => Severity::Low,
    }
}

/// Collects diagnostics from any thread and remembers the first fatal one.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    fatal: Arc<OnceLock<BackendDiagnostic>>,
}

impl DiagnosticSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `diagnostic` and keep it if it is the first fatal one.
    pub fn report(&self, diagnostic: BackendDiagnostic) {
        log::log!(
            diagnostic.severity.log_level(),
            "backend diagnostic: {diagnostic}"
        );
        if diagnostic.severity.is_fatal() {
            let _ = self.fatal.set(diagnostic);
        }
    }

    /// Report an uncaptured wgpu error.
    pub fn report_error(&self, error: &wgpu::Error) {
        self.report(BackendDiagnostic {
            severity: classify_error(error),
            message: error.to_string(),
        });
    }

    /// Report a surface acquire failure and return its severity.
    pub fn report_surface_error(&self, error: &wgpu::SurfaceError) -> Severity {
        let severity = classify_surface_error(error);
        self.report(BackendDiagnostic {
            severity,
            message: error.to_string(),
        });
        severity
    }

    /// The first fatal diagnostic, if any arrived.
    #[must_use]
    pub fn fatal(&self) -> Option<&BackendDiagnostic> {
        self.fatal.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(severity: Severity, message: &str) -> BackendDiagnostic {
        BackendDiagnostic {
            severity,
            message: message.to_owned(),
        }
    }

    #[test]
    fn only_high_and_medium_are_fatal() {
        assert!(Severity::High.is_fatal());
        assert!(Severity::Medium.is_fatal());
        assert!(!Severity::Low.is_fatal());
        assert!(!Severity::Notification.is_fatal());
    }

    #[test]
    fn wgpu_errors_are_classified() {
        let validation = wgpu::Error::Validation {
            source: Box::new(std::io::Error::other("bad bind group")),
            description: "bad bind group".to_owned(),
        };
        assert_eq!(classify_error(&validation), Severity::Medium);

        let oom = wgpu::Error::OutOfMemory {
            source: Box::new(std::io::Error::other("oom")),
        };
        assert_eq!(classify_error(&oom), Severity::High);
    }

    #[test]
    fn surface_errors_are_classified() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::OutOfMemory),
            Severity::High
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Lost),
            Severity::Notification
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Outdated),
            Severity::Notification
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Timeout),
            Severity::Low
        );
    }

    #[test]
    fn sink_keeps_first_fatal_only() {
        let sink = DiagnosticSink::new();
        sink.report(diag(Severity::Low, "dropped frame"));
        assert!(sink.fatal().is_none());

        sink.report(diag(Severity::Medium, "first"));
        sink.report(diag(Severity::High, "second"));
        assert_eq!(sink.fatal(), Some(&diag(Severity::Medium, "first")));
    }

    #[test]
    fn clones_share_the_cell() {
        let sink = DiagnosticSink::new();
        let remote = sink.clone();
        let handle = std::thread::spawn(move || {
            remote.report(diag(Severity::High, "device lost"));
        });
        handle.join().unwrap();
        assert_eq!(sink.fatal().map(|d| d.severity), Some(Severity::High));
    }
}
