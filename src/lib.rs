// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (default clippy thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive viewer for bicubic Bézier patch surfaces with adjustable
//! tessellation.
//!
//! Tessview shows a patch mesh from an orbiting camera, drawing each frame
//! twice: a shaded fill and a depth-biased wireframe. The tessellation
//! density follows one of three level functions (uniform, eye distance, or
//! projected edge length), switchable at runtime.
//!
//! # Key entry points
//!
//! - [`app::TessApp`] - application state and event handling
//! - [`mesh::PatchMesh`] - shared control points and 16-index patches
//! - [`tessellation::TessellationStore`] - per-mode level parameters
//! - [`options::Options`] - TOML configuration (camera, presets, keys)
//! - [`gpu::GpuBackend`] - the wgpu backend
//!
//! # Architecture
//!
//! The window adapter feeds events to [`app::TessApp`], which turns them
//! into [`app::ViewerCommand`]s. Once per frame the app composes a
//! [`frame::RenderDescriptor`] and hands it to a [`app::RenderBackend`].
//! The wgpu backend tessellates patches on the CPU whenever a per-patch
//! resolution changes and draws both passes from the cached mesh.

pub mod app;
pub mod camera;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod input;
pub mod math;
pub mod mesh;
pub mod options;
pub mod tessellation;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use app::TessApp;
pub use camera::OrbitCamera;
pub use error::TessViewError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
