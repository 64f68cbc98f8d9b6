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
// Complexity limits (thresholds in clippy.toml)
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

//! Twist-free tube geometry for protein backbone traces.
//!
//! Turns a sparse, irregularly spaced C-alpha trace into plain vertex
//! buffers for a smooth 3D tube. The geometry pipeline runs strictly
//! forward:
//!
//! control points → curve points → frames → rings → triangles
//!
//! # Key entry points
//!
//! - [`geometry::spline::catmull_rom_chain`] - Catmull-Rom interpolation
//!   through the control points
//! - [`geometry::frame::compute_rmf`] - rotation-minimizing frames via
//!   double reflection
//! - [`geometry::tube::TubeMeshBuilder`] - ring generation, side-surface
//!   and cap tessellation
//! - [`pipeline::TubePipeline`] - the three stages composed, configured
//!   from [`options::Options`]
//!
//! Structure loading ([`structure`]), OBJ export ([`export`]) and the
//! light uniform record ([`lighting`]) sit around the pipeline but never
//! feed back into it. Every stage is synchronous and pure: it borrows its
//! input and returns freshly allocated buffers.

pub mod error;
pub mod export;
pub mod geometry;
pub mod lighting;
pub mod options;
pub mod pipeline;
pub mod structure;
pub mod util;
