//! Procedural tube geometry: spline, frames, rings, triangles.
//!
//! Pure `Vec3` → buffer transforms with no rendering dependencies. Each
//! stage borrows the previous stage's output and returns new buffers.

pub mod buffer;
pub mod frame;
pub mod spline;
pub mod tube;
pub mod vectors;

pub use buffer::PointBuffer;
pub use frame::{compute_rmf, Frame, FrameSet};
pub use spline::{catmull_rom_chain, Curve};
pub use tube::{
    CapMode, CapSurface, NormalShading, RingSet, SideSurface, TubeMesh,
    TubeMeshBuilder, TubeVertex,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Squared-length threshold below which a tangent or reflection vector is
/// treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-10;

/// What to do when a near-zero tangent or reflection vector shows up
/// (coincident control points, duplicate curve samples, cusps).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Substitute a well-defined vector (straight-segment tangent, identity
    /// reflection, carried-over tangent) and keep going.
    #[default]
    Fallback,
    /// Abort the stage with `TubeError::DegenerateGeometry`.
    Fail,
}

/// Whether `v` is too short to normalize or divide by.
#[inline]
pub(crate) fn is_degenerate(v: glam::Vec3) -> bool {
    v.length_squared() < DEGENERATE_EPSILON
}
