use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{CapMode, NormalShading};

/// Tube cross-section and tessellation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tube", inline)]
#[serde(default)]
pub struct TubeOptions {
    /// Tube radius in the same units as the control points.
    #[schemars(title = "Radius", range(min = 0.001, max = 2.0))]
    pub radius: f32,
    /// Number of vertices around each ring.
    #[schemars(title = "Radial Segments", range(min = 3, max = 64))]
    pub radial_segments: u32,
    /// Side-surface normal policy.
    pub shading: NormalShading,
    /// Which rings get a cap fan.
    pub caps: CapMode,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            radius: 0.01,
            radial_segments: 15,
            shading: NormalShading::Flat,
            caps: CapMode::Ends,
        }
    }
}
