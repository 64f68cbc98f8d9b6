use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Catmull-Rom interpolation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Spline", inline)]
#[serde(default)]
pub struct SplineOptions {
    /// Samples per control-point interval, both ends included.
    #[schemars(title = "Resolution", range(min = 2, max = 64))]
    pub resolution: u32,
    /// Curve tightness; 1.0 is classic Catmull-Rom, 0.0 straight chords.
    #[schemars(title = "Tension", range(min = 0.0, max = 2.0))]
    pub tension: f32,
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            resolution: 10,
            tension: 1.0,
        }
    }
}
