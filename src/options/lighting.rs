use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single directional light.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DirectionalLight {
    /// Direction the light travels (normalized on upload).
    pub direction: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Directional lights handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Lights in priority order; only the first
    /// [`MAX_LIGHTS`](crate::lighting::MAX_LIGHTS) are uploaded.
    pub lights: Vec<DirectionalLight>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            lights: vec![
                // White key light
                DirectionalLight {
                    direction: [0.3, 0.7, -0.4],
                    color: [1.0, 1.0, 1.0],
                },
                // Cool blue fill
                DirectionalLight {
                    direction: [-0.4, -0.2, 0.9],
                    color: [0.4, 0.7, 1.0],
                },
            ],
        }
    }
}
