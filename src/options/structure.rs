use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How loaded C-alpha traces are prepared before interpolation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Structure", inline)]
#[serde(default)]
pub struct StructureOptions {
    /// Center the trace on the origin and scale it into a unit cube.
    pub normalize: bool,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self { normalize: true }
    }
}
