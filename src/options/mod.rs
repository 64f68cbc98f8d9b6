//! Centralized geometry options with TOML preset support.
//!
//! Spline resolution, tube shape, structure preparation, and lighting are
//! consolidated here. Options serialize to/from TOML presets so a tube
//! style can be reused across structures.

mod lighting;
mod spline;
mod structure;
mod tube;

use std::path::Path;

pub use lighting::{DirectionalLight, LightingOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use spline::SplineOptions;
pub use structure::StructureOptions;
pub use tube::TubeOptions;

use crate::error::TubeError;
use crate::geometry::DegeneratePolicy;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[tube]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Policy for coincident control points and duplicate curve samples.
    pub degenerate_policy: DegeneratePolicy,
    /// Catmull-Rom interpolation parameters.
    pub spline: SplineOptions,
    /// Tube cross-section and tessellation parameters.
    pub tube: TubeOptions,
    /// C-alpha trace preparation.
    pub structure: StructureOptions,
    /// Directional lights.
    pub lighting: LightingOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TubeError> {
        let content = std::fs::read_to_string(path).map_err(TubeError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TubeError> {
        toml::from_str(content)
            .map_err(|e| TubeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TubeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TubeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TubeError::Io)?;
        }
        std::fs::write(path, content).map_err(TubeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject configurations the pipeline cannot run with, before any
    /// geometry is generated.
    pub fn validate(&self) -> Result<(), TubeError> {
        if self.spline.resolution < 2 {
            return Err(TubeError::InvalidInput(format!(
                "spline resolution must be >= 2, got {}",
                self.spline.resolution
            )));
        }
        if !self.spline.tension.is_finite() {
            return Err(TubeError::InvalidInput(format!(
                "spline tension must be finite, got {}",
                self.spline.tension
            )));
        }
        if !(self.tube.radius.is_finite() && self.tube.radius > 0.0) {
            return Err(TubeError::InvalidInput(format!(
                "tube radius must be > 0, got {}",
                self.tube.radius
            )));
        }
        if self.tube.radial_segments < 3 {
            return Err(TubeError::InvalidInput(format!(
                "a ring needs at least 3 radial segments, got {}",
                self.tube.radial_segments
            )));
        }
        Ok(())
    }
}
