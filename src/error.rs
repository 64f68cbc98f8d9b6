//! Crate-level error types.

use std::fmt;

/// Errors produced by the viso-tube crate.
#[derive(Debug)]
pub enum TubeError {
    /// Malformed configuration or input: too few points, non-positive
    /// radius, too few radial segments, spline resolution below 2, or
    /// non-finite coordinates.
    InvalidInput(String),
    /// A near-zero tangent or reflection vector was hit while the
    /// degenerate policy was set to fail.
    DegenerateGeometry(String),
    /// Failed to read a C-alpha trace out of a structure file.
    StructureLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for TubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::DegenerateGeometry(msg) => {
                write!(f, "degenerate geometry: {msg}")
            }
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for TubeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TubeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
