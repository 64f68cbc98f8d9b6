//! C-alpha trace input: PDB parsing and coordinate normalization.
//!
//! This is the boundary where structure files become the ordered control
//! points consumed by [`crate::geometry::spline`].

pub mod normalize;
pub mod pdb;

pub use normalize::normalize_to_unit_cube;
pub use pdb::{load_ca_trace, parse_ca_atoms, parse_ca_trace, CaAtom};
