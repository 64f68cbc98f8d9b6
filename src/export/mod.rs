//! Mesh export formats.

pub mod obj;

pub use obj::write_obj;
