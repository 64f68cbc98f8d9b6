//! Shared helpers for change detection.

pub mod hash;
