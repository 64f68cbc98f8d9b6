//! Bit-exact hashing of traces and options for change detection.

use std::hash::{Hash, Hasher};

use glam::Vec3;

use crate::options::Options;

/// Hash a single [`Vec3`] by converting each component to bits.
pub fn hash_vec3(v: &Vec3, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

/// Hash every point of a slice, length first.
///
/// Any single moved control point changes the digest, so cached geometry
/// is never reused for an edited trace.
pub fn hash_vec3_slice(slice: &[Vec3], hasher: &mut impl Hasher) {
    slice.len().hash(hasher);
    for v in slice {
        hash_vec3(v, hasher);
    }
}

/// Hash the options that affect generated geometry.
///
/// Lighting and structure preparation are left out: neither changes the
/// curve, frames, or mesh produced from a given set of control points.
pub fn hash_geometry_options(options: &Options, hasher: &mut impl Hasher) {
    options.degenerate_policy.hash(hasher);
    options.spline.resolution.hash(hasher);
    options.spline.tension.to_bits().hash(hasher);
    options.tube.radius.to_bits().hash(hasher);
    options.tube.radial_segments.hash(hasher);
    options.tube.shading.hash(hasher);
    options.tube.caps.hash(hasher);
}

/// Digest of a control-point trace together with the geometry options.
#[must_use]
pub fn geometry_key(points: &[Vec3], options: &Options) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    hash_vec3_slice(points, &mut hasher);
    hash_geometry_options(options, &mut hasher);
    hasher.finish()
}
