//! Bounding-box normalization of point sets.

use glam::Vec3;

/// Center the bounding box of `points` on the origin and scale it so the
/// largest extent is 1.
///
/// A set with zero extent (a single point, or all points coincident) is
/// only centered.
#[must_use]
pub fn normalize_to_unit_cube(points: &[Vec3]) -> Vec<Vec3> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));

    let center = (min + max) * 0.5;
    let size = (max - min).max_element();
    let scale = if size > 0.0 { 1.0 / size } else { 1.0 };

    points.iter().map(|&p| (p - center) * scale).collect()
}
