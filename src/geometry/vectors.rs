//! Line segments for visualizing per-sample frame vectors.

use glam::Vec3;

use super::{Curve, FrameSet, PointBuffer};
use crate::error::TubeError;

/// One line segment per curve sample, from the sample to
/// `sample + vector * scale`.
///
/// The result holds two points per segment (start, end), ready for a line
/// list draw. `vectors` is typically [`FrameSet::tangents`],
/// [`FrameSet::references`], or [`FrameSet::binormals`].
pub fn frame_vector_lines(
    curve: &Curve,
    vectors: &PointBuffer,
    scale: f32,
) -> Result<PointBuffer, TubeError> {
    if vectors.len() != curve.len() {
        return Err(TubeError::InvalidInput(format!(
            "{} vectors for {} curve points",
            vectors.len(),
            curve.len()
        )));
    }
    let mut lines = PointBuffer::with_capacity(curve.len() * 2);
    for (p, v) in curve.iter().zip(vectors.iter()) {
        lines.push(p);
        lines.push(p + v * scale);
    }
    Ok(lines)
}

/// The three frame axes of every sample as line segments, in
/// tangent/reference/binormal order.
pub fn frame_axes_lines(
    curve: &Curve,
    frames: &FrameSet,
    scale: f32,
) -> Result<[PointBuffer; 3], TubeError> {
    Ok([
        frame_vector_lines(curve, &frames.tangents(), scale)?,
        frame_vector_lines(curve, &frames.references(), scale)?,
        frame_vector_lines(curve, &frames.binormals(), scale)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::frame::compute_rmf;

    #[test]
    fn segments_start_on_the_curve() {
        let curve = Curve::from_points(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 1.0, 0.0),
        ]);
        let frames = compute_rmf(&curve).unwrap();
        let lines =
            frame_vector_lines(&curve, &frames.tangents(), 0.5).unwrap();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.point(0), Vec3::ZERO);
        assert!((lines.point(1) - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(lines.point(2), Vec3::X);
    }

    #[test]
    fn axes_lines_cover_all_three_vectors() {
        let curve = Curve::from_points(&[Vec3::ZERO, Vec3::X]);
        let frames = compute_rmf(&curve).unwrap();
        let [t, r, c] = frame_axes_lines(&curve, &frames, 1.0).unwrap();
        assert!((t.point(1) - Vec3::X).length() < 1e-6);
        assert!((r.point(1) - Vec3::Y).length() < 1e-6);
        assert!((c.point(1) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let curve = Curve::from_points(&[Vec3::ZERO, Vec3::X]);
        let vectors = PointBuffer::from_points(&[Vec3::X]);
        assert!(frame_vector_lines(&curve, &vectors, 1.0).is_err());
    }
}
