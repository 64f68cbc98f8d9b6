//! Catmull-Rom interpolation through a control-point trace.
//!
//! The chain passes exactly through every control point. Ends are clamped
//! by duplicating the first and last control points, so every real
//! interval gets a predecessor and a successor for its tangent estimate.

use glam::Vec3;

use super::{is_degenerate, DegeneratePolicy, PointBuffer};
use crate::error::TubeError;

/// Dense ordered samples of the interpolated curve.
///
/// Each sample is addressed by its index; no arc-length parametrization is
/// kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    points: PointBuffer,
}

impl Curve {
    /// Wrap an existing point sequence as a curve.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            points: PointBuffer::from_points(points),
        }
    }

    /// Wrap an existing point buffer as a curve.
    #[must_use]
    pub fn from_buffer(points: PointBuffer) -> Self {
        Self { points }
    }

    /// Number of curve samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the curve has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> Vec3 {
        self.points.point(i)
    }

    /// Iterate over the samples in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.points.iter()
    }

    /// The backing point buffer.
    #[must_use]
    pub fn points(&self) -> &PointBuffer {
        &self.points
    }
}

/// Catmull-Rom chain through `control_points` with the [`Fallback`]
/// degenerate policy.
///
/// `points_per_segment` samples are taken per control-point interval
/// (`t = 0..=1`); shared interval boundaries are emitted once, so the curve
/// has `(n - 1) * (points_per_segment - 1) + 1` points. A `tension` of 1.0
/// gives the classic Catmull-Rom curve, 0.0 collapses each interval to its
/// straight chord.
///
/// [`Fallback`]: DegeneratePolicy::Fallback
pub fn catmull_rom_chain(
    control_points: &[Vec3],
    points_per_segment: usize,
    tension: f32,
) -> Result<Curve, TubeError> {
    catmull_rom_chain_with_policy(
        control_points,
        points_per_segment,
        tension,
        DegeneratePolicy::Fallback,
    )
}

/// Catmull-Rom chain with an explicit policy for coincident control points.
pub fn catmull_rom_chain_with_policy(
    control_points: &[Vec3],
    points_per_segment: usize,
    tension: f32,
    policy: DegeneratePolicy,
) -> Result<Curve, TubeError> {
    validate(control_points, points_per_segment, tension)?;

    let n = control_points.len();
    let mut padded = Vec::with_capacity(n + 2);
    padded.push(control_points[0]);
    padded.extend_from_slice(control_points);
    padded.push(control_points[n - 1]);

    let mut points =
        PointBuffer::with_capacity((n - 1) * (points_per_segment - 1) + 1);
    let mut fallbacks = 0_usize;

    for (i, w) in padded.windows(4).enumerate() {
        let window = resolve_window(
            [w[0], w[1], w[2], w[3]],
            i,
            policy,
            &mut fallbacks,
        )?;
        sample_segment(
            window,
            points_per_segment,
            tension,
            i == 0,
            &mut points,
        );
    }

    if fallbacks > 0 {
        log::warn!(
            "catmull_rom_chain: substituted straight-segment tangents in \
             {fallbacks} degenerate interval(s)"
        );
    }
    log::debug!(
        "catmull_rom_chain: {n} control points -> {} curve points",
        points.len()
    );

    Ok(Curve { points })
}

fn validate(
    control_points: &[Vec3],
    points_per_segment: usize,
    tension: f32,
) -> Result<(), TubeError> {
    if control_points.len() < 2 {
        return Err(TubeError::InvalidInput(format!(
            "spline needs at least 2 control points, got {}",
            control_points.len()
        )));
    }
    if points_per_segment < 2 {
        return Err(TubeError::InvalidInput(format!(
            "spline resolution must be >= 2, got {points_per_segment}"
        )));
    }
    if !tension.is_finite() {
        return Err(TubeError::InvalidInput(format!(
            "spline tension must be finite, got {tension}"
        )));
    }
    if let Some(i) = control_points.iter().position(|p| !p.is_finite()) {
        return Err(TubeError::InvalidInput(format!(
            "control point {i} is not finite"
        )));
    }
    Ok(())
}

/// Replace the neighbours of a window whose tangent estimate would vanish.
///
/// Window `index` spans control points `index` and `index + 1`.
fn resolve_window(
    window: [Vec3; 4],
    index: usize,
    policy: DegeneratePolicy,
    fallbacks: &mut usize,
) -> Result<[Vec3; 4], TubeError> {
    let [mut p0, p1, p2, mut p3] = window;

    if is_degenerate(p2 - p1) {
        if policy == DegeneratePolicy::Fail {
            return Err(TubeError::DegenerateGeometry(format!(
                "control points {index} and {} coincide",
                index + 1
            )));
        }
        *fallbacks += 1;
        // Stationary interval: every sample sits on the shared point.
        return Ok([p1; 4]);
    }

    // Tangent at p1 is proportional to p2 - p0; it vanishes where the trace
    // doubles back on itself.
    if is_degenerate(p2 - p0) {
        if policy == DegeneratePolicy::Fail {
            return Err(TubeError::DegenerateGeometry(format!(
                "zero-length tangent at control point {index}"
            )));
        }
        *fallbacks += 1;
        p0 = p1 * 2.0 - p2;
    }
    if is_degenerate(p3 - p1) {
        if policy == DegeneratePolicy::Fail {
            return Err(TubeError::DegenerateGeometry(format!(
                "zero-length tangent at control point {}",
                index + 1
            )));
        }
        *fallbacks += 1;
        p3 = p2 * 2.0 - p1;
    }

    Ok([p0, p1, p2, p3])
}

/// Sample one interval of the chain into `out`.
///
/// The `t = 0` sample is only written for the first interval; every other
/// interval starts where the previous one ended. The ends are written as
/// the exact control points rather than evaluated.
fn sample_segment(
    [p0, p1, p2, p3]: [Vec3; 4],
    points_per_segment: usize,
    a: f32,
    include_start: bool,
    out: &mut PointBuffer,
) {
    let c1 = 0.5 * a * (p2 - p0);
    let c2 = 0.5
        * (2.0 * a * p0 + (a - 6.0) * p1 - 2.0 * (a - 3.0) * p2 - a * p3);
    let c3 = 0.5 * (-a * p0 + (4.0 - a) * p1 + (a - 4.0) * p2 + a * p3);

    let last = points_per_segment - 1;
    let first = usize::from(!include_start);
    for j in first..=last {
        let pos = if j == 0 {
            p1
        } else if j == last {
            p2
        } else {
            let t = j as f32 / last as f32;
            p1 + t * (c1 + t * (c2 + t * c3))
        };
        out.push(pos);
    }
}
