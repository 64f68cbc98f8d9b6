//! Rotation-minimizing frames along a sampled curve.
//!
//! Frames are propagated with the double reflection method (Wang et al.
//! 2008): the previous reference vector is reflected across the chord to
//! the current point, then across the bisector of the two chord
//! directions. No curvature is involved, so the frame does not flip where
//! the curve straightens out or bends the other way.

use glam::Vec3;

use super::{is_degenerate, Curve, DegeneratePolicy, PointBuffer};
use crate::error::TubeError;

/// Orthonormal local frame at one curve sample.
///
/// `binormal = tangent × reference`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Unit direction of travel.
    pub tangent: Vec3,
    /// Unit vector orthogonal to the tangent; the ring's cos axis.
    pub reference: Vec3,
    /// Unit `tangent × reference`; the ring's sin axis.
    pub binormal: Vec3,
}

impl Frame {
    /// Build a frame from a unit tangent and a unit reference orthogonal
    /// to it.
    #[must_use]
    pub fn new(tangent: Vec3, reference: Vec3) -> Self {
        Self {
            tangent,
            reference,
            binormal: tangent.cross(reference),
        }
    }

    /// Whether all three axes are unit length and mutually orthogonal
    /// within `eps`.
    #[must_use]
    pub fn is_orthonormal(&self, eps: f32) -> bool {
        let Self {
            tangent: t,
            reference: r,
            binormal: c,
        } = *self;
        (t.length() - 1.0).abs() < eps
            && (r.length() - 1.0).abs() < eps
            && (c.length() - 1.0).abs() < eps
            && t.dot(r).abs() < eps
            && t.dot(c).abs() < eps
            && r.dot(c).abs() < eps
    }
}

/// One [`Frame`] per curve sample, aligned index-for-index with the
/// [`Curve`] it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Wrap precomputed frames.
    #[must_use]
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `i`, if present.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Frame> {
        self.frames.get(i)
    }

    /// All frames in curve order.
    #[must_use]
    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate over the frames in curve order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Tangent of every frame as a point buffer.
    #[must_use]
    pub fn tangents(&self) -> PointBuffer {
        self.frames.iter().map(|f| f.tangent).collect()
    }

    /// Reference vector of every frame as a point buffer.
    #[must_use]
    pub fn references(&self) -> PointBuffer {
        self.frames.iter().map(|f| f.reference).collect()
    }

    /// Binormal of every frame as a point buffer.
    #[must_use]
    pub fn binormals(&self) -> PointBuffer {
        self.frames.iter().map(|f| f.binormal).collect()
    }

    /// Sum of the signed angles (radians) by which each reference vector is
    /// rotated about its tangent relative to the previous reference
    /// projected into the same normal plane.
    ///
    /// Close to zero for a rotation-minimizing frame; a frame that flips
    /// contributes ±π per flip.
    #[must_use]
    pub fn accumulated_twist(&self) -> f32 {
        self.step_twists().sum()
    }

    /// Per-step twist angles (radians), `len() - 1` entries.
    pub fn step_twists(&self) -> impl Iterator<Item = f32> + '_ {
        self.frames.windows(2).map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            let t = cur.tangent;
            let projected = prev.reference - t * t.dot(prev.reference);
            if is_degenerate(projected) {
                return 0.0;
            }
            let p = projected.normalize();
            t.dot(p.cross(cur.reference)).atan2(p.dot(cur.reference))
        })
    }
}

/// Rotation-minimizing frames for every curve sample, with the
/// [`Fallback`] degenerate policy.
///
/// [`Fallback`]: DegeneratePolicy::Fallback
pub fn compute_rmf(curve: &Curve) -> Result<FrameSet, TubeError> {
    compute_rmf_with_policy(curve, DegeneratePolicy::Fallback)
}

/// Rotation-minimizing frames with an explicit policy for duplicate
/// samples and cusps.
///
/// The tangent at sample `i` is the direction to sample `i + 1`; the last
/// sample reuses the final segment direction. The first reference is the
/// world up axis (+Y) projected off the first tangent, or +Z when the
/// tangent is nearly vertical.
pub fn compute_rmf_with_policy(
    curve: &Curve,
    policy: DegeneratePolicy,
) -> Result<FrameSet, TubeError> {
    let n = curve.len();
    if n < 2 {
        return Err(TubeError::InvalidInput(format!(
            "frame propagation needs at least 2 curve points, got {n}"
        )));
    }
    if let Some(i) = curve.iter().position(|p| !p.is_finite()) {
        return Err(TubeError::InvalidInput(format!(
            "curve point {i} is not finite"
        )));
    }

    let mut fallbacks = 0_usize;
    let t0 = initial_tangent(curve, policy, &mut fallbacks)?;
    let mut frames = Vec::with_capacity(n);
    frames.push(Frame::new(t0, initial_reference(t0)));

    for i in 1..n {
        let v1 = curve.point(i) - curve.point(i - 1);
        let v2 = if i + 1 < n {
            curve.point(i + 1) - curve.point(i)
        } else {
            v1
        };
        let frame =
            propagate(&frames[i - 1], v1, v2, i, policy, &mut fallbacks)?;
        frames.push(frame);
    }

    if fallbacks > 0 {
        log::warn!(
            "compute_rmf: {fallbacks} degenerate step(s) resolved by \
             fallback"
        );
    }

    let set = FrameSet { frames };
    log::debug!(
        "compute_rmf: {n} frames, accumulated twist {:.2e} rad",
        set.accumulated_twist()
    );
    Ok(set)
}

/// Direction from sample 0 to sample 1, or the first non-zero segment when
/// the curve starts with duplicate samples.
fn initial_tangent(
    curve: &Curve,
    policy: DegeneratePolicy,
    fallbacks: &mut usize,
) -> Result<Vec3, TubeError> {
    let first = curve.point(1) - curve.point(0);
    if !is_degenerate(first) {
        return Ok(first.normalize());
    }
    if policy == DegeneratePolicy::Fail {
        return Err(TubeError::DegenerateGeometry(
            "curve points 0 and 1 coincide".to_owned(),
        ));
    }
    *fallbacks += 1;
    Ok((1..curve.len() - 1)
        .map(|i| curve.point(i + 1) - curve.point(i))
        .find(|d| !is_degenerate(*d))
        .map_or(Vec3::X, Vec3::normalize))
}

fn initial_reference(tangent: Vec3) -> Vec3 {
    let up = if tangent.y.abs() < 0.99 { Vec3::Y } else { Vec3::Z };
    (up - tangent * tangent.dot(up)).normalize()
}

/// Reflect `v` across the plane through the origin with normal `n`.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - (2.0 / n.dot(n)) * n.dot(v) * n
}

/// Advance `prev` to sample `index`.
///
/// `v1` is the chord from the previous sample, `v2` the chord to the next.
fn propagate(
    prev: &Frame,
    v1: Vec3,
    v2: Vec3,
    index: usize,
    policy: DegeneratePolicy,
    fallbacks: &mut usize,
) -> Result<Frame, TubeError> {
    let degenerate = |what: &str| {
        TubeError::DegenerateGeometry(format!("{what} at curve point {index}"))
    };

    let tangent = if is_degenerate(v2) {
        if policy == DegeneratePolicy::Fail {
            return Err(degenerate("zero-length outgoing segment"));
        }
        *fallbacks += 1;
        prev.tangent
    } else {
        v2.normalize()
    };

    // First reflection: across the incoming chord, or across the previous
    // tangent when the samples coincide. Either way the pair with the
    // second reflection is a rotation.
    let chord = if is_degenerate(v1) {
        if policy == DegeneratePolicy::Fail {
            return Err(degenerate("zero-length incoming segment"));
        }
        *fallbacks += 1;
        prev.tangent
    } else {
        v1
    };
    let r_l = reflect(prev.reference, chord);
    let t_l = reflect(prev.tangent, chord);

    // Second reflection: maps the reflected tangent onto the new one.
    let h = tangent - t_l;
    let reference = if is_degenerate(h) {
        // Cusp: the curve reverses direction exactly.
        if policy == DegeneratePolicy::Fail {
            return Err(degenerate("segment reversal"));
        }
        *fallbacks += 1;
        r_l
    } else {
        reflect(r_l, h)
    };

    let reference = reference - tangent * tangent.dot(reference);
    let reference = if is_degenerate(reference) {
        initial_reference(tangent)
    } else {
        reference.normalize()
    };

    Ok(Frame::new(tangent, reference))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use super::*;
    use crate::geometry::spline::catmull_rom_chain;

    const EPS: f32 = 1e-4;

    fn helix(samples: usize) -> Curve {
        let pts: Vec<Vec3> = (0..samples)
            .map(|i| {
                let s = 2.0 * TAU * i as f32 / (samples - 1) as f32;
                Vec3::new(s.cos(), s.sin(), 0.3 * s)
            })
            .collect();
        Curve::from_points(&pts)
    }

    /// Planar S-curve (y = sin x) whose curvature changes sign at x = π.
    fn s_curve(samples: usize) -> Curve {
        let pts: Vec<Vec3> = (0..samples)
            .map(|i| {
                let x = TAU * i as f32 / (samples - 1) as f32;
                Vec3::new(x, x.sin(), 0.0)
            })
            .collect();
        Curve::from_points(&pts)
    }

    /// Curvature-based frames, the baseline the RMF is compared against.
    fn frenet_frames(curve: &Curve) -> FrameSet {
        let n = curve.len();
        let tangents: Vec<Vec3> = (0..n)
            .map(|i| {
                let (a, b) = if i + 1 < n { (i, i + 1) } else { (i - 1, i) };
                (curve.point(b) - curve.point(a)).normalize()
            })
            .collect();
        let mut frames: Vec<Frame> = Vec::with_capacity(n);
        for i in 0..n {
            let t = tangents[i];
            let curv =
                tangents[(i + 1).min(n - 1)] - tangents[i.saturating_sub(1)];
            let normal = curv - t * t.dot(curv);
            let normal = if normal.length_squared() > 1e-12 {
                normal.normalize()
            } else if let Some(prev) = frames.last() {
                prev.reference
            } else {
                initial_reference(t)
            };
            frames.push(Frame::new(t, normal));
        }
        FrameSet::from_frames(frames)
    }

    #[test]
    fn frames_are_orthonormal_on_a_helix() {
        let frames = compute_rmf(&helix(200)).unwrap();
        assert_eq!(frames.len(), 200);
        for (i, f) in frames.iter().enumerate() {
            assert!(f.is_orthonormal(EPS), "frame {i}: {f:?}");
        }
    }

    #[test]
    fn frames_are_orthonormal_on_an_interpolated_trace() {
        let ctrl = [
            Vec3::ZERO,
            Vec3::new(3.8, 0.0, 0.0),
            Vec3::new(5.0, 3.5, 0.5),
            Vec3::new(3.0, 6.0, 2.0),
            Vec3::new(0.5, 5.0, 4.0),
            Vec3::new(0.0, 1.5, 5.5),
        ];
        let curve = catmull_rom_chain(&ctrl, 10, 1.0).unwrap();
        let frames = compute_rmf(&curve).unwrap();
        assert_eq!(frames.len(), curve.len());
        for (i, f) in frames.iter().enumerate() {
            assert!(f.is_orthonormal(EPS), "frame {i}: {f:?}");
        }
    }

    #[test]
    fn collinear_curve_keeps_x_tangent() {
        let pts: Vec<Vec3> =
            (0..4).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let frames = compute_rmf(&Curve::from_points(&pts)).unwrap();
        for f in frames.iter() {
            assert!((f.tangent - Vec3::X).length() < EPS, "{f:?}");
            assert!((f.reference - Vec3::Y).length() < EPS, "{f:?}");
            assert!((f.binormal - Vec3::Z).length() < EPS, "{f:?}");
        }
    }

    #[test]
    fn tangents_follow_forward_segments() {
        let curve = helix(50);
        let frames = compute_rmf(&curve).unwrap();
        let n = curve.len();
        for i in 0..n {
            let expected = if i + 1 < n {
                (curve.point(i + 1) - curve.point(i)).normalize()
            } else {
                (curve.point(i) - curve.point(i - 1)).normalize()
            };
            let got = frames.get(i).unwrap().tangent;
            assert!((got - expected).length() < EPS, "tangent {i}");
        }
    }

    #[test]
    fn planar_curve_has_no_net_twist_unlike_frenet() {
        let curve = s_curve(120);
        let rmf = compute_rmf(&curve).unwrap();
        let rmf_twist: f32 = rmf.step_twists().map(f32::abs).sum();
        assert!(rmf_twist < 1e-3, "rmf twist {rmf_twist}");

        let frenet = frenet_frames(&curve);
        let frenet_twist: f32 = frenet.step_twists().map(f32::abs).sum();
        assert!(
            frenet_twist > 0.9 * PI,
            "frenet baseline should flip at the inflection, got \
             {frenet_twist}"
        );
    }

    #[test]
    fn planar_curve_binormal_stays_perpendicular_to_plane() {
        let frames = compute_rmf(&s_curve(80)).unwrap();
        let b0 = frames.get(0).unwrap().binormal;
        assert!(b0.z.abs() > 1.0 - EPS);
        for f in frames.iter() {
            assert!((f.binormal - b0).length() < EPS, "{f:?}");
        }
    }

    #[test]
    fn helix_steps_rotate_minimally() {
        let frames = compute_rmf(&helix(400)).unwrap();
        for (i, twist) in frames.step_twists().enumerate() {
            assert!(twist.abs() < 1e-3, "step {i} twists by {twist}");
        }
    }

    #[test]
    fn vertical_start_picks_another_up_axis() {
        let curve = Curve::from_points(&[
            Vec3::ZERO,
            Vec3::Y,
            Vec3::new(0.0, 2.0, 0.5),
        ]);
        let frames = compute_rmf(&curve).unwrap();
        for f in frames.iter() {
            assert!(f.is_orthonormal(EPS), "{f:?}");
        }
    }

    #[test]
    fn too_short_curve_is_invalid() {
        let curve = Curve::from_points(&[Vec3::ZERO]);
        assert!(matches!(
            compute_rmf(&curve),
            Err(TubeError::InvalidInput(_))
        ));
        let nan = Curve::from_points(&[Vec3::ZERO, Vec3::splat(f32::NAN)]);
        assert!(matches!(compute_rmf(&nan), Err(TubeError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_samples_fall_back_or_fail() {
        let curve = Curve::from_points(&[
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::X,
            Vec3::X,
            Vec3::new(2.0, 1.0, 0.0),
        ]);
        let frames = compute_rmf(&curve).unwrap();
        for (i, f) in frames.iter().enumerate() {
            assert!(f.is_orthonormal(EPS), "frame {i}: {f:?}");
        }
        assert!((frames.get(0).unwrap().tangent - Vec3::X).length() < EPS);
        for (i, twist) in frames.step_twists().enumerate() {
            assert!(twist.abs() < EPS, "step {i} twists by {twist}");
        }
        let last = frames.get(4).unwrap().reference;
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((last - expected).length() < EPS, "{last}");

        let err = compute_rmf_with_policy(&curve, DegeneratePolicy::Fail);
        assert!(matches!(err, Err(TubeError::DegenerateGeometry(_))));
    }

    #[test]
    fn coincident_control_points_do_not_flip_frames() {
        let curve = catmull_rom_chain(
            &[
                Vec3::ZERO,
                Vec3::X,
                Vec3::X,
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(3.0, 1.0, 0.5),
            ],
            5,
            1.0,
        )
        .unwrap();
        let frames = compute_rmf(&curve).unwrap();
        for (i, twist) in frames.step_twists().enumerate() {
            assert!(twist.abs() < 0.05, "step {i} twists by {twist}");
        }
        for w in frames.as_slice().windows(2) {
            let jump = (w[1].reference - w[0].reference).length();
            assert!(jump < 1.0, "reference jumps by {jump}");
        }
    }

    #[test]
    fn cusp_keeps_frames_finite() {
        let curve = Curve::from_points(&[Vec3::ZERO, Vec3::X, Vec3::ZERO]);
        let frames = compute_rmf(&curve).unwrap();
        for f in frames.iter() {
            assert!(f.is_orthonormal(EPS), "{f:?}");
        }

        let err = compute_rmf_with_policy(&curve, DegeneratePolicy::Fail);
        assert!(matches!(err, Err(TubeError::DegenerateGeometry(_))));
    }

    #[test]
    fn frame_components_export_as_buffers() {
        let frames = compute_rmf(&helix(10)).unwrap();
        assert_eq!(frames.tangents().len(), 10);
        assert_eq!(
            frames.references().point(3),
            frames.get(3).unwrap().reference
        );
        assert_eq!(
            frames.binormals().point(9),
            frames.get(9).unwrap().binormal
        );
    }
}
