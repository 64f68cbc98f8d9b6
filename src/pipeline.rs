//! End-to-end tube generation: control points → curve → frames → mesh.
//!
//! [`TubePipeline`] runs the three geometry stages with one validated
//! [`Options`]; [`TubeGeometryCache`] wraps it for callers that resubmit
//! the same trace every frame.

use glam::Vec3;

use crate::error::TubeError;
use crate::geometry::frame::compute_rmf_with_policy;
use crate::geometry::spline::catmull_rom_chain_with_policy;
use crate::geometry::{Curve, FrameSet, TubeMesh, TubeMeshBuilder};
use crate::options::Options;
use crate::util::hash::geometry_key;

/// Everything generated from one control-point trace.
#[derive(Debug, Clone)]
pub struct TubeGeometry {
    /// Interpolated centerline.
    pub curve: Curve,
    /// One rotation-minimizing frame per curve sample.
    pub frames: FrameSet,
    /// Side surface plus optional caps.
    pub mesh: TubeMesh,
}

/// Validated geometry options, ready to turn traces into tubes.
#[derive(Debug, Clone)]
pub struct TubePipeline {
    options: Options,
}

impl TubePipeline {
    /// Fails with [`TubeError::InvalidInput`] when the options cannot
    /// produce geometry.
    pub fn new(options: &Options) -> Result<Self, TubeError> {
        options.validate()?;
        Ok(Self {
            options: options.clone(),
        })
    }

    /// The options this pipeline runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run every stage on `control_points`.
    pub fn run(
        &self,
        control_points: &[Vec3],
    ) -> Result<TubeGeometry, TubeError> {
        let opts = &self.options;
        let policy = opts.degenerate_policy;

        let curve = catmull_rom_chain_with_policy(
            control_points,
            opts.spline.resolution as usize,
            opts.spline.tension,
            policy,
        )?;
        let frames = compute_rmf_with_policy(&curve, policy)?;

        let mesh = TubeMeshBuilder::new(
            &curve,
            &frames,
            opts.tube.radius,
            opts.tube.radial_segments as usize,
        )?
        .with_shading(opts.tube.shading)
        .build(opts.tube.caps)?;

        Ok(TubeGeometry {
            curve,
            frames,
            mesh,
        })
    }
}

/// Regenerates geometry only when the trace or geometry options change.
#[derive(Debug)]
pub struct TubeGeometryCache {
    pipeline: TubePipeline,
    last_hash: Option<u64>,
    geometry: Option<TubeGeometry>,
}

impl TubeGeometryCache {
    /// Empty cache over a validated pipeline.
    pub fn new(options: &Options) -> Result<Self, TubeError> {
        Ok(Self {
            pipeline: TubePipeline::new(options)?,
            last_hash: None,
            geometry: None,
        })
    }

    /// Swap in new options. Cached geometry is kept and regenerated on the
    /// next [`update`](Self::update) only if the geometry key changed.
    pub fn set_options(
        &mut self,
        options: &Options,
    ) -> Result<(), TubeError> {
        self.pipeline = TubePipeline::new(options)?;
        Ok(())
    }

    /// Geometry for `control_points`, rebuilt only on change.
    ///
    /// Returns `true` alongside the geometry when it was regenerated. On
    /// error the previous geometry is dropped so stale output is never
    /// served for a trace that failed.
    pub fn update(
        &mut self,
        control_points: &[Vec3],
    ) -> Result<(&TubeGeometry, bool), TubeError> {
        let new_hash = geometry_key(control_points, self.pipeline.options());
        let regenerated =
            self.last_hash != Some(new_hash) || self.geometry.is_none();
        if regenerated {
            self.last_hash = None;
            self.geometry = None;
            let geometry = self.pipeline.run(control_points)?;
            self.last_hash = Some(new_hash);
            self.geometry = Some(geometry);
        }
        match &self.geometry {
            Some(geometry) => Ok((geometry, regenerated)),
            None => Err(TubeError::InvalidInput(
                "tube geometry cache is empty".to_owned(),
            )),
        }
    }

    /// Last successfully generated geometry.
    #[must_use]
    pub fn geometry(&self) -> Option<&TubeGeometry> {
        self.geometry.as_ref()
    }

    /// Forget the cached geometry so the next update regenerates.
    pub fn invalidate(&mut self) {
        self.last_hash = None;
        self.geometry = None;
    }
}
