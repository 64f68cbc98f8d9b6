//! Tube mesh generation from a curve and its frames.
//!
//! One circular ring is extruded per curve sample in the plane spanned by
//! the sample's reference and binormal vectors. Adjacent rings are
//! stitched into a triangulated side surface, and each ring can be closed
//! with a triangle fan.
//!
//! Output is non-indexed: every triangle owns its three vertices (9 floats
//! of position, 9 floats of normal) so flat shading needs no vertex
//! splitting.

use std::f32::consts::TAU;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{is_degenerate, Curve, FrameSet, PointBuffer};
use crate::error::TubeError;

/// Normal policy for the side surface.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NormalShading {
    /// One geometric face normal per triangle, oriented away from the
    /// curve. Avoids artifacts from non-planar quads.
    #[default]
    Flat,
    /// Each vertex keeps its ring normal (radial direction).
    Smooth,
}

/// Which rings get a cap fan in [`TubeMeshBuilder::build`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CapMode {
    /// No caps.
    None,
    /// Close the two open ends only. The start fan's winding is reversed
    /// so both caps face away from the tube.
    #[default]
    Ends,
    /// A fan on every ring, same as [`TubeMeshBuilder::tessellate_caps`].
    AllRings,
}

/// Interleaved position + normal record for vertex-buffer upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TubeVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit shading normal.
    pub normal: [f32; 3],
}

// ==================== RINGS ====================

/// Ring vertices and normals for every curve sample, `radial_segments`
/// entries per ring, rings in curve order.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSet {
    radial_segments: usize,
    vertices: PointBuffer,
    normals: PointBuffer,
}

impl RingSet {
    /// Number of rings (one per curve sample).
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.vertices.len() / self.radial_segments
    }

    /// Vertices per ring.
    #[must_use]
    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    /// Vertex `j` of ring `ring`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn vertex(&self, ring: usize, j: usize) -> Vec3 {
        self.vertices.point(ring * self.radial_segments + j)
    }

    /// Unit radial normal of vertex `j` of ring `ring`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn normal(&self, ring: usize, j: usize) -> Vec3 {
        self.normals.point(ring * self.radial_segments + j)
    }

    /// All ring vertices, ring-major.
    #[must_use]
    pub fn vertices(&self) -> &PointBuffer {
        &self.vertices
    }

    /// All ring normals, ring-major.
    #[must_use]
    pub fn normals(&self) -> &PointBuffer {
        &self.normals
    }
}

// ==================== SURFACES ====================

/// Triangulated side surface: 3 positions and 3 normals per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideSurface {
    positions: PointBuffer,
    normals: PointBuffer,
}

impl SideSurface {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Triangle vertex positions (9 floats per triangle).
    #[must_use]
    pub fn positions(&self) -> &PointBuffer {
        &self.positions
    }

    /// Per-vertex normals aligned with [`Self::positions`].
    #[must_use]
    pub fn normals(&self) -> &PointBuffer {
        &self.normals
    }

    /// Positions and normals interleaved for a single vertex buffer.
    #[must_use]
    pub fn interleaved(&self) -> Vec<TubeVertex> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .map(|(p, n)| TubeVertex {
                position: p.into(),
                normal: n.into(),
            })
            .collect()
    }
}

/// Cap triangle fans: `radial_segments` triangles per capped ring, each
/// `(center, ring[j], ring[j + 1])`. No normals; caps are drawn as a flat
/// fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapSurface {
    radial_segments: usize,
    positions: PointBuffer,
}

impl CapSurface {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of fans (capped rings).
    #[must_use]
    pub fn fan_count(&self) -> usize {
        if self.radial_segments == 0 {
            0
        } else {
            self.triangle_count() / self.radial_segments
        }
    }

    /// Triangle vertex positions (9 floats per triangle).
    #[must_use]
    pub fn positions(&self) -> &PointBuffer {
        &self.positions
    }

    /// Keep only the first and last fan (the tube's open ends), with their
    /// winding unchanged: both face along the tangent, so the start fan
    /// faces into the tube.
    #[must_use]
    pub fn ends(&self) -> Self {
        let fans = self.fan_count();
        if fans <= 2 {
            return self.clone();
        }
        let per_fan = self.radial_segments * 3;
        let positions = self
            .positions
            .iter()
            .take(per_fan)
            .chain(self.positions.iter().skip((fans - 1) * per_fan))
            .collect();
        Self {
            radial_segments: self.radial_segments,
            positions,
        }
    }
}

impl CapSurface {
    /// Same fans with the first one wound `(center, ring[j + 1], ring[j])`.
    fn with_start_fan_reversed(self) -> Self {
        let per_fan = self.radial_segments * 3;
        let positions = (0..self.positions.len())
            .map(|k| {
                let corner = k % 3;
                let src = if k < per_fan && corner > 0 {
                    k - corner + (3 - corner)
                } else {
                    k
                };
                self.positions.point(src)
            })
            .collect();
        Self {
            radial_segments: self.radial_segments,
            positions,
        }
    }
}

/// Final tube geometry handed to a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeMesh {
    side: SideSurface,
    caps: Option<CapSurface>,
}

impl TubeMesh {
    /// The side surface.
    #[must_use]
    pub fn side(&self) -> &SideSurface {
        &self.side
    }

    /// The cap fans, if any were requested.
    #[must_use]
    pub fn caps(&self) -> Option<&CapSurface> {
        self.caps.as_ref()
    }

    /// Side-surface triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.side.triangle_count()
    }

    /// Cap triangle count (0 without caps).
    #[must_use]
    pub fn cap_triangle_count(&self) -> usize {
        self.caps.as_ref().map_or(0, CapSurface::triangle_count)
    }

    /// Side-surface vertices interleaved for upload.
    #[must_use]
    pub fn interleaved_vertices(&self) -> Vec<TubeVertex> {
        self.side.interleaved()
    }
}

// ==================== BUILDER ====================

/// Extrudes rings along a curve and tessellates them.
///
/// Borrows the curve and frames; every operation is a pure function of
/// the constructor arguments, so they can be called in any order.
#[derive(Debug, Clone, Copy)]
pub struct TubeMeshBuilder<'a> {
    curve: &'a Curve,
    frames: &'a FrameSet,
    radius: f32,
    radial_segments: usize,
    shading: NormalShading,
}

impl<'a> TubeMeshBuilder<'a> {
    /// Validate inputs and create a builder with [`NormalShading::Flat`].
    ///
    /// Fails with [`TubeError::InvalidInput`] when `radius` is not a
    /// positive finite number, `radial_segments < 3`, the curve is empty,
    /// or `frames` is not aligned with `curve`.
    pub fn new(
        curve: &'a Curve,
        frames: &'a FrameSet,
        radius: f32,
        radial_segments: usize,
    ) -> Result<Self, TubeError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(TubeError::InvalidInput(format!(
                "tube radius must be > 0, got {radius}"
            )));
        }
        if radial_segments < 3 {
            return Err(TubeError::InvalidInput(format!(
                "a ring needs at least 3 radial segments, got \
                 {radial_segments}"
            )));
        }
        if curve.is_empty() {
            return Err(TubeError::InvalidInput(
                "tube curve has no points".to_owned(),
            ));
        }
        if frames.len() != curve.len() {
            return Err(TubeError::InvalidInput(format!(
                "{} frames for {} curve points",
                frames.len(),
                curve.len()
            )));
        }
        Ok(Self {
            curve,
            frames,
            radius,
            radial_segments,
            shading: NormalShading::Flat,
        })
    }

    /// Same builder with a different side-surface normal policy.
    #[must_use]
    pub fn with_shading(self, shading: NormalShading) -> Self {
        Self { shading, ..self }
    }

    /// The side-surface normal policy in effect.
    #[must_use]
    pub fn shading(&self) -> NormalShading {
        self.shading
    }

    /// One ring of `radial_segments` vertices per curve sample.
    ///
    /// Vertex `j` of ring `i` sits at angle `2π·j / radial_segments` from
    /// the reference vector toward the binormal; its normal is the same
    /// unit offset without the radius.
    #[must_use]
    pub fn generate_rings(&self) -> RingSet {
        let csv = self.radial_segments;
        let angles: Vec<(f32, f32)> = (0..csv)
            .map(|j| (TAU * j as f32 / csv as f32).sin_cos())
            .collect();

        let total = self.curve.len() * csv;
        let mut vertices = PointBuffer::with_capacity(total);
        let mut normals = PointBuffer::with_capacity(total);

        for (center, frame) in self.curve.iter().zip(self.frames.iter()) {
            for &(sin_a, cos_a) in &angles {
                let normal = frame.reference * cos_a + frame.binormal * sin_a;
                vertices.push(center + normal * self.radius);
                normals.push(normal);
            }
        }

        RingSet {
            radial_segments: csv,
            vertices,
            normals,
        }
    }

    /// Stitch adjacent rings into `(n - 1) · radial_segments · 2`
    /// triangles.
    ///
    /// Each quad `(ring[i][j], ring[i+1][j], ring[i+1][j+1], ring[i][j+1])`
    /// becomes triangles `(p0, p1, p2)` and `(p0, p2, p3)`. Fails with
    /// [`TubeError::InvalidInput`] when there is only one ring.
    pub fn tessellate_side(&self) -> Result<SideSurface, TubeError> {
        self.require_side()?;
        Ok(self.side_from_rings(&self.generate_rings()))
    }

    /// A triangle fan from every curve sample to its ring:
    /// `n · radial_segments` triangles.
    ///
    /// Every ring is capped; use [`CapSurface::ends`] or
    /// [`TubeMeshBuilder::build`] with [`CapMode::Ends`] to keep only the
    /// open ends.
    #[must_use]
    pub fn tessellate_caps(&self) -> CapSurface {
        let rings = self.generate_rings();
        let all: Vec<usize> = (0..rings.ring_count()).collect();
        self.caps_from_rings(&rings, &all)
    }

    /// Rings, side surface, and the requested caps in one pass.
    pub fn build(&self, caps: CapMode) -> Result<TubeMesh, TubeError> {
        self.require_side()?;
        let rings = self.generate_rings();
        let side = self.side_from_rings(&rings);
        let last = rings.ring_count() - 1;
        let caps = match caps {
            CapMode::None => None,
            CapMode::Ends => Some(
                self.caps_from_rings(&rings, &[0, last])
                    .with_start_fan_reversed(),
            ),
            CapMode::AllRings => {
                let all: Vec<usize> = (0..=last).collect();
                Some(self.caps_from_rings(&rings, &all))
            }
        };

        let mesh = TubeMesh { side, caps };
        log::debug!(
            "tube mesh: {} rings x {} segments -> {} side triangles, {} cap \
             triangles ({:?} shading)",
            rings.ring_count(),
            self.radial_segments,
            mesh.triangle_count(),
            mesh.cap_triangle_count(),
            self.shading,
        );
        Ok(mesh)
    }

    fn require_side(&self) -> Result<(), TubeError> {
        if self.curve.len() < 2 {
            return Err(TubeError::InvalidInput(format!(
                "side surface needs at least 2 rings, got {}",
                self.curve.len()
            )));
        }
        Ok(())
    }

    fn side_from_rings(&self, rings: &RingSet) -> SideSurface {
        let csv = rings.radial_segments();
        let tris = (rings.ring_count() - 1) * csv * 2;
        let mut side = SideSurface {
            positions: PointBuffer::with_capacity(tris * 3),
            normals: PointBuffer::with_capacity(tris * 3),
        };

        for i in 0..rings.ring_count() - 1 {
            for j in 0..csv {
                let k = (j + 1) % csv;
                let p = [
                    rings.vertex(i, j),
                    rings.vertex(i + 1, j),
                    rings.vertex(i + 1, k),
                    rings.vertex(i, k),
                ];
                let n = [
                    rings.normal(i, j),
                    rings.normal(i + 1, j),
                    rings.normal(i + 1, k),
                    rings.normal(i, k),
                ];
                self.emit_triangle(
                    [p[0], p[1], p[2]],
                    [n[0], n[1], n[2]],
                    &mut side,
                );
                self.emit_triangle(
                    [p[0], p[2], p[3]],
                    [n[0], n[2], n[3]],
                    &mut side,
                );
            }
        }
        side
    }

    fn emit_triangle(
        &self,
        positions: [Vec3; 3],
        ring_normals: [Vec3; 3],
        side: &mut SideSurface,
    ) {
        for p in positions {
            side.positions.push(p);
        }
        match self.shading {
            NormalShading::Smooth => {
                for n in ring_normals {
                    side.normals.push(n);
                }
            }
            NormalShading::Flat => {
                let n = face_normal(positions, ring_normals);
                for _ in 0..3 {
                    side.normals.push(n);
                }
            }
        }
    }

    fn caps_from_rings(
        &self,
        rings: &RingSet,
        ring_indices: &[usize],
    ) -> CapSurface {
        let csv = rings.radial_segments();
        let mut positions =
            PointBuffer::with_capacity(ring_indices.len() * csv * 3);
        for &i in ring_indices {
            let center = self.curve.point(i);
            for j in 0..csv {
                positions.push(center);
                positions.push(rings.vertex(i, j));
                positions.push(rings.vertex(i, (j + 1) % csv));
            }
        }
        CapSurface {
            radial_segments: csv,
            positions,
        }
    }
}

/// Unit face normal of a triangle, flipped to agree with the outward ring
/// normals of its corners. Zero-area triangles (duplicate curve samples)
/// fall back to the averaged ring normal.
fn face_normal([p0, p1, p2]: [Vec3; 3], ring_normals: [Vec3; 3]) -> Vec3 {
    let outward = ring_normals[0] + ring_normals[1] + ring_normals[2];
    let n = (p1 - p0).cross(p2 - p0);
    if is_degenerate(n) {
        return outward.normalize_or_zero();
    }
    let n = n.normalize();
    if n.dot(outward) < 0.0 {
        -n
    } else {
        n
    }
}
