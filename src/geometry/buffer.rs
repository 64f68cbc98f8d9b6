//! Contiguous stride-3 point storage.

use glam::Vec3;

use crate::error::TubeError;

/// Flat `f32` buffer addressed as a sequence of 3-component points.
///
/// Every stage of the pipeline writes its output into one of these instead
/// of a `Vec<Vec3>` so the data can be handed to a renderer as-is (see
/// [`PointBuffer::as_bytes`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBuffer {
    data: Vec<f32>,
}

impl PointBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `points` points.
    #[must_use]
    pub fn with_capacity(points: usize) -> Self {
        Self {
            data: Vec::with_capacity(points * 3),
        }
    }

    /// Copy a slice of points into a new buffer.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().copied().collect()
    }

    /// Wrap an interleaved `[x, y, z, x, y, z, ...]` vector.
    pub fn from_flat(data: Vec<f32>) -> Result<Self, TubeError> {
        if data.len() % 3 != 0 {
            return Err(TubeError::InvalidInput(format!(
                "flat point buffer length {} is not a multiple of 3",
                data.len()
            )));
        }
        Ok(Self { data })
    }

    /// Number of points stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    /// Whether the buffer holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The point at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.data[i * 3..i * 3 + 3])
    }

    /// The point at index `i`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<Vec3> {
        self.data.get(i * 3..i * 3 + 3).map(Vec3::from_slice)
    }

    /// First point, if any.
    #[must_use]
    pub fn first(&self) -> Option<Vec3> {
        self.get(0)
    }

    /// Last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Vec3> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Append a point.
    pub fn push(&mut self, p: Vec3) {
        self.data.extend_from_slice(&p.to_array());
    }

    /// Append every point of `other`.
    pub fn extend_from(&mut self, other: &Self) {
        self.data.extend_from_slice(&other.data);
    }

    /// Iterate over the stored points.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.data.chunks_exact(3).map(Vec3::from_slice)
    }

    /// Copy the points out into a `Vec<Vec3>`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Vec3> {
        self.iter().collect()
    }

    /// The raw interleaved components.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Consume the buffer, returning the raw interleaved components.
    #[must_use]
    pub fn into_flat(self) -> Vec<f32> {
        self.data
    }

    /// Byte view for vertex-buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl FromIterator<Vec3> for PointBuffer {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buffer = Self::with_capacity(iter.size_hint().0);
        for p in iter {
            buffer.push(p);
        }
        buffer
    }
}
