//! Fixed-size directional light record for the renderer.
//!
//! The tube shader takes a light count plus a fixed array of directional
//! lights. This module packs [`LightingOptions`] into that layout; it never
//! touches the geometry pipeline.

use crate::options::{DirectionalLight, LightingOptions};

/// Capacity of the light array in [`LightsUniform`].
pub const MAX_LIGHTS: usize = 4;

/// One directional light, padded to 16-byte rows.
#[repr(C)]
#[derive(
    Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct LightRecord {
    /// Normalized light direction.
    pub direction: [f32; 3],
    _pad0: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    _pad1: f32,
}

/// Light count followed by [`MAX_LIGHTS`] records (144 bytes).
///
/// Records past `count` are zeroed.
#[repr(C)]
#[derive(
    Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct LightsUniform {
    /// Number of valid entries in `lights`.
    pub count: u32,
    _pad: [u32; 3],
    /// Light records, valid up to `count`.
    pub lights: [LightRecord; MAX_LIGHTS],
}

impl LightsUniform {
    /// Pack the configured lights. Lights with a zero direction are skipped
    /// first; usable lights beyond [`MAX_LIGHTS`] are dropped.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        let records: Vec<LightRecord> = options
            .lights
            .iter()
            .filter_map(|light| {
                let record = LightRecord::from_light(light);
                if record.is_none() {
                    log::warn!("skipping light with zero direction");
                }
                record
            })
            .collect();
        if records.len() > MAX_LIGHTS {
            log::warn!(
                "{} usable lights configured, only the first {MAX_LIGHTS} \
                 are used",
                records.len()
            );
        }

        let mut uniform = Self::default();
        for (slot, record) in uniform.lights.iter_mut().zip(&records) {
            *slot = *record;
            uniform.count += 1;
        }
        uniform
    }

    /// Byte view for uniform-buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl LightRecord {
    fn from_light(light: &DirectionalLight) -> Option<Self> {
        let dir = glam::Vec3::from(light.direction).try_normalize()?;
        Some(Self {
            direction: dir.into(),
            color: light.color,
            ..Self::default()
        })
    }
}
