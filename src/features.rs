//! Seed-derived layout (noise offsets + large hills) and the large-hill field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Params;
use crate::noise::NoiseSource;
use crate::rng::SeedStream;

/// Noise offsets are drawn from [0, OFFSET_RANGE).
pub const OFFSET_RANGE: f32 = 10_000.0;
/// Large hill centers stay this far from every grid edge.
pub const PLACEMENT_MARGIN: f32 = 0.15;

/// Shift between the roughness samples of consecutive hills.
const FEATURE_DECORRELATION: f32 = 1000.0;
/// Roughness frequency is ROUGHNESS_FREQUENCY / radius.
const ROUGHNESS_FREQUENCY: f32 = 4.0;

/// Translation applied to every noise sample coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OffsetPair {
    pub x: f32,
    pub y: f32,
}

/// A large hill: normalized center and radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LargeFeature {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything a run derives from its seed. Read-only once built, so it can be
/// shared across the row workers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedLayout {
    pub offset: OffsetPair,
    pub features: Vec<LargeFeature>,
}

impl SeedLayout {
    /// Draw order: offset x, offset y, then x, y, radius for each hill.
    pub fn derive(stream: &mut SeedStream, params: &Params) -> Self {
        let offset = OffsetPair {
            x: stream.range_f32(0.0, OFFSET_RANGE),
            y: stream.range_f32(0.0, OFFSET_RANGE),
        };

        let lo = PLACEMENT_MARGIN;
        let hi = 1.0 - PLACEMENT_MARGIN;
        let features = (0..params.num_large_hills)
            .map(|i| {
                let x = stream.range_f32(lo, hi);
                let y = stream.range_f32(lo, hi);
                let radius =
                    stream.range_f32(params.large_hill_min_size, params.large_hill_max_size);
                debug!(index = i, x, y, radius, "placed large hill");
                LargeFeature { x, y, radius }
            })
            .collect();

        Self { offset, features }
    }

    /// Derive from a fresh stream seeded with `params.seed`.
    pub fn from_seed(params: &Params) -> Self {
        let mut stream = SeedStream::new(params.seed);
        Self::derive(&mut stream, params)
    }
}

impl LargeFeature {
    /// Height this hill contributes at (x, y). Never negative; rough peaks may
    /// rise above `large_hill_height`, the compositor clamps the total.
    ///
    /// Falloff is a squared ease-out reaching zero at the radius. Above
    /// `flat_area_threshold` the slope is perturbed by noise sampled at a
    /// frequency tied to the hill's size; the part at or below the threshold
    /// stays smooth.
    pub fn contribution<N: NoiseSource>(
        &self,
        index: usize,
        x: f32,
        y: f32,
        offset: OffsetPair,
        params: &Params,
        noise: &N,
    ) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= self.radius {
            return 0.0;
        }

        let falloff = 1.0 - dist / self.radius;
        let amplitude = params.large_hill_height;
        let base = falloff * falloff * amplitude;

        let threshold = params.flat_area_threshold;
        if base <= threshold || params.mountain_roughness == 0.0 {
            return base;
        }

        let freq = ROUGHNESS_FREQUENCY / self.radius;
        let shift = index as f32 * FEATURE_DECORRELATION;
        let n = noise.sample(x * freq + offset.x + shift, y * freq + offset.y + shift);
        let perturbation = (n - 0.5) * params.mountain_roughness;

        // flat part + mountain part * (1 + perturbation)
        let rough = base + (base - threshold) * perturbation;
        rough.max(0.0)
    }
}

/// Combined large-hill height at (x, y): the maximum over all hills, so
/// overlapping hills never stack.
pub fn feature_field<N: NoiseSource>(
    x: f32,
    y: f32,
    layout: &SeedLayout,
    params: &Params,
    noise: &N,
) -> f32 {
    layout
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| f.contribution(i, x, y, layout.offset, params, noise))
        .fold(0.0, f32::max)
}
