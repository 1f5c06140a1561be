use rayon::prelude::*;

use crate::config::Params;
use crate::features::{SeedLayout, feature_field};
use crate::grid::{Grid, normalized};
use crate::noise::NoiseSource;

/// Moves detail samples away from the rolling-hill samples.
const DETAIL_SHIFT: f32 = 1000.0;

/// Final height at normalized (x, y): rolling hills, plus large hills, plus
/// optional fine detail, clamped to [0, 1].
pub fn height_at<N: NoiseSource>(
    x: f32,
    y: f32,
    layout: &SeedLayout,
    params: &Params,
    noise: &N,
) -> f32 {
    let off = layout.offset;

    let hill_noise = noise.sample(
        x * params.hill_scale + off.x,
        y * params.hill_scale + off.y,
    );
    let mut height = hill_noise * params.hill_height;

    height += feature_field(x, y, layout, params, noise);

    if params.detail_amount > 0.0 {
        let detail_noise = noise.sample(
            x * params.detail_scale + off.x + DETAIL_SHIFT,
            y * params.detail_scale + off.y + DETAIL_SHIFT,
        );
        height += (detail_noise - 0.5) * params.detail_amount;
    }

    height.clamp(0.0, 1.0)
}

/// Evaluate every cell. Rows run in parallel and each worker writes only its
/// own row.
pub fn build_elevation<N: NoiseSource>(
    params: &Params,
    layout: &SeedLayout,
    noise: &N,
) -> Grid<f32> {
    let w = params.width;
    let h = params.height;

    let mut height = Grid::<f32>::new(w, h);
    height
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let v = normalized(y, h);
            for (x, cell) in row.iter_mut().enumerate() {
                let u = normalized(x, w);
                *cell = height_at(u, v, layout, params, noise);
            }
        });

    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{LargeFeature, OffsetPair};
    use crate::noise::GradientNoise;

    /// Noise equal to the sum of the coordinates' fractional parts, halved.
    struct Ramp;

    impl NoiseSource for Ramp {
        fn sample(&self, x: f32, y: f32) -> f32 {
            (x.fract() + y.fract()) * 0.5
        }
    }

    fn no_features() -> SeedLayout {
        SeedLayout {
            offset: OffsetPair { x: 10.0, y: 20.0 },
            features: Vec::new(),
        }
    }

    #[test]
    fn broad_layer_alone() {
        let params = Params {
            hill_scale: 2.0,
            hill_height: 0.6,
            num_large_hills: 0,
            detail_amount: 0.0,
            ..Params::default()
        };
        let layout = no_features();
        // noise(0.25 * 2 + 10, 0.5 * 2 + 20) = (0.5 + 0.0) / 2
        let v = height_at(0.25, 0.5, &layout, &params, &Ramp);
        approx::assert_relative_eq!(v, 0.25 * 0.6, epsilon = 1e-6);
    }

    #[test]
    fn detail_is_centered_on_zero() {
        let params = Params {
            hill_height: 0.0,
            detail_amount: 0.2,
            detail_scale: 10.0,
            ..Params::default()
        };
        let layout = no_features();
        // Detail sample lands on integer coordinates, ramp gives 0 -> -0.1, clamped.
        assert_eq!(height_at(0.0, 0.0, &layout, &params, &Ramp), 0.0);
        // fract(0.05 * 10) = 0.5 on both axes -> noise 0.5 -> no change.
        let v = height_at(0.05, 0.05, &layout, &params, &Ramp);
        approx::assert_relative_eq!(v, 0.0, epsilon = 1e-4);
        // fract(0.09 * 10) = 0.9 on both axes -> noise 0.9 -> +0.08.
        let v = height_at(0.09, 0.09, &layout, &params, &Ramp);
        approx::assert_relative_eq!(v, 0.08, epsilon = 1e-3);
    }

    #[test]
    fn tall_terrain_is_clamped() {
        let params = Params {
            hill_height: 1.0,
            large_hill_height: 1.0,
            mountain_roughness: 0.0,
            detail_amount: 0.0,
            ..Params::default()
        };
        let layout = SeedLayout {
            offset: OffsetPair { x: 0.9, y: 0.9 },
            features: vec![LargeFeature { x: 0.5, y: 0.5, radius: 0.4 }],
        };
        assert_eq!(height_at(0.5, 0.5, &layout, &params, &Ramp), 1.0);
    }

    #[test]
    fn grid_matches_pointwise_evaluation() {
        let params = Params {
            width: 17,
            height: 9,
            ..Params::default()
        };
        let layout = SeedLayout::from_seed(&params);
        let noise = GradientNoise::new(3);
        let grid = build_elevation(&params, &layout, &noise);

        assert_eq!((grid.w, grid.h), (17, 9));
        for y in 0..9 {
            for x in 0..17 {
                let expected = height_at(x as f32 / 17.0, y as f32 / 9.0, &layout, &params, &noise);
                assert_eq!(grid.get(x, y).to_bits(), expected.to_bits());
            }
        }
    }

    #[test]
    fn every_cell_is_normalized() {
        let params = Params {
            width: 64,
            height: 48,
            hill_height: 1.0,
            large_hill_height: 1.0,
            mountain_roughness: 1.0,
            flat_area_threshold: 0.0,
            detail_amount: 0.2,
            num_large_hills: 10,
            ..Params::default()
        };
        let layout = SeedLayout::from_seed(&params);
        let grid = build_elevation(&params, &layout, &GradientNoise::new(8));
        assert!(grid.data.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
