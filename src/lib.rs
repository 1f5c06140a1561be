pub mod config;
pub mod elevation;
pub mod error;
pub mod features;
pub mod grid;
pub mod noise;
pub mod render;
pub mod rng;

use std::time::Instant;

use tracing::{debug, info};

use config::Params;
use error::ParamError;
use features::SeedLayout;
use grid::Grid;
use noise::{GradientNoise, NoiseSource};
use rng::seed_u32;

const SALT_LATTICE: u64 = 0x1A77_1CE5_EED0_0001;

/// A generated heightmap plus the layout it was built from.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub height: Grid<f32>,
    pub layout: SeedLayout,
    pub max_height: f32,
}

impl Terrain {
    /// Height of cell (x, y) in world units.
    pub fn world_height(&self, x: usize, y: usize) -> f32 {
        self.height.get(x, y) * self.max_height
    }
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// The noise every generation run samples, derived from the seed.
pub fn lattice_noise(seed: u64) -> GradientNoise {
    GradientNoise::new(seed_u32(seed, SALT_LATTICE))
}

/// Parameters in, height grid out. Values are in [0, 1], row-major.
pub fn generate(params: &Params) -> Result<Grid<f32>, ParamError> {
    generate_with_noise(params, &lattice_noise(params.seed))
}

/// Same as `generate` with a caller-supplied noise function.
pub fn generate_with_noise<N: NoiseSource>(
    params: &Params,
    noise: &N,
) -> Result<Grid<f32>, ParamError> {
    params.validate()?;
    let layout = SeedLayout::from_seed(params);
    Ok(elevation::build_elevation(params, &layout, noise))
}

/// Generate and keep the derived layout, recording per-stage timings.
pub fn generate_timed(params: &Params) -> Result<(Terrain, Vec<Timing>), ParamError> {
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Offsets and large hills from the seed
    let t = Instant::now();
    let layout = SeedLayout::from_seed(params);
    timings.push(Timing {
        name: "layout",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Per-cell composition
    let t = Instant::now();
    let noise = lattice_noise(params.seed);
    let height = elevation::build_elevation(params, &layout, &noise);
    timings.push(Timing {
        name: "elevation",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    for t in &timings {
        debug!(stage = t.name, ms = t.ms, "stage finished");
    }
    info!(
        "Generated {}x{} terrain with max height {} (seed={}, large hills={})",
        params.width,
        params.height,
        params.max_height,
        params.seed,
        layout.features.len()
    );

    let terrain = Terrain {
        height,
        layout,
        max_height: params.max_height,
    };

    Ok((terrain, timings))
}
