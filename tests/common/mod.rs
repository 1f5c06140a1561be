#![allow(dead_code)]

use heightgen::config::Params;
use heightgen::grid::Grid;

/// Small grid with the source component's default sliders.
pub fn small_params(seed: u64) -> Params {
    Params {
        width: 48,
        height: 32,
        seed,
        ..Params::default()
    }
}

/// Assert every cell lies in [0, 1].
#[track_caller]
pub fn assert_normalized(grid: &Grid<f32>) {
    assert_eq!(grid.data.len(), grid.w * grid.h, "grid storage size");
    for (i, v) in grid.data.iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(v),
            "cell ({}, {}) = {v} is outside [0, 1]",
            i % grid.w,
            i / grid.w
        );
    }
}

/// Assert two grids are identical bit for bit.
#[track_caller]
pub fn assert_bit_identical(a: &Grid<f32>, b: &Grid<f32>) {
    assert_eq!((a.w, a.h), (b.w, b.h), "grid dimensions");
    let bits = |g: &Grid<f32>| g.data.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert!(bits(a) == bits(b), "grids differ");
}
