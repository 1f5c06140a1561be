use crate::rng::hash2;

/// Smooth coherent 2D noise with output in [0, 1].
/// The same coordinates must always give the same value.
pub trait NoiseSource: Sync {
    fn sample(&self, x: f32, y: f32) -> f32;
}

/// Gradient noise on a hashed lattice, remapped to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientNoise {
    seed: u32,
}

impl GradientNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl NoiseSource for GradientNoise {
    #[inline]
    fn sample(&self, x: f32, y: f32) -> f32 {
        (gradient_noise(x, y, self.seed) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Lattice cell and fractional offset of `v`. The cell index wraps to i32,
/// it only feeds the corner hash.
#[inline]
fn lattice_cell(v: f32) -> (i32, f32) {
    let cell = (v as f64).floor();
    let frac = (v as f64 - cell) as f32;
    (cell as i64 as i32, if frac.is_finite() { frac } else { 0.0 })
}

/// 2D gradient noise (Perlin-style). Better isotropy than value noise --
/// no grid-aligned diagonal artifacts.
#[inline]
pub fn gradient_noise(x: f32, y: f32, seed: u32) -> f32 {
    let (ix, fx) = lattice_cell(x);
    let (iy, fy) = lattice_cell(y);
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    #[inline]
    fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
        // 16 evenly-spaced unit gradients (every 22.5°).
        match hash & 15 {
            0  =>  dx,
            1  =>  0.924 * dx + 0.383 * dy,
            2  =>  0.707 * (dx + dy),
            3  =>  0.383 * dx + 0.924 * dy,
            4  =>  dy,
            5  => -0.383 * dx + 0.924 * dy,
            6  =>  0.707 * (-dx + dy),
            7  => -0.924 * dx + 0.383 * dy,
            8  => -dx,
            9  => -0.924 * dx - 0.383 * dy,
            10 =>  0.707 * (-dx - dy),
            11 => -0.383 * dx - 0.924 * dy,
            12 => -dy,
            13 =>  0.383 * dx - 0.924 * dy,
            14 =>  0.707 * (dx - dy),
            _  =>  0.924 * dx - 0.383 * dy,
        }
    }

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let (jx, jy) = (ix.wrapping_add(1), iy.wrapping_add(1));
    let v10 = grad(hash2(jx, iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, jy, seed), fx, fy - 1.0);
    let v11 = grad(hash2(jx, jy, seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    // Scale to approximately [-1, 1] range (raw range is ~[-0.7, 0.7])
    lerp(a, b, sy) * 1.414
}
