use std::path::Path;

use image::{ImageBuffer, Luma};
use rayon::prelude::*;

use crate::error::Error;
use crate::grid::Grid;

/// Grayscale RGBA8, black = 0 and white = 1. Values are not re-stretched, so
/// images of different seeds compare directly.
pub fn render_heightmap(height: &Grid<f32>) -> Vec<u8> {
    let w = height.w;
    let mut rgba = vec![0u8; height.data.len() * 4];

    rgba.par_chunks_mut(w * 4)
        .zip(height.data.par_chunks(w))
        .for_each(|(out, row)| {
            for (px, &v) in out.chunks_exact_mut(4).zip(row) {
                let g = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                px.copy_from_slice(&[g, g, g, 255]);
            }
        });

    rgba
}

/// 16-bit luma, the usual interchange format for terrain heightmaps.
pub fn heightmap_luma16(height: &Grid<f32>) -> Vec<u16> {
    height
        .data
        .par_iter()
        .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16)
        .collect()
}

/// Scale the normalized grid to world units.
pub fn world_heights(height: &Grid<f32>, max_height: f32) -> Grid<f32> {
    Grid {
        data: height.data.iter().map(|&v| v * max_height).collect(),
        w: height.w,
        h: height.h,
    }
}

pub fn save_heightmap_png(path: impl AsRef<Path>, height: &Grid<f32>) -> Result<(), Error> {
    let rgba = render_heightmap(height);
    image::save_buffer(
        path,
        &rgba,
        height.w as u32,
        height.h as u32,
        image::ColorType::Rgba8,
    )?;
    Ok(())
}

pub fn save_heightmap_png16(path: impl AsRef<Path>, height: &Grid<f32>) -> Result<(), Error> {
    let data = heightmap_luma16(height);
    let len = data.len();
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(height.w as u32, height.h as u32, data).ok_or(
            Error::BufferSize {
                len,
                width: height.w,
                height: height.h,
            },
        )?;
    img.save(path)?;
    Ok(())
}
