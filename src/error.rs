use std::io;
use thiserror::Error;

/// Rejected generation parameters. Raised before any grid memory is allocated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid of {width}x{height} cells does not fit in memory")]
    GridTooLarge { width: usize, height: usize },

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("parameter `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("parameter `{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("large hill size range is inverted: min {min} > max {max}")]
    InvertedRadius { min: f32, max: f32 },
}

/// Errors from the I/O surfaces (config files, image export).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Buffer of {len} samples does not match a {width}x{height} image")]
    BufferSize { len: usize, width: usize, height: usize },
}
