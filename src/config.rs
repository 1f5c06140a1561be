use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ParamError};

/// All tunable parameters — exposed as sliders in the frontend.
/// Sizes of large hills are fractions of the unit square, so the same values
/// give the same landscape at any grid resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Grid
    pub width: usize,
    pub height: usize,
    /// World-unit multiplier for the normalized grid. Applied by consumers only.
    pub max_height: f32,
    pub seed: u64,

    // Rolling hills
    pub hill_scale: f32,
    pub hill_height: f32,

    // Large hills
    pub num_large_hills: usize,
    pub large_hill_height: f32,
    pub large_hill_min_size: f32,
    pub large_hill_max_size: f32,
    pub mountain_roughness: f32,
    pub flat_area_threshold: f32,

    // Detail
    pub detail_amount: f32,
    pub detail_scale: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            max_height: 30.0,
            seed: 12345,
            hill_scale: 2.0,
            hill_height: 0.6,
            num_large_hills: 3,
            large_hill_height: 0.8,
            large_hill_min_size: 0.15,
            large_hill_max_size: 0.4,
            mountain_roughness: 0.5,
            flat_area_threshold: 0.3,
            detail_amount: 0.1,
            detail_scale: 10.0,
        }
    }
}

// Editor slider ranges.
const GRID_RANGE: (usize, usize) = (32, 2048);
const HILL_SCALE_RANGE: (f32, f32) = (0.5, 5.0);
const LARGE_HILLS_MAX: usize = 10;
const MIN_SIZE_RANGE: (f32, f32) = (0.1, 0.5);
const MAX_SIZE_RANGE: (f32, f32) = (0.2, 0.8);
const ROUGHNESS_RANGE: (f32, f32) = (0.2, 1.0);
const DETAIL_AMOUNT_RANGE: (f32, f32) = (0.0, 0.2);
const DETAIL_SCALE_RANGE: (f32, f32) = (5.0, 20.0);

impl Params {
    /// Load a (possibly partial) JSON config. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Real-valued parameters by name, in declaration order.
    fn reals(&self) -> [(&'static str, f32); 10] {
        [
            ("max_height", self.max_height),
            ("hill_scale", self.hill_scale),
            ("hill_height", self.hill_height),
            ("large_hill_height", self.large_hill_height),
            ("large_hill_min_size", self.large_hill_min_size),
            ("large_hill_max_size", self.large_hill_max_size),
            ("mountain_roughness", self.mountain_roughness),
            ("flat_area_threshold", self.flat_area_threshold),
            ("detail_amount", self.detail_amount),
            ("detail_scale", self.detail_scale),
        ]
    }

    /// Reject parameters the generator cannot honor. Checks run in a fixed
    /// order so the same bad input always reports the same error.
    pub fn validate(&self) -> Result<(), ParamError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ParamError::EmptyGrid { width, height });
        }
        if width.checked_mul(height).is_none() {
            return Err(ParamError::GridTooLarge { width, height });
        }

        let reals = self.reals();
        if let Some(&(name, value)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::NonFinite { name, value });
        }
        // flat_area_threshold is a height, any value is meaningful.
        if let Some(&(name, value)) = reals
            .iter()
            .filter(|(name, _)| *name != "flat_area_threshold")
            .find(|(_, v)| *v < 0.0)
        {
            return Err(ParamError::Negative { name, value });
        }
        if self.max_height <= 0.0 {
            return Err(ParamError::NotPositive {
                name: "max_height",
                value: self.max_height,
            });
        }
        if self.large_hill_min_size > self.large_hill_max_size {
            return Err(ParamError::InvertedRadius {
                min: self.large_hill_min_size,
                max: self.large_hill_max_size,
            });
        }
        Ok(())
    }

    /// Pull every parameter into the range its editor slider allows.
    /// Non-finite values fall back to the default; the result always validates.
    pub fn clamp_to_ui_ranges(&self) -> Self {
        let d = Self::default();
        let clamp = |v: f32, fallback: f32, (lo, hi): (f32, f32)| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };

        let large_hill_min_size = clamp(
            self.large_hill_min_size,
            d.large_hill_min_size,
            MIN_SIZE_RANGE,
        );
        let large_hill_max_size = clamp(
            self.large_hill_max_size,
            d.large_hill_max_size,
            MAX_SIZE_RANGE,
        )
        .max(large_hill_min_size);

        Self {
            width: self.width.clamp(GRID_RANGE.0, GRID_RANGE.1),
            height: self.height.clamp(GRID_RANGE.0, GRID_RANGE.1),
            max_height: if self.max_height.is_finite() {
                self.max_height.max(1.0)
            } else {
                d.max_height
            },
            seed: self.seed,
            hill_scale: clamp(self.hill_scale, d.hill_scale, HILL_SCALE_RANGE),
            hill_height: clamp(self.hill_height, d.hill_height, (0.0, 1.0)),
            num_large_hills: self.num_large_hills.min(LARGE_HILLS_MAX),
            large_hill_height: clamp(self.large_hill_height, d.large_hill_height, (0.0, 1.0)),
            large_hill_min_size,
            large_hill_max_size,
            mountain_roughness: clamp(self.mountain_roughness, d.mountain_roughness, ROUGHNESS_RANGE),
            flat_area_threshold: clamp(self.flat_area_threshold, d.flat_area_threshold, (0.0, 1.0)),
            detail_amount: clamp(self.detail_amount, d.detail_amount, DETAIL_AMOUNT_RANGE),
            detail_scale: clamp(self.detail_scale, d.detail_scale, DETAIL_SCALE_RANGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(Params::default().validate(), Ok(()));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let params = Params { width: 0, ..Params::default() };
        assert_eq!(
            params.validate(),
            Err(ParamError::EmptyGrid { width: 0, height: 512 })
        );
    }

    #[test]
    fn overflowing_grid_is_rejected() {
        let params = Params {
            width: usize::MAX,
            height: 2,
            ..Params::default()
        };
        assert!(matches!(params.validate(), Err(ParamError::GridTooLarge { .. })));
    }

    #[test]
    fn non_finite_scale_is_rejected() {
        let params = Params {
            detail_scale: f32::INFINITY,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite { name: "detail_scale", .. })
        ));

        let params = Params {
            hill_scale: f32::NAN,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite { name: "hill_scale", .. })
        ));
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        let params = Params {
            hill_height: -0.1,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::Negative { name: "hill_height", .. })
        ));
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let params = Params {
            large_hill_min_size: 0.5,
            large_hill_max_size: 0.2,
            ..Params::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamError::InvertedRadius { min: 0.5, max: 0.2 })
        );
    }

    #[test]
    fn equal_radius_bounds_are_valid() {
        let params = Params {
            large_hill_min_size: 0.3,
            large_hill_max_size: 0.3,
            ..Params::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn clamping_repairs_out_of_range_input() {
        let wild = Params {
            width: 4,
            height: 100_000,
            max_height: 0.0,
            hill_scale: f32::NAN,
            num_large_hills: 50,
            large_hill_min_size: 0.5,
            large_hill_max_size: 0.2,
            mountain_roughness: 3.0,
            detail_scale: -1.0,
            ..Params::default()
        };
        let clamped = wild.clamp_to_ui_ranges();
        assert_eq!(clamped.width, 32);
        assert_eq!(clamped.height, 2048);
        assert_eq!(clamped.max_height, 1.0);
        assert_eq!(clamped.hill_scale, Params::default().hill_scale);
        assert_eq!(clamped.num_large_hills, 10);
        assert_eq!(clamped.large_hill_min_size, 0.5);
        assert_eq!(clamped.large_hill_max_size, 0.5);
        assert_eq!(clamped.mountain_roughness, 1.0);
        assert_eq!(clamped.detail_scale, 5.0);
        assert_eq!(clamped.validate(), Ok(()));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let params = Params::from_json_str(r#"{ "seed": 7, "num_large_hills": 0 }"#).unwrap();
        assert_eq!(params.seed, 7);
        assert_eq!(params.num_large_hills, 0);
        assert_eq!(params.hill_scale, Params::default().hill_scale);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Params::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
