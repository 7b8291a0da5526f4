//! Cave generation parameters and configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::grid::buffer_dimensions;
use crate::seeds::SeedSource;

/// Every knob of one generation run. Ranges are enforced by `validate`, never clamped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Interior width in tiles (at least 1)
    pub width: usize,

    /// Interior height in tiles (at least 1)
    pub height: usize,

    /// Seed string, hashed into the fill RNG seed
    pub seed: String,

    /// Replace `seed` with a time-derived string on every run (not reproducible)
    pub use_random_seed: bool,

    /// Chance (0-100) that an interior tile starts as wall
    pub random_fill_percent: u32,

    /// Number of smoothing passes (0-10)
    pub smoothing_amount: u32,

    /// A tile becomes wall when more than this many neighbors are walls (0-10)
    pub smoothing_tolerance: u32,

    /// Floor regions of at most this many tiles are filled in (0-50)
    pub floor_denoising_tolerance: usize,

    /// Wall regions of at most this many tiles are opened up (0-50)
    pub wall_denoising_tolerance: usize,

    /// Passed through to the mesh builder (0-10)
    pub square_size: u32,

    /// Width of the permanent wall margin around the interior (0-10)
    pub border_width: usize,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: "cave".to_string(),
            use_random_seed: false,
            random_fill_percent: 47,
            smoothing_amount: 5,
            smoothing_tolerance: 4,
            floor_denoising_tolerance: 50,
            wall_denoising_tolerance: 50,
            square_size: 1,
            border_width: 1,
        }
    }
}

/// Check one value against an inclusive range.
fn check_range(parameter: &'static str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        return Err(GenerationError::InvalidThreshold {
            parameter,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl CaveConfig {
    /// Reject the first parameter that violates its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        check_range("random_fill_percent", self.random_fill_percent as u64, 0, 100)?;
        check_range("smoothing_amount", self.smoothing_amount as u64, 0, 10)?;
        check_range("smoothing_tolerance", self.smoothing_tolerance as u64, 0, 10)?;
        check_range("floor_denoising_tolerance", self.floor_denoising_tolerance as u64, 0, 50)?;
        check_range("wall_denoising_tolerance", self.wall_denoising_tolerance as u64, 0, 50)?;
        check_range("square_size", self.square_size as u64, 0, 10)?;
        check_range("border_width", self.border_width as u64, 0, 10)?;

        // Non-zero sizes can still overflow once the border is added.
        buffer_dimensions(self.width, self.height, self.border_width)?;
        Ok(())
    }

    pub fn seed_source(&self) -> SeedSource {
        if self.use_random_seed {
            SeedSource::Random
        } else {
            SeedSource::Fixed(self.seed.clone())
        }
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GenerationError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GenerationError::Config(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CaveConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = CaveConfig {
            width: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDimensions { width: 0, .. }));
        assert_eq!(err.parameter(), Some("width"));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let side = 1usize << (usize::BITS / 2);
        let config = CaveConfig {
            width: side,
            height: side,
            border_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidDimensions { .. })
        ));

        let config = CaveConfig {
            width: usize::MAX,
            height: 4,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDimensions { width: usize::MAX, height: 4 }));
    }

    #[test]
    fn test_out_of_range_names_parameter() {
        let config = CaveConfig {
            random_fill_percent: 101,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.parameter(), Some("random_fill_percent"));
        assert!(err.to_string().contains("random_fill_percent"));

        let config = CaveConfig {
            wall_denoising_tolerance: 51,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), Some("wall_denoising_tolerance"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let config = CaveConfig {
            random_fill_percent: 100,
            smoothing_amount: 10,
            smoothing_tolerance: 0,
            floor_denoising_tolerance: 50,
            wall_denoising_tolerance: 0,
            square_size: 10,
            border_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_source() {
        let mut config = CaveConfig::default();
        assert_eq!(config.seed_source(), SeedSource::Fixed("cave".to_string()));
        config.use_random_seed = true;
        assert_eq!(config.seed_source(), SeedSource::Random);
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let config = CaveConfig::from_json(r#"{ "width": 10, "seed": "x" }"#).unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.seed, "x");
        assert_eq!(config.height, CaveConfig::default().height);

        let back = CaveConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = CaveConfig::from_json("{ width: }").unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }
}
