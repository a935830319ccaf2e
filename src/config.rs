//! Locator configuration
//!
//! Every tunable lives here and is passed by value into the components that
//! use it. The algorithms themselves carry no defaults; the only source of
//! ready-made values is [`LocatorConfig::preset`].

use crate::error::{ConfigError, LocateError};
use crate::preprocess::PreprocessLevel;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

/// Tuning profile for the guard-pairing thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Accept damaged or oddly proportioned symbols, at the cost of false positives
    Lax,
    /// Balanced profile for typical photographs
    Basic,
    /// Only well-formed, well-lit symbols
    Strict,
}

/// Inclusive `[min, max]` range of ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl AspectRange {
    /// Create a range
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::new(field, "bounds must be finite"));
        }
        if self.min < 0.0 || self.min > self.max {
            return Err(ConfigError::new(
                field,
                format!("expected 0 <= min <= max, got {}..{}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Minimum region size handed to the rectangle extractor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaThreshold {
    /// Absolute pixel count
    Pixels(u32),
    /// Fraction of the image area
    Fraction(f32),
}

impl AreaThreshold {
    /// Resolve against an image of `width * height` pixels
    pub fn resolve(&self, width: usize, height: usize) -> u32 {
        match *self {
            AreaThreshold::Pixels(count) => count,
            AreaThreshold::Fraction(fraction) => (fraction * (width * height) as f32) as u32,
        }
    }
}

/// Filtering and pairing thresholds for the rectangle strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Smallest region kept by the extractor
    pub area_threshold: AreaThreshold,
    /// Pixels at or below this intensity are foreground
    pub intensity_threshold: u8,
    /// Minimum true_area / (width * height) for a guard candidate
    pub rectangularity_threshold: f32,
    /// Maximum |sin| of the angle between guards, and between a guard and the pair axis
    pub angle_variation: f32,
    /// Maximum relative true-area difference between paired guards
    pub area_variation: f32,
    /// Maximum width difference, relative to the smaller width
    pub width_variation: f32,
    /// Maximum height difference, relative to the smaller height
    pub height_variation: f32,
    /// Accepted guard height / width
    pub guard_aspect: AspectRange,
    /// Accepted guard spacing / mean guard height
    pub barcode_aspect: AspectRange,
}

/// Coefficients of the guard-pair score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Multiplier of the size/quality product
    pub area: f32,
    /// Guard height / width of a well-printed symbol
    pub ideal_guard_aspect: f32,
    /// Penalty per unit of guard aspect error
    pub guard_aspect: f32,
    /// Guard spacing / guard height of a typical symbol
    pub ideal_barcode_aspect: f32,
    /// Penalty per unit of barcode aspect error
    pub barcode_aspect: f32,
}

/// Settings of the scan-and-trace strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Pixels at or below this intensity are dark
    pub black_threshold: u8,
    /// Number of rows sampled when building the point cloud
    pub scan_resolution: usize,
    /// Narrowest dark run accepted as an anchor
    pub min_anchor_width: usize,
    /// Trace step is image height / trace_resolution (at least one row)
    pub trace_resolution: usize,
    /// Largest accepted gap between prediction and anchor while tracing
    pub trace_distance_threshold: f32,
    /// Points farther than this from the fitted line are ignored
    pub collinearity_distance_threshold: f32,
    /// Minimum votes for a Hough line
    pub hough_line_threshold: u32,
    /// Rho buckets per unit of maximum rho
    pub hough_rho_resolution_factor: f32,
    /// Theta buckets per degree
    pub hough_theta_resolution_factor: f32,
    /// Half-size of the Hough non-maximum suppression window, in buckets
    pub hough_window: usize,
}

/// Complete locator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Image cleanup applied before either strategy
    pub preprocessing: PreprocessLevel,
    /// Rectangle strategy thresholds
    pub guards: GuardConfig,
    /// Guard-pair score coefficients
    pub scoring: ScoreWeights,
    /// Scan-and-trace strategy settings
    pub edge: EdgeConfig,
}

impl LocatorConfig {
    /// Tuned values for a strictness profile
    pub fn preset(strictness: Strictness) -> Self {
        let guards = match strictness {
            Strictness::Lax => GuardConfig {
                area_threshold: AreaThreshold::Fraction(0.0003),
                intensity_threshold: 128,
                rectangularity_threshold: 0.5,
                angle_variation: PI / 8.0,
                area_variation: 0.5,
                width_variation: 0.5,
                height_variation: 0.2,
                guard_aspect: AspectRange::new(2.0, 50.0),
                barcode_aspect: AspectRange::new(1.0, 20.0),
            },
            Strictness::Basic => GuardConfig {
                area_threshold: AreaThreshold::Fraction(0.0007),
                intensity_threshold: 128,
                rectangularity_threshold: 0.8,
                angle_variation: PI / 16.0,
                area_variation: 0.4,
                width_variation: 0.3,
                height_variation: 0.1,
                guard_aspect: AspectRange::new(3.0, 40.0),
                barcode_aspect: AspectRange::new(2.0, 10.0),
            },
            Strictness::Strict => GuardConfig {
                area_threshold: AreaThreshold::Fraction(0.001),
                intensity_threshold: 128,
                rectangularity_threshold: 0.9,
                angle_variation: PI / 32.0,
                area_variation: 0.2,
                width_variation: 0.2,
                height_variation: 0.05,
                guard_aspect: AspectRange::new(3.0, 40.0),
                barcode_aspect: AspectRange::new(3.0, 10.0),
            },
        };

        Self {
            preprocessing: PreprocessLevel::Full,
            guards,
            scoring: ScoreWeights {
                area: 1.0,
                ideal_guard_aspect: 5.0,
                guard_aspect: 1.0,
                ideal_barcode_aspect: 3.0,
                barcode_aspect: 1.0,
            },
            edge: EdgeConfig {
                black_threshold: 128,
                scan_resolution: 64,
                min_anchor_width: 4,
                trace_resolution: 1024,
                trace_distance_threshold: 3.0,
                collinearity_distance_threshold: 2.0,
                hough_line_threshold: 8,
                hough_rho_resolution_factor: 1.0,
                hough_theta_resolution_factor: 1.0,
                hough_window: 2,
            },
        }
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(text: &str) -> Result<Self, LocateError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocateError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as a TOML document accepted by [`LocatorConfig::from_toml_str`]
    pub fn to_toml_string(&self) -> Result<String, LocateError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that indicate a caller bug rather than a data condition
    pub fn validate(&self) -> Result<(), ConfigError> {
        let guards = &self.guards;
        if let AreaThreshold::Fraction(fraction) = guards.area_threshold {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(ConfigError::new(
                    "guards.area_threshold",
                    format!("fraction must be in (0, 1], got {}", fraction),
                ));
            }
        }
        non_negative("guards.rectangularity_threshold", guards.rectangularity_threshold)?;
        positive("guards.angle_variation", guards.angle_variation)?;
        positive("guards.area_variation", guards.area_variation)?;
        positive("guards.width_variation", guards.width_variation)?;
        positive("guards.height_variation", guards.height_variation)?;
        guards.guard_aspect.validate("guards.guard_aspect")?;
        guards.barcode_aspect.validate("guards.barcode_aspect")?;

        let scoring = &self.scoring;
        non_negative("scoring.area", scoring.area)?;
        non_negative("scoring.ideal_guard_aspect", scoring.ideal_guard_aspect)?;
        non_negative("scoring.guard_aspect", scoring.guard_aspect)?;
        non_negative("scoring.ideal_barcode_aspect", scoring.ideal_barcode_aspect)?;
        non_negative("scoring.barcode_aspect", scoring.barcode_aspect)?;

        let edge = &self.edge;
        nonzero("edge.scan_resolution", edge.scan_resolution)?;
        nonzero("edge.min_anchor_width", edge.min_anchor_width)?;
        nonzero("edge.trace_resolution", edge.trace_resolution)?;
        nonzero("edge.hough_window", edge.hough_window)?;
        non_negative("edge.trace_distance_threshold", edge.trace_distance_threshold)?;
        non_negative(
            "edge.collinearity_distance_threshold",
            edge.collinearity_distance_threshold,
        )?;
        positive("edge.hough_rho_resolution_factor", edge.hough_rho_resolution_factor)?;
        positive(
            "edge.hough_theta_resolution_factor",
            edge.hough_theta_resolution_factor,
        )?;
        Ok(())
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::new(field, "must be at least 1"));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::new(field, format!("must be finite and > 0, got {}", value)));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::new(field, format!("must be finite and >= 0, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for strictness in [Strictness::Lax, Strictness::Basic, Strictness::Strict] {
            assert!(LocatorConfig::preset(strictness).validate().is_ok());
        }
    }

    #[test]
    fn test_presets_tighten() {
        let lax = LocatorConfig::preset(Strictness::Lax).guards;
        let strict = LocatorConfig::preset(Strictness::Strict).guards;
        assert!(lax.angle_variation > strict.angle_variation);
        assert!(lax.rectangularity_threshold < strict.rectangularity_threshold);
        assert!(lax.height_variation > strict.height_variation);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut config = LocatorConfig::preset(Strictness::Basic);
        config.edge.scan_resolution = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "edge.scan_resolution");
    }

    #[test]
    fn test_negative_factor_rejected() {
        let mut config = LocatorConfig::preset(Strictness::Basic);
        config.edge.hough_rho_resolution_factor = -1.0;
        assert!(config.validate().is_err());

        let mut config = LocatorConfig::preset(Strictness::Basic);
        config.guards.barcode_aspect = AspectRange::new(10.0, 2.0);
        assert!(config.validate().is_err());

        let mut config = LocatorConfig::preset(Strictness::Basic);
        config.guards.area_threshold = AreaThreshold::Fraction(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_area_threshold_resolves() {
        assert_eq!(AreaThreshold::Pixels(100).resolve(640, 480), 100);
        assert_eq!(AreaThreshold::Fraction(0.001).resolve(1000, 1000), 1000);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LocatorConfig::preset(Strictness::Strict);
        let text = config.to_toml_string().unwrap();
        let parsed = LocatorConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_invalid_values_rejected() {
        let mut config = LocatorConfig::preset(Strictness::Basic);
        config.edge.hough_window = 0;
        let text = toml::to_string(&config).unwrap();
        match LocatorConfig::from_toml_str(&text) {
            Err(LocateError::Config(err)) => assert_eq!(err.field, "edge.hough_window"),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
