//! Classifier configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::ClassifierError;

/// Prefix for environment overrides (e.g. `CHARTING_SPLIT_TOLERANCE=0.05`)
pub const ENV_PREFIX: &str = "CHARTING";

/// Classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Strokes with fewer points are not classified
    pub min_points: usize,

    /// Point count below which confidence is scaled down
    pub confidence_sample_floor: usize,

    /// Minimum overlap ratio for a zone to be listed as a candidate
    pub secondary_threshold: f64,

    /// Top two candidates within this ratio of each other mark a split stroke
    pub split_tolerance: f64,

    /// Minimum overlap ratio for multi-zone detection (0.0 = any hit)
    pub multi_zone_floor: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_points: 2,
            confidence_sample_floor: 5,
            secondary_threshold: 0.15,
            split_tolerance: 0.10,
            multi_zone_floor: 0.0,
        }
    }
}

impl ClassifierConfig {
    /// Demand more evidence before auto-tagging
    pub fn strict() -> Self {
        Self {
            min_points: 4,
            confidence_sample_floor: 10,
            secondary_threshold: 0.10,
            split_tolerance: 0.20,
            ..Default::default()
        }
    }

    /// Auto-tag aggressively, prompt rarely
    pub fn lenient() -> Self {
        Self {
            min_points: 2,
            confidence_sample_floor: 3,
            secondary_threshold: 0.25,
            split_tolerance: 0.05,
            ..Default::default()
        }
    }

    /// Layer an optional config file and `CHARTING_*` environment
    /// variables over the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ClassifierError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading classifier config from {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let loaded: Self = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check that every threshold is in range
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.min_points == 0 {
            return Err(ClassifierError::Invalid {
                field: "min_points",
                reason: "must be at least 1".into(),
            });
        }
        if self.confidence_sample_floor == 0 {
            return Err(ClassifierError::Invalid {
                field: "confidence_sample_floor",
                reason: "must be at least 1".into(),
            });
        }
        for (field, value) in [
            ("secondary_threshold", self.secondary_threshold),
            ("split_tolerance", self.split_tolerance),
            ("multi_zone_floor", self.multi_zone_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClassifierError::Invalid {
                    field,
                    reason: format!("{} is outside [0, 1]", value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
        assert!(ClassifierConfig::strict().validate().is_ok());
        assert!(ClassifierConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let config = ClassifierConfig {
            split_tolerance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ClassifierError::Invalid { field: "split_tolerance", .. })
        ));

        let config = ClassifierConfig {
            min_points: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_defaults_without_file() {
        let config = ClassifierConfig::load(None).unwrap();
        assert_eq!(config.secondary_threshold, 0.15);
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("classifier-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "min_points = 3\nsecondary_threshold = 0.2").unwrap();
        drop(file);

        let config = ClassifierConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.min_points, 3);
        assert_eq!(config.secondary_threshold, 0.2);
        assert_eq!(config.confidence_sample_floor, 5);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join("definitely-missing-classifier.toml");
        assert!(ClassifierConfig::load(Some(&path)).is_err());
    }
}
