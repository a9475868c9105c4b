//! Stroke Zone Classifier
//!
//! Infers which anatomical zone a charting stroke belongs to:
//! - Point-containment sampling against the active zone set
//! - Overlap-ratio ranking with priority and catalog-order tie-breaks
//! - Sample-size scaled confidence
//! - Split detection for strokes that span several zones
//! - Multi-zone listing for paths that legitimately visit many zones
//!
//! Classification is a pure function of the stroke and the catalog.

mod classifier;
mod config;
mod detection;
mod normalize;

pub use classifier::StrokeClassifier;
pub use self::config::{ClassifierConfig, ENV_PREFIX};
pub use detection::{DetectionResult, ZoneCandidate};
pub use normalize::normalize_to_canvas;

use thiserror::Error;

/// Classifier error types (configuration only; classification never fails)
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
