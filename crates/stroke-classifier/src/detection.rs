//! Detection results

use serde::{Deserialize, Serialize};
use zone_catalog::ZoneId;

/// A zone touched by a stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCandidate {
    pub zone_id: ZoneId,
    pub zone_name: String,
    /// Fraction of stroke points inside the zone (0-1)
    pub overlap_ratio: f64,
    /// Number of stroke points inside the zone
    pub hits: usize,
}

/// Classifier output attached to a committed stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Best matching zone; None when no zone was hit or the stroke was rejected
    pub primary_zone: Option<ZoneId>,

    /// Confidence in the primary zone (0-1)
    pub confidence: f64,

    /// Zones above the secondary threshold, best first
    pub candidates: Vec<ZoneCandidate>,

    /// Stroke plausibly spans several zones; prompt instead of auto-tagging
    pub is_split: bool,

    /// Points considered
    pub total_points: usize,
}

impl DetectionResult {
    /// No detection (rejected stroke, empty catalog, or nothing hit)
    pub fn unzoned(total_points: usize) -> Self {
        Self {
            primary_zone: None,
            confidence: 0.0,
            candidates: Vec::new(),
            is_split: false,
            total_points,
        }
    }

    pub fn is_zoned(&self) -> bool {
        self.primary_zone.is_some()
    }

    /// UI should ask the clinician rather than silently tag
    pub fn needs_confirmation(&self) -> bool {
        self.is_split || !self.is_zoned()
    }

    /// Display name of the primary zone, if it is among the candidates
    pub fn primary_zone_name(&self) -> Option<&str> {
        let primary = self.primary_zone.as_ref()?;
        self.candidates
            .iter()
            .find(|c| &c.zone_id == primary)
            .map(|c| c.zone_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unzoned_needs_confirmation() {
        let result = DetectionResult::unzoned(1);
        assert!(!result.is_zoned());
        assert!(result.needs_confirmation());
        assert_eq!(result.confidence, 0.0);
        assert!(result.primary_zone_name().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let result = DetectionResult {
            primary_zone: Some(ZoneId::from("chin")),
            confidence: 0.9,
            candidates: vec![ZoneCandidate {
                zone_id: ZoneId::from("chin"),
                zone_name: "Chin".into(),
                overlap_ratio: 0.9,
                hits: 9,
            }],
            is_split: false,
            total_points: 10,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["primaryZone"], "chin");
        assert_eq!(json["candidates"][0]["overlapRatio"], 0.9);
        assert_eq!(json["isSplit"], false);
        assert_eq!(result.primary_zone_name(), Some("Chin"));
        assert!(!result.needs_confirmation());
    }
}
