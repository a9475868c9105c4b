//! Committed strokes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use stroke_classifier::{DetectionResult, ZoneCandidate};
use uuid::Uuid;
use zone_catalog::{BodyArea, Gender, Point, ZoneId};

/// Stable stroke identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drawing tool that produced a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolType {
    Brush,
    Cannula,
    Shape,
    Vein,
    Freehand,
    Arrow,
    Measurement,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Brush => "brush",
            ToolType::Cannula => "cannula",
            ToolType::Shape => "shape",
            ToolType::Vein => "vein",
            ToolType::Freehand => "freehand",
            ToolType::Arrow => "arrow",
            ToolType::Measurement => "measurement",
        }
    }

    /// Tools whose paths are expected to cross several zones
    pub fn spans_zones(&self) -> bool {
        matches!(self, ToolType::Cannula | ToolType::Vein)
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed, frozen stroke.
///
/// `detection` is computed once at commit and never changes; a clinician
/// correction is kept alongside it in `zone_override`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    id: StrokeId,
    tool_type: ToolType,
    body_area: BodyArea,
    gender: Gender,
    points: Vec<Point>,
    created_at: DateTime<Utc>,
    committed_at: DateTime<Utc>,
    detection: DetectionResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    visited_zones: Vec<ZoneCandidate>,
    #[serde(default)]
    zone_override: Option<ZoneId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Everything captured between begin and commit
pub(crate) struct StrokeParts {
    pub tool_type: ToolType,
    pub body_area: BodyArea,
    pub gender: Gender,
    pub points: Vec<Point>,
    pub created_at: DateTime<Utc>,
    pub committed_at: DateTime<Utc>,
    pub detection: DetectionResult,
    pub visited_zones: Vec<ZoneCandidate>,
}

impl Stroke {
    pub(crate) fn from_parts(parts: StrokeParts) -> Self {
        Self {
            id: StrokeId::new(),
            tool_type: parts.tool_type,
            body_area: parts.body_area,
            gender: parts.gender,
            points: parts.points,
            created_at: parts.created_at,
            committed_at: parts.committed_at,
            detection: parts.detection,
            visited_zones: parts.visited_zones,
            zone_override: None,
            label: None,
            notes: None,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn tool_type(&self) -> ToolType {
        self.tool_type
    }

    /// Body area active when the stroke was begun
    pub fn body_area(&self) -> BodyArea {
        self.body_area
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    /// What the classifier suggested at commit time
    pub fn detection(&self) -> &DetectionResult {
        &self.detection
    }

    /// Every zone the path visited, for zone-spanning tools
    pub fn visited_zones(&self) -> &[ZoneCandidate] {
        &self.visited_zones
    }

    /// What the clinician chose, if anything
    pub fn zone_override(&self) -> Option<&ZoneId> {
        self.zone_override.as_ref()
    }

    pub fn is_overridden(&self) -> bool {
        self.zone_override.is_some()
    }

    /// Zone to display: the override wins, else the detected primary zone
    pub fn effective_zone(&self) -> Option<&ZoneId> {
        self.zone_override
            .as_ref()
            .or(self.detection.primary_zone.as_ref())
    }

    pub(crate) fn set_override(&mut self, zone: Option<ZoneId>) -> Option<ZoneId> {
        std::mem::replace(&mut self.zone_override, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(primary: Option<&str>) -> Stroke {
        let now = Utc::now();
        let mut detection = DetectionResult::unzoned(3);
        detection.primary_zone = primary.map(ZoneId::from);
        Stroke::from_parts(StrokeParts {
            tool_type: ToolType::Brush,
            body_area: BodyArea::Face,
            gender: Gender::Female,
            points: vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)],
            created_at: now,
            committed_at: now,
            detection,
            visited_zones: Vec::new(),
        })
    }

    #[test]
    fn test_effective_zone_prefers_override() {
        let mut s = stroke(Some("forehead"));
        assert_eq!(s.effective_zone(), Some(&ZoneId::from("forehead")));

        s.set_override(Some(ZoneId::from("glabella")));
        assert_eq!(s.effective_zone(), Some(&ZoneId::from("glabella")));
        assert_eq!(s.detection().primary_zone, Some(ZoneId::from("forehead")));
        assert!(s.is_overridden());
    }

    #[test]
    fn test_unzoned_stroke_with_override() {
        let mut s = stroke(None);
        assert!(s.effective_zone().is_none());
        s.set_override(Some(ZoneId::from("chin")));
        assert_eq!(s.effective_zone().map(ZoneId::as_str), Some("chin"));
    }

    #[test]
    fn test_tool_spans_zones() {
        assert!(ToolType::Cannula.spans_zones());
        assert!(ToolType::Vein.spans_zones());
        assert!(!ToolType::Brush.spans_zones());
        assert_eq!(ToolType::Measurement.to_string(), "measurement");
    }

    #[test]
    fn test_serialized_shape() {
        let mut s = stroke(Some("forehead"));
        s.label = Some("Botox 4u".into());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["toolType"], "brush");
        assert_eq!(json["bodyArea"], "face");
        assert_eq!(json["detection"]["primaryZone"], "forehead");
        assert!(json["zoneOverride"].is_null());
        assert!(json.get("visitedZones").is_none());

        let back: Stroke = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
