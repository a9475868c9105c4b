//! Zone definitions and their classification tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{Point, Polygon};
use crate::CatalogError;

/// Stable zone identifier (e.g. `glabella`, `left-nasolabial`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ZoneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Anatomical diagram a stroke is drawn over
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyArea {
    Face,
    Torso,
    TorsoBack,
    FullBody,
}

impl BodyArea {
    pub const ALL: [BodyArea; 4] = [
        BodyArea::Face,
        BodyArea::Torso,
        BodyArea::TorsoBack,
        BodyArea::FullBody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyArea::Face => "face",
            BodyArea::Torso => "torso",
            BodyArea::TorsoBack => "torsoBack",
            BodyArea::FullBody => "fullBody",
        }
    }
}

impl fmt::Display for BodyArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyArea {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "face" => Ok(BodyArea::Face),
            "torso" | "torsofront" => Ok(BodyArea::Torso),
            "torsoback" | "back" => Ok(BodyArea::TorsoBack),
            "fullbody" | "body" => Ok(BodyArea::FullBody),
            _ => Err(CatalogError::UnknownBodyArea(s.to_string())),
        }
    }
}

/// Anatomical model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

impl FromStr for Gender {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            _ => Err(CatalogError::UnknownGender(s.to_string())),
        }
    }
}

/// Grouping used by pickers and summary panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneCategory {
    UpperFace,
    Periorbital,
    MidFace,
    LowerFace,
    TorsoFront,
    TorsoBack,
    Body,
    Danger,
}

/// Marks zones covering arteries, nerves or high-risk injection areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFlag {
    /// Major artery (do not inject)
    Artery,
    /// Nerve pathway (numbness/weakness risk)
    Nerve,
    /// General high-risk area
    DangerZone,
}

impl RiskFlag {
    pub fn display_color(&self) -> &'static str {
        match self {
            RiskFlag::Artery => "#EF4444",
            RiskFlag::Nerve => "#EAB308",
            RiskFlag::DangerZone => "#F97316",
        }
    }
}

/// Immutable definition of a named anatomical region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDefinition {
    pub id: ZoneId,
    pub name: String,
    pub body_area: BodyArea,
    pub category: ZoneCategory,
    /// Closed boundary in 0-100 space
    pub boundary: Polygon,
    /// Lower value = more specific; wins overlap ties
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_flag: Option<RiskFlag>,
    /// Umbrella zone, considered only when no specific zone is hit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    /// Hex color used by overlays
    pub display_color: String,
}

impl ZoneDefinition {
    pub fn new(
        id: impl Into<ZoneId>,
        name: impl Into<String>,
        body_area: BodyArea,
        category: ZoneCategory,
        boundary: Polygon,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            body_area,
            category,
            boundary,
            priority,
            risk_flag: None,
            fallback: false,
            display_color: category_color(category).to_string(),
        }
    }

    pub fn with_risk(mut self, flag: RiskFlag) -> Self {
        self.display_color = flag.display_color().to_string();
        self.risk_flag = Some(flag);
        self
    }

    /// Mark as an umbrella zone
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.display_color = color.into();
        self
    }

    pub fn is_danger_zone(&self) -> bool {
        self.risk_flag.is_some()
    }

    /// Point-in-zone test; boundary edges count as inside
    pub fn contains_point(&self, point: &Point) -> bool {
        self.boundary.contains(point)
    }
}

fn category_color(category: ZoneCategory) -> &'static str {
    match category {
        ZoneCategory::UpperFace => "#8B5CF6",
        ZoneCategory::Periorbital => "#06B6D4",
        ZoneCategory::MidFace => "#EC4899",
        ZoneCategory::LowerFace => "#F43F5E",
        ZoneCategory::TorsoFront => "#10B981",
        ZoneCategory::TorsoBack => "#14B8A6",
        ZoneCategory::Body => "#3B82F6",
        ZoneCategory::Danger => "#F97316",
    }
}

/// Free-standing containment query
pub fn contains_point(zone: &ZoneDefinition, point: &Point) -> bool {
    zone.contains_point(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_area_parsing() {
        assert_eq!("face".parse::<BodyArea>().unwrap(), BodyArea::Face);
        assert_eq!("fullBody".parse::<BodyArea>().unwrap(), BodyArea::FullBody);
        assert_eq!("full-body".parse::<BodyArea>().unwrap(), BodyArea::FullBody);
        assert_eq!("torso_back".parse::<BodyArea>().unwrap(), BodyArea::TorsoBack);
        assert!("elbow".parse::<BodyArea>().is_err());
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_risk_flag_sets_color() {
        let zone = ZoneDefinition::new(
            "lip-zone",
            "Lip Vascular Zone",
            BodyArea::Face,
            ZoneCategory::Danger,
            Polygon::rect(40.0, 40.0, 60.0, 60.0).unwrap(),
            50,
        )
        .with_risk(RiskFlag::Artery);
        assert!(zone.is_danger_zone());
        assert_eq!(zone.display_color, "#EF4444");
        assert!(contains_point(&zone, &Point::new(40.0, 50.0)));
    }

    #[test]
    fn test_serialized_shape() {
        let zone = ZoneDefinition::new(
            "glabella",
            "Glabella",
            BodyArea::Face,
            ZoneCategory::UpperFace,
            Polygon::rect(0.0, 0.0, 1.0, 1.0).unwrap(),
            5,
        );
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["id"], "glabella");
        assert_eq!(json["bodyArea"], "face");
        assert_eq!(json["category"], "upper-face");
        assert!(json.get("riskFlag").is_none());
    }
}
