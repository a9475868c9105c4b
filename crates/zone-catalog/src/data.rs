//! Built-in zone tables
//!
//! Outlines are authored in the view-box of the chart artwork they trace
//! and converted to 0-100 space on load.

use crate::catalog::{CatalogKey, ZoneCatalog, ZoneCatalogBuilder};
use crate::geometry::{Polygon, ViewBox, ELLIPSE_SEGMENTS};
use crate::path;
use crate::zone::{BodyArea, Gender, RiskFlag, ZoneCategory, ZoneDefinition};
use crate::CatalogError;

const FACE_VIEW_BOX: ViewBox = ViewBox::new(400.0, 450.0);
const DANGER_VIEW_BOX: ViewBox = ViewBox::new(100.0, 100.0);
const TORSO_VIEW_BOX: ViewBox = ViewBox::new(400.0, 500.0);
const BODY_VIEW_BOX: ViewBox = ViewBox::new(400.0, 720.0);

/// Priority shared by all danger zones
const DANGER_PRIORITY: u32 = 50;

struct ZoneSeed {
    id: &'static str,
    name: &'static str,
    category: ZoneCategory,
    priority: u32,
    path: &'static str,
}

const fn seed(
    id: &'static str,
    name: &'static str,
    category: ZoneCategory,
    priority: u32,
    path: &'static str,
) -> ZoneSeed {
    ZoneSeed {
        id,
        name,
        category,
        priority,
        path,
    }
}

use ZoneCategory::*;

const FACE_ZONES: &[ZoneSeed] = &[
    seed("forehead", "Forehead", UpperFace, 10, "M 120 80 Q 200 40 280 80 L 280 120 Q 200 100 120 120 Z"),
    seed("glabella", "Glabella", UpperFace, 5, "M 175 120 L 225 120 L 225 155 L 175 155 Z"),
    seed("left-temple", "Left Temple", UpperFace, 10, "M 80 90 Q 100 80 120 85 L 120 150 Q 100 145 80 150 Z"),
    seed("right-temple", "Right Temple", UpperFace, 10, "M 280 85 Q 300 80 320 90 L 320 150 Q 300 145 280 150 Z"),
    seed("left-brow", "Left Eyebrow", Periorbital, 8, "M 115 130 Q 150 115 180 130 L 175 150 Q 145 140 115 150 Z"),
    seed("right-brow", "Right Eyebrow", Periorbital, 8, "M 220 130 Q 250 115 285 130 L 285 150 Q 255 140 225 150 Z"),
    seed("left-eye", "Left Eye Area", Periorbital, 6, "M 120 155 Q 150 150 175 155 Q 175 175 150 185 Q 120 175 120 155 Z"),
    seed("right-eye", "Right Eye Area", Periorbital, 6, "M 225 155 Q 250 150 280 155 Q 280 175 250 185 Q 225 175 225 155 Z"),
    seed("left-crow", "Left Crow's Feet", Periorbital, 5, "M 95 155 L 120 155 L 120 190 L 95 185 Z"),
    seed("right-crow", "Right Crow's Feet", Periorbital, 5, "M 280 155 L 305 155 L 305 185 L 280 190 Z"),
    seed("nose-bridge", "Nose Bridge", MidFace, 8, "M 185 155 L 215 155 L 212 200 L 188 200 Z"),
    seed("nose-tip", "Nose Tip", MidFace, 7, "M 180 200 Q 200 195 220 200 Q 225 230 200 240 Q 175 230 180 200 Z"),
    seed("left-cheek", "Left Cheek", MidFace, 12, "M 95 190 Q 120 185 150 195 L 155 260 Q 120 270 100 250 Z"),
    seed("right-cheek", "Right Cheek", MidFace, 12, "M 250 195 Q 280 185 305 190 L 300 250 Q 280 270 245 260 Z"),
    seed("left-nasolabial", "Left Nasolabial Fold", MidFace, 6, "M 155 240 L 175 240 L 165 295 L 145 290 Z"),
    seed("right-nasolabial", "Right Nasolabial Fold", MidFace, 6, "M 225 240 L 245 240 L 255 290 L 235 295 Z"),
    seed("upper-lip", "Upper Lip", LowerFace, 7, "M 160 290 Q 200 280 240 290 L 235 310 Q 200 300 165 310 Z"),
    seed("lower-lip", "Lower Lip", LowerFace, 7, "M 165 315 Q 200 310 235 315 L 230 340 Q 200 350 170 340 Z"),
    seed("left-marionette", "Left Marionette", LowerFace, 6, "M 140 320 L 160 315 L 155 365 L 135 360 Z"),
    seed("right-marionette", "Right Marionette", LowerFace, 6, "M 240 315 L 260 320 L 265 360 L 245 365 Z"),
    seed("chin", "Chin", LowerFace, 10, "M 160 350 Q 200 345 240 350 Q 245 390 200 410 Q 155 390 160 350 Z"),
    seed("left-jawline", "Left Jawline", LowerFace, 11, "M 100 260 L 140 270 L 145 360 Q 120 380 95 340 Z"),
    seed("right-jawline", "Right Jawline", LowerFace, 11, "M 260 270 L 300 260 L 305 340 Q 280 380 255 360 Z"),
];

/// Umbrella zones, matched only when no treatment zone is hit
const FACE_FALLBACK_ZONES: &[ZoneSeed] = &[
    seed("full-face", "Full Face", MidFace, 19, "M 70 30 L 330 30 L 330 420 L 70 420 Z"),
];

const FACE_DANGER_ZONES: &[ZoneSeed] = &[
    seed("glabella-zone", "Glabella Danger Zone", Danger, DANGER_PRIORITY, "M 44 20 Q 44 24 44 28 Q 47 29 50 29 Q 53 29 56 28 Q 56 24 56 20 Q 53 19 50 19 Q 47 19 44 20 Z"),
    seed("nasal-zone", "Nasal Danger Zone", Danger, DANGER_PRIORITY, "M 46 30 Q 44 34 44 38 Q 44 42 46 46 Q 48 48 50 48 Q 52 48 54 46 Q 56 42 56 38 Q 56 34 54 30 Q 52 28 50 28 Q 48 28 46 30 Z"),
    seed("temple-zone-l", "Temple Danger Zone (Left)", Danger, DANGER_PRIORITY, "M 25 20 Q 28 24 30 28 Q 32 32 34 36 L 30 38 Q 26 34 24 30 Q 22 26 22 22 Z"),
    seed("temple-zone-r", "Temple Danger Zone (Right)", Danger, DANGER_PRIORITY, "M 75 20 Q 72 24 70 28 Q 68 32 66 36 L 70 38 Q 74 34 76 30 Q 78 26 78 22 Z"),
    seed("infraorbital-zone-l", "Infraorbital Zone (Left)", Danger, DANGER_PRIORITY, "M 38 30 Q 40 32 42 34 Q 42 36 40 38 Q 38 36 36 34 Q 36 32 38 30 Z"),
    seed("infraorbital-zone-r", "Infraorbital Zone (Right)", Danger, DANGER_PRIORITY, "M 62 30 Q 60 32 58 34 Q 58 36 60 38 Q 62 36 64 34 Q 64 32 62 30 Z"),
    seed("alar-zone-l", "Alar/Nasolabial Zone (Left)", Danger, DANGER_PRIORITY, "M 42 42 Q 40 44 40 46 Q 42 48 44 48 Q 46 46 46 44 Q 44 42 42 42 Z"),
    seed("alar-zone-r", "Alar/Nasolabial Zone (Right)", Danger, DANGER_PRIORITY, "M 58 42 Q 60 44 60 46 Q 58 48 56 48 Q 54 46 54 44 Q 56 42 58 42 Z"),
    seed("lip-zone", "Lip Vascular Zone", Danger, DANGER_PRIORITY, "M 42 48 Q 46 47 50 47 Q 54 47 58 48 Q 58 55 56 56 Q 52 57 50 57 Q 48 57 44 56 Q 42 55 42 48 Z"),
];

const TORSO_FRONT_ZONES: &[ZoneSeed] = &[
    seed("zone-chest-upper", "Upper Chest", TorsoFront, 10, "M 160 80 L 240 80 L 240 120 L 160 120 Z"),
    seed("zone-chest-left", "Left Chest", TorsoFront, 10, "M 110 100 Q 130 95 160 100 L 160 170 Q 140 175 110 165 Z"),
    seed("zone-chest-right", "Right Chest", TorsoFront, 10, "M 240 100 Q 270 95 290 100 L 290 165 Q 260 175 240 170 Z"),
    seed("zone-abdomen-upper", "Upper Abdomen", TorsoFront, 10, "M 150 170 L 250 170 L 250 230 L 150 230 Z"),
    seed("zone-abdomen-mid", "Mid Abdomen", TorsoFront, 10, "M 145 230 L 255 230 L 255 310 L 145 310 Z"),
    seed("zone-abdomen-lower", "Lower Abdomen", TorsoFront, 10, "M 150 310 L 250 310 L 260 380 Q 200 400 140 380 Z"),
    seed("zone-flank-left-upper", "Left Upper Flank", TorsoFront, 8, "M 80 160 L 110 160 L 115 240 L 85 240 Z"),
    seed("zone-flank-left-mid", "Left Mid Flank", TorsoFront, 8, "M 85 240 L 115 240 L 120 310 L 90 310 Z"),
    seed("zone-flank-left-lower", "Left Lower Flank", TorsoFront, 8, "M 90 310 L 120 310 L 130 370 L 100 370 Z"),
    seed("zone-flank-right-upper", "Right Upper Flank", TorsoFront, 8, "M 290 160 L 320 160 L 315 240 L 285 240 Z"),
    seed("zone-flank-right-mid", "Right Mid Flank", TorsoFront, 8, "M 285 240 L 315 240 L 310 310 L 280 310 Z"),
    seed("zone-flank-right-lower", "Right Lower Flank", TorsoFront, 8, "M 280 310 L 310 310 L 300 370 L 270 370 Z"),
];

const TORSO_BACK_ZONES: &[ZoneSeed] = &[
    seed("zone-back-upper-left", "Left Upper Back", TorsoBack, 10, "M 110 90 L 200 90 L 200 160 L 110 160 Z"),
    seed("zone-back-upper-right", "Right Upper Back", TorsoBack, 10, "M 200 90 L 290 90 L 290 160 L 200 160 Z"),
    seed("zone-back-mid", "Mid Back", TorsoBack, 12, "M 115 160 L 285 160 L 285 260 L 115 260 Z"),
    seed("zone-back-lower-left", "Left Lower Back", TorsoBack, 10, "M 125 260 L 200 260 L 200 360 L 135 360 Z"),
    seed("zone-back-lower-right", "Right Lower Back", TorsoBack, 10, "M 200 260 L 275 260 L 265 360 L 200 360 Z"),
    seed("zone-scapula-left", "Left Scapula", TorsoBack, 7, "M 95 110 L 145 110 L 145 180 L 95 180 Z"),
    seed("zone-scapula-right", "Right Scapula", TorsoBack, 7, "M 255 110 L 305 110 L 305 180 L 255 180 Z"),
    seed("zone-flank-back-left", "Left Flank (Back)", TorsoBack, 8, "M 75 180 L 105 180 L 110 320 L 80 320 Z"),
    seed("zone-flank-back-right", "Right Flank (Back)", TorsoBack, 8, "M 295 180 L 325 180 L 320 320 L 290 320 Z"),
];

const FULL_BODY_ZONES: &[ZoneSeed] = &[
    seed("zone-body-head", "Head", Body, 10, "M 200 20 C 175 20 155 40 155 70 C 155 100 175 120 200 120 C 225 120 245 100 245 70 C 245 40 225 20 200 20 Z"),
    seed("zone-body-neck-front", "Neck (Front)", Body, 10, "M 185 120 L 215 120 L 220 145 L 180 145 Z"),
    seed("zone-body-shoulder-l", "Left Shoulder", Body, 10, "M 145 145 L 180 145 L 175 175 L 140 175 Q 130 160 145 145 Z"),
    seed("zone-body-shoulder-r", "Right Shoulder", Body, 10, "M 220 145 L 255 145 Q 270 160 260 175 L 225 175 L 220 145 Z"),
    seed("zone-body-chest", "Chest", Body, 10, "M 175 145 L 225 145 L 230 200 L 170 200 Z"),
    seed("zone-body-upper-arm-l", "Left Upper Arm", Body, 10, "M 130 175 L 145 175 L 140 250 L 115 250 Q 110 210 130 175 Z"),
    seed("zone-body-upper-arm-r", "Right Upper Arm", Body, 10, "M 255 175 L 270 175 Q 290 210 285 250 L 260 250 L 255 175 Z"),
    seed("zone-body-abdomen-upper", "Upper Abdomen", Body, 10, "M 170 200 L 230 200 L 232 260 L 168 260 Z"),
    seed("zone-body-forearm-l", "Left Forearm", Body, 10, "M 105 250 L 130 250 L 115 340 L 90 340 Q 85 290 105 250 Z"),
    seed("zone-body-forearm-r", "Right Forearm", Body, 10, "M 270 250 L 295 250 Q 315 290 310 340 L 285 340 L 270 250 Z"),
    seed("zone-body-abdomen-lower", "Lower Abdomen", Body, 10, "M 168 260 L 232 260 L 235 320 L 165 320 Z"),
    seed("zone-body-hip-l", "Left Hip", Body, 10, "M 155 320 L 168 320 L 175 365 L 150 365 Q 145 340 155 320 Z"),
    seed("zone-body-hip-r", "Right Hip", Body, 10, "M 232 320 L 245 320 Q 255 340 250 365 L 225 365 L 232 320 Z"),
    seed("zone-body-hand-l", "Left Hand", Body, 10, "M 80 340 L 105 340 L 100 400 L 70 400 Q 60 370 80 340 Z"),
    seed("zone-body-hand-r", "Right Hand", Body, 10, "M 295 340 L 320 340 Q 340 370 330 400 L 300 400 L 295 340 Z"),
    seed("zone-body-thigh-l", "Left Thigh", Body, 10, "M 160 365 L 195 365 L 190 480 L 155 480 Q 150 420 160 365 Z"),
    seed("zone-body-thigh-r", "Right Thigh", Body, 10, "M 205 365 L 240 365 Q 250 420 245 480 L 210 480 L 205 365 Z"),
    seed("zone-body-knee-l", "Left Knee", Body, 10, "M 155 480 L 190 480 L 188 530 L 157 530 Z"),
    seed("zone-body-knee-r", "Right Knee", Body, 10, "M 210 480 L 245 480 L 243 530 L 212 530 Z"),
    seed("zone-body-calf-l", "Left Calf", Body, 10, "M 157 530 L 188 530 L 185 640 L 160 640 Q 152 580 157 530 Z"),
    seed("zone-body-calf-r", "Right Calf", Body, 10, "M 212 530 L 243 530 Q 248 580 240 640 L 215 640 L 212 530 Z"),
    seed("zone-body-foot-l", "Left Foot", Body, 10, "M 155 640 L 190 640 L 195 690 L 145 690 Q 140 665 155 640 Z"),
    seed("zone-body-foot-r", "Right Foot", Body, 10, "M 210 640 L 245 640 Q 260 665 255 690 L 205 690 L 210 640 Z"),
];

fn add_seeds(
    builder: &mut ZoneCatalogBuilder,
    key: CatalogKey,
    seeds: &[ZoneSeed],
    view_box: ViewBox,
    risk: Option<RiskFlag>,
    fallback: bool,
) -> Result<(), CatalogError> {
    for s in seeds {
        let boundary = path::flatten(s.path, view_box)?;
        let mut zone = ZoneDefinition::new(s.id, s.name, key.body_area, s.category, boundary, s.priority);
        if let Some(flag) = risk {
            zone = zone.with_risk(flag);
        }
        if fallback {
            zone = zone.as_fallback();
        }
        builder.add(key, zone)?;
    }
    Ok(())
}

/// Female torso variant: pectoral outlines replace the chest polygons
fn female_torso_front(builder: &mut ZoneCatalogBuilder) -> Result<(), CatalogError> {
    let key = CatalogKey::variant(BodyArea::Torso, Gender::Female);
    for s in TORSO_FRONT_ZONES {
        let boundary = match s.id {
            "zone-chest-left" => Polygon::ellipse(
                TORSO_VIEW_BOX.to_percent(145.0, 130.0),
                40.0 / TORSO_VIEW_BOX.width * 100.0,
                35.0 / TORSO_VIEW_BOX.height * 100.0,
                ELLIPSE_SEGMENTS,
            )?,
            "zone-chest-right" => Polygon::ellipse(
                TORSO_VIEW_BOX.to_percent(255.0, 130.0),
                40.0 / TORSO_VIEW_BOX.width * 100.0,
                35.0 / TORSO_VIEW_BOX.height * 100.0,
                ELLIPSE_SEGMENTS,
            )?,
            _ => path::flatten(s.path, TORSO_VIEW_BOX)?,
        };
        builder.add(
            key,
            ZoneDefinition::new(s.id, s.name, BodyArea::Torso, s.category, boundary, s.priority),
        )?;
    }
    Ok(())
}

/// Assemble the built-in catalog
pub fn builtin_catalog() -> Result<ZoneCatalog, CatalogError> {
    let mut builder = ZoneCatalogBuilder::new();

    let face = CatalogKey::unisex(BodyArea::Face);
    add_seeds(&mut builder, face, FACE_ZONES, FACE_VIEW_BOX, None, false)?;
    add_seeds(&mut builder, face, FACE_FALLBACK_ZONES, FACE_VIEW_BOX, None, true)?;
    // Overlay geometry: listed by danger_zones(), never ranked by the classifier
    add_seeds(&mut builder, face, FACE_DANGER_ZONES, DANGER_VIEW_BOX, Some(RiskFlag::DangerZone), false)?;

    add_seeds(&mut builder, CatalogKey::unisex(BodyArea::Torso), TORSO_FRONT_ZONES, TORSO_VIEW_BOX, None, false)?;
    female_torso_front(&mut builder)?;
    add_seeds(&mut builder, CatalogKey::unisex(BodyArea::TorsoBack), TORSO_BACK_ZONES, TORSO_VIEW_BOX, None, false)?;
    add_seeds(&mut builder, CatalogKey::unisex(BodyArea::FullBody), FULL_BODY_ZONES, BODY_VIEW_BOX, None, false)?;

    Ok(builder.build())
}
