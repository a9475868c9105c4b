//! End-to-end charting flow over nested zones

use annotation::{ChartSession, ToolType};
use std::sync::Arc;
use stroke_classifier::StrokeClassifier;
use zone_catalog::{
    BodyArea, CatalogKey, Gender, Point, Polygon, ZoneCatalog, ZoneCatalogBuilder, ZoneCategory,
    ZoneDefinition, ZoneId,
};

fn nested_catalog() -> ZoneCatalog {
    let key = CatalogKey::unisex(BodyArea::Face);
    let mut builder = ZoneCatalogBuilder::new();
    // Forehead registered first so ordering comes from priority alone
    builder
        .add(
            key,
            ZoneDefinition::new(
                "forehead",
                "Forehead",
                BodyArea::Face,
                ZoneCategory::UpperFace,
                Polygon::rect(20.0, 5.0, 80.0, 30.0).unwrap(),
                10,
            ),
        )
        .unwrap();
    builder
        .add(
            key,
            ZoneDefinition::new(
                "glabella",
                "Glabella",
                BodyArea::Face,
                ZoneCategory::UpperFace,
                Polygon::rect(45.0, 18.0, 55.0, 28.0).unwrap(),
                1,
            ),
        )
        .unwrap();
    builder.build()
}

fn session() -> ChartSession {
    let classifier = StrokeClassifier::with_defaults(Arc::new(nested_catalog()));
    ChartSession::new(Arc::new(classifier), BodyArea::Face, Gender::Female)
}

#[test]
fn glabella_wins_over_enclosing_forehead() {
    let mut session = session();
    let layer = session.add_layer("Neurotoxin").unwrap();

    let handle = session.begin_stroke(ToolType::Brush);
    for i in 0..10 {
        let t = i as f64;
        session
            .append_point(handle, Point::new(46.0 + t * 0.8, 20.0 + t * 0.6))
            .unwrap();
    }
    let stroke = session.commit_stroke(handle, layer).unwrap();
    let detection = stroke.detection();

    assert_eq!(detection.primary_zone, Some(ZoneId::from("glabella")));
    assert_eq!(detection.confidence, 1.0);
    assert_eq!(detection.total_points, 10);
    // Both zones contain every point, yet identical coverage is not a split
    assert_eq!(detection.candidates.len(), 2);
    assert!(!detection.is_split);
    assert_eq!(detection.primary_zone_name(), Some("Glabella"));
}

#[test]
fn override_keeps_detection_for_audit() {
    let mut session = session();
    let layer = session.add_layer("Neurotoxin").unwrap();

    let handle = session.begin_stroke(ToolType::Brush);
    for x in [25.0, 30.0, 35.0, 40.0, 60.0] {
        session.append_point(handle, Point::new(x, 10.0)).unwrap();
    }
    let id = session.commit_stroke(handle, layer).unwrap().id();
    session.override_zone(id, ZoneId::from("glabella")).unwrap();

    let stroke = session.stroke(id).unwrap();
    assert_eq!(stroke.detection().primary_zone, Some(ZoneId::from("forehead")));
    assert_eq!(stroke.effective_zone(), Some(&ZoneId::from("glabella")));

    let summary = session.strokes_by_zone();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].zone_name, "Glabella");
    assert_eq!(summary[0].overridden, 1);
}

#[test]
fn single_tap_is_unzoned_but_saved() {
    let mut session = session();
    let layer = session.add_layer("Marks").unwrap();

    let handle = session.begin_stroke(ToolType::Shape);
    session.append_point(handle, Point::new(50.0, 20.0)).unwrap();
    let stroke = session.commit_stroke(handle, layer).unwrap();

    assert!(stroke.detection().primary_zone.is_none());
    assert_eq!(stroke.detection().confidence, 0.0);
    assert_eq!(session.stroke_count(), 1);
}

#[test]
fn builtin_catalog_session() {
    let catalog = ZoneCatalog::builtin().unwrap();
    let classifier = StrokeClassifier::with_defaults(Arc::new(catalog));
    let mut session = ChartSession::new(Arc::new(classifier), BodyArea::Face, Gender::Female);
    let layer = session.add_layer("Neurotoxin").unwrap();

    let glabella = session
        .recorder()
        .classifier()
        .catalog()
        .zone_by_id(&ZoneId::from("glabella"))
        .map(|z| z.boundary.bounds().center())
        .unwrap();

    let handle = session.begin_stroke(ToolType::Brush);
    for i in 0..6 {
        let d = i as f64 * 0.1;
        session
            .append_point(handle, Point::new(glabella.x + d, glabella.y + d))
            .unwrap();
    }
    let stroke = session.commit_stroke(handle, layer).unwrap();
    assert_eq!(stroke.detection().primary_zone, Some(ZoneId::from("glabella")));
}
