//! Zone inference by point-containment sampling

use std::sync::Arc;
use tracing::debug;
use zone_catalog::{BodyArea, Gender, Point, ZoneCatalog, ZoneDefinition};

use crate::{ClassifierConfig, DetectionResult, ZoneCandidate};

/// Per-zone hit tally; `index` is the zone's position in the catalog list
#[derive(Debug, Clone, Copy)]
struct ZoneHits<'a> {
    zone: &'a ZoneDefinition,
    index: usize,
    hits: usize,
}

/// Stateless classifier over a shared, immutable catalog
#[derive(Debug, Clone)]
pub struct StrokeClassifier {
    config: ClassifierConfig,
    catalog: Arc<ZoneCatalog>,
}

impl StrokeClassifier {
    pub fn new(catalog: Arc<ZoneCatalog>, config: ClassifierConfig) -> Self {
        Self { config, catalog }
    }

    /// Classifier with default thresholds
    pub fn with_defaults(catalog: Arc<ZoneCatalog>) -> Self {
        Self::new(catalog, ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog
    pub fn catalog_handle(&self) -> Arc<ZoneCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Tally hits for every zone with at least one contained point, ranked
    /// by hits descending, then priority ascending, then catalog order.
    ///
    /// Risk-flagged zones are overlay geometry and never ranked. Fallback
    /// zones are ranked only when no specific zone is hit.
    fn rank_zones<'a>(&self, points: &[Point], zones: &'a [ZoneDefinition]) -> Vec<ZoneHits<'a>> {
        let tally = |fallback: bool| -> Vec<ZoneHits<'a>> {
            zones
                .iter()
                .enumerate()
                .filter(|(_, zone)| !zone.is_danger_zone() && zone.fallback == fallback)
                .filter_map(|(index, zone)| {
                    let hits = points.iter().filter(|p| zone.contains_point(p)).count();
                    (hits > 0).then_some(ZoneHits { zone, index, hits })
                })
                .collect()
        };

        let mut ranked = tally(false);
        if ranked.is_empty() {
            ranked = tally(true);
        }

        ranked.sort_by(|a, b| {
            b.hits
                .cmp(&a.hits)
                .then(a.zone.priority.cmp(&b.zone.priority))
                .then(a.index.cmp(&b.index))
        });
        ranked
    }

    fn candidate(entry: &ZoneHits<'_>, total: usize) -> ZoneCandidate {
        ZoneCandidate {
            zone_id: entry.zone.id.clone(),
            zone_name: entry.zone.name.clone(),
            overlap_ratio: entry.hits as f64 / total as f64,
            hits: entry.hits,
        }
    }

    /// Classify a committed stroke into one primary zone plus candidates.
    ///
    /// Never fails: short strokes, empty catalogs and strokes outside
    /// every boundary all yield an unzoned result.
    pub fn detect_zone_from_stroke(
        &self,
        points: &[Point],
        body_area: BodyArea,
        gender: Gender,
    ) -> DetectionResult {
        let total = points.len();
        if total < self.config.min_points {
            debug!(
                "Stroke rejected: {} points < minimum {}",
                total, self.config.min_points
            );
            return DetectionResult::unzoned(total);
        }

        let zones = self.catalog.zones_for(body_area, gender);
        let ranked = self.rank_zones(points, zones);

        let Some(top) = ranked.first() else {
            debug!("Stroke of {} points hit no {} zone", total, body_area);
            return DetectionResult::unzoned(total);
        };

        let sample_scale = (total as f64 / self.config.confidence_sample_floor as f64).min(1.0);
        let confidence = (top.hits as f64 / total as f64 * sample_scale).clamp(0.0, 1.0);

        let candidates: Vec<ZoneCandidate> = ranked
            .iter()
            .filter(|entry| entry.hits as f64 / total as f64 >= self.config.secondary_threshold)
            .map(|entry| Self::candidate(entry, total))
            .collect();

        // Zones covering exactly the top zone's points (nested or coincident)
        // are not competitors; the runner-up is the best zone that differs.
        let is_split = ranked[1..]
            .iter()
            .find(|entry| !same_coverage(points, top.zone, entry.zone))
            .is_some_and(|second| {
                // Compare on hit counts so ratio rounding cannot flip the result
                let gap = (top.hits - second.hits) as f64;
                second.hits as f64 / total as f64 >= self.config.secondary_threshold
                    && gap <= self.config.split_tolerance * total as f64
            });

        debug!(
            "Stroke classified as {} (confidence {:.2}, {} candidates, split={})",
            top.zone.id,
            confidence,
            candidates.len(),
            is_split
        );

        DetectionResult {
            primary_zone: Some(top.zone.id.clone()),
            confidence,
            candidates,
            is_split,
            total_points: total,
        }
    }

    /// Every zone a path visits, best first, using the configured floor
    pub fn detect_multiple_zones(
        &self,
        points: &[Point],
        body_area: BodyArea,
        gender: Gender,
    ) -> Vec<ZoneCandidate> {
        self.detect_multiple_zones_with_floor(points, body_area, gender, self.config.multi_zone_floor)
    }

    /// Every zone whose overlap ratio reaches `floor` (any hit when 0)
    pub fn detect_multiple_zones_with_floor(
        &self,
        points: &[Point],
        body_area: BodyArea,
        gender: Gender,
        floor: f64,
    ) -> Vec<ZoneCandidate> {
        let total = points.len();
        if total == 0 {
            return Vec::new();
        }

        let zones = self.catalog.zones_for(body_area, gender);
        let visited: Vec<ZoneCandidate> = self
            .rank_zones(points, zones)
            .iter()
            .map(|entry| Self::candidate(entry, total))
            .filter(|c| c.overlap_ratio >= floor)
            .collect();

        debug!(
            "Path of {} points visits {} {} zones",
            total,
            visited.len(),
            body_area
        );
        visited
    }
}

/// Both zones contain exactly the same stroke points (nested or coincident)
fn same_coverage(points: &[Point], a: &ZoneDefinition, b: &ZoneDefinition) -> bool {
    points
        .iter()
        .all(|p| a.contains_point(p) == b.contains_point(p))
}
