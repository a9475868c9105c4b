//! Chart session: recorder, layers and the active anatomy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stroke_classifier::StrokeClassifier;
use tracing::{debug, info, warn};
use zone_catalog::{BodyArea, Gender, Point, ZoneId};

use crate::{AnnotationError, Layer, LayerId, Stroke, StrokeHandle, StrokeId, StrokeRecorder, ToolType};

/// Summary label for strokes without an effective zone
pub const UNZONED_LABEL: &str = "Unzoned";

/// Strokes grouped under one effective zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    /// None for the unzoned bucket
    pub zone_id: Option<ZoneId>,
    pub zone_name: String,
    pub stroke_ids: Vec<StrokeId>,
    /// Strokes placed here by a clinician override
    pub overridden: usize,
}

impl ZoneSummary {
    pub fn stroke_count(&self) -> usize {
        self.stroke_ids.len()
    }
}

/// Plain record of a session's layers for save and reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSnapshot {
    pub catalog_version: String,
    pub body_area: BodyArea,
    pub gender: Gender,
    pub layers: Vec<Layer>,
    pub saved_at: DateTime<Utc>,
}

impl ChartSnapshot {
    pub fn to_json(&self) -> Result<String, AnnotationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, AnnotationError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One chart being annotated.
///
/// Strokes are classified against the body area and variant active when
/// they were begun; switching either later never re-tags existing strokes.
pub struct ChartSession {
    recorder: StrokeRecorder,
    layers: Vec<Layer>,
    body_area: BodyArea,
    gender: Gender,
    next_order: u32,
}

impl ChartSession {
    pub fn new(classifier: Arc<StrokeClassifier>, body_area: BodyArea, gender: Gender) -> Self {
        info!("Opening chart session on {} ({:?})", body_area, gender);
        Self {
            recorder: StrokeRecorder::new(classifier),
            layers: Vec::new(),
            body_area,
            gender,
            next_order: 0,
        }
    }

    pub fn body_area(&self) -> BodyArea {
        self.body_area
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Switch the active body area for strokes begun from now on
    pub fn set_body_area(&mut self, body_area: BodyArea) {
        if body_area != self.body_area {
            info!(
                "Active body area {} -> {}; {} committed stroke(s) keep their zones",
                self.body_area,
                body_area,
                self.stroke_count()
            );
            self.body_area = body_area;
        }
    }

    /// Switch the anatomical variant for strokes begun from now on
    pub fn set_gender(&mut self, gender: Gender) {
        if gender != self.gender {
            info!("Active variant {:?} -> {:?}", self.gender, gender);
            self.gender = gender;
        }
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    // Layers

    pub fn add_layer(&mut self, name: impl Into<String>) -> Result<LayerId, AnnotationError> {
        let name = name.into();
        if self.layers.iter().any(|l| l.name == name) {
            return Err(AnnotationError::DuplicateLayer(name));
        }
        let layer = Layer::new(name, self.next_order);
        self.next_order += 1;
        let id = layer.id;
        debug!("Added layer '{}' ({})", layer.name, id);
        self.layers.push(layer);
        Ok(id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers in stacking order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, AnnotationError> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AnnotationError::UnknownLayer(id))
    }

    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> Result<(), AnnotationError> {
        self.layer_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> Result<(), AnnotationError> {
        let layer = self.layer_mut(id)?;
        layer.locked = locked;
        info!("Layer '{}' {}", layer.name, if locked { "locked" } else { "unlocked" });
        Ok(())
    }

    // Stroke lifecycle

    /// Open a stroke against the active body area and variant
    pub fn begin_stroke(&mut self, tool_type: ToolType) -> StrokeHandle {
        self.recorder.begin_stroke(tool_type, self.body_area, self.gender)
    }

    pub fn append_point(&mut self, handle: StrokeHandle, point: Point) -> Result<(), AnnotationError> {
        self.recorder.append_point(handle, point)
    }

    pub fn discard_stroke(&mut self, handle: StrokeHandle) -> Result<(), AnnotationError> {
        self.recorder.discard_stroke(handle)
    }

    /// Commit an open stroke into a layer.
    ///
    /// The layer is checked first so a missing or locked layer leaves the
    /// stroke open.
    pub fn commit_stroke(&mut self, handle: StrokeHandle, layer_id: LayerId) -> Result<&Stroke, AnnotationError> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id == layer_id)
            .ok_or(AnnotationError::UnknownLayer(layer_id))?;
        if self.layers[index].locked {
            return Err(AnnotationError::LayerLocked(layer_id));
        }

        let stroke = self.recorder.commit_stroke(handle)?;
        self.layers[index].push(stroke)
    }

    /// Committed stroke in any layer
    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.layers.iter().find_map(|l| l.find(id))
    }

    fn stroke_mut(&mut self, id: StrokeId) -> Result<&mut Stroke, AnnotationError> {
        self.layers
            .iter_mut()
            .find_map(|l| l.find_mut(id))
            .ok_or(AnnotationError::UnknownStroke(id))
    }

    pub fn stroke_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// Record the clinician's zone for a stroke; detection is untouched
    pub fn override_zone(&mut self, stroke_id: StrokeId, zone_id: ZoneId) -> Result<(), AnnotationError> {
        let catalog = self.recorder.classifier().catalog();
        let stroke = self
            .layers
            .iter_mut()
            .find_map(|l| l.find_mut(stroke_id))
            .ok_or(AnnotationError::UnknownStroke(stroke_id))?;

        if catalog
            .find_zone(stroke.body_area(), stroke.gender(), &zone_id)
            .is_none()
        {
            return Err(AnnotationError::UnknownZone {
                zone: zone_id,
                body_area: stroke.body_area(),
            });
        }

        info!("Stroke {} zone overridden to {}", stroke_id, zone_id);
        stroke.set_override(Some(zone_id));
        Ok(())
    }

    /// Drop an override, returning the zone that was set
    pub fn clear_override(&mut self, stroke_id: StrokeId) -> Result<Option<ZoneId>, AnnotationError> {
        let previous = self.stroke_mut(stroke_id)?.set_override(None);
        if previous.is_some() {
            debug!("Stroke {} override cleared", stroke_id);
        }
        Ok(previous)
    }

    /// Set free-text label and notes on a committed stroke
    pub fn annotate_stroke(
        &mut self,
        stroke_id: StrokeId,
        label: Option<String>,
        notes: Option<String>,
    ) -> Result<(), AnnotationError> {
        let stroke = self.stroke_mut(stroke_id)?;
        stroke.label = label;
        stroke.notes = notes;
        Ok(())
    }

    pub fn undo_last(&mut self, layer_id: LayerId) -> Result<Option<Stroke>, AnnotationError> {
        let removed = self.layer_mut(layer_id)?.undo_last()?;
        if let Some(stroke) = &removed {
            debug!("Undo stroke {} on layer {}", stroke.id(), layer_id);
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self, layer_id: LayerId) -> Result<Vec<Stroke>, AnnotationError> {
        let removed = self.layer_mut(layer_id)?.clear_all()?;
        info!("Cleared {} stroke(s) from layer {}", removed.len(), layer_id);
        Ok(removed)
    }

    /// Strokes across all layers grouped by effective zone, in first-seen
    /// order with the unzoned bucket last
    pub fn strokes_by_zone(&self) -> Vec<ZoneSummary> {
        let catalog = self.recorder.classifier().catalog();
        let mut summaries: Vec<ZoneSummary> = Vec::new();

        for stroke in self.layers.iter().flat_map(|l| l.strokes()) {
            let zone = stroke.effective_zone();
            let summary = match summaries.iter().position(|s| s.zone_id.as_ref() == zone) {
                Some(index) => &mut summaries[index],
                None => {
                    summaries.push(ZoneSummary {
                        zone_id: zone.cloned(),
                        zone_name: zone
                            .map(|id| catalog.zone_name(id).to_string())
                            .unwrap_or_else(|| UNZONED_LABEL.to_string()),
                        stroke_ids: Vec::new(),
                        overridden: 0,
                    });
                    let last = summaries.len() - 1;
                    &mut summaries[last]
                }
            };
            summary.stroke_ids.push(stroke.id());
            if stroke.is_overridden() {
                summary.overridden += 1;
            }
        }

        summaries.sort_by_key(|s| s.zone_id.is_none());
        summaries
    }

    // Persistence

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            catalog_version: self.recorder.classifier().catalog().version().to_string(),
            body_area: self.body_area,
            gender: self.gender,
            layers: self.layers.clone(),
            saved_at: Utc::now(),
        }
    }

    /// Replace layers and active anatomy with a saved snapshot.
    ///
    /// Stored detections are kept as saved; nothing is reclassified.
    pub fn restore(&mut self, snapshot: ChartSnapshot) -> Result<(), AnnotationError> {
        for (i, layer) in snapshot.layers.iter().enumerate() {
            if snapshot.layers[..i].iter().any(|l| l.name == layer.name) {
                return Err(AnnotationError::DuplicateLayer(layer.name.clone()));
            }
        }

        let current = self.recorder.classifier().catalog().version();
        if snapshot.catalog_version != current {
            warn!(
                "Restoring chart saved against catalog v{} into v{}",
                snapshot.catalog_version, current
            );
        }

        let mut layers = snapshot.layers;
        layers.sort_by_key(|l| l.order);
        self.next_order = layers.last().map(|l| l.order + 1).unwrap_or(0);
        self.layers = layers;
        self.body_area = snapshot.body_area;
        self.gender = snapshot.gender;

        info!(
            "Restored chart from {} ({} layers, {} strokes)",
            snapshot.saved_at,
            self.layers.len(),
            self.stroke_count()
        );
        Ok(())
    }
}
