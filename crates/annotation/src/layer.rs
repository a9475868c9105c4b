//! Annotation layers: ordered stroke stacks with LIFO undo

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::{AnnotationError, Stroke, StrokeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named, toggleable container of committed strokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    /// Locked layers refuse new strokes, undo and clear
    pub locked: bool,
    /// Stacking order, lowest drawn first
    pub order: u32,
    strokes: Vec<Stroke>,
}

impl Layer {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            visible: true,
            locked: false,
            order,
            strokes: Vec::new(),
        }
    }

    /// Strokes oldest first
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn find(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    fn ensure_unlocked(&self) -> Result<(), AnnotationError> {
        if self.locked {
            return Err(AnnotationError::LayerLocked(self.id));
        }
        Ok(())
    }

    /// Take ownership of a committed stroke
    pub fn push(&mut self, stroke: Stroke) -> Result<&Stroke, AnnotationError> {
        self.ensure_unlocked()?;
        debug!("Layer '{}' takes stroke {}", self.name, stroke.id());
        self.strokes.push(stroke);
        let last = self.strokes.len() - 1;
        Ok(&self.strokes[last])
    }

    /// Remove the most recent stroke; `None` when the layer is empty
    pub fn undo_last(&mut self) -> Result<Option<Stroke>, AnnotationError> {
        self.ensure_unlocked()?;
        Ok(self.strokes.pop())
    }

    /// Remove every stroke, returning them oldest first
    pub fn clear_all(&mut self) -> Result<Vec<Stroke>, AnnotationError> {
        self.ensure_unlocked()?;
        Ok(std::mem::take(&mut self.strokes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeParts;
    use proptest::prelude::*;
    use crate::ToolType;
    use chrono::Utc;
    use stroke_classifier::DetectionResult;
    use zone_catalog::{BodyArea, Gender};

    fn stroke() -> Stroke {
        let now = Utc::now();
        Stroke::from_parts(StrokeParts {
            tool_type: ToolType::Freehand,
            body_area: BodyArea::Face,
            gender: Gender::Female,
            points: Vec::new(),
            created_at: now,
            committed_at: now,
            detection: DetectionResult::unzoned(0),
            visited_zones: Vec::new(),
        })
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut layer = Layer::new("Injections", 0);
        let first = layer.push(stroke()).unwrap().id();
        let second = layer.push(stroke()).unwrap().id();

        assert_eq!(layer.undo_last().unwrap().map(|s| s.id()), Some(second));
        assert_eq!(layer.undo_last().unwrap().map(|s| s.id()), Some(first));
        assert_eq!(layer.undo_last().unwrap(), None);
    }

    #[test]
    fn test_clear_all_returns_strokes() {
        let mut layer = Layer::new("Injections", 0);
        let first = layer.push(stroke()).unwrap().id();
        layer.push(stroke()).unwrap();

        let cleared = layer.clear_all().unwrap();
        assert_eq!(cleared.len(), 2);
        assert_eq!(cleared[0].id(), first);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_locked_layer_rejects_changes() {
        let mut layer = Layer::new("Signed off", 1);
        let id = layer.push(stroke()).unwrap().id();
        layer.locked = true;
        let locked = AnnotationError::LayerLocked(layer.id);

        assert_eq!(layer.push(stroke()).err(), Some(locked.clone()));
        assert_eq!(layer.undo_last(), Err(locked.clone()));
        assert_eq!(layer.clear_all(), Err(locked));
        assert!(layer.find(id).is_some());
        assert_eq!(layer.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_undo_reverses_commit_order(count in 0usize..20, undos in 0usize..25) {
            let mut layer = Layer::new("Prop", 0);
            let ids: Vec<StrokeId> = (0..count)
                .map(|_| layer.push(stroke()).unwrap().id())
                .collect();

            for i in 0..undos {
                let expected = count.checked_sub(i + 1).map(|idx| ids[idx]);
                prop_assert_eq!(layer.undo_last().unwrap().map(|s| s.id()), expected);
            }
            prop_assert_eq!(layer.len(), count.saturating_sub(undos));
        }
    }
}
