//! Pointer capture to committed stroke

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use stroke_classifier::StrokeClassifier;
use tracing::{debug, info, warn};
use zone_catalog::{BodyArea, Gender, Point};

use crate::stroke::StrokeParts;
use crate::{AnnotationError, Stroke, ToolType};

/// Handle to an in-progress stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrokeHandle(u64);

impl fmt::Display for StrokeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable stroke owned by the recorder until commit
#[derive(Debug)]
struct OpenStroke {
    tool_type: ToolType,
    body_area: BodyArea,
    gender: Gender,
    points: Vec<Point>,
    created_at: DateTime<Utc>,
}

/// Opens, fills and commits strokes, classifying each exactly once
pub struct StrokeRecorder {
    classifier: Arc<StrokeClassifier>,
    open: HashMap<StrokeHandle, OpenStroke>,
    /// Aborted gestures; every other issued, closed handle was committed
    discarded: HashSet<StrokeHandle>,
    next_handle: u64,
}

impl StrokeRecorder {
    pub fn new(classifier: Arc<StrokeClassifier>) -> Self {
        Self {
            classifier,
            open: HashMap::new(),
            discarded: HashSet::new(),
            next_handle: 1,
        }
    }

    pub fn classifier(&self) -> &StrokeClassifier {
        &self.classifier
    }

    /// Open a stroke classified against `body_area` and `gender` at commit
    pub fn begin_stroke(&mut self, tool_type: ToolType, body_area: BodyArea, gender: Gender) -> StrokeHandle {
        let handle = StrokeHandle(self.next_handle);
        self.next_handle += 1;

        if !self.open.is_empty() {
            warn!("Beginning stroke {} with {} stroke(s) still open", handle, self.open.len());
        }
        debug!("Begin {} stroke {} on {}", tool_type, handle, body_area);

        self.open.insert(
            handle,
            OpenStroke {
                tool_type,
                body_area,
                gender,
                points: Vec::new(),
                created_at: Utc::now(),
            },
        );
        handle
    }

    /// Append a captured point; points keep arrival order
    pub fn append_point(&mut self, handle: StrokeHandle, point: Point) -> Result<(), AnnotationError> {
        match self.open.get_mut(&handle) {
            Some(stroke) => {
                stroke.points.push(point);
                Ok(())
            }
            None => Err(self.closed_handle_error(handle)),
        }
    }

    /// Points captured so far, for live preview
    pub fn open_points(&self, handle: StrokeHandle) -> Option<&[Point]> {
        self.open.get(&handle).map(|s| s.points.as_slice())
    }

    pub fn is_open(&self, handle: StrokeHandle) -> bool {
        self.open.contains_key(&handle)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Freeze the stroke, stamp the commit time and attach its detection
    pub fn commit_stroke(&mut self, handle: StrokeHandle) -> Result<Stroke, AnnotationError> {
        let open = match self.open.remove(&handle) {
            Some(open) => open,
            None => return Err(self.closed_handle_error(handle)),
        };

        let detection =
            self.classifier
                .detect_zone_from_stroke(&open.points, open.body_area, open.gender);
        let visited_zones = if open.tool_type.spans_zones() {
            self.classifier
                .detect_multiple_zones(&open.points, open.body_area, open.gender)
        } else {
            Vec::new()
        };

        let stroke = Stroke::from_parts(StrokeParts {
            tool_type: open.tool_type,
            body_area: open.body_area,
            gender: open.gender,
            points: open.points,
            created_at: open.created_at,
            committed_at: Utc::now(),
            detection,
            visited_zones,
        });

        info!(
            "Committed {} stroke {} ({} points) -> {}",
            stroke.tool_type(),
            stroke.id(),
            stroke.points().len(),
            stroke
                .detection()
                .primary_zone
                .as_ref()
                .map(|z| z.as_str())
                .unwrap_or("unzoned")
        );
        Ok(stroke)
    }

    /// Abort a gesture without committing
    pub fn discard_stroke(&mut self, handle: StrokeHandle) -> Result<(), AnnotationError> {
        match self.open.remove(&handle) {
            Some(open) => {
                self.discarded.insert(handle);
                debug!("Discarded stroke {} ({} points)", handle, open.points.len());
                Ok(())
            }
            None => Err(self.closed_handle_error(handle)),
        }
    }

    fn closed_handle_error(&self, handle: StrokeHandle) -> AnnotationError {
        let issued = handle.0 >= 1 && handle.0 < self.next_handle;
        if issued && !self.discarded.contains(&handle) {
            AnnotationError::AlreadyCommitted(handle)
        } else {
            AnnotationError::UnknownHandle(handle)
        }
    }
}
