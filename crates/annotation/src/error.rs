//! Annotation Error Types

use thiserror::Error;
use zone_catalog::{BodyArea, ZoneId};

use crate::{LayerId, StrokeHandle, StrokeId};

/// Precondition violations reported to drawing tools
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    /// Handle was never issued or the stroke was discarded
    #[error("No open stroke for handle {0}")]
    UnknownHandle(StrokeHandle),

    /// Handle refers to a stroke that has already been committed
    #[error("Stroke {0} is already committed")]
    AlreadyCommitted(StrokeHandle),

    #[error("Unknown layer: {0}")]
    UnknownLayer(LayerId),

    #[error("Unknown stroke: {0}")]
    UnknownStroke(StrokeId),

    /// Override target is not a zone of the stroke's body area
    #[error("Zone {zone} is not defined for {body_area}")]
    UnknownZone { zone: ZoneId, body_area: BodyArea },

    #[error("Layer {0} is locked")]
    LayerLocked(LayerId),

    #[error("Layer name already in use: {0}")]
    DuplicateLayer(String),

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for AnnotationError {
    fn from(err: serde_json::Error) -> Self {
        AnnotationError::Snapshot(err.to_string())
    }
}
