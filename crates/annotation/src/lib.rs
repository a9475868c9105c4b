//! Stroke and Annotation Lifecycle
//!
//! Mediates between pointer capture and the zone classifier:
//! - Open strokes collect points in arrival order
//! - Commit freezes the stroke and attaches its detection exactly once
//! - Clinician overrides sit beside the detection, never replacing it
//! - Layers own committed strokes with LIFO undo and clear
//! - Sessions snapshot to plain JSON for the surrounding application

mod error;
mod layer;
mod recorder;
mod session;
mod stroke;

pub use error::AnnotationError;
pub use layer::{Layer, LayerId};
pub use recorder::{StrokeHandle, StrokeRecorder};
pub use session::{ChartSession, ChartSnapshot, ZoneSummary, UNZONED_LABEL};
pub use stroke::{Stroke, StrokeId, ToolType};
