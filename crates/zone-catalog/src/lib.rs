//! Anatomical Zone Catalog
//!
//! Static, versioned zone definitions for clinical charting:
//! - Normalized 0-100 geometry shared by strokes and zones
//! - Polygon, ellipse and SVG-path boundaries
//! - Per body area / anatomical variant zone lists, most specific first
//! - Danger-zone tagging for the safety overlay
//!
//! The catalog is never mutated after construction and can be shared
//! across threads without locking.

mod catalog;
mod data;
mod error;
pub mod geometry;
pub mod path;
mod zone;

pub use catalog::{CatalogKey, ZoneCatalog, ZoneCatalogBuilder, CATALOG_VERSION, UNKNOWN_ZONE_NAME};
pub use error::CatalogError;
pub use geometry::{BoundingBox, Point, Polygon, ViewBox};
pub use zone::{contains_point, BodyArea, Gender, RiskFlag, ZoneCategory, ZoneDefinition, ZoneId};
