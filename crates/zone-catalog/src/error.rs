//! Catalog Error Types

use thiserror::Error;

/// Errors raised while building a zone catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Boundary has fewer than three distinct vertices
    #[error("Boundary needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Boundary vertex is NaN or infinite
    #[error("Boundary vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    /// SVG path data could not be parsed
    #[error("Invalid path data: {0}")]
    InvalidPath(String),

    /// Ellipse radii must be positive
    #[error("Invalid ellipse: rx={rx}, ry={ry}")]
    InvalidEllipse { rx: f64, ry: f64 },

    /// Zone id registered twice for the same body area and variant
    #[error("Duplicate zone id: {0}")]
    DuplicateZone(String),

    /// Unrecognised body area name
    #[error("Unknown body area: {0}")]
    UnknownBodyArea(String),

    /// Unrecognised gender variant name
    #[error("Unknown gender variant: {0}")]
    UnknownGender(String),
}
