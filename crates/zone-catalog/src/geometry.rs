//! Normalized 2D geometry
//!
//! All coordinates live in a 0-100 space (percent of chart width/height),
//! so boundaries stay valid regardless of zoom level or viewport size.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::CatalogError;

/// Tolerance for treating a point as lying on a polygon edge
const EDGE_EPSILON: f64 = 1e-9;

/// Segment count used when flattening an ellipse
pub const ELLIPSE_SEGMENTS: usize = 32;

/// A point in normalized chart space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Chart view-box used to convert authored coordinates into percent space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a view-box coordinate into 0-100 space
    pub fn to_percent(&self, x: f64, y: f64) -> Point {
        Point::new(x / self.width * 100.0, y / self.height * 100.0)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box enclosing all points (None for an empty slice)
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y)
    }
}

/// Closed polygon boundary (implicitly closed, may be non-convex)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Build a polygon, rejecting degenerate or non-finite input
    pub fn new(mut vertices: Vec<Point>) -> Result<Self, CatalogError> {
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(CatalogError::NonFiniteVertex { index });
        }

        // Explicit closing vertex is redundant
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        vertices.dedup();

        if vertices.len() < 3 {
            return Err(CatalogError::TooFewVertices(vertices.len()));
        }

        let bounds = BoundingBox::enclosing(&vertices)
            .ok_or(CatalogError::TooFewVertices(0))?;

        Ok(Self { vertices, bounds })
    }

    /// Axis-aligned rectangle
    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, CatalogError> {
        Self::new(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ])
    }

    /// Ellipse flattened into `segments` vertices
    pub fn ellipse(center: Point, rx: f64, ry: f64, segments: usize) -> Result<Self, CatalogError> {
        if !(rx > 0.0 && ry > 0.0) || !rx.is_finite() || !ry.is_finite() {
            return Err(CatalogError::InvalidEllipse { rx, ry });
        }
        let segments = segments.max(3);
        let vertices = (0..segments)
            .map(|i| {
                let theta = TAU * i as f64 / segments as f64;
                Point::new(center.x + rx * theta.cos(), center.y + ry * theta.sin())
            })
            .collect();
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Even-odd ray casting; points on an edge or vertex count as inside.
    /// Non-finite points are never contained.
    pub fn contains(&self, point: &Point) -> bool {
        if !point.is_finite() || !self.bounds.contains(point) {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];

            if on_segment(point, vj, vi) {
                return true;
            }

            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Shoelace area
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum.abs() / 2.0
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = CatalogError;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

fn on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let cross = dx * (p.y - a.y) - dy * (p.x - a.x);
    let scale = dx.hypot(dy).max(1.0);
    if cross.abs() > EDGE_EPSILON * scale {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_EPSILON
        && p.x <= a.x.max(b.x) + EDGE_EPSILON
        && p.y >= a.y.min(b.y) - EDGE_EPSILON
        && p.y <= a.y.max(b.y) + EDGE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn l_shape() -> Polygon {
        // Non-convex: notch cut out of the top-right quadrant
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_interior_and_exterior() {
        let square = Polygon::rect(10.0, 10.0, 20.0, 20.0).unwrap();
        assert!(square.contains(&Point::new(15.0, 15.0)));
        assert!(!square.contains(&Point::new(25.0, 15.0)));
        assert!(!square.contains(&Point::new(15.0, 9.0)));
    }

    #[test]
    fn test_edges_and_vertices_are_inside() {
        let square = Polygon::rect(10.0, 10.0, 20.0, 20.0).unwrap();
        assert!(square.contains(&Point::new(10.0, 15.0)));
        assert!(square.contains(&Point::new(20.0, 15.0)));
        assert!(square.contains(&Point::new(15.0, 20.0)));
        assert!(square.contains(&Point::new(10.0, 10.0)));
        assert!(square.contains(&Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_non_convex() {
        let poly = l_shape();
        assert!(poly.contains(&Point::new(2.0, 8.0)));
        assert!(poly.contains(&Point::new(8.0, 2.0)));
        // Inside the bounding box but in the notch
        assert!(!poly.contains(&Point::new(8.0, 8.0)));
        // Inner corner of the notch is on an edge
        assert!(poly.contains(&Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_non_finite_point_never_contained() {
        let square = Polygon::rect(0.0, 0.0, 100.0, 100.0).unwrap();
        assert!(!square.contains(&Point::new(f64::NAN, 50.0)));
        assert!(!square.contains(&Point::new(50.0, f64::INFINITY)));
    }

    #[test]
    fn test_rejects_degenerate_boundaries() {
        assert_eq!(
            Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(CatalogError::TooFewVertices(2))
        );
        // Closing vertex does not count
        assert!(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ])
        .is_err());
        assert_eq!(
            Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(f64::NAN, 0.0),
                Point::new(1.0, 1.0),
            ]),
            Err(CatalogError::NonFiniteVertex { index: 1 })
        );
    }

    #[test]
    fn test_ellipse() {
        let ellipse = Polygon::ellipse(Point::new(50.0, 50.0), 20.0, 10.0, ELLIPSE_SEGMENTS).unwrap();
        assert_eq!(ellipse.vertices().len(), ELLIPSE_SEGMENTS);
        assert!(ellipse.contains(&Point::new(50.0, 50.0)));
        assert!(ellipse.contains(&Point::new(65.0, 50.0)));
        assert!(!ellipse.contains(&Point::new(50.0, 65.0)));
        assert!(Polygon::ellipse(Point::new(0.0, 0.0), 0.0, 5.0, 8).is_err());
    }

    #[test]
    fn test_area() {
        assert!((Polygon::rect(0.0, 0.0, 4.0, 5.0).unwrap().area() - 20.0).abs() < 1e-9);
        assert!((l_shape().area() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_validates_vertices() {
        let json = r#"[{"x":0.0,"y":0.0},{"x":1.0,"y":0.0}]"#;
        assert!(serde_json::from_str::<Polygon>(json).is_err());

        let square = Polygon::rect(0.0, 0.0, 1.0, 1.0).unwrap();
        let encoded = serde_json::to_string(&square).unwrap();
        let decoded: Polygon = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.bounds(), square.bounds());
    }

    proptest! {
        #[test]
        fn prop_rect_containment_matches_bounds(x in -10.0f64..110.0, y in -10.0f64..110.0) {
            let rect = Polygon::rect(20.0, 30.0, 60.0, 70.0).unwrap();
            let expected = (20.0..=60.0).contains(&x) && (30.0..=70.0).contains(&y);
            prop_assert_eq!(rect.contains(&Point::new(x, y)), expected);
        }
    }
}
