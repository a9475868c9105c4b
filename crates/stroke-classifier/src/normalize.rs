//! Pointer coordinate normalization

use zone_catalog::Point;

/// Convert canvas pixel positions to 0-100 chart space.
///
/// A zero or non-finite canvas size produces non-finite points, which the
/// classifier treats as hitting no zone.
pub fn normalize_to_canvas(pixels: &[(f64, f64)], width: f64, height: f64) -> Vec<Point> {
    pixels
        .iter()
        .map(|&(x, y)| Point::new(x / width * 100.0, y / height * 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_to_percent() {
        let points = normalize_to_canvas(&[(0.0, 0.0), (400.0, 225.0), (800.0, 450.0)], 800.0, 450.0);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(50.0, 50.0));
        assert_eq!(points[2], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_degenerate_canvas_yields_non_finite() {
        let points = normalize_to_canvas(&[(10.0, 10.0), (0.0, 0.0)], 0.0, 100.0);
        assert!(points.iter().all(|p| !p.is_finite()));
    }
}
