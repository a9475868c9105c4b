//! SVG path flattening
//!
//! Chart zones are authored as SVG path data over the chart artwork.
//! Supports absolute `M`, `L`, `Q`, `C` and `Z` commands; curves are
//! sampled into straight segments.

use crate::geometry::{Point, Polygon, ViewBox};
use crate::CatalogError;

/// Line segments emitted per curve
const CURVE_SEGMENTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<Token>, CatalogError> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    let flush = |number: &mut String, tokens: &mut Vec<Token>| -> Result<(), CatalogError> {
        if !number.is_empty() {
            let value = number
                .parse::<f64>()
                .map_err(|_| CatalogError::InvalidPath(format!("bad number '{}'", number)))?;
            tokens.push(Token::Number(value));
            number.clear();
        }
        Ok(())
    };

    for c in data.chars() {
        match c {
            'M' | 'L' | 'Q' | 'C' | 'Z' | 'z' => {
                flush(&mut number, &mut tokens)?;
                tokens.push(Token::Command(c.to_ascii_uppercase()));
            }
            '-' if !number.is_empty() && !number.ends_with(['e', 'E']) => {
                flush(&mut number, &mut tokens)?;
                number.push(c);
            }
            '0'..='9' | '.' | '-' | 'e' | 'E' => number.push(c),
            c if c.is_whitespace() || c == ',' => flush(&mut number, &mut tokens)?,
            other => {
                return Err(CatalogError::InvalidPath(format!(
                    "unsupported command '{}'",
                    other
                )))
            }
        }
    }
    flush(&mut number, &mut tokens)?;
    Ok(tokens)
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn next_command(&mut self) -> Option<char> {
        match self.tokens.get(self.pos) {
            Some(Token::Command(c)) => {
                self.pos += 1;
                Some(*c)
            }
            _ => None,
        }
    }

    fn at_number(&self) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token::Number(_)))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn pair(&mut self) -> Result<(f64, f64), CatalogError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok((x, y))
    }

    fn number(&mut self) -> Result<f64, CatalogError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(v)) => {
                self.pos += 1;
                Ok(*v)
            }
            _ => Err(CatalogError::InvalidPath("expected coordinate".into())),
        }
    }
}

fn quadratic(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * p1.0 + t * t * p2.0,
        u * u * p0.1 + 2.0 * u * t * p1.1 + t * t * p2.1,
    )
}

fn cubic(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Flatten a single closed subpath into a polygon in 0-100 space
pub fn flatten(data: &str, view_box: ViewBox) -> Result<Polygon, CatalogError> {
    let mut cursor = Cursor {
        tokens: tokenize(data)?,
        pos: 0,
    };
    let mut raw: Vec<(f64, f64)> = Vec::new();
    let mut current: Option<(f64, f64)> = None;
    let mut closed = false;

    while !cursor.at_end() {
        let command = cursor
            .next_command()
            .ok_or_else(|| CatalogError::InvalidPath("expected command".into()))?;

        if closed {
            return Err(CatalogError::InvalidPath(
                "only one closed subpath is supported".into(),
            ));
        }

        match command {
            'M' => {
                if current.is_some() {
                    return Err(CatalogError::InvalidPath("unexpected second moveto".into()));
                }
                let p = cursor.pair()?;
                raw.push(p);
                current = Some(p);
                // Extra pairs after a moveto are implicit linetos
                while cursor.at_number() {
                    let p = cursor.pair()?;
                    raw.push(p);
                    current = Some(p);
                }
            }
            'L' => loop {
                let p = cursor.pair()?;
                raw.push(p);
                current = Some(p);
                if !cursor.at_number() {
                    break;
                }
            },
            'Q' => loop {
                let start = current
                    .ok_or_else(|| CatalogError::InvalidPath("curve before moveto".into()))?;
                let control = cursor.pair()?;
                let end = cursor.pair()?;
                for i in 1..=CURVE_SEGMENTS {
                    raw.push(quadratic(start, control, end, i as f64 / CURVE_SEGMENTS as f64));
                }
                current = Some(end);
                if !cursor.at_number() {
                    break;
                }
            },
            'C' => loop {
                let start = current
                    .ok_or_else(|| CatalogError::InvalidPath("curve before moveto".into()))?;
                let c1 = cursor.pair()?;
                let c2 = cursor.pair()?;
                let end = cursor.pair()?;
                for i in 1..=CURVE_SEGMENTS {
                    raw.push(cubic(start, c1, c2, end, i as f64 / CURVE_SEGMENTS as f64));
                }
                current = Some(end);
                if !cursor.at_number() {
                    break;
                }
            },
            'Z' => closed = true,
            other => {
                return Err(CatalogError::InvalidPath(format!(
                    "unsupported command '{}'",
                    other
                )))
            }
        }
    }

    if current.is_none() {
        return Err(CatalogError::InvalidPath("empty path".into()));
    }

    Polygon::new(
        raw.into_iter()
            .map(|(x, y)| view_box.to_percent(x, y))
            .collect::<Vec<Point>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: ViewBox = ViewBox::new(100.0, 100.0);

    #[test]
    fn test_straight_path() {
        let poly = flatten("M 10 10 L 20 10 L 20 20 L 10 20 Z", UNIT).unwrap();
        assert_eq!(poly.vertices().len(), 4);
        assert!(poly.contains(&Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_view_box_scaling() {
        let poly = flatten("M 0 0 L 200 0 L 200 225 Z", ViewBox::new(400.0, 450.0)).unwrap();
        let b = poly.bounds();
        assert!((b.max_x - 50.0).abs() < 1e-9);
        assert!((b.max_y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_curve_is_sampled() {
        // Forehead outline from the face chart
        let poly = flatten("M 120 80 Q 200 40 280 80 L 280 120 Q 200 100 120 120 Z", UNIT).unwrap();
        assert_eq!(poly.vertices().len(), 1 + CURVE_SEGMENTS + 1 + CURVE_SEGMENTS);
        // Curve apex is at y=60, not at the control point y=40
        assert!((poly.bounds().min_y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_cubic_curve() {
        let poly = flatten(
            "M 200 20 C 175 20 155 40 155 70 C 155 100 175 120 200 120 C 225 120 245 100 245 70 C 245 40 225 20 200 20 Z",
            ViewBox::new(400.0, 720.0),
        )
        .unwrap();
        assert!(poly.contains(&ViewBox::new(400.0, 720.0).to_percent(200.0, 70.0)));
    }

    #[test]
    fn test_compact_and_comma_syntax() {
        let poly = flatten("M10,10L20,10 20,20 10,20Z", UNIT).unwrap();
        assert_eq!(poly.vertices().len(), 4);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(flatten("", UNIT).is_err());
        assert!(flatten("M 10 10 L 20", UNIT).is_err());
        assert!(flatten("M 0 0 A 5 5 0 0 1 10 10 Z", UNIT).is_err());
        assert!(flatten("Q 1 1 2 2", UNIT).is_err());
        assert!(flatten("M 0 0 L 1 0 L 1 1 Z M 5 5 L 6 5 L 6 6 Z", UNIT).is_err());
        assert!(matches!(
            flatten("M 0 0 L 10 0 Z", UNIT),
            Err(CatalogError::TooFewVertices(2))
        ));
    }
}
