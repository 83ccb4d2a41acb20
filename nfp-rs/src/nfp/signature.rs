use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{Point, SPolygon};

/// Added to the area before truncation, so that an area sitting on an integer boundary
/// does not drop a bucket due to floating point noise
const AREA_NUDGE: f64 = 1e-6;

/// Resolution at which the first edge vector is compared
const EDGE_QUANTUM: f64 = 1e-6;

/// Translation invariant identity of a shape: truncated area combined with the vector
/// from the first to the second vertex.
///
/// Two polygons with the same area but a different first edge are considered different shapes.
/// Genuinely different shapes that agree on both are not told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeSignature {
    pub area_bucket: i64,
    pub edge: (i64, i64),
}

impl ShapeSignature {
    pub fn new(poly: &SPolygon) -> Self {
        let area_bucket = (poly.area + AREA_NUDGE).trunc() as i64;
        let Point(dx, dy) = poly.first_edge();
        let edge = (
            (dx / EDGE_QUANTUM).round() as i64,
            (dy / EDGE_QUANTUM).round() as i64,
        );
        ShapeSignature { area_bucket, edge }
    }
}

impl From<&SPolygon> for ShapeSignature {
    fn from(poly: &SPolygon) -> Self {
        ShapeSignature::new(poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> SPolygon {
        SPolygon::new(vec![
            Point(0.1, 0.2),
            Point(3.3, 0.2),
            Point(3.3, 1.7),
            Point(1.1, 2.9),
        ])
        .unwrap()
    }

    #[test]
    fn translation_does_not_change_signature() {
        let original = shape();
        for (dx, dy) in [(0.1, 0.7), (1e3 + 0.3, -17.9), (-0.3, 1e-9)] {
            let mut moved = original.clone();
            moved.translate((dx, dy));
            assert_eq!(ShapeSignature::new(&original), ShapeSignature::new(&moved));
        }
    }

    #[test]
    fn first_edge_distinguishes_equal_areas() {
        let a = SPolygon::new(vec![Point(0.0, 0.0), Point(2.0, 0.0), Point(2.0, 1.0), Point(0.0, 1.0)]).unwrap();
        let b = SPolygon::new(vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(1.0, 2.0), Point(0.0, 2.0)]).unwrap();
        assert_eq!(ShapeSignature::new(&a).area_bucket, ShapeSignature::new(&b).area_bucket);
        assert_ne!(ShapeSignature::new(&a), ShapeSignature::new(&b));
    }
}
