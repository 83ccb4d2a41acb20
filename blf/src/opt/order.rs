use std::cmp::Reverse;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use nfp_rs::geometry::primitives::SPolygon;

use crate::config::OrderWeights;

/// Indices of `polygons` in placement order: descending composite score, input order for ties.
///
/// Large, complex and space-inefficient shapes come first.
pub fn placement_order(polygons: &[SPolygon], weights: &OrderWeights) -> Vec<usize> {
    let max_bbox_area = polygons
        .iter()
        .map(|p| p.bbox.area())
        .fold(0.0, f64::max);
    let max_n_vertices = polygons.iter().map(|p| p.n_vertices()).max().unwrap_or(0);

    let score = |p: &SPolygon| {
        let bbox_area = p.bbox.area();
        let rel_area = bbox_area / max_bbox_area;
        let rel_complexity = p.n_vertices() as f64 / max_n_vertices as f64;
        let waste = 1.0 - p.area / bbox_area;
        weights.bbox_area * rel_area + weights.complexity * rel_complexity + weights.waste * waste
    };

    //sort_by_cached_key is stable
    (0..polygons.len())
        .sorted_by_cached_key(|&i| Reverse(OrderedFloat(score(&polygons[i]))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfp_rs::geometry::primitives::Point;

    fn poly(points: &[(f64, f64)]) -> SPolygon {
        SPolygon::new(points.iter().map(|&p| Point::from(p)).collect()).unwrap()
    }

    #[test]
    fn large_shapes_come_first() {
        let small = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let large = poly(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]);
        let order = placement_order(&[small.clone(), large, small], &OrderWeights::default());
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn waste_breaks_equal_bounding_boxes() {
        let square = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let triangle = poly(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let weights = OrderWeights {
            complexity: 0.0,
            ..OrderWeights::default()
        };
        assert_eq!(placement_order(&[square, triangle], &weights), vec![1, 0]);
    }

    #[test]
    fn identical_shapes_keep_input_order() {
        let square = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let polygons = vec![square; 5];
        assert_eq!(
            placement_order(&polygons, &OrderWeights::default()),
            vec![0, 1, 2, 3, 4]
        );
    }
}
