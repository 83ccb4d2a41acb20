use geo::{Area, SimplifyVwPreserve};
use log::debug;

use crate::geometry::primitives::{Edge, Point, SPolygon};
use crate::geometry::to_geo_polygon;
use crate::util::SimplifyConfig;

/// Removes every vertex that lies on the segment between its neighbours.
/// Returns `None` if the polygon would be left with fewer than 3 vertices.
pub fn remove_collinear(poly: &SPolygon) -> Option<SPolygon> {
    let mut vertices = poly.vertices.clone();
    loop {
        let n = vertices.len();
        let redundant = (0..n).find(|&i| {
            let prev = vertices[(i + n - 1) % n];
            let next = vertices[(i + 1) % n];
            Edge {
                start: prev,
                end: next,
            }
            .almost_contains(&vertices[i])
        });
        match redundant {
            Some(i) if n > 3 => {
                vertices.remove(i);
            }
            Some(_) => return None,
            None => break,
        }
    }
    SPolygon::new(vertices).ok()
}

/// Topology-preserving Visvalingam-Whyatt simplification with an adaptive tolerance.
///
/// A vertex is dropped when the triangle it forms with its neighbours is smaller than the square of
/// the tolerance, unless dropping it would make the boundary cross itself.
/// Starts at [`SimplifyConfig::initial_tolerance`] and halves the tolerance until the result
/// is simple, keeps at least [`SimplifyConfig::min_vertices`] vertices and its area deviates no more than
/// [`SimplifyConfig::max_area_deviation`] from the original.
/// Once the tolerance drops below [`SimplifyConfig::min_tolerance`], the input is returned unaltered
/// (apart from the removal of collinear vertices).
pub fn simplify_adaptive(poly: &SPolygon, config: &SimplifyConfig) -> SPolygon {
    let base = remove_collinear(poly).unwrap_or_else(|| poly.clone());
    let original_area = base.area;
    let geo_poly = to_geo_polygon(&base);

    let mut tolerance = config.initial_tolerance;
    while tolerance >= config.min_tolerance {
        let simplified = geo_poly.simplify_vw_preserve(&(tolerance * tolerance));
        let area_dev = (simplified.unsigned_area() - original_area).abs() / original_area;
        let vertices = simplified
            .exterior()
            .0
            .iter()
            .map(|c| Point(c.x, c.y))
            .collect::<Vec<_>>();

        //SPolygon::new drops the closing vertex
        if let Ok(candidate) = SPolygon::new(vertices) {
            if candidate.n_vertices() >= config.min_vertices
                && area_dev <= config.max_area_deviation
                && candidate.is_simple()
            {
                debug!(
                    "[SIMPL] {} -> {} vertices (tolerance: {tolerance}, area deviation: {:.3}%)",
                    poly.n_vertices(),
                    candidate.n_vertices(),
                    area_dev * 100.0
                );
                return candidate;
            }
        }
        tolerance /= 2.0;
    }
    debug!(
        "[SIMPL] no acceptable simplification found for polygon with {} vertices",
        poly.n_vertices()
    );
    base
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn collinear_vertices_are_removed() {
        let poly = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(1.0, 0.0),
            Point(2.0, 0.0),
            Point(2.0, 2.0),
            Point(0.0, 2.0),
            Point(0.0, 1.0),
        ])
        .unwrap();
        let cleaned = remove_collinear(&poly).unwrap();
        assert_eq!(cleaned.n_vertices(), 4);
        assert_eq!(cleaned.area, 4.0);
    }

    #[test]
    fn dense_circle_is_reduced() {
        let vertices = (0..720)
            .map(|i| {
                let a = 2.0 * PI * i as f64 / 720.0;
                Point(50.0 * a.cos(), 50.0 * a.sin())
            })
            .collect();
        let circle = SPolygon::new(vertices).unwrap();
        let config = SimplifyConfig::default();
        let simplified = simplify_adaptive(&circle, &config);

        assert!(simplified.n_vertices() < circle.n_vertices());
        assert!(simplified.n_vertices() >= config.min_vertices);
        assert!((simplified.area - circle.area).abs() / circle.area <= config.max_area_deviation);
    }

    #[test]
    fn small_polygons_are_kept() {
        let triangle = SPolygon::new(vec![Point(0.0, 0.0), Point(4.0, 0.0), Point(0.0, 3.0)]).unwrap();
        let simplified = simplify_adaptive(&triangle, &SimplifyConfig::default());
        assert_eq!(simplified, triangle);
    }

    #[test]
    fn thin_concave_polygon_stays_simple() {
        //dropping the lower tip of the notch would fold the boundary over itself
        let poly = SPolygon::new(vec![
            Point(0.0, 1.0),
            Point(0.0, 0.0),
            Point(5.0, -0.45),
            Point(10.0, 0.0),
            Point(10.0, 1.0),
            Point(5.0, -0.3),
        ])
        .unwrap();
        assert!(poly.is_simple());
        let config = SimplifyConfig {
            initial_tolerance: 0.6,
            min_tolerance: 0.01,
            min_vertices: 3,
            max_area_deviation: 1.0,
        };
        let simplified = simplify_adaptive(&poly, &config);

        assert!(simplified.is_simple());
        assert!(simplified.n_vertices() >= 3);
    }
}
