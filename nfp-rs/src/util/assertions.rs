use itertools::Itertools;
use log::error;

use crate::entities::{Container, NestSolution};
use crate::geometry::intersection_area;
use crate::geometry::primitives::SPolygon;
//Various checks to verify correctness of a nesting solution
//Used in debug_assert!() blocks and tests

/// Every polygon's bounding box lies within the container, up to `tolerance`
pub fn all_within_container(polygons: &[SPolygon], container: &Container, tolerance: f64) -> bool {
    let bounds = container.rect();
    polygons.iter().enumerate().all(|(i, p)| {
        let inside = bounds.contains_with_tolerance(&p.bbox, tolerance);
        if !inside {
            error!("polygon {i} exceeds the container: {:?}", p.bbox);
        }
        inside
    })
}

/// No pair of polygons overlaps by more than `tolerance` in area
pub fn no_overlap(polygons: &[SPolygon], tolerance: f64) -> bool {
    polygons
        .iter()
        .enumerate()
        .tuple_combinations()
        .all(|((i, p1), (j, p2))| {
            let overlap = intersection_area(p1, p2);
            if overlap > tolerance {
                error!("polygons {i} and {j} overlap with area {overlap}");
            }
            overlap <= tolerance
        })
}

pub fn solution_is_feasible(solution: &NestSolution, tolerance: f64) -> bool {
    all_within_container(&solution.polygons, &solution.container, tolerance)
        && no_overlap(&solution.polygons, tolerance)
}
