use std::time::Instant;

use itertools::Itertools;

use crate::entities::{NestInstance, NestSolution};
use crate::geometry::primitives::SPolygon;
use crate::io::ext_repr::{ExtPlacedItem, ExtSPolygon, ExtSolution};

/// Exports a [`NestSolution`] by composing an [`ExtSolution`] from it.
pub fn export_solution(
    solution: &NestSolution,
    instance: &NestInstance,
    epoch: Instant,
) -> ExtSolution {
    let placed_items = solution
        .polygons
        .iter()
        .zip(solution.rotations.iter())
        .zip(instance.item_ids.iter())
        .map(|((poly, &rotation), &item_id)| ExtPlacedItem {
            item_id,
            rotation,
            shape: export_simple_polygon(poly),
        })
        .collect_vec();

    ExtSolution {
        placed_items,
        occupied_length: solution.occupied_length,
        density: solution.density(),
        usage: solution.usage(),
        scale_factor: solution.scale.map(|s| s.factor),
        run_time_sec: solution.time_stamp.duration_since(epoch).as_secs(),
    }
}

pub fn export_simple_polygon(poly: &SPolygon) -> ExtSPolygon {
    ExtSPolygon(poly.vertices.iter().map(|&p| p.into()).collect())
}
