use nfp_rs::entities::Container;
use nfp_rs::geometry::intersection_area;
use nfp_rs::geometry::primitives::SPolygon;

use crate::config::OverlapScope;

/// Outcome of the validation of a candidate placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Valid,
    OutOfBounds,
    /// Largest overlap area with any instance in scope
    Overlap(f64),
}

/// Checks candidate placements against the container bounds and the other instances
pub struct PlacementValidator<'a> {
    pub container: Container,
    pub polygons: &'a [SPolygon],
    pub placed: &'a [bool],
    pub scope: OverlapScope,
    pub tolerance: f64,
}

impl PlacementValidator<'_> {
    pub fn is_valid(&self, idx: usize, candidate: &SPolygon) -> bool {
        self.verdict(idx, candidate) == Verdict::Valid
    }

    /// Validates `candidate` as the new geometry of instance `idx`
    pub fn verdict(&self, idx: usize, candidate: &SPolygon) -> Verdict {
        let bounds = self.container.rect();
        if !bounds.contains_with_tolerance(&candidate.bbox, self.tolerance) {
            return Verdict::OutOfBounds;
        }

        let worst = self
            .polygons
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .filter(|(i, _)| match self.scope {
                OverlapScope::PlacedOnly => self.placed[*i],
                OverlapScope::AllInstances => true,
            })
            .map(|(_, other)| intersection_area(candidate, other))
            .fold(0.0, f64::max);

        match worst > self.tolerance {
            true => Verdict::Overlap(worst),
            false => Verdict::Valid,
        }
    }
}
