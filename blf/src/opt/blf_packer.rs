use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use thousands::Separable;

use nfp_rs::NestError;
use nfp_rs::entities::{Container, NestSolution, ScaleRequired};
use nfp_rs::geometry::Region;
use nfp_rs::geometry::geo_traits::AlmostCollidesWith;
use nfp_rs::geometry::primitives::{Point, Rect, SPolygon};
use nfp_rs::nfp::{NfpAssistant, NfpGenerator, inner_fit_rect};
use nfp_rs::util::{BIAS, assertions};

use crate::config::BLFConfig;
use crate::opt::order::placement_order;
use crate::opt::preprocess::fit_to_container;
use crate::opt::validator::{PlacementValidator, Verdict};

/// Directions in which near-miss candidates are shifted, away from the bottom-left neighbours first
const NUDGE_DIRECTIONS: [(f64, f64); 5] = [(1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// Sequential Bottom-Left-Fill packer for a fixed rectangular container.
///
/// Instances are placed one by one in a fixed order, none is ever moved once placed.
/// The first instance is positioned by a grid search, every next one at the left-most vertex of the
/// region its inner-fit rectangle leaves free after subtracting the NFPs of all placed instances.
pub struct BottomLeftFillPacker {
    pub container: Container,
    /// Geometry of every instance, in input order
    polygons: Vec<SPolygon>,
    /// Applied rotation in degrees, in input order
    rotations: Vec<f64>,
    placed: Vec<bool>,
    order: Vec<usize>,
    scale: Option<ScaleRequired>,
    pub config: BLFConfig,
}

impl BottomLeftFillPacker {
    /// Prepares a run: rescales the polygons if needed and fixes the placement order.
    /// Fails on an invalid configuration.
    pub fn new(
        container: Container,
        mut polygons: Vec<SPolygon>,
        config: BLFConfig,
    ) -> Result<Self, NestError> {
        config.validate()?;
        let scale = match config.auto_scale {
            true => fit_to_container(&mut polygons, &container, config.scale_margin),
            false => None,
        };
        let order = match config.sort_instances {
            true => placement_order(&polygons, &config.order_weights),
            false => (0..polygons.len()).collect(),
        };
        debug!("[BLF] placement order: {order:?}");

        let n = polygons.len();
        Ok(Self {
            container,
            polygons,
            rotations: vec![0.0; n],
            placed: vec![false; n],
            order,
            scale,
            config,
        })
    }

    /// Polygons as they will be placed, after any rescaling
    pub fn polygons(&self) -> &[SPolygon] {
        &self.polygons
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn scale(&self) -> Option<ScaleRequired> {
        self.scale
    }

    /// Places every instance, aborting on the first one that admits no placement.
    pub fn solve<G: NfpGenerator>(
        &mut self,
        assistant: &mut NfpAssistant<G>,
    ) -> Result<NestSolution, NestError> {
        let start = Instant::now();
        let calls_before = assistant.n_generator_calls();
        let n = self.polygons.len();

        for (k, idx) in self.order.clone().into_iter().enumerate() {
            self.place_instance(idx, k == 0, assistant)?;
            let bbox = self.polygons[idx].bbox;
            info!(
                "[BLF] placed instance {}/{n} (#{idx}, rotation: {}°) at [{:.3}, {:.3}]",
                k + 1,
                self.rotations[idx],
                bbox.x_min,
                bbox.y_min,
            );
        }

        let occupied_length = self
            .polygons
            .iter()
            .map(|p| p.vertex(p.right_index()).0)
            .fold(0.0, f64::max);

        let solution = NestSolution {
            polygons: self.polygons.clone(),
            rotations: self.rotations.clone(),
            occupied_length,
            scale: self.scale,
            container: self.container,
            time_stamp: Instant::now(),
        };
        debug_assert!(assertions::solution_is_feasible(
            &solution,
            self.config.overlap_tolerance
        ));

        info!(
            "[BLF] nesting finished in {:.3}ms ({} NFP generator calls)",
            start.elapsed().as_secs_f64() * 1000.0,
            (assistant.n_generator_calls() - calls_before).separate_with_commas()
        );
        info!(
            "[BLF] occupied length: {:.3}, density: {:.3}%, usage: {:.3}%",
            solution.occupied_length,
            solution.density() * 100.0,
            solution.usage() * 100.0
        );
        Ok(solution)
    }

    /// Places instance `idx`, trying every orientation in turn.
    /// On failure the instance keeps its original orientation.
    fn place_instance<G: NfpGenerator>(
        &mut self,
        idx: usize,
        first: bool,
        assistant: &mut NfpAssistant<G>,
    ) -> Result<(), NestError> {
        let n_rotations = self.config.n_rotations;
        for r in 0..n_rotations {
            let angle = 360.0 / n_rotations as f64 * r as f64;
            let mut shape = self.polygons[idx].clone();
            if r > 0 {
                shape.rotate_around_centroid(angle);
            }

            let placement = match first {
                true => self.grid_search(idx, &shape),
                false => self.nfp_search(idx, &shape, assistant),
            };

            match placement {
                Some(placed) => {
                    if r > 0 {
                        debug!("[BLF] instance {idx} placed after rotating {angle}°");
                    }
                    self.polygons[idx] = placed;
                    self.rotations[idx] = angle;
                    self.placed[idx] = true;
                    return Ok(());
                }
                None => debug!("[BLF] no placement for instance {idx} at {angle}°"),
            }
        }
        warn!("[BLF] instance {idx} does not fit in any of {n_rotations} orientations");
        Err(NestError::PlacementInfeasible {
            instance: idx,
            orientations: n_rotations,
        })
    }

    /// Row-major search over a grid: lowest y first, then lowest x.
    /// The shape is positioned with the bottom-left corner of its bounding box on the grid point.
    fn grid_search(&self, idx: usize, shape: &SPolygon) -> Option<SPolygon> {
        let bbox = shape.bbox;
        let step = self.config.grid_step;
        let n_steps = |free: f64| match free {
            f if f >= 0.0 => Some((f / step + BIAS).floor() as usize),
            f if f > -BIAS => Some(0),
            _ => None,
        };
        let nx = n_steps(self.container.width - bbox.width())?;
        let ny = n_steps(self.container.height - bbox.height())?;

        let validator = self.validator();
        (0..=ny)
            .cartesian_product(0..=nx)
            .map(|(iy, ix)| {
                let (x, y) = (ix as f64 * step, iy as f64 * step);
                let mut candidate = shape.clone();
                candidate.translate((x - bbox.x_min, y - bbox.y_min));
                candidate
            })
            .find(|candidate| validator.is_valid(idx, candidate))
    }

    /// Bottom-left search over the vertices of the region left free by the placed instances
    fn nfp_search<G: NfpGenerator>(
        &self,
        idx: usize,
        shape: &SPolygon,
        assistant: &mut NfpAssistant<G>,
    ) -> Option<SPolygon> {
        let ifr = inner_fit_rect(shape, self.container.width, self.container.height)?;
        let padded_ifr = ifr.inflate(self.config.ifr_padding);
        let mut feasible = Region::from_rect(&padded_ifr);

        for m in self.order.iter().copied().filter(|&m| self.placed[m]) {
            let nfp = match assistant.resolve_nfp(&self.polygons[m], shape) {
                Ok(nfp) => nfp,
                Err(e) => {
                    warn!("[BLF] NFP of instance {m} against instance {idx} unavailable: {e}");
                    return None;
                }
            };
            if nfp.bbox().is_some_and(|b| b.almost_collides_with(&padded_ifr)) {
                feasible = feasible.difference(&nfp);
                if feasible.is_empty() {
                    debug!("[BLF] no free region left for instance {idx}");
                    return None;
                }
            }
        }

        let candidates = candidate_points(&feasible, &ifr);
        debug!(
            "[BLF] {} candidate positions for instance {idx}",
            candidates.len()
        );

        let validator = self.validator();
        candidates.into_iter().find_map(|c| {
            let mut candidate = shape.clone();
            candidate.slide_reference_to(c);
            match validator.verdict(idx, &candidate) {
                Verdict::Valid => Some(candidate),
                Verdict::Overlap(area) if area <= self.config.near_miss_area => {
                    self.nudge(idx, shape, c, &ifr, &validator)
                }
                _ => None,
            }
        })
    }

    /// Retries a near-miss candidate at slightly shifted positions within the inner-fit rectangle.
    /// The free region is only known up to the precision of the boolean operations,
    /// vertices that should touch a neighbour can end up a fraction inside of it.
    fn nudge(
        &self,
        idx: usize,
        shape: &SPolygon,
        c: Point,
        ifr: &Rect,
        validator: &PlacementValidator,
    ) -> Option<SPolygon> {
        let step = self.config.candidate_nudge;
        if step <= 0.0 {
            return None;
        }
        [step, 4.0 * step]
            .into_iter()
            .cartesian_product(NUDGE_DIRECTIONS)
            .map(|(s, (dx, dy))| ifr.clamp(c.translated(dx * s, dy * s)))
            .filter(|p| *p != c)
            .find_map(|p| {
                let mut candidate = shape.clone();
                candidate.slide_reference_to(p);
                validator.is_valid(idx, &candidate).then_some(candidate)
            })
    }

    fn validator(&self) -> PlacementValidator<'_> {
        PlacementValidator {
            container: self.container,
            polygons: &self.polygons,
            placed: &self.placed,
            scope: self.config.overlap_scope,
            tolerance: self.config.overlap_tolerance,
        }
    }
}

/// Vertices of the free region, pulled back into the inner-fit rectangle,
/// sorted by x and then y with near-duplicates removed
fn candidate_points(feasible: &Region, ifr: &Rect) -> Vec<Point> {
    feasible
        .vertices()
        .into_iter()
        .map(|p| ifr.clamp(p))
        .sorted_by_key(|p| (OrderedFloat(p.0), OrderedFloat(p.1)))
        .dedup_by(|a, b| a.almost_eq(b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_sorted_bottom_left_and_deduplicated() {
        let ifr = Rect::try_new(0.0, 0.0, 4.0, 4.0).unwrap();
        let a = Region::from_rect(&Rect::try_new(2.0, 1.0, 3.0, 3.0).unwrap());
        let b = Region::from_rect(&Rect::try_new(3.0, 0.0, 5.0, 1.0).unwrap());
        let candidates = candidate_points(&a.union(&b), &ifr);

        assert!(candidates[0].almost_eq(&Point(2.0, 1.0)));
        assert!(
            candidates
                .iter()
                .tuple_windows()
                .all(|(p, q)| (p.0, p.1) <= (q.0, q.1) && !p.almost_eq(q))
        );
        //(5, 0) and (5, 1) are pulled back onto the right edge of the inner-fit rectangle
        assert!(candidates.iter().all(|p| p.0 <= 4.0));
        assert!(candidates.iter().any(|p| p.almost_eq(&Point(4.0, 0.0))));
    }

    #[test]
    fn first_instance_is_placed_on_the_grid() {
        let polygons = vec![
            SPolygon::new(vec![Point(5.0, 5.0), Point(7.0, 5.0), Point(6.0, 7.0)]).unwrap(),
        ];
        let container = Container {
            width: 4.0,
            height: 4.0,
        };
        let packer = BottomLeftFillPacker::new(container, polygons, BLFConfig::default()).unwrap();
        let shape = packer.polygons()[0].clone();
        let placed = packer.grid_search(0, &shape).unwrap();

        assert_eq!(placed.bbox.x_min, 0.0);
        assert_eq!(placed.bbox.y_min, 0.0);
    }

    fn unit_square() -> SPolygon {
        SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(1.0, 0.0),
            Point(1.0, 1.0),
            Point(0.0, 1.0),
        ])
        .unwrap()
    }

    /// Packer for a 2x1 container with the left unit square already placed at the origin
    fn packer_with_left_square_placed(config: BLFConfig) -> BottomLeftFillPacker {
        let container = Container {
            width: 2.0,
            height: 1.0,
        };
        let mut packer =
            BottomLeftFillPacker::new(container, vec![unit_square(), unit_square()], config)
                .unwrap();
        packer.placed[0] = true;
        packer
    }

    #[test]
    fn near_miss_candidate_is_shifted_and_accepted() {
        let packer = packer_with_left_square_placed(BLFConfig::default());
        let shape = packer.polygons()[1].clone();
        let ifr = inner_fit_rect(&shape, 2.0, 1.0).unwrap();
        let validator = packer.validator();

        //reference vertex a hair left of (2,1), the square pokes into its neighbour
        let c = Point(2.0 - 2f64.powi(-22), 1.0);
        let mut near_miss = shape.clone();
        near_miss.slide_reference_to(c);
        assert!(matches!(
            validator.verdict(1, &near_miss),
            Verdict::Overlap(a) if a <= packer.config.near_miss_area
        ));

        let shifted = packer.nudge(1, &shape, c, &ifr, &validator).unwrap();
        assert!(validator.is_valid(1, &shifted));
        assert_eq!(shifted.reference_point(), Point(2.0, 1.0));
        assert_eq!(shifted.bbox.x_min, 1.0);
    }

    #[test]
    fn zero_nudge_disables_the_retry() {
        let config = BLFConfig {
            candidate_nudge: 0.0,
            ..BLFConfig::default()
        };
        let packer = packer_with_left_square_placed(config);
        let shape = packer.polygons()[1].clone();
        let ifr = inner_fit_rect(&shape, 2.0, 1.0).unwrap();
        let validator = packer.validator();

        let c = Point(2.0 - 2f64.powi(-22), 1.0);
        assert!(packer.nudge(1, &shape, c, &ifr, &validator).is_none());
    }
}
