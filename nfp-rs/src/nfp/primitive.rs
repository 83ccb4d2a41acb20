use geo::{Area, BooleanOps, ConvexHull, MultiPoint, MultiPolygon, Polygon, TriangulateEarcut};
use itertools::Itertools;

use crate::NestError;
use crate::geometry::{Region, to_geo_polygon};
use crate::geometry::primitives::{Point, SPolygon};

/// Pieces with an area below this threshold are ignored when building the NFP
const MIN_PIECE_AREA: f64 = 1e-12;

/// Computes no-fit-polygons of pairs of simple polygons.
pub trait NfpGenerator {
    /// Returns the locus of positions of `orbiting`'s reference vertex
    /// ([`SPolygon::reference_point`]) for which `orbiting` overlaps `stationary`,
    /// with `stationary` kept where it is.
    fn compute(&self, stationary: &SPolygon, orbiting: &SPolygon) -> Result<Region, NestError>;
}

/// NFP generation through Minkowski sums: `NFP(A, B) = A ⊕ (r − B)`, with `r` the reference vertex of `B`.
///
/// Non-convex operands are decomposed into triangles. Every pair of convex pieces contributes
/// the convex hull of their vertex sums, the NFP is the union of all contributions.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinkowskiNfp;

impl NfpGenerator for MinkowskiNfp {
    fn compute(&self, stationary: &SPolygon, orbiting: &SPolygon) -> Result<Region, NestError> {
        let r = orbiting.reference_point();

        let pieces_a = convex_pieces(stationary);
        let pieces_b = convex_pieces(orbiting)
            .into_iter()
            .map(|piece| piece.into_iter().map(|b| r - b).collect_vec())
            .collect_vec();

        let sums = pieces_a
            .iter()
            .cartesian_product(pieces_b.iter())
            .filter_map(|(pa, pb)| minkowski_sum_convex(pa, pb))
            .collect_vec();

        if sums.is_empty() {
            return Err(NestError::nfp("no feasible sliding vector"));
        }

        let nfp = union_all(sums);
        match nfp.unsigned_area() > MIN_PIECE_AREA {
            true => Ok(Region(nfp)),
            false => Err(NestError::nfp("no feasible sliding vector")),
        }
    }
}

/// Splits a polygon into convex pieces: the polygon itself if it is convex, its triangulation otherwise
fn convex_pieces(poly: &SPolygon) -> Vec<Vec<Point>> {
    match poly.is_convex() {
        true => vec![poly.vertices.clone()],
        false => to_geo_polygon(poly)
            .earcut_triangles()
            .into_iter()
            .map(|t| t.to_array().map(|c| Point(c.x, c.y)).to_vec())
            .collect(),
    }
}

/// Minkowski sum of two convex point sets, `None` if it is degenerate
fn minkowski_sum_convex(a: &[Point], b: &[Point]) -> Option<Polygon<f64>> {
    let sums = a
        .iter()
        .cartesian_product(b.iter())
        .map(|(pa, pb)| {
            let Point(x, y) = *pa + *pb;
            geo::Point::new(x, y)
        })
        .collect_vec();

    let hull = MultiPoint::new(sums).convex_hull();
    match hull.unsigned_area() > MIN_PIECE_AREA {
        true => Some(hull),
        false => None,
    }
}

/// Unions all polygons, merging them pairwise to keep the operands balanced
fn union_all(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut layer = polygons
        .into_iter()
        .map(|p| MultiPolygon::new(vec![p]))
        .collect_vec();

    while layer.len() > 1 {
        let mut merged = Vec::with_capacity(layer.len() / 2 + 1);
        let mut iter = layer.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => merged.push(first.union(&second)),
                None => merged.push(first),
            }
        }
        layer = merged;
    }
    layer
        .pop()
        .unwrap_or_else(|| MultiPolygon::new(Vec::<Polygon<f64>>::new()))
}
