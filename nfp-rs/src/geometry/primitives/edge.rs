use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;
use crate::util::BIAS;

/// Geometric primitive representing a line segment
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Whether `point` lies on the segment, within a distance of [`BIAS`].
    /// The end points themselves are included.
    pub fn almost_contains(&self, point: &Point) -> bool {
        let length = self.length();
        if length < BIAS {
            return self.start.almost_eq(point);
        }
        let Point(dx, dy) = self.vector();
        let Point(px, py) = *point - self.start;

        //perpendicular distance to the supporting line
        let offset = (dx * py - dy * px).abs() / length;
        if offset > BIAS {
            return false;
        }
        //signed distance along the segment, measured from start
        let along = (dx * px + dy * py) / length;
        along >= -BIAS && along <= length + BIAS
    }

    /// Cross product of the direction vectors of `self` and `other`.
    /// Vectors that are parallel within tolerance yield exactly zero.
    pub fn cross(&self, other: &Edge) -> f64 {
        cross_product(self.vector(), other.vector())
    }
}

impl CollidesWith<Edge> for Edge {
    /// Segment intersection test, touching end points included
    fn collides_with(&self, other: &Edge) -> bool {
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }
        //collinear or touching configurations
        (o1 == 0.0 && within_bounds(self, other.start))
            || (o2 == 0.0 && within_bounds(self, other.end))
            || (o3 == 0.0 && within_bounds(other, self.start))
            || (o4 == 0.0 && within_bounds(other, self.end))
    }
}

/// Sign of the turn a -> b -> c: positive for counterclockwise, zero for collinear
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    match (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0) {
        cross if cross > 0.0 => 1.0,
        cross if cross < 0.0 => -1.0,
        _ => 0.0,
    }
}

/// `p` lies within the bounding box of `edge`, assuming it is collinear with it
fn within_bounds(edge: &Edge, p: Point) -> bool {
    p.0 >= f64::min(edge.start.0, edge.end.0)
        && p.0 <= f64::max(edge.start.0, edge.end.0)
        && p.1 >= f64::min(edge.start.1, edge.end.1)
        && p.1 <= f64::max(edge.start.1, edge.end.1)
}

/// 2D cross product, clamped to zero for (almost) parallel vectors
pub fn cross_product(v1: Point, v2: Point) -> f64 {
    let res = v1.0 * v2.1 - v1.1 * v2.0;
    if res.abs() < BIAS {
        return 0.0;
    }
    //large cross products of long vectors can still be essentially parallel
    if v1.0.abs() > BIAS && v2.0.abs() > BIAS && (v1.1 / v1.0 - v2.1 / v2.0).abs() < BIAS {
        return 0.0;
    }
    res
}
