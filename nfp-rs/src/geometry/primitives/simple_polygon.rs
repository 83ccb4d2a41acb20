use anyhow::{Result, bail, ensure};
use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::{Edge, Point, Rect};

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
///
/// The vertex order is kept exactly as given. The reference vertex and the shape signature
/// are both defined in terms of vertex indices, so the polygon is never re-oriented.
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    /// Vertices of the polygon, without closing vertex
    pub vertices: Vec<Point>,
    /// Absolute area
    pub area: f64,
    /// Bounding box
    pub bbox: Rect,
}

impl SPolygon {
    /// Create a new simple polygon from a set of points.
    /// A trailing point equal to the first one is dropped.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        ensure!(
            vertices.len() >= 3,
            "simple polygon must have at least 3 vertices, got {}",
            vertices.len()
        );
        if let Some(p) = vertices.iter().find(|p| !p.0.is_finite() || !p.1.is_finite()) {
            bail!("simple polygon contains a non-finite vertex: {p:?}");
        }

        let area = SPolygon::calculate_area(&vertices).abs();
        ensure!(area > 0.0, "simple polygon has no area: {vertices:?}");

        let bbox = SPolygon::generate_bounding_box(&vertices);

        Ok(SPolygon {
            vertices,
            area,
            bbox,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Vector from the first to the second vertex
    pub fn first_edge(&self) -> Point {
        self.vertices[1] - self.vertices[0]
    }

    pub fn generate_bounding_box(vertices: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in vertices.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(vertices: &[Point]) -> f64 {
        let mut sigma = 0.0;
        for i in 0..vertices.len() {
            let j = (i + 1) % vertices.len();

            let (x_i, y_i) = vertices[i].into();
            let (x_j, y_j) = vertices[j].into();

            sigma += x_i * y_j - x_j * y_i;
        }

        0.5 * sigma
    }

    /// Index of the first vertex attaining the minimal x
    pub fn left_index(&self) -> usize {
        self.first_index_where(|p| p.0 == self.bbox.x_min)
    }

    /// Index of the first vertex attaining the minimal y
    pub fn bottom_index(&self) -> usize {
        self.first_index_where(|p| p.1 == self.bbox.y_min)
    }

    /// Index of the first vertex attaining the maximal x
    pub fn right_index(&self) -> usize {
        self.first_index_where(|p| p.0 == self.bbox.x_max)
    }

    /// Index of the first vertex attaining the maximal y
    pub fn top_index(&self) -> usize {
        self.first_index_where(|p| p.1 == self.bbox.y_max)
    }

    fn first_index_where(&self, pred: impl Fn(&Point) -> bool) -> usize {
        //the bbox is derived from the vertices, so a match always exists
        self.vertices.iter().position(pred).unwrap_or(0)
    }

    /// The vertex whose position defines where the polygon is placed: its top vertex
    pub fn reference_point(&self) -> Point {
        self.vertex(self.top_index())
    }

    pub fn translate(&mut self, (dx, dy): (f64, f64)) -> &mut Self {
        self.transform(&Transformation::from_translation((dx, dy)))
    }

    /// Translates the polygon so that the vertex at `index` coincides with `target`
    pub fn slide_to_point(&mut self, index: usize, target: Point) -> &mut Self {
        let Point(dx, dy) = target - self.vertex(index);
        self.translate((dx, dy))
    }

    /// Translates the polygon so that its reference vertex coincides with `target`
    pub fn slide_reference_to(&mut self, target: Point) -> &mut Self {
        self.slide_to_point(self.top_index(), target)
    }

    /// Rotates the polygon counterclockwise around its centroid, `degrees` in degrees
    pub fn rotate_around_centroid(&mut self, degrees: f64) -> &mut Self {
        let pivot = self.centroid();
        let t = Transformation::from_rotation_around(degrees.to_radians(), pivot.into());
        self.transform(&t)
    }

    /// Uniformly scales the polygon with respect to the origin
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.transform(&Transformation::from_scaling(factor))
    }

    /// Whether all turns along the boundary share the same orientation
    pub fn is_convex(&self) -> bool {
        let turns = self
            .edge_iter()
            .collect_vec()
            .into_iter()
            .circular_tuple_windows()
            .map(|(e1, e2)| e1.cross(&e2))
            .filter(|c| *c != 0.0)
            .collect_vec();

        turns.iter().all(|c| *c > 0.0) || turns.iter().all(|c| *c < 0.0)
    }

    /// Whether no two non-adjacent edges touch or cross
    pub fn is_simple(&self) -> bool {
        let n = self.n_vertices();
        (0..n)
            .tuple_combinations()
            .filter(|&(i, j)| j != i + 1 && !(i == 0 && j == n - 1))
            .all(|(i, j)| !self.edge(i).collides_with(&self.edge(j)))
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        self.vertices.iter_mut().for_each(|v| {
            v.transform(t);
        });
        self.area = SPolygon::calculate_area(&self.vertices).abs();
        self.bbox = SPolygon::generate_bounding_box(&self.vertices);
        self
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let signed_area = SPolygon::calculate_area(&self.vertices);
        let n = self.n_vertices();

        let mut c_x = 0.0;
        let mut c_y = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            let cross = x_i * y_j - x_j * y_i;
            c_x += (x_i + x_j) * cross;
            c_y += (y_i + y_j) * cross;
        }

        Point(c_x / (6.0 * signed_area), c_y / (6.0 * signed_area))
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}
