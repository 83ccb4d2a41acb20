use geo::{Area, BooleanOps, BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Polygon, Translate};

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Point, Rect, SPolygon};

/// Nested array representation of a region: polygons, each a list of rings
/// (exterior first, holes after), each ring a list of `[x, y]` points without closing point.
pub type NestedRegion = Vec<Vec<Vec<[f64; 2]>>>;

/// Possibly disconnected, possibly holed planar area.
/// Thin wrapper around a [`geo::MultiPolygon`], all boolean algebra is delegated to `geo`.
#[derive(Clone, Debug, PartialEq)]
pub struct Region(pub MultiPolygon<f64>);

impl Region {
    pub fn empty() -> Self {
        Region(MultiPolygon::new(vec![]))
    }

    pub fn from_polygon(poly: &SPolygon) -> Self {
        Region(MultiPolygon::new(vec![to_geo_polygon(poly)]))
    }

    pub fn from_rect(rect: &Rect) -> Self {
        let geo_rect = geo::Rect::new(
            Coord {
                x: rect.x_min,
                y: rect.y_min,
            },
            Coord {
                x: rect.x_max,
                y: rect.y_max,
            },
        );
        Region(MultiPolygon::new(vec![geo_rect.to_polygon()]))
    }

    pub fn is_empty(&self) -> bool {
        self.0.0.iter().all(|p| p.unsigned_area() == 0.0)
    }

    pub fn area(&self) -> f64 {
        self.0.unsigned_area()
    }

    pub fn bbox(&self) -> Option<Rect> {
        self.0.bounding_rect().map(|r| Rect {
            x_min: r.min().x,
            y_min: r.min().y,
            x_max: r.max().x,
            y_max: r.max().y,
        })
    }

    pub fn difference(&self, other: &Region) -> Region {
        Region(self.0.difference(&other.0))
    }

    pub fn union(&self, other: &Region) -> Region {
        Region(self.0.union(&other.0))
    }

    pub fn intersection(&self, other: &Region) -> Region {
        Region(self.0.intersection(&other.0))
    }

    pub fn translated(&self, Point(dx, dy): Point) -> Region {
        Region(self.0.translate(dx, dy))
    }

    /// Point reflection through the origin
    pub fn reflected(&self) -> Region {
        Region(self.0.map_coords(|Coord { x, y }| Coord { x: -x, y: -y }))
    }

    /// All vertices of the region: exterior and interior rings, closing points excluded
    pub fn vertices(&self) -> Vec<Point> {
        self.0
            .0
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .flat_map(|ring| open_ring(ring).map(|c| Point(c.x, c.y)))
            .collect()
    }

    pub fn to_nested(&self) -> NestedRegion {
        self.0
            .0
            .iter()
            .map(|p| {
                std::iter::once(p.exterior())
                    .chain(p.interiors())
                    .map(|ring| open_ring(ring).map(|c| [c.x, c.y]).collect())
                    .collect()
            })
            .collect()
    }

    pub fn from_nested(nested: &NestedRegion) -> Region {
        let polygons = nested
            .iter()
            .filter(|rings| !rings.is_empty())
            .map(|rings| {
                let mut rings = rings.iter().map(|ring| {
                    LineString::from(ring.iter().map(|&[x, y]| Coord { x, y }).collect::<Vec<_>>())
                });
                //filter above guarantees an exterior ring
                let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
                Polygon::new(exterior, rings.collect())
            })
            .collect();
        Region(MultiPolygon::new(polygons))
    }
}

/// Area of the intersection of two simple polygons
pub fn intersection_area(a: &SPolygon, b: &SPolygon) -> f64 {
    if !a.bbox.collides_with(&b.bbox) {
        return 0.0;
    }
    to_geo_polygon(a)
        .intersection(&to_geo_polygon(b))
        .unsigned_area()
}

pub fn to_geo_polygon(poly: &SPolygon) -> Polygon<f64> {
    let exterior = poly
        .vertices
        .iter()
        .map(|p| Coord { x: p.0, y: p.1 })
        .collect::<Vec<_>>();
    Polygon::new(LineString::from(exterior), vec![])
}

fn open_ring(ring: &LineString<f64>) -> impl Iterator<Item = &Coord<f64>> {
    let n = match ring.is_closed() && ring.0.len() > 1 {
        true => ring.0.len() - 1,
        false => ring.0.len(),
    };
    ring.0.iter().take(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> SPolygon {
        SPolygon::new(vec![
            Point(x, y),
            Point(x + side, y),
            Point(x + side, y + side),
            Point(x, y + side),
        ])
        .unwrap()
    }

    #[test]
    fn vertices_exclude_closing_point() {
        let r = Region::from_polygon(&square(0.0, 0.0, 1.0));
        assert_eq!(r.vertices().len(), 4);
    }

    #[test]
    fn difference_leaves_a_hole() {
        let outer = Region::from_polygon(&square(0.0, 0.0, 4.0));
        let inner = Region::from_polygon(&square(1.0, 1.0, 2.0));
        let diff = outer.difference(&inner);
        assert!((diff.area() - 12.0).abs() < 1e-9);
        assert_eq!(diff.vertices().len(), 8);
    }

    #[test]
    fn touching_squares_do_not_overlap() {
        assert!(intersection_area(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)) < 1e-10);
        assert!((intersection_area(&square(0.0, 0.0, 1.0), &square(0.5, 0.0, 1.0)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn nested_representation_survives_conversion() {
        let outer = Region::from_polygon(&square(0.0, 0.0, 4.0));
        let holed = outer.difference(&Region::from_polygon(&square(1.0, 1.0, 2.0)));
        let restored = Region::from_nested(&holed.to_nested());
        assert!((restored.area() - holed.area()).abs() < 1e-9);
        assert_eq!(restored.vertices().len(), holed.vertices().len());
    }
}
