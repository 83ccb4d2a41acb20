use crate::geometry::Transformation;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;

/// Intersection test between `Self` and `T`, boundaries included.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Like [`CollidesWith`], but objects separated by less than [`BIAS`](crate::util::BIAS) also collide.
pub trait AlmostCollidesWith<T> {
    fn almost_collides_with(&self, other: &T) -> bool;
}

/// Geometry that can be moved by a [`Transformation`] in place.
pub trait Transformable {
    fn transform(&mut self, t: &Transformation) -> &mut Self;
}

pub trait Shape {
    /// Area-weighted center
    fn centroid(&self) -> Point;

    fn area(&self) -> f64;

    fn bbox(&self) -> Rect;
}
