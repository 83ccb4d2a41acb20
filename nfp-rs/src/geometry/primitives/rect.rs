use anyhow::Result;
use anyhow::ensure;

use crate::geometry::geo_traits::{AlmostCollidesWith, CollidesWith};
use crate::geometry::primitives::Point;
use crate::util::FPA;

///Axis-aligned rectangle. Degenerate rectangles (zero width or height) are allowed,
///they arise as inner-fit rectangles of shapes that exactly span the container.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        ensure!(
            x_min <= x_max && y_min <= y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns a new rectangle expanded by `pad` on every side.
    pub fn inflate(&self, pad: f64) -> Rect {
        Rect {
            x_min: self.x_min - pad,
            y_min: self.y_min - pad,
            x_max: self.x_max + pad,
            y_max: self.y_max + pad,
        }
    }

    /// Whether `other` lies within `self`, allowing it to stick out by at most `tolerance`
    pub fn contains_with_tolerance(&self, other: &Rect, tolerance: f64) -> bool {
        other.x_min >= self.x_min - tolerance
            && other.y_min >= self.y_min - tolerance
            && other.x_max <= self.x_max + tolerance
            && other.y_max <= self.y_max + tolerance
    }

    /// Returns the point of `self` closest to `p`
    pub fn clamp(&self, p: Point) -> Point {
        Point(
            p.0.clamp(self.x_min, self.x_max),
            p.1.clamp(self.y_min, self.y_max),
        )
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}

impl AlmostCollidesWith<Rect> for Rect {
    #[inline(always)]
    fn almost_collides_with(&self, other: &Rect) -> bool {
        FPA(f64::max(self.x_min, other.x_min)) <= FPA(f64::min(self.x_max, other.x_max))
            && FPA(f64::max(self.y_min, other.y_min)) <= FPA(f64::min(self.y_max, other.y_max))
    }
}
