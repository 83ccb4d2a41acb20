use std::time::Instant;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Rect, SPolygon};

/// A nesting problem: a fixed rectangular container and the polygons to place in it
#[derive(Debug, Clone)]
pub struct NestInstance {
    pub name: String,
    pub container: Container,
    /// Every polygon to place, demand already expanded
    pub polygons: Vec<SPolygon>,
    /// Id of the external item each polygon was created from
    pub item_ids: Vec<u64>,
}

impl NestInstance {
    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(|p| p.area()).sum()
    }
}

/// Axis-aligned container `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

impl Container {
    pub fn rect(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.width,
            y_max: self.height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Notice that all polygons were uniformly scaled down to fit the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequired {
    pub factor: f64,
}

/// Outcome of a successful nesting run
#[derive(Debug, Clone)]
pub struct NestSolution {
    /// Final polygons, in the order of the input
    pub polygons: Vec<SPolygon>,
    /// Counterclockwise rotation in degrees applied to each polygon, in the order of the input
    pub rotations: Vec<f64>,
    /// Largest x coordinate reached by any polygon
    pub occupied_length: f64,
    pub scale: Option<ScaleRequired>,
    pub container: Container,
    /// Instant the solution was created
    pub time_stamp: Instant,
}

impl NestSolution {
    pub fn placed_area(&self) -> f64 {
        self.polygons.iter().map(|p| p.area()).sum()
    }

    /// Placed area relative to the area of the container
    pub fn density(&self) -> f64 {
        self.placed_area() / self.container.area()
    }

    /// Placed area relative to the occupied part of the container
    pub fn usage(&self) -> f64 {
        match self.occupied_length > 0.0 {
            true => self.placed_area() / (self.occupied_length * self.container.height),
            false => 0.0,
        }
    }
}
