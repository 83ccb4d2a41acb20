mod edge;
mod point;
mod rect;
mod simple_polygon;

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use edge::cross_product;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use simple_polygon::SPolygon;
