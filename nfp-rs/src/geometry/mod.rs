pub mod geo_traits;
pub mod primitives;

/// Bridge to the polygon boolean-operation kernel
mod region;
mod simplification;
mod transformation;

#[doc(inline)]
pub use region::Region;
#[doc(inline)]
pub use region::{NestedRegion, intersection_area, to_geo_polygon};
#[doc(inline)]
pub use simplification::{remove_collinear, simplify_adaptive};
#[doc(inline)]
pub use transformation::Transformation;
