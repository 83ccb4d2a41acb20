use crate::geometry::primitives::{Rect, SPolygon};
use crate::util::BIAS;

/// Inner-fit rectangle: the set of positions of `shape`'s reference vertex for which `shape`
/// lies within the container `[0, width] × [0, height]`.
///
/// The rectangle collapses to a segment or a point when the shape spans the container exactly.
/// Returns `None` if the shape does not fit in the container.
pub fn inner_fit_rect(shape: &SPolygon, width: f64, height: f64) -> Option<Rect> {
    let r = shape.reference_point();
    let bbox = shape.bbox;

    let (x_min, x_max) = fit_interval(r.0 - bbox.x_min, width - (bbox.x_max - r.0))?;
    let (y_min, y_max) = fit_interval(r.1 - bbox.y_min, height - (bbox.y_max - r.1))?;

    Rect::try_new(x_min, y_min, x_max, y_max).ok()
}

fn fit_interval(min: f64, max: f64) -> Option<(f64, f64)> {
    match max - min {
        d if d >= 0.0 => Some((min, max)),
        //negative by rounding only, collapse to a single position
        d if d > -BIAS => Some((min, min)),
        _ => None,
    }
}
