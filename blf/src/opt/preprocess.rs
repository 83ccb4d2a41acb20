use log::{info, warn};

use nfp_rs::entities::{Container, ScaleRequired};
use nfp_rs::geometry::primitives::SPolygon;

/// Uniformly scales all polygons down if any of them exceeds the container in either dimension.
///
/// The factor is the smallest shrink needed over all polygons, reduced by `margin`.
/// Returns `None` if every polygon already fits.
pub fn fit_to_container(
    polygons: &mut [SPolygon],
    container: &Container,
    margin: f64,
) -> Option<ScaleRequired> {
    let oversized = polygons
        .iter()
        .filter(|p| p.bbox.width() > container.width || p.bbox.height() > container.height)
        .count();
    if oversized == 0 {
        return None;
    }

    let factor = polygons
        .iter()
        .map(|p| f64::min(container.width / p.bbox.width(), container.height / p.bbox.height()))
        .fold(f64::INFINITY, f64::min)
        * (1.0 - margin);

    warn!(
        "[BLF] {oversized} polygon(s) exceed the {}x{} container, scaling all polygons by {factor:.5}",
        container.width, container.height
    );
    polygons.iter_mut().for_each(|p| {
        p.scale(factor);
    });
    info!("[BLF] polygons rescaled, irreversible for this run");

    Some(ScaleRequired { factor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfp_rs::geometry::primitives::Point;

    fn rectangle(w: f64, h: f64) -> SPolygon {
        SPolygon::new(vec![Point(0.0, 0.0), Point(w, 0.0), Point(w, h), Point(0.0, h)]).unwrap()
    }

    #[test]
    fn fitting_polygons_are_untouched() {
        let mut polygons = vec![rectangle(2.0, 1.0), rectangle(1.0, 1.0)];
        let container = Container {
            width: 2.0,
            height: 1.0,
        };
        assert_eq!(fit_to_container(&mut polygons, &container, 0.05), None);
        assert_eq!(polygons[0], rectangle(2.0, 1.0));
    }

    #[test]
    fn oversized_polygon_triggers_uniform_scaling() {
        let mut polygons = vec![rectangle(20.0, 2.0), rectangle(1.0, 1.0)];
        let container = Container {
            width: 10.0,
            height: 10.0,
        };
        let scale = fit_to_container(&mut polygons, &container, 0.05).unwrap();
        assert!((scale.factor - 0.475).abs() < 1e-12);
        assert!(polygons[0].bbox.width() <= container.width);
        assert!((polygons[1].bbox.width() - 0.475).abs() < 1e-12);
    }
}
