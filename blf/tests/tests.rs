#[cfg(test)]
mod tests {
    use std::path::Path;

    use float_cmp::approx_eq;
    use test_case::test_case;

    use blf::config::{BLFConfig, OverlapScope};
    use blf::io;
    use blf::nest;
    use nfp_rs::NestError;
    use nfp_rs::entities::{Container, NestInstance};
    use nfp_rs::geometry::primitives::{Point, SPolygon};
    use nfp_rs::io::import::Importer;
    use nfp_rs::nfp::{MemoryNfpStore, NfpStore};
    use nfp_rs::util::assertions;

    const TOLERANCE: f64 = 1e-10;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn poly(points: &[(f64, f64)]) -> SPolygon {
        SPolygon::new(points.iter().map(|&p| Point::from(p)).collect()).unwrap()
    }

    fn rectangle(w: f64, h: f64) -> SPolygon {
        poly(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)])
    }

    fn instance(width: f64, height: f64, polygons: Vec<SPolygon>) -> NestInstance {
        let item_ids = (0..polygons.len() as u64).collect();
        NestInstance {
            name: "test".to_string(),
            container: Container { width, height },
            polygons,
            item_ids,
        }
    }

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            approx_eq!(f64, actual, expected, epsilon = 1e-5),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn two_squares_fill_the_strip() {
        init_logger();
        let instance = instance(2.0, 1.0, vec![rectangle(1.0, 1.0), rectangle(1.0, 1.0)]);
        let solution = nest(&instance, BLFConfig::default(), None).unwrap();

        assert_near(solution.polygons[0].bbox.x_min, 0.0);
        assert_near(solution.polygons[0].bbox.y_min, 0.0);
        assert_near(solution.polygons[1].bbox.x_min, 1.0);
        assert_near(solution.polygons[1].bbox.y_min, 0.0);
        assert_near(solution.occupied_length, 2.0);
        assert_eq!(solution.rotations, vec![0.0, 0.0]);
        assert!(solution.scale.is_none());
        assert!(assertions::solution_is_feasible(&solution, TOLERANCE));
    }

    #[test]
    fn instance_without_room_is_infeasible() {
        init_logger();
        let squares = vec![rectangle(1.0, 1.0); 3];
        let instance = instance(1.5, 1.0, squares);
        match nest(&instance, BLFConfig::default(), None) {
            Err(NestError::PlacementInfeasible {
                instance,
                orientations,
            }) => {
                assert_eq!(instance, 1);
                assert_eq!(orientations, 4);
            }
            other => panic!("expected an infeasible placement, got {other:?}"),
        }
    }

    #[test]
    fn blocked_orientation_falls_back_to_rotation() {
        init_logger();
        let instance = instance(3.0, 2.0, vec![rectangle(2.0, 1.0), rectangle(2.0, 2.0)]);
        let solution = nest(&instance, BLFConfig::default(), None).unwrap();

        //the square goes first, leaving a 1x2 slot for the bar
        assert_eq!(solution.rotations, vec![90.0, 0.0]);
        let bar = solution.polygons[0].bbox;
        assert_near(bar.x_min, 2.0);
        assert_near(bar.x_max, 3.0);
        assert_near(bar.y_min, 0.0);
        assert_near(bar.y_max, 2.0);
        assert_near(solution.occupied_length, 3.0);
        assert!(assertions::solution_is_feasible(&solution, TOLERANCE));
    }

    #[test]
    fn single_wide_rectangle_only_fits_rotated() {
        init_logger();
        let config = BLFConfig {
            auto_scale: false,
            ..BLFConfig::default()
        };
        let instance = instance(2.0, 3.0, vec![rectangle(2.5, 1.0)]);
        let solution = nest(&instance, config, None).unwrap();

        assert_eq!(solution.rotations, vec![90.0]);
        let bbox = solution.polygons[0].bbox;
        assert_near(bbox.width(), 1.0);
        assert_near(bbox.height(), 2.5);
        assert_near(bbox.x_min, 0.0);
        assert_near(bbox.y_min, 0.0);
    }

    #[test]
    fn oversized_polygons_are_scaled_down() {
        init_logger();
        let instance = instance(2.0, 2.0, vec![rectangle(4.0, 1.0)]);
        let solution = nest(&instance, BLFConfig::default(), None).unwrap();

        let scale = solution.scale.expect("a scale factor should be reported");
        assert_near(scale.factor, 0.475);
        assert_near(solution.polygons[0].bbox.width(), 1.9);
        assert!(assertions::solution_is_feasible(&solution, TOLERANCE));
    }

    #[test]
    fn oversized_polygons_are_rejected_without_scaling() {
        init_logger();
        let config = BLFConfig {
            auto_scale: false,
            ..BLFConfig::default()
        };
        let instance = instance(2.0, 2.0, vec![rectangle(4.0, 1.0)]);
        assert!(matches!(
            nest(&instance, config, None),
            Err(NestError::PlacementInfeasible { instance: 0, .. })
        ));
    }

    #[test_case(OverlapScope::PlacedOnly, [0.0, 1.0]; "placed only")]
    #[test_case(OverlapScope::AllInstances, [1.0, 0.0]; "all instances")]
    fn overlap_scope(scope: OverlapScope, expected_x: [f64; 2]) {
        init_logger();
        let config = BLFConfig {
            overlap_scope: scope,
            ..BLFConfig::default()
        };
        let instance = instance(2.0, 1.0, vec![rectangle(1.0, 1.0), rectangle(1.0, 1.0)]);
        let solution = nest(&instance, config, None).unwrap();

        for (p, x) in solution.polygons.iter().zip(expected_x) {
            assert_near(p.bbox.x_min, x);
        }
        assert!(assertions::solution_is_feasible(&solution, TOLERANCE));
    }

    #[test]
    fn rerun_from_history_is_identical() {
        init_logger();
        let polygons = vec![
            poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0), (0.0, 1.0)]),
            poly(&[(0.0, 0.0), (3.0, 0.0), (1.5, 2.5)]),
            poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0), (0.0, 1.0)]),
            rectangle(3.0, 1.0),
            poly(&[(0.0, 0.0), (3.0, 0.0), (1.5, 2.5)]),
        ];
        let instance = instance(8.0, 5.0, polygons);
        let store = MemoryNfpStore::new();

        let mut config = BLFConfig::default();
        config.nfp_cache.store_nfp = true;
        let first =
            nest(&instance, config, Some(Box::new(store.clone()) as Box<dyn NfpStore>)).unwrap();
        assert!(!store.is_empty());

        config.nfp_cache.store_nfp = false;
        config.nfp_cache.load_history = true;
        let second =
            nest(&instance, config, Some(Box::new(store.clone()) as Box<dyn NfpStore>)).unwrap();

        assert_eq!(first.rotations, second.rotations);
        for (p1, p2) in first.polygons.iter().zip(second.polygons.iter()) {
            for (v1, v2) in p1.vertices.iter().zip(p2.vertices.iter()) {
                assert!(v1.almost_eq(v2), "{v1:?} != {v2:?}");
            }
        }
    }

    #[test]
    fn unsorted_instances_keep_input_order() {
        init_logger();
        let config = BLFConfig {
            sort_instances: false,
            ..BLFConfig::default()
        };
        //unsorted, the small square claims the origin
        let instance = instance(3.0, 2.0, vec![rectangle(1.0, 1.0), rectangle(2.0, 2.0)]);
        let solution = nest(&instance, config, None).unwrap();

        assert_near(solution.polygons[0].bbox.x_min, 0.0);
        assert_near(solution.polygons[0].bbox.y_min, 0.0);
        assert_near(solution.polygons[1].bbox.x_min, 1.0);
        assert!(assertions::solution_is_feasible(&solution, TOLERANCE));
    }

    #[test_case(BLFConfig { n_rotations: 0, ..BLFConfig::default() }; "no orientations")]
    #[test_case(BLFConfig { grid_step: 0.0, ..BLFConfig::default() }; "zero grid step")]
    #[test_case(BLFConfig { grid_step: -1.0, ..BLFConfig::default() }; "negative grid step")]
    #[test_case(BLFConfig { grid_step: f64::NAN, ..BLFConfig::default() }; "nan grid step")]
    #[test_case(BLFConfig { scale_margin: 1.0, ..BLFConfig::default() }; "full scale margin")]
    #[test_case(BLFConfig { overlap_tolerance: -1e-10, ..BLFConfig::default() }; "negative overlap tolerance")]
    #[test_case(BLFConfig { candidate_nudge: -1.0, ..BLFConfig::default() }; "negative nudge")]
    #[test_case(BLFConfig { ifr_padding: f64::INFINITY, ..BLFConfig::default() }; "infinite padding")]
    fn invalid_config_is_rejected(config: BLFConfig) {
        init_logger();
        let instance = instance(2.0, 1.0, vec![rectangle(1.0, 1.0), rectangle(1.0, 1.0)]);
        assert!(matches!(
            nest(&instance, config, None),
            Err(NestError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn near_miss_retry_tightens_mixed_shapes() {
        init_logger();
        let ext_instance = io::read_instance(Path::new("../assets/mixed_shapes.json")).unwrap();
        let instance = Importer::default().import_instance(&ext_instance).unwrap();

        let nudged = nest(&instance, BLFConfig::default(), None).unwrap();
        let plain_config = BLFConfig {
            candidate_nudge: 0.0,
            ..BLFConfig::default()
        };
        let plain = nest(&instance, plain_config, None).unwrap();

        for solution in [&nudged, &plain] {
            assert!(assertions::all_within_container(
                &solution.polygons,
                &instance.container,
                TOLERANCE
            ));
            assert!(assertions::no_overlap(&solution.polygons, TOLERANCE));
        }
        assert_near(nudged.occupied_length, 17.5);
        assert_near(plain.occupied_length, 18.0);
    }

    #[test_case("../assets/two_squares.json"; "two_squares")]
    #[test_case("../assets/mixed_shapes.json"; "mixed_shapes")]
    fn test_instance(instance_path: &str) {
        init_logger();
        let ext_instance = io::read_instance(Path::new(instance_path)).unwrap();
        let instance = Importer::default().import_instance(&ext_instance).unwrap();
        let solution = nest(&instance, BLFConfig::default(), None).unwrap();

        assert_eq!(solution.polygons.len(), instance.polygons.len());
        assert!(assertions::all_within_container(
            &solution.polygons,
            &instance.container,
            TOLERANCE
        ));
        assert!(assertions::no_overlap(&solution.polygons, TOLERANCE));
        assert!(solution.occupied_length <= instance.container.width + TOLERANCE);
        assert_near(solution.placed_area(), instance.total_area());
    }
}
