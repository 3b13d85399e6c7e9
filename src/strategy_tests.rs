//! Tests for the bounded partition, the strategies, the strategy registry and the coordinate
//! domain conversions.

#[cfg(test)]
mod tests {
    use crate::partition::{merge_cost, waste};
    use crate::prelude::*;
    use crate::rect::WORLD_BOUND;
    use rand::{Rng, SeedableRng};
    use std::time::{Duration, Instant};

    const EPS: f64 = 1e-9;

    fn bounds(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Bounds {
        Bounds::new(min_lat, min_lon, max_lat, max_lon).unwrap()
    }

    /// Every grid cell covered by `input` must be covered by `output`.
    fn assert_covers(input: &[Rect], output: &[Rect]) {
        for r in input {
            let rest = r.subtract_all(output);
            assert!(rest.is_empty(), "{} not covered, left over {:?}", r, rest);
        }
    }

    fn stress_set() -> Vec<Rect> {
        let mut set = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                set.push(Rect::new(i * 3, j * 3, i * 3 + 2, j * 3 + 2));
            }
        }
        set.push(Rect::new(-10, -10, -9, -9));
        set
    }

    // ============================================================================
    // OPTIMAL_PART TESTS
    // ============================================================================

    #[test]
    fn test_optimal_part_under_budget_is_unchanged() {
        let set = vec![Rect::new(0, 0, 1, 1), Rect::new(1, 1, 2, 2)];
        let r = optimal_part(3, &set).unwrap();
        assert_eq!(r, set, "Input within budget should come back unchanged");
        for b in &r {
            assert_eq!(b.area(), 1, "Unit cells should keep unit area");
        }
    }

    #[test]
    fn test_optimal_part_zero_budget_rejected() {
        let set = vec![Rect::new(0, 0, 1, 1)];
        assert_eq!(
            optimal_part(0, &set),
            Err(FetchError::InvalidBudget { max_areas: 0 })
        );
    }

    #[test]
    fn test_optimal_part_merges_cheapest_pair() {
        // The two adjacent cells merge for free; the distant one stays alone
        let set = vec![
            Rect::new(20, 20, 21, 21),
            Rect::new(0, 0, 1, 1),
            Rect::new(0, 1, 1, 2),
        ];
        let r = optimal_part(2, &set).unwrap();
        assert_eq!(
            r,
            vec![Rect::new(0, 0, 1, 2), Rect::new(20, 20, 21, 21)],
            "Adjacent cells should merge first"
        );
        assert_eq!(waste(&set, &r), 0, "Merging adjacent cells wastes nothing");
    }

    #[test]
    fn test_optimal_part_budget_one_is_hull() {
        let set = stress_set();
        let r = optimal_part(1, &set).unwrap();
        assert_eq!(r, vec![Rect::new(-10, -10, 14, 14)], "Budget 1 should give the hull");
    }

    #[test]
    fn test_optimal_part_drops_invalid_and_duplicates() {
        let set = vec![
            Rect::new(0, 0, 1, 1),
            Rect::new(0, 0, 1, 1),
            Rect::new(5, 5, 4, 4),
            Rect::new(3, 0, 4, 1),
        ];
        let r = optimal_part(2, &set).unwrap();
        assert_eq!(
            r,
            vec![Rect::new(0, 0, 1, 1), Rect::new(3, 0, 4, 1)],
            "Invalid and duplicate rectangles should be dropped before merging"
        );
    }

    #[test]
    fn test_optimal_part_tie_break_is_lowest_order() {
        // Four unit cells in a row with equal gaps: every neighbouring merge costs 1
        let set = vec![
            Rect::new(6, 0, 7, 1),
            Rect::new(4, 0, 5, 1),
            Rect::new(2, 0, 3, 1),
            Rect::new(0, 0, 1, 1),
        ];
        let r = optimal_part(3, &set).unwrap();
        assert_eq!(
            r,
            vec![Rect::new(0, 0, 3, 1), Rect::new(4, 0, 5, 1), Rect::new(6, 0, 7, 1)],
            "Equal-cost merges should take the lowest-ordered pair"
        );
    }

    #[test]
    fn test_optimal_part_stress() {
        let set = stress_set();
        let start = Instant::now();
        let r = optimal_part(4, &set).unwrap();
        assert!(
            start.elapsed() < Duration::from_secs(4),
            "26 fragments should reduce to 4 well within 4 seconds"
        );
        assert_eq!(r.len(), 4, "Should use the whole budget");
        assert_covers(&set, &r);
    }

    #[test]
    fn test_optimal_part_keeps_coverage_for_every_budget() {
        let set = stress_set();
        for n in 1..=set.len() {
            let r = optimal_part(n, &set).unwrap();
            assert!(r.len() <= n, "Budget {} exceeded: {} rectangles", n, r.len());
            assert_covers(&set, &r);
            assert!(waste(&set, &r) >= 0, "Disjoint input cannot shrink when merged");
        }
    }

    #[test]
    fn test_optimal_part_random_overlapping_sets() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
        for round in 0..200 {
            let count = rng.random_range(1..20);
            let mut set = Vec::with_capacity(count);
            for _ in 0..count {
                let min_x = rng.random_range(0..50);
                let min_y = rng.random_range(0..50);
                // Widths may be zero or negative so that invalid rectangles show up too
                let max_x = min_x + rng.random_range(-2..12);
                let max_y = min_y + rng.random_range(-2..12);
                set.push(Rect::new(min_x, min_y, max_x, max_y));
            }
            if rng.random_bool(0.2) {
                set.push(set[0]);
            }
            let budget = rng.random_range(1..6);

            let r = optimal_part(budget, &set).unwrap();
            assert!(
                r.len() <= budget,
                "Round {}: budget {} exceeded with {} rectangles",
                round,
                budget,
                r.len()
            );
            if set.len() <= budget {
                assert_eq!(r, set, "Round {}: input within budget should be unchanged", round);
            } else {
                assert!(
                    r.iter().all(Rect::is_valid),
                    "Round {}: merged set has invalid rectangles",
                    round
                );
            }
            assert_covers(&set, &r);
        }
    }

    #[test]
    fn test_optimal_part_near_universe_with_debug_logging() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
            .with_test_writer()
            .finish();
        // Nine nested rectangles whose areas add up past i128::MAX
        let set: Vec<Rect> = (0..9)
            .map(|k| Rect::new(-WORLD_BOUND, -WORLD_BOUND, WORLD_BOUND - k, WORLD_BOUND))
            .collect();

        let r = tracing::subscriber::with_default(subscriber, || optimal_part(4, &set)).unwrap();
        assert_eq!(r.len(), 4, "Should merge down to the budget");
        assert_covers(&set, &r);
        assert!(waste(&set, &r) <= 0, "Nested input merges into its own hull");
    }

    #[test]
    fn test_optimal_part_extreme_coordinates() {
        let whole = Rect::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX);
        assert_eq!(whole.area(), i128::MAX, "Area beyond i128 should saturate");

        let set = vec![
            Rect::new(i64::MIN, i64::MIN, i64::MIN + 1, i64::MIN + 1),
            Rect::new(0, 0, 1, 1),
            Rect::new(i64::MAX - 1, i64::MAX - 1, i64::MAX, i64::MAX),
        ];
        let r = optimal_part(1, &set).unwrap();
        assert_eq!(r, vec![whole], "Budget 1 should give the full-range hull");

        let r = optimal_part(2, &set).unwrap();
        assert_eq!(r.len(), 2, "Should merge exactly one pair");
        assert_covers(&set, &r);
    }

    #[test]
    fn test_merge_cost() {
        let a = Rect::new(0, 0, 1, 1);
        assert_eq!(merge_cost(&a, &Rect::new(1, 0, 2, 1)), 0, "Adjacent cells merge for free");
        assert_eq!(merge_cost(&a, &Rect::new(1, 1, 2, 2)), 2, "Diagonal cells waste two cells");
        // Overlapping rectangles are cheaper than free
        assert_eq!(merge_cost(&Rect::new(0, 0, 2, 2), &a), -1, "Contained cell counts twice");
    }

    // ============================================================================
    // STRATEGY TESTS
    // ============================================================================

    #[test]
    fn test_box_strategy_side_strips() {
        let existing = vec![bounds(0.0, 0.0, 1.0, 1.0)];
        let strategy = BoxStrategy::default();
        let r = strategy
            .get_boxes(&bounds(0.0, -1.0, 1.0, 2.0), &existing, 3)
            .unwrap();
        assert_eq!(r.len(), 2, "Should fetch the strips left and right of the present area");
        for b in &r {
            assert!((b.area() - 1.0).abs() < EPS, "Strip {} should be one square degree", b);
        }
    }

    #[test]
    fn test_box_strategy_empty_existing_is_whole_area() {
        let requested = bounds(10.0, 20.0, 10.5, 20.25);
        let r = BoxStrategy::default().get_boxes(&requested, &[], 4).unwrap();
        assert_eq!(r, vec![requested], "Nothing present means fetching everything");
    }

    #[test]
    fn test_box_strategy_fully_covered() {
        let requested = bounds(0.0, 0.0, 1.0, 1.0);
        let existing = vec![bounds(-1.0, -1.0, 2.0, 2.0)];
        let r = BoxStrategy::default().get_boxes(&requested, &existing, 4).unwrap();
        assert!(r.is_empty(), "Covered area should fetch nothing, got {:?}", r);
    }

    #[test]
    fn test_box_strategy_respects_budget() {
        let requested = bounds(0.0, 0.0, 1.0, 1.0);
        // A checkerboard of present cells leaves many fragments
        let mut existing = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                if (i + j) % 2 == 0 {
                    let (lat, lon) = (i as f64 * 0.2, j as f64 * 0.2);
                    existing.push(bounds(lat, lon, lat + 0.2, lon + 0.2));
                }
            }
        }
        let r = BoxStrategy::default().get_boxes(&requested, &existing, 4).unwrap();
        assert!(r.len() <= 4, "Budget exceeded: {:?}", r);
        let fetched: f64 = r.iter().map(Bounds::area).sum();
        assert!(fetched >= 0.48 - EPS, "Missing cells not all fetched: {}", fetched);
    }

    #[test]
    fn test_box_strategy_zero_budget() {
        let requested = bounds(0.0, 0.0, 1.0, 1.0);
        let r = BoxStrategy::default().get_boxes(&requested, &[], 0);
        assert_eq!(r, Err(FetchError::InvalidBudget { max_areas: 0 }), "Zero budget is invalid");
    }

    #[test]
    fn test_simple_strategy_ignores_existing() {
        let requested = bounds(0.0, 0.0, 1.0, 1.0);
        let existing = vec![bounds(0.0, 0.0, 1.0, 1.0)];
        let r = SimpleStrategy.get_boxes(&requested, &existing, 4).unwrap();
        assert_eq!(r, vec![requested], "Simple strategy always fetches the request");
        assert!(
            SimpleStrategy.get_boxes(&requested, &existing, 0).is_err(),
            "Zero budget is invalid"
        );
    }

    // ============================================================================
    // REGISTRY TESTS
    // ============================================================================

    #[test]
    fn test_registry_defaults() {
        let registry = StrategyRegistry::with_defaults(CoordinateDomain::Osm);
        assert_eq!(registry.len(), 2, "Defaults hold two strategies");
        assert_eq!(registry.get("BoxStrategy").unwrap().name(), "BoxStrategy");
        assert!(registry.get("Unknown").is_none(), "get should not fall back");
    }

    #[test]
    fn test_registry_resolve_falls_back() {
        let registry = StrategyRegistry::with_defaults(CoordinateDomain::Osm);
        assert_eq!(registry.resolve("BoxStrategy").name(), "BoxStrategy");
        assert_eq!(registry.resolve("Unknown").name(), "SimpleStrategy");

        let empty = StrategyRegistry::new();
        assert!(empty.is_empty(), "New registry should be empty");
        assert_eq!(
            empty.resolve("BoxStrategy").name(),
            "SimpleStrategy",
            "Empty registry should still resolve to the fallback"
        );
    }

    #[test]
    fn test_registry_register_replaces() {
        struct Nothing;
        impl DownloadStrategy for Nothing {
            fn name(&self) -> &'static str {
                "BoxStrategy"
            }
            fn get_boxes(
                &self,
                _: &Bounds,
                _: &[Bounds],
                _: usize,
            ) -> crate::Result<Vec<Bounds>> {
                Ok(Vec::new())
            }
        }

        let mut registry = StrategyRegistry::with_defaults(CoordinateDomain::Osm);
        registry.register(Nothing);
        assert_eq!(registry.len(), 2, "Same name should replace, not add");
        let requested = bounds(0.0, 0.0, 1.0, 1.0);
        let r = registry.resolve("BoxStrategy").get_boxes(&requested, &[], 4).unwrap();
        assert!(r.is_empty(), "Replacement strategy should be used");
    }

    // ============================================================================
    // DOMAIN TESTS
    // ============================================================================

    #[test]
    fn test_domain_parse() {
        assert_eq!("osm".parse::<CoordinateDomain>(), Ok(CoordinateDomain::Osm));
        assert_eq!("E7".parse::<CoordinateDomain>(), Ok(CoordinateDomain::Osm));
        assert_eq!(" micro ".parse::<CoordinateDomain>(), Ok(CoordinateDomain::Micro));
        assert_eq!(
            "mercator".parse::<CoordinateDomain>(),
            Err(FetchError::UnknownDomain {
                name: "mercator".to_string()
            })
        );
    }

    #[test]
    fn test_domain_rounding_direction() {
        let domain = CoordinateDomain::Micro;
        let b = bounds(0.0000004, 0.0000004, 0.0000026, 0.0000026);
        assert_eq!(domain.to_rect_outer(&b), Rect::new(0, 0, 3, 3), "Requested rounds outward");
        assert_eq!(domain.to_rect_inner(&b), Rect::new(1, 1, 2, 2), "Present rounds inward");
        let thin = bounds(0.0000001, 0.0, 0.0000009, 1.0);
        assert!(
            !domain.to_rect_inner(&thin).is_valid(),
            "Sub-unit present area covers no grid cell"
        );
    }

    #[test]
    fn test_domain_snaps_representation_error() {
        let b = bounds(0.1, 0.3, 0.7, 0.9);
        let outer = CoordinateDomain::Osm.to_rect_outer(&b);
        let inner = CoordinateDomain::Osm.to_rect_inner(&b);
        assert_eq!(outer, inner, "Decimal values on grid lines should not be rounded away");
        assert_eq!(outer, Rect::new(3_000_000, 1_000_000, 9_000_000, 7_000_000));
    }

    #[test]
    fn test_domain_round_trip() {
        let domain = CoordinateDomain::Osm;
        let r = Rect::new(-1_800_000_000, -900_000_000, 1_800_000_000, 900_000_000);
        let b = domain.to_bounds(&r).unwrap();
        assert_eq!(b, bounds(-90.0, -180.0, 90.0, 180.0), "x is longitude, y is latitude");
        assert_eq!(domain.to_rect_outer(&b), r, "Grid values should survive the round trip");
        assert!(
            domain.to_bounds(&Rect::new(1, 1, 0, 0)).is_none(),
            "Invalid rectangles have no bounds"
        );
    }

    // ============================================================================
    // BOUNDS TESTS
    // ============================================================================

    #[test]
    fn test_bounds_rejects_malformed() {
        assert!(Bounds::new(f64::NAN, 0.0, 1.0, 1.0).is_err(), "NaN should be rejected");
        assert!(Bounds::new(0.0, 1.0, 1.0, 0.0).is_err(), "Inverted longitude should be rejected");
        assert!(Bounds::new(0.0, 0.0, 0.0, 0.0).is_ok(), "Zero-size bounds are allowed");
    }

    #[test]
    fn test_bounds_intersection() {
        let a = bounds(0.0, 0.0, 2.0, 2.0);
        assert_eq!(
            a.intersection(&bounds(1.0, 1.0, 3.0, 3.0)),
            Some(bounds(1.0, 1.0, 2.0, 2.0))
        );
        assert_eq!(
            a.intersection(&bounds(2.0, 2.0, 3.0, 3.0)),
            None,
            "Touching corners do not intersect"
        );
    }

    #[test]
    fn test_bounds_extend_rejects_negative_margin() {
        let a = bounds(0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.extend(-0.1), Err(FetchError::InvalidMargin { margin: -0.1 }));
        assert_eq!(a.extend(0.0), Ok(a), "Zero margin keeps the bounds");
    }
}
