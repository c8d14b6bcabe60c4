//! Unit tests for sn-grid.
//!
//! Most tests use the default 700×700 viewport; spacing is given directly in
//! pixels so geometry can be checked by hand.

#[cfg(test)]
mod helpers {
    use sn_core::Viewport;

    use crate::{GridParams, HexGrid};

    pub fn params(spacing_px: f64) -> GridParams {
        GridParams {
            viewport: Viewport::new(700.0, 700.0),
            spacing_px,
            margin_px: 10.0,
        }
    }

    pub fn grid(spacing_px: f64) -> HexGrid {
        HexGrid::build(&params(spacing_px)).expect("valid params")
    }
}

// ── Axial & Direction ─────────────────────────────────────────────────────────

#[cfg(test)]
mod axial {
    use approx::assert_relative_eq;
    use sn_core::Point;

    use crate::{Axial, Direction, GridError};

    #[test]
    fn origin_maps_to_center() {
        let p = Axial::new(0, 0).to_pixel(100.0, Point::new(350.0, 350.0));
        assert_relative_eq!(p.x, 350.0);
        assert_relative_eq!(p.y, 350.0);
    }

    #[test]
    fn pixel_formula() {
        let p = Axial::new(1, 2).to_pixel(100.0, Point::new(0.0, 0.0));
        assert_relative_eq!(p.x, 200.0);
        assert_relative_eq!(p.y, 100.0 * 3f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn every_direction_is_one_spacing_away() {
        let c = Point::new(0.0, 0.0);
        let origin = Axial::new(0, 0);
        for dir in Direction::ALL {
            let d = origin.to_pixel(50.0, c).distance(origin.step(dir).to_pixel(50.0, c));
            assert_relative_eq!(d, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn table_order_is_fixed() {
        let labels: Vec<_> = Direction::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, ["NW", "NE", "W", "E", "SW", "SE"]);
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn opposite_steps_cancel() {
        let a = Axial::new(3, -2);
        for dir in Direction::ALL {
            assert_eq!(a.step(dir).step(dir.opposite()), a);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn key_roundtrip() {
        let a = Axial::new(-4, 7);
        assert_eq!(a.key(), "-4,7");
        assert_eq!("-4,7".parse::<Axial>().unwrap(), a);
        assert_eq!(" 2 , 3 ".parse::<Axial>().unwrap(), Axial::new(2, 3));
        assert!(matches!("4".parse::<Axial>(), Err(GridError::MalformedKey(_))));
        assert!("a,b".parse::<Axial>().is_err());
    }
}

// ── Build ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use sn_core::Viewport;

    use super::helpers::{grid, params};
    use crate::{Axial, GridError, GridParams, HexGrid};

    #[test]
    fn center_node_exists() {
        let g = grid(100.0);
        let id = g.by_axial(Axial::new(0, 0)).expect("center node");
        assert_eq!(g.position(id).x, 350.0);
        assert_eq!(g.by_key("0,0").unwrap(), Some(id));
        assert_eq!(g.by_key("999,999").unwrap(), None);
    }

    #[test]
    fn all_nodes_inside_inset_viewport() {
        let g = grid(100.0);
        assert!(!g.is_empty());
        for p in &g.node_pos {
            assert!(g.params().viewport.contains_inset(*p, 10.0), "{p} outside");
        }
    }

    #[test]
    fn registry_consistent_with_arrays() {
        let g = grid(60.0);
        for id in g.node_ids() {
            assert_eq!(g.by_axial(g.axial(id)), Some(id));
        }
    }

    #[test]
    fn zero_and_negative_spacing_rejected() {
        assert_eq!(HexGrid::build(&params(0.0)).err(), Some(GridError::InvalidSpacing(0.0)));
        assert!(HexGrid::build(&params(-3.0)).is_err());
        assert!(HexGrid::build(&params(f64::NAN)).is_err());
    }

    #[test]
    fn malformed_viewport_rejected() {
        let p = GridParams { viewport: Viewport::new(-1.0, 100.0), ..params(10.0) };
        assert!(matches!(HexGrid::build(&p), Err(GridError::InvalidViewport { .. })));
    }

    #[test]
    fn margin_too_large_rejected() {
        let p = GridParams { margin_px: 400.0, ..params(10.0) };
        assert_eq!(HexGrid::build(&p).err(), Some(GridError::InvalidMargin(400.0)));
    }

    #[test]
    fn absurdly_small_spacing_rejected() {
        assert!(matches!(HexGrid::build(&params(0.01)), Err(GridError::TooDense { .. })));
    }

    #[test]
    fn spacing_larger_than_viewport_keeps_center_only() {
        let g = grid(2_000.0);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.degree(sn_core::NodeId(0)), 0);
    }
}

// ── Adjacency ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod adjacency {
    use super::helpers::grid;
    use crate::{Axial, Direction};

    #[test]
    fn interior_node_has_six_neighbors() {
        let g = grid(100.0);
        let c = g.by_axial(Axial::new(0, 0)).unwrap();
        assert_eq!(g.degree(c), 6);
        let dirs: Vec<_> = g.neighbors(c).map(|(d, _)| d).collect();
        assert_eq!(dirs, Direction::ALL.to_vec());
    }

    #[test]
    fn degree_never_exceeds_six_and_edges_lose_some() {
        let g = grid(100.0);
        assert!(g.node_ids().all(|n| g.degree(n) <= 6));
        assert!(g.node_ids().any(|n| g.degree(n) < 6), "border nodes exist");
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let g = grid(45.0);
        for a in g.node_ids() {
            for (dir, b) in g.neighbors(a) {
                assert_eq!(g.neighbor(b, dir.opposite()), Some(a), "{a} -{dir}-> {b}");
            }
        }
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use sn_core::Point;

    use super::helpers::grid;
    use crate::Axial;

    #[test]
    fn find_node_inside_hitbox() {
        let g = grid(100.0);
        let c = g.by_axial(Axial::new(0, 0)).unwrap();
        assert_eq!(g.find_node(Point::new(353.0, 346.0), 10.0), Some(c));
    }

    #[test]
    fn find_node_miss_is_none() {
        let g = grid(100.0);
        assert_eq!(g.find_node(Point::new(400.0, 350.0), 10.0), None);
    }

    #[test]
    fn nodes_within_matches_brute_force() {
        let g = grid(40.0);
        let center = Point::new(120.0, 555.0);
        let radius = 130.0;
        let fast = g.nodes_within(center, radius);
        let slow: Vec<_> = g
            .node_ids()
            .filter(|&n| g.position(n).distance(center) < radius)
            .collect();
        assert_eq!(fast.iter().map(|&(n, _)| n).collect::<Vec<_>>(), slow);
        for (n, d) in fast {
            assert!((g.position(n).distance(center) - d).abs() < 1e-9);
        }
    }

    #[test]
    fn nodes_within_zero_radius_is_empty() {
        let g = grid(100.0);
        assert!(g.nodes_within(Point::new(350.0, 350.0), 0.0).is_empty());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use sn_core::Viewport;

    use crate::{GridParams, HexGrid};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn nodes_stay_inside_viewport(
            spacing in 8.0f64..400.0,
            w in 100.0f64..900.0,
            h in 100.0f64..900.0,
            margin in 0.0f64..40.0,
        ) {
            let p = GridParams { viewport: Viewport::new(w, h), spacing_px: spacing, margin_px: margin };
            let g = HexGrid::build(&p).unwrap();
            for pos in &g.node_pos {
                prop_assert!(pos.x >= 0.0 && pos.x <= w && pos.y >= 0.0 && pos.y <= h);
                prop_assert!(p.viewport.contains_inset(*pos, margin));
            }
        }

        #[test]
        fn adjacency_symmetric(spacing in 15.0f64..300.0) {
            let p = GridParams { viewport: Viewport::new(500.0, 400.0), spacing_px: spacing, margin_px: 10.0 };
            let g = HexGrid::build(&p).unwrap();
            for a in g.node_ids() {
                prop_assert!(g.degree(a) <= 6);
                for (dir, b) in g.neighbors(a) {
                    prop_assert_eq!(g.neighbor(b, dir.opposite()), Some(a));
                }
            }
        }
    }
}
