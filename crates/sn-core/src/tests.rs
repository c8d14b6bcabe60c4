//! Unit tests for sn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, SiteId, WaveId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(WaveId::INVALID.0, u32::MAX);
        assert_eq!(SiteId::default(), SiteId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(WaveId(7).to_string(), "WaveId(7)");
    }
}

#[cfg(test)]
mod geo {
    use approx::assert_relative_eq;

    use crate::{Point, Viewport};

    #[test]
    fn distance_345() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn centroid_and_lerp() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(0.0, 3.0)];
        let c = Point::centroid(&pts).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
        assert!(Point::centroid(&[]).is_none());

        let m = pts[0].lerp(pts[1], 0.25);
        assert_relative_eq!(m.x, 0.75);
    }

    #[test]
    fn inset_containment_is_inclusive() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(vp.contains_inset(Point::new(10.0, 10.0), 10.0));
        assert!(vp.contains_inset(Point::new(90.0, 40.0), 10.0));
        assert!(!vp.contains_inset(Point::new(9.9, 20.0), 10.0));
        assert!(!vp.contains_inset(Point::new(50.0, 40.1), 10.0));
    }

    #[test]
    fn farthest_corner_from_center() {
        let vp = Viewport::new(600.0, 800.0);
        assert_relative_eq!(vp.max_corner_distance(vp.center(), 0.0), 500.0);
        assert_relative_eq!(vp.max_corner_distance(Point::ORIGIN, 0.0), 1000.0);
        assert!(vp.max_corner_distance(vp.center(), 5.0) > 500.0);
    }
}

#[cfg(test)]
mod time {
    use approx::assert_relative_eq;

    use crate::{FrameClock, SimClock, Tick, sanitize_dt};

    #[test]
    fn sanitize_rejects_bad_deltas() {
        assert_eq!(sanitize_dt(-1.0, 0.25), 0.0);
        assert_eq!(sanitize_dt(f64::NAN, 0.25), 0.0);
        assert_eq!(sanitize_dt(f64::INFINITY, 0.25), 0.0);
        assert_eq!(sanitize_dt(10.0, 0.25), 0.25);
        assert_eq!(sanitize_dt(0.016, 0.25), 0.016);
    }

    #[test]
    fn clock_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert_relative_eq!(clock.now(), 0.75);
        clock.reset();
        assert_eq!(clock.current_tick, Tick(0));
    }

    #[test]
    fn frame_clock_first_frame_is_zero() {
        let mut fc = FrameClock::new(0.25);
        assert_eq!(fc.frame(1_000.0), 0.0);
        assert_relative_eq!(fc.frame(1_016.0), 0.016);
        // tab was hidden for ten seconds
        assert_eq!(fc.frame(11_016.0), 0.25);
        // clock went backwards
        assert_eq!(fc.frame(10_000.0), 0.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, WaveId, WaveRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = WaveRng::new(12345, WaveId(0));
        let mut r2 = WaveRng::new(12345, WaveId(0));
        for _ in 0..100 {
            assert_eq!(r1.centered(), r2.centered());
        }
    }

    #[test]
    fn different_waves_differ() {
        let mut r0 = WaveRng::new(1, WaveId(0));
        let mut r1 = WaveRng::new(1, WaveId(1));
        assert_ne!(r0.centered(), r1.centered(), "seeds for adjacent waves should diverge");
    }

    #[test]
    fn centered_in_bounds() {
        let mut rng = WaveRng::new(0, WaveId(3));
        for _ in 0..1000 {
            let v = rng.centered();
            assert!((-0.5..0.5).contains(&v));
        }
    }

    #[test]
    fn sim_rng_is_reproducible_and_in_range() {
        let draw = |seed| {
            let mut rng = SimRng::new(seed);
            (0..50).map(|_| rng.gen_range(10.0..20.0)).collect::<Vec<f64>>()
        };
        let a = draw(7);
        assert_eq!(a, draw(7));
        assert!(a.iter().all(|v| (10.0..20.0).contains(v)));
    }
}

#[cfg(test)]
mod config {
    use approx::assert_relative_eq;

    use crate::{SimConfig, SnError, Viewport};

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_relative_eq!(cfg.km_to_px(), 700.0 / 300.0);
        assert_relative_eq!(cfg.spacing_px(), 100.0 * 700.0 / 300.0);
    }

    #[test]
    fn non_positive_spacing_rejected() {
        for bad in [0.0, -5.0, f64::NAN] {
            let cfg = SimConfig { node_spacing_km: bad, ..SimConfig::default() };
            assert!(matches!(cfg.validate(), Err(SnError::Config(_))), "spacing {bad}");
        }
    }

    #[test]
    fn malformed_viewport_rejected() {
        let cfg = SimConfig { viewport: Viewport::new(0.0, 100.0), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { viewport: Viewport::new(100.0, f64::INFINITY), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn margin_swallowing_viewport_rejected() {
        let cfg = SimConfig { margin_px: 350.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
