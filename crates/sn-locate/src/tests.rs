//! Unit tests for sn-locate.

#[cfg(test)]
mod helpers {
    use sn_core::{NodeId, Point};

    use crate::DetectionReport;

    pub fn report(id: u32, x: f64, y: f64, t: f64) -> DetectionReport {
        DetectionReport {
            node:          NodeId(id),
            position:      Point::new(x, y),
            detected_at:   t,
            velocity_km_s: None,
            accel_km_s2:   None,
        }
    }

    /// Equilateral-ish triangle around (100, 100).
    pub fn triangle(t: [f64; 3]) -> [DetectionReport; 3] {
        [
            report(0, 0.0, 0.0, t[0]),
            report(1, 300.0, 0.0, t[1]),
            report(2, 0.0, 300.0, t[2]),
        ]
    }
}

// ── Estimator functions ───────────────────────────────────────────────────────

#[cfg(test)]
mod estimator {
    use approx::assert_relative_eq;
    use sn_core::Point;

    use super::helpers::{report, triangle};
    use crate::{LocateError, estimate_epicenter, estimate_radius, trilaterate};

    #[test]
    fn simultaneous_detections_give_centroid() {
        let fit = estimate_epicenter(&triangle([4.0, 4.0, 4.0])).unwrap();
        assert_eq!(fit.beta, 0.0);
        assert_relative_eq!(fit.epicenter.x, 100.0);
        assert_relative_eq!(fit.epicenter.y, 100.0);
        assert_eq!(fit.epicenter, fit.centroid);
    }

    #[test]
    fn large_spread_leans_on_weighted_point() {
        let fit = estimate_epicenter(&triangle([0.0, 2.0, 2.0])).unwrap();
        assert_relative_eq!(fit.beta, 0.8);
        // weights 1, 1/3, 1/3 → weighted = (300/3, 300/3) / (5/3) = (60, 60)
        assert_relative_eq!(fit.weighted.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(fit.weighted.y, 60.0, epsilon = 1e-9);
        let to_weighted = fit.epicenter.distance(fit.weighted);
        let to_centroid = fit.epicenter.distance(fit.centroid);
        assert!(to_weighted < to_centroid, "{to_weighted} vs {to_centroid}");
    }

    #[test]
    fn beta_grows_with_spread() {
        let small = estimate_epicenter(&triangle([0.0, 0.1, 0.1])).unwrap().beta;
        let large = estimate_epicenter(&triangle([0.0, 10.0, 10.0])).unwrap().beta;
        assert!(small < large);
        assert!(large < 1.0);
    }

    #[test]
    fn empty_input_is_incomplete() {
        assert!(matches!(estimate_epicenter(&[]), Err(LocateError::Incomplete { .. })));
        assert_eq!(estimate_radius(&[], Point::ORIGIN, 2.0), None);
    }

    #[test]
    fn radius_without_motion_is_twice_mean_distance() {
        // Three detectors 50 px from the epicentre, 2 px per km.
        let reports = [
            report(0, 150.0, 100.0, 1.0),
            report(1, 50.0, 100.0, 1.0),
            report(2, 100.0, 150.0, 1.0),
        ];
        let r = estimate_radius(&reports, Point::new(100.0, 100.0), 2.0).unwrap();
        assert_relative_eq!(r, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn radius_extrapolates_late_reports() {
        let mut reports = [
            report(0, 150.0, 100.0, 0.0),
            report(1, 50.0, 100.0, 1.0),
            report(2, 100.0, 150.0, 1.0),
        ];
        let still = estimate_radius(&reports, Point::new(100.0, 100.0), 2.0).unwrap();
        reports[0].velocity_km_s = Some(10.0);
        let moving = estimate_radius(&reports, Point::new(100.0, 100.0), 2.0).unwrap();
        assert!(moving > still);
    }

    #[test]
    fn trilaterate_equidistant_detectors_recovers_source() {
        let source = Point::new(200.0, 180.0);
        let reports = [
            report(0, source.x + 80.0, source.y, 3.0),
            report(1, source.x, source.y - 80.0, 3.0),
            report(2, source.x - 56.568_542, source.y + 56.568_542, 3.0),
        ];
        let p = trilaterate(&reports, 40.0).unwrap();
        assert_relative_eq!(p.x, source.x, epsilon = 1e-3);
        assert_relative_eq!(p.y, source.y, epsilon = 1e-3);
    }

    #[test]
    fn trilaterate_unequal_distances_recovers_source() {
        // Detectors 50, 100 and 150 px out, exact arrival times at 40 px/s.
        let source = Point::new(200.0, 180.0);
        let at = |id, x: f64, y: f64| report(id, x, y, source.distance(Point::new(x, y)) / 40.0);
        let reports = [at(0, 250.0, 180.0), at(1, 200.0, 80.0), at(2, 110.0, 300.0)];
        let p = trilaterate(&reports, 40.0).unwrap();
        assert_relative_eq!(p.x, source.x, epsilon = 1e-6);
        assert_relative_eq!(p.y, source.y, epsilon = 1e-6);

        // Report order does not matter; the earliest detector is the reference.
        let [a, b, c] = reports;
        let q = trilaterate(&[c, a, b], 40.0).unwrap();
        assert_relative_eq!(q.x, source.x, epsilon = 1e-6);
        assert_relative_eq!(q.y, source.y, epsilon = 1e-6);
    }

    #[test]
    fn trilaterate_impossible_lags_are_inconsistent() {
        // A 500 px lag across a 100 px baseline fits no single source.
        let reports = [
            report(0, 0.0, 0.0, 0.0),
            report(1, 100.0, 0.0, 5.0),
            report(2, 0.0, 100.0, 5.0),
        ];
        assert_eq!(trilaterate(&reports, 100.0), Err(LocateError::Inconsistent));
    }

    #[test]
    fn trilaterate_collinear_is_degenerate() {
        let reports = [
            report(0, 0.0, 0.0, 0.0),
            report(1, 100.0, 50.0, 1.0),
            report(2, 200.0, 100.0, 2.0),
        ];
        assert!(matches!(trilaterate(&reports, 10.0), Err(LocateError::Degenerate { .. })));
    }

    #[test]
    fn trilaterate_needs_three() {
        let reports = [report(0, 0.0, 0.0, 0.0), report(1, 1.0, 0.0, 0.0)];
        assert_eq!(
            trilaterate(&reports, 1.0),
            Err(LocateError::Incomplete { got: 2, need: 3 })
        );
    }
}

// ── Triangulation context ─────────────────────────────────────────────────────

#[cfg(test)]
mod triangulation {
    use sn_core::Point;

    use super::helpers::{report, triangle};
    use crate::Triangulation;

    #[test]
    fn locks_on_third_report() {
        let mut tri = Triangulation::new(2.0);
        let [a, b, c] = triangle([0.0, 0.5, 1.0]);
        assert!(tri.add_report(a));
        assert!(tri.add_report(b));
        assert!(!tri.is_locked());
        assert!(tri.estimate().is_none());
        assert!(tri.add_report(c));
        assert!(tri.is_locked());
        assert!(tri.estimated_epicenter().is_some());
        assert!(tri.estimated_radius().is_some());
    }

    #[test]
    fn fourth_report_rejected_and_estimate_frozen() {
        let mut tri = Triangulation::new(2.0);
        for r in triangle([0.0, 2.0, 2.0]) {
            tri.add_report(r);
        }
        let before = *tri.estimate().unwrap();
        assert!(!tri.add_report(report(9, 999.0, 999.0, 0.0)));
        assert_eq!(tri.reports().len(), 3);
        assert_eq!(*tri.estimate().unwrap(), before);
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut tri = Triangulation::new(2.0);
        assert!(tri.add_report(report(1, 0.0, 0.0, 0.0)));
        assert!(!tri.add_report(report(1, 0.0, 0.0, 0.5)));
        assert_eq!(tri.reports().len(), 1);
    }

    #[test]
    fn collinear_cross_check_reports_unavailable() {
        let mut tri = Triangulation::new(2.0);
        tri.add_report(report(0, 0.0, 0.0, 0.0));
        tri.add_report(report(1, 100.0, 0.0, 0.2));
        tri.add_report(report(2, 200.0, 0.0, 0.4));
        // The primary estimate still exists.
        assert!(tri.estimated_epicenter().is_some());
        assert_eq!(tri.cross_check(100.0), None);
    }

    #[test]
    fn cross_check_waits_for_lock() {
        let source = Point::new(200.0, 180.0);
        let at = |id, x: f64, y: f64| report(id, x, y, source.distance(Point::new(x, y)) / 40.0);
        let mut tri = Triangulation::new(2.0);
        assert_eq!(tri.cross_check(40.0), None);
        tri.add_report(at(0, 250.0, 180.0));
        tri.add_report(at(1, 200.0, 80.0));
        assert_eq!(tri.cross_check(40.0), None);
        tri.add_report(at(2, 110.0, 300.0));
        let p = tri.cross_check(40.0).unwrap();
        assert!(p.distance(source) < 1e-6, "{p}");
    }
}
