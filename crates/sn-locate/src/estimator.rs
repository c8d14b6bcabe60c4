//! Pure estimation functions over a slice of detection reports.

use sn_core::Point;

use crate::{DetectionReport, LocateError, LocateResult};

/// Seconds of detection spread at which the blend reaches `beta = 0.5`.
const BLEND_HALF_SECS: f64 = 0.5;

/// Trilateration determinant tolerance, relative to the magnitude of its two
/// products: `|det| <= 1e-9 · (|a00·a11| + |a01·a10|)` counts as collinear.
const DEGENERACY_EPS: f64 = 1e-9;

/// Below this the range equation is linear rather than quadratic.
const LINEAR_EPS: f64 = 1e-12;

/// Result of [`estimate_epicenter`], with the intermediate points kept for
/// inspection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpicenterFit {
    pub epicenter: Point,
    pub centroid:  Point,
    pub weighted:  Point,
    /// Blend factor in `[0, 1)`: 0 trusts the centroid, →1 the weighted point.
    pub beta:      f64,
}

/// Detection times relative to the earliest report.
fn relative_secs(reports: &[DetectionReport]) -> Vec<f64> {
    let t_min = reports
        .iter()
        .map(|r| r.detected_at)
        .fold(f64::INFINITY, f64::min);
    reports.iter().map(|r| r.detected_at - t_min).collect()
}

/// Early-detector weight: 1 for the earliest, decaying with lag.
#[inline]
fn weight(rel_secs: f64) -> f64 {
    1.0 / (1.0 + rel_secs)
}

/// Blend the unweighted centroid with the time-weighted mean of positions.
///
/// # Errors
///
/// [`LocateError::Incomplete`] for an empty slice.
pub fn estimate_epicenter(reports: &[DetectionReport]) -> LocateResult<EpicenterFit> {
    let positions: Vec<Point> = reports.iter().map(|r| r.position).collect();
    let centroid = Point::centroid(&positions).ok_or(LocateError::Incomplete { got: 0, need: 1 })?;

    let rel = relative_secs(reports);
    let weights: Vec<f64> = rel.iter().map(|&r| weight(r)).collect();
    let w_sum: f64 = weights.iter().sum();
    let w_sum = if w_sum > 0.0 { w_sum } else { 1.0 };

    let (wx, wy) = positions
        .iter()
        .zip(&weights)
        .fold((0.0, 0.0), |(sx, sy), (p, w)| (sx + p.x * w, sy + p.y * w));
    let weighted = Point::new(wx / w_sum, wy / w_sum);

    let max_rel = rel.iter().copied().fold(0.0, f64::max);
    let beta = (max_rel / (max_rel + BLEND_HALF_SECS)).min(1.0);

    Ok(EpicenterFit {
        epicenter: centroid.lerp(weighted, beta),
        centroid,
        weighted,
        beta,
    })
}

/// Estimate the current disturbance extent, in pixels, around `epicenter`.
///
/// Each report contributes its distance from the epicentre (km) plus how far
/// the front travelled since that report, extrapolated from the velocity and
/// acceleration the detector observed.  Contributions use the same
/// early-detector weights as [`estimate_epicenter`]; the weighted mean is
/// doubled and converted back to pixels.  Returns `None` for an empty slice
/// or a non-positive scale.
pub fn estimate_radius(reports: &[DetectionReport], epicenter: Point, km_to_px: f64) -> Option<f64> {
    if reports.is_empty() || !(km_to_px.is_finite() && km_to_px > 0.0) {
        return None;
    }
    let rel = relative_secs(reports);
    let t_ref = reports
        .iter()
        .map(|r| r.detected_at)
        .fold(f64::NEG_INFINITY, f64::max);

    let (sum, w_sum) = reports.iter().zip(&rel).fold((0.0, 0.0), |(sum, w_sum), (r, &rel)| {
        let dist_km = r.position.distance(epicenter) / km_to_px;
        let lag = t_ref - r.detected_at;
        let v = r.velocity_km_s.unwrap_or(0.0);
        let a = r.accel_km_s2.unwrap_or(0.0);
        let reach_km = (dist_km + v * lag + 0.5 * a * lag * lag).max(0.0);
        let w = weight(rel);
        (sum + reach_km * w, w_sum + w)
    });

    let radius = 2.0 * (sum / w_sum) * km_to_px;
    radius.is_finite().then_some(radius)
}

/// Trilateration from time differences of arrival.
///
/// The earliest of the first three reports is the reference detector `p0`
/// with unknown range `r0`; every other detector sits at
/// `|X - p_i| = r0 + v·Δt_i`.  Subtracting the reference circle leaves a 2×2
/// linear system whose solution is affine in `r0`,
/// `X = X_b + r0·X_c`, and substituting back into `|X - p0| = r0` gives a
/// quadratic in `r0`.  Of its non-negative roots the smaller one is taken,
/// i.e. the source nearest the first detector.
///
/// # Errors
///
/// - [`LocateError::Incomplete`] with fewer than three reports.
/// - [`LocateError::Degenerate`] when the detectors are collinear.
/// - [`LocateError::Inconsistent`] when no non-negative `r0` exists.
pub fn trilaterate(reports: &[DetectionReport], speed_px_per_s: f64) -> LocateResult<Point> {
    if reports.len() < 3 {
        return Err(LocateError::Incomplete { got: reports.len(), need: 3 });
    }
    let mut reports = [reports[0], reports[1], reports[2]];
    reports.sort_by(|a, b| a.detected_at.total_cmp(&b.detected_at));
    let [p0, p1, p2] = reports.map(|r| r.position);
    let lag = |r: &DetectionReport| speed_px_per_s * (r.detected_at - reports[0].detected_at);
    let (l1, l2) = (lag(&reports[1]), lag(&reports[2]));

    let a00 = 2.0 * (p1.x - p0.x);
    let a01 = 2.0 * (p1.y - p0.y);
    let a10 = 2.0 * (p2.x - p0.x);
    let a11 = 2.0 * (p2.y - p0.y);

    let determinant = a00 * a11 - a01 * a10;
    let scale = (a00 * a11).abs() + (a01 * a10).abs();
    if determinant.abs() <= DEGENERACY_EPS * scale || !determinant.is_finite() {
        return Err(LocateError::Degenerate { determinant });
    }
    let solve = |b0: f64, b1: f64| {
        Point::new(
            (b0 * a11 - a01 * b1) / determinant,
            (a00 * b1 - b0 * a10) / determinant,
        )
    };

    // A·X = b - r0·c with b_i = |p_i|² - |p0|² - l_i², c_i = 2·l_i.
    let sq = |q: Point| q.x * q.x + q.y * q.y;
    let x_b = solve(sq(p1) - sq(p0) - l1 * l1, sq(p2) - sq(p0) - l2 * l2);
    let x_c = solve(-2.0 * l1, -2.0 * l2);

    // |X_b - p0 + r0·X_c|² = r0²
    let (dx, dy) = (x_b.x - p0.x, x_b.y - p0.y);
    let qa = sq(x_c) - 1.0;
    let qb = 2.0 * (dx * x_c.x + dy * x_c.y);
    let qc = dx * dx + dy * dy;

    let r0 = if qa.abs() < LINEAR_EPS {
        (qb != 0.0).then(|| -qc / qb).filter(|r| *r >= 0.0)
    } else {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc < 0.0 {
            None
        } else {
            let root = disc.sqrt();
            [(-qb - root) / (2.0 * qa), (-qb + root) / (2.0 * qa)]
                .into_iter()
                .filter(|r| *r >= 0.0 && r.is_finite())
                .min_by(f64::total_cmp)
        }
    };
    let r0 = r0.ok_or(LocateError::Inconsistent)?;
    Ok(Point::new(x_b.x + r0 * x_c.x, x_b.y + r0 * x_c.y))
}
