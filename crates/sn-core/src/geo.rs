//! Planar geometry shared by every component.
//!
//! All positions are viewport pixels with the origin at the top-left corner,
//! `x` growing right and `y` growing down.  Kilometre quantities are
//! converted at the edges using `SimConfig::km_to_px`.

use std::fmt;

/// A 2-D position in viewport pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        hypot(other.x - self.x, other.y - self.y)
    }

    /// Linear interpolation: `self * (1 - t) + other * t`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x * (1.0 - t) + other.x * t,
            y: self.y * (1.0 - t) + other.y * t,
        }
    }

    /// Unweighted mean of `points`.  `None` for an empty slice.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Length of the hypotenuse of a right triangle with legs `w` and `h`.
#[inline]
pub fn hypot(w: f64, h: f64) -> f64 {
    (w * w + h * h).sqrt()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The rectangular area the sensor network covers, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width:  f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The larger of width and height.
    #[inline]
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }

    /// `true` when both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// `true` if `p` lies inside the rectangle shrunk by `margin` on every edge
    /// (edges inclusive).
    #[inline]
    pub fn contains_inset(&self, p: Point, margin: f64) -> bool {
        margin <= p.x && p.x <= self.width - margin && margin <= p.y && p.y <= self.height - margin
    }

    /// Distance from `from` to the farthest viewport corner, with every corner
    /// pushed `offset` pixels further out.
    pub fn max_corner_distance(&self, from: Point, offset: f64) -> f64 {
        let corners = [
            Point::new(-offset, -offset),
            Point::new(-offset, self.height + offset),
            Point::new(self.width + offset, -offset),
            Point::new(self.width + offset, self.height + offset),
        ];
        corners
            .iter()
            .map(|&c| from.distance(c))
            .fold(0.0, f64::max)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(700.0, 700.0)
    }
}
