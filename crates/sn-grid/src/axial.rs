//! Axial hex coordinates and the six-direction adjacency table.

use std::fmt;
use std::str::FromStr;

use sn_core::Point;

use crate::GridError;

const ROOT_THREE: f64 = 1.732_050_807_568_877_2;

// ── Axial ─────────────────────────────────────────────────────────────────────

/// Hex-grid address `(q, r)`.  The registry key form is `"q,r"`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    #[inline]
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cartesian position of this cell for a grid centred on `center`:
    ///
    /// ```text
    /// x = cx + s * (q + r/2)
    /// y = cy + s * (√3 * r / 2)
    /// ```
    #[inline]
    pub fn to_pixel(self, spacing_px: f64, center: Point) -> Point {
        let q = self.q as f64;
        let r = self.r as f64;
        Point::new(
            center.x + spacing_px * (q + r / 2.0),
            center.y + spacing_px * (ROOT_THREE * r / 2.0),
        )
    }

    /// The adjacent cell in direction `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Axial {
        let (dq, dr) = dir.offset();
        Axial::new(self.q + dq, self.r + dr)
    }

    /// Registry key, `"q,r"`.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for Axial {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || GridError::MalformedKey(s.to_owned());
        let (q, r) = s.split_once(',').ok_or_else(bad)?;
        let q = q.trim().parse().map_err(|_| bad())?;
        let r = r.trim().parse().map_err(|_| bad())?;
        Ok(Axial::new(q, r))
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the six axial neighbor directions.
///
/// The declaration order is the linking order and the index into a node's
/// neighbor array; it must not change.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    NW,
    NE,
    W,
    E,
    SW,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NW,
        Direction::NE,
        Direction::W,
        Direction::E,
        Direction::SW,
        Direction::SE,
    ];

    /// `(dq, dr)` step for this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NW => (0, -1),
            Direction::NE => (1, -1),
            Direction::W  => (-1, 0),
            Direction::E  => (1, 0),
            Direction::SW => (-1, 1),
            Direction::SE => (0, 1),
        }
    }

    /// The direction pointing back along the same edge.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::NW => Direction::SE,
            Direction::NE => Direction::SW,
            Direction::W  => Direction::E,
            Direction::E  => Direction::W,
            Direction::SW => Direction::NE,
            Direction::SE => Direction::NW,
        }
    }

    /// Position in [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::NW => "NW",
            Direction::NE => "NE",
            Direction::W  => "W",
            Direction::E  => "E",
            Direction::SW => "SW",
            Direction::SE => "SE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
