//! Conversion between geographic [`Bounds`] and the fixed-point [`Rect`] grid.
//!
//! x is longitude and y is latitude. Conversions snap to the grid: requested areas round
//! outward so nothing requested is lost, covered areas round inward so coverage is never
//! overstated.

use crate::bounds::Bounds;
use crate::error::FetchError;
use crate::rect::{Rect, WORLD_BOUND};
use std::fmt;
use std::str::FromStr;

/// Values closer than this to a grid line are treated as lying on it.
const SNAP_EPSILON: f64 = 1e-6;

/// Fixed-point grid that geographic coordinates are snapped to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordinateDomain {
    /// 1e-7 degree units, the precision OSM stores coordinates with
    #[default]
    Osm,
    /// 1e-6 degree units
    Micro,
}

impl CoordinateDomain {
    /// Grid units per degree
    #[inline]
    pub const fn units_per_degree(self) -> f64 {
        match self {
            CoordinateDomain::Osm => 1e7,
            CoordinateDomain::Micro => 1e6,
        }
    }

    /// Name accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            CoordinateDomain::Osm => "osm",
            CoordinateDomain::Micro => "micro",
        }
    }

    /// Converts an area that must be fully fetched, rounding outward.
    ///
    /// # Example
    /// ```
    /// use regionfetch::{Bounds, CoordinateDomain, Rect};
    /// let b = Bounds::new(0.0, -1.0, 1.0, 2.0).unwrap();
    /// let r = CoordinateDomain::Micro.to_rect_outer(&b);
    /// assert_eq!(r, Rect::new(-1_000_000, 0, 2_000_000, 1_000_000));
    /// ```
    pub fn to_rect_outer(self, bounds: &Bounds) -> Rect {
        Rect::new(
            self.to_grid(bounds.min_lon(), f64::floor),
            self.to_grid(bounds.min_lat(), f64::floor),
            self.to_grid(bounds.max_lon(), f64::ceil),
            self.to_grid(bounds.max_lat(), f64::ceil),
        )
    }

    /// Converts an area that is already present, rounding inward.
    ///
    /// The result may be invalid when the bounds are thinner than one grid unit.
    pub fn to_rect_inner(self, bounds: &Bounds) -> Rect {
        Rect::new(
            self.to_grid(bounds.min_lon(), f64::ceil),
            self.to_grid(bounds.min_lat(), f64::ceil),
            self.to_grid(bounds.max_lon(), f64::floor),
            self.to_grid(bounds.max_lat(), f64::floor),
        )
    }

    /// Converts a valid grid rectangle back to degrees. Returns `None` for invalid rectangles.
    pub fn to_bounds(self, rect: &Rect) -> Option<Bounds> {
        if !rect.is_valid() {
            return None;
        }
        let scale = self.units_per_degree();
        Bounds::new(
            rect.min_y() as f64 / scale,
            rect.min_x() as f64 / scale,
            rect.max_y() as f64 / scale,
            rect.max_x() as f64 / scale,
        )
        .ok()
    }

    fn to_grid(self, degrees: f64, round: fn(f64) -> f64) -> i64 {
        let v = degrees * self.units_per_degree();
        let nearest = v.round();
        let snapped = if (v - nearest).abs() < SNAP_EPSILON {
            nearest
        } else {
            round(v)
        };
        snapped.clamp(-(WORLD_BOUND as f64), WORLD_BOUND as f64) as i64
    }
}

impl FromStr for CoordinateDomain {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "osm" | "e7" => Ok(CoordinateDomain::Osm),
            "micro" | "e6" => Ok(CoordinateDomain::Micro),
            _ => Err(FetchError::UnknownDomain {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CoordinateDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
