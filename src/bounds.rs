//! Geographic bounds in decimal degrees.

use crate::error::{FetchError, Result};
use std::fmt;

/// Latitude/longitude rectangle in decimal degrees.
///
/// Unlike [`crate::Rect`], `Bounds` is validated at construction: coordinates must be finite
/// and `min <= max` on both axes. A zero-size bounds is allowed (it has no area).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl Bounds {
    /// Creates bounds from the south-west and north-east corners
    ///
    /// # Errors
    /// [`FetchError::InvalidBounds`] for non-finite coordinates or a minimum above its maximum.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Bounds;
    /// let b = Bounds::new(0.0, -1.0, 1.0, 2.0).unwrap();
    /// assert_eq!(b.area(), 3.0);
    /// assert!(Bounds::new(1.0, 0.0, 0.0, 1.0).is_err());
    /// ```
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        let bounds = Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        };
        let finite = [min_lat, min_lon, max_lat, max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite || min_lat > max_lat || min_lon > max_lon {
            return Err(FetchError::InvalidBounds { bounds });
        }
        Ok(bounds)
    }

    /// Southern edge, in degrees
    #[inline]
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Western edge, in degrees
    #[inline]
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Northern edge, in degrees
    #[inline]
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Eastern edge, in degrees
    #[inline]
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Area in square degrees
    #[inline]
    pub fn area(&self) -> f64 {
        (self.max_lat - self.min_lat) * (self.max_lon - self.min_lon)
    }

    /// Returns true iff the two bounds overlap with positive area.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_lat < other.max_lat
            && other.min_lat < self.max_lat
            && self.min_lon < other.max_lon
            && other.min_lon < self.max_lon
    }

    /// Overlap of the two bounds, `None` when they do not intersect.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }
        Some(Bounds {
            min_lat: self.min_lat.max(other.min_lat),
            min_lon: self.min_lon.max(other.min_lon),
            max_lat: self.max_lat.min(other.max_lat),
            max_lon: self.max_lon.min(other.max_lon),
        })
    }

    /// Pads every side by `amount` times the span of its axis.
    ///
    /// # Errors
    /// [`FetchError::InvalidMargin`] when `amount` is negative or not finite, and
    /// [`FetchError::InvalidBounds`] when the padded bounds overflow to infinity.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Bounds;
    /// let b = Bounds::new(0.0, 0.0, 10.0, 20.0).unwrap();
    /// let e = b.extend(0.1).unwrap();
    /// assert_eq!(e, Bounds::new(-1.0, -2.0, 11.0, 22.0).unwrap());
    /// ```
    pub fn extend(&self, amount: f64) -> Result<Bounds> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(FetchError::InvalidMargin { margin: amount });
        }
        let d_lat = (self.max_lat - self.min_lat).abs() * amount;
        let d_lon = (self.max_lon - self.min_lon).abs() * amount;
        Bounds::new(
            self.min_lat - d_lat,
            self.min_lon - d_lon,
            self.max_lat + d_lat,
            self.max_lon + d_lon,
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
