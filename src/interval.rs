//! Half-open 1D interval over fixed-point integer coordinates.
//!
//! An `Interval` with `min >= max` is not an error: it is an empty (invalid) value that
//! every operation accepts and propagates. Check [`Interval::is_valid`] before trusting it.

use std::cmp::{max, min};
use std::fmt;

/// Half-open range `[min, max)` of `i64` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub(crate) min: i64,
    pub(crate) max: i64,
}

impl Interval {
    /// Creates an interval.
    ///
    /// Inverted or degenerate bounds are allowed and yield an invalid interval.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Interval;
    /// assert!(Interval::new(0, 1).is_valid());
    /// assert!(!Interval::new(1, 1).is_valid());
    /// ```
    #[inline]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Inclusive lower bound
    #[inline]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Exclusive upper bound
    #[inline]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Returns true iff `min < max`.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Length of the interval, 0 when invalid.
    ///
    /// Computed in `i128` so that intervals spanning the whole universe do not overflow.
    #[inline]
    pub fn len(&self) -> i128 {
        if self.is_valid() {
            self.max as i128 - self.min as i128
        } else {
            0
        }
    }

    /// Returns true iff the interval holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Returns true iff `min <= v < max`.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Interval;
    /// let i = Interval::new(0, 1);
    /// assert!(i.contains(0));
    /// assert!(!i.contains(1));
    /// ```
    #[inline]
    pub fn contains(&self, v: i64) -> bool {
        self.min <= v && v < self.max
    }

    /// Returns true iff both intervals are valid and share at least one value.
    ///
    /// Touching intervals such as `[0, 1)` and `[1, 2)` do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.is_valid() && other.is_valid() && self.min < other.max && other.min < self.max
    }

    /// Overlap of the two intervals. The result is invalid when they do not overlap.
    #[inline]
    pub fn intersection(&self, other: &Interval) -> Interval {
        Interval::new(max(self.min, other.min), min(self.max, other.max))
    }

    /// Minimal interval enclosing both operands.
    ///
    /// This is a hull, not a set union: disjoint inputs produce an interval spanning the gap.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Interval;
    /// assert_eq!(Interval::new(0, 1).union(&Interval::new(2, 3)), Interval::new(0, 3));
    /// ```
    #[inline]
    pub fn union(&self, other: &Interval) -> Interval {
        Interval::new(min(self.min, other.min), max(self.max, other.max))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}
