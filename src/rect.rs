//! Axis-aligned rectangle algebra on fixed-point integer coordinates.
//!
//! A [`Rect`] is the half-open product `[min_x, max_x) × [min_y, max_y)`. Like [`Interval`],
//! an empty rectangle is a value and not an error; `intersection` of disjoint rectangles,
//! for example, simply returns a rectangle for which `is_valid()` is false.
//!
//! The set operations (`inverse`, `subtract`, `subtract_all`) are exact: they never round
//! and their fragments are pairwise disjoint.

use crate::interval::Interval;
use std::fmt;

/// Bound of the implicit universe used by [`Rect::inverse`].
///
/// Coordinates are expected to lie within `[-WORLD_BOUND, WORLD_BOUND)`. The bound keeps every
/// area, and the sum of two areas, inside `i128`. Rectangles beyond it are still accepted; their
/// areas and area sums saturate instead of overflowing.
pub const WORLD_BOUND: i64 = 1 << 61;

/// Rectangle `[min_x, max_x) × [min_y, max_y)`, stored as an x and a y [`Interval`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub(crate) x: Interval,
    pub(crate) y: Interval,
}

impl Rect {
    /// The whole coordinate universe
    pub const UNIVERSE: Rect = Rect::new(-WORLD_BOUND, -WORLD_BOUND, WORLD_BOUND, WORLD_BOUND);

    /// Creates a rectangle from its corners
    ///
    /// # Arguments
    /// * `min_x` - Left edge (inclusive)
    /// * `min_y` - Bottom edge (inclusive)
    /// * `max_x` - Right edge (exclusive)
    /// * `max_y` - Top edge (exclusive)
    ///
    /// # Example
    /// ```
    /// use regionfetch::Rect;
    /// let r = Rect::new(0, 0, 2, 3);
    /// assert_eq!(r.area(), 6);
    /// ```
    #[inline]
    pub const fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            x: Interval::new(min_x, max_x),
            y: Interval::new(min_y, max_y),
        }
    }

    /// Creates a rectangle from its x and y intervals
    #[inline]
    pub const fn from_intervals(x: Interval, y: Interval) -> Self {
        Self { x, y }
    }

    /// x extent
    #[inline]
    pub const fn x(&self) -> Interval {
        self.x
    }

    /// y extent
    #[inline]
    pub const fn y(&self) -> Interval {
        self.y
    }

    /// Left edge, inclusive
    #[inline]
    pub const fn min_x(&self) -> i64 {
        self.x.min
    }

    /// Bottom edge, inclusive
    #[inline]
    pub const fn min_y(&self) -> i64 {
        self.y.min
    }

    /// Right edge, exclusive
    #[inline]
    pub const fn max_x(&self) -> i64 {
        self.x.max
    }

    /// Top edge, exclusive
    #[inline]
    pub const fn max_y(&self) -> i64 {
        self.y.max
    }

    /// Returns true iff both component intervals are valid.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Area of the rectangle, 0 when invalid.
    ///
    /// Saturates at `i128::MAX` for spans larger than [`Rect::UNIVERSE`].
    #[inline]
    pub fn area(&self) -> i128 {
        if self.is_valid() {
            self.x.len().saturating_mul(self.y.len())
        } else {
            0
        }
    }

    /// Returns true iff the rectangles share a region of positive area.
    ///
    /// Rectangles touching along an edge or at a corner do not intersect.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Rect;
    /// assert!(Rect::new(0, 0, 2, 2).intersects(&Rect::new(1, 1, 3, 3)));
    /// assert!(!Rect::new(0, 0, 1, 1).intersects(&Rect::new(1, 1, 2, 2)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y)
    }

    /// Returns true iff `other` lies completely inside `self`.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_valid()
            && self.x.min <= other.x.min
            && other.x.max <= self.x.max
            && self.y.min <= other.y.min
            && other.y.max <= self.y.max
    }

    /// Returns true iff the point `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains_point(&self, x: i64, y: i64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }

    /// Component-wise intersection. Invalid when the rectangles do not overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::from_intervals(self.x.intersection(&other.x), self.y.intersection(&other.y))
    }

    /// Bounding rectangle of both operands.
    ///
    /// Not a geometric union: the result may cover area that neither operand covers.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Rect;
    /// let hull = Rect::new(0, 0, 1, 1).union(&Rect::new(1, 1, 2, 2));
    /// assert_eq!(hull, Rect::new(0, 0, 2, 2));
    /// ```
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_intervals(self.x.union(&other.x), self.y.union(&other.y))
    }

    /// Complement of the rectangle inside [`Rect::UNIVERSE`].
    ///
    /// Returns up to four disjoint rectangles: the full-height strips left and right of
    /// `self`, and the parts of the middle column below and above it. The complement of an
    /// invalid rectangle is the whole universe.
    pub fn inverse(&self) -> Vec<Rect> {
        if !self.is_valid() {
            return vec![Rect::UNIVERSE];
        }
        let u = Rect::UNIVERSE;
        let column = self.x.intersection(&u.x);
        let parts = [
            Rect::new(u.x.min, u.y.min, self.x.min, u.y.max),
            Rect::new(self.x.max, u.y.min, u.x.max, u.y.max),
            Rect::from_intervals(column, Interval::new(u.y.min, self.y.min)),
            Rect::from_intervals(column, Interval::new(self.y.max, u.y.max)),
        ];
        parts.into_iter().filter(Rect::is_valid).collect()
    }

    /// Exact difference `self − other` as up to four pairwise-disjoint fragments.
    ///
    /// The fragments are the parts of `self` left and right of the overlap (full height of
    /// `self`), then below and above it (width of the overlap). Returns `[self]` when the
    /// rectangles do not intersect and nothing when `other` covers `self`.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Rect;
    /// let parts = Rect::new(0, 0, 3, 1).subtract(&Rect::new(1, 0, 2, 1));
    /// assert_eq!(parts, vec![Rect::new(0, 0, 1, 1), Rect::new(2, 0, 3, 1)]);
    /// ```
    pub fn subtract(&self, other: &Rect) -> Vec<Rect> {
        let mut out = Vec::with_capacity(4);
        self.subtract_into(other, &mut out);
        out
    }

    fn subtract_into(&self, other: &Rect, out: &mut Vec<Rect>) {
        if !self.is_valid() {
            return;
        }
        if !self.intersects(other) {
            out.push(*self);
            return;
        }
        let overlap = self.intersection(other);
        let parts = [
            Rect::new(self.x.min, self.y.min, overlap.x.min, self.y.max),
            Rect::new(overlap.x.max, self.y.min, self.x.max, self.y.max),
            Rect::new(overlap.x.min, self.y.min, overlap.x.max, overlap.y.min),
            Rect::new(overlap.x.min, overlap.y.max, overlap.x.max, self.y.max),
        ];
        out.extend(parts.into_iter().filter(Rect::is_valid));
    }

    /// Exact difference of `self` and every rectangle in `others`.
    ///
    /// Subtracts each rectangle in turn from all fragments produced so far. The resulting
    /// fragments are pairwise disjoint, none intersects any of `others`, and each one lies
    /// inside `self`. The covered point set does not depend on the order of `others`.
    ///
    /// # Example
    /// ```
    /// use regionfetch::Rect;
    /// let covered = [Rect::new(0, 0, 1, 1), Rect::new(2, 0, 3, 1)];
    /// let gaps = Rect::new(0, 0, 3, 1).subtract_all(&covered);
    /// assert_eq!(gaps, vec![Rect::new(1, 0, 2, 1)]);
    /// ```
    pub fn subtract_all<'a, I>(&self, others: I) -> Vec<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let mut fragments = if self.is_valid() { vec![*self] } else { Vec::new() };
        let mut next = Vec::new();
        for other in others {
            if fragments.is_empty() {
                break;
            }
            next.clear();
            for fragment in &fragments {
                fragment.subtract_into(other, &mut next);
            }
            std::mem::swap(&mut fragments, &mut next);
        }
        fragments
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.x, self.y)
    }
}
