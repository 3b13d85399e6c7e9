//! Bounded partition: reduce a set of rectangles to at most `N` covering rectangles.
//!
//! The optimizer is a greedy hierarchical merge. While more than `N` rectangles remain, the
//! pair whose bounding hull adds the least area is replaced by that hull. Every step keeps the
//! covered point set a superset of the input, so required coverage is never dropped.
//!
//! Each step scans all pairs of the `k` remaining rectangles, `O(k²)`, for `O(n³)` overall.
//!
//! **Tie-breaking**: the working set is kept sorted by `(min_x, min_y, max_x, max_y)` and pairs
//! are scanned as `(i, j)` with `i < j` in that order. The first pair with the strictly lowest
//! cost wins, so among equal-cost merges the one involving the lowest-ordered rectangles is taken.

use crate::error::{FetchError, Result};
use crate::rect::Rect;
use tracing::{debug, trace};

/// Extra area downloaded again if `a` and `b` are replaced by their bounding hull.
///
/// Negative when the two rectangles overlap.
#[inline]
pub fn merge_cost(a: &Rect, b: &Rect) -> i128 {
    a.union(b)
        .area()
        .saturating_sub(a.area().saturating_add(b.area()))
}

/// Total area of `output` beyond the total area of `input`.
///
/// Both totals saturate, so near-universe inputs give a clamped figure.
///
/// # Example
/// ```
/// use regionfetch::{partition::waste, Rect};
/// let input = [Rect::new(0, 0, 1, 1), Rect::new(1, 1, 2, 2)];
/// assert_eq!(waste(&input, &[Rect::new(0, 0, 2, 2)]), 2);
/// ```
pub fn waste(input: &[Rect], output: &[Rect]) -> i128 {
    let total = |rects: &[Rect]| {
        rects
            .iter()
            .map(Rect::area)
            .fold(0_i128, i128::saturating_add)
    };
    total(output).saturating_sub(total(input))
}

/// Reduces `rects` to at most `max_areas` rectangles covering the same points.
///
/// When `rects` already fits the budget it is returned unchanged. Otherwise invalid
/// rectangles and duplicates are dropped and the cheapest pair is merged until the budget
/// is met.
///
/// # Errors
/// [`FetchError::InvalidBudget`] when `max_areas` is 0.
///
/// # Example
/// ```
/// use regionfetch::{optimal_part, Rect};
/// let fragments = [Rect::new(0, 0, 1, 1), Rect::new(1, 0, 2, 1), Rect::new(10, 10, 11, 11)];
/// let merged = optimal_part(2, &fragments).unwrap();
/// assert_eq!(merged, vec![Rect::new(0, 0, 2, 1), Rect::new(10, 10, 11, 11)]);
/// ```
pub fn optimal_part(max_areas: usize, rects: &[Rect]) -> Result<Vec<Rect>> {
    if max_areas == 0 {
        return Err(FetchError::InvalidBudget { max_areas });
    }
    if rects.len() <= max_areas {
        return Ok(rects.to_vec());
    }

    let mut current: Vec<Rect> = rects.iter().copied().filter(Rect::is_valid).collect();
    current.sort_unstable_by_key(sort_key);
    current.dedup();

    let mut steps = 0_usize;
    while current.len() > max_areas {
        let (i, j, cost) = cheapest_pair(&current);
        let merged = current[i].union(&current[j]);
        trace!(step = steps, %cost, a = %current[i], b = %current[j], "Merging pair");

        // j > i, so removing j first keeps i in place
        current.remove(j);
        current.remove(i);
        let pos = current.partition_point(|r| sort_key(r) < sort_key(&merged));
        current.insert(pos, merged);
        steps += 1;
    }

    debug!(
        input = rects.len(),
        output = current.len(),
        steps,
        waste = %waste(rects, &current),
        "Bounded partition complete"
    );
    Ok(current)
}

#[inline]
fn sort_key(r: &Rect) -> (i64, i64, i64, i64) {
    (r.min_x(), r.min_y(), r.max_x(), r.max_y())
}

/// Pair `(i, j)`, `i < j`, with the lowest merge cost. Requires at least two rectangles.
fn cheapest_pair(rects: &[Rect]) -> (usize, usize, i128) {
    let mut best = (0, 1, i128::MAX);
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            let cost = merge_cost(&rects[i], &rects[j]);
            if cost < best.2 {
                best = (i, j, cost);
            }
        }
    }
    best
}
