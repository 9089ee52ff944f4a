//! Closed integer intervals and interval arithmetic.
//!
//! Provides the [Interval] value type used throughout the index, and the
//! gap computation [Interval::subtract_all] that turns the per-position
//! exclusion scan of relationship queries into interval arithmetic.
//! The stabbing-query structure lives in [tree].

pub mod tree;

pub use tree::IntervalTree;

use std::fmt;

// =#========================================================================#=
// INTERVAL
// =#========================================================================#=
/// A closed integer interval `[first, last]`.
///
/// Both endpoints are included; a single point is `[p, p]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// Smallest position contained in this interval
    pub first: usize,
    /// Largest position contained in this interval
    pub last: usize,
}

impl Interval {
    /// Creates a new closed interval `[first, last]`.
    ///
    /// # Panics
    /// Panics if `first > last`.
    pub fn new(first: usize, last: usize) -> Self {
        assert!(first <= last, "Invalid interval [{first}, {last}]");
        Interval { first, last }
    }

    /// Creates the single-point interval `[p, p]`.
    pub fn point(p: usize) -> Self {
        Interval { first: p, last: p }
    }

    /// Returns the number of positions in this interval (at least 1).
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Returns `true` if `point` lies in this interval.
    pub fn contains(&self, point: usize) -> bool {
        self.first <= point && point <= self.last
    }

    /// Returns `true` if `other` is fully contained in this interval.
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.first <= other.first && other.last <= self.last
    }

    /// Returns `true` if this interval and `other` share at least one position.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    /// Grows this interval to contain `other`, returning the hull.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            first: self.first.min(other.first),
            last: self.last.max(other.last),
        }
    }

    /// Computes the maximal sub-intervals of `self` not covered by any
    /// interval in `excluded`.
    ///
    /// Excluded intervals may overlap each other, extend beyond `self`,
    /// or lie entirely outside it. The result is sorted and pairwise disjoint.
    ///
    /// # Example
    /// ```
    /// use orthodex::interval::Interval;
    ///
    /// let gaps = Interval::new(0, 10)
    ///     .subtract_all(&[Interval::new(2, 4), Interval::point(6)]);
    /// assert_eq!(
    ///     gaps,
    ///     vec![Interval::new(0, 1), Interval::point(5), Interval::new(7, 10)]
    /// );
    /// ```
    pub fn subtract_all(&self, excluded: &[Interval]) -> Vec<Interval> {
        let mut relevant: Vec<Interval> = excluded
            .iter()
            .filter(|e| e.overlaps(self))
            .copied()
            .collect();
        if relevant.is_empty() {
            return vec![*self];
        }
        relevant.sort();

        let mut gaps = Vec::new();
        let mut next_free = self.first;
        for e in relevant {
            if e.first > next_free {
                gaps.push(Interval::new(next_free, e.first - 1));
            }
            // e.last + 1 cannot overflow: e overlaps self, so e.last < usize::MAX
            next_free = next_free.max(e.last + 1);
            if next_free > self.last {
                return gaps;
            }
        }
        gaps.push(Interval::new(next_free, self.last));

        gaps
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
