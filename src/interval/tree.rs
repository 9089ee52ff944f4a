//! Centered interval tree for stabbing queries.
//!
//! Built once from a finite set of closed intervals; answers
//! "all intervals containing point x" in O(log N + k). Balanced by value
//! range rather than interval count: each node covers the midpoint of the
//! span of its interval set, stores the intervals overlapping that midpoint,
//! and recurses into the sets entirely left and right of it.

use crate::interval::Interval;

// =#========================================================================#=
// INTERVAL TREE
// =#========================================================================#=
/// A node of the centered interval tree.
///
/// Intervals overlapping the node's midpoint are stored twice: ascending by
/// left endpoint and ascending by right endpoint. The two orders allow the
/// stab query to scan from the cheap end and terminate early.
#[derive(Debug, Clone)]
pub struct IntervalTree {
    /// Midpoint of the value range covered by this node's interval set
    mid: usize,
    /// Intervals overlapping `mid`, ascending by `first`
    by_first: Vec<Interval>,
    /// Intervals overlapping `mid`, ascending by `last`
    by_last: Vec<Interval>,
    /// Subtree for intervals entirely left of `mid`
    left: Option<Box<IntervalTree>>,
    /// Subtree for intervals entirely right of `mid`
    right: Option<Box<IntervalTree>>,
}

impl IntervalTree {
    /// Builds an interval tree from the given intervals.
    ///
    /// Returns `None` for an empty input set.
    pub fn build(intervals: &[Interval]) -> Option<IntervalTree> {
        if intervals.is_empty() {
            return None;
        }

        let lo = intervals.iter().map(|i| i.first).min().unwrap();
        let hi = intervals.iter().map(|i| i.last).max().unwrap();
        let mid = (lo + hi) / 2;

        let mut center = Vec::new();
        let mut left_set = Vec::new();
        let mut right_set = Vec::new();
        for &interval in intervals {
            if interval.last < mid {
                left_set.push(interval);
            } else if interval.first > mid {
                right_set.push(interval);
            } else {
                center.push(interval);
            }
        }

        let mut by_first = center.clone();
        by_first.sort_by_key(|i| i.first);
        let mut by_last = center;
        by_last.sort_by_key(|i| i.last);

        Some(IntervalTree {
            mid,
            by_first,
            by_last,
            left: IntervalTree::build(&left_set).map(Box::new),
            right: IntervalTree::build(&right_set).map(Box::new),
        })
    }

    /// Returns all indexed intervals containing `point`.
    ///
    /// Runs in O(log N + k) where k is the number of reported intervals.
    pub fn stab(&self, point: usize) -> Vec<Interval> {
        let mut hits = Vec::new();
        self.stab_into(point, &mut hits);
        hits
    }

    fn stab_into(&self, point: usize, hits: &mut Vec<Interval>) {
        if point == self.mid {
            // Every stored interval overlaps the midpoint
            hits.extend_from_slice(&self.by_first);
        } else if point < self.mid {
            if let Some(left) = &self.left {
                left.stab_into(point, hits);
            }
            // Stored intervals all reach at least `mid > point`, so only the
            // left endpoint decides; the sort makes the cut-off an early exit.
            for interval in &self.by_first {
                if interval.first <= point {
                    hits.push(*interval);
                } else {
                    break;
                }
            }
        } else {
            if let Some(right) = &self.right {
                right.stab_into(point, hits);
            }
            for interval in self.by_last.iter().rev() {
                if interval.last >= point {
                    hits.push(*interval);
                } else {
                    break;
                }
            }
        }
    }

    /// Returns the height of this tree (a single node has height 1).
    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |t| t.height());
        let right = self.right.as_ref().map_or(0, |t| t.height());
        1 + left.max(right)
    }

    /// Returns the total number of intervals stored in this tree.
    pub fn num_intervals(&self) -> usize {
        self.by_first.len()
            + self.left.as_ref().map_or(0, |t| t.num_intervals())
            + self.right.as_ref().map_or(0, |t| t.num_intervals())
    }
}
