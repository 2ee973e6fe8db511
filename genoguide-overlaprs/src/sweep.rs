//! Existence-only overlap counting with a sweep line.

use num_traits::{PrimInt, Unsigned};
use std::fmt::Debug;

use genoguide_core::models::Interval;

use crate::multi_chrom::MultiChromIntervals;

/// How many intervals of a query set touch at least one interval of a target set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapCounts {
    pub total: usize,
    pub overlapping: usize,
    pub non_overlapping: usize,
}

impl OverlapCounts {
    /// Share of overlapping query intervals, in percent. 0 when there are none.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.overlapping as f64 / self.total as f64 * 100.0
    }

    pub fn merge(self, other: OverlapCounts) -> OverlapCounts {
        OverlapCounts {
            total: self.total + other.total,
            overlapping: self.overlapping + other.overlapping,
            non_overlapping: self.non_overlapping + other.non_overlapping,
        }
    }
}

///
/// Count the intervals of `query` that overlap any interval of `target`.
/// Both slices must be sorted by start.
///
/// A single pointer into `target` only moves forward: intervals ending before
/// the current query start can never overlap a later query either. The scan is
/// linear in `query.len() + target.len()`.
///
pub fn count_overlapping<I, T, U>(query: &[Interval<I, T>], target: &[Interval<I, U>]) -> usize
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
    U: Eq + Clone + Send + Sync,
{
    let mut p = 0;
    let mut overlapping = 0;

    for q in query {
        while p < target.len() && target[p].end < q.start {
            p += 1;
        }
        if p < target.len() && target[p].overlap(q.start, q.end) {
            overlapping += 1;
        }
    }

    overlapping
}

///
/// Overlap counts of `query` against `target`, chromosome by chromosome.
/// Query chromosomes missing from `target` contribute no overlaps.
///
pub fn overlap_counts<I, T, U>(
    query: &MultiChromIntervals<I, T>,
    target: &MultiChromIntervals<I, U>,
) -> OverlapCounts
where
    I: PrimInt + Unsigned + Send + Sync + Debug,
    T: Eq + Clone + Send + Sync,
    U: Eq + Clone + Send + Sync,
{
    query
        .iter()
        .map(|(chromosome_id, chr_query)| {
            let overlapping = match target.get(chromosome_id) {
                Some(chr_target) => count_overlapping(chr_query, chr_target),
                None => 0,
            };
            OverlapCounts {
                total: chr_query.len(),
                overlapping,
                non_overlapping: chr_query.len() - overlapping,
            }
        })
        .fold(OverlapCounts::default(), OverlapCounts::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn set(intervals: Vec<(u32, u32, u32)>) -> MultiChromIntervals<u32, ()> {
        MultiChromIntervals::from_intervals(
            intervals
                .into_iter()
                .map(|(chr, start, end)| (chr, Interval::new(start, end, ()))),
        )
        .unwrap()
    }

    #[rstest]
    fn test_island_overlapping_gene() {
        let islands = set(vec![(1, 11000, 12000)]);
        let genes = set(vec![(1, 11869, 14409)]);

        let counts = overlap_counts(&islands, &genes);
        assert_eq!(
            counts,
            OverlapCounts {
                total: 1,
                overlapping: 1,
                non_overlapping: 0
            }
        );
        assert_eq!(counts.percentage(), 100.0);
    }

    #[rstest]
    fn test_long_target_before_short_one() {
        // the first target spans every query; the pointer must not skip it
        let query = set(vec![(1, 50, 60), (1, 70, 80), (1, 500, 510)]);
        let target = set(vec![(1, 1, 100), (1, 2, 3)]);

        let counts = overlap_counts(&query, &target);
        assert_eq!(counts.overlapping, 2);
        assert_eq!(counts.non_overlapping, 1);
    }

    #[rstest]
    fn test_endpoints_touching_count_as_overlap() {
        let query = set(vec![(1, 10, 20), (1, 21, 29)]);
        let target = set(vec![(1, 20, 20), (1, 30, 40)]);
        assert_eq!(overlap_counts(&query, &target).overlapping, 1);
    }

    #[rstest]
    fn test_missing_chromosome_and_empty_query() {
        let query = set(vec![(1, 10, 20), (2, 10, 20)]);
        let target = set(vec![(1, 15, 16)]);
        let counts = overlap_counts(&query, &target);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.overlapping, 1);
        assert_eq!(counts.percentage(), 50.0);

        let empty = set(vec![]);
        let counts = overlap_counts(&empty, &target);
        assert_eq!(counts, OverlapCounts::default());
        assert_eq!(counts.percentage(), 0.0);
    }

    #[rstest]
    fn test_counting_is_idempotent() {
        let query = set(vec![(1, 1, 5), (1, 8, 12), (3, 4, 4)]);
        let target = set(vec![(1, 4, 9), (3, 1, 2)]);
        let first = overlap_counts(&query, &target);
        let second = overlap_counts(&query, &target);
        assert_eq!(first, second);
        assert!(first.overlapping <= first.total);
    }
}
