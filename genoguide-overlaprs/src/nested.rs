//! Detection of intervals lying fully inside another interval.
//!
//! For every outer interval the scan walks forward through the start-sorted
//! intervals until one starts past the outer end. Dense annotations where
//! many intervals span a long outer interval degrade this to O(n^2) per
//! chromosome.

use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned};

use crate::multi_chrom::MultiChromIntervals;

/// An `inner` interval contained in an `outer` interval on one chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedPair<T> {
    pub inner: T,
    pub outer: T,
    pub chromosome_id: u32,
}

///
/// Every `(inner, outer)` pair where `outer.start <= inner.start` and
/// `inner.end <= outer.end`, reported once, in chromosome id order.
///
/// Intervals with identical coordinates are reported once, with the one
/// sorted first taken as outer.
///
pub fn find_nested<I, T>(intervals: &MultiChromIntervals<I, T>) -> Vec<NestedPair<T>>
where
    I: PrimInt + Unsigned + Send + Sync + Debug,
    T: Eq + Clone + Send + Sync,
{
    let mut pairs = Vec::new();

    for (chromosome_id, sorted) in intervals.iter() {
        for (i, outer) in sorted.iter().enumerate() {
            for inner in &sorted[i + 1..] {
                if inner.start > outer.end {
                    break;
                }
                if outer.contains(inner) {
                    pairs.push(NestedPair {
                        inner: inner.val.clone(),
                        outer: outer.val.clone(),
                        chromosome_id,
                    });
                }
            }
        }
    }

    pairs
}
