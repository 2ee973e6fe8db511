// https://github.com/sstadick/rust-lapper/blob/7e3904daed85181f1faa39b15f51935f13945976/src/lib.rs#L92
use num_traits::{PrimInt, Unsigned};
use std::cmp::Ordering;

/// Represent a range from [start, end]
/// Inclusive start, inclusive end (1-based genome coordinates)
#[derive(Eq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub fn new(start: I, end: I, val: T) -> Self {
        Interval { start, end, val }
    }

    /// Check if two closed intervals share at least one base
    #[inline]
    pub fn overlap(&self, start: I, end: I) -> bool {
        self.start <= end && self.end >= start
    }

    /// Check if `other` lies fully within this interval
    #[inline]
    pub fn contains(&self, other: &Interval<I, T>) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Order used by the interval engines: start ascending, then end
    /// descending, so an interval sorts before the ones it contains.
    #[inline]
    pub fn nesting_cmp(&self, other: &Interval<I, T>) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.end.cmp(&self.end))
    }
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}
