//! Genome-wide interval collections, grouped and sorted per chromosome.
//!
//! # Examples
//!
//! ```
//! use genoguide_overlaprs::MultiChromIntervals;
//! use genoguide_core::models::{Gene, Strand};
//!
//! let genes = vec![Gene {
//!     id: 1,
//!     chromosome_id: 1,
//!     gene_id: "ENSG00000223972".to_string(),
//!     gene_name: Some("DDX11L1".to_string()),
//!     start: 11869,
//!     end: 14409,
//!     strand: Strand::Plus,
//! }];
//!
//! let by_chrom = MultiChromIntervals::from_features(&genes, |g: &Gene| g.label().to_string())
//!     .unwrap();
//! assert_eq!(by_chrom.get(1).unwrap()[0].val, "DDX11L1");
//! ```

use std::collections::BTreeMap;
use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned};
use thiserror::Error;

use genoguide_core::models::Interval;

use crate::traits::GenomicFeature;

/// Errors that can occur when building a [`MultiChromIntervals`].
#[derive(Debug, Error)]
pub enum MultiChromIntervalsError {
    #[error("Invalid interval on chromosome {chromosome_id}: start {start} is after end {end}")]
    InvalidInterval {
        chromosome_id: u32,
        start: String,
        end: String,
    },
}

///
/// Intervals grouped by chromosome id. Within a chromosome intervals are
/// sorted by start ascending, ties broken by end descending, so an interval
/// always precedes every interval sharing its start that it contains.
///
#[derive(Debug, Clone)]
pub struct MultiChromIntervals<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    by_chrom: BTreeMap<u32, Vec<Interval<I, T>>>,
}

impl<I, T> MultiChromIntervals<I, T>
where
    I: PrimInt + Unsigned + Send + Sync + Debug,
    T: Eq + Clone + Send + Sync,
{
    /// Group `(chromosome_id, interval)` pairs. Fails on an interval whose
    /// start is after its end.
    pub fn from_intervals<It>(intervals: It) -> Result<Self, MultiChromIntervalsError>
    where
        It: IntoIterator<Item = (u32, Interval<I, T>)>,
    {
        let mut by_chrom: BTreeMap<u32, Vec<Interval<I, T>>> = BTreeMap::new();

        for (chromosome_id, interval) in intervals {
            if interval.start > interval.end {
                return Err(MultiChromIntervalsError::InvalidInterval {
                    chromosome_id,
                    start: format!("{:?}", interval.start),
                    end: format!("{:?}", interval.end),
                });
            }
            by_chrom.entry(chromosome_id).or_default().push(interval);
        }

        for chr_intervals in by_chrom.values_mut() {
            chr_intervals.sort_by(|a, b| a.nesting_cmp(b));
        }

        Ok(MultiChromIntervals { by_chrom })
    }

    /// Sorted intervals of one chromosome, `None` if it has none.
    pub fn get(&self, chromosome_id: u32) -> Option<&[Interval<I, T>]> {
        self.by_chrom.get(&chromosome_id).map(|v| v.as_slice())
    }

    /// Iterate chromosomes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Interval<I, T>])> {
        self.by_chrom.iter().map(|(id, v)| (*id, v.as_slice()))
    }

    pub fn chromosome_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_chrom.keys().copied()
    }

    /// Total number of intervals over all chromosomes.
    pub fn len(&self) -> usize {
        self.by_chrom.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chrom.is_empty()
    }
}

impl<T> MultiChromIntervals<u32, T>
where
    T: Eq + Clone + Send + Sync,
{
    /// Group annotation records, choosing the payload carried per interval.
    pub fn from_features<'a, R, F>(
        records: impl IntoIterator<Item = &'a R>,
        payload: F,
    ) -> Result<Self, MultiChromIntervalsError>
    where
        R: GenomicFeature + 'a,
        F: Fn(&R) -> T,
    {
        MultiChromIntervals::from_intervals(records.into_iter().map(|record| {
            (
                record.chromosome_id(),
                Interval::new(record.start(), record.end(), payload(record)),
            )
        }))
    }
}
