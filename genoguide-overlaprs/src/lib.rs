//! Interval analytics over sorted, per-chromosome interval collections.
//!
//! Everything here works one chromosome at a time: records are first grouped
//! into a [`MultiChromIntervals`], which sorts each chromosome's intervals by
//! start (ties by end, descending), and the engines then walk those sorted
//! slices.
//!
//! - [`sweep`]: existence-only overlap counting between two interval sets,
//!   linear after sorting
//! - [`nested`]: pairs of intervals where one lies fully inside another
//!
//! ## Quick Start
//!
//! ```rust
//! use genoguide_overlaprs::{MultiChromIntervals, sweep::overlap_counts};
//! use genoguide_core::models::Interval;
//!
//! let islands = MultiChromIntervals::from_intervals(vec![
//!     (1, Interval::new(11000u32, 12000, ())),
//!     (1, Interval::new(50000, 51000, ())),
//! ]).unwrap();
//! let genes = MultiChromIntervals::from_intervals(vec![
//!     (1, Interval::new(11869u32, 14409, ())),
//! ]).unwrap();
//!
//! let counts = overlap_counts(&islands, &genes);
//! assert_eq!(counts.overlapping, 1);
//! assert_eq!(counts.non_overlapping, 1);
//! ```

pub mod multi_chrom;
pub mod nested;
pub mod sweep;
pub mod traits;

pub use self::multi_chrom::{MultiChromIntervals, MultiChromIntervalsError};
pub use self::nested::{NestedPair, find_nested};
pub use self::sweep::{OverlapCounts, overlap_counts};
pub use self::traits::GenomicFeature;
pub use genoguide_core::models::Interval;
