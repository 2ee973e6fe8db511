//! Core data model for genoguide.
//!
//! This crate holds the pieces every other genoguide crate depends on:
//!
//! - [`models`]: chromosomes, the generic [`Interval`](models::Interval), and
//!   the annotation records (genes, exons, UTRs, CpG islands, repeats, RNAs)
//! - [`source`]: the [`RecordSource`](source::RecordSource) query trait and its
//!   in-memory implementation
//! - [`io`]: loaders turning FASTA, GTF and UCSC table dumps into records
//! - [`utils`]: file readers, chromosome ordering and name lookup
//!
//! All coordinates are 1-based and inclusive.

pub mod errors;
pub mod io;
pub mod models;
pub mod source;
pub mod utils;

pub use errors::{RecordError, RecordResult};
pub use source::{GenomeRecords, RecordSource};
