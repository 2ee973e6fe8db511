//! Descriptive statistics for a reference genome.
//!
//! Engines (compute only, no I/O):
//!
//! - [`composition`]: base counts, GC content, dinucleotide and CpG frequency
//! - [`motifs`]: regex scan for simple sequence repeats
//! - [`density`]: fixed-width binning of gene starts
//! - [`association`]: CpG island / gene overlap and nested genes
//! - [`correlation`], [`rna`], [`ssr_stats`]: annotation summaries
//!
//! [`analysis::Analysis`] ties each engine to the records it needs and the
//! statistic names it produces.
//!
//! # Example
//!
//! ```no_run
//! use genoguide_core::io::{GenomeFiles, load_genome};
//! use genoguide_genomicdist::{Analysis, AnalysisConfig};
//!
//! let files = GenomeFiles {
//!     fasta: "hg38.fa.gz".into(),
//!     ..Default::default()
//! };
//! let genome = load_genome(&files).unwrap();
//!
//! let stats = Analysis::BaseComposition
//!     .run(&genome, &AnalysisConfig::default())
//!     .unwrap();
//! ```

pub mod analysis;
pub mod association;
pub mod composition;
pub mod config;
pub mod correlation;
pub mod density;
pub mod errors;
pub mod models;
pub mod motifs;
pub mod parallel;
pub mod rna;
pub mod ssr_stats;
pub mod utils;

// re-exports
pub use analysis::{Analysis, Input};
pub use config::AnalysisConfig;
pub use errors::{GenomicDistError, GenomicDistResult, MotifError};
pub use models::Statistic;
