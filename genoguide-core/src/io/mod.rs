//! Thin loaders that turn reference-genome flat files into records.
//!
//! - [`fasta`]: chromosome sequences
//! - [`gtf`]: genes, exons and UTRs
//! - [`ucsc`]: `cpgIslandExt`, `simpleRepeat` and `rmsk` table dumps
//!
//! Every loader accepts plain or gzip'd input.

pub mod fasta;
pub mod gtf;
pub mod ucsc;

use std::path::PathBuf;
use std::str::FromStr;

use log::info;

use crate::errors::{RecordError, RecordResult};
use crate::source::GenomeRecords;
use crate::utils::ChromosomeIndex;

/// Paths of the flat files making up one genome. Only the FASTA is required.
#[derive(Debug, Clone, Default)]
pub struct GenomeFiles {
    pub fasta: PathBuf,
    pub gtf: Option<PathBuf>,
    pub cpg_islands: Option<PathBuf>,
    pub simple_repeats: Option<PathBuf>,
    pub rmsk: Option<PathBuf>,
}

///
/// Load every file of a genome into an in-memory record store.
///
/// Annotation rows on chromosomes absent from the FASTA are dropped.
///
pub fn load_genome(files: &GenomeFiles) -> RecordResult<GenomeRecords> {
    let mut records = GenomeRecords::new();
    fasta::read_fasta_into(&files.fasta, &mut records)?;
    info!(
        "Loaded {} chromosomes from {}",
        records.chromosomes.len(),
        files.fasta.display()
    );

    let index = ChromosomeIndex::new(&records.chromosomes);

    if let Some(path) = &files.gtf {
        let model = gtf::read_gtf(path, &index)?;
        info!(
            "Loaded {} genes, {} exons, {} UTRs from {}",
            model.genes.len(),
            model.exons.len(),
            model.utrs.len(),
            path.display()
        );
        records.genes = model.genes;
        records.exons = model.exons;
        records.utrs = model.utrs;
    }

    if let Some(path) = &files.cpg_islands {
        records.cpg_islands = ucsc::read_cpg_islands(path, &index)?;
        info!(
            "Loaded {} CpG islands from {}",
            records.cpg_islands.len(),
            path.display()
        );
    }

    if let Some(path) = &files.simple_repeats {
        records.simple_repeats = ucsc::read_simple_repeats(path)?;
        info!(
            "Loaded {} simple repeats from {}",
            records.simple_repeats.len(),
            path.display()
        );
    }

    if let Some(path) = &files.rmsk {
        records.non_coding_rnas = ucsc::read_rmsk_rnas(path, &index)?;
        info!(
            "Loaded {} non-coding RNAs from {}",
            records.non_coding_rnas.len(),
            path.display()
        );
    }

    Ok(records)
}

/// Parse one tab-separated column, reporting the file and line on failure.
pub(crate) fn parse_column<T: FromStr>(
    fields: &[&str],
    idx: usize,
    column: &str,
    path: &str,
    line: usize,
) -> RecordResult<T> {
    let raw = fields.get(idx).ok_or_else(|| RecordError::MalformedRecord {
        path: path.to_string(),
        line,
        reason: format!("missing column {}", column),
    })?;
    raw.trim().parse::<T>().map_err(|_| RecordError::MalformedRecord {
        path: path.to_string(),
        line,
        reason: format!("can't parse {} from '{}'", column, raw),
    })
}

/// Like [`parse_column`] but an absent or unparseable value becomes `None`.
pub(crate) fn parse_optional_column<T: FromStr>(fields: &[&str], idx: usize) -> Option<T> {
    fields.get(idx).and_then(|raw| raw.trim().parse::<T>().ok())
}
