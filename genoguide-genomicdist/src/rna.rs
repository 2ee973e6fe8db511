//! Non-coding RNA counts and per-chromosome density.

use std::collections::{BTreeMap, HashMap};

use genoguide_core::source::RecordSource;

use crate::config::AnalysisConfig;
use crate::errors::GenomicDistResult;
use crate::models::{RnaChromosomeDensity, RnaDistribution};
use crate::utils::karyotype_ordered;

/// Every chromosome except the mitochondrial one gets a density row, with a
/// zero count when it carries no RNA.
pub fn rna_distribution<S>(source: &S, config: &AnalysisConfig) -> GenomicDistResult<RnaDistribution>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let rnas = source.non_coding_rnas()?;

    let mut counts_by_class: BTreeMap<String, usize> = BTreeMap::new();
    let mut counts_by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut counts_by_chrom: HashMap<u32, usize> = HashMap::new();
    for rna in rnas.iter() {
        *counts_by_class.entry(rna.rna_class.clone()).or_insert(0) += 1;
        *counts_by_type.entry(rna.rna_type.clone()).or_insert(0) += 1;
        *counts_by_chrom.entry(rna.chromosome_id).or_insert(0) += 1;
    }

    let chromosome_distribution = karyotype_ordered(&source.chromosomes()?)
        .into_iter()
        .filter(|c| !filter.is_mitochondrial(&c.name))
        .map(|c| {
            let count = counts_by_chrom.get(&c.id).copied().unwrap_or(0);
            let (density_per_bp, density_per_mb) = match c.length {
                0 => (0.0, 0.0),
                len => (
                    count as f64 / len as f64,
                    count as f64 / (len as f64 / 1_000_000.0),
                ),
            };
            RnaChromosomeDensity {
                chromosome: c.name,
                count,
                density_per_bp,
                density_per_mb,
            }
        })
        .collect();

    Ok(RnaDistribution {
        counts_by_class,
        counts_by_type,
        chromosome_distribution,
        total_rnas: rnas.len(),
    })
}
