//! Fixed-width binning of interval starts along each chromosome.

use std::collections::BTreeMap;

use genoguide_core::models::Gene;
use genoguide_core::source::RecordSource;

use crate::config::AnalysisConfig;
use crate::errors::GenomicDistResult;
use crate::models::GeneDensity;

///
/// Count interval starts per bin of `bin_size` bases along a chromosome of
/// `length` bases.
///
/// There are `ceil(length / bin_size)` bins, and always at least one. A start
/// past the last bin (an annotation running beyond the assembled sequence)
/// lands in the last bin, so the counts always sum to the number of starts.
///
pub fn bin_counts<It>(length: u32, bin_size: u32, starts: It) -> Vec<u64>
where
    It: IntoIterator<Item = u32>,
{
    let bin_size = bin_size.max(1) as u64;
    let num_bins = (length as u64).div_ceil(bin_size).max(1) as usize;
    let mut bins = vec![0u64; num_bins];

    for start in starts {
        let bin = ((start as u64 / bin_size) as usize).min(num_bins - 1);
        bins[bin] += 1;
    }

    bins
}

/// Gene starts per bin on every chromosome except the mitochondrial one.
pub fn gene_density<S>(source: &S, config: &AnalysisConfig) -> GenomicDistResult<GeneDensity>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let genes = source.genes()?;

    let mut starts_by_chrom: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for Gene {
        chromosome_id,
        start,
        ..
    } in genes.iter()
    {
        starts_by_chrom.entry(*chromosome_id).or_default().push(*start);
    }

    let data = source
        .chromosomes()?
        .into_iter()
        .filter(|c| !filter.is_mitochondrial(&c.name))
        .map(|c| {
            let starts = starts_by_chrom.remove(&c.id).unwrap_or_default();
            (c.name, bin_counts(c.length, config.density_bin_size, starts))
        })
        .collect();

    Ok(GeneDensity {
        bin_size: config.density_bin_size,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoguide_core::models::Strand;
    use genoguide_core::source::GenomeRecords;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_short_chromosome_gets_one_bin() {
        let bins = bin_counts(12, 1_000_000, vec![1, 5, 12]);
        assert_eq!(bins, vec![3]);
    }

    #[rstest]
    #[case(2_500_000, vec![10, 999_999, 1_000_000, 2_400_000], vec![2, 1, 1])]
    #[case(2_000_000, vec![1_999_999, 2_000_000, 5_000_000], vec![0, 3])]
    #[case(0, vec![7], vec![1])]
    fn test_bin_counts(#[case] length: u32, #[case] starts: Vec<u32>, #[case] expected: Vec<u64>) {
        let n = starts.len() as u64;
        let bins = bin_counts(length, 1_000_000, starts);
        assert_eq!(bins, expected);
        assert_eq!(bins.iter().sum::<u64>(), n);
    }

    #[rstest]
    fn test_gene_density_skips_mitochondrial() {
        let mut genome = GenomeRecords::new()
            .with_chromosome("chr1", 2_500_000)
            .with_chromosome("chrM", 16_569)
            .with_chromosome("chr2", 10);
        for (id, chromosome_id, start) in [(1, 1, 100), (2, 1, 1_500_000), (3, 2, 10)] {
            genome.genes.push(Gene {
                id,
                chromosome_id,
                gene_id: format!("G{}", id),
                gene_name: None,
                start,
                end: start + 10,
                strand: Strand::Plus,
            });
        }

        let density = gene_density(&genome, &AnalysisConfig::default()).unwrap();
        assert_eq!(density.bin_size, 1_000_000);
        assert_eq!(density.data["chr1"], vec![1, 1, 0]);
        assert_eq!(density.data["chr2"], vec![0]);
        assert!(!density.data.contains_key("chrM"));
    }
}
