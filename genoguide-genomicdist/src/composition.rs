//! Nucleotide composition: base counts, GC content, dinucleotide and CpG
//! frequencies.
//!
//! The `genome_*` functions fan out one chromosome per worker through
//! [`parallel_map_merge`]; chromosomes without a stored sequence are skipped,
//! not counted as empty. Per-chromosome tables cover every assembled
//! chromosome (see [`ChromosomeFilter::is_assembled`]), mitochondrial included.
//!
//! [`ChromosomeFilter::is_assembled`]: genoguide_core::models::ChromosomeFilter::is_assembled

use std::collections::BTreeMap;

use log::debug;

use genoguide_core::models::Chromosome;
use genoguide_core::source::RecordSource;

use crate::config::AnalysisConfig;
use crate::errors::GenomicDistResult;
use crate::models::{BaseCounts, DinucleotideCounts};
use crate::parallel::parallel_map_merge;
use crate::utils::{karyotype_ordered, percentage, round_to};

/// Count every symbol of `seq` in one pass.
pub fn base_composition(seq: &[u8]) -> BaseCounts {
    let mut counts = BaseCounts::new();
    counts.add_sequence(seq);
    counts
}

/// `(G+C) / (A+C+G+T) * 100`; ambiguity codes are left out of the denominator.
pub fn gc_content(counts: &BaseCounts) -> f64 {
    let gc = counts.get(b'G') + counts.get(b'C');
    let acgt = gc + counts.get(b'A') + counts.get(b'T');
    percentage(gc, acgt)
}

/// Every overlapping two-letter window of the uppercased `seq`, skipping
/// windows that touch `N`. Other ambiguity codes are counted under their own
/// window (`AR`, `RY`).
pub fn dinucleotide_frequency(seq: &[u8]) -> DinucleotideCounts {
    // one slot per possible byte pair
    let mut table = vec![0u64; 1 << 16];

    for window in seq.windows(2) {
        let a = window[0].to_ascii_uppercase();
        let b = window[1].to_ascii_uppercase();
        if a == b'N' || b == b'N' {
            continue;
        }
        table[((a as usize) << 8) | b as usize] += 1;
    }

    let mut counts = DinucleotideCounts::new();
    for (slot, n) in table.into_iter().enumerate() {
        if n > 0 {
            counts.add([(slot >> 8) as u8, slot as u8], n);
        }
    }
    counts
}

///
/// Occurrences of one dinucleotide in `seq`, case-insensitive.
///
/// Homopolymer pairs (`AA`) are counted with an overlapping scan, so `AAAA`
/// holds three. Heterogeneous pairs are counted as non-overlapping
/// substrings, which for two distinct letters gives the same number.
///
pub fn count_dinucleotide(seq: &[u8], pair: &[u8; 2]) -> u64 {
    let first = pair[0].to_ascii_uppercase();
    let second = pair[1].to_ascii_uppercase();
    let upper = |i: usize| seq[i].to_ascii_uppercase();

    if first == second {
        return seq
            .windows(2)
            .filter(|w| w[0].to_ascii_uppercase() == first && w[1].to_ascii_uppercase() == second)
            .count() as u64;
    }

    let mut count = 0;
    let mut i = 0;
    while i + 1 < seq.len() {
        if upper(i) == first && upper(i + 1) == second {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// `CG` windows among the windows of one sequence that do not touch `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpgWindowCounts {
    pub cpg: u64,
    pub valid_windows: u64,
}

impl CpgWindowCounts {
    /// CpG per valid window, in percent; 0 without valid windows.
    pub fn frequency(&self) -> f64 {
        percentage(self.cpg, self.valid_windows)
    }
}

pub fn cpg_windows(seq: &[u8]) -> CpgWindowCounts {
    let mut counts = CpgWindowCounts::default();
    for window in seq.windows(2) {
        let a = window[0].to_ascii_uppercase();
        let b = window[1].to_ascii_uppercase();
        if a == b'N' || b == b'N' {
            continue;
        }
        counts.valid_windows += 1;
        if a == b'C' && b == b'G' {
            counts.cpg += 1;
        }
    }
    counts
}

/// Genome-wide base composition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenomeComposition {
    /// every nuclear chromosome (scaffolds excluded unless configured otherwise)
    pub nuclear: BaseCounts,
    pub mitochondrial: BaseCounts,
    /// assembled chromosomes, mitochondrial included
    pub per_chromosome: BTreeMap<String, BaseCounts>,
}

impl GenomeComposition {
    /// GC percentage per assembled chromosome, rounded to `decimals`.
    pub fn gc_content_per_chromosome(&self, decimals: u32) -> BTreeMap<String, f64> {
        self.per_chromosome
            .iter()
            .map(|(name, counts)| (name.clone(), round_to(gc_content(counts), decimals)))
            .collect()
    }

    fn merge(mut self, other: GenomeComposition) -> GenomeComposition {
        self.nuclear = self.nuclear.merge(other.nuclear);
        self.mitochondrial = self.mitochondrial.merge(other.mitochondrial);
        self.per_chromosome.extend(other.per_chromosome);
        self
    }
}

/// Chromosomes passing `keep`, in karyotype order.
fn partitions<F>(chromosomes: &[Chromosome], keep: F) -> Vec<Chromosome>
where
    F: Fn(&Chromosome) -> bool,
{
    karyotype_ordered(chromosomes)
        .into_iter()
        .filter(|c| keep(c))
        .collect()
}

pub fn genome_composition<S>(source: &S, config: &AnalysisConfig) -> GenomicDistResult<GenomeComposition>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let chromosomes = source.chromosomes()?;
    let partitions = partitions(&chromosomes, |c| filter.is_assembled(&c.name));

    parallel_map_merge(
        &partitions,
        config.threads,
        |chrom| {
            let mut part = GenomeComposition::default();
            let Some(seq) = source.sequence(chrom.id)? else {
                debug!("No sequence stored for {}, skipping", chrom.name);
                return Ok(part);
            };
            let counts = base_composition(&seq);

            if filter.is_mitochondrial(&chrom.name) {
                part.mitochondrial = counts.clone();
            } else {
                part.nuclear = counts.clone();
            }
            part.per_chromosome.insert(chrom.name.clone(), counts);
            Ok(part)
        },
        GenomeComposition::default(),
        GenomeComposition::merge,
    )
}

/// Dinucleotide counts summed over the nuclear chromosomes.
pub fn genome_dinucleotide_frequency<S>(
    source: &S,
    config: &AnalysisConfig,
) -> GenomicDistResult<DinucleotideCounts>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let chromosomes = source.chromosomes()?;
    let partitions = partitions(&chromosomes, |c| filter.is_nuclear(&c.name));

    parallel_map_merge(
        &partitions,
        config.threads,
        |chrom| {
            Ok(match source.sequence(chrom.id)? {
                Some(seq) => dinucleotide_frequency(&seq),
                None => DinucleotideCounts::new(),
            })
        },
        DinucleotideCounts::new(),
        DinucleotideCounts::merge,
    )
}

/// CpG frequency per assembled chromosome, rounded to `config.cpg_decimals`.
pub fn cpg_frequency_per_chromosome<S>(
    source: &S,
    config: &AnalysisConfig,
) -> GenomicDistResult<BTreeMap<String, f64>>
where
    S: RecordSource + ?Sized,
{
    let filter = config.chromosome_filter();
    let chromosomes = source.chromosomes()?;
    let partitions = partitions(&chromosomes, |c| filter.is_assembled(&c.name));

    parallel_map_merge(
        &partitions,
        config.threads,
        |chrom| {
            let mut part = BTreeMap::new();
            if let Some(seq) = source.sequence(chrom.id)? {
                let frequency = cpg_windows(&seq).frequency();
                part.insert(chrom.name.clone(), round_to(frequency, config.cpg_decimals));
            }
            Ok(part)
        },
        BTreeMap::new(),
        |mut acc, part| {
            acc.extend(part);
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoguide_core::source::GenomeRecords;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_composition_sums_to_length() {
        let seq = b"ACGTNNRYacgtMK";
        let counts = base_composition(seq);
        assert_eq!(counts.total(), seq.len() as u64);
        assert_eq!(counts.get(b'A'), 2);
        assert_eq!(counts.get(b'R'), 1);
    }

    #[rstest]
    fn test_repeated_unit_composition_and_dinucleotides() {
        let seq = b"ATGCATGCATGC";
        let counts = base_composition(seq);
        for base in [b'A', b'T', b'G', b'C'] {
            assert_eq!(counts.get(base), 3);
        }

        let dinucleotides = dinucleotide_frequency(seq);
        assert_eq!(dinucleotides.get(b"AT"), 3);
        assert_eq!(dinucleotides.get(b"TG"), 3);
        assert_eq!(dinucleotides.get(b"GC"), 3);
        assert_eq!(dinucleotides.get(b"CA"), 2);
        assert_eq!(dinucleotides.total(), 11);
    }

    #[rstest]
    #[case(b"GGCC", 100.0)]
    #[case(b"AATT", 0.0)]
    #[case(b"ACGTNNNN", 50.0)]
    #[case(b"NNNN", 0.0)]
    #[case(b"", 0.0)]
    fn test_gc_content(#[case] seq: &[u8], #[case] expected: f64) {
        let gc = gc_content(&base_composition(seq));
        assert_eq!(gc, expected);
        assert!((0.0..=100.0).contains(&gc));
    }

    #[rstest]
    #[case(b"AAAA", b"AA", 3)]
    #[case(b"aaaa", b"AA", 3)]
    #[case(b"ATATAT", b"AT", 3)]
    #[case(b"ATNAT", b"AT", 2)]
    #[case(b"ACGT", b"GA", 0)]
    fn test_count_dinucleotide(#[case] seq: &[u8], #[case] pair: &[u8; 2], #[case] expected: u64) {
        assert_eq!(count_dinucleotide(seq, pair), expected);
    }

    #[rstest]
    fn test_sliding_window_overlaps_homopolymers() {
        assert_eq!(dinucleotide_frequency(b"AAAA").get(b"AA"), 3);
        assert_eq!(dinucleotide_frequency(b"AANAA").total(), 2);
    }

    #[rstest]
    fn test_ambiguity_codes_get_their_own_windows() {
        let counts = dinucleotide_frequency(b"ARYA");
        assert_eq!(
            counts.to_map(),
            BTreeMap::from([
                ("AR".to_string(), 1),
                ("RY".to_string(), 1),
                ("YA".to_string(), 1),
            ])
        );

        // only windows touching N are dropped
        let counts = dinucleotide_frequency(b"anrA");
        assert_eq!(counts.to_map(), BTreeMap::from([("RA".to_string(), 1)]));
    }

    #[rstest]
    fn test_cpg_windows_skip_n() {
        let counts = cpg_windows(b"ACGNCG");
        // AC, CG, CG valid; GN and NC touch N
        assert_eq!(counts, CpgWindowCounts { cpg: 2, valid_windows: 3 });
        assert_eq!(cpg_windows(b"AAAATTTT").frequency(), 0.0);
        assert_eq!(cpg_windows(b"NNNN").frequency(), 0.0);
    }

    fn toy_genome() -> GenomeRecords {
        GenomeRecords::new()
            .with_sequence("chr1", "ACGTACGTNN")
            .with_sequence("chr2", "GGGGCCCC")
            .with_sequence("chrM", "AAAT")
            .with_sequence("chr1_KI270706v1_random", "CCCC")
            .with_chromosome("chr3", 1000)
    }

    #[rstest]
    fn test_genome_composition_splits_nuclear_and_mitochondrial() {
        let config = AnalysisConfig::default();
        let composition = genome_composition(&toy_genome(), &config).unwrap();

        assert_eq!(composition.nuclear.total(), 18);
        assert_eq!(composition.nuclear.get(b'C'), 6);
        assert_eq!(composition.mitochondrial.get(b'A'), 3);
        assert_eq!(
            composition.per_chromosome.keys().collect::<Vec<_>>(),
            vec!["chr1", "chr2", "chrM"]
        );

        let gc = composition.gc_content_per_chromosome(config.gc_decimals);
        assert_eq!(gc["chr1"], 50.0);
        assert_eq!(gc["chr2"], 100.0);
        assert_eq!(gc["chrM"], 0.0);
    }

    #[rstest]
    fn test_per_chromosome_tables_cover_every_assembled_name() {
        let genome = GenomeRecords::new()
            .with_sequence("chr1", "ACGT")
            .with_sequence("chrM", "GCGC")
            .with_sequence("1", "CGAA")
            .with_sequence("chrUn_GL000195v1", "CCCC");
        let config = AnalysisConfig::default();

        let composition = genome_composition(&genome, &config).unwrap();
        assert_eq!(composition.nuclear.total(), 8);
        let gc = composition.gc_content_per_chromosome(config.gc_decimals);
        assert_eq!(
            gc,
            BTreeMap::from([
                ("1".to_string(), 50.0),
                ("chr1".to_string(), 50.0),
                ("chrM".to_string(), 100.0),
            ])
        );

        let cpg = cpg_frequency_per_chromosome(&genome, &config).unwrap();
        assert_eq!(
            cpg.keys().collect::<Vec<_>>(),
            vec!["1", "chr1", "chrM"]
        );
        // GCGC: GC, CG, GC
        assert_eq!(cpg["chrM"], 33.3333);
        assert_eq!(cpg["1"], 33.3333);
    }

    #[rstest]
    fn test_scaffolds_counted_when_not_excluded() {
        let mut config = AnalysisConfig::default();
        config.exclude_scaffolds = false;
        let composition = genome_composition(&toy_genome(), &config).unwrap();
        assert_eq!(composition.nuclear.total(), 22);
    }

    #[rstest]
    fn test_genome_dinucleotides_exclude_mitochondrial() {
        let config = AnalysisConfig::default();
        let counts = genome_dinucleotide_frequency(&toy_genome(), &config).unwrap();
        assert_eq!(counts.get(b"AA"), 0);
        assert_eq!(counts.get(b"GG"), 3);
        assert_eq!(counts.get(b"CC"), 3);
    }

    #[rstest]
    fn test_cpg_frequency_per_chromosome() {
        let config = AnalysisConfig::default();
        let cpg = cpg_frequency_per_chromosome(&toy_genome(), &config).unwrap();
        // chr1: ACGTACGTNN has 7 valid windows, 2 CG
        assert_eq!(cpg["chr1"], 28.5714);
        assert_eq!(cpg["chr2"], 0.0);
        assert_eq!(cpg["chrM"], 0.0);
        assert!(!cpg.contains_key("chr3"));
        assert!(!cpg.contains_key("chr1_KI270706v1_random"));
    }
}
