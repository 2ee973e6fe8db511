//! Summary of the Tandem Repeats Finder (`simpleRepeat`) annotation.

use std::collections::BTreeMap;

use genoguide_core::models::SimpleRepeat;

use crate::models::SsrStatistics;

/// Number of trinucleotide units reported.
pub const TOP_TRINUCLEOTIDES: usize = 20;

fn count_units<'a, It>(repeats: It) -> BTreeMap<String, usize>
where
    It: Iterator<Item = &'a SimpleRepeat>,
{
    let mut counts = BTreeMap::new();
    for repeat in repeats {
        *counts.entry(repeat.sequence.to_ascii_uppercase()).or_insert(0) += 1;
    }
    counts
}

///
/// Repeat counts by unit size, the homopolymer and dinucleotide units, the
/// [`TOP_TRINUCLEOTIDES`] most frequent trinucleotide units (ties broken by
/// unit), and the bases covered (`end - start + 1` summed, overlaps counted
/// twice).
///
pub fn ssr_statistics(repeats: &[SimpleRepeat]) -> SsrStatistics {
    let mut overall_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for repeat in repeats {
        *overall_counts.entry(repeat.unit_size).or_insert(0) += 1;
    }

    let homopolymers = count_units(repeats.iter().filter(|r| r.unit_size == 1));
    let dinucleotides = count_units(repeats.iter().filter(|r| r.unit_size == 2));

    let mut trinucleotides: Vec<(String, usize)> =
        count_units(repeats.iter().filter(|r| r.unit_size == 3))
            .into_iter()
            .collect();
    trinucleotides.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    trinucleotides.truncate(TOP_TRINUCLEOTIDES);

    SsrStatistics {
        overall_counts,
        homopolymers,
        dinucleotides,
        trinucleotides: trinucleotides.into_iter().collect(),
        total_coverage_bp: repeats.iter().map(|r| r.total_length()).sum(),
    }
}
