//! Regex scan for simple sequence repeats.

use log::{debug, warn};
use regex::bytes::Regex;

use genoguide_core::source::RecordSource;

use crate::config::{AnalysisConfig, MotifFamily};
use crate::errors::{GenomicDistResult, MotifError};
use crate::models::{SsrMatch, SsrScan};
use crate::parallel::parallel_map_merge;
use crate::utils::karyotype_ordered;

struct CompiledMotif {
    family: String,
    unit_len: usize,
    regex: Regex,
}

/// Matches found on one chromosome, already cut to the global cap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromosomeScan {
    pub matches: Vec<SsrMatch>,
    pub truncated: bool,
}

///
/// A compiled motif catalogue.
///
/// Patterns are evaluated family by family, pattern by pattern, in the order
/// they are declared. Matches of one pattern never overlap each other
/// (leftmost-first), but matches of different patterns can.
///
pub struct MotifScanner {
    motifs: Vec<CompiledMotif>,
    max_results: usize,
}

/// The repeat unit of a `(UNIT){min,}` pattern.
fn repeat_unit(pattern: &str) -> Option<&str> {
    let open = pattern.find('(')?;
    let close = open + pattern[open..].find(')')?;
    let unit = &pattern[open + 1..close];
    match !unit.is_empty() && unit.chars().all(|c| c.is_ascii_alphabetic()) {
        true => Some(unit),
        false => None,
    }
}

impl MotifScanner {
    pub fn new(families: &[MotifFamily], max_results: usize) -> Result<Self, MotifError> {
        let mut motifs = Vec::new();

        for family in families {
            for pattern in &family.patterns {
                let Some(unit) = repeat_unit(pattern) else {
                    warn!(
                        "Skipping motif pattern {} in family {}: no repeat unit",
                        pattern, family.name
                    );
                    continue;
                };
                let regex = Regex::new(pattern).map_err(|e| MotifError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
                motifs.push(CompiledMotif {
                    family: family.name.clone(),
                    unit_len: unit.len(),
                    regex,
                });
            }
        }

        Ok(MotifScanner {
            motifs,
            max_results,
        })
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// Scan one sequence, stopping once `max_results` matches are collected.
    pub fn scan_sequence(&self, chromosome_name: &str, seq: &[u8]) -> ChromosomeScan {
        let upper = seq.to_ascii_uppercase();
        let mut scan = ChromosomeScan::default();

        for motif in &self.motifs {
            for m in motif.regex.find_iter(&upper) {
                if scan.matches.len() >= self.max_results {
                    scan.truncated = true;
                    return scan;
                }
                let length = (m.end() - m.start()) as u64;
                scan.matches.push(SsrMatch {
                    chromosome_name: chromosome_name.to_string(),
                    start_position: m.start() as u64 + 1,
                    end_position: m.end() as u64,
                    motif: String::from_utf8_lossy(m.as_bytes()).into_owned(),
                    family: motif.family.clone(),
                    length,
                    count: length / motif.unit_len as u64,
                });
            }
        }

        scan
    }

    /// Append `part` to `acc` in order, keeping at most `max_results` matches.
    fn merge(&self, mut acc: ChromosomeScan, part: ChromosomeScan) -> ChromosomeScan {
        let room = self.max_results.saturating_sub(acc.matches.len());
        if part.matches.len() > room {
            acc.truncated = true;
        }
        acc.truncated |= part.truncated;
        acc.matches.extend(part.matches.into_iter().take(room));
        acc
    }
}

///
/// Scan the primary chromosomes for simple sequence repeats.
///
/// Chromosomes are visited in karyotype order, so when the cap is hit the
/// surviving matches are the same from run to run.
///
pub fn scan_genome<S>(source: &S, config: &AnalysisConfig) -> GenomicDistResult<SsrScan>
where
    S: RecordSource + ?Sized,
{
    let scanner = MotifScanner::new(&config.ssr.families, config.ssr.max_results)?;
    let partitions: Vec<_> = karyotype_ordered(&source.chromosomes()?)
        .into_iter()
        .filter(|c| config.in_scan_set(&c.name))
        .collect();
    debug!(
        "Scanning {} chromosomes with {} motif patterns",
        partitions.len(),
        scanner.len()
    );

    let scan = parallel_map_merge(
        &partitions,
        config.threads,
        |chrom| {
            Ok(match source.sequence(chrom.id)? {
                Some(seq) => scanner.scan_sequence(&chrom.name, &seq),
                None => ChromosomeScan::default(),
            })
        },
        ChromosomeScan::default(),
        |acc, part| scanner.merge(acc, part),
    )?;

    if scan.truncated {
        warn!(
            "Simple sequence repeat scan stopped at {} matches",
            config.ssr.max_results
        );
    }

    Ok(SsrScan {
        ssrs: scan.matches,
        truncated: scan.truncated,
        max_results: config.ssr.max_results,
    })
}
