//! Typed results of every analysis.
//!
//! Each type serialises to the JSON value stored under its statistic name;
//! nothing is converted to JSON before [`Statistic::new`].

use std::collections::BTreeMap;
use std::fmt;

use fxhash::FxHashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::errors::{GenomicDistError, GenomicDistResult};

/// A named JSON statistic, ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub name: String,
    pub value: serde_json::Value,
}

impl Statistic {
    pub fn new<T: Serialize>(name: &str, value: &T) -> GenomicDistResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| GenomicDistError::Serialization(name.to_string(), e.to_string()))?;
        Ok(Statistic {
            name: name.to_string(),
            value,
        })
    }
}

///
/// Per-symbol nucleotide counts. Symbols are uppercased; every symbol,
/// including `N` and other ambiguity codes, is counted.
///
#[derive(Clone, PartialEq, Eq)]
pub struct BaseCounts {
    counts: [u64; 256],
}

impl Default for BaseCounts {
    fn default() -> Self {
        BaseCounts { counts: [0; 256] }
    }
}

impl BaseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sequence(&mut self, seq: &[u8]) {
        for base in seq {
            self.counts[base.to_ascii_uppercase() as usize] += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol.to_ascii_uppercase() as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn merge(mut self, other: BaseCounts) -> BaseCounts {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self
    }

    /// Symbols that were seen at least once, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(symbol, n)| (symbol as u8 as char, *n))
    }
}

impl fmt::Debug for BaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for BaseCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let seen: Vec<(char, u64)> = self.iter().collect();
        let mut map = serializer.serialize_map(Some(seen.len()))?;
        for (symbol, n) in seen {
            map.serialize_entry(&symbol.to_string(), &n)?;
        }
        map.end()
    }
}

/// Dinucleotide window counts keyed by the uppercased two-letter window.
/// Ambiguity codes are kept as they appear (`AR`, `RY`). Only windows that
/// occur are serialised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DinucleotideCounts {
    counts: FxHashMap<[u8; 2], u64>,
}

impl DinucleotideCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pair: [u8; 2], n: u64) {
        *self.counts.entry(pair.map(|b| b.to_ascii_uppercase())).or_insert(0) += n;
    }

    /// Count of one window, case-insensitive.
    pub fn get(&self, pair: &[u8; 2]) -> u64 {
        let key = pair.map(|b| b.to_ascii_uppercase());
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn merge(mut self, other: DinucleotideCounts) -> DinucleotideCounts {
        for (pair, n) in other.counts {
            self.add(pair, n);
        }
        self
    }

    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(pair, n)| (String::from_utf8_lossy(pair).into_owned(), *n))
            .collect()
    }
}

impl Serialize for DinucleotideCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// One match of the motif scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsrMatch {
    pub chromosome_name: String,
    /// 1-based, inclusive
    pub start_position: u64,
    pub end_position: u64,
    pub motif: String,
    #[serde(rename = "type")]
    pub family: String,
    pub length: u64,
    /// number of unit repeats
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsrScan {
    pub ssrs: Vec<SsrMatch>,
    /// true when the scan stopped at `max_results`
    pub truncated: bool,
    pub max_results: usize,
}

/// Statistic `cpg_island_gene_association`. Only `total_islands` is present
/// when there are no islands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandGeneAssociation {
    pub total_islands: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_with_genes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_associated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_associated: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedGenePair {
    pub inner_gene: String,
    pub outer_gene: String,
    pub chromosome_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedGenes {
    pub total_nested_pairs: usize,
    pub nested_pairs: Vec<NestedGenePair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneDensity {
    pub bin_size: u32,
    /// chromosome name to per-bin interval counts
    pub data: BTreeMap<String, Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromosomeGeneStats {
    pub chromosome: String,
    pub gene_count: usize,
    /// genes per base pair
    pub density: f64,
    pub average_gene_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDensityCorrelation {
    pub correlation_coefficient: f64,
    pub p_value: f64,
    pub chromosome_data: Vec<ChromosomeGeneStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtrTranscriptCorrelation {
    pub correlation_coefficient: f64,
    pub p_value: f64,
    pub total_genes_analyzed: usize,
    pub average_transcript_length: f64,
    pub average_utr_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RnaChromosomeDensity {
    pub chromosome: String,
    pub count: usize,
    pub density_per_bp: f64,
    pub density_per_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RnaDistribution {
    pub counts_by_class: BTreeMap<String, usize>,
    pub counts_by_type: BTreeMap<String, usize>,
    pub chromosome_distribution: Vec<RnaChromosomeDensity>,
    pub total_rnas: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsrStatistics {
    /// repeat unit size to number of repeats
    pub overall_counts: BTreeMap<u32, usize>,
    pub homopolymers: BTreeMap<String, usize>,
    pub dinucleotides: BTreeMap<String, usize>,
    /// the most frequent trinucleotide units only
    pub trinucleotides: BTreeMap<String, usize>,
    pub total_coverage_bp: u64,
}
