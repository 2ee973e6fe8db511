//! Annotation records produced by the loaders and consumed by the analyses.
//!
//! All coordinates are 1-based and inclusive on both ends.

use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Plus,
    Minus,
    Unstranded,
}

impl Strand {
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unstranded,
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        };
        write!(f, "{}", c)
    }
}

///
/// A gene from the GTF annotation.
///
/// `id` is the row identity used by exons and UTRs to refer back to their
/// gene; `gene_id` is the stable annotation identifier (e.g. ENSG00000223972).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gene {
    pub id: u32,
    pub chromosome_id: u32,
    pub gene_id: String,
    pub gene_name: Option<String>,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
}

impl Gene {
    /// Human readable label: the gene name when present, else the stable id.
    pub fn label(&self) -> &str {
        match self.gene_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.gene_id,
        }
    }

    pub fn length(&self) -> u32 {
        self.end - self.start + 1
    }
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exon {
    /// `Gene::id` of the owning gene
    pub gene_ref: u32,
    pub start: u32,
    pub end: u32,
    pub exon_number: Option<u32>,
}

#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Utr {
    /// `Gene::id` of the owning gene
    pub gene_ref: u32,
    pub start: u32,
    pub end: u32,
    /// GTF feature type, e.g. `five_prime_utr`
    pub utr_type: String,
}

/// A row of the UCSC `cpgIslandExt` track.
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpgIsland {
    pub chromosome_id: u32,
    pub start: u32,
    pub end: u32,
    pub name: Option<String>,
    pub length: Option<u32>,
    pub cpg_num: Option<u32>,
    pub gc_num: Option<u32>,
    pub per_gc: Option<f64>,
    pub per_cpg: Option<f64>,
}

/// A row of the UCSC `simpleRepeat` (Tandem Repeats Finder) track.
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimpleRepeat {
    pub chromosome_name: String,
    pub start: u32,
    pub end: u32,
    pub unit_size: u32,
    pub period: u32,
    pub copy_num: f64,
    pub score: f64,
    /// consensus repeat unit, e.g. `CAG`
    pub sequence: String,
}

impl SimpleRepeat {
    pub fn total_length(&self) -> u64 {
        (self.end - self.start + 1) as u64
    }
}

/// A non-coding RNA element taken from the RepeatMasker `rmsk` track.
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NonCodingRna {
    pub chromosome_id: u32,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
    pub rna_type: String,
    pub rna_class: String,
    pub rna_name: String,
}
