use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// One physical chromosome or contig of the reference genome.
///
/// The sequence itself is not stored here; it is fetched per chromosome
/// through [`RecordSource::sequence`](crate::source::RecordSource::sequence)
/// so that whole-genome jobs never hold every sequence at once.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chromosome {
    pub id: u32,
    pub name: String,
    pub length: u32,
}

impl Chromosome {
    pub fn new(id: u32, name: &str, length: u32) -> Self {
        Chromosome {
            id,
            name: name.to_string(),
            length,
        }
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bp)", self.name, self.length)
    }
}

/// Predicate deciding which chromosomes take part in a genome-wide total.
///
/// Alternate scaffolds and unplaced contigs are named with an underscore
/// separator in UCSC assemblies (`chr1_KI270706v1_random`), so the default
/// filter drops any name containing `_`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeFilter {
    pub scaffold_separator: Option<char>,
    pub mitochondrial: String,
}

impl Default for ChromosomeFilter {
    fn default() -> Self {
        ChromosomeFilter {
            scaffold_separator: Some('_'),
            mitochondrial: "chrM".to_string(),
        }
    }
}

impl ChromosomeFilter {
    pub fn new(scaffold_separator: Option<char>, mitochondrial: &str) -> Self {
        ChromosomeFilter {
            scaffold_separator,
            mitochondrial: mitochondrial.to_string(),
        }
    }

    pub fn is_mitochondrial(&self, name: &str) -> bool {
        name == self.mitochondrial
    }

    pub fn is_scaffold(&self, name: &str) -> bool {
        match self.scaffold_separator {
            Some(sep) => name.contains(sep),
            None => false,
        }
    }

    /// Part of the assembled genome: not a scaffold. The mitochondrial
    /// chromosome is assembled.
    pub fn is_assembled(&self, name: &str) -> bool {
        !self.is_scaffold(name)
    }

    /// Counted in nuclear totals: assembled and not mitochondrial.
    pub fn is_nuclear(&self, name: &str) -> bool {
        self.is_assembled(name) && !self.is_mitochondrial(name)
    }
}
