//! Read side of the record store.
//!
//! Analyses never talk to a database or to the flat files directly; they ask a
//! [`RecordSource`] for the already-validated records they need.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::errors::{RecordError, RecordResult};
use crate::models::{Chromosome, CpgIsland, Exon, Gene, NonCodingRna, SimpleRepeat, Utr};

/// Queries the analytics layer needs from the record store.
///
/// Implementations must be shareable between worker threads: composition
/// jobs fetch one sequence per worker, concurrently.
pub trait RecordSource: Send + Sync {
    fn chromosomes(&self) -> RecordResult<Vec<Chromosome>>;

    /// Full nucleotide sequence of one chromosome, or `None` when the record
    /// store holds no sequence for it.
    fn sequence(&self, chromosome_id: u32) -> RecordResult<Option<Cow<'_, [u8]>>>;

    fn genes(&self) -> RecordResult<Cow<'_, [Gene]>>;

    fn exons(&self) -> RecordResult<Cow<'_, [Exon]>>;

    fn utrs(&self) -> RecordResult<Cow<'_, [Utr]>>;

    fn cpg_islands(&self) -> RecordResult<Cow<'_, [CpgIsland]>>;

    fn simple_repeats(&self) -> RecordResult<Cow<'_, [SimpleRepeat]>>;

    fn non_coding_rnas(&self) -> RecordResult<Cow<'_, [NonCodingRna]>>;
}

///
/// In-memory record store, filled by the loaders in [`crate::io`] or built
/// directly in tests.
///
#[derive(Debug, Clone, Default)]
pub struct GenomeRecords {
    pub chromosomes: Vec<Chromosome>,
    sequences: HashMap<u32, Vec<u8>>,
    pub genes: Vec<Gene>,
    pub exons: Vec<Exon>,
    pub utrs: Vec<Utr>,
    pub cpg_islands: Vec<CpgIsland>,
    pub simple_repeats: Vec<SimpleRepeat>,
    pub non_coding_rnas: Vec<NonCodingRna>,
}

impl GenomeRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chromosome, giving it the next free id. The length is taken
    /// from the sequence when one is given.
    pub fn add_chromosome(&mut self, name: &str, length: u32, sequence: Option<Vec<u8>>) -> u32 {
        let id = self.chromosomes.len() as u32 + 1;
        let length = match &sequence {
            Some(seq) => seq.len() as u32,
            None => length,
        };
        self.chromosomes.push(Chromosome::new(id, name, length));
        if let Some(seq) = sequence {
            self.sequences.insert(id, seq);
        }
        id
    }

    pub fn with_sequence(mut self, name: &str, sequence: &str) -> Self {
        self.add_chromosome(name, sequence.len() as u32, Some(sequence.as_bytes().to_vec()));
        self
    }

    pub fn with_chromosome(mut self, name: &str, length: u32) -> Self {
        self.add_chromosome(name, length, None);
        self
    }

    pub fn chromosome_id(&self, name: &str) -> Option<u32> {
        self.chromosomes.iter().find(|c| c.name == name).map(|c| c.id)
    }

    pub fn chromosome(&self, id: u32) -> RecordResult<&Chromosome> {
        self.chromosomes
            .iter()
            .find(|c| c.id == id)
            .ok_or(RecordError::UnknownChromosome(id))
    }
}

impl RecordSource for GenomeRecords {
    fn chromosomes(&self) -> RecordResult<Vec<Chromosome>> {
        Ok(self.chromosomes.clone())
    }

    fn sequence(&self, chromosome_id: u32) -> RecordResult<Option<Cow<'_, [u8]>>> {
        // unknown ids are an error, known ids without sequence are not
        self.chromosome(chromosome_id)?;
        Ok(self
            .sequences
            .get(&chromosome_id)
            .map(|s| Cow::Borrowed(s.as_slice())))
    }

    fn genes(&self) -> RecordResult<Cow<'_, [Gene]>> {
        Ok(Cow::Borrowed(&self.genes))
    }

    fn exons(&self) -> RecordResult<Cow<'_, [Exon]>> {
        Ok(Cow::Borrowed(&self.exons))
    }

    fn utrs(&self) -> RecordResult<Cow<'_, [Utr]>> {
        Ok(Cow::Borrowed(&self.utrs))
    }

    fn cpg_islands(&self) -> RecordResult<Cow<'_, [CpgIsland]>> {
        Ok(Cow::Borrowed(&self.cpg_islands))
    }

    fn simple_repeats(&self) -> RecordResult<Cow<'_, [SimpleRepeat]>> {
        Ok(Cow::Borrowed(&self.simple_repeats))
    }

    fn non_coding_rnas(&self) -> RecordResult<Cow<'_, [NonCodingRna]>> {
        Ok(Cow::Borrowed(&self.non_coding_rnas))
    }
}
