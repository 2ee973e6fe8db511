use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{RecordError, RecordResult};
use crate::models::Chromosome;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> RecordResult<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| RecordError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Returns a sort key that orders chromosome names karyotypically:
/// numeric (1, 2, …, 22) → X → Y → M/MT → everything else alphabetically.
pub fn chrom_karyotype_key(chr: &str) -> (u8, u32, String) {
    let bare = chr.strip_prefix("chr").unwrap_or(chr);
    match bare {
        "X" => (1, 0, String::new()),
        "Y" => (2, 0, String::new()),
        "M" | "MT" => (3, 0, String::new()),
        _ => match bare.parse::<u32>() {
            Ok(n) => (0, n, String::new()),
            Err(_) => (4, 0, bare.to_string()),
        },
    }
}

/// Sort chromosomes in karyotype order, in place.
pub fn sort_karyotypically(chromosomes: &mut [Chromosome]) {
    chromosomes.sort_by_cached_key(|c| chrom_karyotype_key(&c.name));
}

/// The default set of primary assembled chromosomes: chr1..chr22, chrX, chrY.
pub fn default_primary_chromosomes() -> Vec<String> {
    (1..=22)
        .map(|i| format!("chr{}", i))
        .chain(["chrX".to_string(), "chrY".to_string()])
        .collect()
}

///
/// Lookup from chromosome name to chromosome id, tolerant of the
/// Ensembl/UCSC naming split (`1` vs `chr1`).
///
#[derive(Debug, Clone, Default)]
pub struct ChromosomeIndex {
    by_name: HashMap<String, u32>,
}

impl ChromosomeIndex {
    pub fn new(chromosomes: &[Chromosome]) -> Self {
        let by_name = chromosomes
            .iter()
            .map(|c| (c.name.clone(), c.id))
            .collect();
        ChromosomeIndex { by_name }
    }

    /// Resolve a name as-is, then with a `chr` prefix added, then with it stripped.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        if let Some(id) = self.by_name.get(name) {
            return Some(*id);
        }
        if let Some(id) = self.by_name.get(&format!("chr{}", name)) {
            return Some(*id);
        }
        name.strip_prefix("chr")
            .and_then(|bare| self.by_name.get(bare))
            .copied()
    }

    /// Canonical stored name for a possibly differently-prefixed name.
    pub fn canonical_name<'a>(&self, chromosomes: &'a [Chromosome], name: &str) -> Option<&'a str> {
        let id = self.resolve(name)?;
        chromosomes
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
