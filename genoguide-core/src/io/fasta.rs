use std::path::Path;

use bio::io::fasta;
use log::debug;

use crate::errors::{RecordError, RecordResult};
use crate::source::GenomeRecords;
use crate::utils::get_dynamic_reader;

///
/// Read every record of a FASTA (or FASTA.gz) file into `records`, one
/// chromosome per record, in file order.
///
pub fn read_fasta_into(path: &Path, records: &mut GenomeRecords) -> RecordResult<()> {
    let reader = fasta::Reader::new(get_dynamic_reader(path)?);

    for record in reader.records() {
        let record = record
            .map_err(|e| RecordError::FastaError(path.display().to_string(), e.to_string()))?;
        let seq = record.seq().to_owned();
        debug!("Read {} ({} bp)", record.id(), seq.len());
        records.add_chromosome(record.id(), seq.len() as u32, Some(seq));
    }

    Ok(())
}
