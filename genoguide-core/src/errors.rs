use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error reading FASTA file {0}: {1}")]
    FastaError(String, String),

    #[error("Malformed record in {path} at line {line}: {reason}")]
    MalformedRecord {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Unknown chromosome id: {0}")]
    UnknownChromosome(u32),

    #[error("Invalid interval {0}-{1}: start is after end")]
    InvalidInterval(u32, u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
