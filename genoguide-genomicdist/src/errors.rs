use thiserror::Error;

use genoguide_core::errors::RecordError;
use genoguide_overlaprs::MultiChromIntervalsError;

#[derive(Error, Debug)]
pub enum MotifError {
    #[error("Motif pattern {pattern} does not compile: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[derive(Error, Debug)]
pub enum GenomicDistError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Motif(#[from] MotifError),

    #[error(transparent)]
    Intervals(#[from] MultiChromIntervalsError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Failed to serialize statistic {0}: {1}")]
    Serialization(String, String),

    #[error("Unknown analysis: {0}")]
    UnknownAnalysis(String),
}

pub type GenomicDistResult<T> = std::result::Result<T, GenomicDistError>;
