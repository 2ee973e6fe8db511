use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid statistic name: '{0}'")]
    InvalidName(String),

    #[error("Store lock poisoned: {0}")]
    Lock(String),

    #[error("Corrupt statistic store {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
