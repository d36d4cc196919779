use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository I/O failed")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode a JSON snapshot")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode or decode a log entry")]
    Bincode(#[from] bincode::Error),

    #[error("log file {0} already exists")]
    LogAlreadyExists(String),

    #[error("log truncated at offset {offset}")]
    Truncated { offset: u64 },

    #[error("repository lock poisoned")]
    Poisoned,
}
