use thiserror::Error;

use crate::models::DocumentId;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Another writer session holds uncommitted mutations")]
    WriterBusy,

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Check if this error indicates a transient failure that could be retried
    pub fn is_retriable(&self) -> bool {
        matches!(self, EngineError::WriterBusy)
    }
}
