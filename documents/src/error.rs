use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to list documents under '{prefix}': {reason}")]
    ListFailed { prefix: String, reason: String },

    #[error("Failed to read document '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
