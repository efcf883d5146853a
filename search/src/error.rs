use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Document store unavailable: {0}")]
    CollaboratorUnavailable(#[from] docsearch_documents::DocumentError),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Query too short: minimum {min} characters, got {actual}")]
    QueryTooShort { min: usize, actual: usize },

    #[error("Invalid filter '{key}': {reason}")]
    InvalidFilter { key: String, reason: String },

    #[error("Unknown search mode: {0}")]
    InvalidMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
