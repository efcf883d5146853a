use thiserror::Error;

/// Errors that can occur while turning text into a vector
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The request never produced a response (connect, timeout, TLS, ...)
    #[error("Embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Embedding service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered, but not with a usable vector
    #[error("Malformed embedding response: {0}")]
    MalformedResponse(String),

    /// Invalid input provided to the embedder
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to initialize a local embedding model
    #[error("Failed to initialize embedding model: {0}")]
    ModelInitialization(String),

    /// A local model failed to produce an embedding
    #[error("Failed to generate embeddings: {0}")]
    EmbeddingGeneration(String),
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
