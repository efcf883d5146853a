use thiserror::Error;

/// Errors that can occur during vector store operations
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// The embedder could not produce a vector for the document
    #[error("Embedding error: {0}")]
    Embedding(#[from] docsearch_embeddings::EmbeddingError),

    /// A vector did not have the configured length
    #[error("Expected {expected}-dimensional vector, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, VectorStoreError>;
