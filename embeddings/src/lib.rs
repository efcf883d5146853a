//! # Embeddings
//!
//! The embedding collaborator used by semantic search: text in, fixed-length
//! vector out, or an error.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpEmbedder`] talks to any OpenAI-compatible `/embeddings` endpoint.
//! - `LocalEmbedder` (behind the `fastembed` feature) runs an ONNX model
//!   in-process.
//!
//! ## Example
//!
//! ```no_run
//! use docsearch_embeddings::Embedder;
//! use docsearch_embeddings::HttpEmbedder;
//! use docsearch_embeddings::HttpEmbeddingConfig;
//!
//! # async fn run() -> Result<(), docsearch_embeddings::EmbeddingError> {
//! let embedder = HttpEmbedder::new(HttpEmbeddingConfig::new("http://localhost:8080/v1/embeddings"))?;
//! let vector = embedder.embed("mathematics is the study of patterns").await?;
//! println!("{} dimensions", vector.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod http;
#[cfg(feature = "fastembed")]
mod local;

use async_trait::async_trait;

pub use error::EmbeddingError;
pub use error::Result;
pub use http::HttpEmbedder;
pub use http::HttpEmbeddingConfig;
#[cfg(feature = "fastembed")]
pub use local::LocalEmbedder;
#[cfg(feature = "fastembed")]
pub use local::LocalEmbeddingConfig;
#[cfg(feature = "fastembed")]
pub use local::LocalModel;

/// Produces a vector for a piece of text.
///
/// Implementations do not retry; a failure is reported once and the caller
/// decides whether it is fatal.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Length of the vectors this embedder produces, when known up front.
    fn dimension(&self) -> Option<usize> {
        None
    }
}
