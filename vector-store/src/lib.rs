//! # Vector Store
//!
//! Cosine similarity plus an in-memory, per-document embedding store.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   content hash   ┌──────────────────┐
//! │   VectorStore    │ ───────────────▶ │  stored vector   │  (hash matches: reuse)
//! │  path → vector   │                  └──────────────────┘
//! └────────┬─────────┘
//!          │ hash differs or missing
//!          ▼
//! ┌──────────────────┐
//! │     Embedder     │  (docsearch-embeddings)
//! └──────────────────┘
//! ```

mod error;
mod similarity;
mod store;

pub use error::Result;
pub use error::VectorStoreError;
pub use similarity::cosine_similarity;
pub use store::VectorStore;
pub use store::VectorStoreConfig;
pub use store::content_hash;
