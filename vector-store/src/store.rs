use crate::error::Result;
use crate::error::VectorStoreError;
use docsearch_embeddings::Embedder;
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Configuration for the vector store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VectorStoreConfig {
    /// Reject vectors of any other length. `None` falls back to the
    /// embedder's advertised dimension, and accepts any length when the
    /// embedder advertises none.
    #[serde(default)]
    pub dimension: Option<usize>,
}

#[derive(Debug, Clone)]
struct StoredVector {
    vector: Vec<f32>,
    content_hash: String,
}

/// Per-document embeddings keyed by document path.
///
/// Each vector remembers the SHA-256 of the content it was computed from, so
/// a document is re-embedded only when its content changes.
///
/// Entries are never dropped on their own: a document deleted from the
/// collection keeps its vector until [`VectorStore::remove`] or
/// [`VectorStore::clear`] is called. Memory grows with the number of distinct
/// paths ever embedded.
#[derive(Debug, Default)]
pub struct VectorStore {
    config: VectorStoreConfig,
    vectors: RwLock<HashMap<String, StoredVector>>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VectorStoreConfig) -> Self {
        Self {
            config,
            vectors: RwLock::new(HashMap::new()),
        }
    }

    /// Vector for `path`, reusing the stored one when `content` is unchanged
    /// and asking `embedder` otherwise.
    pub async fn embedding_for(
        &self,
        path: &str,
        content: &str,
        embedder: &dyn Embedder,
    ) -> Result<Vec<f32>> {
        let hash = content_hash(content);
        {
            let vectors = self.vectors.read().await;
            if let Some(stored) = vectors.get(path).filter(|s| s.content_hash == hash) {
                debug!("Reusing stored embedding for {path}");
                return Ok(stored.vector.clone());
            }
        }

        let vector = embedder.embed(content).await?;
        let expected = self.config.dimension.or_else(|| embedder.dimension());
        self.store(path, hash, vector.clone(), expected).await?;
        debug!("Embedded {path} ({} dimensions)", vector.len());
        Ok(vector)
    }

    /// Store a precomputed vector for `path`.
    pub async fn insert(&self, path: &str, content: &str, vector: Vec<f32>) -> Result<()> {
        self.store(path, content_hash(content), vector, self.config.dimension)
            .await
    }

    pub async fn get(&self, path: &str) -> Option<Vec<f32>> {
        self.vectors
            .read()
            .await
            .get(path)
            .map(|stored| stored.vector.clone())
    }

    pub async fn remove(&self, path: &str) -> bool {
        self.vectors.write().await.remove(path).is_some()
    }

    pub async fn clear(&self) {
        self.vectors.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.vectors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vectors.read().await.is_empty()
    }

    async fn store(
        &self,
        path: &str,
        content_hash: String,
        vector: Vec<f32>,
        expected: Option<usize>,
    ) -> Result<()> {
        if let Some(expected) = expected {
            if vector.len() != expected {
                return Err(VectorStoreError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
        }
        self.vectors.write().await.insert(
            path.to_string(),
            StoredVector {
                vector,
                content_hash,
            },
        );
        Ok(())
    }
}

/// Hex-encoded SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let hash = hasher.finalize();
    format!("{hash:x}")
}
