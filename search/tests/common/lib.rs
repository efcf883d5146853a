//! Fixtures shared by the search integration suite.

use async_trait::async_trait;
use docsearch_documents::DocumentEntry;
use docsearch_documents::DocumentError;
use docsearch_documents::DocumentStore;
use docsearch_documents::MemoryDocumentStore;
use docsearch_embeddings::Embedder;
use docsearch_embeddings::EmbeddingError;
use docsearch_utils_tokenizer::tokenize;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

pub const MATHEMATICS: &str = "notes/mathematics.md";
pub const PHYSICS: &str = "notes/physics.md";
pub const RECIPES: &str = "notes/recipes.md";
pub const SHOPPING: &str = "notes/shopping.txt";

/// Small corpus with one non-markdown file.
pub fn sample_corpus() -> MemoryDocumentStore {
    MemoryDocumentStore::from_documents([
        (MATHEMATICS, "mathematics is the study of patterns"),
        (
            PHYSICS,
            "# Physics\n\nphysics uses mathematics to describe motion. #science\n\nSee [[mathematics]].",
        ),
        (RECIPES, "pancakes need flour, eggs and milk"),
        (SHOPPING, "buy milk and flour"),
    ])
}

/// Wraps a store and counts every call that reaches it.
pub struct CountingDocumentStore {
    inner: Arc<dyn DocumentStore>,
    lists: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingDocumentStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            lists: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.read_calls()
    }
}

#[async_trait]
impl DocumentStore for CountingDocumentStore {
    async fn list_documents(&self, prefix: &str) -> docsearch_documents::Result<Vec<DocumentEntry>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_documents(prefix).await
    }

    async fn read_document(&self, path: &str) -> docsearch_documents::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_document(path).await
    }
}

/// A store whose listing always fails.
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn list_documents(&self, prefix: &str) -> docsearch_documents::Result<Vec<DocumentEntry>> {
        Err(DocumentError::ListFailed {
            prefix: prefix.to_string(),
            reason: "connection refused".to_string(),
        })
    }

    async fn read_document(&self, path: &str) -> docsearch_documents::Result<String> {
        Err(DocumentError::NotFound(path.to_string()))
    }
}

/// Lists normally but fails to read the given paths.
pub struct FlakyReadStore {
    inner: Arc<dyn DocumentStore>,
    broken: HashSet<String>,
}

impl FlakyReadStore {
    pub fn new(inner: Arc<dyn DocumentStore>, broken: &[&str]) -> Self {
        Self {
            inner,
            broken: broken.iter().map(|path| path.to_string()).collect(),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyReadStore {
    async fn list_documents(&self, prefix: &str) -> docsearch_documents::Result<Vec<DocumentEntry>> {
        self.inner.list_documents(prefix).await
    }

    async fn read_document(&self, path: &str) -> docsearch_documents::Result<String> {
        if self.broken.contains(path) {
            return Err(DocumentError::ReadFailed {
                path: path.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        self.inner.read_document(path).await
    }
}

/// Deterministic embedder: one dimension per vocabulary word, valued by the
/// word's frequency in the text. Words outside the vocabulary are ignored.
pub struct KeywordEmbedder {
    vocabulary: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|word| word.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Vocabulary covering [`sample_corpus`].
    pub fn for_sample_corpus() -> Self {
        Self::new(&[
            "mathematics",
            "study",
            "patterns",
            "physics",
            "motion",
            "pancakes",
            "flour",
            "milk",
        ])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> docsearch_embeddings::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let terms = tokenize(text);
        Ok(self
            .vocabulary
            .iter()
            .map(|word| terms.iter().filter(|term| *term == word).count() as f32)
            .collect())
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.vocabulary.len())
    }
}

/// Embedder whose every call fails.
pub struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed(&self, _text: &str) -> docsearch_embeddings::Result<Vec<f32>> {
        Err(EmbeddingError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

/// [`KeywordEmbedder`] that fails on any text containing `marker`.
pub struct SelectiveEmbedder {
    inner: KeywordEmbedder,
    marker: String,
}

impl SelectiveEmbedder {
    pub fn new(inner: KeywordEmbedder, marker: &str) -> Self {
        Self {
            inner,
            marker: marker.to_string(),
        }
    }
}

#[async_trait]
impl Embedder for SelectiveEmbedder {
    async fn embed(&self, text: &str) -> docsearch_embeddings::Result<Vec<f32>> {
        if text.contains(&self.marker) {
            return Err(EmbeddingError::EmbeddingGeneration(format!(
                "refusing text containing '{}'",
                self.marker
            )));
        }
        self.inner.embed(text).await
    }

    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }
}
