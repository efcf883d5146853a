mod fuzzy;
mod regex;
mod semantic;
mod text;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::error::SearchError;
use crate::query::SearchMode;
use crate::query::SearchQuery;
use crate::result::SearchResult;
use async_trait::async_trait;
use docsearch_documents::ContentIndex;
use docsearch_documents::DocumentEntry;
use docsearch_documents::DocumentRecord;
use docsearch_documents::DocumentStore;
use docsearch_embeddings::Embedder;
use docsearch_utils_tokenizer::Tokenizer;
use docsearch_vector_store::VectorStore;
use log::warn;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

pub(crate) use fuzzy::FuzzyStrategy;
pub(crate) use regex::RegexStrategy;
pub(crate) use semantic::SemanticStrategy;
pub(crate) use text::TextStrategy;

/// Everything a strategy may consult during one search.
pub(crate) struct StrategyContext<'a> {
    pub config: &'a SearchConfig,
    pub documents: &'a DocumentSource<'a>,
    pub tokenizer: &'a Tokenizer,
    pub embedder: Option<&'a dyn Embedder>,
    pub vectors: &'a VectorStore,
}

/// One of the four ways of turning a query into unranked candidates.
#[async_trait]
pub(crate) trait SearchStrategy: Send + Sync {
    async fn search(
        &self,
        query: &SearchQuery,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<SearchResult>>;
}

pub(crate) fn for_mode(mode: SearchMode) -> &'static dyn SearchStrategy {
    match mode {
        SearchMode::Text => &TextStrategy,
        SearchMode::Fuzzy => &FuzzyStrategy,
        SearchMode::Regex => &RegexStrategy,
        SearchMode::Semantic => &SemanticStrategy,
    }
}

/// The document store as seen by a strategy during one search.
///
/// Listing failures abort the search. Read failures are logged, counted and
/// turned into `None`, so the strategy skips that document.
pub(crate) struct DocumentSource<'a> {
    store: &'a dyn DocumentStore,
    index: &'a ContentIndex,
    use_index: bool,
    scanned: AtomicUsize,
    skipped: AtomicUsize,
}

impl<'a> DocumentSource<'a> {
    pub fn new(store: &'a dyn DocumentStore, index: &'a ContentIndex, use_index: bool) -> Self {
        Self {
            store,
            index,
            use_index,
            scanned: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        }
    }

    /// Non-directory entries under `prefix`.
    pub async fn list_files(&self, prefix: &str) -> Result<Vec<DocumentEntry>> {
        let entries = self
            .store
            .list_documents(prefix)
            .await
            .map_err(SearchError::CollaboratorUnavailable)?;
        Ok(entries.into_iter().filter(|entry| !entry.is_dir).collect())
    }

    pub async fn read(&self, path: &str) -> Option<Arc<DocumentRecord>> {
        let record = if self.use_index {
            self.index.read_through(self.store, path).await
        } else {
            self.store
                .read_document(path)
                .await
                .map(|content| Arc::new(self.index.analyze(path, content)))
        };
        match record {
            Ok(record) => {
                self.scanned.fetch_add(1, Ordering::Relaxed);
                Some(record)
            }
            Err(err) => {
                warn!("Skipping {path}: {err}");
                self.skip();
                None
            }
        }
    }

    /// Count a document dropped for a reason other than a failed read.
    pub fn skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn scanned(&self) -> usize {
        self.scanned.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}

pub(crate) fn is_document(entry: &DocumentEntry, config: &SearchConfig) -> bool {
    entry.name.ends_with(&config.document_extension)
}
