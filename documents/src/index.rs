use crate::error::Result;
use crate::record::DocumentRecord;
use crate::store::DocumentStore;
use docsearch_utils_cache::Clock;
use docsearch_utils_cache::TtlCache;
use docsearch_utils_tokenizer::Tokenizer;
use log::debug;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// Default number of analyzed documents kept in memory.
pub const DEFAULT_INDEX_CAPACITY: usize = 10_000;

/// Read-through cache of analyzed documents in front of a [`DocumentStore`].
///
/// Records live for the configured TTL; after that the next read goes back
/// to the store and re-analyzes.
pub struct ContentIndex {
    records: TtlCache<String, Arc<DocumentRecord>>,
    tokenizer: Tokenizer,
    clock: Arc<dyn Clock>,
}

impl ContentIndex {
    pub fn new(
        capacity: NonZeroUsize,
        ttl: Duration,
        tokenizer: Tokenizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            records: TtlCache::new(capacity, ttl, clock.clone()),
            tokenizer,
            clock,
        }
    }

    /// Record for `path`, reading and analyzing it on a miss.
    pub async fn read_through(
        &self,
        store: &dyn DocumentStore,
        path: &str,
    ) -> Result<Arc<DocumentRecord>> {
        let key = path.to_string();
        if let Some(entry) = self.records.get(&key).await {
            debug!("Content index hit for {path}");
            return Ok(entry.value);
        }

        let content = store.read_document(path).await?;
        Ok(self.insert(path, content).await)
    }

    /// Analyze `content` and index it under `path`, replacing any previous
    /// record.
    pub async fn insert(&self, path: &str, content: String) -> Arc<DocumentRecord> {
        let record = Arc::new(self.analyze(path, content));
        self.records.set(path.to_string(), record.clone()).await;
        record
    }

    /// Analyze without indexing.
    pub fn analyze(&self, path: &str, content: String) -> DocumentRecord {
        DocumentRecord::analyze(path, content, &self.tokenizer, self.clock.now())
    }

    pub async fn invalidate(&self, path: &str) -> bool {
        self.records.invalidate(&path.to_string()).await
    }

    pub async fn len(&self) -> usize {
        self.records.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.records.is_empty().await
    }
}
