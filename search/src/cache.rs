use crate::config::CacheKeyScope;
use crate::query::SearchMode;
use crate::query::SearchQuery;
use crate::result::SearchResults;
use docsearch_utils_cache::CacheEntry;
use docsearch_utils_cache::CacheStats;
use docsearch_utils_cache::Clock;
use docsearch_utils_cache::TtlCache;
use log::debug;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// Identity of a cached search. Text is used exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Text(String),
    Full {
        text: String,
        mode: SearchMode,
        filters: Vec<(String, String)>,
        max_results: usize,
    },
}

impl CacheKey {
    pub fn for_query(query: &SearchQuery, scope: CacheKeyScope) -> Self {
        match scope {
            CacheKeyScope::Text => CacheKey::Text(query.text.clone()),
            CacheKeyScope::Full => CacheKey::Full {
                text: query.text.clone(),
                mode: query.mode,
                filters: query
                    .filters
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                max_results: query.max_results,
            },
        }
    }
}

/// Time-boxed, size-bounded store of finished searches.
pub struct ResultCache {
    entries: TtlCache<CacheKey, SearchResults>,
}

impl ResultCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: TtlCache::new(capacity, ttl, clock),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry<SearchResults>> {
        self.entries.get(key).await
    }

    pub async fn set(&self, key: CacheKey, results: SearchResults) {
        if self.entries.set(key, results).await.is_some() {
            debug!("Result cache full, evicted oldest entry");
        }
    }

    pub async fn clear(&self) {
        self.entries.clear().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.stats().await
    }
}
