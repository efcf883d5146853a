use crate::cache::CacheKey;
use crate::cache::ResultCache;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::error::SearchError;
use crate::filter::FilterSet;
use crate::query::SearchQuery;
use crate::rank::Ranker;
use crate::result::SearchResults;
use crate::result::SearchStats;
use crate::strategy;
use crate::strategy::DocumentSource;
use crate::strategy::StrategyContext;
use docsearch_documents::ContentIndex;
use docsearch_documents::DEFAULT_INDEX_CAPACITY;
use docsearch_documents::DocumentStore;
use docsearch_embeddings::Embedder;
use docsearch_embeddings::HttpEmbedder;
use docsearch_utils_cache::CacheStats;
use docsearch_utils_cache::Clock;
use docsearch_utils_cache::SystemClock;
use docsearch_utils_tokenizer::Tokenizer;
use docsearch_vector_store::VectorStore;
use log::debug;
use log::info;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Multi-mode search over a document store
pub struct SearchEngine {
    config: SearchConfig,
    documents: Arc<dyn DocumentStore>,
    embedder: Option<Arc<dyn Embedder>>,
    tokenizer: Tokenizer,
    index: ContentIndex,
    vectors: VectorStore,
    cache: Option<ResultCache>,
    ranker: Ranker,
}

/// Assembles a [`SearchEngine`] from its collaborators
pub struct SearchEngineBuilder {
    documents: Arc<dyn DocumentStore>,
    config: SearchConfig,
    embedder: Option<Arc<dyn Embedder>>,
    tokenizer: Tokenizer,
    clock: Arc<dyn Clock>,
}

impl SearchEngineBuilder {
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides `config.embedding`
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Clock used to age cache and index entries
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<SearchEngine> {
        let config = self.config;
        config.validate()?;

        info!("Initializing search engine over '{}'", config.root_path);

        let embedder = match (self.embedder, &config.embedding) {
            (Some(embedder), _) => Some(embedder),
            (None, Some(http)) => {
                let embedder = HttpEmbedder::new(http.clone())
                    .map_err(|e| SearchError::InvalidConfig(e.to_string()))?;
                Some(Arc::new(embedder) as Arc<dyn Embedder>)
            }
            (None, None) => None,
        };

        let cache = if config.enable_cache {
            let capacity = NonZeroUsize::new(config.cache_size).ok_or_else(|| {
                SearchError::InvalidConfig("cache_size must be > 0".to_string())
            })?;
            Some(ResultCache::new(
                capacity,
                Duration::from_secs(config.cache_ttl_secs),
                self.clock.clone(),
            ))
        } else {
            None
        };

        let index = ContentIndex::new(
            NonZeroUsize::new(DEFAULT_INDEX_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            Duration::from_secs(config.content_index_ttl_secs),
            self.tokenizer.clone(),
            self.clock,
        );

        Ok(SearchEngine {
            ranker: Ranker::from_config(&config),
            vectors: VectorStore::with_config(config.vector_store.clone()),
            config,
            documents: self.documents,
            embedder,
            tokenizer: self.tokenizer,
            index,
            cache,
        })
    }
}

impl SearchEngine {
    pub fn builder(documents: Arc<dyn DocumentStore>) -> SearchEngineBuilder {
        SearchEngineBuilder {
            documents,
            config: SearchConfig::default(),
            embedder: None,
            tokenizer: Tokenizer::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Engine with `config` and no programmatic embedder
    pub fn new(config: SearchConfig, documents: Arc<dyn DocumentStore>) -> Result<Self> {
        Self::builder(documents).config(config).build()
    }

    /// Run one search: cache lookup, strategy, rank, filter, cache store.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let start = Instant::now();

        let length = query.text.chars().count();
        if length < self.config.min_query_length {
            return Err(SearchError::QueryTooShort {
                min: self.config.min_query_length,
                actual: length,
            });
        }
        let filters = FilterSet::parse(&query.filters)?;
        if let Some(sort_by) = &query.sort_by {
            debug!("Ignoring sort_by '{sort_by}'; results are always ranked by score");
        }

        debug!("{} search for: '{}'", query.mode, query.text);

        let key = CacheKey::for_query(query, self.config.cache_key_scope);
        if let Some(cache) = &self.cache {
            if let Some(entry) = cache.get(&key).await {
                info!("Cache hit for query: '{}'", query.text);
                let mut results = entry.value;
                results.stats = SearchStats {
                    cache_hit: true,
                    total_time_ms: start.elapsed().as_millis() as u64,
                    ..Default::default()
                };
                return Ok(present(results, query));
            }
        }

        let mut stats = SearchStats::default();

        let strategy_start = Instant::now();
        let source = DocumentSource::new(
            self.documents.as_ref(),
            &self.index,
            self.config.enable_content_index,
        );
        let ctx = StrategyContext {
            config: &self.config,
            documents: &source,
            tokenizer: &self.tokenizer,
            embedder: self.embedder.as_deref(),
            vectors: &self.vectors,
        };
        let candidates = strategy::for_mode(query.mode).search(query, &ctx).await?;
        stats.strategy_time_ms = strategy_start.elapsed().as_millis() as u64;
        stats.documents_scanned = source.scanned();
        stats.documents_skipped = source.skipped();
        let total_candidates = candidates.len();
        debug!("Strategy produced {total_candidates} candidates");

        let rank_start = Instant::now();
        let ranked = self.ranker.rank(candidates);
        stats.rank_time_ms = rank_start.elapsed().as_millis() as u64;

        let final_results = filters.apply(ranked, query.max_results);

        stats.total_time_ms = start.elapsed().as_millis() as u64;
        let results = SearchResults::new(query.text.clone(), query.mode)
            .with_results(final_results)
            .with_total_candidates(total_candidates)
            .with_stats(stats);

        if let Some(cache) = &self.cache {
            cache.set(key, results.clone()).await;
        }

        info!(
            "Search completed in {}ms, returned {} results",
            results.stats.total_time_ms,
            results.len()
        );

        Ok(present(results, query))
    }

    /// Clear search cache
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear().await;
            info!("Search cache cleared");
        }
    }

    /// Size and capacity of the result cache; zero when caching is off
    pub async fn cache_stats(&self) -> CacheStats {
        match &self.cache {
            Some(cache) => cache.stats().await,
            None => CacheStats {
                size: 0,
                capacity: 0,
            },
        }
    }

    /// Forget everything derived from `path`: its indexed record, its
    /// embedding and every cached search.
    pub async fn invalidate_document(&self, path: &str) {
        self.index.invalidate(path).await;
        self.vectors.remove(path).await;
        self.clear_cache().await;
        debug!("Invalidated {path}");
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

/// Strip snippets and highlights the caller did not ask for.
fn present(mut results: SearchResults, query: &SearchQuery) -> SearchResults {
    if query.include_content && query.highlight {
        return results;
    }
    for result in &mut results.results {
        if !query.include_content {
            result.snippet.clear();
        }
        if !query.highlight {
            result.highlights.clear();
        }
    }
    results
}
