use crate::error::Result;
use crate::error::SearchError;
use docsearch_embeddings::HttpEmbeddingConfig;
use docsearch_vector_store::VectorStoreConfig;
use serde::Deserialize;
use serde::Serialize;

/// What the result cache keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKeyScope {
    /// Raw query text only. Different modes and filters for the same text
    /// share one entry.
    Text,
    /// Text, mode, filters and max_results
    Full,
}

/// Per-type multipliers applied by the ranker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    /// `filename` results
    #[serde(default = "default_filename_weight")]
    pub filename: f32,

    /// `content` and `semantic` results
    #[serde(default = "default_content_weight")]
    pub content: f32,

    /// `fuzzy` and `fuzzy_content` results
    #[serde(default = "default_fuzzy_weight")]
    pub fuzzy: f32,

    /// `regex_filename` and `regex_content` results
    #[serde(default = "default_regex_weight")]
    pub regex: f32,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            filename: default_filename_weight(),
            content: default_content_weight(),
            fuzzy: default_fuzzy_weight(),
            regex: default_regex_weight(),
        }
    }
}

/// Configuration for the search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Prefix passed to the document store when listing
    #[serde(default)]
    pub root_path: String,

    /// Only documents whose name ends with this are read for content matching
    #[serde(default = "default_document_extension")]
    pub document_extension: String,

    /// Minimum query length in characters
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// Score of a literal filename match
    #[serde(default = "default_filename_match_score")]
    pub filename_match_score: f32,

    /// Fuzzy filename similarity must exceed this
    #[serde(default = "default_fuzzy_filename_threshold")]
    pub fuzzy_filename_threshold: f32,

    /// Fuzzy content similarity must exceed this
    #[serde(default = "default_fuzzy_content_threshold")]
    pub fuzzy_content_threshold: f32,

    /// Cosine similarity must exceed this
    #[serde(default = "default_semantic_threshold")]
    pub semantic_threshold: f32,

    /// Score added per query-token occurrence in content (capped at 1.0)
    #[serde(default = "default_content_occurrence_weight")]
    pub content_occurrence_weight: f32,

    /// Characters kept on each side of a match in snippets
    #[serde(default = "default_snippet_radius")]
    pub snippet_radius: usize,

    /// Leading characters used as the snippet when nothing matches literally
    #[serde(default = "default_snippet_fallback_len")]
    pub snippet_fallback_len: usize,

    /// Characters kept on each side of a token in highlight excerpts
    #[serde(default = "default_highlight_radius")]
    pub highlight_radius: usize,

    #[serde(default)]
    pub ranking: RankingWeights,

    /// Ranked score is multiplied by `1 + confidence * confidence_boost`
    #[serde(default = "default_confidence_boost")]
    pub confidence_boost: f32,

    /// Enable caching of search results
    #[serde(default = "default_true")]
    pub enable_cache: bool,

    /// Cache size (number of queries to cache)
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_key_scope")]
    pub cache_key_scope: CacheKeyScope,

    /// Keep analyzed documents between searches
    #[serde(default = "default_true")]
    pub enable_content_index: bool,

    #[serde(default = "default_content_index_ttl_secs")]
    pub content_index_ttl_secs: u64,

    /// HTTP embedding service used by semantic mode when no embedder is
    /// supplied programmatically
    #[serde(default)]
    pub embedding: Option<HttpEmbeddingConfig>,

    #[serde(default)]
    pub vector_store: VectorStoreConfig,
}

fn default_document_extension() -> String {
    ".md".to_string()
}

fn default_min_query_length() -> usize {
    1
}

fn default_filename_match_score() -> f32 {
    0.9
}

fn default_fuzzy_filename_threshold() -> f32 {
    0.5
}

fn default_fuzzy_content_threshold() -> f32 {
    0.3
}

fn default_semantic_threshold() -> f32 {
    0.3
}

fn default_content_occurrence_weight() -> f32 {
    0.1
}

fn default_snippet_radius() -> usize {
    100
}

fn default_snippet_fallback_len() -> usize {
    200
}

fn default_highlight_radius() -> usize {
    20
}

fn default_filename_weight() -> f32 {
    0.3
}

fn default_content_weight() -> f32 {
    0.4
}

fn default_fuzzy_weight() -> f32 {
    0.7
}

fn default_regex_weight() -> f32 {
    0.8
}

fn default_confidence_boost() -> f32 {
    0.2
}

fn default_true() -> bool {
    true
}

fn default_cache_size() -> usize {
    1000
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_cache_key_scope() -> CacheKeyScope {
    CacheKeyScope::Full
}

fn default_content_index_ttl_secs() -> u64 {
    600
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            document_extension: default_document_extension(),
            min_query_length: default_min_query_length(),
            filename_match_score: default_filename_match_score(),
            fuzzy_filename_threshold: default_fuzzy_filename_threshold(),
            fuzzy_content_threshold: default_fuzzy_content_threshold(),
            semantic_threshold: default_semantic_threshold(),
            content_occurrence_weight: default_content_occurrence_weight(),
            snippet_radius: default_snippet_radius(),
            snippet_fallback_len: default_snippet_fallback_len(),
            highlight_radius: default_highlight_radius(),
            ranking: RankingWeights::default(),
            confidence_boost: default_confidence_boost(),
            enable_cache: true,
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_key_scope: default_cache_key_scope(),
            enable_content_index: true,
            content_index_ttl_secs: default_content_index_ttl_secs(),
            embedding: None,
            vector_store: VectorStoreConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parse from TOML and validate. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| SearchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("filename_match_score", self.filename_match_score),
            ("fuzzy_filename_threshold", self.fuzzy_filename_threshold),
            ("fuzzy_content_threshold", self.fuzzy_content_threshold),
            ("content_occurrence_weight", self.content_occurrence_weight),
            ("ranking.filename", self.ranking.filename),
            ("ranking.content", self.ranking.content),
            ("ranking.fuzzy", self.ranking.fuzzy),
            ("ranking.regex", self.ranking.regex),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be in [0.0, 1.0], got {value}"
                )));
            }
        }

        // Cosine similarity can be negative.
        if !(-1.0..=1.0).contains(&self.semantic_threshold) {
            return Err(SearchError::InvalidConfig(format!(
                "semantic_threshold must be in [-1.0, 1.0], got {}",
                self.semantic_threshold
            )));
        }

        if self.confidence_boost.is_nan() || self.confidence_boost < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "confidence_boost must be >= 0, got {}",
                self.confidence_boost
            )));
        }

        if self.enable_cache && self.cache_size == 0 {
            return Err(SearchError::InvalidConfig(
                "cache_size must be > 0 when the cache is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Search under `root_path` with every other setting at its default
    pub fn for_root(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    /// Keys the result cache on raw query text alone, so a query cached in
    /// one mode is served to every mode.
    pub fn text_keyed_cache() -> Self {
        Self {
            cache_key_scope: CacheKeyScope::Text,
            ..Default::default()
        }
    }

    /// Every search goes to the document store
    pub fn uncached() -> Self {
        Self {
            enable_cache: false,
            enable_content_index: false,
            ..Default::default()
        }
    }
}
