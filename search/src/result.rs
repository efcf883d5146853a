use crate::query::SearchMode;
use chrono::DateTime;
use chrono::Utc;
use docsearch_documents::DocumentRecord;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use std::fmt;

/// Provenance tag of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Filename,
    Content,
    Semantic,
    Fuzzy,
    FuzzyContent,
    RegexFilename,
    RegexContent,
}

impl ResultType {
    pub const ALL: [ResultType; 7] = [
        ResultType::Filename,
        ResultType::Content,
        ResultType::Semantic,
        ResultType::Fuzzy,
        ResultType::FuzzyContent,
        ResultType::RegexFilename,
        ResultType::RegexContent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultType::Filename => "filename",
            ResultType::Content => "content",
            ResultType::Semantic => "semantic",
            ResultType::Fuzzy => "fuzzy",
            ResultType::FuzzyContent => "fuzzy_content",
            ResultType::RegexFilename => "regex_filename",
            ResultType::RegexContent => "regex_content",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ResultType::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a result matched, with the data specific to that kind of match.
///
/// Serialized flat into the result with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchKind {
    Filename,
    Content { occurrences: usize },
    Semantic { similarity: f32 },
    Fuzzy { similarity: f32 },
    FuzzyContent { similarity: f32 },
    RegexFilename { pattern: String },
    RegexContent { pattern: String, matches: usize },
}

impl MatchKind {
    pub fn result_type(&self) -> ResultType {
        match self {
            MatchKind::Filename => ResultType::Filename,
            MatchKind::Content { .. } => ResultType::Content,
            MatchKind::Semantic { .. } => ResultType::Semantic,
            MatchKind::Fuzzy { .. } => ResultType::Fuzzy,
            MatchKind::FuzzyContent { .. } => ResultType::FuzzyContent,
            MatchKind::RegexFilename { .. } => ResultType::RegexFilename,
            MatchKind::RegexContent { .. } => ResultType::RegexContent,
        }
    }

    fn diagnostics(&self) -> IndexMap<String, Value> {
        let mut metadata = IndexMap::new();
        match self {
            MatchKind::Filename => {}
            MatchKind::Content { occurrences } => {
                metadata.insert("occurrences".to_string(), json!(occurrences));
            }
            MatchKind::Semantic { similarity }
            | MatchKind::Fuzzy { similarity }
            | MatchKind::FuzzyContent { similarity } => {
                metadata.insert("similarity".to_string(), json!(similarity));
            }
            MatchKind::RegexFilename { pattern } => {
                metadata.insert("pattern".to_string(), json!(pattern));
            }
            MatchKind::RegexContent { pattern, matches } => {
                metadata.insert("pattern".to_string(), json!(pattern));
                metadata.insert("match_count".to_string(), json!(matches));
            }
        }
        metadata
    }
}

/// A single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document path
    pub file: String,

    /// Strategy-specific until ranked, then `relevance × weight × boost`
    pub score: f32,

    #[serde(default)]
    pub snippet: String,

    #[serde(flatten)]
    pub kind: MatchKind,

    pub relevance: f32,

    pub confidence: f32,

    /// Diagnostics such as match counts, pattern and similarity
    #[serde(default)]
    pub metadata: IndexMap<String, Value>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub links: Vec<String>,

    #[serde(default)]
    pub headers: Vec<String>,

    #[serde(default)]
    pub word_count: Option<usize>,

    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl SearchResult {
    pub fn new(
        file: impl Into<String>,
        kind: MatchKind,
        score: f32,
        relevance: f32,
        confidence: f32,
    ) -> Self {
        Self {
            file: file.into(),
            score,
            snippet: String::new(),
            metadata: kind.diagnostics(),
            kind,
            relevance,
            confidence,
            highlights: Vec::new(),
            tags: Vec::new(),
            links: Vec::new(),
            headers: Vec::new(),
            word_count: None,
            last_modified: None,
        }
    }

    pub fn result_type(&self) -> ResultType {
        self.kind.result_type()
    }

    pub fn with_snippet(mut self, snippet: String) -> Self {
        self.snippet = snippet;
        self
    }

    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Copy the structural metadata of the analyzed document
    pub fn with_record(mut self, record: &DocumentRecord) -> Self {
        self.tags = record.tags.clone();
        self.links = record.links.clone();
        self.headers = record.headers.clone();
        self.word_count = Some(record.word_count);
        self
    }

    pub fn with_last_modified(mut self, last_modified: Option<DateTime<Utc>>) -> Self {
        self.last_modified = last_modified;
        self
    }
}

/// Collection of search results with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Query text that produced these results
    pub query: String,

    pub mode: SearchMode,

    /// Ranked, filtered and truncated results
    pub results: Vec<SearchResult>,

    /// Number of candidates the strategy produced before filtering
    pub total_candidates: usize,

    pub stats: SearchStats,
}

/// Search performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total search time in milliseconds
    pub total_time_ms: u64,

    /// Time spent in the strategy, document reads included
    pub strategy_time_ms: u64,

    pub rank_time_ms: u64,

    /// Documents read successfully
    pub documents_scanned: usize,

    /// Documents skipped because reading or embedding them failed
    pub documents_skipped: usize,

    /// Cache hit
    pub cache_hit: bool,
}

impl SearchResults {
    pub fn new(query: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            query: query.into(),
            mode,
            results: Vec::new(),
            total_candidates: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn with_results(mut self, results: Vec<SearchResult>) -> Self {
        self.results = results;
        self
    }

    pub fn with_total_candidates(mut self, count: usize) -> Self {
        self.total_candidates = count;
        self
    }

    pub fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }

    /// Get top N results
    pub fn top(&self, n: usize) -> &[SearchResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}
