use crate::error::SearchError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which strategy answers a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match on filenames and content
    #[default]
    Text,
    /// Cosine similarity between query and document embeddings
    Semantic,
    /// Levenshtein similarity against filenames and content
    Fuzzy,
    /// The query is a regular expression
    Regex,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Text,
        SearchMode::Semantic,
        SearchMode::Fuzzy,
        SearchMode::Regex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Text => "text",
            SearchMode::Semantic => "semantic",
            SearchMode::Fuzzy => "fuzzy",
            SearchMode::Regex => "regex",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| SearchError::InvalidMode(s.to_string()))
    }
}

fn default_true() -> bool {
    true
}

/// A single search request. Not modified by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,

    #[serde(default)]
    pub mode: SearchMode,

    /// All must pass. Known keys: `type`, `min_score`, `file_extension`.
    #[serde(default)]
    pub filters: IndexMap<String, String>,

    /// Advisory only; results are always ranked by score.
    #[serde(default)]
    pub sort_by: Option<String>,

    /// 0 means unlimited
    #[serde(default)]
    pub max_results: usize,

    /// Keep snippets in the returned results
    #[serde(default = "default_true")]
    pub include_content: bool,

    /// Keep highlight excerpts in the returned results
    #[serde(default = "default_true")]
    pub highlight: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
            filters: IndexMap::new(),
            sort_by: None,
            max_results: 0,
            include_content: true,
            highlight: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Text)
    }

    pub fn fuzzy(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Fuzzy)
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(pattern, SearchMode::Regex)
    }

    pub fn semantic(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Semantic)
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn with_include_content(mut self, include_content: bool) -> Self {
        self.include_content = include_content;
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}
