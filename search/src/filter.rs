use crate::error::Result;
use crate::error::SearchError;
use crate::result::ResultType;
use crate::result::SearchResult;
use indexmap::IndexMap;
use log::debug;

/// One predicate a result must satisfy
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Result type equals this
    Type(ResultType),
    /// Score is at least this
    MinScore(f32),
    /// File path ends with this
    FileExtension(String),
}

impl Filter {
    pub fn matches(&self, result: &SearchResult) -> bool {
        match self {
            Filter::Type(result_type) => result.result_type() == *result_type,
            Filter::MinScore(min) => result.score >= *min,
            Filter::FileExtension(extension) => result.file.ends_with(extension.as_str()),
        }
    }
}

/// Conjunction of filters, parsed from a query's key/value map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Parse known keys in order. Unknown keys are ignored; malformed values
    /// for known keys are rejected.
    pub fn parse(raw: &IndexMap<String, String>) -> Result<Self> {
        let mut filters = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let filter = match key.as_str() {
                "type" => Filter::Type(ResultType::parse(value).ok_or_else(|| {
                    SearchError::InvalidFilter {
                        key: key.clone(),
                        reason: format!("unknown result type '{value}'"),
                    }
                })?),
                "min_score" => Filter::MinScore(
                    value
                        .trim()
                        .parse::<f32>()
                        .ok()
                        .filter(|min| min.is_finite())
                        .ok_or_else(|| SearchError::InvalidFilter {
                            key: key.clone(),
                            reason: format!("'{value}' is not a finite number"),
                        })?,
                ),
                "file_extension" => Filter::FileExtension(value.clone()),
                _ => {
                    debug!("Ignoring unknown filter '{key}'");
                    continue;
                }
            };
            filters.push(filter);
        }
        Ok(Self { filters })
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Every filter passes; stops at the first that does not.
    pub fn matches(&self, result: &SearchResult) -> bool {
        self.filters.iter().all(|filter| filter.matches(result))
    }

    /// Drop results failing any filter, then keep the first `max_results`
    /// (0 keeps all).
    pub fn apply(&self, mut results: Vec<SearchResult>, max_results: usize) -> Vec<SearchResult> {
        if !self.is_empty() {
            results.retain(|result| self.matches(result));
        }
        if max_results > 0 && results.len() > max_results {
            results.truncate(max_results);
        }
        results
    }
}
