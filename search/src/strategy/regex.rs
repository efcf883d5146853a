use super::SearchStrategy;
use super::StrategyContext;
use super::is_document;
use crate::error::Result;
use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::result::MatchKind;
use crate::result::SearchResult;
use crate::snippet::snippet_around;
use async_trait::async_trait;
use regex_lite::Regex;

/// The query is compiled once as a pattern and matched against filenames
/// and content.
pub(crate) struct RegexStrategy;

#[async_trait]
impl SearchStrategy for RegexStrategy {
    async fn search(
        &self,
        query: &SearchQuery,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<SearchResult>> {
        let pattern = Regex::new(&query.text).map_err(|source| SearchError::InvalidPattern {
            pattern: query.text.clone(),
            source,
        })?;

        let config = ctx.config;
        let entries = ctx.documents.list_files(&config.root_path).await?;

        let mut results = Vec::new();
        for entry in &entries {
            if pattern.is_match(&entry.name) {
                results.push(
                    SearchResult::new(
                        &entry.path,
                        MatchKind::RegexFilename {
                            pattern: query.text.clone(),
                        },
                        1.0,
                        1.0,
                        1.0,
                    )
                    .with_last_modified(entry.modified),
                );
            }

            if !is_document(entry, config) {
                continue;
            }
            let Some(record) = ctx.documents.read(&entry.path).await else {
                continue;
            };

            // Empty matches carry no text to show or count.
            let spans: Vec<(usize, usize)> = pattern
                .find_iter(&record.content)
                .filter(|m| !m.is_empty())
                .map(|m| (m.start(), m.end()))
                .collect();
            let Some(&(first_start, first_end)) = spans.first() else {
                continue;
            };

            let matches = spans.len();
            let highlights = spans
                .iter()
                .map(|&(start, end)| record.content[start..end].to_string())
                .collect();
            let start = record.content[..first_start].chars().count();
            let end = start + record.content[first_start..first_end].chars().count();
            let relevance = (matches as f32 * config.content_occurrence_weight).min(1.0);

            results.push(
                SearchResult::new(
                    &entry.path,
                    MatchKind::RegexContent {
                        pattern: query.text.clone(),
                        matches,
                    },
                    matches as f32,
                    relevance,
                    1.0,
                )
                .with_snippet(snippet_around(
                    &record.content,
                    start,
                    end,
                    config.snippet_radius,
                ))
                .with_highlights(highlights)
                .with_record(&record)
                .with_last_modified(entry.modified),
            );
        }

        Ok(results)
    }
}
