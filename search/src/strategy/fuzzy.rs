use super::SearchStrategy;
use super::StrategyContext;
use super::is_document;
use crate::error::Result;
use crate::fuzzy::fuzzy_score;
use crate::query::SearchQuery;
use crate::result::MatchKind;
use crate::result::SearchResult;
use crate::snippet::extract_snippet;
use async_trait::async_trait;

/// Levenshtein similarity of the whole query against filenames and content.
pub(crate) struct FuzzyStrategy;

#[async_trait]
impl SearchStrategy for FuzzyStrategy {
    async fn search(
        &self,
        query: &SearchQuery,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<SearchResult>> {
        let config = ctx.config;
        let entries = ctx.documents.list_files(&config.root_path).await?;

        let mut results = Vec::new();
        for entry in &entries {
            let similarity = fuzzy_score(&entry.name, &query.text);
            if similarity > config.fuzzy_filename_threshold {
                results.push(
                    SearchResult::new(
                        &entry.path,
                        MatchKind::Fuzzy { similarity },
                        similarity,
                        similarity,
                        similarity,
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

            let similarity = fuzzy_score(&record.content, &query.text);
            if similarity > config.fuzzy_content_threshold {
                results.push(
                    SearchResult::new(
                        &entry.path,
                        MatchKind::FuzzyContent { similarity },
                        similarity,
                        similarity,
                        similarity,
                    )
                    .with_snippet(extract_snippet(
                        &record.content,
                        &query.text,
                        config.snippet_radius,
                        config.snippet_fallback_len,
                    ))
                    .with_record(&record)
                    .with_last_modified(entry.modified),
                );
            }
        }

        Ok(results)
    }
}
