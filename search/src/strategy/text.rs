use super::SearchStrategy;
use super::StrategyContext;
use super::is_document;
use crate::error::Result;
use crate::query::SearchQuery;
use crate::result::MatchKind;
use crate::result::SearchResult;
use crate::snippet::contains_ignore_case;
use crate::snippet::count_ignore_case;
use crate::snippet::extract_snippet;
use crate::snippet::highlight;
use async_trait::async_trait;
use log::debug;
use std::collections::HashSet;

/// Case-insensitive substring search over filenames and document content.
pub(crate) struct TextStrategy;

#[async_trait]
impl SearchStrategy for TextStrategy {
    async fn search(
        &self,
        query: &SearchQuery,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<SearchResult>> {
        let config = ctx.config;
        let entries = ctx.documents.list_files(&config.root_path).await?;

        // Repeated tokens count again; highlights show each token once.
        let tokens = ctx.tokenizer.tokenize(&query.text);
        let mut seen = HashSet::new();
        let distinct: Vec<&String> = tokens.iter().filter(|token| seen.insert(*token)).collect();

        let mut results = Vec::new();
        for entry in &entries {
            if contains_ignore_case(&entry.name, &query.text) {
                results.push(
                    SearchResult::new(
                        &entry.path,
                        MatchKind::Filename,
                        config.filename_match_score,
                        config.filename_match_score,
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
            if !contains_ignore_case(&record.content, &query.text) {
                continue;
            }

            let occurrences: usize = tokens
                .iter()
                .map(|token| count_ignore_case(&record.content, token))
                .sum();
            let score = (occurrences as f32 * config.content_occurrence_weight).min(1.0);
            let highlights = distinct
                .iter()
                .filter_map(|token| highlight(&record.content, token, config.highlight_radius))
                .collect();
            debug!("{}: {occurrences} token occurrences", entry.path);

            results.push(
                SearchResult::new(
                    &entry.path,
                    MatchKind::Content { occurrences },
                    score,
                    score,
                    1.0,
                )
                .with_snippet(extract_snippet(
                    &record.content,
                    &query.text,
                    config.snippet_radius,
                    config.snippet_fallback_len,
                ))
                .with_highlights(highlights)
                .with_record(&record)
                .with_last_modified(entry.modified),
            );
        }

        Ok(results)
    }
}
