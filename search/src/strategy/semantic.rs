use super::SearchStrategy;
use super::StrategyContext;
use super::is_document;
use crate::error::Result;
use crate::error::SearchError;
use crate::query::SearchQuery;
use crate::result::MatchKind;
use crate::result::SearchResult;
use crate::snippet::extract_snippet;
use async_trait::async_trait;
use docsearch_vector_store::cosine_similarity;
use log::debug;
use log::warn;

/// Cosine similarity between the query embedding and each document's.
pub(crate) struct SemanticStrategy;

#[async_trait]
impl SearchStrategy for SemanticStrategy {
    async fn search(
        &self,
        query: &SearchQuery,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<SearchResult>> {
        let embedder = ctx.embedder.ok_or_else(|| {
            SearchError::EmbeddingUnavailable("no embedder configured".to_string())
        })?;
        let query_vector = embedder
            .embed(&query.text)
            .await
            .map_err(|e| SearchError::EmbeddingUnavailable(e.to_string()))?;

        let config = ctx.config;
        let entries = ctx.documents.list_files(&config.root_path).await?;

        let mut results = Vec::new();
        for entry in entries.iter().filter(|entry| is_document(entry, config)) {
            let Some(record) = ctx.documents.read(&entry.path).await else {
                continue;
            };
            let vector = match ctx
                .vectors
                .embedding_for(&entry.path, &record.content, embedder)
                .await
            {
                Ok(vector) => vector,
                Err(err) => {
                    warn!("Skipping {}: {err}", entry.path);
                    ctx.documents.skip();
                    continue;
                }
            };

            let similarity = cosine_similarity(&query_vector, &vector);
            debug!("{}: similarity {similarity:.3}", entry.path);
            if similarity > config.semantic_threshold {
                results.push(
                    SearchResult::new(
                        &entry.path,
                        MatchKind::Semantic { similarity },
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
